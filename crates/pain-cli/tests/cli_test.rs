use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const HEADER: &str = "id,date,nb_of_txs,initiator_name,payment_information_id,payment_method,\
batch_booking,requested_execution_date,debtor_name,debtor_account_IBAN,debtor_agent_BIC,\
charge_bearer,payment_id,payment_amount,currency,creditor_agent_BIC,creditor_name,\
creditor_account_IBAN,remittance_information,service_level_code";

fn row(payment_id: &str, amount: &str, currency: &str) -> String {
    format!(
        "1001,2024-03-01T09:30:00,2,ACME Corp,PMT-1,TRF,true,2024-03-04,ACME Corp,\
DE89370400440532013000,DEUTDEFF,SLEV,{payment_id},{amount},{currency},COBADEFFXXX,\
Supplier,FR1420041010050500013M02606,Invoice 42,SEPA"
    )
}

fn pain001() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pain001"))
}

fn run(args: &[&str]) -> Output {
    pain001()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("pain001 should execute")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Template, v03 schema and a two-row CSV in a fresh directory
fn workspace(rows: &[String]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("template.xml"), "<Document/>\n").unwrap();
    fs::copy(
        concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../pain-message/tests/fixtures/pain.001.001.03.xsd"
        ),
        dir.path().join("schema.xsd"),
    )
    .unwrap();

    let mut csv = format!("{HEADER}\n");
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    fs::write(dir.path().join("payments.csv"), csv).unwrap();
    dir
}

fn valid_rows() -> Vec<String> {
    vec![row("E2E-1", "10.25", "EUR"), row("E2E-2", "20.25", "EUR")]
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn generate_args(dir: &Path, variant: &str) -> Vec<String> {
    vec![
        "generate".to_string(),
        variant.to_string(),
        dir.join("template.xml").display().to_string(),
        dir.join("schema.xsd").display().to_string(),
        dir.join("payments.csv").display().to_string(),
    ]
}

fn run_generate(dir: &Path, variant: &str, extra: &[&str]) -> Output {
    let mut args = generate_args(dir, variant);
    args.extend(extra.iter().map(|s| (*s).to_string()));
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run(&args)
}

fn output_path(dir: &Path) -> PathBuf {
    dir.join("pain.001.001.03.xml")
}

#[test]
fn test_variants_lists_every_supported_version() {
    let output = run(&["variants"]);
    assert!(output.status.success());

    let listed: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(listed.len(), 8);
    assert_eq!(listed[0], "pain.001.001.03");
    assert_eq!(listed[7], "pain.001.001.10");
}

#[test]
fn test_generate_writes_document_next_to_template() {
    let dir = workspace(&valid_rows());
    let output = run_generate(dir.path(), "pain.001.001.03", &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("2 transaction(s)"));

    let xml = fs::read_to_string(output_path(dir.path())).unwrap();
    assert!(xml.contains("<NbOfTxs>2</NbOfTxs>"));
    assert!(xml.contains("<CtrlSum>30.50</CtrlSum>"));
}

#[test]
fn test_generated_document_passes_validate_command() {
    let dir = workspace(&valid_rows());
    assert!(run_generate(dir.path(), "pain.001.001.03", &[]).status.success());

    let xml = output_path(dir.path());
    let schema = dir.path().join("schema.xsd");
    let output = run(&["validate", arg(&xml), "--schema", arg(&schema)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("is valid"));
}

#[test]
fn test_validate_rejects_nonconforming_document() {
    let dir = workspace(&valid_rows());
    let xml = dir.path().join("bad.xml");
    fs::write(
        &xml,
        "<Document xmlns=\"urn:iso:std:iso:20022:tech:xsd:pain.001.001.03\"><Unknown/></Document>",
    )
    .unwrap();

    let schema = dir.path().join("schema.xsd");
    let output = run(&["validate", arg(&xml), "-s", arg(&schema)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is not valid"));
}

#[test]
fn test_unsupported_variant_exits_with_failure() {
    let dir = workspace(&valid_rows());
    let output = run_generate(dir.path(), "unsupported.999", &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unsupported.999"));
    assert!(!dir.path().join("unsupported.999.xml").exists());
}

#[test]
fn test_empty_data_exits_with_failure() {
    let dir = workspace(&[]);
    let output = run_generate(dir.path(), "pain.001.001.03", &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("empty"));
    assert!(!output_path(dir.path()).exists());
}

#[test]
fn test_keep_invalid_leaves_failing_output() {
    let dir = workspace(&[row("E2E-1", "10.25", "euro")]);
    let output = run_generate(dir.path(), "pain.001.001.03", &["--keep-invalid"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Schema violation"));
    assert!(output_path(dir.path()).exists());
}

#[test]
fn test_config_file_sets_delimiter() {
    let rows: Vec<String> = valid_rows().iter().map(|r| r.replace(',', ";")).collect();
    let dir = workspace(&[]);
    fs::write(
        dir.path().join("payments.csv"),
        format!("{}\n{}\n", HEADER.replace(',', ";"), rows.join("\n")),
    )
    .unwrap();
    let config = dir.path().join("pain001.yaml");
    fs::write(&config, "csv:\n  delimiter: \";\"\nlog_format: json\n").unwrap();

    let output = run_generate(dir.path(), "pain.001.001.03", &["--config", arg(&config)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output_path(dir.path()).exists());
}

#[test]
fn test_bad_arguments_exit_with_failure() {
    let output = run(&["generate", "pain.001.001.03"]);
    assert_eq!(output.status.code(), Some(1));
}
