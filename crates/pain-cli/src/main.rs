//! # pain-cli
//!
//! Command-line interface for the `pain.001` generator.
//!
//! ```text
//! pain001 generate pain.001.001.03 template.xml pain.001.001.03.xsd payments.csv
//! pain001 validate pain.001.001.03.xml --schema pain.001.001.03.xsd
//! pain001 variants
//! ```

mod config;
mod logging;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use config::{FileConfig, GenerateOverrides, LogFormat, PolicyName};
use pain_pipeline::{GenerationRequest, Generator};
use pain_schema::MessageVariant;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pain001")]
#[command(about = "Generate ISO 20022 pain.001 customer credit transfer initiation messages")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a payment initiation document from CSV or SQLite data
    Generate(GenerateArgs),

    /// Validate an XML document against an XSD
    Validate {
        /// XML document
        xml: PathBuf,

        /// XSD file
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// List the supported message variants
    Variants,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Message variant, e.g. pain.001.001.03
    variant: String,

    /// Template path; the output is written next to it as <variant>.xml
    template: PathBuf,

    /// XSD the output must conform to
    schema: PathBuf,

    /// Payment data (.csv, .db or .sqlite)
    data: PathBuf,

    /// Table to read from a database source
    #[arg(long)]
    table: Option<String>,

    /// When to check the output against the XSD
    #[arg(long, value_enum)]
    policy: Option<PolicyName>,

    /// Keep an output file that failed schema validation
    #[arg(long)]
    keep_invalid: bool,

    /// CSV field delimiter
    #[arg(long)]
    delimiter: Option<char>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let level = logging::level_for(cli.verbose, file.log_level.as_deref());
    logging::init(&level, cli.log_format.or(file.log_format).unwrap_or_default())?;

    match cli.command {
        Commands::Generate(args) => generate(&file, args).await,
        Commands::Validate { xml, schema } => validate(&xml, &schema),
        Commands::Variants => {
            for variant in MessageVariant::ALL {
                println!("{variant}");
            }
            Ok(())
        }
    }
}

async fn generate(file: &FileConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let overrides = GenerateOverrides {
        delimiter: args.delimiter,
        policy: args.policy,
        keep_invalid: args.keep_invalid,
    };
    let generator = Generator::new(file.generator_config(&overrides));

    let mut request = GenerationRequest::new(args.variant, args.template, args.schema, args.data);
    if let Some(table) = args.table {
        request = request.with_table(table);
    }

    let report = generator.generate(&request).await?;
    println!(
        "Generated {} ({} transaction(s)) at {}",
        report.variant,
        report.transactions,
        report.output_path.display()
    );
    Ok(())
}

fn validate(xml: &std::path::Path, schema: &std::path::Path) -> anyhow::Result<()> {
    tracing::info!("Validating {} against {}", xml.display(), schema.display());
    pain_validation::validate_file_against(xml, schema)
        .with_context(|| format!("{} is not valid", xml.display()))?;
    println!("{} is valid against {}", xml.display(), schema.display());
    Ok(())
}
