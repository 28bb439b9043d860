//! Generation entry point

use crate::output::derive_output_path;
use crate::policies::OutputPolicy;
use crate::state::{GenerationState, Lifecycle, SchemaOutcome};
use crate::{DataError, Error, ResourceKind, Result};
use chrono::{DateTime, Utc};
use pain_adapter_csv::{CsvConfig, CsvError};
use pain_adapter_db::DbSourceConfig;
use pain_ir::Record;
use pain_message::{BuildContext, BuilderRegistry, build_document, serialize};
use pain_schema::{FieldSchemaLoader, MessageVariant};
use pain_validation::{FieldValidator, XsdSchema};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Generator configuration
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Dialect for `.csv` sources
    pub csv: CsvConfig,
    /// Table and timeout for `.db`/`.sqlite` sources
    pub database: DbSourceConfig,
    pub policy: OutputPolicy,
    /// Directories searched for field tables before the built-in ones
    pub schema_paths: Vec<PathBuf>,
    /// Fixed generation clock; the current time when unset
    pub created_at: Option<DateTime<Utc>>,
}

impl GeneratorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_csv(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: DbSourceConfig) -> Self {
        self.database = database;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OutputPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_schema_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// One generation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Variant identifier as received, e.g. `pain.001.001.03`
    pub variant: String,
    pub template: PathBuf,
    /// XSD the output must conform to
    pub schema: PathBuf,
    /// `.csv`, `.db` or `.sqlite` source
    pub data: PathBuf,
    /// Overrides the configured table for database sources
    pub table: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        variant: impl Into<String>,
        template: impl Into<PathBuf>,
        schema: impl Into<PathBuf>,
        data: impl Into<PathBuf>,
    ) -> Self {
        Self {
            variant: variant.into(),
            template: template.into(),
            schema: schema.into(),
            data: data.into(),
            table: None,
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub variant: MessageVariant,
    /// Number of `CdtTrfTxInf` elements written
    pub transactions: usize,
    /// Group header control sum, when the variant carries one
    pub control_sum: Option<String>,
    /// Final stage of the run
    pub state: GenerationState,
    pub lifecycle: Lifecycle,
}

/// Runs load → validate → build → serialize → write for one request
pub struct Generator {
    config: GeneratorConfig,
    builders: BuilderRegistry,
    fields: FieldSchemaLoader,
    validator: FieldValidator,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let fields = FieldSchemaLoader::with_paths(config.schema_paths.clone());
        Self {
            config,
            builders: BuilderRegistry::with_defaults(),
            fields,
            validator: FieldValidator::new(),
        }
    }

    /// Replace the builder set, e.g. to add a custom variant builder
    #[must_use]
    pub fn with_builders(mut self, builders: BuilderRegistry) -> Self {
        self.builders = builders;
        self
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the document described by `request`.
    ///
    /// Resource checks run before anything is loaded: on an unsupported
    /// variant or a missing input no output path is derived and nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for an unknown variant or data file type,
    /// [`Error::MissingResource`] for an absent input, [`Error::Data`] for
    /// empty or invalid records, [`Error::Build`] when the tree cannot be
    /// built, [`Error::SchemaViolation`] when the output fails the XSD and
    /// [`Error::Io`] when the output cannot be written.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        let variant: MessageVariant = request.variant.parse()?;
        require(ResourceKind::Template, &request.template)?;
        require(ResourceKind::Schema, &request.schema)?;
        require(ResourceKind::Data, &request.data)?;

        info!(
            "Generating {} from {}",
            variant,
            request.data.display()
        );
        let records = self.load(request).await?;
        self.run(
            variant,
            &request.template,
            &request.schema,
            &request.data,
            &records,
        )
    }

    /// Generate from records that are already in memory.
    ///
    /// # Errors
    ///
    /// As [`Generator::generate`], minus the data-source failures.
    pub fn generate_from_records(
        &self,
        variant: MessageVariant,
        template: impl AsRef<Path>,
        schema: impl AsRef<Path>,
        records: &[Record],
    ) -> Result<GenerationReport> {
        let (template, schema) = (template.as_ref(), schema.as_ref());
        require(ResourceKind::Template, template)?;
        require(ResourceKind::Schema, schema)?;
        self.run(variant, template, schema, Path::new("<records>"), records)
    }

    async fn load(&self, request: &GenerationRequest) -> Result<Vec<Record>> {
        let data = &request.data;
        let extension = data
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => pain_adapter_csv::load_records(data, &self.config.csv)
                .map_err(|e| csv_error(data, e)),
            Some("db" | "sqlite") => {
                let mut database = self.config.database.clone();
                if let Some(table) = &request.table {
                    database = database.with_table(table.clone());
                }
                pain_adapter_db::load_records(data, &database)
                    .await
                    .map_err(|e| db_error(data, e))
            }
            _ => Err(Error::configuration(format!(
                "unsupported data file type: '{}'",
                data.display()
            ))),
        }
    }

    fn run(
        &self,
        variant: MessageVariant,
        template: &Path,
        schema: &Path,
        origin: &Path,
        records: &[Record],
    ) -> Result<GenerationReport> {
        let mut lifecycle = Lifecycle::default();
        if records.is_empty() {
            return Err(DataError::Empty {
                origin: origin.to_path_buf(),
            }
            .into());
        }
        lifecycle.advance(GenerationState::Loaded);

        let field_schema = self.fields.load_variant(variant)?;
        let report = self.validator.check(records, &field_schema);
        if !report.is_valid() {
            warn!("Field validation failed: {}", report);
            return Err(DataError::Fields(report).into());
        }
        lifecycle.advance(GenerationState::FieldValidated);

        let mut ctx = BuildContext::new(variant, field_schema);
        if let Some(created_at) = self.config.created_at {
            ctx = ctx.with_created_at(created_at);
        }
        lifecycle.advance(GenerationState::NamespaceBound);

        let document = build_document(&self.builders, &ctx, records)?;
        lifecycle.advance(GenerationState::TreeBuilt);

        let xml = serialize(&document)?;
        lifecycle.advance(GenerationState::Serialized);

        let output_path = derive_output_path(template, variant);
        match self.config.policy {
            OutputPolicy::ValidateThenWrite => {
                if let Err(e) = check_schema(schema, &xml, &output_path) {
                    lifecycle.advance(GenerationState::SchemaValidated(SchemaOutcome::Fail));
                    warn!("{} not written: {}", output_path.display(), e);
                    return Err(e);
                }
                lifecycle.advance(GenerationState::SchemaValidated(SchemaOutcome::Pass));
                write_output(&output_path, &xml)?;
                lifecycle.advance(GenerationState::Written);
            }
            OutputPolicy::WriteThenValidate { keep_invalid } => {
                write_output(&output_path, &xml)?;
                lifecycle.advance(GenerationState::Written);

                let written = fs::read_to_string(&output_path).map_err(|e| {
                    Error::io("read output", output_path.display().to_string(), e.to_string())
                })?;
                if let Err(e) = check_schema(schema, &written, &output_path) {
                    lifecycle.advance(GenerationState::SchemaValidated(SchemaOutcome::Fail));
                    if keep_invalid {
                        warn!("Keeping invalid output {}", output_path.display());
                    } else if let Err(remove) = fs::remove_file(&output_path) {
                        warn!(
                            "Failed to remove invalid output {}: {}",
                            output_path.display(),
                            remove
                        );
                    }
                    return Err(e);
                }
                lifecycle.advance(GenerationState::SchemaValidated(SchemaOutcome::Pass));
            }
        }

        info!(
            "Wrote {} with {} transaction(s) to {}",
            variant,
            document.metadata.transaction_count,
            output_path.display()
        );
        Ok(GenerationReport {
            output_path,
            variant,
            transactions: document.metadata.transaction_count,
            control_sum: document.metadata.control_sum,
            state: lifecycle.current(),
            lifecycle,
        })
    }
}

fn require(kind: ResourceKind, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::missing(kind, path))
    }
}

fn check_schema(schema: &Path, xml: &str, output: &Path) -> Result<()> {
    let xsd =
        XsdSchema::from_file(schema).map_err(|e| Error::unreadable(output, e.to_string()))?;
    let violations = xsd
        .check(xml)
        .map_err(|e| Error::unreadable(output, e.to_string()))?;
    if violations.is_empty() {
        debug!("{} conforms to {}", output.display(), schema.display());
        Ok(())
    } else {
        Err(Error::SchemaViolation {
            path: output.to_path_buf(),
            violations,
        })
    }
}

fn write_output(path: &Path, xml: &str) -> Result<()> {
    fs::write(path, xml)
        .map_err(|e| Error::io("write output", path.display().to_string(), e.to_string()))
}

fn csv_error(data: &Path, error: CsvError) -> Error {
    match error {
        CsvError::NotFound { path } => Error::missing(ResourceKind::Data, path),
        CsvError::Config(message) => Error::configuration(message),
        other => DataError::load(data, other.to_string()).into(),
    }
}

fn db_error(data: &Path, error: pain_adapter_db::Error) -> Error {
    match error {
        pain_adapter_db::Error::Config { details } => Error::configuration(details),
        pain_adapter_db::Error::NotFound { path } => Error::missing(ResourceKind::Data, path),
        other => DataError::load(data, other.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("pain.001.001.03", "t.xml", "s.xsd", "d.db")
            .with_table("payments");
        assert_eq!(request.table.as_deref(), Some("payments"));
        assert_eq!(request.data, PathBuf::from("d.db"));
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new()
            .with_policy(OutputPolicy::WriteThenValidate { keep_invalid: true })
            .with_schema_path("/etc/pain001/fields");
        assert!(config.policy.keeps_invalid());
        assert_eq!(config.schema_paths, [PathBuf::from("/etc/pain001/fields")]);
    }

    #[tokio::test]
    async fn test_unsupported_variant_is_checked_first() {
        let request = GenerationRequest::new("unsupported.999", "/nope/t", "/nope/s", "/nope/d");
        let err = Generator::default().generate(&request).await.unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_unsupported_data_extension() {
        let dir = TempDir::new().unwrap();
        let (template, schema, data) = (
            dir.path().join("template.xml"),
            dir.path().join("schema.xsd"),
            dir.path().join("payments.json"),
        );
        for path in [&template, &schema, &data] {
            fs::write(path, "").unwrap();
        }

        let request = GenerationRequest::new("pain.001.001.03", &template, &schema, &data);
        let err = Generator::default().generate(&request).await.unwrap_err();
        assert!(err.to_string().contains("unsupported data file type"));
        assert!(!dir.path().join("pain.001.001.03.xml").exists());
    }

    #[test]
    fn test_empty_records() {
        let dir = TempDir::new().unwrap();
        let (template, schema) = (dir.path().join("t.xml"), dir.path().join("s.xsd"));
        fs::write(&template, "").unwrap();
        fs::write(&schema, "").unwrap();

        let err = Generator::default()
            .generate_from_records(MessageVariant::V04, &template, &schema, &[])
            .unwrap_err();
        assert!(matches!(err, Error::Data(DataError::Empty { .. })));
    }

    #[test]
    fn test_csv_errors_are_classified() {
        let data = Path::new("/tmp/payments.csv");
        assert!(matches!(
            csv_error(data, CsvError::not_found(data)),
            Error::MissingResource {
                kind: ResourceKind::Data,
                ..
            }
        ));
        assert!(matches!(
            csv_error(data, CsvError::header("duplicate column 'id'")),
            Error::Data(DataError::Load { .. })
        ));
    }
}
