//! YAML configuration file

use anyhow::Context;
use clap::ValueEnum;
use pain_adapter_csv::CsvConfig;
use pain_adapter_db::DbSourceConfig;
use pain_pipeline::{GeneratorConfig, OutputPolicy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Output policy as named on the command line and in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyName {
    ValidateThenWrite,
    WriteThenValidate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub policy: Option<PolicyName>,
    pub keep_invalid: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemasSection {
    /// Field-table override directory
    pub directory: Option<PathBuf>,
}

/// Contents of `--config <file.yaml>`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub csv: CsvConfig,
    pub database: DbSourceConfig,
    pub output: OutputSection,
    pub schemas: SchemasSection,
}

/// Flag values for `generate` that override the file
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub delimiter: Option<char>,
    pub policy: Option<PolicyName>,
    pub keep_invalid: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("invalid config file '{}'", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Merge the file with command-line overrides
    pub fn generator_config(&self, overrides: &GenerateOverrides) -> GeneratorConfig {
        let mut csv = self.csv.clone();
        if let Some(delimiter) = overrides.delimiter {
            csv = csv.delimiter(delimiter);
        }

        let keep_invalid = overrides.keep_invalid || self.output.keep_invalid;
        let policy = match overrides.policy.or(self.output.policy) {
            Some(PolicyName::WriteThenValidate) => OutputPolicy::WriteThenValidate { keep_invalid },
            Some(PolicyName::ValidateThenWrite) => OutputPolicy::ValidateThenWrite,
            None if keep_invalid => OutputPolicy::WriteThenValidate { keep_invalid },
            None => OutputPolicy::default(),
        };

        let mut config = GeneratorConfig::new()
            .with_csv(csv)
            .with_database(self.database.clone())
            .with_policy(policy);
        if let Some(directory) = &self.schemas.directory {
            config = config.with_schema_path(directory.clone());
        }
        config
    }
}
