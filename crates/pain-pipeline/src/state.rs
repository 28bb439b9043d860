//! Generation lifecycle

use std::fmt;
use tracing::debug;

/// Result of the final schema check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    Pass,
    Fail,
}

/// Stage reached by one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Loaded,
    FieldValidated,
    NamespaceBound,
    TreeBuilt,
    Serialized,
    Written,
    SchemaValidated(SchemaOutcome),
}

/// Stages one run passed through, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lifecycle {
    stages: Vec<GenerationState>,
}

impl Lifecycle {
    /// Move to `next`, tracing the transition
    pub(crate) fn advance(&mut self, next: GenerationState) {
        debug!("Generation state {} -> {}", self.current(), next);
        self.stages.push(next);
    }

    /// Latest stage, `Idle` before the first transition
    #[must_use]
    pub fn current(&self) -> GenerationState {
        self.stages.last().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn stages(&self) -> &[GenerationState] {
        &self.stages
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loaded => f.write_str("loaded"),
            Self::FieldValidated => f.write_str("field-validated"),
            Self::NamespaceBound => f.write_str("namespace-bound"),
            Self::TreeBuilt => f.write_str("tree-built"),
            Self::Serialized => f.write_str("serialized"),
            Self::Written => f.write_str("written"),
            Self::SchemaValidated(SchemaOutcome::Pass) => f.write_str("schema-validated(pass)"),
            Self::SchemaValidated(SchemaOutcome::Fail) => f.write_str("schema-validated(fail)"),
        }
    }
}
