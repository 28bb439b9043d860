//! Per-run inputs shared by every builder

use crate::Result;
use crate::namespace::NamespaceBinding;
use chrono::{DateTime, Utc};
use pain_ir::{Error as RecordError, Record};
use pain_schema::{FieldSchema, MessageVariant};

/// Everything a builder needs besides the records themselves
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub variant: MessageVariant,
    pub binding: NamespaceBinding,

    /// Field schema the records were validated against
    pub schema: FieldSchema,

    /// Generation clock value, used where a variant stamps the run time
    pub created_at: DateTime<Utc>,
}

impl BuildContext {
    /// Bind the variant's namespace and capture the current time
    #[must_use]
    pub fn new(variant: MessageVariant, schema: FieldSchema) -> Self {
        Self {
            variant,
            binding: NamespaceBinding::for_variant(variant),
            schema,
            created_at: Utc::now(),
        }
    }

    /// Pin the generation clock (reproducible output)
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Trimmed value of `field` in `record`.
    ///
    /// # Errors
    ///
    /// Fails with a conversion error when `field` is not declared by the
    /// field schema, and with [`pain_ir::Error::MissingField`] when the
    /// record lacks it.
    pub fn field<'r>(&self, record: &'r Record, field: &str) -> Result<&'r str> {
        if !self.schema.contains(field) {
            return Err(RecordError::conversion(
                field,
                format!("not declared by field schema '{}'", self.schema.name),
            )
            .into());
        }
        Ok(record.require_trimmed(field)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pain_schema::{FieldDefinition, FieldType};

    fn context() -> BuildContext {
        let schema = FieldSchema::new("demo").with_fields(vec![
            FieldDefinition::new("id", FieldType::Integer),
            FieldDefinition::new("currency", FieldType::Text),
        ]);
        BuildContext::new(MessageVariant::V04, schema)
    }

    #[test]
    fn test_field_trims() {
        let record = Record::from_pairs(1, [("id", " 7 "), ("currency", "EUR")]);
        assert_eq!(context().field(&record, "id").unwrap(), "7");
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let record = Record::from_pairs(3, [("id", "7")]);
        let err = context().field(&record, "currency").unwrap_err();
        assert!(matches!(
            err,
            Error::Record(RecordError::MissingField { row: 3, .. })
        ));
    }

    #[test]
    fn test_undeclared_field_is_drift() {
        let record = Record::from_pairs(1, [("iban", "DE00")]);
        let err = context().field(&record, "iban").unwrap_err();
        assert!(err.to_string().contains("demo"));
    }

    #[test]
    fn test_binding_follows_variant() {
        let ctx = context();
        assert!(ctx.binding.default.ends_with("pain.001.001.04"));
    }
}
