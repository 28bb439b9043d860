//! Record validation against a variant's field schema

use crate::report::{FieldIssue, FieldReport, IssueKind};
use crate::rules::{validate_field_type, validate_required};
use crate::{Error, Result};
use pain_ir::Record;
use pain_schema::FieldSchema;
use tracing::{debug, warn};

/// Checks every record against every field of a schema
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collect every issue in the batch without failing
    #[must_use]
    pub fn check(&self, records: &[Record], schema: &FieldSchema) -> FieldReport {
        let mut report = FieldReport::new(schema.name.clone());
        report.rows_checked = records.len();

        for record in records {
            for field in schema.iter() {
                let value = record.get(&field.name);
                if !validate_required(&field.name, value).is_valid {
                    report.add(FieldIssue {
                        row: record.row,
                        column: field.name.clone(),
                        kind: IssueKind::Missing,
                    });
                    continue;
                }

                let value = value.unwrap_or_default();
                if !validate_field_type(value, field.field_type).is_valid {
                    report.add(FieldIssue {
                        row: record.row,
                        column: field.name.clone(),
                        kind: IssueKind::InvalidType {
                            expected: field.field_type,
                            value: value.to_string(),
                        },
                    });
                }
            }
        }

        report
    }

    /// Accept the batch only if every record passes every field check
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fields`] carrying the complete report when any
    /// record fails.
    pub fn validate(&self, records: &[Record], schema: &FieldSchema) -> Result<()> {
        let report = self.check(records, schema);
        if report.is_valid() {
            debug!(
                "{} record(s) passed field schema {}",
                records.len(),
                schema.name
            );
            Ok(())
        } else {
            warn!("Field validation failed: {}", report);
            Err(Error::Fields(report))
        }
    }
}
