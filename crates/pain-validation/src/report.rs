//! Aggregated field validation report

use pain_schema::FieldType;
use std::collections::BTreeSet;
use std::fmt;

/// Why a field failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Column absent or blank
    Missing,
    /// Value present but not coercible
    InvalidType { expected: FieldType, value: String },
}

/// One failing (row, column) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// 1-based data row
    pub row: usize,
    pub column: String,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "row {}: missing '{}'", self.row, self.column),
            IssueKind::InvalidType { expected, value } => write!(
                f,
                "row {}: '{}' expected {}, got '{}'",
                self.row, self.column, expected, value
            ),
        }
    }
}

/// Every issue found across a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    pub schema: String,
    pub rows_checked: usize,
    pub issues: Vec<FieldIssue>,
}

impl FieldReport {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn add(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    /// Distinct column names that have at least one issue
    #[must_use]
    pub fn columns(&self) -> BTreeSet<&str> {
        self.issues.iter().map(|i| i.column.as_str()).collect()
    }

    /// Issues reported for one row
    pub fn issues_for_row(&self, row: usize) -> impl Iterator<Item = &FieldIssue> {
        self.issues.iter().filter(move |i| i.row == row)
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::Missing)
            .count()
    }
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} field issue(s) in {} row(s) against {}",
            self.issues.len(),
            self.rows_checked,
            self.schema
        )?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_issue() {
        let mut report = FieldReport::new("pain.001.001.03");
        report.rows_checked = 2;
        report.add(FieldIssue {
            row: 1,
            column: "id".to_string(),
            kind: IssueKind::Missing,
        });
        report.add(FieldIssue {
            row: 2,
            column: "payment_amount".to_string(),
            kind: IssueKind::InvalidType {
                expected: FieldType::Decimal,
                value: "ten".to_string(),
            },
        });

        let text = report.to_string();
        assert!(text.starts_with("2 field issue(s) in 2 row(s)"));
        assert!(text.contains("row 1: missing 'id'"));
        assert!(text.contains("row 2: 'payment_amount' expected decimal, got 'ten'"));
        assert!(!report.is_valid());
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.issues_for_row(2).count(), 1);
    }
}
