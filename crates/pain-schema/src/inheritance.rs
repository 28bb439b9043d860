//! Field schema inheritance and merge logic

use crate::model::FieldSchema;
use std::collections::HashSet;

/// Merge a parent table into a child table.
///
/// Parent fields come first in parent order. A child field with the same
/// name overrides the parent's type in place; new child fields follow.
#[must_use]
pub fn merge_field_schemas(parent: &FieldSchema, child: &FieldSchema) -> FieldSchema {
    let mut fields = parent.fields.clone();

    for child_field in &child.fields {
        match fields.iter_mut().find(|f| f.name == child_field.name) {
            Some(existing) => existing.field_type = child_field.field_type,
            None => fields.push(child_field.clone()),
        }
    }

    let mut merged = FieldSchema::new(child.name.clone()).with_fields(fields);
    merged.inheritance = child.inheritance.clone();
    merged
}

/// Whether following `parent` from `child` revisits a table already seen
#[must_use]
pub fn detect_circular_dependency(child: &str, parent: &str, visited: &HashSet<String>) -> bool {
    child == parent || visited.contains(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDefinition, FieldType};

    #[test]
    fn test_merge_keeps_parent_order_and_appends() {
        let parent = FieldSchema::new("base").with_fields(vec![
            FieldDefinition::new("id", FieldType::Integer),
            FieldDefinition::new("date", FieldType::Date),
        ]);
        let child = FieldSchema::new("v05")
            .with_parent("base")
            .with_fields(vec![FieldDefinition::new("forwarding_agent_BIC", FieldType::Text)]);

        let merged = merge_field_schemas(&parent, &child);
        let names: Vec<&str> = merged.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(merged.name, "v05");
        assert_eq!(names, vec!["id", "date", "forwarding_agent_BIC"]);
        assert_eq!(merged.inheritance.parent.as_deref(), Some("base"));
    }

    #[test]
    fn test_merge_child_overrides_type() {
        let parent = FieldSchema::new("base")
            .with_fields(vec![FieldDefinition::new("date", FieldType::Date)]);
        let child = FieldSchema::new("custom")
            .with_fields(vec![FieldDefinition::new("date", FieldType::Text)]);

        let merged = merge_field_schemas(&parent, &child);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("date").unwrap().field_type, FieldType::Text);
    }

    #[test]
    fn test_detect_circular_dependency() {
        let mut visited = HashSet::new();
        visited.insert("a".to_string());

        assert!(detect_circular_dependency("b", "a", &visited));
        assert!(detect_circular_dependency("c", "c", &visited));
        assert!(!detect_circular_dependency("b", "base", &visited));
    }
}
