//! Per-table shape validation.
//!
//! Runs before any emission. Cross-table checks (dangling references) happen
//! later, in [`check_references`](crate::catalog::check_references).

use crate::catalog::{SchemaModel, TableDef};
use crate::error::{IssueKind, ValidationIssue};

/// Validate one table.
///
/// Issues are reported in a fixed order: name, columns, primary key. An empty
/// result means the table is valid.
pub fn validate(table: &TableDef) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if table.name.trim().is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::MissingName,
            "table has no name",
        ));
    }

    if table.columns.is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::NoColumns,
            "table declares no columns",
        ));
    } else if table.primary_key_columns().is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::NoPrimaryKey,
            "table has no primary key or auto-increment column",
        ));
    }

    issues
}

/// Validate every table of a model, stopping at the first invalid one.
///
/// On failure the offending table's name and its issues are returned.
pub fn validate_model(model: &SchemaModel) -> Result<(), (String, Vec<ValidationIssue>)> {
    for table in &model.tables {
        let issues = validate(table);
        if !issues.is_empty() {
            tracing::debug!(table = %table.name, issues = issues.len(), "table failed validation");
            return Err((table.name.clone(), issues));
        }
    }
    Ok(())
}
