// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Conversion from the parser service's statement AST to model tables.
//!
//! The payload is a JSON array of CREATE TABLE statements whose
//! `create_definitions` mix column definitions with FOREIGN KEY
//! constraints. Conversion is best-effort per record: a record with no
//! derivable table name is skipped and reported, a table with zero valid
//! columns is kept as valid-but-empty, and nothing in here panics on a
//! malformed field.

use serde::Deserialize;
use serde_json::Value;

use super::IngestError;
use crate::model::{Column, Table};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawStatement {
    table: Vec<RawTableRef>,
    create_definitions: Vec<RawDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawTableRef {
    table: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawDefinition {
    resource: Option<String>,
    constraint_type: Option<String>,
    column: Option<Value>,
    definition: Option<Value>,
    nullable: Option<Value>,
    primary_key: Option<Value>,
    auto_increment: Option<Value>,
    unique: Option<Value>,
    default_val: Option<Value>,
    reference_definition: Option<RawReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawReference {
    table: Vec<RawTableRef>,
    definition: Option<Value>,
}

/// What a payload conversion produced besides the tables themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub skipped_records: usize,
    pub skipped_columns: usize,
    pub notes: Vec<String>,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_records == 0 && self.skipped_columns == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedTables {
    pub tables: Vec<Table>,
    pub report: ConversionReport,
}

/// Converts a parser payload into model tables.
///
/// Fails only when the payload is not a JSON array at all; everything below
/// that degrades per record or per column and is reported instead.
pub fn tables_from_payload(payload: &Value) -> Result<ParsedTables, IngestError> {
    let records = payload.as_array().ok_or_else(|| IngestError::MalformedPayload {
        detail: format!("expected a JSON array, got {}", json_kind(payload)),
    })?;

    let mut parsed = ParsedTables::default();

    for record in records {
        let statement: RawStatement = match serde_json::from_value(record.clone()) {
            Ok(statement) => statement,
            Err(err) => {
                parsed.report.skipped_records += 1;
                parsed.report.notes.push(format!("unreadable statement: {err}"));
                continue;
            }
        };

        let Some(name) = statement
            .table
            .iter()
            .find_map(|r| r.table.as_deref())
            .filter(|name| !name.trim().is_empty())
        else {
            parsed.report.skipped_records += 1;
            parsed
                .report
                .notes
                .push("statement without a table name".to_owned());
            continue;
        };

        parsed
            .tables
            .push(table_from_statement(name, &statement, &mut parsed.report));
    }

    Ok(parsed)
}

fn table_from_statement(
    name: &str,
    statement: &RawStatement,
    report: &mut ConversionReport,
) -> Table {
    let mut table = Table::new(name);

    for def in &statement.create_definitions {
        if def.resource.as_deref() != Some("column") {
            continue;
        }

        let column_name = def.column.as_ref().and_then(column_name);
        let data_type = def
            .definition
            .as_ref()
            .and_then(|d| d.get("dataType"))
            .and_then(Value::as_str);

        let (Some(column_name), Some(data_type)) = (column_name, data_type) else {
            report.skipped_columns += 1;
            report
                .notes
                .push(format!("invalid column definition in table {name}"));
            continue;
        };

        let mut column = Column::new(column_name, data_type);
        column.set_length(
            def.definition
                .as_ref()
                .and_then(|d| d.get("length"))
                .and_then(scalar_text),
        );
        column.set_nullable(
            def.nullable
                .as_ref()
                .and_then(|n| n.get("value"))
                .and_then(Value::as_str)
                != Some("not null"),
        );
        column.set_primary_key(truthy(&def.primary_key));
        column.set_auto_increment(truthy(&def.auto_increment));
        column.set_unique(truthy(&def.unique));
        column.set_default_value(default_value_text(&def.default_val));
        table.push_column(column);
    }

    // One auto-increment column at most; later ones lose the flag.
    let mut seen_auto_increment = false;
    for column in table.columns_mut() {
        if column.is_auto_increment() {
            if seen_auto_increment {
                column.set_auto_increment(false);
            }
            seen_auto_increment = true;
        }
    }

    for def in &statement.create_definitions {
        let is_foreign_key = def
            .constraint_type
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("FOREIGN KEY"));
        if !is_foreign_key {
            continue;
        }
        let Some(reference) = &def.reference_definition else {
            continue;
        };

        let local_columns = column_names(&def.definition);
        let referenced_columns = column_names(&reference.definition);

        for target in reference.table.iter().filter_map(|r| r.table.as_deref()) {
            table.add_relationship(target);
            for (i, local) in local_columns.iter().enumerate() {
                if let Some(column) = table.column_mut(local) {
                    column.set_reference(
                        target.to_owned(),
                        referenced_columns.get(i).cloned(),
                    );
                }
            }
        }
    }

    table
}

/// Extracts a column name from either `"name"` or `{ "column": ... }`
/// (the parser nests one level for plain columns, deeper for refs).
fn column_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map.get("column").and_then(column_name),
        _ => None,
    }
}

fn column_names(value: &Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(column_name).collect(),
        Some(other) => column_name(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn truthy(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Default values arrive as `default_val.value.name[0].value`; plain
/// scalars are accepted as a fallback.
fn default_value_text(value: &Option<Value>) -> Option<String> {
    let value = value.as_ref()?;
    if let Some(text) = value
        .get("value")
        .and_then(|v| v.get("name"))
        .and_then(|n| n.get(0))
        .and_then(|first| first.get("value"))
        .and_then(scalar_text)
    {
        return Some(text);
    }
    scalar_text(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::tables_from_payload;
    use crate::ingest::IngestError;
    use serde_json::json;

    fn users_statement() -> serde_json::Value {
        json!({
            "table": [{ "table": "users" }],
            "create_definitions": [
                {
                    "resource": "column",
                    "column": { "column": "id" },
                    "definition": { "dataType": "INT" },
                    "primary_key": "primary key",
                    "auto_increment": "auto_increment"
                },
                {
                    "resource": "column",
                    "column": { "column": "email" },
                    "definition": { "dataType": "VARCHAR", "length": 255 },
                    "nullable": { "value": "not null" },
                    "unique": "unique"
                }
            ]
        })
    }

    fn orders_statement() -> serde_json::Value {
        json!({
            "table": [{ "table": "orders" }],
            "create_definitions": [
                {
                    "resource": "column",
                    "column": { "column": "id" },
                    "definition": { "dataType": "INT" },
                    "primary_key": "primary key"
                },
                {
                    "resource": "column",
                    "column": { "column": "user_id" },
                    "definition": { "dataType": "INT" },
                    "nullable": { "value": "not null" }
                },
                {
                    "constraint_type": "FOREIGN KEY",
                    "definition": [{ "column": "user_id" }],
                    "reference_definition": {
                        "table": [{ "table": "users" }],
                        "definition": [{ "column": "id" }]
                    }
                }
            ]
        })
    }

    #[test]
    fn converts_columns_with_flags() {
        let parsed = tables_from_payload(&json!([users_statement()])).expect("parsed");
        assert!(parsed.report.is_clean());
        assert_eq!(parsed.tables.len(), 1);

        let users = &parsed.tables[0];
        assert_eq!(users.name(), "users");

        let id = users.column("id").expect("id");
        assert!(id.is_primary_key());
        assert!(id.is_auto_increment());

        let email = users.column("email").expect("email");
        assert!(!email.nullable());
        assert!(email.is_unique());
        assert_eq!(email.length(), Some("255"));
        assert_eq!(email.type_tag(), "VARCHAR");
    }

    #[test]
    fn foreign_key_constraint_feeds_relationships_and_columns() {
        let parsed = tables_from_payload(&json!([orders_statement()])).expect("parsed");
        let orders = &parsed.tables[0];

        assert_eq!(orders.relationships(), ["users"]);
        let user_id = orders.column("user_id").expect("user_id");
        assert!(user_id.is_foreign_key());
        assert_eq!(user_id.referenced_table(), Some("users"));
        assert_eq!(user_id.referenced_column(), Some("id"));
    }

    #[test]
    fn record_without_table_name_is_skipped_not_fatal() {
        let payload = json!([
            { "create_definitions": [] },
            users_statement()
        ]);

        let parsed = tables_from_payload(&payload).expect("parsed");
        assert_eq!(parsed.tables.len(), 1);
        assert_eq!(parsed.report.skipped_records, 1);
    }

    #[test]
    fn zero_valid_columns_yields_an_empty_table() {
        let payload = json!([{
            "table": [{ "table": "ghost" }],
            "create_definitions": [
                { "resource": "column", "column": {}, "definition": {} }
            ]
        }]);

        let parsed = tables_from_payload(&payload).expect("parsed");
        assert_eq!(parsed.tables.len(), 1);
        assert!(parsed.tables[0].columns().is_empty());
        assert_eq!(parsed.report.skipped_columns, 1);
    }

    #[test]
    fn non_array_payload_is_malformed() {
        let result = tables_from_payload(&json!({ "tables": [] }));
        assert!(matches!(result, Err(IngestError::MalformedPayload { .. })));
    }

    #[test]
    fn auto_increment_is_unique_per_table() {
        let payload = json!([{
            "table": [{ "table": "t" }],
            "create_definitions": [
                {
                    "resource": "column",
                    "column": { "column": "a" },
                    "definition": { "dataType": "INT" },
                    "primary_key": true,
                    "auto_increment": true
                },
                {
                    "resource": "column",
                    "column": { "column": "b" },
                    "definition": { "dataType": "INT" },
                    "primary_key": true,
                    "auto_increment": true
                }
            ]
        }]);

        let parsed = tables_from_payload(&payload).expect("parsed");
        let auto_count = parsed.tables[0]
            .columns()
            .iter()
            .filter(|c| c.is_auto_increment())
            .count();
        assert_eq!(auto_count, 1);
    }

    #[test]
    fn auto_increment_without_primary_key_is_dropped() {
        let payload = json!([{
            "table": [{ "table": "t" }],
            "create_definitions": [{
                "resource": "column",
                "column": { "column": "n" },
                "definition": { "dataType": "INT" },
                "auto_increment": true
            }]
        }]);

        let parsed = tables_from_payload(&payload).expect("parsed");
        assert!(!parsed.tables[0].column("n").expect("n").is_auto_increment());
    }

    #[test]
    fn default_value_follows_the_nested_path() {
        let payload = json!([{
            "table": [{ "table": "t" }],
            "create_definitions": [{
                "resource": "column",
                "column": { "column": "status" },
                "definition": { "dataType": "VARCHAR" },
                "default_val": { "value": { "name": [{ "value": "active" }] } }
            }]
        }]);

        let parsed = tables_from_payload(&payload).expect("parsed");
        assert_eq!(
            parsed.tables[0].column("status").expect("status").default_value(),
            Some("active")
        );
    }
}
