// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use super::column::Column;

/// A table card in the diagram.
///
/// Column order is display order. Relationships are table→table only,
/// derived from foreign-key constraints at ingest time; a target that does
/// not (yet) exist in the schema is tolerated and simply renders no edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    relationships: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn relationships(&self) -> &[String] {
        &self.relationships
    }

    /// Records a relationship target; duplicates from repeated FK
    /// constraints collapse to one entry.
    pub fn add_relationship(&mut self, target: impl Into<String>) {
        let target = target.into();
        if !self.relationships.iter().any(|t| *t == target) {
            self.relationships.push(target);
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::model::Column;

    #[test]
    fn relationships_deduplicate() {
        let mut table = Table::new("orders");
        table.add_relationship("users");
        table.add_relationship("users");
        table.add_relationship("products");
        assert_eq!(table.relationships(), ["users", "products"]);
    }

    #[test]
    fn column_lookup_by_name() {
        let mut table = Table::new("users");
        table.push_column(Column::new("id", "INT"));
        table.push_column(Column::new("email", "VARCHAR"));

        assert_eq!(table.column("email").map(|c| c.type_tag()), Some("VARCHAR"));
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn zero_column_table_is_valid() {
        let table = Table::new("placeholder");
        assert!(table.columns().is_empty());
        assert_eq!(table.name(), "placeholder");
    }
}
