// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use std::fmt;

use super::table::Table;

/// The full set of tables known to the diagram.
///
/// Insertion order is kept (it drives default card placement); lookup is by
/// name. The central invariant is name uniqueness, enforced by `merge`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name() == name)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Insertion index of a table, used for default placement.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name() == name)
    }

    /// Adds a batch of freshly parsed tables.
    ///
    /// A table whose name already exists (in the schema or earlier in the
    /// same batch) is rejected and recorded as a conflict; the rest of the
    /// batch still lands. The existing table always wins.
    pub fn merge(&mut self, incoming: Vec<Table>) -> MergeReport {
        let mut report = MergeReport::default();

        for table in incoming {
            if self.contains(table.name()) {
                report.conflicts.push(table.name().to_owned());
                continue;
            }
            report.added.push(table.name().to_owned());
            self.tables.push(table);
        }

        report
    }

    /// Removes a table by name. Edges pointing at it resolve to nothing on
    /// the next pass; layout state for the name is left behind by design.
    pub fn remove(&mut self, name: &str) -> Option<Table> {
        let index = self.index_of(name)?;
        Some(self.tables.remove(index))
    }
}

/// Outcome of one merge batch: what landed and which names were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeReport {
    pub added: Vec<String>,
    pub conflicts: Vec<String>,
}

impl MergeReport {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn merge_from(&mut self, other: MergeReport) {
        self.added.extend(other.added);
        self.conflicts.extend(other.conflicts);
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            write!(f, "added {} table(s)", self.added.len())
        } else {
            write!(
                f,
                "added {} table(s); name conflict(s): {}",
                self.added.len(),
                self.conflicts.join(", ")
            )
        }
    }
}
