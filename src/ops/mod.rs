// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Mutation operations for the diagram session.
//!
//! Every state change the UI can make goes through one `Op`, applied on the
//! single interaction thread. None of these fail fatally: unknown names
//! degrade to no-ops and merge conflicts accumulate in the result, so the
//! diagram stays interactive whatever arrives.

use crate::layout::{Point, Size};
use crate::model::{DiagramSession, Table};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Adds parsed tables under the uniqueness invariant.
    Merge { tables: Vec<Table> },
    /// Commits a card position (drag end).
    SetPosition { table: String, position: Point },
    /// Commits a card size (resize end).
    SetSize { table: String, size: Size },
    ZoomIn,
    ZoomOut,
    /// Opens the detail inspector on a table.
    Select { table: String },
    /// Closes the detail inspector.
    ClearSelection,
    /// Model-level removal; no UI surface yet but edges must survive it.
    RemoveTable { table: String },
}

/// Outcome of applying one op batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    /// Duplicate table names rejected by merges in this batch, in order.
    pub conflicts: Vec<String>,
}

/// Applies a batch of ops in order and reports the resulting revision plus
/// any merge conflicts. Merges are applied in the order they arrive here,
/// which is network-response arrival order for parser results.
pub fn apply_ops(session: &mut DiagramSession, ops: &[Op]) -> ApplyResult {
    let mut conflicts = Vec::new();

    for op in ops {
        match op {
            Op::Merge { tables } => {
                let report = session.merge_tables(tables.clone());
                conflicts.extend(report.conflicts);
            }
            Op::SetPosition { table, position } => {
                session.set_position(table.clone(), *position);
            }
            Op::SetSize { table, size } => {
                session.set_size(table.clone(), *size);
            }
            Op::ZoomIn => session.zoom_in(),
            Op::ZoomOut => session.zoom_out(),
            Op::Select { table } => {
                let _ = session.select(table);
            }
            Op::ClearSelection => session.clear_selection(),
            Op::RemoveTable { table } => {
                let _ = session.remove_table(table);
            }
        }
    }

    ApplyResult {
        new_rev: session.rev(),
        applied: ops.len(),
        conflicts,
    }
}

#[cfg(test)]
mod tests;
