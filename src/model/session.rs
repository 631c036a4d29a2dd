// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use super::schema::{MergeReport, Schema};
use super::table::Table;
use crate::layout::{LayoutStore, Point, Size, Viewport};

/// The top-level container the TUI runs against.
///
/// Owns the schema, the layout store, the viewport and the selection, with
/// one mutation entry point per concern. Every mutation bumps `rev`, which
/// serves as the cache key for anything derived from session state (the
/// edge resolver itself stays uncached and pure).
///
/// All mutation happens on the single interaction thread; reads happen on
/// every render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramSession {
    schema: Schema,
    layout: LayoutStore,
    viewport: Viewport,
    selected: Option<String>,
    rev: u64,
}

impl DiagramSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn layout(&self) -> &LayoutStore {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Currently selected table name, if it still exists.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    /// Merges freshly parsed tables and hands each newcomer its default
    /// grid-cascade position keyed by insertion index.
    pub fn merge_tables(&mut self, incoming: Vec<Table>) -> MergeReport {
        let report = self.schema.merge(incoming);
        for name in &report.added {
            if let Some(index) = self.schema.index_of(name) {
                self.layout.assign_default(name.clone(), index);
            }
        }
        self.bump_rev();
        report
    }

    pub fn set_position(&mut self, name: impl Into<String>, position: Point) {
        self.layout.set_position(name, position);
        self.bump_rev();
    }

    pub fn set_size(&mut self, name: impl Into<String>, size: Size) {
        self.layout.set_size(name, size);
        self.bump_rev();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.bump_rev();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.bump_rev();
    }

    /// Selects a table for the detail inspector. Unknown names are ignored
    /// (the reference is weak; selection never invents tables).
    pub fn select(&mut self, name: &str) -> bool {
        if !self.schema.contains(name) {
            return false;
        }
        self.selected = Some(name.to_owned());
        self.bump_rev();
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.bump_rev();
        }
    }

    /// Removes a table; a selection pointing at it is cleared, and layout
    /// state for the name is intentionally left behind.
    pub fn remove_table(&mut self, name: &str) -> Option<Table> {
        let removed = self.schema.remove(name)?;
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        self.bump_rev();
        Some(removed)
    }
}
