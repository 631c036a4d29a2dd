// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Per-table layout state, independent of schema content.
//!
//! Positions and sizes live in model (unscaled) space and are keyed by table
//! name, so they survive re-renders as long as names are stable. A renamed
//! table orphans its layout state and starts from a fresh default; that is
//! documented behavior, not a bug.

pub mod edges;
pub mod viewport;

use std::collections::BTreeMap;

pub use edges::{resolve_edges, EdgeGeometry};
pub use viewport::Viewport;

/// Default card footprint in model units.
pub const DEFAULT_CARD_SIZE: Size = Size {
    width: 250.0,
    height: 200.0,
};

/// Gap between cards in the default grid cascade.
pub const GRID_GUTTER: f64 = 40.0;

/// Cards per row in the default grid cascade.
pub const GRID_COLUMNS: usize = 4;

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A card footprint in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        DEFAULT_CARD_SIZE
    }
}

/// Derived card rectangle; never stored, always computed from position+size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_parts(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Deterministic placement for a table first seen at `index`: a grid
/// cascade, so freshly merged tables never stack on top of each other.
pub fn default_position(index: usize) -> Point {
    let column = index % GRID_COLUMNS;
    let row = index / GRID_COLUMNS;
    Point::new(
        column as f64 * (DEFAULT_CARD_SIZE.width + GRID_GUTTER),
        row as f64 * (DEFAULT_CARD_SIZE.height + GRID_GUTTER),
    )
}

/// Position and size state per table name.
///
/// Accessors are total: unknown names get the documented defaults and the
/// store is not mutated by reads, so repeated queries are stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutStore {
    positions: BTreeMap<String, Point>,
    sizes: BTreeMap<String, Size>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position_of(&self, name: &str) -> Point {
        self.positions.get(name).copied().unwrap_or(Point::ORIGIN)
    }

    pub fn set_position(&mut self, name: impl Into<String>, position: Point) {
        self.positions.insert(name.into(), position);
    }

    pub fn size_of(&self, name: &str) -> Size {
        self.sizes.get(name).copied().unwrap_or(DEFAULT_CARD_SIZE)
    }

    pub fn set_size(&mut self, name: impl Into<String>, size: Size) {
        self.sizes.insert(name.into(), size);
    }

    pub fn rect_of(&self, name: &str) -> Rect {
        Rect::from_parts(self.position_of(name), self.size_of(name))
    }

    /// Assigns the grid-cascade default for a newly merged table, unless the
    /// name already has a position (re-imports keep user placement).
    pub fn assign_default(&mut self, name: impl Into<String>, index: usize) {
        self.positions
            .entry(name.into())
            .or_insert_with(|| default_position(index));
    }
}

#[cfg(test)]
mod tests {
    use super::{default_position, LayoutStore, Point, Size, DEFAULT_CARD_SIZE};

    #[test]
    fn position_defaults_to_origin_and_is_stable() {
        let store = LayoutStore::new();
        assert_eq!(store.position_of("users"), Point::ORIGIN);
        assert_eq!(store.position_of("users"), Point::ORIGIN);
    }

    #[test]
    fn set_position_is_last_write_wins() {
        let mut store = LayoutStore::new();
        store.set_position("users", Point::new(10.0, 20.0));
        store.set_position("users", Point::new(30.0, 40.0));
        assert_eq!(store.position_of("users"), Point::new(30.0, 40.0));
    }

    #[test]
    fn size_defaults_to_card_footprint() {
        let mut store = LayoutStore::new();
        assert_eq!(store.size_of("users"), DEFAULT_CARD_SIZE);

        store.set_size("users", Size::new(300.0, 260.0));
        assert_eq!(store.size_of("users"), Size::new(300.0, 260.0));
    }

    #[test]
    fn rect_reflects_last_known_size() {
        let mut store = LayoutStore::new();
        store.set_position("users", Point::new(100.0, 50.0));
        store.set_size("users", Size::new(300.0, 100.0));

        let rect = store.rect_of("users");
        assert_eq!(rect.center(), Point::new(250.0, 100.0));
    }

    #[test]
    fn default_grid_cascade_never_stacks() {
        let a = default_position(0);
        let b = default_position(1);
        let e = default_position(4);

        assert_ne!(a, b);
        assert_eq!(a.x, e.x); // same column, next row
        assert!(e.y > a.y);
    }

    #[test]
    fn assign_default_keeps_existing_placement() {
        let mut store = LayoutStore::new();
        store.set_position("users", Point::new(7.0, 7.0));
        store.assign_default("users", 3);
        assert_eq!(store.position_of("users"), Point::new(7.0, 7.0));

        store.assign_default("orders", 1);
        assert_eq!(store.position_of("orders"), default_position(1));
    }
}
