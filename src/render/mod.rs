// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Projection from model space to terminal cells, and the diagram
//! rasterizer built on it.
//!
//! The zoom factor is applied here, uniformly to card rects and edge
//! endpoints, so nodes and connectors stay visually aligned at any zoom.
//! Model-space state is never touched by rendering.

pub mod diagram;

pub use diagram::{render_diagram, RenderOptions, RenderedDiagram};

use crate::layout::{Point, Rect, Viewport};

/// Model units per terminal column. Terminal cells are roughly twice as
/// tall as wide, hence the 1:2 ratio with `UNITS_PER_ROW`.
pub const UNITS_PER_COLUMN: f64 = 8.0;

/// Model units per terminal row.
pub const UNITS_PER_ROW: f64 = 16.0;

/// A card always renders at least a border plus a title row.
const MIN_CARD_COLUMNS: i64 = 12;
const MIN_CARD_ROWS: i64 = 4;

/// Maps model-space coordinates to cell coordinates at a fixed zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    factor: f64,
}

impl Projection {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            factor: viewport.factor(),
        }
    }

    pub fn column(&self, x: f64) -> i64 {
        (x * self.factor / UNITS_PER_COLUMN).round() as i64
    }

    pub fn row(&self, y: f64) -> i64 {
        (y * self.factor / UNITS_PER_ROW).round() as i64
    }

    pub fn cell(&self, point: Point) -> (i64, i64) {
        (self.column(point.x), self.row(point.y))
    }

    pub fn card(&self, rect: &Rect) -> CellRect {
        CellRect {
            x: self.column(rect.x),
            y: self.row(rect.y),
            width: self.column(rect.width).max(MIN_CARD_COLUMNS),
            height: self.row(rect.height).max(MIN_CARD_ROWS),
        }
    }
}

/// A card footprint in cell space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CellRect {
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}
