// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Rasterizes a diagram session into a text grid.
//!
//! Edges go down first, cards after, so connectors disappear under the
//! cards they join instead of cutting through them. Everything is derived
//! from a read-only session snapshot and recomputed per pass.

use std::borrow::Cow;

use super::{CellRect, Projection};
use crate::layout::{resolve_edges, LayoutStore, Point};
use crate::model::{Column, DiagramSession, Table};

const EDGE_CHAR: char = '.';
const CORNER_CHAR: char = '+';
const FOCUS_CORNER_CHAR: char = '#';

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Card to mark with focus corners.
    pub focused: Option<String>,
    /// Live drag offset: this card renders at the given position instead of
    /// its committed one, edges included.
    pub drag_preview: Option<(String, Point)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    lines: Vec<String>,
    width: usize,
    height: usize,
}

impl RenderedDiagram {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

pub fn render_diagram(session: &DiagramSession, options: &RenderOptions) -> RenderedDiagram {
    let layout: Cow<'_, LayoutStore> = match &options.drag_preview {
        Some((name, position)) => {
            let mut preview = session.layout().clone();
            preview.set_position(name.clone(), *position);
            Cow::Owned(preview)
        }
        None => Cow::Borrowed(session.layout()),
    };

    let projection = Projection::new(session.viewport());
    let cards: Vec<(&Table, CellRect)> = session
        .schema()
        .tables()
        .iter()
        .map(|table| (table, projection.card(&layout.rect_of(table.name()))))
        .collect();

    let width = cards
        .iter()
        .map(|(_, card)| card.right().max(0) as usize)
        .max()
        .unwrap_or(0)
        + 1;
    let height = cards
        .iter()
        .map(|(_, card)| card.bottom().max(0) as usize)
        .max()
        .unwrap_or(0)
        + 1;

    let mut grid = Grid::new(width, height);

    for edge in resolve_edges(session.schema(), &layout) {
        let (x0, y0) = projection.cell(edge.start);
        let (x1, y1) = projection.cell(edge.end);
        grid.line(x0, y0, x1, y1, EDGE_CHAR);
    }

    for (table, card) in &cards {
        let focused = options.focused.as_deref() == Some(table.name());
        draw_card(&mut grid, table, *card, focused);
    }

    RenderedDiagram {
        lines: grid.into_lines(),
        width,
        height,
    }
}

fn draw_card(grid: &mut Grid, table: &Table, card: CellRect, focused: bool) {
    // Interior first: cards sit on top of any edges behind them.
    for row in card.y..card.bottom() {
        for column in card.x..card.right() {
            grid.put(column, row, ' ');
        }
    }

    for column in card.x..card.right() {
        grid.put(column, card.y, '-');
        grid.put(column, card.bottom() - 1, '-');
    }
    for row in card.y..card.bottom() {
        grid.put(card.x, row, '|');
        grid.put(card.right() - 1, row, '|');
    }
    let corner = if focused { FOCUS_CORNER_CHAR } else { CORNER_CHAR };
    grid.put(card.x, card.y, corner);
    grid.put(card.right() - 1, card.y, corner);
    grid.put(card.x, card.bottom() - 1, corner);
    grid.put(card.right() - 1, card.bottom() - 1, corner);

    let inner_width = (card.width - 2).max(0) as usize;
    grid.text(card.x + 1, card.y + 1, &truncate(table.name(), inner_width));
    for column in card.x + 1..card.right() - 1 {
        grid.put(column, card.y + 2, '-');
    }

    let mut columns: Vec<&Column> = table.columns().iter().collect();
    columns.sort_by_key(|column| column.sort_priority());

    let first_row = card.y + 3;
    let last_row = card.bottom() - 2;
    for (offset, column) in columns.iter().enumerate() {
        let row = first_row + offset as i64;
        if row > last_row {
            break;
        }
        grid.text(card.x + 1, row, &column_row(column, inner_width));
    }
}

/// One card row: glyph and name on the left, lowercased type, length and
/// not-null marker right-aligned.
fn column_row(column: &Column, width: usize) -> String {
    let left = format!("{} {}", column.glyph().as_char(), column.name());

    let mut right = column.type_tag().to_ascii_lowercase();
    if let Some(length) = column.length() {
        right.push_str(&format!("({length})"));
    }
    if !column.nullable() {
        right.push_str(" nn");
    }

    if left.len() + right.len() + 1 <= width {
        format!("{left}{}{right}", " ".repeat(width - left.len() - right.len()))
    } else {
        truncate(&left, width)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

struct Grid {
    cells: Vec<Vec<char>>,
    width: i64,
    height: i64,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            width: width as i64,
            height: height as i64,
        }
    }

    fn put(&mut self, x: i64, y: i64, ch: char) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize][x as usize] = ch;
    }

    fn text(&mut self, x: i64, y: i64, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            self.put(x + offset as i64, y, ch);
        }
    }

    /// Bresenham between two cells.
    fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, ch: char) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, ch);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.cells
            .into_iter()
            .map(|row| {
                let mut line: String = row.into_iter().collect();
                let trimmed = line.trim_end().len();
                line.truncate(trimmed);
                line
            })
            .collect()
    }
}
