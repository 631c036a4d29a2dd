// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Galatea — terminal ER diagram engine and TUI.
//!
//! The diagram engine (schema model, layout state, edge resolver, viewport)
//! lives in `model` and `layout`; `ingest` talks to the external SQL parser
//! service, `ops` is the mutation surface, `render` rasterizes the diagram
//! into a text grid and `tui` is the interactive shell.

pub mod ingest;
pub mod layout;
pub mod model;
pub mod ops;
pub mod render;
pub mod tui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
