// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Core schema model.
//!
//! Tables and columns arrive pre-parsed from the external SQL parser service;
//! the model owns identity (diagram-wide unique table names) and the merge
//! rules that keep it that way.

pub mod column;
pub mod schema;
pub mod session;
pub mod table;

pub use column::{Column, TypeGlyph};
pub use schema::{MergeReport, Schema};
pub use session::DiagramSession;
pub use table::Table;
