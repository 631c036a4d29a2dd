// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

//! Boundary to the external SQL parser service.
//!
//! The service owns SQL parsing; this module owns getting text to it and
//! turning its JSON payload into model tables without ever taking the
//! diagram down. Every error here is non-fatal: the session stays
//! interactive and untouched when ingest fails.

pub mod client;
pub mod payload;

use std::fmt;

pub use client::{
    read_schema_file, validate_sql_text, HttpSchemaParser, SchemaParser, DEFAULT_ENDPOINT,
    ENDPOINT_ENV,
};
pub use payload::{tables_from_payload, ConversionReport, ParsedTables};

#[derive(Debug)]
pub enum IngestError {
    /// Blank SQL text; rejected before any network call.
    EmptyInput,
    /// Upload file is neither `.sql` nor `.txt`.
    UnsupportedExtension { path: String },
    /// The parser responded, but not with the expected JSON array.
    MalformedPayload { detail: String },
    /// The parser is unreachable or returned a non-success status.
    ServiceUnavailable { status: Option<u16>, detail: String },
    Io { path: String, source: std::io::Error },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("SQL text is empty"),
            Self::UnsupportedExtension { path } => {
                write!(f, "unsupported file type (expected .sql or .txt): {path}")
            }
            Self::MalformedPayload { detail } => {
                write!(f, "parser payload is not in the expected shape: {detail}")
            }
            Self::ServiceUnavailable {
                status: Some(status),
                detail,
            } => write!(f, "parser service returned status {status}: {detail}"),
            Self::ServiceUnavailable {
                status: None,
                detail,
            } => write!(f, "parser service unreachable: {detail}"),
            Self::Io { path, source } => write!(f, "failed to read {path}: {source}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
