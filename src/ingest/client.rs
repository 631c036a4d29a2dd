// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use super::IngestError;

/// Production parser endpoint; override with `GALATEA_PARSER_URL` or
/// `--parser-url`.
pub const DEFAULT_ENDPOINT: &str = "https://databaseonlyvisualizer-api.vercel.app/process";

pub const ENDPOINT_ENV: &str = "GALATEA_PARSER_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The external SQL parser boundary.
///
/// Implementations take raw schema-definition text and return the parser's
/// statement payload; the engine treats that payload as opaque input and
/// converts it via `payload::tables_from_payload`.
pub trait SchemaParser: Send {
    fn parse(&self, sql: &str) -> Result<Value, IngestError>;
}

/// Blocking HTTP client for the parser service; run it on a worker thread,
/// never on the interaction thread.
#[derive(Debug, Clone)]
pub struct HttpSchemaParser {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpSchemaParser {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    pub fn from_env() -> Self {
        let endpoint = env::var(ENDPOINT_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SchemaParser for HttpSchemaParser {
    fn parse(&self, sql: &str) -> Result<Value, IngestError> {
        validate_sql_text(sql)?;

        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(serde_json::json!({ "sqlSentence": sql }))
            .map_err(|err| match err {
                ureq::Error::Status(status, response) => IngestError::ServiceUnavailable {
                    status: Some(status),
                    detail: response.status_text().to_owned(),
                },
                ureq::Error::Transport(transport) => IngestError::ServiceUnavailable {
                    status: None,
                    detail: transport.to_string(),
                },
            })?;

        response
            .into_json::<Value>()
            .map_err(|err| IngestError::MalformedPayload {
                detail: err.to_string(),
            })
    }
}

/// Rejects blank SQL text before anything goes over the wire.
pub fn validate_sql_text(text: &str) -> Result<(), IngestError> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyInput);
    }
    Ok(())
}

/// Reads an upload file and returns its text verbatim.
///
/// Only `.sql` and `.txt` are accepted; size limits are a UI concern, not
/// enforced here.
pub fn read_schema_file(path: &Path) -> Result<String, IngestError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.to_ascii_lowercase());
    if !matches!(extension.as_deref(), Some("sql") | Some("txt")) {
        return Err(IngestError::UnsupportedExtension {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })
}
