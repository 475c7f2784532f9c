#![forbid(unsafe_code)]

//! Save sinks: where a serialized menu structure goes.
//!
//! The editor only promises to hand over the current records; transport,
//! storage, and their failure modes belong to the sink.

use std::fmt;

use navtree_model::{MenuRecord, to_json_pretty};

/// Errors reported by a save sink.
#[derive(Debug)]
pub enum SinkError {
    /// The structure could not be encoded.
    Encode(serde_json::Error),
    /// The sink refused or failed to store the structure.
    Rejected(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "menu structure encode failed: {err}"),
            Self::Rejected(reason) => write!(f, "menu sink rejected save: {reason}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// Receiver for saved menu structures.
pub trait MenuSink {
    fn save(&mut self, records: &[MenuRecord]) -> Result<(), SinkError>;
}

/// Logs the structure as pretty JSON at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl MenuSink for LogSink {
    fn save(&mut self, records: &[MenuRecord]) -> Result<(), SinkError> {
        let json = to_json_pretty(records)?;
        tracing::info!(message = "Updated Menu Structure", structure = %json);
        Ok(())
    }
}

/// Keeps every saved structure in memory, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    saves: Vec<Vec<MenuRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn saves(&self) -> &[Vec<MenuRecord>] {
        &self.saves
    }

    #[must_use]
    pub fn last(&self) -> Option<&[MenuRecord]> {
        self.saves.last().map(Vec::as_slice)
    }
}

impl MenuSink for MemorySink {
    fn save(&mut self, records: &[MenuRecord]) -> Result<(), SinkError> {
        self.saves.push(records.to_vec());
        Ok(())
    }
}
