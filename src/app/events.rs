//! Defines the message structures for communication with the window shell.

use serde::{Deserialize, Serialize};

use super::view_model::EntryView;

/// Responses sent from the backend to the surrounding application shell.
///
/// Serialized as `{ "event": "<kebab-case name>", "payload": ... }`, so
/// each variant name is also its wire-level event name.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum UserEvent {
    /// A finished scan, with entries formatted for display.
    ScanComplete(Vec<EntryView>),
    /// An unexpected failure inside the scan handler. Never combined
    /// with partial results for the same request.
    ScanError(String),
    /// Results for a `search-files` request.
    SearchResults(Vec<EntryView>),
    /// Results for a `filter-files` request.
    FilterResults(Vec<EntryView>),
}

/// A request received from the shell via the IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
