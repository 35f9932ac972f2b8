//! The request/response layer between the core and the window shell.

pub mod commands;
pub mod events;
pub mod proxy;
pub mod state;
pub mod view_model;

use std::sync::Arc;
use tokio::sync::Mutex;

use events::IpcMessage;
use proxy::EventProxy;
use state::AppState;

/// Parses one raw IPC message and spawns the matching command handler.
///
/// Unknown commands and malformed messages are logged and dropped; the
/// shell gets no reply for them.
pub fn handle_ipc_message<P: EventProxy>(message: &str, proxy: P, state: Arc<Mutex<AppState>>) {
    let message: IpcMessage = match serde_json::from_str(message) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message: {e}");
            return;
        }
    };

    tracing::debug!("Dispatching IPC command {:?}", message.command);
    match message.command.as_str() {
        "scan-wechat-files" => {
            tokio::spawn(commands::scan_wechat_files(proxy, state));
        }
        "search-files" => {
            tokio::spawn(commands::search_files(message.payload, proxy, state));
        }
        "filter-files" => {
            tokio::spawn(commands::filter_files(message.payload, proxy, state));
        }
        "update-settings" => {
            tokio::spawn(commands::update_settings(message.payload, proxy, state));
        }
        other => {
            tracing::warn!("Unknown IPC command: {other:?}");
        }
    }
}
