//! Contains all the command handlers that are callable from the shell via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the
//! `core` logic, and for sending `UserEvent`s back to the shell.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::entry_views;
use crate::config::{self, Settings};
use crate::core::TypeFilter;

/// Handles `scan-wechat-files`: runs (or serves from cache) a full scan
/// and replies with `scan-complete`, or `scan-error` on an unexpected
/// failure. Partial results are never mixed with an error response.
pub async fn scan_wechat_files<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let mut state_guard = state.lock().await;
    match state_guard.catalog.scan().await {
        Ok(entries) => {
            tracing::info!("Scan request finished with {} entries", entries.len());
            proxy.send_event(UserEvent::ScanComplete(entry_views(&entries)));
        }
        Err(e) => {
            tracing::error!("Scan request failed: {e}");
            proxy.send_event(UserEvent::ScanError(e.to_string()));
        }
    }
}

/// Handles `search-files`: case-insensitive substring match on file
/// names over the current snapshot. A missing or empty keyword returns
/// every entry.
pub async fn search_files<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let keyword = payload.as_str().unwrap_or_default();
    let state_guard = state.lock().await;
    let results = state_guard.catalog.search(keyword);
    proxy.send_event(UserEvent::SearchResults(entry_views(&results)));
}

/// Handles `filter-files`: exact category match over the current
/// snapshot, with `"all"` as the everything sentinel. An unknown type
/// string matches nothing and is logged.
pub async fn filter_files<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let type_str = payload.as_str().unwrap_or("all");
    let state_guard = state.lock().await;
    let results = match TypeFilter::parse(type_str) {
        Some(filter) => state_guard.catalog.filter_by_type(filter),
        None => {
            tracing::warn!("Unknown file type in filter request: {type_str:?}");
            Vec::new()
        }
    };
    proxy.send_event(UserEvent::FilterResults(entry_views(&results)));
}

/// Handles `update-settings`: applies the new resolver inputs to the
/// catalog (invalidating its cache) and rewrites the settings file
/// wholesale. Sends no response; persistence failures are logged only.
pub async fn update_settings<P: EventProxy>(
    payload: serde_json::Value,
    _proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let new_settings = match serde_json::from_value::<Settings>(payload.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to deserialize settings from payload {payload:?}: {e}");
            return;
        }
    };

    let mut state_guard = state.lock().await;
    state_guard
        .catalog
        .set_custom_path(new_settings.wechat_path.clone());
    state_guard
        .catalog
        .set_use_default_paths(new_settings.use_default_paths);
    state_guard.settings = new_settings;

    let settings_dir = state_guard.settings_dir.clone();
    if let Err(e) = config::settings::save_settings(&state_guard.settings, settings_dir.as_deref())
    {
        tracing::warn!("Failed to persist settings: {e}");
    }
}
