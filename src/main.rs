use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::Mutex;

use wechat_file_catalog::app::{self, proxy::StdoutProxy, state::AppState};
use wechat_file_catalog::config::Settings;

/// The backend reads one JSON request per stdin line and answers with
/// JSON events on stdout; the window shell lives in a separate process.
#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {e}");
            Settings::default()
        }
    };
    tracing::info!(
        "Starting with custom path {:?}, use default paths: {}",
        settings.wechat_path,
        settings.use_default_paths
    );

    let state = Arc::new(Mutex::new(AppState::new(settings)));
    let proxy = StdoutProxy;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    tracing::info!("Ready, waiting for requests on stdin");

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                app::handle_ipc_message(line, proxy, state.clone());
            }
            Ok(None) => {
                tracing::info!("Stdin closed, shutting down");
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read request line: {e}");
                break;
            }
        }
    }
}
