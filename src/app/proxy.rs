//! Defines an abstraction over the response sending mechanism.

use super::events::UserEvent;

/// A trait that abstracts the sending of response events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// Production proxy: writes each event as one JSON line on stdout,
/// where the window shell consumes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutProxy;

impl EventProxy for StdoutProxy {
    fn send_event(&self, event: UserEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!("Failed to serialize outgoing event: {e}"),
        }
    }
}
