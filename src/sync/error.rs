//! Sync error types.

/// Errors that can occur while establishing a sync session.
///
/// Only construction paths surface errors. Once a session is up, failure
/// handling is local: bad inbound frames are dropped, and outbound requests
/// on a dead channel are logged and discarded. A stale view is acceptable; a
/// crash is not.
#[derive(Debug)]
pub enum SyncError {
    /// No server URL configured
    NotConfigured,
    /// Registration endpoint request failed
    Registration(String),
    /// Failed to open the broadcast channel
    Connection(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::NotConfigured => {
                write!(f, "No server configured. Add server_url to config.")
            }
            SyncError::Registration(e) => write!(f, "Registration failed: {}", e),
            SyncError::Connection(e) => write!(f, "Connection error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}
