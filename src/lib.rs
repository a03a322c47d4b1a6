//! Agenda Sync
//!
//! Client engine for a shared, ordered meeting agenda kept consistent across
//! viewers in real time. The engine sends Create/Hide requests over a
//! broadcast channel, receives the broker's accepted events (its own
//! included), and folds them into a local ordered view through a
//! [`ViewAdapter`] owned by the embedding application.

pub mod config;
pub mod models;
pub mod ordering;
pub mod sync;
pub mod view;

pub use config::{Config, ConfigError};
pub use models::{Entry, ParseTalkTypeError, TalkType};
pub use ordering::CategoryPriorities;
pub use sync::{
    ClientRequest, ConnectionState, RegisterResponse, ServerEvent, SyncClient, SyncError,
    SyncSession,
};
pub use view::{AgendaView, ViewAdapter};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
