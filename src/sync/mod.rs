//! Real-time sync over the agenda broadcast channel.
//!
//! ## Protocol
//!
//! 1. `GET /register` returns the channel endpoint and an authorization flag
//! 2. Connect to the channel (WebSocket, JSON text frames)
//! 3. Send `Create`/`Hide` requests; the broker assigns ids and broadcasts
//!    the accepted `Show`/`Hide` events to every subscriber, the originator
//!    included
//! 4. Apply inbound events to the local view in delivery order
//!
//! The engine never applies a mutation optimistically: its own requests take
//! effect only when they come back as broadcast events.

mod client;
mod error;
mod protocol;

pub use client::{ConnectionState, SyncClient, SyncSession};
pub use error::SyncError;
pub use protocol::{ClientRequest, RegisterResponse, ServerEvent};
