//! Client sync engine for the shared agenda.
//!
//! The engine is split along the registration flow: a [`SyncClient`] talks
//! to the registration endpoint and dials the channel it names, and a
//! [`SyncSession`] owns the open channel, the local ordered view, and the
//! mutation requests. Nothing is shared between sessions except the broker
//! itself.

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::error::SyncError;
use super::protocol::{ClientRequest, RegisterResponse, ServerEvent};
use crate::config::Config;
use crate::models::Entry;
use crate::ordering::CategoryPriorities;
use crate::view::{AgendaView, ViewAdapter};

/// Connection lifecycle of one engine instance.
///
/// A successful registration moves the client from `Disconnected` to
/// `Connecting`; an open channel is `Connected`; teardown or an unexpected
/// drop is `Closed`. There is no automatic reconnect: once `Closed`, a new
/// client must be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Closed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Closed => write!(f, "closed"),
        }
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Handle for registering with the agenda server and opening the broadcast
/// channel it names.
pub struct SyncClient {
    server_url: String,
    state: ConnectionState,
    /// Cached registration response
    registration: Option<RegisterResponse>,
}

impl SyncClient {
    /// Creates a client for the server at `server_url`.
    pub fn new(server_url: String) -> Self {
        Self {
            server_url,
            state: ConnectionState::Disconnected,
            registration: None,
        }
    }

    /// Creates a client from config.
    ///
    /// Returns an error if no server URL is configured.
    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        if config.server_url.is_empty() {
            return Err(SyncError::NotConfigured);
        }
        Ok(Self::new(config.server_url.clone()))
    }

    /// Construction progress; the session owns the state from `Connected`
    /// onward.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Fetches the channel endpoint and authorization flag from the
    /// registration endpoint.
    ///
    /// Results are cached for subsequent calls.
    pub async fn register(&mut self) -> Result<&RegisterResponse, SyncError> {
        if self.registration.is_some() {
            return Ok(self.registration.as_ref().unwrap());
        }

        let register_url = self.build_register_url();
        let response = reqwest::Client::new()
            .get(&register_url)
            .send()
            .await
            .map_err(|e| SyncError::Registration(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::Registration(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        let registration: RegisterResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Registration(e.to_string()))?;

        self.registration = Some(registration);
        self.state = ConnectionState::Connecting;

        Ok(self.registration.as_ref().unwrap())
    }

    /// Opens the channel named by the registration response and hands it to
    /// a new session wired to `adapter`.
    pub async fn connect<A: ViewAdapter>(
        &mut self,
        adapter: A,
        priorities: CategoryPriorities,
    ) -> Result<SyncSession<A>, SyncError> {
        self.register().await?;
        let registration = self.registration.as_ref().unwrap();
        let authenticated = registration.authenticated;

        let channel_url = to_ws_url(&registration.url);
        let (stream, _) = connect_async(&channel_url)
            .await
            .map_err(|e| SyncError::Connection(e.to_string()))?;
        self.state = ConnectionState::Connected;
        tracing::debug!("channel open at {}", channel_url);

        let (sender, receiver) = stream.split();
        Ok(SyncSession::started(
            sender,
            receiver,
            authenticated,
            AgendaView::new(adapter, priorities),
        ))
    }

    fn build_register_url(&self) -> String {
        let base_url = to_http_url(&self.server_url);
        format!("{}/register", base_url.trim_end_matches('/'))
    }
}

/// One open channel plus the local ordered view it feeds.
///
/// All work runs on the caller's task: outbound requests are sent inline and
/// inbound frames are applied one at a time, to completion, so no two
/// mutations ever interleave their view updates.
pub struct SyncSession<A, S = SplitSink<WsStream, Message>, R = SplitStream<WsStream>> {
    sender: S,
    receiver: R,
    state: ConnectionState,
    authenticated: bool,
    view: AgendaView<A>,
}

impl<A, S, R> SyncSession<A, S, R>
where
    A: ViewAdapter,
    S: SinkExt<Message> + Unpin,
    S::Error: std::fmt::Display,
    R: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    fn started(sender: S, receiver: R, authenticated: bool, view: AgendaView<A>) -> Self {
        Self {
            sender,
            receiver,
            state: ConnectionState::Connected,
            authenticated,
            view,
        }
    }

    /// Whether the registration endpoint authorized mutations from this
    /// viewer.
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn view(&self) -> &AgendaView<A> {
        &self.view
    }

    /// Entries currently in the view, in display order.
    pub fn entries(&self) -> &[Entry] {
        self.view.entries()
    }

    /// Asks the broker to create an entry.
    ///
    /// All three fields must be non-empty or the request is dropped before
    /// transmission. Nothing changes locally until the broker echoes the
    /// resulting Show event back on the channel.
    pub async fn request_create(&mut self, name: &str, talk_type: &str, desc: &str) {
        if name.is_empty() || talk_type.is_empty() || desc.is_empty() {
            tracing::debug!("dropping create request with an empty field");
            return;
        }

        self.send(ClientRequest::Create {
            name: name.to_string(),
            talk_type: talk_type.to_string(),
            desc: desc.to_string(),
        })
        .await;
    }

    /// Asks the broker to remove the entry with this id.
    ///
    /// The entry stays in the view until the broker echoes the Hide back.
    pub async fn request_hide(&mut self, id: i32) {
        self.send(ClientRequest::Hide { id }).await;
    }

    /// Requests are best-effort: on a channel that is no longer open the
    /// request is dropped and the view goes stale rather than erroring.
    async fn send(&mut self, request: ClientRequest) {
        if self.state != ConnectionState::Connected {
            tracing::warn!("channel is {}, dropping outbound request", self.state);
            return;
        }
        send_request(&mut self.sender, &request).await;
    }

    /// Applies inbound events until the channel closes.
    pub async fn run(&mut self) {
        while self.recv_applied().await.is_some() {}
    }

    /// Waits for the next recognized event, applies it to the view, and
    /// returns it. Returns `None` once the channel is closed.
    ///
    /// Malformed frames and unrecognized discriminants are skipped; pings
    /// are answered in between.
    pub async fn recv_applied(&mut self) -> Option<ServerEvent> {
        while self.state == ConnectionState::Connected {
            let frame = match self.receiver.next().await {
                Some(frame) => frame,
                None => break,
            };

            match frame {
                Ok(Message::Text(text)) => match ServerEvent::decode(&text) {
                    Ok(event) => {
                        self.view.apply(&event);
                        return Some(event);
                    }
                    Err(e) => {
                        tracing::debug!("ignoring unrecognized channel message: {}", e);
                    }
                },
                Ok(Message::Ping(data)) => {
                    let _ = self.sender.send(Message::Pong(data)).await;
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("channel error, closing: {}", e);
                    self.state = ConnectionState::Closed;
                    return None;
                }
            }
        }

        if self.state != ConnectionState::Closed {
            tracing::warn!("channel closed by peer");
            self.state = ConnectionState::Closed;
        }
        None
    }

    /// Tears the session down.
    ///
    /// The state flips to `Closed` before the close frame goes out, so the
    /// shutdown is never reported as an unexpected drop.
    pub async fn close(mut self) {
        self.state = ConnectionState::Closed;
        let _ = self.sender.send(Message::Close(None)).await;
    }
}

/// Serializes a request onto the channel.
///
/// Failures are logged and the request dropped; delivery is only ever
/// confirmed by the broker echoing the resulting event back.
async fn send_request<S>(sender: &mut S, request: &ClientRequest)
where
    S: SinkExt<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let text = match request.encode() {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("failed to encode request: {}", e);
            return;
        }
    };

    if let Err(e) = sender.send(Message::Text(text.into())).await {
        tracing::warn!("failed to send request: {}", e);
    }
}

/// Normalizes a channel endpoint to a ws(s) URL.
///
/// The registration endpoint hands back whatever scheme the server was
/// configured with; the channel itself always speaks WebSocket.
fn to_ws_url(url: &str) -> String {
    if url.starts_with("http://") {
        url.replacen("http://", "ws://", 1)
    } else if url.starts_with("https://") {
        url.replacen("https://", "wss://", 1)
    } else if !url.starts_with("ws://") && !url.starts_with("wss://") {
        format!("ws://{}", url)
    } else {
        url.to_string()
    }
}

/// Normalizes a server base URL to an http(s) URL.
fn to_http_url(url: &str) -> String {
    if url.starts_with("ws://") {
        url.replacen("ws://", "http://", 1)
    } else if url.starts_with("wss://") {
        url.replacen("wss://", "https://", 1)
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("http://{}", url)
    } else {
        url.to_string()
    }
}
