//! Session controller: owns the connection lifecycle and the
//! request/response plumbing on top of it.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use spotwire_proto::messages::{
    ProtoMessage, ProtoOaAccountAuthReq, ProtoOaAccountAuthRes,
    ProtoOaApplicationAuthReq, ProtoOaApplicationAuthRes,
};
use spotwire_proto::{Payload, ProtoError, codec};

use crate::config::Config;
use crate::correlation::PendingMap;
use crate::error::ClientError;
use crate::requests::expect;
use crate::tls;
use crate::transport::{self, EventHandler, OutboundItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    AppAuthenticated,
    AccountAuthenticated,
    Closing,
}

impl SessionState {
    /// Whether the transport is up, regardless of authentication depth.
    pub fn is_connected(self) -> bool {
        matches!(
            self,
            SessionState::Connected
                | SessionState::AppAuthenticated
                | SessionState::AccountAuthenticated
        )
    }
}

type ConnectedHook = Arc<dyn Fn() + Send + Sync>;
type DisconnectedHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Callbacks {
    on_connected: Mutex<Option<ConnectedHook>>,
    on_disconnected: Mutex<Option<DisconnectedHook>>,
    on_event: Mutex<Option<EventHandler>>,
}

impl Callbacks {
    fn dispatch_connected(&self) {
        let hook = self.on_connected.lock().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    fn dispatch_disconnected(&self, reason: &str) {
        let hook = self.on_disconnected.lock().clone();
        if let Some(hook) = hook {
            hook(reason);
        }
    }

    pub(crate) fn dispatch_event(&self, envelope: &ProtoMessage) {
        let hook = self.on_event.lock().clone();
        if let Some(hook) = hook {
            hook(envelope);
        }
    }
}

struct Conn {
    queued_tx: mpsc::UnboundedSender<OutboundItem>,
    shutdown: CancellationToken,
    supervisor: JoinHandle<()>,
}

pub(crate) struct SessionInner {
    pub(crate) config: Config,
    state: Mutex<SessionState>,
    pub(crate) pending: Arc<PendingMap>,
    conn: Mutex<Option<Conn>>,
    pub(crate) account_id: Mutex<Option<i64>>,
    pub(crate) callbacks: Callbacks,
}

impl SessionInner {
    /// Idempotent teardown; runs exactly once per connection no matter
    /// which task died first.
    fn finish_disconnect(&self, reason: &str) {
        {
            let mut state = self.state.lock();
            if *state == SessionState::Disconnected {
                return;
            }
            *state = SessionState::Disconnected;
        }
        *self.account_id.lock() = None;
        self.pending.fail_all(reason);
        warn!("session disconnected: reason={reason}");
        self.callbacks.dispatch_disconnected(reason);
    }
}

/// Client session over one TLS connection.
///
/// Cheap to clone; all clones drive the same connection.
#[derive(Clone)]
pub struct Session {
    pub(crate) inner: Arc<SessionInner>,
}

impl Session {
    pub fn new(mut config: Config) -> Self {
        config.normalize();
        Self {
            inner: Arc::new(SessionInner {
                config,
                state: Mutex::new(SessionState::Disconnected),
                pending: Arc::new(PendingMap::default()),
                conn: Mutex::new(None),
                account_id: Mutex::new(None),
                callbacks: Callbacks::default(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn state(&self) -> SessionState {
        *self.inner.state.lock()
    }

    /// Account bound by a successful `account_auth`, if any.
    pub fn account_id(&self) -> Option<i64> {
        *self.inner.account_id.lock()
    }

    pub fn set_on_connected(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.inner.callbacks.on_connected.lock() = Some(Arc::new(hook));
    }

    pub fn set_on_disconnected(
        &self,
        hook: impl Fn(&str) + Send + Sync + 'static,
    ) {
        *self.inner.callbacks.on_disconnected.lock() = Some(Arc::new(hook));
    }

    /// Registers the handler for server-pushed envelopes (spot events,
    /// execution events, ...). Called on the receive task in wire order, so
    /// it must not block.
    pub fn set_on_event(
        &self,
        hook: impl Fn(&ProtoMessage) + Send + Sync + 'static,
    ) {
        *self.inner.callbacks.on_event.lock() = Some(Arc::new(hook));
    }

    /// Opens the TLS connection and starts the send/receive tasks.
    pub async fn connect(&self) -> Result<(), ClientError> {
        {
            let mut state = self.inner.state.lock();
            if *state != SessionState::Disconnected {
                return Err(ClientError::AlreadyConnected);
            }
            *state = SessionState::Connecting;
        }

        info!(
            "connecting: host={}, port={}",
            self.inner.config.host, self.inner.config.port
        );

        let stream = match tls::connect(&self.inner.config).await {
            Ok(stream) => stream,
            Err(err) => {
                *self.inner.state.lock() = SessionState::Disconnected;
                return Err(err.into());
            }
        };

        self.attach(stream);
        Ok(())
    }

    /// Wires an established stream into the background tasks and moves the
    /// session to `Connected`.
    fn attach<S>(&self, stream: S)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let (queued_tx, queued_rx) = mpsc::unbounded_channel();
        let (instant_tx, instant_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let sender = tokio::spawn(transport::run_sender(
            writer,
            queued_rx,
            instant_rx,
            self.inner.config.messages_per_second,
            self.inner.config.heartbeat_idle,
            shutdown.clone(),
        ));

        let on_envelope: EventHandler = {
            let inner = self.inner.clone();
            Arc::new(move |envelope| inner.callbacks.dispatch_event(envelope))
        };
        let receiver = tokio::spawn(transport::run_receiver(
            reader,
            self.inner.config.max_frame_bytes,
            self.inner.pending.clone(),
            on_envelope,
            instant_tx,
            shutdown.clone(),
        ));

        let supervisor = tokio::spawn(supervise(
            self.inner.clone(),
            sender,
            receiver,
            shutdown.clone(),
        ));

        *self.inner.conn.lock() = Some(Conn { queued_tx, shutdown, supervisor });
        *self.inner.state.lock() = SessionState::Connected;
        self.inner.callbacks.dispatch_connected();
    }

    /// Stops the background tasks and closes the connection. Pending
    /// requests fail with `ConnectionLost`.
    pub async fn disconnect(&self) {
        let conn = {
            let mut conn = self.inner.conn.lock();
            if conn.is_some() {
                *self.inner.state.lock() = SessionState::Closing;
            }
            conn.take()
        };

        match conn {
            Some(conn) => {
                conn.shutdown.cancel();
                let _ = conn.supervisor.await;
            }
            None => {
                *self.inner.state.lock() = SessionState::Disconnected;
            }
        }
    }

    /// Sends a request and awaits the correlated response envelope with the
    /// default timeout.
    pub async fn send<M: Payload>(
        &self,
        message: &M,
    ) -> Result<ProtoMessage, ClientError> {
        self.send_with(message, None, None).await
    }

    /// [`send`](Self::send) with an explicit correlation id and/or timeout.
    pub async fn send_with<M: Payload>(
        &self,
        message: &M,
        client_msg_id: Option<String>,
        response_timeout: Option<Duration>,
    ) -> Result<ProtoMessage, ClientError> {
        if !self.state().is_connected() {
            return Err(ClientError::NotConnected);
        }

        let id = client_msg_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let (tx, rx) = oneshot::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        if !self.inner.pending.insert(&id, tx, cancelled.clone()) {
            return Err(ClientError::DuplicateClientMsgId(id));
        }

        let frame = codec::encode(message, Some(id.clone()));
        let enqueued = {
            let conn = self.inner.conn.lock();
            match conn.as_ref() {
                Some(conn) => conn
                    .queued_tx
                    .send(OutboundItem { frame, cancelled: Some(cancelled) })
                    .is_ok(),
                None => false,
            }
        };
        if !enqueued {
            self.inner.pending.evict(&id);
            return Err(ClientError::NotConnected);
        }

        debug!("request enqueued: payload={}, client_msg_id={id}", M::NAME);

        let timeout = response_timeout.unwrap_or(self.inner.config.response_timeout);
        match time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => {
                Err(ClientError::ConnectionLost("completion dropped".to_string()))
            }
            Err(_) => {
                self.inner.pending.evict(&id);
                warn!(
                    "request timed out: payload={}, client_msg_id={id}, timeout={timeout:?}",
                    M::NAME
                );
                Err(ClientError::Timeout)
            }
        }
    }

    /// First authentication phase: proves the application to the server.
    pub async fn app_auth(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<(), ClientError> {
        if !self.state().is_connected() {
            return Err(ClientError::NotConnected);
        }

        let req = ProtoOaApplicationAuthReq {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaApplicationAuthRes>(&envelope)?;

        {
            let mut state = self.inner.state.lock();
            if *state == SessionState::Connected {
                *state = SessionState::AppAuthenticated;
            }
        }
        info!("application authenticated: client_id={client_id}");
        Ok(())
    }

    /// Second authentication phase: binds a trading account to the session.
    pub async fn account_auth(
        &self,
        ctid_trader_account_id: i64,
        access_token: &str,
    ) -> Result<(), ClientError> {
        match self.state() {
            state if !state.is_connected() => return Err(ClientError::NotConnected),
            SessionState::Connected => return Err(ClientError::AppNotAuthenticated),
            _ => {}
        }

        let req = ProtoOaAccountAuthReq {
            ctid_trader_account_id,
            access_token: access_token.to_string(),
        };
        let envelope = self.send(&req).await?;
        let res = expect::<ProtoOaAccountAuthRes>(&envelope)?;

        {
            let mut state = self.inner.state.lock();
            if state.is_connected() {
                *state = SessionState::AccountAuthenticated;
            }
        }
        *self.inner.account_id.lock() = Some(ctid_trader_account_id);
        info!("account authenticated: account_id={}", res.ctid_trader_account_id);
        Ok(())
    }

    /// Account bound to the session, or `AccountNotAuthenticated` for
    /// account-scoped operations issued too early.
    pub(crate) fn require_account(&self) -> Result<i64, ClientError> {
        if self.state() != SessionState::AccountAuthenticated {
            return Err(ClientError::AccountNotAuthenticated);
        }
        (*self.inner.account_id.lock()).ok_or(ClientError::AccountNotAuthenticated)
    }

    /// Drops the account binding after a logout.
    pub(crate) fn clear_account(&self) {
        *self.inner.account_id.lock() = None;
        let mut state = self.inner.state.lock();
        if *state == SessionState::AccountAuthenticated {
            *state = SessionState::AppAuthenticated;
        }
    }
}

/// Waits for either I/O task to stop, stops the other, and runs teardown
/// with the most specific reason available.
async fn supervise(
    inner: Arc<SessionInner>,
    mut sender: JoinHandle<Result<(), ProtoError>>,
    mut receiver: JoinHandle<String>,
    shutdown: CancellationToken,
) {
    // The receiver carries the most specific reason (EOF, oversized frame),
    // so it is polled first when both tasks stop together.
    let reason = tokio::select! {
        biased;
        res = &mut receiver => {
            shutdown.cancel();
            let _ = (&mut sender).await;
            match res {
                Ok(reason) => reason,
                Err(_) => "receive task failed".to_string(),
            }
        }
        res = &mut sender => {
            shutdown.cancel();
            let _ = (&mut receiver).await;
            match res {
                Ok(Ok(())) => "client disconnect".to_string(),
                Ok(Err(err)) => format!("write failed: {err}"),
                Err(_) => "send task failed".to_string(),
            }
        }
    };
    inner.finish_disconnect(&reason);
}
