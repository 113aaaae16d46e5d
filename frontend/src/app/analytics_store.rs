//! # Analytics Synchronization Store
//!
//! Process-wide source of truth for the live analytics snapshot.
//!
//! - Every mounted view holds a [`Subscription`]; resident data is delivered
//!   the moment it subscribes, so nothing flashes a spinner once data exists.
//! - At most one analytics fetch runs at a time ([`SingleFlight`]); early
//!   subscribers all attach to it.
//! - One WebSocket connection pushes `analytics_update` frames; each frame
//!   replaces the snapshot and is broadcast like a fetch result.
//! - Connection loss is retried with linear backoff ([`ReconnectPolicy`]) and
//!   never shown to the user. After the attempt cap the store stays on fetched
//!   data only.
//!
//! Only the store's own handlers (fetch completion, frame handler, connection
//! task) write to its state. Callers read through subscriptions and accessors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use frontend::app::AnalyticsStore;
//! use frontend::core::FrontendConfig;
//! use frontend::services::api::{ApiClient, WsConnector};
//!
//! # async fn run() -> frontend::Result<()> {
//! let config = FrontendConfig::from_env()?;
//! let store = AnalyticsStore::new(
//!     Arc::new(ApiClient::new(&config)),
//!     Arc::new(WsConnector),
//!     config.stream_url()?,
//!     config.reconnect,
//! );
//!
//! let subscription = store.subscribe();
//! while let Some(update) = subscription.recv().await {
//!     println!("{update:?}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::app::connection::{ConnectionState, ConnectionStatus, ReconnectPolicy};
use crate::app::events::AnalyticsUpdate;
use crate::app::single_flight::{InFlight, SingleFlight};
use crate::core::config::ReconnectConfig;
use crate::core::error::{FrontendError, Result};
use crate::core::service::{ConcallGateway, StreamConnector};
use crate::services::api::websocket::{decode_frame, FrameDecode};
use async_channel::{Receiver, Sender};
use futures::StreamExt;
use parking_lot::Mutex;
use shared::AnalyticsSnapshot;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const ANALYTICS_FLIGHT: &str = "analytics";

/// Updates held for a subscription that is not draining. Snapshots replace
/// each other, so the oldest queued update is evicted first.
const SUBSCRIPTION_BACKLOG: usize = 8;

/// Identity of one registration with the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    tx: Sender<AnalyticsUpdate>,
    active: Arc<AtomicBool>,
}

impl Subscriber {
    fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.tx.close();
    }
}

#[derive(Default)]
struct SyncState {
    snapshot: Option<AnalyticsSnapshot>,
    last_error: Option<FrontendError>,
    /// Registration order
    subscribers: Vec<Subscriber>,
}

impl SyncState {
    fn broadcast(&mut self, update: &AnalyticsUpdate) {
        self.subscribers.retain(|subscriber| {
            subscriber.active.load(Ordering::SeqCst)
                && subscriber.tx.force_send(update.clone()).is_ok()
        });
    }
}

struct ConnectionSlot {
    status: ConnectionStatus,
    policy: ReconnectPolicy,
    task: Option<JoinHandle<()>>,
}

struct StoreInner {
    gateway: Arc<dyn ConcallGateway>,
    connector: Arc<dyn StreamConnector>,
    stream_url: String,
    flight: SingleFlight<&'static str, Result<AnalyticsSnapshot>>,
    state: Mutex<SyncState>,
    connection: Mutex<ConnectionSlot>,
    next_id: AtomicU64,
    shut_down: AtomicBool,
}

/// Shared analytics cache with single-flight fetching and live push updates.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct AnalyticsStore {
    inner: Arc<StoreInner>,
}

impl AnalyticsStore {
    /// Create the store. Nothing touches the network until the first
    /// [`subscribe`](Self::subscribe).
    pub fn new(
        gateway: Arc<dyn ConcallGateway>,
        connector: Arc<dyn StreamConnector>,
        stream_url: impl Into<String>,
        reconnect: ReconnectConfig,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                gateway,
                connector,
                stream_url: stream_url.into(),
                flight: SingleFlight::new(),
                state: Mutex::new(SyncState::default()),
                connection: Mutex::new(ConnectionSlot {
                    status: ConnectionStatus::new(reconnect.max_attempts),
                    policy: ReconnectPolicy::new(reconnect),
                    task: None,
                }),
                next_id: AtomicU64::new(1),
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    /// Register interest in analytics updates.
    ///
    /// A resident snapshot (or, without one, the last error) is queued on the
    /// subscription before it is visible to any broadcast. With nothing
    /// resident, the subscription attaches to the in-flight fetch or starts
    /// one. Also makes sure the stream connection is up.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = async_channel::bounded(SUBSCRIPTION_BACKLOG);
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let active = Arc::new(AtomicBool::new(true));

        {
            let mut state = self.inner.state.lock();
            if self.inner.shut_down.load(Ordering::SeqCst) {
                debug!(subscription = id.0, "Subscribe after shutdown, returning closed subscription");
                active.store(false, Ordering::SeqCst);
                rx.close();
                return Subscription {
                    id,
                    rx,
                    active,
                    store: Weak::new(),
                };
            }

            if let Some(snapshot) = &state.snapshot {
                let _ = tx.try_send(AnalyticsUpdate::Data(snapshot.clone()));
            } else if let Some(error) = &state.last_error {
                let _ = tx.try_send(AnalyticsUpdate::Error(error.clone()));
            } else if !self.inner.flight.is_in_flight(&ANALYTICS_FLIGHT) {
                // Already spawned; delivery happens through the broadcast
                let _ = self.inner.start_fetch();
            }

            state.subscribers.push(Subscriber {
                id,
                tx,
                active: active.clone(),
            });
            debug!(
                subscription = id.0,
                subscribers = state.subscribers.len(),
                "Analytics subscriber registered"
            );
        }

        self.inner.ensure_connected();

        Subscription {
            id,
            rx,
            active,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Remove a registration. Unknown or already-removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.remove_subscriber(id);
    }

    /// Fetch a fresh snapshot, joining the in-flight fetch if there is one.
    ///
    /// Subscribers receive the outcome as usual. A failure leaves any
    /// resident snapshot in place.
    pub async fn refresh(&self) -> Result<AnalyticsSnapshot> {
        if self.inner.shut_down.load(Ordering::SeqCst) {
            return Err(FrontendError::ShutDown);
        }
        let in_flight = self.inner.start_fetch();
        in_flight.await
    }

    pub fn snapshot(&self) -> Option<AnalyticsSnapshot> {
        self.inner.state.lock().snapshot.clone()
    }

    pub fn last_error(&self) -> Option<FrontendError> {
        self.inner.state.lock().last_error.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().subscribers.len()
    }

    pub fn is_fetching(&self) -> bool {
        self.inner.flight.is_in_flight(&ANALYTICS_FLIGHT)
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.inner.connection.lock().status.clone()
    }

    /// Open the stream connection unless one is already connecting, open, or
    /// waiting to reconnect. Does nothing once reconnects have given up.
    pub fn connect(&self) {
        self.inner.ensure_connected();
    }

    /// Re-arm a store whose reconnect attempts were exhausted and connect again.
    pub fn reset_connection(&self) {
        {
            let mut connection = self.inner.connection.lock();
            connection.policy.reset();
            connection.status.attempt = 0;
            connection.status.degraded = false;
        }
        info!("Analytics stream reconnects re-armed");
        self.inner.ensure_connected();
    }

    /// Tear the store down: end every subscription and stop the connection.
    ///
    /// Idempotent. Pending fetches still complete but deliver to nobody.
    pub fn shutdown(&self) {
        if self.inner.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        let closed = {
            let mut state = self.inner.state.lock();
            let subscribers = std::mem::take(&mut state.subscribers);
            for subscriber in &subscribers {
                subscriber.deactivate();
            }
            subscribers.len()
        };

        {
            let mut connection = self.inner.connection.lock();
            if let Some(task) = connection.task.take() {
                task.abort();
            }
            connection.status.state = ConnectionState::Disconnected;
        }

        info!(closed_subscriptions = closed, "Analytics store shut down");
    }
}

impl StoreInner {
    /// Join or start the analytics fetch. A new fetch is spawned so it runs to
    /// completion even if no caller awaits it.
    fn start_fetch(self: &Arc<Self>) -> InFlight<Result<AnalyticsSnapshot>> {
        let gateway = self.gateway.clone();
        let store = Arc::downgrade(self);

        let flight = self.flight.join(ANALYTICS_FLIGHT, move || async move {
            let result = gateway.fetch_analytics().await;
            if let Some(store) = store.upgrade() {
                store.complete_fetch(&result);
            }
            result
        });

        if flight.leader {
            debug!("Starting analytics fetch");
            tokio::spawn(flight.future.clone());
        } else {
            debug!("Joining in-flight analytics fetch");
        }
        flight.future
    }

    fn complete_fetch(&self, result: &Result<AnalyticsSnapshot>) {
        if self.shut_down.load(Ordering::SeqCst) {
            return;
        }
        let mut state = self.state.lock();
        match result {
            Ok(snapshot) => {
                info!(
                    total_visits = snapshot.total_visits,
                    subscribers = state.subscribers.len(),
                    "Analytics snapshot fetched"
                );
                state.snapshot = Some(snapshot.clone());
                state.last_error = None;
                state.broadcast(&AnalyticsUpdate::Data(snapshot.clone()));
            }
            Err(error) => {
                warn!(
                    error = %error,
                    has_snapshot = state.snapshot.is_some(),
                    subscribers = state.subscribers.len(),
                    "Analytics fetch failed"
                );
                state.last_error = Some(error.clone());
                state.broadcast(&AnalyticsUpdate::Error(error.clone()));
            }
        }
    }

    fn apply_streamed(&self, snapshot: AnalyticsSnapshot) {
        if self.shut_down.load(Ordering::SeqCst) {
            return;
        }
        let mut state = self.state.lock();
        debug!(
            total_visits = snapshot.total_visits,
            subscribers = state.subscribers.len(),
            "Applying streamed analytics update"
        );
        state.snapshot = Some(snapshot.clone());
        state.last_error = None;
        state.broadcast(&AnalyticsUpdate::Data(snapshot));
    }

    fn handle_frame(&self, text: &str) {
        match decode_frame(text) {
            FrameDecode::Update(snapshot) => {
                {
                    let mut connection = self.connection.lock();
                    connection.status.messages_received += 1;
                    connection.status.last_message = Some(chrono::Utc::now());
                }
                self.apply_streamed(snapshot);
            }
            FrameDecode::Ignored => {}
            FrameDecode::Malformed(_) => {
                self.connection.lock().status.frames_dropped += 1;
            }
        }
    }

    fn remove_subscriber(&self, id: SubscriptionId) {
        let mut state = self.state.lock();
        if let Some(position) = state.subscribers.iter().position(|s| s.id == id) {
            let subscriber = state.subscribers.remove(position);
            subscriber.deactivate();
            debug!(
                subscription = id.0,
                subscribers = state.subscribers.len(),
                "Analytics subscriber removed"
            );
        }
    }

    fn ensure_connected(self: &Arc<Self>) {
        if self.shut_down.load(Ordering::SeqCst) {
            return;
        }
        let mut connection = self.connection.lock();
        if connection.status.degraded {
            debug!("Analytics stream reconnects exhausted, not connecting");
            return;
        }
        if connection.task.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        connection.status.state = ConnectionState::Connecting;
        connection.task = Some(tokio::spawn(run_connection(Arc::downgrade(self))));
    }

    fn mark_connecting(&self) {
        let mut connection = self.connection.lock();
        connection.status.state = ConnectionState::Connecting;
        info!(
            url = %self.stream_url,
            attempt = connection.policy.attempt(),
            max_attempts = connection.policy.max_attempts(),
            "Connecting to analytics stream"
        );
    }

    fn mark_open(&self) {
        let mut connection = self.connection.lock();
        connection.policy.on_open();
        connection.status.state = ConnectionState::Open;
        connection.status.attempt = 0;
        connection.status.last_error = None;
        connection.status.last_connected = Some(chrono::Utc::now());
    }

    /// Record a lost connection and decide whether to try again.
    fn mark_disconnected(&self, error: Option<String>) -> Option<Duration> {
        let mut connection = self.connection.lock();
        connection.status.state = ConnectionState::Disconnected;
        if error.is_some() {
            connection.status.last_error = error;
        }

        let delay = connection.policy.on_disconnect();
        connection.status.attempt = connection.policy.attempt();
        match delay {
            Some(delay) => info!(
                attempt = connection.status.attempt,
                max_attempts = connection.status.max_attempts,
                delay_ms = delay.as_millis(),
                "Analytics stream disconnected, reconnecting"
            ),
            None => {
                connection.status.degraded = true;
                warn!(
                    max_attempts = connection.status.max_attempts,
                    last_error = ?connection.status.last_error,
                    "Analytics stream unavailable, live updates disabled"
                );
            }
        }
        delay
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        if let Some(task) = self.connection.get_mut().task.take() {
            task.abort();
        }
    }
}

/// Connection task: Connecting → Open → Disconnected, looping until the
/// policy gives up or the store goes away.
async fn run_connection(store: Weak<StoreInner>) {
    loop {
        let (connector, url) = match store.upgrade() {
            Some(inner) => {
                inner.mark_connecting();
                (inner.connector.clone(), inner.stream_url.clone())
            }
            None => return,
        };

        let error = match connector.connect(&url).await {
            Ok(mut frames) => {
                match store.upgrade() {
                    Some(inner) => inner.mark_open(),
                    None => return,
                }

                let mut error = None;
                while let Some(frame) = frames.next().await {
                    let Some(inner) = store.upgrade() else { return };
                    match frame {
                        Ok(text) => inner.handle_frame(&text),
                        Err(e) => {
                            error = Some(e.to_string());
                            break;
                        }
                    }
                }
                error
            }
            Err(e) => Some(e.to_string()),
        };

        let delay = match store.upgrade() {
            Some(inner) => inner.mark_disconnected(error),
            None => return,
        };
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => return,
        }
    }
}

/// A view's registration with the [`AnalyticsStore`].
///
/// At most `SUBSCRIPTION_BACKLOG` updates are queued; a view that stops
/// draining only ever sees the newest ones. Dropping the subscription
/// unsubscribes it.
pub struct Subscription {
    id: SubscriptionId,
    rx: Receiver<AnalyticsUpdate>,
    active: Arc<AtomicBool>,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Next update; `None` once unsubscribed or the store shut down.
    pub async fn recv(&self) -> Option<AnalyticsUpdate> {
        if !self.is_active() {
            return None;
        }
        let update = self.rx.recv().await.ok()?;
        self.is_active().then_some(update)
    }

    /// Next queued update without waiting.
    pub fn try_recv(&self) -> Option<AnalyticsUpdate> {
        if !self.is_active() {
            return None;
        }
        let update = self.rx.try_recv().ok()?;
        self.is_active().then_some(update)
    }

    /// Stop receiving updates. Queued but unread updates are discarded.
    pub fn unsubscribe(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            if let Some(store) = self.store.upgrade() {
                store.remove_subscriber(self.id);
            }
        }
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
