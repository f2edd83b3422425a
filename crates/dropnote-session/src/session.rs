//! The room session: one client's live binding to one room code.

use std::sync::Arc;

use dropnote_code::RoomCode;
use dropnote_notify::{ChangeNotifier, SubscriptionHandle};
use dropnote_store::{Clock, Room, RoomStore, resolve_live};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{SessionError, SessionPhase};

/// One client's session on one room code.
///
/// Holds explicit collaborator handles (store, notifier, clock) —
/// nothing ambient. The session caches a snapshot of the room in a
/// `watch` channel; the store remains the sole source of truth and
/// the cache is refreshed exclusively by subscription deliveries.
///
/// # Cancellation
///
/// [`activate`](Self::activate) is a plain future: dropping it while
/// the fetch is in flight cancels the resolution before any
/// subscription is registered, so a stale result can never reach a
/// session that moved on. [`deactivate`](Self::deactivate)
/// unsubscribes synchronously and aborts the delivery pump, and the
/// same teardown runs on `Drop`.
pub struct RoomSession<S: RoomStore> {
    store: S,
    notifier: ChangeNotifier,
    clock: Arc<dyn Clock>,

    phase: SessionPhase,
    bound: Option<RoomCode>,
    cache: watch::Sender<Option<Room>>,
    subscription: Option<SubscriptionHandle>,
    pump: Option<JoinHandle<()>>,
}

impl<S: RoomStore> RoomSession<S> {
    /// Creates an idle session wired to its collaborators.
    pub fn new(store: S, notifier: ChangeNotifier, clock: Arc<dyn Clock>) -> Self {
        let (cache, _) = watch::channel(None);
        Self {
            store,
            notifier,
            clock,
            phase: SessionPhase::Idle,
            bound: None,
            cache,
            subscription: None,
            pump: None,
        }
    }

    /// Binds the session to a room code.
    ///
    /// Resolves the code through the expiration policy; on success the
    /// room is cached, a change subscription is registered, and the
    /// session goes `Live`. On failure the session is `Dead` for this
    /// code and nothing is subscribed. Re-activating an already-bound
    /// session tears the old binding down first.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`] — no room behind the code.
    /// - [`SessionError::Expired`] — the room's TTL had elapsed (it
    ///   was purged on the way).
    /// - [`SessionError::Backend`] — the store did not answer.
    pub async fn activate(&mut self, code: RoomCode) -> Result<Room, SessionError> {
        // Release any previous binding on this exit path too.
        self.teardown();
        self.phase = SessionPhase::Resolving;
        self.bound = Some(code.clone());

        let room = match resolve_live(&self.store, self.clock.as_ref(), &code).await {
            Ok(room) => room,
            Err(err) => {
                self.phase = SessionPhase::Dead;
                tracing::info!(%code, %err, "session dead on activation");
                return Err(SessionError::from_resolve(err));
            }
        };

        let (handle, deliveries) = self.notifier.subscribe(&code);
        self.cache.send_replace(Some(room.clone()));
        self.pump = Some(tokio::spawn(pump_deliveries(deliveries, self.cache.clone())));
        self.subscription = Some(handle);
        self.phase = SessionPhase::Live;

        tracing::info!(%code, version = room.version, "session live");
        Ok(room)
    }

    /// Replaces the room's content (whole-value, last-write-wins).
    ///
    /// On success the committed record is published to all
    /// subscribers. The local cache is *not* written here — this
    /// session observes its own write only when the notifier echoes
    /// it back, exactly like every other subscriber.
    ///
    /// # Errors
    /// - [`SessionError::NotLive`] — the session has no live room.
    /// - [`SessionError::UpdateFailed`] — the store rejected or
    ///   missed the write; the cache is untouched.
    pub async fn update_content(&self, content: String) -> Result<(), SessionError> {
        if !self.phase.is_live() {
            return Err(SessionError::NotLive(self.phase));
        }
        let code = self.bound.as_ref().expect("live session is bound to a code");

        let room = self
            .store
            .update(code, content)
            .await
            .map_err(SessionError::UpdateFailed)?;

        self.notifier.publish(code, &room);
        tracing::debug!(%code, version = room.version, "content updated");
        Ok(())
    }

    /// Unbinds the session: unsubscribes, stops the delivery pump,
    /// clears the cache, and returns to `Idle`.
    ///
    /// Idempotent. After return, no delivery handler for the old
    /// binding will run again.
    pub fn deactivate(&mut self) {
        if let Some(code) = &self.bound {
            tracing::info!(%code, "session deactivated");
        }
        self.teardown();
        self.phase = SessionPhase::Idle;
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.notifier.unsubscribe(&handle);
        }
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        self.cache.send_replace(None);
        self.bound = None;
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The code this session is bound to, if any.
    pub fn code(&self) -> Option<&RoomCode> {
        self.bound.as_ref()
    }

    /// A point-in-time snapshot of the cached room.
    pub fn current(&self) -> Option<Room> {
        self.cache.borrow().clone()
    }

    /// The live content stream: yields a fresh value whenever a
    /// change delivery lands (and `None` again after deactivation).
    pub fn watch(&self) -> watch::Receiver<Option<Room>> {
        self.cache.subscribe()
    }
}

impl<S: RoomStore> Drop for RoomSession<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Applies delivered snapshots to the cache, last-event-wins — except
/// that a delivery older than the cached version is discarded. The
/// per-room version counter is the ordering token that stops a
/// reordered stale event from clobbering newer content.
async fn pump_deliveries(
    mut deliveries: tokio::sync::mpsc::UnboundedReceiver<Room>,
    cache: watch::Sender<Option<Room>>,
) {
    while let Some(delivered) = deliveries.recv().await {
        let stale = cache
            .borrow()
            .as_ref()
            .is_some_and(|cached| delivered.version < cached.version);
        if stale {
            tracing::debug!(
                code = %delivered.code,
                version = delivered.version,
                "discarding stale delivery"
            );
            continue;
        }
        cache.send_replace(Some(delivered));
    }
}

// =========================================================================
// Tests
// =========================================================================
