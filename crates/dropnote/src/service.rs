//! The `Dropnote` facade: wires the layers into one engine handle.

use std::sync::Arc;
use std::time::Duration;

use dropnote_code::{CodeConfig, RoomCode, RoomCodeGenerator};
use dropnote_notify::ChangeNotifier;
use dropnote_store::{Clock, Room, RoomStore, StoreHandle, SystemClock, create_room, spawn_store};
use dropnote_session::RoomSession;

use crate::DropnoteError;

/// Builder for a [`Dropnote`] engine.
///
/// Every collaborator is an explicit handle set here — there is no
/// ambient global state, so two engines in one process (say, in
/// tests) stay fully independent.
pub struct DropnoteBuilder {
    code_config: CodeConfig,
    clock: Arc<dyn Clock>,
}

impl DropnoteBuilder {
    /// Creates a builder with the canonical code format and the
    /// system clock.
    pub fn new() -> Self {
        Self {
            code_config: CodeConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Overrides the room-code format.
    pub fn code_config(mut self, config: CodeConfig) -> Self {
        self.code_config = config;
        self
    }

    /// Overrides the time source (tests pass a
    /// [`ManualClock`](dropnote_store::ManualClock)).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds an engine backed by the in-memory store.
    pub fn build(self) -> Dropnote<StoreHandle> {
        let store = spawn_store(self.clock.clone());
        self.build_with_store(store)
    }

    /// Builds an engine over a caller-supplied storage backend.
    pub fn build_with_store<S>(self, store: S) -> Dropnote<S>
    where
        S: RoomStore + Clone,
    {
        Dropnote {
            store,
            notifier: ChangeNotifier::new(),
            codes: Arc::new(RoomCodeGenerator::new(self.code_config)),
            code_config: self.code_config,
            clock: self.clock,
        }
    }
}

impl Default for DropnoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Dropnote engine: store + notifier + code generator +
/// clock behind one handle.
///
/// Cheap to clone; clones share the same store and notifier, so they
/// model independent clients of the same deployment.
#[derive(Clone)]
pub struct Dropnote<S: RoomStore + Clone> {
    store: S,
    notifier: ChangeNotifier,
    codes: Arc<RoomCodeGenerator>,
    code_config: CodeConfig,
    clock: Arc<dyn Clock>,
}

impl Dropnote<StoreHandle> {
    /// Starts building an engine with the in-memory store.
    pub fn builder() -> DropnoteBuilder {
        DropnoteBuilder::new()
    }
}

impl<S: RoomStore + Clone> Dropnote<S> {
    /// Creates a fresh, empty room that lives for `ttl`.
    ///
    /// The returned record carries the newly drawn code to share
    /// out-of-band.
    ///
    /// # Errors
    /// - [`StoreError::InvalidTtl`](dropnote_store::StoreError::InvalidTtl)
    ///   for a zero TTL.
    /// - [`StoreError::CodeSpaceExhausted`](dropnote_store::StoreError::CodeSpaceExhausted)
    ///   if every candidate code collided.
    /// - Any backend failure.
    pub async fn create_room(&self, ttl: Duration) -> Result<Room, DropnoteError> {
        let room = create_room(&self.store, self.codes.as_ref(), self.clock.as_ref(), ttl).await?;
        Ok(room)
    }

    /// Joins a room by its code (case-insensitive) and returns a live
    /// session.
    ///
    /// # Errors
    /// - [`CodeError`](dropnote_code::CodeError) for malformed input.
    /// - [`SessionError::NotFound`](dropnote_session::SessionError::NotFound)
    ///   / [`SessionError::Expired`](dropnote_session::SessionError::Expired)
    ///   per the expiration policy.
    pub async fn open(&self, raw_code: &str) -> Result<RoomSession<S>, DropnoteError> {
        let code = RoomCode::parse(raw_code, &self.code_config)?;
        let mut session = self.session();
        let room = session.activate(code).await?;
        tracing::debug!(code = %room.code, "room opened");
        Ok(session)
    }

    /// An idle session wired to this engine, for callers that want to
    /// drive activation themselves.
    pub fn session(&self) -> RoomSession<S> {
        RoomSession::new(self.store.clone(), self.notifier.clone(), self.clock.clone())
    }

    /// The storage backend handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The change notifier handle.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
