//! In-memory store backend: an isolated Tokio task that owns the map.
//!
//! The actor owns a plain `HashMap` and processes one command at a
//! time, so every operation is atomic without any locking — same
//! pattern as a single-writer database connection.

use std::collections::HashMap;
use std::sync::Arc;

use dropnote_code::RoomCode;
use tokio::sync::{mpsc, oneshot};

use crate::{Clock, Room, RoomStore, StoreError};

/// Default command channel size for the store actor.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Commands sent to the store actor through its channel.
///
/// Each variant carries a `oneshot::Sender` reply channel — the caller
/// sends a command and awaits the response on it.
enum StoreCommand {
    Insert {
        room: Room,
        reply: oneshot::Sender<Result<Room, StoreError>>,
    },
    Fetch {
        code: RoomCode,
        reply: oneshot::Sender<Result<Room, StoreError>>,
    },
    Update {
        code: RoomCode,
        content: String,
        reply: oneshot::Sender<Result<Room, StoreError>>,
    },
    Delete {
        code: RoomCode,
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
    Shutdown,
}

/// Handle to the running store actor.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. Every clone
/// talks to the same map. A closed channel (actor gone) surfaces as
/// [`StoreError::Unavailable`] on every operation.
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    async fn request<T>(
        &self,
        cmd: StoreCommand,
        reply_rx: oneshot::Receiver<Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| StoreError::Unavailable)?;
        reply_rx.await.map_err(|_| StoreError::Unavailable)?
    }

    /// Tells the store actor to stop. Pending commands already queued
    /// are processed first; later operations get `Unavailable`.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(StoreCommand::Shutdown).await;
    }
}

impl RoomStore for StoreHandle {
    async fn insert(&self, room: Room) -> Result<Room, StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            StoreCommand::Insert {
                room,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    async fn fetch(&self, code: &RoomCode) -> Result<Room, StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            StoreCommand::Fetch {
                code: code.clone(),
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    async fn update(&self, code: &RoomCode, content: String) -> Result<Room, StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            StoreCommand::Update {
                code: code.clone(),
                content,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    async fn delete(&self, code: &RoomCode) -> Result<(), StoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            StoreCommand::Delete {
                code: code.clone(),
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }
}

/// The store actor state. Runs inside a Tokio task.
struct StoreActor {
    rooms: HashMap<RoomCode, Room>,
    clock: Arc<dyn Clock>,
    receiver: mpsc::Receiver<StoreCommand>,
}

impl StoreActor {
    async fn run(mut self) {
        tracing::debug!("store actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                StoreCommand::Insert { room, reply } => {
                    let _ = reply.send(self.handle_insert(room));
                }
                StoreCommand::Fetch { code, reply } => {
                    let _ = reply.send(self.handle_fetch(&code));
                }
                StoreCommand::Update {
                    code,
                    content,
                    reply,
                } => {
                    let _ = reply.send(self.handle_update(&code, content));
                }
                StoreCommand::Delete { code, reply } => {
                    let _ = reply.send(self.handle_delete(&code));
                }
                StoreCommand::Shutdown => {
                    tracing::debug!("store actor shutting down");
                    break;
                }
            }
        }

        tracing::debug!("store actor stopped");
    }

    fn handle_insert(&mut self, room: Room) -> Result<Room, StoreError> {
        if self.rooms.contains_key(&room.code) {
            // Never overwrite — the unique constraint is the whole
            // point of the insert conflict signal.
            return Err(StoreError::Collision(room.code));
        }

        tracing::info!(code = %room.code, "room inserted");
        self.rooms.insert(room.code.clone(), room.clone());
        Ok(room)
    }

    fn handle_fetch(&self, code: &RoomCode) -> Result<Room, StoreError> {
        self.rooms
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(code.clone()))
    }

    fn handle_update(&mut self, code: &RoomCode, content: String) -> Result<Room, StoreError> {
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| StoreError::NotFound(code.clone()))?;

        room.content = content;
        room.updated_at = self.clock.now();
        room.version += 1;

        tracing::debug!(code = %code, version = room.version, "room updated");
        Ok(room.clone())
    }

    fn handle_delete(&mut self, code: &RoomCode) -> Result<(), StoreError> {
        if self.rooms.remove(code).is_some() {
            tracing::info!(code = %code, "room deleted");
        }
        // Deleting a missing code is fine — idempotent by contract.
        Ok(())
    }
}

/// Spawns the in-memory store actor and returns a handle to it.
///
/// The clock stamps `updated_at` on commits; pass a
/// [`ManualClock`](crate::ManualClock) in tests to control it.
pub fn spawn_store(clock: Arc<dyn Clock>) -> StoreHandle {
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_SIZE);

    let actor = StoreActor {
        rooms: HashMap::new(),
        clock,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    StoreHandle { sender: tx }
}

// =========================================================================
// Tests
// =========================================================================
