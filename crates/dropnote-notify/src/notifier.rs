//! The change notifier: a per-code registry of subscriber channels.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dropnote_code::RoomCode;
use dropnote_store::Room;
use tokio::sync::mpsc;

/// Counter for generating unique subscription IDs.
static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Proof of a registered subscription; required to unsubscribe.
///
/// Deliberately not `Clone` — exactly one owner can tear the
/// subscription down, which keeps "who unsubscribes" unambiguous.
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: u64,
    code: RoomCode,
}

impl SubscriptionHandle {
    /// The room code this subscription watches.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }
}

/// Fans room-update snapshots out to subscribers, keyed by room code.
///
/// Cheap to clone — clones share one registry, so the handle can be
/// passed into every session as an explicit collaborator (there is no
/// process-wide singleton to reach for).
///
/// All methods are synchronous: the registry lock is only ever held
/// for map bookkeeping and unbounded sends, neither of which blocks.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    inner: Arc<Mutex<Registry>>,
}

#[derive(Default)]
struct Registry {
    /// Per-code subscriber channels. A code with no subscribers has
    /// no entry at all — publishes to it are free.
    subscribers: HashMap<RoomCode, HashMap<u64, mpsc::UnboundedSender<Room>>>,
}

impl ChangeNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in a room code.
    ///
    /// Returns the handle needed to unsubscribe and the receiver the
    /// snapshots arrive on. Only events published *after* this call
    /// are delivered — there is no replay.
    pub fn subscribe(&self, code: &RoomCode) -> (SubscriptionHandle, mpsc::UnboundedReceiver<Room>) {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let mut registry = self.inner.lock().expect("notifier lock poisoned");
        registry
            .subscribers
            .entry(code.clone())
            .or_default()
            .insert(id, tx);

        tracing::debug!(%code, subscription = id, "subscribed");

        (
            SubscriptionHandle {
                id,
                code: code.clone(),
            },
            rx,
        )
    }

    /// Removes a subscription. Idempotent; after return no further
    /// deliveries are queued for this handle.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        let mut registry = self.inner.lock().expect("notifier lock poisoned");

        if let Some(entries) = registry.subscribers.get_mut(&handle.code) {
            if entries.remove(&handle.id).is_some() {
                tracing::debug!(code = %handle.code, subscription = handle.id, "unsubscribed");
            }
            if entries.is_empty() {
                registry.subscribers.remove(&handle.code);
            }
        }
    }

    /// Delivers a post-update snapshot to every current subscriber of
    /// `code`.
    ///
    /// Fire-and-forget per subscriber: unbounded sends never block the
    /// publisher, and a subscriber whose receiver is gone is pruned
    /// without affecting delivery to the rest.
    pub fn publish(&self, code: &RoomCode, room: &Room) {
        let mut registry = self.inner.lock().expect("notifier lock poisoned");

        let Some(entries) = registry.subscribers.get_mut(code) else {
            return;
        };

        let before = entries.len();
        entries.retain(|id, sender| {
            let alive = sender.send(room.clone()).is_ok();
            if !alive {
                tracing::debug!(%code, subscription = *id, "dropping dead subscriber");
            }
            alive
        });

        tracing::debug!(
            %code,
            version = room.version,
            delivered = entries.len(),
            pruned = before - entries.len(),
            "change published"
        );

        if entries.is_empty() {
            registry.subscribers.remove(code);
        }
    }

    /// Number of live subscriptions for a code (diagnostics/tests).
    pub fn subscriber_count(&self, code: &RoomCode) -> usize {
        let registry = self.inner.lock().expect("notifier lock poisoned");
        registry
            .subscribers
            .get(code)
            .map_or(0, HashMap::len)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    fn code(s: &str) -> RoomCode {
        s.parse().unwrap()
    }

    fn room(c: &str, content: &str, version: u64) -> Room {
        let mut room = Room::new(
            code(c),
            SystemTime::UNIX_EPOCH,
            Duration::from_secs(3600),
        );
        room.content = content.to_string();
        room.version = version;
        room
    }

    #[tokio::test]
    async fn test_publish_fans_out_to_all_subscribers() {
        let notifier = ChangeNotifier::new();
        let (_h1, mut rx1) = notifier.subscribe(&code("AAAAAA"));
        let (_h2, mut rx2) = notifier.subscribe(&code("AAAAAA"));

        notifier.publish(&code("AAAAAA"), &room("AAAAAA", "hello", 1));

        assert_eq!(rx1.recv().await.unwrap().content, "hello");
        assert_eq!(rx2.recv().await.unwrap().content, "hello");
    }

    #[tokio::test]
    async fn test_publish_is_scoped_to_one_code() {
        let notifier = ChangeNotifier::new();
        let (_h1, mut watching) = notifier.subscribe(&code("AAAAAA"));
        let (_h2, mut other) = notifier.subscribe(&code("BBBBBB"));

        notifier.publish(&code("AAAAAA"), &room("AAAAAA", "hello", 1));

        assert!(watching.try_recv().is_ok());
        assert!(other.try_recv().is_err(), "other room must see nothing");
    }

    #[tokio::test]
    async fn test_publish_preserves_order_per_subscriber() {
        let notifier = ChangeNotifier::new();
        let (_h, mut rx) = notifier.subscribe(&code("AAAAAA"));

        for v in 1..=3 {
            notifier.publish(&code("AAAAAA"), &room("AAAAAA", &format!("v{v}"), v));
        }

        assert_eq!(rx.recv().await.unwrap().version, 1);
        assert_eq!(rx.recv().await.unwrap().version, 2);
        assert_eq!(rx.recv().await.unwrap().version, 3);
    }

    #[tokio::test]
    async fn test_subscribe_after_publish_gets_no_replay() {
        let notifier = ChangeNotifier::new();

        notifier.publish(&code("AAAAAA"), &room("AAAAAA", "missed", 1));
        let (_h, mut rx) = notifier.subscribe(&code("AAAAAA"));

        assert!(rx.try_recv().is_err(), "no replay of earlier events");
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_deliveries() {
        let notifier = ChangeNotifier::new();
        let (handle, mut rx) = notifier.subscribe(&code("AAAAAA"));

        notifier.unsubscribe(&handle);
        notifier.publish(&code("AAAAAA"), &room("AAAAAA", "late", 1));

        assert!(rx.try_recv().is_err());
        assert_eq!(notifier.subscriber_count(&code("AAAAAA")), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_twice_is_idempotent() {
        let notifier = ChangeNotifier::new();
        let (handle, _rx) = notifier.subscribe(&code("AAAAAA"));

        notifier.unsubscribe(&handle);
        notifier.unsubscribe(&handle);

        assert_eq!(notifier.subscriber_count(&code("AAAAAA")), 0);
    }

    #[tokio::test]
    async fn test_dead_subscriber_does_not_break_the_rest() {
        let notifier = ChangeNotifier::new();
        let (_h1, rx1) = notifier.subscribe(&code("AAAAAA"));
        let (_h2, mut rx2) = notifier.subscribe(&code("AAAAAA"));

        // First subscriber walks away without unsubscribing.
        drop(rx1);
        notifier.publish(&code("AAAAAA"), &room("AAAAAA", "still here", 1));

        assert_eq!(rx2.recv().await.unwrap().content, "still here");
        // The dead channel was pruned during publish.
        assert_eq!(notifier.subscriber_count(&code("AAAAAA")), 1);
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_is_a_no_op() {
        let notifier = ChangeNotifier::new();
        // Must not panic or accumulate state.
        notifier.publish(&code("AAAAAA"), &room("AAAAAA", "void", 1));
        assert_eq!(notifier.subscriber_count(&code("AAAAAA")), 0);
    }
}
