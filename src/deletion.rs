//! Grace-period deletion state machine.
//!
//! A confirmed delete does not remove anything locally. The server marks
//! the collection `pending_delete` and the engine starts a poll task that
//! asks for `{pending, remaining_seconds}` once per second. The countdown
//! shown to the user is always the server's value; a locally decremented
//! clock is never trusted past the next poll.
//!
//! Per collection: `Idle -> Pending(remaining) -> {Committed | Cancelled}`.
//! `Committed` purges the collection from the mirror; `Cancelled` leaves
//! it untouched. At most one poll task exists per collection and every
//! terminal transition (including poll failure) releases it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::api::Gateway;

/// Buffer size for the poll task event channel.
const EVENT_CHANNEL_SIZE: usize = 32;

/// Server answer to a pending-delete status poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingDeleteStatus {
    pub pending: bool,
    #[serde(default)]
    pub remaining_seconds: i64,
}

/// Transient per-collection countdown state; exists only between
/// delete-initiation and resolution.
#[derive(Debug, Clone)]
pub struct PendingDeletion {
    pub collection_id: String,
    pub remaining_seconds: i64,
    /// False until the server has confirmed a countdown value.
    pub server_confirmed: bool,
}

/// Events emitted by the poll task toward the coordinator.
#[derive(Debug)]
pub enum DeletionEvent {
    /// Server-confirmed countdown update.
    Tick {
        collection_id: String,
        remaining_seconds: i64,
    },
    /// Server reported the deletion done, or the countdown was exhausted.
    Committed { collection_id: String },
    /// A status poll failed; the countdown stops without assuming the
    /// deletion happened.
    Failed {
        collection_id: String,
        error: String,
    },
}

struct ActiveDeletion {
    pending: PendingDeletion,
    handle: JoinHandle<()>,
}

/// Owns the poll tasks and the event channel between them and the
/// coordinator. Guarantees at most one active task per collection.
pub struct DeletionTracker {
    tx: mpsc::Sender<DeletionEvent>,
    rx: mpsc::Receiver<DeletionEvent>,
    active: HashMap<String, ActiveDeletion>,
}

impl Default for DeletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DeletionTracker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        Self {
            tx,
            rx,
            active: HashMap::new(),
        }
    }

    pub fn is_pending(&self, collection_id: &str) -> bool {
        self.active.contains_key(collection_id)
    }

    pub fn pending(&self, collection_id: &str) -> Option<&PendingDeletion> {
        self.active.get(collection_id).map(|a| &a.pending)
    }

    /// Start the countdown poll task for a collection whose pending-delete
    /// request the server accepted. Returns false if a countdown is
    /// already running (deletion must not be re-triggered while Pending).
    pub fn begin(
        &mut self,
        collection_id: &str,
        initial_seconds: i64,
        server_confirmed: bool,
        gateway: Gateway,
        poll_interval: Duration,
    ) -> bool {
        if self.active.contains_key(collection_id) {
            warn!(collection_id, "Deletion already pending, ignoring re-trigger");
            return false;
        }

        let id = collection_id.to_string();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            poll_until_terminal(gateway, id, tx, poll_interval).await;
        });

        self.active.insert(
            collection_id.to_string(),
            ActiveDeletion {
                pending: PendingDeletion {
                    collection_id: collection_id.to_string(),
                    remaining_seconds: initial_seconds,
                    server_confirmed,
                },
                handle,
            },
        );
        debug!(collection_id, initial_seconds, "Deletion countdown started");
        true
    }

    /// Record a server-confirmed countdown value.
    pub fn update_remaining(&mut self, collection_id: &str, remaining_seconds: i64) {
        if let Some(active) = self.active.get_mut(collection_id) {
            active.pending.remaining_seconds = remaining_seconds;
            active.pending.server_confirmed = true;
        }
    }

    /// Terminal transition: drop the entry and release its poll task.
    /// Safe to call once per collection; later calls are no-ops.
    pub fn finish(&mut self, collection_id: &str) {
        if let Some(active) = self.active.remove(collection_id) {
            active.handle.abort();
            debug!(collection_id, "Deletion countdown released");
        }
    }

    /// Next event from any poll task, if one is waiting.
    pub fn try_next(&mut self) -> Option<DeletionEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for DeletionTracker {
    fn drop(&mut self) {
        for (_, active) in self.active.drain() {
            active.handle.abort();
        }
    }
}

async fn poll_until_terminal(
    gateway: Gateway,
    collection_id: String,
    tx: mpsc::Sender<DeletionEvent>,
    poll_interval: Duration,
) {
    // First poll lands one interval after acceptance, not immediately.
    let mut ticker = time::interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match gateway.poll_pending_delete(&collection_id).await {
            Ok(status) if !status.pending => {
                let _ = tx.send(DeletionEvent::Committed { collection_id }).await;
                return;
            }
            Ok(status) if status.remaining_seconds <= 0 => {
                // Countdown exhausted: committed even if the server poll
                // has not caught up, so a missed poll cannot leave an
                // uncancellable indefinite wait.
                let _ = tx.send(DeletionEvent::Committed { collection_id }).await;
                return;
            }
            Ok(status) => {
                let _ = tx
                    .send(DeletionEvent::Tick {
                        collection_id: collection_id.clone(),
                        remaining_seconds: status.remaining_seconds,
                    })
                    .await;
            }
            Err(e) => {
                warn!(collection_id = %collection_id, error = %e, "Pending-delete poll failed");
                let _ = tx
                    .send(DeletionEvent::Failed {
                        collection_id,
                        error: e.to_string(),
                    })
                    .await;
                return;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use std::sync::Arc;

    const TICK: Duration = Duration::from_secs(1);

    fn gateway(fake: &Arc<FakeTransport>) -> Gateway {
        Gateway::new(fake.clone() as Arc<dyn crate::api::Transport>)
    }

    async fn advance_ticks(n: u64) {
        // With a paused clock each sleep auto-advances past one poll tick.
        for _ in 0..n {
            tokio::time::sleep(Duration::from_millis(1050)).await;
        }
    }

    fn drain(tracker: &mut DeletionTracker) -> Vec<DeletionEvent> {
        let mut events = Vec::new();
        while let Some(event) = tracker.try_next() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_then_commits_at_zero() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_json_seq(
            "GET",
            "lists/c1/pending_delete/status",
            vec![
                serde_json::json!({"pending": true, "remaining_seconds": 15}),
                serde_json::json!({"pending": true, "remaining_seconds": 10}),
                serde_json::json!({"pending": true, "remaining_seconds": 5}),
                serde_json::json!({"pending": true, "remaining_seconds": 0}),
            ],
        );

        let mut tracker = DeletionTracker::new();
        assert!(tracker.begin("c1", 20, false, gateway(&fake), TICK));
        assert!(tracker.is_pending("c1"));

        advance_ticks(4).await;
        let events = drain(&mut tracker);

        let ticks: Vec<i64> = events
            .iter()
            .filter_map(|e| match e {
                DeletionEvent::Tick {
                    remaining_seconds, ..
                } => Some(*remaining_seconds),
                _ => None,
            })
            .collect();
        assert_eq!(ticks, vec![15, 10, 5]);
        assert!(matches!(
            events.last(),
            Some(DeletionEvent::Committed { collection_id }) if collection_id == "c1"
        ));

        // Poll loop ended on its own; no further requests after commit.
        let polls = fake.calls_to("GET", "lists/c1/pending_delete/status");
        advance_ticks(3).await;
        assert_eq!(fake.calls_to("GET", "lists/c1/pending_delete/status"), polls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_false_commits_immediately() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_json(
            "GET",
            "lists/c1/pending_delete/status",
            serde_json::json!({"pending": false}),
        );

        let mut tracker = DeletionTracker::new();
        tracker.begin("c1", 20, false, gateway(&fake), TICK);

        advance_ticks(1).await;
        let events = drain(&mut tracker);
        assert!(matches!(events.as_slice(), [DeletionEvent::Committed { .. }]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_failure_stops_countdown_without_commit() {
        let fake = Arc::new(FakeTransport::new());
        fake.fail_with(
            "GET",
            "lists/c1/pending_delete/status",
            crate::api::ApiError::Network("connection reset".to_string()),
        );

        let mut tracker = DeletionTracker::new();
        tracker.begin("c1", 20, false, gateway(&fake), TICK);

        advance_ticks(1).await;
        let events = drain(&mut tracker);
        assert!(matches!(events.as_slice(), [DeletionEvent::Failed { .. }]));

        // Failure is terminal for the poll loop.
        let polls = fake.calls_to("GET", "lists/c1/pending_delete/status");
        advance_ticks(2).await;
        assert_eq!(fake.calls_to("GET", "lists/c1/pending_delete/status"), polls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_one_countdown_per_collection() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_json(
            "GET",
            "lists/c1/pending_delete/status",
            serde_json::json!({"pending": true, "remaining_seconds": 10}),
        );

        let mut tracker = DeletionTracker::new();
        assert!(tracker.begin("c1", 20, false, gateway(&fake), TICK));
        assert!(!tracker.begin("c1", 20, false, gateway(&fake), TICK));

        // A different collection is unaffected.
        fake.respond_json(
            "GET",
            "lists/c2/pending_delete/status",
            serde_json::json!({"pending": true, "remaining_seconds": 10}),
        );
        assert!(tracker.begin("c2", 20, false, gateway(&fake), TICK));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_aborts_polling() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_json(
            "GET",
            "lists/c1/pending_delete/status",
            serde_json::json!({"pending": true, "remaining_seconds": 10}),
        );

        let mut tracker = DeletionTracker::new();
        tracker.begin("c1", 20, false, gateway(&fake), TICK);
        advance_ticks(1).await;
        assert_eq!(fake.calls_to("GET", "lists/c1/pending_delete/status"), 1);

        tracker.finish("c1");
        assert!(!tracker.is_pending("c1"));

        advance_ticks(3).await;
        assert_eq!(fake.calls_to("GET", "lists/c1/pending_delete/status"), 1);

        // Finishing again is a no-op.
        tracker.finish("c1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_remaining_marks_server_confirmed() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_json(
            "GET",
            "lists/c1/pending_delete/status",
            serde_json::json!({"pending": true, "remaining_seconds": 12}),
        );

        let mut tracker = DeletionTracker::new();
        tracker.begin("c1", 20, false, gateway(&fake), TICK);
        assert!(!tracker.pending("c1").unwrap().server_confirmed);

        tracker.update_remaining("c1", 12);
        let pending = tracker.pending("c1").unwrap();
        assert_eq!(pending.remaining_seconds, 12);
        assert!(pending.server_confirmed);
    }
}
