//! Per-key debouncing of mutation intents.
//!
//! Leading-edge: the first intent for a key dispatches immediately and
//! identical repeats inside the window are dropped. Keys combine action
//! and target, so edits to different collections never block each other.

use std::collections::HashMap;

use tokio::time::{Duration, Instant};

use super::intent::DebounceKey;

pub struct Debouncer {
    window: Duration,
    last: HashMap<DebounceKey, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: HashMap::new(),
        }
    }

    /// True if the intent should dispatch; false if an identical intent
    /// already dispatched inside the window.
    pub fn admit(&mut self, key: DebounceKey) -> bool {
        let now = Instant::now();
        let window = self.window;
        self.last.retain(|_, at| now.duration_since(*at) < window);

        if self.last.contains_key(&key) {
            false
        } else {
            self.last.insert(key, now);
            true
        }
    }
}
