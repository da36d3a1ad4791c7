//! Monotonically increasing request sequence. A superseded async request is
//! not cancelled; its result is simply discarded when it resolves with a
//! stale token, so the latest request always wins.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        RequestSequence::default()
    }

    /// Start a new request and get its token. Any earlier token becomes
    /// stale immediately.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}
