//! Last-request-wins bookkeeping for async loads and debounced searches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out tickets; only the most recent one stays current.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

#[derive(Clone, Debug)]
pub struct Ticket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { id, latest: self.latest.clone() }
    }

    /// Invalidate all outstanding tickets without starting a new request.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let seq = RequestSequencer::new();
        let first = seq.begin();
        assert!(first.is_current());
        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_cancel_invalidates_everything() {
        let seq = RequestSequencer::new();
        let ticket = seq.begin();
        seq.cancel();
        assert!(!ticket.is_current());
        assert!(seq.begin().is_current());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let seq = RequestSequencer::new();
        let handle = seq.clone();
        let ticket = seq.begin();
        handle.begin();
        assert!(!ticket.is_current());
    }
}
