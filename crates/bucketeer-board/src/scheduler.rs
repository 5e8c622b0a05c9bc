//! Reversion scheduler: one pending timer per item that left main
//!
//! Each armed timer is a sleeping tokio task. The map below holds at most
//! one live entry per item id; arming again always cancels first, so the
//! newest timer is the only one that can still fire.
//!
//! A task that wakes up must [`claim`](ReversionScheduler::claim) its slot
//! before acting. Claiming fails if the slot was cancelled or re-armed in the
//! meantime, which makes a timer that lost a race with a manual click inert.

use crate::BoardError;
use bucketeer_domain::{Category, ItemId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Outcome of arming a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armed {
    /// Episode number identifying this timer
    pub episode: u64,

    /// True if an older pending timer for the same item was cancelled
    pub superseded: bool,
}

#[derive(Debug)]
struct PendingTimer {
    source: Category,
    episode: u64,
    handle: JoinHandle<()>,
}

/// Owns the pending reversion timers
#[derive(Debug)]
pub struct ReversionScheduler {
    runtime: Handle,
    timers: HashMap<ItemId, PendingTimer>,
    next_episode: u64,
}

impl ReversionScheduler {
    /// Create a scheduler on the current tokio runtime
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Runtime`] when called outside a runtime.
    pub fn new() -> Result<Self, BoardError> {
        let runtime = Handle::try_current().map_err(|e| BoardError::Runtime(e.to_string()))?;
        Ok(Self::with_handle(runtime))
    }

    /// Create a scheduler that spawns its timers on `runtime`
    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            runtime,
            timers: HashMap::new(),
            next_episode: 1,
        }
    }

    /// Schedule `on_fire` to run once after `delay`
    ///
    /// Any timer already pending for `id` is cancelled first. `on_fire`
    /// receives the episode number and is expected to call
    /// [`claim`](Self::claim) with it before doing anything.
    pub fn arm<F>(&mut self, id: ItemId, source: Category, delay: Duration, on_fire: F) -> Armed
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let superseded = self.cancel(id);

        let episode = self.next_episode;
        self.next_episode += 1;

        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(episode);
        });

        tracing::debug!(
            "Armed reversion timer for {} (source: {}, episode: {}, delay: {:?})",
            id,
            source,
            episode,
            delay
        );

        self.timers.insert(
            id,
            PendingTimer {
                source,
                episode,
                handle,
            },
        );

        Armed {
            episode,
            superseded,
        }
    }

    /// Take ownership of a fired timer's slot
    ///
    /// Returns the source captured at arm time if `episode` is still the
    /// live timer for `id`, removing it. Returns `None` for a timer that
    /// was cancelled or superseded.
    pub fn claim(&mut self, id: ItemId, episode: u64) -> Option<Category> {
        match self.timers.get(&id) {
            Some(timer) if timer.episode == episode => {
                self.timers.remove(&id).map(|timer| timer.source)
            }
            _ => None,
        }
    }

    /// Cancel the pending timer for an item, if any
    pub fn cancel(&mut self, id: ItemId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                timer.handle.abort();
                tracing::debug!(
                    "Cancelled reversion timer for {} (episode: {})",
                    id,
                    timer.episode
                );
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer, returning how many there were
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
        if count > 0 {
            tracing::debug!("Cancelled {} pending reversion timers", count);
        }
        count
    }

    /// True if the item has a timer that has not fired yet
    pub fn is_pending(&self, id: ItemId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Source column captured when the item's timer was armed
    pub fn pending_source(&self, id: ItemId) -> Option<Category> {
        self.timers.get(&id).map(|timer| timer.source)
    }

    /// Number of pending timers
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }
}

impl Drop for ReversionScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
        let count = Arc::new(AtomicUsize::new(0));
        let reader = Arc::clone(&count);
        (count, move || reader.load(Ordering::SeqCst))
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = ReversionScheduler::new();
        assert!(matches!(result, Err(BoardError::Runtime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let mut scheduler = ReversionScheduler::new().unwrap();
        let id = ItemId::new();
        let (count, fired) = counter();

        scheduler.arm(id, Category::GroupA, Duration::from_secs(5), move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        assert!(scheduler.is_pending(id));

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(fired(), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_supersedes() {
        let mut scheduler = ReversionScheduler::new().unwrap();
        let id = ItemId::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first_seen = Arc::clone(&seen);
        let first = scheduler.arm(id, Category::GroupA, Duration::from_secs(5), move |ep| {
            first_seen.lock().unwrap().push(ep);
        });
        assert!(!first.superseded);

        tokio::time::sleep(Duration::from_secs(3)).await;

        let second_seen = Arc::clone(&seen);
        let second = scheduler.arm(id, Category::GroupA, Duration::from_secs(5), move |ep| {
            second_seen.lock().unwrap().push(ep);
        });
        assert!(second.superseded);
        assert_eq!(scheduler.pending_count(), 1);

        // The first timer's deadline passes without effect
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(*seen.lock().unwrap(), vec![second.episode]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let mut scheduler = ReversionScheduler::new().unwrap();
        let id = ItemId::new();
        let (count, fired) = counter();

        scheduler.arm(id, Category::GroupB, Duration::from_secs(1), move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.is_pending(id));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let mut scheduler = ReversionScheduler::new().unwrap();
        let (count, fired) = counter();

        for _ in 0..3 {
            let count = Arc::clone(&count);
            scheduler.arm(ItemId::new(), Category::GroupA, Duration::from_secs(1), move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(scheduler.cancel_all(), 3);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.cancel_all(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_only_matches_live_episode() {
        let mut scheduler = ReversionScheduler::new().unwrap();
        let id = ItemId::new();

        let old = scheduler.arm(id, Category::GroupA, Duration::from_secs(5), |_| {});
        let new = scheduler.arm(id, Category::GroupB, Duration::from_secs(5), |_| {});

        assert_eq!(scheduler.claim(id, old.episode), None);
        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.pending_source(id), Some(Category::GroupB));

        assert_eq!(scheduler.claim(id, new.episode), Some(Category::GroupB));
        assert!(!scheduler.is_pending(id));
        assert_eq!(scheduler.claim(id, new.episode), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_everything() {
        let (count, fired) = counter();
        {
            let mut scheduler = ReversionScheduler::new().unwrap();
            scheduler.arm(ItemId::new(), Category::GroupA, Duration::from_secs(1), move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired(), 0);
    }
}
