//! The board: category store, reversion timers and the click policy
//!
//! All mutable state sits behind one mutex. User actions and timer
//! callbacks each take the lock once, so every transition checks the
//! item's tag and applies the move without anything else interleaving.

use crate::{
    BoardConfig, BoardError, BoardMetrics, BoardSnapshot, CategoryStore, Classifier,
    ReversionScheduler,
};
use bucketeer_domain::{Category, Item, ItemId, Rejection, SeedProvider, TransitionResult};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;

struct BoardState {
    this: Weak<Mutex<BoardState>>,
    config: BoardConfig,
    classifier: Classifier,
    store: CategoryStore,
    scheduler: ReversionScheduler,
    metrics: BoardMetrics,
    updates: watch::Sender<BoardSnapshot>,
    closed: bool,
}

impl BoardState {
    fn move_from_main(&mut self, id: ItemId) -> TransitionResult {
        let result = self.try_move_from_main(id);
        self.settle(result)
    }

    fn try_move_from_main(&mut self, id: ItemId) -> TransitionResult {
        if self.closed {
            return Err(Rejection::Closed);
        }

        let item = self.store.item(id).ok_or(Rejection::UnknownItem(id))?;
        let current = self.store.category_of(id).ok_or(Rejection::UnknownItem(id))?;
        if !current.is_main() {
            return Err(Rejection::WrongSource {
                item: id,
                expected: Category::Main,
                actual: current,
            });
        }

        let destination = self
            .classifier
            .classify(item)
            .ok_or_else(|| Rejection::NotEligible {
                item: id,
                kind: item.kind.clone(),
            })?;

        let transition = self.store.move_from_main(id, destination)?;

        let board = self.this.clone();
        let armed = self.scheduler.arm(
            id,
            destination,
            self.config.revert_delay(),
            move |episode| fire(&board, id, episode),
        );
        if armed.superseded {
            self.metrics.record_supersession();
        }
        self.metrics.record_entry(destination);

        tracing::info!(
            "Moved {} from {} to {} (reverts in {:?})",
            self.display_name(id),
            transition.from,
            transition.to,
            self.config.revert_delay()
        );

        Ok(transition)
    }

    fn move_to_main(&mut self, id: ItemId, source: Category) -> TransitionResult {
        let result = self.try_move_to_main(id, source);
        self.settle(result)
    }

    fn try_move_to_main(&mut self, id: ItemId, source: Category) -> TransitionResult {
        if self.closed {
            return Err(Rejection::Closed);
        }

        let transition = self.store.move_to_main(id, source)?;
        self.scheduler.cancel(id);
        self.metrics.record_manual(source);

        tracing::info!(
            "Moved {} back to main from {} by hand",
            self.display_name(id),
            source
        );

        Ok(transition)
    }

    fn activate(&mut self, id: ItemId) -> TransitionResult {
        if self.closed {
            return self.settle(Err(Rejection::Closed));
        }

        match self.store.category_of(id) {
            None => self.settle(Err(Rejection::UnknownItem(id))),
            Some(Category::Main) => self.move_from_main(id),
            Some(current) => self.move_to_main(id, current),
        }
    }

    /// Timer path: only the live episode may revert the item
    fn revert_on_timeout(&mut self, id: ItemId, episode: u64) {
        if self.closed {
            return;
        }

        let Some(source) = self.scheduler.claim(id, episode) else {
            tracing::debug!("Ignoring stale timer for {} (episode {})", id, episode);
            return;
        };

        match self.store.move_to_main(id, source) {
            Ok(_) => {
                self.metrics.record_timeout(source);
                tracing::info!(
                    "Reverted {} from {} to main after timeout",
                    self.display_name(id),
                    source
                );
                self.publish();
            }
            Err(rejection) => {
                tracing::debug!("Timer for {} found nothing to do: {}", id, rejection);
            }
        }
    }

    fn close(&mut self) -> usize {
        if self.closed {
            return 0;
        }

        self.closed = true;
        let cancelled = self.scheduler.cancel_all();
        self.metrics.record_teardown(cancelled);
        tracing::info!("Board closed ({} pending timers cancelled)", cancelled);
        cancelled
    }

    /// Publish accepted transitions and count rejected ones
    fn settle(&mut self, result: TransitionResult) -> TransitionResult {
        match &result {
            Ok(_) => self.publish(),
            Err(rejection) => {
                self.metrics.record_rejection();
                tracing::debug!("Rejected transition: {}", rejection);
            }
        }
        result
    }

    fn publish(&self) {
        self.updates.send_replace(self.store.snapshot());
    }

    fn display_name(&self, id: ItemId) -> String {
        self.store
            .item(id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn check_invariants(&self) -> Result<(), String> {
        self.store.check_invariants()?;

        if self.closed {
            if self.scheduler.pending_count() > 0 {
                return Err("closed board still has pending timers".to_string());
            }
            return Ok(());
        }

        for category in Category::ALL {
            for id in self.store.column(category) {
                let pending = self.scheduler.is_pending(*id);
                if category.is_main() && pending {
                    return Err(format!("item {} is in main with a pending timer", id));
                }
                if !category.is_main() && !pending {
                    return Err(format!("item {} is in {} without a timer", id, category));
                }
                if pending && self.scheduler.pending_source(*id) != Some(category) {
                    return Err(format!("timer source for {} disagrees with its tag", id));
                }
            }
        }

        Ok(())
    }
}

fn fire(board: &Weak<Mutex<BoardState>>, id: ItemId, episode: u64) {
    // Board already dropped: nothing left to revert
    let Some(state) = board.upgrade() else {
        return;
    };
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    state.revert_on_timeout(id, episode);
}

/// A three-column board whose side columns drain back to main on a timer
///
/// Items start in main. Activating an item in main moves it to the column
/// its kind maps to and starts a countdown; when the countdown ends, or the
/// item is activated again, it returns to the end of main.
///
/// Dropping the board closes it.
///
/// # Examples
///
/// ```
/// use bucketeer_board::{Board, BoardConfig};
/// use bucketeer_domain::{Category, Item};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let apple = Item::new("Apple", "Fruit");
/// let board = Board::open(BoardConfig::default(), &vec![apple.clone()])?;
///
/// board.activate(apple.id)?;
/// assert_eq!(board.category_of(apple.id), Some(Category::GroupA));
///
/// board.activate(apple.id)?;
/// assert_eq!(board.category_of(apple.id), Some(Category::Main));
/// # Ok(())
/// # }
/// ```
pub struct Board {
    state: Arc<Mutex<BoardState>>,
}

impl Board {
    /// Open a board seeded with the provider's items
    ///
    /// Must be called inside a tokio runtime.
    pub fn open<S>(config: BoardConfig, seed: &S) -> Result<Self, BoardError>
    where
        S: SeedProvider + ?Sized,
        S::Error: Display,
    {
        config.validate()?;

        let items = seed
            .seed_items()
            .map_err(|e| BoardError::Seed(e.to_string()))?;

        let mut store = CategoryStore::new();
        store.seed(items)?;

        let scheduler = ReversionScheduler::new()?;
        let classifier = Classifier::from_config(&config);
        let (updates, _) = watch::channel(store.snapshot());

        tracing::info!(
            "Opened board with {} items (revert delay: {:?})",
            store.len(),
            config.revert_delay()
        );

        let state = Arc::new_cyclic(|this| {
            Mutex::new(BoardState {
                this: this.clone(),
                config,
                classifier,
                store,
                scheduler,
                metrics: BoardMetrics::new(),
                updates,
                closed: false,
            })
        });

        Ok(Self { state })
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move an item out of main into the column its kind maps to
    pub fn move_from_main(&self, id: ItemId) -> TransitionResult {
        self.lock().move_from_main(id)
    }

    /// Move an item back to main from `source`, cancelling its timer
    pub fn move_to_main(&self, id: ItemId, source: Category) -> TransitionResult {
        self.lock().move_to_main(id, source)
    }

    /// Click policy: leave main if in main, otherwise go back
    pub fn activate(&self, id: ItemId) -> TransitionResult {
        self.lock().activate(id)
    }

    /// Cancel all timers and reject everything from now on
    ///
    /// Returns the number of timers that were still pending. Closing twice
    /// is harmless.
    pub fn close(&self) -> usize {
        self.lock().close()
    }

    /// True once [`close`](Self::close) has run
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Copy of the three columns
    pub fn snapshot(&self) -> BoardSnapshot {
        self.lock().store.snapshot()
    }

    /// Receiver that sees a fresh snapshot after every change
    ///
    /// Includes changes made by timers, so a presentation layer can
    /// re-render without polling.
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.lock().updates.subscribe()
    }

    /// Column currently holding an item
    pub fn category_of(&self, id: ItemId) -> Option<Category> {
        self.lock().store.category_of(id)
    }

    /// Look up an item by id, name (case-insensitive) or short id
    pub fn find(&self, needle: &str) -> Option<Item> {
        self.lock().store.find(needle).cloned()
    }

    /// Look up an item by name, ignoring case
    pub fn item_by_name(&self, name: &str) -> Option<Item> {
        let state = self.lock();
        Category::ALL
            .into_iter()
            .flat_map(|category| state.store.column(category).iter())
            .filter_map(|id| state.store.item(*id))
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Copy of the current metrics
    pub fn metrics(&self) -> BoardMetrics {
        self.lock().metrics.clone()
    }

    /// Number of items waiting to revert
    pub fn pending_timers(&self) -> usize {
        self.lock().scheduler.pending_count()
    }

    /// True if the item has a pending reversion timer
    pub fn is_pending(&self, id: ItemId) -> bool {
        self.lock().scheduler.is_pending(id)
    }

    /// Configuration the board was opened with
    pub fn config(&self) -> BoardConfig {
        self.lock().config.clone()
    }

    /// Verify the store invariants and that timers exist exactly for
    /// items outside main
    pub fn check_invariants(&self) -> Result<(), String> {
        self.lock().check_invariants()
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        self.lock().close();
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Board")
            .field("items", &state.store.len())
            .field("pending_timers", &state.scheduler.pending_count())
            .field("closed", &state.closed)
            .finish()
    }
}
