//! Bucketeer Board
//!
//! A three-column board where items leave the main column for a side column
//! picked by their kind, then drift back to main after a fixed delay.
//!
//! # Overview
//!
//! The board is made of:
//! - **Classifier**: maps an item's kind to `GroupA`, `GroupB`, or nothing
//! - **Category store**: the three ordered columns plus the per-item tag
//! - **Reversion scheduler**: one tokio timer per item outside main
//! - **Board**: the facade tying them together under a single lock
//!
//! # State Machine
//!
//! | From | Trigger | To | Side effect |
//! |------|---------|----|-------------|
//! | Main | activate, kind matches A | GroupA | arm timer |
//! | Main | activate, kind matches B | GroupB | arm timer |
//! | GroupA / GroupB | timer fires, tag unchanged | Main | none |
//! | GroupA / GroupB | activate | Main | cancel timer |
//! | Main | activate, kind matches neither | Main | rejected |
//!
//! Stale triggers (a double click, a timer that lost a race with a click)
//! come back as [`Rejection`](bucketeer_domain::Rejection) values and
//! leave the board untouched.
//!
//! # Usage
//!
//! ```no_run
//! use bucketeer_board::{seed::DefaultSeed, Board, BoardConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let board = Board::open(BoardConfig::default(), &DefaultSeed)?;
//!     let apple = board.item_by_name("apple").ok_or("no apple")?;
//!     board.activate(apple.id)?;
//!
//!     let mut updates = board.subscribe();
//!
//!     // Five seconds later the apple is back in main
//!     updates.changed().await?;
//!     println!("{:?}", updates.borrow().main);
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! revert_delay_ms = 5000
//! group_a_kind = "Fruit"
//! group_b_kind = "Vegetable"
//! main_label = "All Items"
//! group_a_label = "Fruits"
//! group_b_label = "Vegetables"
//! ```

#![warn(missing_docs)]

mod board;
mod classifier;
mod config;
mod error;
mod metrics;
mod scheduler;
pub mod seed;
mod store;

pub use board::Board;
pub use classifier::Classifier;
pub use config::BoardConfig;
pub use error::BoardError;
pub use metrics::BoardMetrics;
pub use scheduler::{Armed, ReversionScheduler};
pub use store::{BoardSnapshot, CategoryStore};
