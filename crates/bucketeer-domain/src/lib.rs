//! Bucketeer Domain Layer
//!
//! Value types shared by every bucketeer crate. Like any domain layer it
//! carries no infrastructure: no async runtime, no I/O, no serialization.
//!
//! ## Key Concepts
//!
//! - **Item**: something on the board, identified by an [`ItemId`]
//! - **Category**: the column that currently owns an item
//!   (`Main`, `GroupA`, `GroupB`)
//! - **Transition**: an accepted move between columns
//! - **Rejection**: a declined move; the board is left untouched
//! - **Episode**: one trip out of `Main` and back again
//!
//! ## Lifecycle
//!
//! | From | Trigger | To |
//! |------|---------|----|
//! | Main | kind matches rule A | GroupA |
//! | Main | kind matches rule B | GroupB |
//! | GroupA / GroupB | timeout or manual click | Main |
//! | Main | kind matches neither | Main (rejected) |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod item;
pub mod traits;
pub mod transition;

// Re-exports for convenience
pub use category::Category;
pub use item::{Item, ItemId};
pub use traits::SeedProvider;
pub use transition::{Rejection, Transition, TransitionResult};
