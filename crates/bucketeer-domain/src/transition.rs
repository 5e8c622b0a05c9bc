//! Transition module - the outcome of asking an item to change column
//!
//! A declined transition is routine (double clicks, a timer that lost the
//! race to a manual click), so it is returned as a value rather than
//! raised as an error.

use crate::{Category, ItemId};
use std::fmt;

/// An accepted move of one item between two columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Item that moved
    pub item: ItemId,

    /// Column it left
    pub from: Category,

    /// Column it joined
    pub to: Category,
}

impl Transition {
    /// True when the item went back to the main column
    pub fn is_reversion(&self) -> bool {
        self.to.is_main()
    }
}

/// Why a transition was declined
///
/// In every case the board is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No item with this id was ever seeded
    UnknownItem(ItemId),

    /// The item's kind matches neither classification rule
    NotEligible {
        /// Item that was asked to move
        item: ItemId,
        /// Its kind label
        kind: String,
    },

    /// The item is not in the column the caller expected
    WrongSource {
        /// Item that was asked to move
        item: ItemId,
        /// Column the caller expected it in
        expected: Category,
        /// Column it is actually in
        actual: Category,
    },

    /// The item is already in the main column, so there is nothing to revert
    AlreadyInMain(ItemId),

    /// The board has been closed
    Closed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownItem(id) => write!(f, "unknown item {}", id),
            Rejection::NotEligible { item, kind } => {
                write!(f, "item {} of kind '{}' cannot leave main", item, kind)
            }
            Rejection::WrongSource {
                item,
                expected,
                actual,
            } => write!(f, "item {} is in {}, not {}", item, actual, expected),
            Rejection::AlreadyInMain(id) => write!(f, "item {} is already in main", id),
            Rejection::Closed => write!(f, "board is closed"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Result of a transition request
pub type TransitionResult = Result<Transition, Rejection>;
