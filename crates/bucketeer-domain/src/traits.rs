//! Trait definitions for external interactions
//!
//! Implementations live in the crates that own the infrastructure.

use crate::Item;

/// Supplies the initial ordered list of items for a board
///
/// Called once, when a board is opened.
pub trait SeedProvider {
    /// Error type for loading seed items
    type Error;

    /// Load the items, in the order they should appear in the main column
    fn seed_items(&self) -> Result<Vec<Item>, Self::Error>;
}

impl SeedProvider for Vec<Item> {
    type Error = std::convert::Infallible;

    fn seed_items(&self) -> Result<Vec<Item>, Self::Error> {
        Ok(self.clone())
    }
}
