//! Item module - the things that move between columns on a board

use std::fmt;

/// Unique identifier for a board item based on UUIDv7
///
/// Identity is the only thing the board keys on. Names and kinds are
/// display data and may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u128);

impl ItemId {
    /// Generate a new UUIDv7-based ItemId
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketeer_domain::ItemId;
    ///
    /// let id = ItemId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an ItemId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an ItemId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketeer_domain::ItemId;
    ///
    /// let id = ItemId::new();
    /// let parsed = ItemId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid item id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Last eight hex digits, enough to tell items apart on screen
    ///
    /// The leading digits of a UUIDv7 are a timestamp and repeat across
    /// ids created in the same millisecond, so the random tail is used.
    pub fn short(&self) -> String {
        let full = self.to_string();
        full[full.len() - 8..].to_string()
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A board item
///
/// `kind` carries the item's type label ("Fruit", "Vegetable", ...). The
/// label is open-ended; only the board's classifier decides which kinds
/// may leave the main column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Type label used for classification
    pub kind: String,

    /// Optional completion flag, carried through untouched
    pub done: Option<bool>,
}

impl Item {
    /// Create a new item with a fresh id
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::with_id(ItemId::new(), name, kind)
    }

    /// Create an item with a known id
    pub fn with_id(id: ItemId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            done: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_ordering() {
        let id1 = ItemId::from_value(1000);
        let id2 = ItemId::from_value(2000);

        assert!(id1 < id2);
    }

    #[test]
    fn test_item_id_display_and_parse() {
        let id = ItemId::new();
        let id_str = id.to_string();

        assert_eq!(id_str.len(), 36);
        assert_eq!(ItemId::from_string(&id_str).unwrap(), id);
        assert_eq!(id.short(), id_str[28..]);
    }

    #[test]
    fn test_item_id_invalid_string() {
        assert!(ItemId::from_string("not-an-id").is_err());
        assert!(ItemId::from_string("").is_err());
    }

    #[test]
    fn test_item_identity_is_id() {
        let a = Item::new("Apple", "Fruit");
        let b = Item::new("Apple", "Fruit");

        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
        assert_eq!(a.done, None);
    }
}
