//! Decides which side column, if any, an item may move to

use crate::BoardConfig;
use bucketeer_domain::{Category, Item};

/// Maps an item's kind to its fixed destination column
///
/// Both rules are exact, case-sensitive matches on the kind label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    group_a_kind: String,
    group_b_kind: String,
}

impl Classifier {
    /// Create a classifier from the two kind labels
    pub fn new(group_a_kind: impl Into<String>, group_b_kind: impl Into<String>) -> Self {
        Self {
            group_a_kind: group_a_kind.into(),
            group_b_kind: group_b_kind.into(),
        }
    }

    /// Build the classifier described by a board configuration
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.group_a_kind.clone(), config.group_b_kind.clone())
    }

    /// Destination for an item, or `None` if it must stay in main
    pub fn classify(&self, item: &Item) -> Option<Category> {
        self.classify_kind(&item.kind)
    }

    /// Destination for a bare kind label
    pub fn classify_kind(&self, kind: &str) -> Option<Category> {
        if kind == self.group_a_kind {
            Some(Category::GroupA)
        } else if kind == self.group_b_kind {
            Some(Category::GroupB)
        } else {
            None
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}
