//! Category module - which column currently owns an item

use std::fmt;

/// Column an item currently belongs to
///
/// Items start in `Main`. An eligible item leaves for `GroupA` or `GroupB`
/// and always comes back to `Main`, either on timeout or by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// The shared starting column
    Main,

    /// First side column (rule A matches)
    GroupA,

    /// Second side column (rule B matches)
    GroupB,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 3] = [Category::Main, Category::GroupA, Category::GroupB];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Main => "main",
            Category::GroupA => "group-a",
            Category::GroupB => "group-b",
        }
    }

    /// Parse a category from a string
    ///
    /// Accepts the canonical names plus `a`/`b` shorthands.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "main" => Some(Category::Main),
            "group-a" | "groupa" | "a" => Some(Category::GroupA),
            "group-b" | "groupb" | "b" => Some(Category::GroupB),
            _ => None,
        }
    }

    /// True for the starting column
    pub fn is_main(&self) -> bool {
        matches!(self, Category::Main)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
