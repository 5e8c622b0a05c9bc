//! Category store: the three ordered columns and the authoritative tags
//!
//! Every item lives in exactly one column, and its tag always names that
//! column. Both facts change together, only inside [`CategoryStore::move_from_main`]
//! and [`CategoryStore::move_to_main`].

use crate::BoardError;
use bucketeer_domain::{Category, Item, ItemId, Rejection, Transition, TransitionResult};
use std::collections::{HashMap, HashSet};

/// Owned copy of the three columns, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Items in the main column
    pub main: Vec<Item>,

    /// Items in the `GroupA` column, in arrival order
    pub group_a: Vec<Item>,

    /// Items in the `GroupB` column, in arrival order
    pub group_b: Vec<Item>,
}

impl BoardSnapshot {
    /// Items in one column
    pub fn column(&self, category: Category) -> &[Item] {
        match category {
            Category::Main => &self.main,
            Category::GroupA => &self.group_a,
            Category::GroupB => &self.group_b,
        }
    }

    /// True if the column holds the item
    pub fn contains(&self, category: Category, id: ItemId) -> bool {
        self.column(category).iter().any(|item| item.id == id)
    }

    /// Column holding the item, if any
    pub fn locate(&self, id: ItemId) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.contains(*category, id))
    }

    /// Total number of items across all columns
    pub fn len(&self) -> usize {
        self.main.len() + self.group_a.len() + self.group_b.len()
    }

    /// True if the board has no items at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds the columns and the per-item tag map
#[derive(Debug, Default)]
pub struct CategoryStore {
    items: HashMap<ItemId, Item>,
    tags: HashMap<ItemId, Category>,
    main: Vec<ItemId>,
    group_a: Vec<ItemId>,
    group_b: Vec<ItemId>,
}

impl CategoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Place items in the main column, in the given order
    ///
    /// Fails without changing anything if an id repeats, either inside
    /// `items` or against an item already seeded.
    pub fn seed(&mut self, items: Vec<Item>) -> Result<(), BoardError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if self.items.contains_key(&item.id) || !seen.insert(item.id) {
                return Err(BoardError::DuplicateItem(item.id));
            }
        }

        for item in items {
            self.tags.insert(item.id, Category::Main);
            self.main.push(item.id);
            self.items.insert(item.id, item);
        }

        Ok(())
    }

    /// Move an item out of main into `destination`
    ///
    /// Declined unless the item is currently tagged `Main`.
    pub fn move_from_main(&mut self, id: ItemId, destination: Category) -> TransitionResult {
        let current = self.category_of(id).ok_or(Rejection::UnknownItem(id))?;

        if !current.is_main() {
            return Err(Rejection::WrongSource {
                item: id,
                expected: Category::Main,
                actual: current,
            });
        }

        if destination.is_main() {
            return Err(Rejection::AlreadyInMain(id));
        }

        self.relocate(id, Category::Main, destination);
        Ok(Transition {
            item: id,
            from: Category::Main,
            to: destination,
        })
    }

    /// Move an item from `source` back to main
    ///
    /// Declined unless the item is currently tagged `source`.
    pub fn move_to_main(&mut self, id: ItemId, source: Category) -> TransitionResult {
        let current = self.category_of(id).ok_or(Rejection::UnknownItem(id))?;

        if current.is_main() {
            return Err(Rejection::AlreadyInMain(id));
        }

        if current != source {
            return Err(Rejection::WrongSource {
                item: id,
                expected: source,
                actual: current,
            });
        }

        self.relocate(id, source, Category::Main);
        Ok(Transition {
            item: id,
            from: source,
            to: Category::Main,
        })
    }

    /// Current column of an item
    pub fn category_of(&self, id: ItemId) -> Option<Category> {
        self.tags.get(&id).copied()
    }

    /// Look up an item by id
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Find an item by full id, short id, or case-insensitive name
    ///
    /// Names are not unique; the first match in column order wins.
    pub fn find(&self, needle: &str) -> Option<&Item> {
        if let Ok(id) = ItemId::from_string(needle) {
            return self.items.get(&id);
        }

        let lowered = needle.to_lowercase();
        let ordered = self.main.iter().chain(&self.group_a).chain(&self.group_b);

        ordered
            .clone()
            .filter_map(|id| self.items.get(id))
            .find(|item| item.name.to_lowercase() == lowered)
            .or_else(|| {
                ordered
                    .filter_map(|id| self.items.get(id))
                    .find(|item| item.id.short() == lowered)
            })
    }

    /// Ids in one column, in order
    pub fn column(&self, category: Category) -> &[ItemId] {
        match category {
            Category::Main => &self.main,
            Category::GroupA => &self.group_a,
            Category::GroupB => &self.group_b,
        }
    }

    /// Items in one column, in order
    pub fn items_in(&self, category: Category) -> Vec<Item> {
        self.column(category)
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect()
    }

    /// Copy all three columns
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            main: self.items_in(Category::Main),
            group_a: self.items_in(Category::GroupA),
            group_b: self.items_in(Category::GroupB),
        }
    }

    /// Number of items in the store
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing has been seeded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Verify every item is in exactly one column and its tag agrees
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut placed: HashMap<ItemId, Category> = HashMap::with_capacity(self.items.len());

        for category in Category::ALL {
            for id in self.column(category) {
                if let Some(previous) = placed.insert(*id, category) {
                    return Err(format!("item {} is in both {} and {}", id, previous, category));
                }
            }
        }

        for id in self.items.keys() {
            let column = placed
                .get(id)
                .ok_or_else(|| format!("item {} is in no column", id))?;
            let tag = self
                .tags
                .get(id)
                .ok_or_else(|| format!("item {} has no tag", id))?;
            if column != tag {
                return Err(format!("item {} is tagged {} but sits in {}", id, tag, column));
            }
        }

        if placed.len() != self.items.len() || self.tags.len() != self.items.len() {
            return Err("columns or tags reference unknown items".to_string());
        }

        Ok(())
    }

    fn column_mut(&mut self, category: Category) -> &mut Vec<ItemId> {
        match category {
            Category::Main => &mut self.main,
            Category::GroupA => &mut self.group_a,
            Category::GroupB => &mut self.group_b,
        }
    }

    // Callers have already checked the tag equals `from`.
    fn relocate(&mut self, id: ItemId, from: Category, to: Category) {
        let source = self.column_mut(from);
        if let Some(position) = source.iter().position(|x| *x == id) {
            source.remove(position);
        }
        self.column_mut(to).push(id);
        self.tags.insert(id, to);
    }
}
