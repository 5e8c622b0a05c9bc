//! Seed data for a board

use crate::BoardError;
use bucketeer_domain::{Item, SeedProvider};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const PRODUCE: &[(&str, &str)] = &[
    ("Apple", "Fruit"),
    ("Broccoli", "Vegetable"),
    ("Mushroom", "Vegetable"),
    ("Banana", "Fruit"),
    ("Tomato", "Vegetable"),
    ("Orange", "Fruit"),
    ("Mango", "Fruit"),
    ("Pineapple", "Fruit"),
    ("Cucumber", "Vegetable"),
    ("Watermelon", "Fruit"),
    ("Carrot", "Vegetable"),
];

/// The built-in produce list, each item with a fresh id
pub fn default_items() -> Vec<Item> {
    PRODUCE
        .iter()
        .map(|(name, kind)| Item::new(*name, *kind))
        .collect()
}

#[derive(Debug, Deserialize)]
struct SeedEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

/// Parse a seed list of the form `[{"type": "Fruit", "name": "Apple"}, ...]`
pub fn from_json(json: &str) -> Result<Vec<Item>, BoardError> {
    let entries: Vec<SeedEntry> = serde_json::from_str(json)?;

    entries
        .into_iter()
        .map(|entry| {
            if entry.name.trim().is_empty() {
                return Err(BoardError::Seed("seed entry has an empty name".to_string()));
            }
            Ok(Item::new(entry.name, entry.kind))
        })
        .collect()
}

/// Seeds a board with [`default_items`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeed;

impl SeedProvider for DefaultSeed {
    type Error = std::convert::Infallible;

    fn seed_items(&self) -> Result<Vec<Item>, Self::Error> {
        Ok(default_items())
    }
}

/// Seeds a board from a JSON file read at open time
#[derive(Debug, Clone)]
pub struct JsonSeed {
    path: PathBuf,
}

impl JsonSeed {
    /// Seed from the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SeedProvider for JsonSeed {
    type Error = BoardError;

    fn seed_items(&self) -> Result<Vec<Item>, Self::Error> {
        let contents = std::fs::read_to_string(&self.path)?;
        from_json(&contents)
    }
}
