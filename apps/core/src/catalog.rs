//! Content Catalog - immutable, in-memory collection of content items.
//!
//! Loaded once at startup (from a JSON file or the embedded default) and
//! shared read-only behind an `Arc`. Lowercased search fields are
//! precomputed so queries never re-normalize the catalog.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::models::ContentItem;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Lowercased view of one item, used by relevance search.
#[derive(Debug, Clone)]
pub(crate) struct ItemIndex {
    pub title: String,
    pub description: String,
    pub category: String,
    pub keywords: Vec<String>,
}

impl ItemIndex {
    fn new(item: &ContentItem) -> Self {
        Self {
            title: item.title.to_lowercase(),
            description: item
                .description
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default(),
            category: item.category.to_lowercase(),
            keywords: item.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// The content catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ContentItem>,
    index: Vec<ItemIndex>,
}

impl Catalog {
    /// Builds a catalog, validating every item and rejecting duplicate ids.
    pub fn new(items: Vec<ContentItem>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "duplicate content id '{}'",
                    item.id
                )));
            }
        }

        let index = items.iter().map(ItemIndex::new).collect();
        Ok(Self { items, index })
    }

    /// Parses a JSON array of content items.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let items: Vec<ContentItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Loads a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items whose category equals `category`, ignoring case, in catalog order.
    pub fn in_category(&self, category: &str) -> Vec<&ContentItem> {
        let category = category.to_lowercase();
        self.indexed()
            .filter(|(_, idx)| idx.category == category)
            .map(|(item, _)| item)
            .collect()
    }

    pub(crate) fn indexed(&self) -> impl Iterator<Item = (&ContentItem, &ItemIndex)> {
        self.items.iter().zip(self.index.iter())
    }
}
