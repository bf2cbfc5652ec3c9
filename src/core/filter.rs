//! Search and category filtering over the catalog

use super::catalog::{Category, DocumentRecord};

/// Category selector from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Resources",
            Self::Only(category) => category.label(),
        }
    }

    /// Lowercase id used in notices ("all", "notes", ...)
    pub fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.id(),
        }
    }
}

/// The two user inputs that drive the catalog view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    /// Reset both inputs to their defaults
    pub fn clear(&mut self) {
        self.query.clear();
        self.category = CategoryFilter::All;
    }

    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.category == CategoryFilter::All
    }

    pub fn apply<'a>(&self, records: &'a [DocumentRecord]) -> Vec<&'a DocumentRecord> {
        filter(records, &self.query, self.category)
    }

    /// Result line for the catalog header. Mentions the query whenever
    /// it takes part in filtering, whitespace included.
    pub fn summary(&self, found: usize) -> String {
        if self.query.is_empty() {
            format!("{} documents found", found)
        } else {
            format!("{} documents found for \"{}\"", found, self.query)
        }
    }
}

/// Records matching both the category selector and the search query,
/// in catalog order.
pub fn filter<'a>(
    records: &'a [DocumentRecord],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a DocumentRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| category.matches(record.category))
        .filter(|record| needle.is_empty() || matches_query(record, &needle))
        .collect()
}

/// Case-insensitive substring match on title, description or any tag.
/// `needle` must already be lowercase.
fn matches_query(record: &DocumentRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
