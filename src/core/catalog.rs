//! Document catalog: the fixed set of study documents shown on the home page

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog bundled with the application
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Closed classification of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Notes,
    Pyqs,
    Placement,
    Resources,
    /// Anything a catalog file names that is not in the closed set
    #[serde(other)]
    Uncategorized,
}

impl Category {
    /// Categories offered by the filter bar, in display order
    pub const SELECTABLE: [Category; 4] = [
        Category::Notes,
        Category::Pyqs,
        Category::Placement,
        Category::Resources,
    ];

    /// Identifier used in catalog files
    pub fn id(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Pyqs => "pyqs",
            Self::Placement => "placement",
            Self::Resources => "resources",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// Human readable label for navigation buttons
    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Pyqs => "PYQs",
            Self::Placement => "Placement",
            Self::Resources => "Resources",
            Self::Uncategorized => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub upload_date: NaiveDate,
    pub file_size: String,
    pub download_count: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    /// File name of the PDF inside the library directory
    pub file: String,
    #[serde(default)]
    pub thumbnail: Option<PathBuf>,
}

impl DocumentRecord {
    /// Number of tags shown on a card before collapsing into "+N more"
    pub const VISIBLE_TAGS: usize = 3;

    /// Tags shown on the card
    pub fn visible_tags(&self) -> &[String] {
        let end = self.tags.len().min(Self::VISIBLE_TAGS);
        &self.tags[..end]
    }

    /// Count of tags hidden behind the "+N more" marker
    pub fn hidden_tag_count(&self) -> usize {
        self.tags.len().saturating_sub(Self::VISIBLE_TAGS)
    }
}

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate document id '{0}'")]
    DuplicateId(String),
}

/// Immutable, ordered collection of documents
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<DocumentRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(records: Vec<DocumentRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON array of records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<DocumentRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a catalog override from disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, title: &str, category: Category, tags: &[&str]) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("Description of {}", title),
            category,
            upload_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            file_size: "1.0 MB".to_string(),
            download_count: 10,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            file: format!("{}.pdf", id),
            thumbnail: None,
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 12);

        let dsa = catalog.get("1").unwrap();
        assert_eq!(dsa.title, "Data Structures and Algorithms - Complete Notes");
        assert_eq!(dsa.category, Category::Notes);
        assert_eq!(dsa.upload_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let json = r#"[{
            "id": "x", "title": "T", "description": "D", "category": "videos",
            "uploadDate": "2024-02-02", "fileSize": "1 MB", "downloadCount": 0,
            "file": "x.pdf"
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.records()[0].category, Category::Uncategorized);
        assert!(catalog.records()[0].tags.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records = vec![
            record("a", "First", Category::Notes, &[]),
            record("a", "Second", Category::Pyqs, &[]),
        ];
        assert!(matches!(Catalog::new(records), Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_visible_tags_truncate_to_three() {
        let doc = record("t", "Tagged", Category::Notes, &["a", "b", "c", "d", "e"]);
        assert_eq!(doc.visible_tags(), ["a", "b", "c"]);
        assert_eq!(doc.hidden_tag_count(), 2);

        let short = record("s", "Short", Category::Notes, &["only"]);
        assert_eq!(short.visible_tags().len(), 1);
        assert_eq!(short.hidden_tag_count(), 0);
    }

    #[test]
    fn test_missing_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
