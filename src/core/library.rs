//! Library directory holding the PDF resources referenced by the catalog

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

/// Maximum directory depth searched for resources
const MAX_DEPTH: usize = 6;

/// File-name index over the library directory
#[derive(Debug, Clone, Default)]
pub struct Library {
    root: PathBuf,
    index: HashMap<String, PathBuf>,
}

impl Library {
    /// Scan `root` for PDF files. A missing directory gives an empty index.
    pub fn scan(root: &Path) -> Self {
        let mut index = HashMap::new();

        for path in get_pdf_files(root) {
            let Some(name) = path.file_name().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            // First match wins; sorted walk keeps this stable
            index.entry(name).or_insert(path);
        }

        tracing::info!("Indexed {} resources under {}", index.len(), root.display());
        Self {
            root: root.to_path_buf(),
            index,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Where the resource named `file` lives. Unindexed names resolve
    /// directly under the root so the load error names a real path.
    /// Anything but a bare file name is refused.
    pub fn resolve(&self, file: &str) -> Option<PathBuf> {
        if !is_bare_file_name(file) {
            tracing::warn!("Refusing resource name '{}'", file);
            return None;
        }
        Some(
            self.index
                .get(file)
                .cloned()
                .unwrap_or_else(|| self.root.join(file)),
        )
    }

    pub fn contains(&self, file: &str) -> bool {
        self.index.contains_key(file)
    }
}

/// A single normal path component with no separators of either style
fn is_bare_file_name(file: &str) -> bool {
    if file.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(file).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// All PDF files below `root`, skipping hidden entries
fn get_pdf_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .max_depth(MAX_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_nested_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("notes/os")).unwrap();
        std::fs::create_dir_all(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("pyqs-sample.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("notes/os/notes-sample.PDF"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("notes/readme.txt"), b"text").unwrap();
        std::fs::write(dir.path().join(".cache/hidden.pdf"), b"%PDF").unwrap();

        let library = Library::scan(dir.path());
        assert_eq!(library.len(), 2);
        assert!(library.contains("pyqs-sample.pdf"));
        assert!(!library.contains("hidden.pdf"));
        assert_eq!(
            library.resolve("notes-sample.PDF"),
            Some(dir.path().join("notes/os/notes-sample.PDF"))
        );
    }

    #[test]
    fn test_unknown_file_resolves_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::scan(dir.path());
        assert_eq!(library.resolve("missing.pdf"), Some(dir.path().join("missing.pdf")));
        assert_eq!(library.root(), dir.path());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::scan(&dir.path().join("nope"));
        assert_eq!(library.len(), 0);
    }

    #[test]
    fn test_names_with_paths_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::scan(dir.path());
        for name in ["../../x.pdf", "notes/x.pdf", "..\\x.pdf", "/etc/x.pdf", "..", ".", ""] {
            assert_eq!(library.resolve(name), None, "{name}");
        }
    }
}
