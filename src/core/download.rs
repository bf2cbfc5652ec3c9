//! Saving a copy of a document resource

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("resource not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to save {}: {source}", .dest.display())]
    Copy {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("file name pattern is valid")
    })
}

/// File name offered in the save dialog, derived from the title
pub fn suggested_file_name(title: &str) -> String {
    let cleaned = invalid_chars().replace_all(title, "_");
    let stem = cleaned.trim().trim_end_matches('.');
    if stem.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{}.pdf", stem)
    }
}

/// Copy `source` to `dest`, returning the number of bytes written
pub fn save_copy(source: &Path, dest: &Path) -> Result<u64, DownloadError> {
    if !source.is_file() {
        return Err(DownloadError::Missing(source.to_path_buf()));
    }
    let bytes = std::fs::copy(source, dest).map_err(|source| DownloadError::Copy {
        dest: dest.to_path_buf(),
        source,
    })?;
    tracing::info!("Saved {} ({} bytes)", dest.display(), bytes);
    Ok(bytes)
}
