//! Loading previewed PDF resources off the UI thread

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Page size used when a page carries no usable MediaBox (US Letter)
pub const DEFAULT_PAGE_SIZE: PageSize = PageSize {
    width_pt: 612.0,
    height_pt: 792.0,
};

/// How far up the page tree an inherited MediaBox is looked for
const MAX_INHERIT_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

/// What the viewer knows about one page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePreview {
    pub size: PageSize,
    /// Extracted text; empty when the page has none or extraction failed
    pub text: String,
}

/// A successfully loaded document
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPreview {
    pages: Vec<PagePreview>,
}

impl PdfPreview {
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Page by 1-based number
    pub fn page(&self, number: u32) -> Option<&PagePreview> {
        let index = number.checked_sub(1)? as usize;
        self.pages.get(index)
    }
}

/// Why a previewed resource could not be shown
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a readable PDF: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("encrypted PDFs are not supported")]
    Encrypted,
    #[error("document has no pages")]
    NoPages,
    #[error("loader stopped before the document was read")]
    Interrupted,
}

/// Parse PDF bytes into a preview
pub fn parse_preview(bytes: &[u8]) -> Result<PdfPreview, ResourceError> {
    let doc = Document::load_mem(bytes)?;
    ensure_unencrypted(&doc)?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ResourceError::NoPages);
    }

    let pages = pages
        .iter()
        .map(|(&number, &object_id)| {
            let size = media_box(&doc, object_id).unwrap_or(DEFAULT_PAGE_SIZE);
            let text = match doc.extract_text(&[number]) {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    tracing::debug!("No text for page {}: {}", number, e);
                    String::new()
                }
            };
            PagePreview { size, text }
        })
        .collect();

    Ok(PdfPreview { pages })
}

/// Reject documents whose trailer carries an `/Encrypt` dictionary
fn ensure_unencrypted(doc: &Document) -> Result<(), ResourceError> {
    if doc.is_encrypted() {
        return Err(ResourceError::Encrypted);
    }
    Ok(())
}

/// MediaBox of a page, following `/Parent` for inherited values
fn media_box(doc: &Document, page_id: ObjectId) -> Option<PageSize> {
    let mut node = page_id;
    for _ in 0..MAX_INHERIT_DEPTH {
        let dict = doc.get_dictionary(node).ok()?;
        if let Ok(object) = dict.get(b"MediaBox") {
            return parse_rect(doc, object);
        }
        node = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

fn parse_rect(doc: &Document, object: &Object) -> Option<PageSize> {
    let (_, object) = doc.dereference(object).ok()?;
    let array = object.as_array().ok()?;
    if array.len() != 4 {
        return None;
    }
    let x0 = array[0].as_float().ok()?;
    let y0 = array[1].as_float().ok()?;
    let x1 = array[2].as_float().ok()?;
    let y1 = array[3].as_float().ok()?;
    let size = PageSize {
        width_pt: (x1 - x0).abs(),
        height_pt: (y1 - y0).abs(),
    };
    (size.width_pt > 0.0 && size.height_pt > 0.0).then_some(size)
}

/// Runs document loads on a small background runtime
pub struct ResourceLoader {
    runtime: Runtime,
}

impl ResourceLoader {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("resource-loader")
            .build()
            .context("Failed to start resource loader runtime")?;
        Ok(Self { runtime })
    }

    /// Start loading `path`. `on_ready` runs on the loader thread once a
    /// result has been delivered to a still-live [`PendingLoad`].
    pub fn load<F>(&self, path: PathBuf, on_ready: F) -> PendingLoad
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task_path = path.clone();

        self.runtime.spawn(async move {
            let result = read_preview(task_path).await;
            if tx.send(result).is_err() {
                tracing::debug!("Viewer closed before load finished, result discarded");
                return;
            }
            on_ready();
        });

        tracing::info!("Loading resource: {}", path.display());
        PendingLoad { path, rx }
    }
}

async fn read_preview(path: PathBuf) -> Result<PdfPreview, ResourceError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| ResourceError::Read { path, source })?;

    tokio::task::spawn_blocking(move || parse_preview(&bytes))
        .await
        .map_err(|_| ResourceError::Interrupted)?
}

/// Handle to an in-flight load. Dropping it discards the result.
pub struct PendingLoad {
    path: PathBuf,
    rx: oneshot::Receiver<Result<PdfPreview, ResourceError>>,
}

impl PendingLoad {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking check for the result
    pub fn poll(&mut self) -> Option<Result<PdfPreview, ResourceError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(ResourceError::Interrupted)),
        }
    }

    #[cfg(test)]
    pub fn wait(self) -> Result<PdfPreview, ResourceError> {
        self.rx
            .blocking_recv()
            .unwrap_or(Err(ResourceError::Interrupted))
    }
}
