//! Viewer state machine for the document preview window
//!
//! `Closed → Open(doc, zoom=100, rotation=0, page=1) → Closed`. Every
//! adjustment is clamped; nothing here can fail. Resource loading happens
//! elsewhere and reports back through [`ViewerState::resource_loaded`].

use std::path::PathBuf;

use chrono::NaiveDate;

use super::catalog::{Category, DocumentRecord};
use super::resource::{PdfPreview, ResourceError};
use super::semesters::Material;

/// Zoom level as an integer percentage in `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Zoom(u16);

impl Zoom {
    pub const MIN: Zoom = Zoom(50);
    pub const MAX: Zoom = Zoom(200);
    pub const STEP: u16 = 25;

    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn factor(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn zoomed_in(self) -> Self {
        Zoom((self.0 + Self::STEP).min(Self::MAX.0))
    }

    pub fn zoomed_out(self) -> Self {
        Zoom(self.0.saturating_sub(Self::STEP).max(Self::MIN.0))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom(100)
    }
}

/// Clockwise page rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }

    /// Next quarter turn, wrapping at 360
    pub fn rotated(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Whether width and height trade places on screen
    pub fn is_sideways(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// The parts of a catalog entry or semester material the viewer needs
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerDocument {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub file_size: String,
    pub file: String,
    pub upload_date: Option<NaiveDate>,
}

impl From<&DocumentRecord> for ViewerDocument {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category: record.category,
            file_size: record.file_size.clone(),
            file: record.file.clone(),
            upload_date: Some(record.upload_date),
        }
    }
}

impl From<&Material> for ViewerDocument {
    fn from(material: &Material) -> Self {
        Self {
            id: material.id.clone(),
            title: material.title.clone(),
            category: material.kind,
            file_size: material.file_size.clone(),
            file: material.file.clone(),
            upload_date: None,
        }
    }
}

/// Progress of the resource behind the open document
#[derive(Debug)]
pub enum LoadStatus {
    Loading,
    Ready(PdfPreview),
    Failed(ResourceError),
}

/// Everything shown while the viewer is open
#[derive(Debug)]
pub struct OpenViewer {
    pub document: ViewerDocument,
    /// Resolved location of the resource
    pub source: PathBuf,
    pub zoom: Zoom,
    pub rotation: Rotation,
    pub current_page: u32,
    pub total_pages: u32,
    pub load: LoadStatus,
}

impl OpenViewer {
    fn new(document: ViewerDocument, source: PathBuf) -> Self {
        Self {
            document,
            source,
            zoom: Zoom::default(),
            rotation: Rotation::default(),
            current_page: 1,
            total_pages: 1,
            load: LoadStatus::Loading,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

#[derive(Debug, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(Box<OpenViewer>),
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn current(&self) -> Option<&OpenViewer> {
        match self {
            Self::Open(viewer) => Some(&**viewer),
            Self::Closed => None,
        }
    }

    fn current_mut(&mut self) -> Option<&mut OpenViewer> {
        match self {
            Self::Open(viewer) => Some(&mut **viewer),
            Self::Closed => None,
        }
    }

    /// Open `document` with default controls. Returns `false` (and changes
    /// nothing) when a document is already open.
    pub fn open_document(&mut self, document: ViewerDocument, source: PathBuf) -> bool {
        if let Self::Open(current) = self {
            tracing::debug!(
                "Ignoring open of '{}' while '{}' is showing",
                document.title,
                current.document.title
            );
            return false;
        }
        *self = Self::Open(Box::new(OpenViewer::new(document, source)));
        true
    }

    /// Close the viewer, forgetting every adjustment. No-op when closed.
    pub fn close(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Open(viewer) => {
                tracing::debug!("Closed viewer for '{}'", viewer.document.title);
                true
            }
            Self::Closed => false,
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(viewer) = self.current_mut() {
            viewer.zoom = viewer.zoom.zoomed_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(viewer) = self.current_mut() {
            viewer.zoom = viewer.zoom.zoomed_out();
        }
    }

    pub fn rotate(&mut self) {
        if let Some(viewer) = self.current_mut() {
            viewer.rotation = viewer.rotation.rotated();
        }
    }

    pub fn next_page(&mut self) {
        if let Some(viewer) = self.current_mut() {
            if viewer.current_page < viewer.total_pages {
                viewer.current_page += 1;
            }
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(viewer) = self.current_mut() {
            if viewer.current_page > 1 {
                viewer.current_page -= 1;
            }
        }
    }

    /// Accept the outcome of a load for `document_id`. Results for a
    /// document that is no longer showing are dropped.
    ///
    /// Only a `Loading` viewer accepts a result, and a viewer never
    /// leaves page 1 before its first successful load, so the page count
    /// can be applied without moving the current page.
    pub fn resource_loaded(
        &mut self,
        document_id: &str,
        result: Result<PdfPreview, ResourceError>,
    ) -> bool {
        let Some(viewer) = self.current_mut() else {
            tracing::debug!("Discarding load result for '{}': viewer closed", document_id);
            return false;
        };
        if viewer.document.id != document_id || !matches!(viewer.load, LoadStatus::Loading) {
            tracing::debug!("Discarding stale load result for '{}'", document_id);
            return false;
        }

        viewer.load = match result {
            Ok(preview) => {
                viewer.total_pages = preview.page_count().max(1);
                LoadStatus::Ready(preview)
            }
            Err(e) => {
                tracing::warn!("Failed to load '{}': {}", viewer.document.title, e);
                LoadStatus::Failed(e)
            }
        };
        true
    }

    /// Move a failed load back to `Loading`. Returns the source to reload.
    pub fn retry(&mut self) -> Option<PathBuf> {
        let viewer = self.current_mut()?;
        if !matches!(viewer.load, LoadStatus::Failed(_)) {
            return None;
        }
        viewer.load = LoadStatus::Loading;
        Some(viewer.source.clone())
    }
}
