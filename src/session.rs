//! Single dispatch point for every user action
//!
//! The session owns the filter inputs, viewer state and settings. It never
//! touches the UI toolkit or performs slow work itself: anything that needs
//! the host environment comes back to the caller as an [`Effect`].

use std::path::{Path, PathBuf};

use crate::action::{Action, DocumentRef, Page};
use crate::core::catalog::{Catalog, DocumentRecord};
use crate::core::download::{suggested_file_name, DownloadError};
use crate::core::filter::{CategoryFilter, FilterState};
use crate::core::library::Library;
use crate::core::resource::{PdfPreview, ResourceError};
use crate::core::semesters::SemesterCatalog;
use crate::core::settings::Settings;
use crate::core::viewer::{ViewerDocument, ViewerState};

/// Work the shell must carry out on the session's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start reading the resource for the open viewer
    LoadResource { document_id: String, path: PathBuf },
    /// Ask where to save, then copy `source` there
    SaveCopy { source: PathBuf, file_name: String },
    /// Hand the resource to the system's default application
    OpenExternally(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Most notices kept at once; older ones are dropped first
const MAX_NOTICES: usize = 4;

/// Short message shown as a toast until dismissed or expired
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Assigned by the session when queued
    pub id: u64,
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

pub struct Session {
    catalog: Catalog,
    semesters: SemesterCatalog,
    library: Library,
    filter: FilterState,
    viewer: ViewerState,
    settings: Settings,
    page: Page,
    notices: Vec<Notice>,
    next_notice_id: u64,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        semesters: SemesterCatalog,
        library: Library,
        settings: Settings,
    ) -> Self {
        Self {
            catalog,
            semesters,
            library,
            filter: FilterState::default(),
            viewer: ViewerState::default(),
            settings,
            page: Page::default(),
            notices: Vec::new(),
            next_notice_id: 1,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn semesters(&self) -> &SemesterCatalog {
        &self.semesters
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Catalog entries passing the current filter, in catalog order
    pub fn visible_documents(&self) -> Vec<&DocumentRecord> {
        self.filter.apply(self.catalog.records())
    }

    /// Notices still on screen, oldest first
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        tracing::debug!("Dispatch {:?}", action);
        match action {
            Action::Search(query) => {
                self.filter.query = query;
                Vec::new()
            }
            Action::SetCategory(category) => {
                self.set_category(category);
                Vec::new()
            }
            Action::ClearFilters => {
                self.filter.clear();
                Vec::new()
            }
            Action::View(reference) => self.view(&reference),
            Action::Download(reference) => match self.resolve(&reference) {
                Some(document) => self.download(&document),
                None => {
                    self.unknown_document(&reference);
                    Vec::new()
                }
            },
            Action::DownloadOpen => match self.viewer.current() {
                Some(viewer) => {
                    let document = viewer.document.clone();
                    self.download(&document)
                }
                None => Vec::new(),
            },
            Action::CloseViewer => {
                self.viewer.close();
                Vec::new()
            }
            Action::ZoomIn => {
                self.viewer.zoom_in();
                Vec::new()
            }
            Action::ZoomOut => {
                self.viewer.zoom_out();
                Vec::new()
            }
            Action::Rotate => {
                self.viewer.rotate();
                Vec::new()
            }
            Action::NextPage => {
                self.viewer.next_page();
                Vec::new()
            }
            Action::PrevPage => {
                self.viewer.prev_page();
                Vec::new()
            }
            Action::RetryLoad => self.retry(),
            Action::OpenExternally => self
                .viewer
                .current()
                .map(|viewer| vec![Effect::OpenExternally(viewer.source.clone())])
                .unwrap_or_default(),
            Action::ToggleTheme => {
                self.toggle_theme();
                Vec::new()
            }
            Action::Navigate(page) => {
                self.navigate(page);
                Vec::new()
            }
            Action::DismissNotice(id) => {
                self.notices.retain(|notice| notice.id != id);
                Vec::new()
            }
        }
    }

    /// Feed back the outcome of an [`Effect::LoadResource`]
    pub fn resource_loaded(&mut self, document_id: &str, result: Result<PdfPreview, ResourceError>) {
        self.viewer.resource_loaded(document_id, result);
    }

    /// Feed back the outcome of an [`Effect::SaveCopy`]
    pub fn download_finished(&mut self, result: Result<PathBuf, DownloadError>) {
        match result {
            Ok(dest) => {
                if let Some(dir) = dest.parent() {
                    if let Err(e) = self.settings.remember_download_dir(dir) {
                        tracing::warn!("Failed to remember download directory: {:#}", e);
                    }
                }
                self.push_notice(Notice::info("Download Complete", dest.display().to_string()));
            }
            Err(e) => {
                tracing::error!("Download failed: {}", e);
                self.push_notice(Notice::error("Download Failed", e.to_string()));
            }
        }
    }

    /// Feed back a failed [`Effect::OpenExternally`]
    pub fn open_failed(&mut self, path: &Path, error: &str) {
        tracing::error!("Failed to open {}: {}", path.display(), error);
        self.push_notice(Notice::error("Could Not Open Document", error));
    }

    /// Directory the save dialog should start in
    pub fn download_dir(&self) -> Option<&Path> {
        self.settings.config().last_download_dir.as_deref()
    }

    fn push_notice(&mut self, mut notice: Notice) {
        notice.id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }

    fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.push_notice(Notice::info(
            "Filter Applied",
            format!("Showing {} documents", category.id()),
        ));
    }

    fn resolve(&self, reference: &DocumentRef) -> Option<ViewerDocument> {
        match reference {
            DocumentRef::Catalog(id) => self.catalog.get(id).map(ViewerDocument::from),
            DocumentRef::Material(id) => self.semesters.material(id).map(ViewerDocument::from),
        }
    }

    fn unknown_document(&mut self, reference: &DocumentRef) {
        tracing::warn!("Unknown document {:?}", reference);
        self.push_notice(Notice::error("Document Unavailable", "This document is no longer listed"));
    }

    fn view(&mut self, reference: &DocumentRef) -> Vec<Effect> {
        let Some(document) = self.resolve(reference) else {
            self.unknown_document(reference);
            return Vec::new();
        };

        let Some(path) = self.resource_path(&document) else {
            return Vec::new();
        };
        let document_id = document.id.clone();
        let title = document.title.clone();
        if !self.viewer.open_document(document, path.clone()) {
            return Vec::new();
        }

        tracing::info!("Opening document '{}'", title);
        self.push_notice(Notice::info("Opening Document", title));
        vec![Effect::LoadResource { document_id, path }]
    }

    /// Library path for `document`, or an error notice when its file name
    /// cannot be used
    fn resource_path(&mut self, document: &ViewerDocument) -> Option<PathBuf> {
        if !self.library.contains(&document.file) {
            tracing::warn!(
                "'{}' is not indexed under {}, trying the default location",
                document.file,
                self.library.root().display()
            );
        }
        let path = self.library.resolve(&document.file);
        if path.is_none() {
            self.push_notice(Notice::error(
                "Document Unavailable",
                format!("'{}' is not a valid resource name", document.file),
            ));
        }
        path
    }

    fn download(&mut self, document: &ViewerDocument) -> Vec<Effect> {
        let Some(source) = self.resource_path(document) else {
            return Vec::new();
        };
        tracing::info!("Download requested for '{}'", document.title);
        self.push_notice(Notice::info(
            "Download Started",
            format!("{} - {}", document.title, document.file_size),
        ));
        vec![Effect::SaveCopy {
            source,
            file_name: suggested_file_name(&document.title),
        }]
    }

    fn retry(&mut self) -> Vec<Effect> {
        let Some(path) = self.viewer.retry() else {
            return Vec::new();
        };
        let document_id = self
            .viewer
            .current()
            .map(|viewer| viewer.document.id.clone())
            .unwrap_or_default();
        vec![Effect::LoadResource { document_id, path }]
    }

    fn toggle_theme(&mut self) {
        let dark = !self.settings.is_dark_mode();
        if let Err(e) = self.settings.set_dark_mode(dark) {
            tracing::error!("Failed to save theme preference: {:#}", e);
        }
        let mode = if dark { "Dark" } else { "Light" };
        self.push_notice(Notice::info(
            format!("Switched to {} Mode", mode),
            "Theme preference saved",
        ));
    }

    fn navigate(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        // Leaving a page unmounts its viewer
        self.viewer.close();
        self.page = page;
        tracing::info!("Navigated to {}", page.title());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Category;
    use crate::core::resource::parse_preview;
    use crate::core::resource::tests::sample_pdf;
    use crate::core::viewer::{LoadStatus, Rotation, Zoom};

    fn session_in(dir: &Path) -> Session {
        Session::new(
            Catalog::builtin().unwrap(),
            SemesterCatalog::builtin().unwrap(),
            Library::scan(dir),
            Settings::load_from(Some(dir.join("config.json")), false),
        )
    }

    fn view(session: &mut Session, id: &str) -> Vec<Effect> {
        session.dispatch(Action::View(DocumentRef::Catalog(id.to_string())))
    }

    #[test]
    fn test_search_and_category_narrow_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        assert_eq!(session.visible_documents().len(), 12);

        session.dispatch(Action::Search("interview".to_string()));
        let titles: Vec<_> = session.visible_documents().iter().map(|d| d.title.clone()).collect();
        assert!(titles.contains(&"Software Engineering Interview Guide".to_string()));

        session.dispatch(Action::SetCategory(CategoryFilter::Only(Category::Pyqs)));
        assert!(session.visible_documents().is_empty());

        session.dispatch(Action::ClearFilters);
        assert!(session.filter().is_default());
        assert_eq!(session.visible_documents().len(), 12);
    }

    #[test]
    fn test_category_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.dispatch(Action::SetCategory(CategoryFilter::Only(Category::Pyqs)));
        let notices = session.notices().to_vec();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].description, "Showing pyqs documents");

        session.dispatch(Action::DismissNotice(notices[0].id));
        assert!(session.notices().is_empty());
    }

    #[test]
    fn test_view_emits_load_for_library_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes-sample.pdf"), sample_pdf(2)).unwrap();
        let mut session = session_in(dir.path());

        let effects = view(&mut session, "1");
        assert_eq!(
            effects,
            vec![Effect::LoadResource {
                document_id: "1".to_string(),
                path: dir.path().join("notes-sample.pdf"),
            }]
        );
        assert!(session.viewer().is_open());
        assert_eq!(session.notices()[0].title, "Opening Document");

        // A second view while open changes nothing
        assert!(view(&mut session, "2").is_empty());
        assert_eq!(session.viewer().current().unwrap().document.id, "1");
    }

    #[test]
    fn test_reopen_resets_viewer_controls() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        view(&mut session, "1");
        session.resource_loaded("1", parse_preview(&sample_pdf(4)));
        session.dispatch(Action::ZoomIn);
        session.dispatch(Action::Rotate);
        session.dispatch(Action::NextPage);
        session.dispatch(Action::CloseViewer);
        assert!(!session.viewer().is_open());

        view(&mut session, "1");
        let viewer = session.viewer().current().unwrap();
        assert_eq!(viewer.zoom, Zoom::default());
        assert_eq!(viewer.rotation, Rotation::Deg0);
        assert_eq!(viewer.current_page, 1);
    }

    #[test]
    fn test_download_keeps_viewer_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        let effects = session.dispatch(Action::Download(DocumentRef::Catalog("4".to_string())));
        assert_eq!(
            effects,
            vec![Effect::SaveCopy {
                source: dir.path().join("resources-sample.pdf"),
                file_name: "Machine Learning Cheat Sheet.pdf".to_string(),
            }]
        );
        assert!(!session.viewer().is_open());

        view(&mut session, "4");
        session.dispatch(Action::ZoomOut);
        let effects = session.dispatch(Action::DownloadOpen);
        assert_eq!(effects.len(), 1);
        let viewer = session.viewer().current().unwrap();
        assert_eq!(viewer.zoom.percent(), 75);
        assert!(matches!(viewer.load, LoadStatus::Loading));
    }

    #[test]
    fn test_download_open_without_viewer_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        assert!(session.dispatch(Action::DownloadOpen).is_empty());
        assert!(session.dispatch(Action::OpenExternally).is_empty());
    }

    #[test]
    fn test_material_view_and_download() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());

        let effects = session.dispatch(Action::View(DocumentRef::Material("s3-pyq-1".to_string())));
        assert!(matches!(&effects[0], Effect::LoadResource { path, .. } if path.ends_with("pyqs-sample.pdf")));
        let viewer = session.viewer().current().unwrap();
        assert_eq!(viewer.document.title, "DSA Previous Year Questions");
        assert!(viewer.document.upload_date.is_none());
    }

    #[test]
    fn test_unknown_reference_reports_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        assert!(view(&mut session, "404").is_empty());
        assert!(session
            .dispatch(Action::Download(DocumentRef::Material("404".to_string())))
            .is_empty());
        let notices = session.notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Error));
    }

    #[test]
    fn test_failed_load_then_retry() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        view(&mut session, "2");
        session.resource_loaded("2", Err(ResourceError::NoPages));

        let effects = session.dispatch(Action::RetryLoad);
        assert_eq!(
            effects,
            vec![Effect::LoadResource {
                document_id: "2".to_string(),
                path: dir.path().join("pyqs-sample.pdf"),
            }]
        );
        assert!(session.dispatch(Action::RetryLoad).is_empty());
    }

    #[test]
    fn test_open_externally_uses_resolved_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        view(&mut session, "3");
        assert_eq!(
            session.dispatch(Action::OpenExternally),
            vec![Effect::OpenExternally(dir.path().join("placement-sample.pdf"))]
        );
    }

    #[test]
    fn test_toggle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        assert!(!session.settings().is_dark_mode());

        session.dispatch(Action::ToggleTheme);
        assert!(session.settings().is_dark_mode());
        assert_eq!(session.notices()[0].title, "Switched to Dark Mode");

        let reloaded = Settings::load_from(Some(dir.path().join("config.json")), false);
        assert!(reloaded.is_dark_mode());
    }

    #[test]
    fn test_navigation_closes_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        view(&mut session, "1");
        session.dispatch(Action::Navigate(Page::Semesters));
        assert_eq!(session.page(), Page::Semesters);
        assert!(!session.viewer().is_open());
    }

    #[test]
    fn test_download_result_remembers_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        let dest = dir.path().join("out/notes.pdf");
        session.download_finished(Ok(dest));
        assert_eq!(session.download_dir(), Some(dir.path().join("out").as_path()));

        session.download_finished(Err(DownloadError::Missing(dir.path().join("x.pdf"))));
        let notices = session.notices();
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_notices_are_capped_and_dismissable() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        for _ in 0..3 {
            session.dispatch(Action::ToggleTheme);
        }
        session.dispatch(Action::SetCategory(CategoryFilter::Only(Category::Notes)));
        session.dispatch(Action::SetCategory(CategoryFilter::All));
        assert_eq!(session.notices().len(), MAX_NOTICES);
        assert_eq!(session.notices()[MAX_NOTICES - 1].description, "Showing all documents");

        let first = session.notices()[0].id;
        session.dispatch(Action::DismissNotice(first));
        assert_eq!(session.notices().len(), MAX_NOTICES - 1);
        assert!(session.notices().iter().all(|n| n.id != first));

        // Unknown ids are ignored
        session.dispatch(Action::DismissNotice(u64::MAX));
        assert_eq!(session.notices().len(), MAX_NOTICES - 1);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        session.open_failed(Path::new("/nowhere.pdf"), "no handler");
        let notice = &session.notices()[0];
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.description, "no handler");
    }

    #[test]
    fn test_resource_outside_library_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::from_json(
            r#"[{ "id": "x", "title": "Escape", "description": "", "category": "notes",
                 "uploadDate": "2024-01-01", "fileSize": "1 MB", "downloadCount": 0,
                 "file": "../../x.pdf" }]"#,
        )
        .unwrap();
        let mut session = Session::new(
            catalog,
            SemesterCatalog::default(),
            Library::scan(dir.path()),
            Settings::load_from(None, false),
        );

        assert!(view(&mut session, "x").is_empty());
        assert!(!session.viewer().is_open());
        assert!(session
            .dispatch(Action::Download(DocumentRef::Catalog("x".to_string())))
            .is_empty());
        assert_eq!(session.notices().len(), 2);
        assert!(session.notices().iter().all(|n| n.level == NoticeLevel::Error));
    }
}
