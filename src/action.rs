//! User intents produced by the UI and consumed by [`crate::session::Session`]

use crate::core::filter::CategoryFilter;

/// Top-level screens reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Semesters,
    About,
    Career,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Semesters, Page::About, Page::Career];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Semesters => "Semesters",
            Self::About => "About",
            Self::Career => "Career",
        }
    }
}

/// Which list a document id belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    Catalog(String),
    Material(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(String),
    SetCategory(CategoryFilter),
    ClearFilters,
    View(DocumentRef),
    Download(DocumentRef),
    /// Download whatever the viewer is showing
    DownloadOpen,
    CloseViewer,
    ZoomIn,
    ZoomOut,
    Rotate,
    NextPage,
    PrevPage,
    RetryLoad,
    OpenExternally,
    ToggleTheme,
    Navigate(Page),
    /// Remove a toast by its notice id
    DismissNotice(u64),
}
