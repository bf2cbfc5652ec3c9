//! Main application state and UI coordination

use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui;

use crate::action::{Action, Page};
use crate::core::catalog::Catalog;
use crate::core::download::{save_copy, DownloadError};
use crate::core::library::Library;
use crate::core::resource::{PendingLoad, ResourceLoader};
use crate::core::semesters::SemesterCatalog;
use crate::core::settings::Settings;
use crate::core::viewer::LoadStatus;
use crate::session::{Effect, Session};
use crate::ui::{
    home::HomePage,
    navigation::{Footer, NavigationBar},
    notices::Toasts,
    pages::InfoPage,
    semesters::SemestersPage,
    theme,
    viewer::ViewerWindow,
};

/// Main application state
pub struct LearnscapeApp {
    session: Session,
    /// Background runtime for resource loads
    loader: ResourceLoader,
    /// In-flight load and the document it belongs to
    pending: Option<(String, PendingLoad)>,
    toasts: Toasts,
    /// Commonmark cache for the static pages
    commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Theme last pushed to egui
    applied_dark: Option<bool>,
}

impl LearnscapeApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let system_dark = cc
            .egui_ctx
            .system_theme()
            .map(|theme| theme == egui::Theme::Dark)
            .unwrap_or(true);
        let settings = Settings::load(system_dark);
        let config = settings.config().clone();

        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path).or_else(|e| {
                tracing::error!("Ignoring catalog override: {}", e);
                Catalog::builtin()
            }),
            None => Catalog::builtin(),
        }
        .context("Failed to load the bundled catalog")?;
        if catalog.is_empty() {
            tracing::warn!("Catalog has no documents");
        }
        let semesters =
            SemesterCatalog::builtin().context("Failed to load the bundled semester list")?;

        let library_dir = config.library_dir();
        let library = Library::scan(&library_dir);
        tracing::info!(
            "Loaded {} documents, {} resources indexed under {}",
            catalog.len(),
            library.len(),
            library.root().display()
        );

        Ok(Self {
            session: Session::new(catalog, semesters, library, settings),
            loader: ResourceLoader::new()?,
            pending: None,
            toasts: Toasts::new(config.ui.notice_duration()),
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            applied_dark: None,
        })
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let dark = self.session.settings().is_dark_mode();
        if self.applied_dark != Some(dark) {
            theme::apply(ctx, dark);
            self.applied_dark = Some(dark);
        }
    }

    /// Deliver a finished load, or drop one nobody is waiting for
    fn poll_pending(&mut self) {
        let Some((document_id, pending)) = self.pending.as_mut() else {
            return;
        };
        let wanted = self.session.viewer().current().is_some_and(|viewer| {
            viewer.document.id == *document_id && matches!(viewer.load, LoadStatus::Loading)
        });
        if !wanted {
            tracing::debug!("Dropping load of {}", pending.path().display());
            self.pending = None;
            return;
        }
        if let Some(result) = pending.poll() {
            let document_id = document_id.clone();
            self.pending = None;
            self.session.resource_loaded(&document_id, result);
        }
    }

    /// Viewer keyboard shortcuts, ignored while a text field has focus
    fn shortcut_actions(&self, ctx: &egui::Context) -> Vec<Action> {
        if !self.session.viewer().is_open() || ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input(|i| {
            let mut actions = Vec::new();
            if i.key_pressed(egui::Key::Escape) {
                actions.push(Action::CloseViewer);
            }
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                actions.push(Action::ZoomIn);
            }
            if i.key_pressed(egui::Key::Minus) {
                actions.push(Action::ZoomOut);
            }
            if i.key_pressed(egui::Key::R) {
                actions.push(Action::Rotate);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                actions.push(Action::NextPage);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                actions.push(Action::PrevPage);
            }
            actions
        })
    }

    fn run_effect(&mut self, ctx: &egui::Context, effect: Effect) {
        match effect {
            Effect::LoadResource { document_id, path } => {
                let repaint = ctx.clone();
                let pending = self.loader.load(path, move || repaint.request_repaint());
                self.pending = Some((document_id, pending));
            }
            Effect::SaveCopy { source, file_name } => self.save_copy(source, file_name),
            Effect::OpenExternally(path) => {
                if let Err(e) = open::that(&path) {
                    self.session.open_failed(&path, &e.to_string());
                }
            }
        }
    }

    fn save_copy(&mut self, source: PathBuf, file_name: String) {
        if !source.is_file() {
            self.session.download_finished(Err(DownloadError::Missing(source)));
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .set_title("Save document")
            .set_file_name(&file_name)
            .add_filter("PDF", &["pdf"]);
        if let Some(dir) = self.session.download_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(dest) = dialog.save_file() else {
            tracing::info!("Download of '{}' cancelled", file_name);
            return;
        };

        let result = save_copy(&source, &dest).map(|bytes| {
            tracing::info!("Saved {} bytes to {}", bytes, dest.display());
            dest
        });
        self.session.download_finished(result);
    }
}

impl eframe::App for LearnscapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.poll_pending();

        let mut actions = self.shortcut_actions(ctx);

        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            NavigationBar::show(ui, &self.session, &mut actions);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            Footer::show(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.session.page() {
            Page::Home => HomePage::show(ui, &self.session, &mut actions),
            Page::Semesters => SemestersPage::show(ui, &self.session, &mut actions),
            page @ (Page::About | Page::Career) => {
                InfoPage::show(ui, page, &mut self.commonmark_cache)
            }
        });

        if let Some(viewer) = self.session.viewer().current() {
            ViewerWindow::show(ctx, viewer, &mut actions);
        }

        self.toasts.show(ctx, self.session.notices(), &mut actions);

        if !actions.is_empty() {
            // Draw the outcome (including new notices) right away
            ctx.request_repaint();
        }
        for action in actions {
            for effect in self.session.dispatch(action) {
                self.run_effect(ctx, effect);
            }
        }
        if !self.session.viewer().is_open() {
            self.pending = None;
        }
    }
}
