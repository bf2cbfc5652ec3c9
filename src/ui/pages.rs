//! Static About and Career pages rendered from bundled Markdown

use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::action::Page;

const ABOUT: &str = include_str!("../../assets/pages/about.md");
const CAREER: &str = include_str!("../../assets/pages/career.md");

/// Markdown source for a static page
pub fn page_source(page: Page) -> Option<&'static str> {
    match page {
        Page::About => Some(ABOUT),
        Page::Career => Some(CAREER),
        Page::Home | Page::Semesters => None,
    }
}

pub struct InfoPage;

impl InfoPage {
    pub fn show(ui: &mut egui::Ui, page: Page, cache: &mut CommonMarkCache) {
        let Some(source) = page_source(page) else {
            return;
        };
        egui::ScrollArea::vertical()
            .id_salt(("info_page", page.title()))
            .show(ui, |ui| {
                ui.set_max_width(840.0);
                CommonMarkViewer::new().show(ui, cache, source);
            });
    }
}
