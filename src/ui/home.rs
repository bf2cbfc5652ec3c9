//! Home page: hero banner and the filtered document grid

use eframe::egui::{self, RichText};

use super::card::DocumentCard;
use super::theme;
use crate::action::Action;
use crate::session::Session;

const GRID_SPACING: f32 = 16.0;

pub struct HomePage;

impl HomePage {
    pub fn show(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
        egui::ScrollArea::vertical()
            .id_salt("home_scroll")
            .show(ui, |ui| {
                Self::show_hero(ui);
                ui.add_space(16.0);
                Self::show_results(ui, session, actions);
            });
    }

    fn show_hero(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("One Stop").size(34.0).strong().color(ui.visuals().hyperlink_color));
            ui.label(RichText::new("Education Hub").size(34.0).strong());
            ui.add_space(6.0);
            ui.label(RichText::new("Notes, PYQs, Placement Materials & Resources at your fingertips.").size(16.0));
            ui.label(theme::muted(ui, "Everything you need to excel in your studies."));
        });
    }

    fn show_results(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
        let documents = session.visible_documents();
        let filter = session.filter();

        ui.horizontal(|ui| {
            ui.heading(filter.category.label());
            ui.label(theme::muted(ui, filter.summary(documents.len())));
        });
        ui.separator();

        if documents.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("No documents found");
                ui.label("Try adjusting your search or filter to find what you're looking for.");
                ui.add_space(8.0);
                if ui.button("Clear all filters").clicked() {
                    actions.push(Action::ClearFilters);
                }
            });
            return;
        }

        let card_width = session.settings().config().ui.card_width.max(200.0);
        let columns = ((ui.available_width() + GRID_SPACING) / (card_width + GRID_SPACING))
            .floor()
            .max(1.0) as usize;

        egui::Grid::new("document_grid")
            .num_columns(columns)
            .spacing([GRID_SPACING, GRID_SPACING])
            .show(ui, |ui| {
                for (i, record) in documents.iter().enumerate() {
                    ui.vertical(|ui| {
                        DocumentCard::show(ui, record, card_width, actions);
                    });
                    if (i + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });
    }
}
