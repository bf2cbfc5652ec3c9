//! Top navigation bar and footer

use chrono::Datelike;
use eframe::egui::{self, RichText};

use super::theme;
use crate::action::{Action, Page};
use crate::core::catalog::Category;
use crate::core::filter::CategoryFilter;
use crate::session::Session;

/// Brand, page links, category filters, search box and theme toggle
pub struct NavigationBar;

impl NavigationBar {
    pub fn show(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("LearnScape").strong().size(18.0));
                ui.label(theme::muted(ui, "Education Hub"));
            });
            ui.separator();

            for page in Page::ALL {
                if ui
                    .selectable_label(session.page() == page, page.title())
                    .clicked()
                {
                    actions.push(Action::Navigate(page));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dark = session.settings().is_dark_mode();
                let (icon, hint) = if dark {
                    ("\u{2600}", "Switch to light mode")
                } else {
                    ("\u{1F319}", "Switch to dark mode")
                };
                if ui.button(icon).on_hover_text(hint).clicked() {
                    actions.push(Action::ToggleTheme);
                }

                if session.page() == Page::Home {
                    Self::show_search(ui, session, actions);
                }
            });
        });

        if session.page() == Page::Home {
            ui.horizontal_wrapped(|ui| {
                Self::show_categories(ui, session, actions);
            });
        }
        ui.add_space(4.0);
    }

    fn show_search(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
        // The session owns the query; edit a copy and report changes
        let mut query = session.filter().query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search documents...")
                .desired_width(240.0),
        );
        if response.changed() {
            actions.push(Action::Search(query));
        }
    }

    fn show_categories(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
        let active = session.filter().category;
        let options = std::iter::once(CategoryFilter::All)
            .chain(Category::SELECTABLE.into_iter().map(CategoryFilter::Only));
        for option in options {
            if ui.selectable_label(active == option, option.label()).clicked() && active != option {
                actions.push(Action::SetCategory(option));
            }
        }
    }
}

/// Copyright line at the bottom of the window
pub struct Footer;

impl Footer {
    pub fn show(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let year = chrono::Local::now().year();
            ui.label(theme::muted(
                ui,
                format!("\u{00A9} {} LearnScape Education Hub. All rights reserved.", year),
            ));
        });
    }
}
