//! Semester browser page

use eframe::egui::{self, RichText};

use super::card::format_count;
use super::theme;
use crate::action::{Action, DocumentRef};
use crate::core::semesters::{Material, Semester};
use crate::session::Session;

const MATERIAL_WIDTH: f32 = 260.0;

pub struct SemestersPage;

impl SemestersPage {
    pub fn show(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
        egui::ScrollArea::vertical()
            .id_salt("semesters_scroll")
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.heading(RichText::new("Engineering Resources").size(28.0));
                    ui.label(theme::muted(
                        ui,
                        "Complete collection of engineering study materials, previous year questions, \
                         and placement preparation resources for all semesters.",
                    ));
                });
                ui.add_space(16.0);

                for semester in session.semesters().semesters() {
                    Self::show_semester(ui, semester, actions);
                    ui.add_space(12.0);
                }

                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::same(16))
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading("Need More Resources?");
                            ui.label(
                                "Can't find what you're looking for? Contact us for specific study \
                                 materials or suggest new content.",
                            );
                        });
                    });
                ui.add_space(16.0);
            });
    }

    fn show_semester(ui: &mut egui::Ui, semester: &Semester, actions: &mut Vec<Action>) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(16))
            .corner_radius(egui::CornerRadius::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!(" {} ", semester.badge()))
                            .strong()
                            .color(egui::Color32::WHITE)
                            .background_color(ui.visuals().selection.bg_fill),
                    );
                    ui.label(RichText::new(&semester.name).size(20.0).strong());
                });
                if !semester.subjects.is_empty() {
                    ui.label(theme::muted(ui, semester.subject_line()));
                }
                ui.add_space(8.0);

                if semester.materials.is_empty() {
                    ui.label(theme::muted(ui, "Materials will be updated soon for this semester."));
                    return;
                }

                ui.horizontal_wrapped(|ui| {
                    for material in &semester.materials {
                        Self::show_material(ui, material, actions);
                    }
                });
            });
    }

    fn show_material(ui: &mut egui::Ui, material: &Material, actions: &mut Vec<Action>) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(MATERIAL_WIDTH);
                ui.vertical(|ui| {
                    ui.label(theme::category_badge(material.kind));
                    ui.label(RichText::new(&material.title).strong());
                    ui.label(&material.description);
                    ui.label(theme::muted(
                        ui,
                        format!(
                            "{} \u{2022} {} downloads",
                            material.file_size,
                            format_count(material.download_count)
                        ),
                    ));
                    ui.horizontal(|ui| {
                        if ui.button("View").clicked() {
                            actions.push(Action::View(DocumentRef::Material(material.id.clone())));
                        }
                        if ui.button("Download").clicked() {
                            actions.push(Action::Download(DocumentRef::Material(material.id.clone())));
                        }
                    });
                });
            });
    }
}
