//! Document viewer window

use eframe::egui::{self, epaint::TextShape, Color32, FontId, RichText, Sense, Vec2};

use super::card::format_date;
use super::theme;
use crate::action::Action;
use crate::core::resource::{PagePreview, PageSize, PdfPreview, DEFAULT_PAGE_SIZE};
use crate::core::viewer::{LoadStatus, OpenViewer, Rotation, Zoom};

/// Points to screen pixels at 100% zoom
const PAGE_SCALE: f32 = 0.9;
const PAGE_MARGIN_PT: f32 = 36.0;
const PAGE_FONT_PT: f32 = 10.0;

pub struct ViewerWindow;

impl ViewerWindow {
    pub fn show(ctx: &egui::Context, viewer: &OpenViewer, actions: &mut Vec<Action>) {
        let mut open = true;
        egui::Window::new(&viewer.document.title)
            .id(egui::Id::new("document_viewer"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([760.0, 680.0])
            .show(ctx, |ui| {
                Self::show_header(ui, viewer, actions);
                ui.separator();

                match &viewer.load {
                    LoadStatus::Loading => Self::show_loading(ui),
                    LoadStatus::Failed(e) => Self::show_error(ui, &e.to_string(), actions),
                    LoadStatus::Ready(preview) => Self::show_document(ui, viewer, preview, actions),
                }

                ui.separator();
                Self::show_footer(ui, viewer);
            });

        if !open {
            actions.push(Action::CloseViewer);
        }
    }

    fn show_header(ui: &mut egui::Ui, viewer: &OpenViewer, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            ui.label(theme::category_badge(viewer.document.category));
            ui.label(theme::muted(ui, &viewer.document.file_size));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    actions.push(Action::CloseViewer);
                }
                if ui
                    .button("Open externally")
                    .on_hover_text(viewer.source.display().to_string())
                    .clicked()
                {
                    actions.push(Action::OpenExternally);
                }
                if ui.button("Download").clicked() {
                    actions.push(Action::DownloadOpen);
                }
                ui.separator();

                if ui.button("\u{21BB}").on_hover_text("Rotate (R)").clicked() {
                    actions.push(Action::Rotate);
                }
                let zoom = viewer.zoom;
                if ui
                    .add_enabled(zoom < Zoom::MAX, egui::Button::new("+"))
                    .on_hover_text("Zoom in (+)")
                    .clicked()
                {
                    actions.push(Action::ZoomIn);
                }
                ui.label(format!("{}%", zoom.percent()));
                if ui
                    .add_enabled(zoom > Zoom::MIN, egui::Button::new("\u{2212}"))
                    .on_hover_text("Zoom out (-)")
                    .clicked()
                {
                    actions.push(Action::ZoomOut);
                }
            });
        });
    }

    fn show_loading(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.label("Loading document...");
            ui.add_space(60.0);
        });
    }

    fn show_error(ui: &mut egui::Ui, message: &str, actions: &mut Vec<Action>) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("Failed to load document").strong().color(ui.visuals().error_fg_color));
            ui.label(theme::muted(ui, message));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Retry").clicked() {
                    actions.push(Action::RetryLoad);
                }
                if ui.button("Close").clicked() {
                    actions.push(Action::CloseViewer);
                }
            });
            ui.add_space(60.0);
        });
    }

    fn show_document(
        ui: &mut egui::Ui,
        viewer: &OpenViewer,
        preview: &PdfPreview,
        actions: &mut Vec<Action>,
    ) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!viewer.is_first_page(), egui::Button::new("\u{2190} Previous"))
                .clicked()
            {
                actions.push(Action::PrevPage);
            }
            ui.label(format!("{} / {}", viewer.current_page, viewer.total_pages));
            if ui
                .add_enabled(!viewer.is_last_page(), egui::Button::new("Next \u{2192}"))
                .clicked()
            {
                actions.push(Action::NextPage);
            }
        });

        let footer_height = 28.0;
        egui::ScrollArea::both()
            .id_salt("viewer_page")
            .max_height((ui.available_height() - footer_height).max(100.0))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    match preview.page(viewer.current_page) {
                        Some(page) => paint_page(ui, page, viewer.zoom.factor(), viewer.rotation),
                        None => ui.label(theme::muted(ui, "This page is not available")),
                    };
                });
            });
    }

    fn show_footer(ui: &mut egui::Ui, viewer: &OpenViewer) {
        ui.horizontal(|ui| {
            ui.label(theme::muted(
                ui,
                format!("Page {} of {}", viewer.current_page, viewer.total_pages),
            ));
            if let Some(date) = viewer.document.upload_date {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(theme::muted(ui, format!("Last modified: {}", format_date(date))));
                });
            }
        });
    }
}

/// On-screen size of a page after zoom and rotation
pub fn display_size(size: PageSize, zoom: f32, rotation: Rotation) -> Vec2 {
    let width = size.width_pt * PAGE_SCALE * zoom;
    let height = size.height_pt * PAGE_SCALE * zoom;
    if rotation.is_sideways() {
        Vec2::new(height, width)
    } else {
        Vec2::new(width, height)
    }
}

/// Draw a page as paper with its extracted text, turned by `rotation`
fn paint_page(ui: &mut egui::Ui, page: &PagePreview, zoom: f32, rotation: Rotation) -> egui::Response {
    let size = if page.size.width_pt > 0.0 && page.size.height_pt > 0.0 {
        page.size
    } else {
        DEFAULT_PAGE_SIZE
    };
    let (rect, response) = ui.allocate_exact_size(display_size(size, zoom, rotation), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(2), theme::PAGE_FILL);
    painter.rect_stroke(
        rect,
        egui::CornerRadius::same(2),
        egui::Stroke::new(1.0, theme::PAGE_BORDER),
        egui::StrokeKind::Inside,
    );

    let scale = PAGE_SCALE * zoom;
    let upright = display_size(size, zoom, Rotation::Deg0);
    let margin = PAGE_MARGIN_PT * scale;
    let text = if page.text.trim().is_empty() {
        "(no text on this page)"
    } else {
        page.text.as_str()
    };
    let galley = painter.layout(
        text.to_owned(),
        FontId::proportional(PAGE_FONT_PT * scale),
        theme::PAGE_TEXT,
        (upright.x - 2.0 * margin).max(1.0),
    );

    // Text origin relative to the unrotated page centre, turned with the page
    let offset = Vec2::new(margin, margin) - upright / 2.0;
    let angle = rotation.radians();
    let pos = rect.center() + egui::emath::Rot2::from_angle(angle) * offset;
    painter.add(TextShape::new(pos, galley, Color32::PLACEHOLDER).with_angle(angle));

    response
}
