//! Catalog document card

use eframe::egui::{self, RichText};

use super::theme;
use crate::action::{Action, DocumentRef};
use crate::core::catalog::DocumentRecord;

/// Card for one catalog entry with View / Download buttons
pub struct DocumentCard;

impl DocumentCard {
    pub fn show(ui: &mut egui::Ui, record: &DocumentRecord, width: f32, actions: &mut Vec<Action>) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .corner_radius(egui::CornerRadius::same(8))
            .show(ui, |ui| {
                ui.set_width(width - 24.0);

                ui.horizontal(|ui| {
                    ui.label(theme::category_badge(record.category));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(theme::muted(ui, format_date(record.upload_date)));
                    });
                });

                if let Some(thumbnail) = &record.thumbnail {
                    ui.add_space(4.0);
                    ui.add(
                        egui::Image::new(format!("file://{}", thumbnail.display()))
                            .max_height(120.0)
                            .max_width(ui.available_width())
                            .corner_radius(egui::CornerRadius::same(4)),
                    );
                }

                ui.add_space(6.0);
                ui.label(RichText::new(&record.title).strong().size(16.0));
                ui.label(&record.description);

                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    for tag in record.visible_tags() {
                        ui.label(
                            RichText::new(format!("#{}", tag))
                                .small()
                                .background_color(ui.visuals().faint_bg_color),
                        );
                    }
                    let hidden = record.hidden_tag_count();
                    if hidden > 0 {
                        ui.label(theme::muted(ui, format!("+{} more", hidden)));
                    }
                });

                ui.add_space(6.0);
                ui.label(theme::muted(
                    ui,
                    format!(
                        "{} \u{2022} {} downloads",
                        record.file_size,
                        format_count(record.download_count)
                    ),
                ));

                ui.horizontal(|ui| {
                    if ui.button("View").clicked() {
                        actions.push(Action::View(DocumentRef::Catalog(record.id.clone())));
                    }
                    if ui.button("Download").clicked() {
                        actions.push(Action::Download(DocumentRef::Catalog(record.id.clone())));
                    }
                });
            });
    }
}

/// Date as shown on cards and in the viewer footer
pub fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Group digits in threes: 1234 -> "1,234"
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
    }
}
