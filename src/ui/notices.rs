//! Toast notifications in the bottom-right corner

use std::collections::HashMap;
use std::time::{Duration, Instant};

use eframe::egui::{self, RichText};

use crate::action::Action;
use crate::session::{Notice, NoticeLevel};

/// Draws the session's notices and times them out
pub struct Toasts {
    /// When each notice id was first drawn
    first_shown: HashMap<u64, Instant>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            first_shown: HashMap::new(),
            lifetime,
        }
    }

    /// Ids of notices older than the lifetime. Starts the clock for new
    /// ones and forgets ids no longer listed.
    fn expired(&mut self, notices: &[Notice], now: Instant) -> Vec<u64> {
        self.first_shown
            .retain(|id, _| notices.iter().any(|notice| notice.id == *id));
        notices
            .iter()
            .filter(|notice| {
                let shown = *self.first_shown.entry(notice.id).or_insert(now);
                now.saturating_duration_since(shown) >= self.lifetime
            })
            .map(|notice| notice.id)
            .collect()
    }

    /// Show `notices`; expired or clicked ones become [`Action::DismissNotice`]
    pub fn show(&mut self, ctx: &egui::Context, notices: &[Notice], actions: &mut Vec<Action>) {
        let now = Instant::now();
        let expired = self.expired(notices, now);
        actions.extend(expired.iter().copied().map(Action::DismissNotice));

        let visible: Vec<&Notice> = notices
            .iter()
            .filter(|notice| !expired.contains(&notice.id))
            .collect();
        if visible.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for notice in &visible {
                    let response = egui::Frame::popup(ui.style())
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            let title = RichText::new(&notice.title).strong();
                            let title = match notice.level {
                                NoticeLevel::Info => title,
                                NoticeLevel::Error => title.color(ui.visuals().error_fg_color),
                            };
                            ui.label(title);
                            if !notice.description.is_empty() {
                                ui.label(&notice.description);
                            }
                        })
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_text("Click to dismiss");
                    if response.clicked() {
                        actions.push(Action::DismissNotice(notice.id));
                    }
                    ui.add_space(6.0);
                }
            });

        // Wake up again when the oldest toast expires
        let oldest = visible
            .iter()
            .filter_map(|notice| self.first_shown.get(&notice.id))
            .min();
        if let Some(shown) = oldest {
            let remaining = self.lifetime.saturating_sub(now.saturating_duration_since(*shown));
            ctx.request_repaint_after(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u64) -> Notice {
        Notice {
            id,
            level: NoticeLevel::Info,
            title: format!("Notice {}", id),
            description: String::new(),
        }
    }

    #[test]
    fn test_expiry_counts_from_first_draw() {
        let start = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(3));

        assert!(toasts.expired(&[notice(1)], start).is_empty());
        let later = start + Duration::from_secs(2);
        assert!(toasts.expired(&[notice(1), notice(2)], later).is_empty());

        let expired = toasts.expired(&[notice(1), notice(2)], start + Duration::from_secs(4));
        assert_eq!(expired, vec![1]);
    }

    #[test]
    fn test_dismissed_ids_are_forgotten() {
        let start = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(3));
        toasts.expired(&[notice(1), notice(2)], start);
        toasts.expired(&[notice(2)], start);
        assert_eq!(toasts.first_shown.len(), 1);
        assert!(toasts.first_shown.contains_key(&2));
    }
}
