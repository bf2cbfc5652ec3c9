//! Colours and visuals shared by the panels

use egui::{Color32, RichText};

use crate::core::catalog::Category;

/// Accent colour for a category badge
pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::Notes => Color32::from_rgb(59, 130, 246),
        Category::Pyqs => Color32::from_rgb(168, 85, 247),
        Category::Placement => Color32::from_rgb(34, 197, 94),
        Category::Resources => Color32::from_rgb(249, 115, 22),
        Category::Uncategorized => Color32::from_rgb(107, 114, 128),
    }
}

/// Small filled label such as "NOTES"
pub fn category_badge(category: Category) -> RichText {
    RichText::new(format!(" {} ", category.label().to_uppercase()))
        .small()
        .strong()
        .color(Color32::WHITE)
        .background_color(category_color(category))
}

/// Muted text used for metadata lines
pub fn muted(ui: &egui::Ui, text: impl Into<String>) -> RichText {
    RichText::new(text.into())
        .small()
        .color(ui.visuals().weak_text_color())
}

/// Switch egui between its light and dark visuals
pub fn apply(ctx: &egui::Context, dark: bool) {
    let theme = if dark {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    };
    ctx.set_theme(theme);
}

/// Paper colour for rendered pages, independent of the UI theme
pub const PAGE_FILL: Color32 = Color32::WHITE;
pub const PAGE_TEXT: Color32 = Color32::from_rgb(40, 40, 40);
pub const PAGE_BORDER: Color32 = Color32::from_rgb(200, 200, 200);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_colors_are_distinct() {
        let mut colors: Vec<Color32> = Category::SELECTABLE.iter().map(|c| category_color(*c)).collect();
        colors.push(category_color(Category::Uncategorized));
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn test_badge_uses_uppercase_label() {
        assert_eq!(category_badge(Category::Pyqs).text(), " PYQS ");
    }
}
