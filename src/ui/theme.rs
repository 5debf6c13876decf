use crate::moment::Category;
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub label: Style,
    pub hint: Style,
    pub error: Style,
    pub placeholder: Style,
    pub focused: Style,
    pub selected: Style,
    pub cursor: Style,
    pub disabled: Style,
    pub success: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().bold(),
            label: Style::new().color(Color::Rgb(0x9B, 0xA1, 0xA3)),
            hint: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Rgb(0xFF, 0x3B, 0x30)).bold(),
            placeholder: Style::new().color(Color::Rgb(0x9B, 0xA1, 0xA3)).dim(),
            focused: Style::new().color(Color::Cyan).bold(),
            selected: Style::new()
                .color(Color::Rgb(0xFD, 0xFE, 0xFF))
                .background(Color::Rgb(0x0C, 0x55, 0x7B))
                .bold(),
            cursor: Style::new().color(Color::Yellow).bold(),
            disabled: Style::new().color(Color::Rgb(0x9B, 0x9B, 0x9B)).dim(),
            success: Style::new().color(Color::Rgb(0x34, 0xC7, 0x59)).bold(),
        }
    }
}

impl Theme {
    /// Chip colors for a category.
    pub fn category(&self, category: Category) -> Style {
        let (background, text) = match category {
            Category::Wishes => ((0xE3, 0xF2, 0xD9), (0x48, 0x63, 0x33)),
            Category::Celebration => ((0xFC, 0xEC, 0xFF), (0x5D, 0x4D, 0x60)),
            Category::Motivation => ((0xFF, 0xEA, 0xEA), (0x70, 0x5B, 0x5B)),
            Category::Others => ((0xF3, 0xF3, 0xF3), (0x51, 0x5B, 0x60)),
        };
        Style::new()
            .background(Color::Rgb(background.0, background.1, background.2))
            .color(Color::Rgb(text.0, text.1, text.2))
    }
}
