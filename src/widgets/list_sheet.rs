use std::time::Duration;

use crate::motion::staggered_slide_up;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::widgets::traits::{
    Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};

pub const DEFAULT_VISIBLE_ROWS: usize = 8;

// ── Scroll window ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScrollWindow {
    offset: usize,
    rows: usize,
}

impl ScrollWindow {
    fn follow(&mut self, active: usize, total: usize) {
        if total <= self.rows {
            self.offset = 0;
        } else if active < self.offset {
            self.offset = active;
        } else if active >= self.offset + self.rows {
            self.offset = active + 1 - self.rows;
        }
    }

    fn range(&self, total: usize) -> (usize, usize) {
        let start = self.offset.min(total);
        (start, (start + self.rows).min(total))
    }

    fn footer(&self, total: usize) -> Option<String> {
        if total <= self.rows {
            return None;
        }
        let (start, end) = self.range(total);
        let arrow = match (start > 0, end < total) {
            (true, true) => " ↑↓",
            (true, false) => " ↑",
            (false, true) => " ↓",
            (false, false) => "",
        };
        Some(format!("[{}-{} of {}]{}", start + 1, end, total, arrow))
    }
}

// ── ListSheet ─────────────────────────────────────────────────────────────────

/// Bottom sheet listing plain labels: time slots or sub-categories.
#[derive(Debug, Clone)]
pub struct ListSheet {
    title: String,
    items: Vec<String>,
    current: Option<usize>,
    active: usize,
    window: ScrollWindow,
    /// Time since the sheet opened, for the staggered entrance.
    shown_for_ms: u32,
}

impl ListSheet {
    /// `current` marks and focuses the entry equal to it, if any.
    pub fn new(title: impl Into<String>, items: Vec<String>, current: &str) -> Self {
        let current = items.iter().position(|item| item == current);
        let mut sheet = Self {
            title: title.into(),
            items,
            current,
            active: current.unwrap_or(0),
            window: ScrollWindow {
                offset: 0,
                rows: DEFAULT_VISIBLE_ROWS,
            },
            shown_for_ms: 0,
        };
        sheet.window.follow(sheet.active, sheet.items.len());
        sheet
    }

    pub fn with_visible_rows(mut self, rows: usize) -> Self {
        self.window.rows = rows.max(1);
        self.window.follow(self.active, self.items.len());
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn active(&self) -> Option<&str> {
        self.items.get(self.active).map(String::as_str)
    }

    pub fn reveal_all(&mut self) {
        self.shown_for_ms = u32::MAX;
    }

    fn is_revealed(&self, position: usize) -> bool {
        staggered_slide_up(position).entering.delay_ms <= self.shown_for_ms
    }

    fn move_by(&mut self, delta: isize) -> bool {
        let total = self.items.len();
        if total == 0 {
            return false;
        }
        let len = total as isize;
        self.active = ((self.active as isize + delta).rem_euclid(len)) as usize;
        self.window.follow(self.active, total);
        true
    }

    fn move_to(&mut self, index: usize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.active = index.min(self.items.len() - 1);
        self.window.follow(self.active, self.items.len());
        true
    }
}

impl Drawable for ListSheet {
    fn draw(&self, ctx: &RenderContext) -> Vec<SpanLine> {
        let theme = &ctx.theme;
        let mut lines: Vec<SpanLine> = vec![vec![Span::styled(
            format!("  {}", self.title),
            theme.title,
        )]];

        if self.items.is_empty() {
            lines.push(vec![Span::styled("    nothing to choose", theme.placeholder)]);
            return lines;
        }

        let (start, end) = self.window.range(self.items.len());
        for (row, index) in (start..end).enumerate() {
            if !self.is_revealed(row) {
                lines.push(Vec::new());
                continue;
            }
            let item = &self.items[index];
            let marker = if index == self.active { "❯" } else { " " };
            let check = if Some(index) == self.current { " ✓" } else { "" };
            let style = if index == self.active {
                theme.focused
            } else {
                Default::default()
            };
            lines.push(vec![Span::styled(format!("  {marker} {item}{check}"), style)]);
        }

        if let Some(footer) = self.window.footer(self.items.len()) {
            lines.push(vec![Span::styled(format!("    {footer}"), theme.hint)]);
        }
        lines
    }
}

impl Interactive for ListSheet {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let moved = match key.code {
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(self.window.rows as isize)),
            KeyCode::PageDown => self.move_by(self.window.rows as isize),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(usize::MAX),
            KeyCode::Enter => {
                return match self.active() {
                    Some(item) => InteractionResult::with_action(WidgetAction::Choose(
                        item.to_string(),
                    )),
                    None => InteractionResult::consumed(),
                };
            }
            KeyCode::Esc => return InteractionResult::with_action(WidgetAction::Cancel),
            _ => return InteractionResult::ignored(),
        };
        if moved {
            self.reveal_all();
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }

    fn on_tick(&mut self, elapsed: Duration) -> InteractionResult {
        let rows = self.window.range(self.items.len());
        let visible = rows.1 - rows.0;
        if visible == 0 || self.is_revealed(visible - 1) {
            return InteractionResult::ignored();
        }
        let step = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.shown_for_ms = self.shown_for_ms.saturating_add(step);
        InteractionResult::handled()
    }
}
