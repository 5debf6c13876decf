use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarCell, DatePicker, WEEKDAY_LABELS};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use crate::ui::theme::Theme;
use crate::widgets::traits::{
    Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};

const CELL_WIDTH: usize = 4;

// ── Drawable ──────────────────────────────────────────────────────────────────

impl Drawable for DatePicker {
    fn draw(&self, ctx: &RenderContext) -> Vec<SpanLine> {
        let Some(month) = self.displayed_month() else {
            return Vec::new();
        };
        let theme = &ctx.theme;
        let mut lines: Vec<SpanLine> = Vec::new();

        lines.push(vec![Span::styled(
            format!("  ‹ {:^22} ›", month.title()),
            theme.title,
        )]);
        lines.push(Vec::new());

        // ── Weekday header ────────────────────────────────────────────────
        let header: String = WEEKDAY_LABELS
            .iter()
            .map(|label| format!(" {label} "))
            .collect();
        lines.push(vec![
            Span::new("  "),
            Span::styled(header, theme.hint),
        ]);

        // ── Grid ──────────────────────────────────────────────────────────
        let cursor = self.cursor();
        for week in self.cells().chunks(7) {
            let mut line: SpanLine = vec![Span::new("  ")];
            for cell in week {
                line.push(draw_cell(cell, cursor, theme));
            }
            lines.push(line);
        }

        lines.push(Vec::new());
        lines.push(vec![Span::styled(
            "  ←↑↓→ day  PgUp/PgDn month  Space pick  Enter confirm  Esc cancel",
            theme.hint,
        )]);
        lines
    }
}

fn draw_cell(cell: &CalendarCell, cursor: Option<NaiveDate>, theme: &Theme) -> Span {
    let Some(date) = cell.date else {
        return Span::new(" ".repeat(CELL_WIDTH));
    };
    let is_cursor = cursor == Some(date);
    let style = if cell.is_selected {
        theme.selected
    } else if is_cursor {
        theme.cursor
    } else if cell.is_before_minimum {
        theme.disabled
    } else {
        Style::default()
    };
    let (left, right) = if is_cursor { ("[", "]") } else { (" ", " ") };
    Span::styled(format!("{left}{:2}{right}", date.day()), style)
}

// ── Interactive ───────────────────────────────────────────────────────────────

impl Interactive for DatePicker {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.is_open() {
            return InteractionResult::ignored();
        }
        let changed = match key.code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::PageUp | KeyCode::Char('<') => self.previous_month(),
            KeyCode::PageDown | KeyCode::Char('>') => self.next_month(),
            KeyCode::Char(' ') => self.pick_cursor(),
            // Confirms the current pick; the cursor alone selects nothing.
            KeyCode::Enter => return InteractionResult::with_action(WidgetAction::Confirm),
            KeyCode::Esc => return InteractionResult::with_action(WidgetAction::Cancel),
            _ => return InteractionResult::ignored(),
        };
        if changed {
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalSize;
    use crate::ui::span::line_text;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn ctx() -> RenderContext {
        RenderContext::new(TerminalSize {
            width: 80,
            height: 24,
        })
    }

    fn opened() -> DatePicker {
        let mut picker = DatePicker::new();
        picker.open(date(2025, 3, 14), date(2025, 3, 10));
        picker
    }

    #[test]
    fn draws_title_header_and_weeks() {
        let lines = opened().draw(&ctx());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert!(text[0].contains("March 2025"));
        assert!(text[2].contains("Su  Mo  Tu  We  Th  Fr  Sa"));
        // Mar 2025 starts on a Saturday: six leading blanks, then the 1st.
        assert_eq!(text[3], format!("  {}  1 ", " ".repeat(24)));
        assert!(text.iter().any(|line| line.contains("[14]")));
    }

    #[test]
    fn closed_picker_draws_nothing() {
        assert!(DatePicker::new().draw(&ctx()).is_empty());
    }

    #[test]
    fn keys_move_cursor_and_confirm() {
        let mut picker = opened();
        assert!(picker.on_key(KeyEvent::plain(KeyCode::Down)).handled);
        assert_eq!(picker.cursor(), Some(date(2025, 3, 21)));
        assert!(picker.on_key(KeyEvent::plain(KeyCode::Char(' '))).handled);

        let result = picker.on_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(result.actions, vec![WidgetAction::Confirm]);
        assert_eq!(picker.selected_date(), Some(date(2025, 3, 21)));
    }

    #[test]
    fn picking_disabled_day_keeps_previous_pick() {
        let mut picker = opened();
        for _ in 0..5 {
            picker.on_key(KeyEvent::plain(KeyCode::Left));
        }
        assert_eq!(picker.cursor(), Some(date(2025, 3, 9)));
        picker.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(picker.selected_date(), Some(date(2025, 3, 14)));
    }

    #[test]
    fn enter_after_month_change_confirms_original_pick() {
        let mut picker = opened();
        picker.on_key(KeyEvent::plain(KeyCode::PageDown));
        assert_eq!(picker.cursor(), Some(date(2025, 4, 14)));
        let result = picker.on_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(result.actions, vec![WidgetAction::Confirm]);
        assert_eq!(picker.selected_date(), Some(date(2025, 3, 14)));
        assert_eq!(picker.confirm(), Some(date(2025, 3, 14)));
    }

    #[test]
    fn page_keys_change_month() {
        let mut picker = opened();
        picker.on_key(KeyEvent::plain(KeyCode::PageDown));
        assert_eq!(picker.displayed_month().map(|month| month.month()), Some(3));
        picker.on_key(KeyEvent::plain(KeyCode::Char('<')));
        picker.on_key(KeyEvent::plain(KeyCode::Char('<')));
        assert_eq!(picker.displayed_month().map(|month| month.month()), Some(1));
    }

    #[test]
    fn escape_requests_cancel() {
        let mut picker = opened();
        let result = picker.on_key(KeyEvent::plain(KeyCode::Esc));
        assert_eq!(result.actions, vec![WidgetAction::Cancel]);
    }
}
