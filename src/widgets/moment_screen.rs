use std::time::Duration;

use tracing::debug;

use crate::calendar::format_display_date;
use crate::moment::{Category, FormOutcome, MomentForm, Sheet};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::time_slot::build_time_slots;
use crate::ui::span::{Span, SpanLine, pad_to_width};
use crate::ui::style::Style;
use crate::widgets::list_sheet::ListSheet;
use crate::widgets::traits::{
    Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};

const LABEL_WIDTH: usize = 14;

// ── Fields ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    SubCategory,
    Description,
    StartDate,
    StartTime,
    EndTime,
    Submit,
    Cancel,
}

impl Field {
    pub const ORDER: [Field; 8] = [
        Field::Category,
        Field::SubCategory,
        Field::Description,
        Field::StartDate,
        Field::StartTime,
        Field::EndTime,
        Field::Submit,
        Field::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::SubCategory => "Sub category",
            Self::Description => "Description",
            Self::StartDate => "Start date",
            Self::StartTime => "Start time",
            Self::EndTime => "End time",
            Self::Submit => "Create",
            Self::Cancel => "Cancel",
        }
    }
}

// ── MomentScreen ──────────────────────────────────────────────────────────────

/// Keyboard front-end for the create-moment form.
pub struct MomentScreen {
    form: MomentForm,
    focus: Field,
    list: Option<ListSheet>,
    notice: Option<String>,
    outcome: Option<FormOutcome>,
}

impl MomentScreen {
    pub fn new(form: MomentForm) -> Self {
        Self {
            form,
            focus: Field::Category,
            list: None,
            notice: None,
            outcome: None,
        }
    }

    pub fn form(&self) -> &MomentForm {
        &self.form
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<FormOutcome> {
        self.outcome
    }

    // ── Sheets ────────────────────────────────────────────────────────────────

    fn open_list(&mut self, sheet: Sheet) {
        let list = match sheet {
            Sheet::SubCategory => ListSheet::new(
                "Select sub category",
                self.form.sub_categories().to_vec(),
                self.form.sub_category(),
            ),
            Sheet::StartTime => ListSheet::new(
                "Start time",
                build_time_slots(),
                &self.form.time_range().start.label(),
            ),
            Sheet::EndTime => ListSheet::new(
                "End time",
                build_time_slots(),
                &self.form.time_range().end.label(),
            ),
            Sheet::Date => {
                self.list = None;
                self.form.open_date_picker();
                return;
            }
        };
        self.form.open_sheet(sheet);
        self.list = Some(list);
    }

    fn on_list_key(&mut self, sheet: Sheet, key: KeyEvent) -> InteractionResult {
        let Some(list) = self.list.as_mut() else {
            self.form.close_sheet();
            return InteractionResult::handled();
        };
        let result = list.on_key(key);
        for action in result.actions {
            match action {
                WidgetAction::Choose(label) => {
                    let applied = match sheet {
                        Sheet::SubCategory => self.form.set_sub_category(&label),
                        Sheet::StartTime => self.form.set_start_time(&label),
                        Sheet::EndTime => self.form.set_end_time(&label),
                        Sheet::Date => Ok(()),
                    };
                    if let Err(err) = applied {
                        self.notice = Some(err.to_string());
                    }
                    self.form.close_sheet();
                    self.list = None;
                }
                WidgetAction::Cancel => {
                    self.form.close_sheet();
                    self.list = None;
                }
                _ => {}
            }
        }
        InteractionResult {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    fn on_date_key(&mut self, key: KeyEvent) -> InteractionResult {
        let result = self.form.picker_mut().on_key(key);
        for action in result.actions {
            match action {
                WidgetAction::Confirm => {
                    if let Some(date) = self.form.confirm_date() {
                        debug!(%date, "start date confirmed");
                    }
                }
                WidgetAction::Cancel => self.form.cancel_date(),
                _ => {}
            }
        }
        InteractionResult::handled()
    }

    // ── Fields ────────────────────────────────────────────────────────────────

    fn on_field_key(&mut self, key: KeyEvent) -> InteractionResult {
        let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        match self.focus {
            Field::Category => match key.code {
                KeyCode::Left => self.form.set_category(self.form.category().previous()),
                KeyCode::Right => self.form.set_category(self.form.category().next()),
                _ => return InteractionResult::ignored(),
            },
            Field::Description => return self.on_description_key(key),
            Field::SubCategory if activate => self.open_list(Sheet::SubCategory),
            Field::StartDate if activate => self.open_list(Sheet::Date),
            Field::StartTime if activate => self.open_list(Sheet::StartTime),
            Field::EndTime if activate => self.open_list(Sheet::EndTime),
            Field::Submit if key.code == KeyCode::Enter => return self.submit(),
            Field::Cancel if key.code == KeyCode::Enter => return self.cancel(),
            _ => return InteractionResult::ignored(),
        }
        InteractionResult::handled()
    }

    fn on_description_key(&mut self, key: KeyEvent) -> InteractionResult {
        let mut text = self.form.description().to_string();
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(ch),
            KeyCode::Backspace => {
                if text.pop().is_none() {
                    return InteractionResult::consumed();
                }
            }
            _ => return InteractionResult::ignored(),
        }
        if !self.form.set_description(&text) {
            self.notice = Some(format!(
                "Description is limited to {} characters",
                self.form.description_limit()
            ));
        }
        InteractionResult::handled()
    }

    fn submit(&mut self) -> InteractionResult {
        let draft = self.form.submit();
        self.list = None;
        self.outcome = Some(FormOutcome::Submitted(draft.clone()));
        InteractionResult::with_action(WidgetAction::Submitted(draft))
    }

    fn cancel(&mut self) -> InteractionResult {
        self.list = None;
        self.outcome = Some(self.form.cancel());
        InteractionResult::with_action(WidgetAction::Cancelled)
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn field_line(&self, field: Field, ctx: &RenderContext, value: Vec<Span>) -> SpanLine {
        let theme = &ctx.theme;
        let focused = self.focus == field && self.form.active_sheet().is_none();
        let (marker, label_style) = if focused {
            ("❯ ", theme.focused)
        } else {
            ("  ", theme.label)
        };
        let mut line = vec![
            Span::styled(marker, theme.focused),
            Span::styled(pad_to_width(field.label(), LABEL_WIDTH), label_style),
        ];
        line.extend(value);
        line
    }

    fn category_chips(&self, ctx: &RenderContext) -> Vec<Span> {
        Category::ALL
            .iter()
            .flat_map(|category| {
                let style = if *category == self.form.category() {
                    ctx.theme.category(*category).bold()
                } else {
                    ctx.theme.hint
                };
                [Span::styled(format!(" {category} "), style), Span::new(" ")]
            })
            .collect()
    }

    fn button(&self, field: Field, ctx: &RenderContext) -> Span {
        let style = if self.focus == field && self.form.active_sheet().is_none() {
            ctx.theme.selected
        } else {
            Style::default()
        };
        Span::styled(format!("[ {} ]", field.label()), style)
    }
}

impl Drawable for MomentScreen {
    fn draw(&self, ctx: &RenderContext) -> Vec<SpanLine> {
        let theme = &ctx.theme;
        let range = self.form.time_range();
        let mut lines: Vec<SpanLine> = vec![
            vec![Span::styled("  Create moment", theme.title)],
            Vec::new(),
            self.field_line(Field::Category, ctx, self.category_chips(ctx)),
        ];

        let sub_category = if self.form.sub_category().is_empty() {
            Span::styled("Select sub category ▾", theme.placeholder)
        } else {
            Span::new(format!("{} ▾", self.form.sub_category()))
        };
        lines.push(self.field_line(Field::SubCategory, ctx, vec![sub_category]));

        let description = if self.form.description().is_empty() {
            Span::styled("Write a short note", theme.placeholder)
        } else {
            Span::new(self.form.description().to_string())
        };
        lines.push(self.field_line(Field::Description, ctx, vec![description]));
        lines.push(vec![
            Span::new(" ".repeat(LABEL_WIDTH + 2)),
            Span::styled(self.form.description_counter(), theme.hint),
        ]);

        lines.push(self.field_line(
            Field::StartDate,
            ctx,
            vec![Span::new(format_display_date(self.form.start_date()))],
        ));
        lines.push(self.field_line(
            Field::StartTime,
            ctx,
            vec![Span::new(range.start.label())],
        ));
        lines.push(self.field_line(
            Field::EndTime,
            ctx,
            vec![
                Span::new(range.end.label()),
                Span::new("  "),
                Span::styled(self.form.duration_label(), theme.success),
            ],
        ));
        lines.push(Vec::new());

        for issue in self.form.draft().issues() {
            lines.push(vec![Span::styled(format!("  · {issue}"), theme.hint)]);
        }
        lines.push(vec![
            Span::new("  "),
            self.button(Field::Submit, ctx),
            Span::new("  "),
            self.button(Field::Cancel, ctx),
        ]);
        if let Some(notice) = &self.notice {
            lines.push(vec![Span::styled(format!("  {notice}"), theme.error)]);
        }

        lines.push(Vec::new());
        match self.form.active_sheet() {
            Some(Sheet::Date) => lines.extend(self.form.picker().draw(ctx)),
            Some(_) => {
                if let Some(list) = &self.list {
                    lines.extend(list.draw(ctx));
                }
            }
            None => lines.push(vec![Span::styled(
                "  Tab/↑↓ field  ←→ category  Enter open  Esc cancel",
                theme.hint,
            )]),
        }
        lines
    }
}

impl Interactive for MomentScreen {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.outcome.is_some() {
            return InteractionResult::ignored();
        }
        match self.form.active_sheet() {
            Some(Sheet::Date) => return self.on_date_key(key),
            Some(sheet) => return self.on_list_key(sheet, key),
            None => {}
        }

        self.notice = None;
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                InteractionResult::handled()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                InteractionResult::handled()
            }
            KeyCode::Esc => self.cancel(),
            _ => self.on_field_key(key),
        }
    }

    fn on_tick(&mut self, elapsed: Duration) -> InteractionResult {
        match self.list.as_mut() {
            Some(list) => list.on_tick(elapsed),
            None => InteractionResult::ignored(),
        }
    }
}
