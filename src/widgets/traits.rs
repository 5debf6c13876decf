use std::time::Duration;

use crate::moment::MomentDraft;
use crate::terminal::{KeyEvent, TerminalSize};
use crate::ui::span::SpanLine;
use crate::ui::theme::Theme;

// ── Render context ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub theme: Theme,
    pub terminal_size: TerminalSize,
}

impl RenderContext {
    pub fn new(terminal_size: TerminalSize) -> Self {
        Self {
            theme: Theme::default(),
            terminal_size,
        }
    }
}

// ── Drawable ──────────────────────────────────────────────────────────────────

pub trait Drawable {
    fn draw(&self, ctx: &RenderContext) -> Vec<SpanLine>;
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    /// A sheet accepted its current value.
    Confirm,
    /// A sheet was dismissed without a value.
    Cancel,
    /// A list sheet picked one of its entries.
    Choose(String),
    Submitted(MomentDraft),
    Cancelled,
    Verify(String),
    Resend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}

// ── Interactive ───────────────────────────────────────────────────────────────

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// Called between key events with the time since the previous tick.
    fn on_tick(&mut self, _elapsed: Duration) -> InteractionResult {
        InteractionResult::ignored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_actions_and_flags() {
        let mut result = InteractionResult::consumed();
        result.merge(InteractionResult::with_action(WidgetAction::Confirm));
        assert!(result.handled);
        assert!(result.request_render);
        assert_eq!(result.actions, vec![WidgetAction::Confirm]);
    }
}
