use std::time::Duration;

use crate::otp::{OtpEntry, ResendCountdown};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::widgets::traits::{
    Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
};

const SECOND: Duration = Duration::from_secs(1);

/// Verification step: four code boxes plus the resend countdown.
pub struct OtpScreen {
    destination: String,
    entry: OtpEntry,
    countdown: ResendCountdown,
    pending: Duration,
}

impl OtpScreen {
    pub fn new(destination: impl Into<String>, resend_seconds: u32) -> Self {
        Self {
            destination: destination.into(),
            entry: OtpEntry::new(),
            countdown: ResendCountdown::new(resend_seconds),
            pending: Duration::ZERO,
        }
    }

    pub fn entry(&self) -> &OtpEntry {
        &self.entry
    }

    pub fn countdown(&self) -> &ResendCountdown {
        &self.countdown
    }
}

impl Drawable for OtpScreen {
    fn draw(&self, ctx: &RenderContext) -> Vec<SpanLine> {
        let theme = &ctx.theme;
        let mut boxes: SpanLine = vec![Span::new("  ")];
        for (index, digit) in self.entry.digits().iter().enumerate() {
            let style = if index == self.entry.focus() {
                theme.focused
            } else {
                theme.label
            };
            boxes.push(Span::styled(format!("[{}]", digit.unwrap_or(' ')), style));
            boxes.push(Span::new(" "));
        }

        let resend = if self.countdown.can_resend() {
            Span::styled("  Didn't get it? Press r to resend", theme.hint)
        } else {
            Span::styled(
                format!("  Resend code in 0:{:02}", self.countdown.remaining()),
                theme.hint,
            )
        };

        vec![
            vec![Span::styled("  Verify it's you", theme.title)],
            vec![Span::styled(
                format!("  Enter the code sent to {}", self.destination),
                theme.label,
            )],
            Vec::new(),
            boxes,
            Vec::new(),
            vec![resend],
        ]
    }
}

impl Interactive for OtpScreen {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char('r') => {
                if self.countdown.restart() {
                    self.entry.clear();
                    self.pending = Duration::ZERO;
                    return InteractionResult::with_action(WidgetAction::Resend);
                }
                InteractionResult::consumed()
            }
            KeyCode::Char(ch) => {
                if !self.entry.input(ch) {
                    return InteractionResult::consumed();
                }
                match self.entry.code() {
                    Some(code) => InteractionResult::with_action(WidgetAction::Verify(code)),
                    None => InteractionResult::handled(),
                }
            }
            KeyCode::Backspace => {
                if self.entry.backspace() {
                    InteractionResult::handled()
                } else {
                    InteractionResult::consumed()
                }
            }
            KeyCode::Esc => InteractionResult::with_action(WidgetAction::Cancelled),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_tick(&mut self, elapsed: Duration) -> InteractionResult {
        self.pending += elapsed;
        let mut changed = false;
        while self.pending >= SECOND {
            self.pending -= SECOND;
            changed |= self.countdown.tick();
        }
        if changed {
            InteractionResult::handled()
        } else {
            InteractionResult::ignored()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalSize;
    use crate::ui::span::line_text;

    fn drawn(screen: &OtpScreen) -> Vec<String> {
        let ctx = RenderContext::new(TerminalSize {
            width: 80,
            height: 24,
        });
        screen.draw(&ctx).iter().map(line_text).collect()
    }

    #[test]
    fn fourth_digit_requests_verification() {
        let mut screen = OtpScreen::new("+91 98765 43210", 59);
        for ch in ['4', '2', '0'] {
            assert!(screen.on_key(KeyEvent::plain(KeyCode::Char(ch))).actions.is_empty());
        }
        let result = screen.on_key(KeyEvent::plain(KeyCode::Char('7')));
        assert_eq!(result.actions, vec![WidgetAction::Verify("4207".to_string())]);
        assert!(drawn(&screen).iter().any(|line| line == "  [4] [2] [0] [7] "));
    }

    #[test]
    fn countdown_follows_ticks() {
        let mut screen = OtpScreen::new("a@b.c", 2);
        assert!(!screen.on_tick(Duration::from_millis(600)).handled);
        assert!(screen.on_tick(Duration::from_millis(600)).handled);
        assert_eq!(screen.countdown().remaining(), 1);
        assert!(drawn(&screen).iter().any(|line| line.contains("Resend code in 0:01")));

        screen.on_tick(SECOND);
        assert!(screen.countdown().can_resend());
        assert!(drawn(&screen).iter().any(|line| line.contains("Press r to resend")));
    }

    #[test]
    fn resend_only_after_countdown() {
        let mut screen = OtpScreen::new("a@b.c", 1);
        screen.on_key(KeyEvent::plain(KeyCode::Char('5')));
        assert!(screen.on_key(KeyEvent::plain(KeyCode::Char('r'))).actions.is_empty());

        screen.on_tick(SECOND);
        let result = screen.on_key(KeyEvent::plain(KeyCode::Char('r')));
        assert_eq!(result.actions, vec![WidgetAction::Resend]);
        assert_eq!(screen.entry().digits()[0], None);
        assert_eq!(screen.countdown().remaining(), 1);
    }
}
