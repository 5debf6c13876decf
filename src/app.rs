use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::moment::{FormOutcome, MomentForm};
use crate::terminal::{Terminal, TerminalEvent};
use crate::widgets::{Drawable, Interactive, MomentScreen, OtpScreen, RenderContext, WidgetAction};

const TICK: Duration = Duration::from_millis(50);

/// Runs the create-moment screen until it is submitted or dismissed.
/// Ctrl-C counts as cancelling.
pub fn run_moment_form(config: &Config, today: NaiveDate) -> Result<FormOutcome> {
    let mut screen = MomentScreen::new(MomentForm::from_config(config, today));
    let outcome = with_terminal(|terminal| {
        event_loop(terminal, &mut screen, |action| match action {
            WidgetAction::Submitted(draft) => Some(FormOutcome::Submitted(draft)),
            WidgetAction::Cancelled => Some(FormOutcome::Cancelled),
            _ => None,
        })
    })?;
    Ok(outcome.unwrap_or(FormOutcome::Cancelled))
}

/// Runs the verification screen; `None` when the user backs out.
pub fn run_otp(destination: &str, resend_seconds: u32) -> Result<Option<String>> {
    let mut screen = OtpScreen::new(destination, resend_seconds);
    let code = with_terminal(|terminal| {
        event_loop(terminal, &mut screen, |action| match action {
            WidgetAction::Verify(code) => Some(Some(code)),
            WidgetAction::Cancelled => Some(None),
            WidgetAction::Resend => {
                info!("verification code resend requested");
                None
            }
            _ => None,
        })
    })?;
    Ok(code.flatten())
}

fn with_terminal<T>(body: impl FnOnce(&mut Terminal) -> Result<T>) -> Result<T> {
    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = body(&mut terminal);
    terminal.leave()?;
    result
}

/// Draws `screen`, feeds it keys and ticks, and stops at the first action
/// `finish` maps to a value. `None` means the loop was interrupted.
fn event_loop<W, T>(
    terminal: &mut Terminal,
    screen: &mut W,
    mut finish: impl FnMut(WidgetAction) -> Option<T>,
) -> Result<Option<T>>
where
    W: Drawable + Interactive,
{
    let mut render_requested = true;
    let mut last_tick = Instant::now();

    loop {
        if render_requested {
            let ctx = RenderContext::new(terminal.size());
            terminal.render(&screen.draw(&ctx))?;
            render_requested = false;
        }

        match terminal.next_event(TICK)? {
            TerminalEvent::Key(key) if key.is_ctrl_c() => {
                info!("interrupted");
                return Ok(None);
            }
            TerminalEvent::Key(key) => {
                let result = screen.on_key(key);
                render_requested |= result.request_render;
                for action in result.actions {
                    if let Some(done) = finish(action) {
                        return Ok(Some(done));
                    }
                }
            }
            TerminalEvent::Resize(_) => render_requested = true,
            TerminalEvent::Tick => {}
        }

        let now = Instant::now();
        let result = screen.on_tick(now.duration_since(last_tick));
        last_tick = now;
        render_requested |= result.request_render;
    }
}
