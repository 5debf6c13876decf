use tracing::debug;

pub const OTP_LENGTH: usize = 4;
pub const DEFAULT_RESEND_SECONDS: u32 = 59;

// ── Code entry ────────────────────────────────────────────────────────────────

/// Four single-digit boxes with auto-advancing focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpEntry {
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
}

impl OtpEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn digits(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.digits
    }

    /// Fills the focused box and moves to the next one. Non-digits are
    /// ignored.
    pub fn input(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() {
            return false;
        }
        self.digits[self.focus] = Some(ch);
        if self.focus + 1 < OTP_LENGTH {
            self.focus += 1;
        }
        true
    }

    /// Clears the focused box, or steps back when it is already empty.
    pub fn backspace(&mut self) -> bool {
        if self.digits[self.focus].is_some() {
            self.digits[self.focus] = None;
            return true;
        }
        if self.focus == 0 {
            return false;
        }
        self.focus -= 1;
        self.digits[self.focus] = None;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    /// The entered code once every box is filled.
    pub fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ── Resend countdown ──────────────────────────────────────────────────────────

/// Seconds until another code may be requested. Driven by one `tick` per
/// second from the owner's event loop, so dropping the owner stops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCountdown {
    period: u32,
    remaining: u32,
}

impl ResendCountdown {
    pub fn new(period: u32) -> Self {
        Self {
            period,
            remaining: period,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// Returns true while the displayed value changed.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Starts a new period if the previous one ran out.
    pub fn restart(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        debug!(period = self.period, "otp resend countdown restarted");
        self.remaining = self.period;
        true
    }
}

impl Default for ResendCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_SECONDS)
    }
}
