//! Named animation presets consumed by the presentation layer. This module
//! only describes curves; nothing here runs an animation.

use serde::Serialize;

pub const DEFAULT_DURATION_MS: u32 = 250;
pub const STAGGER_STEP_MS: u32 = 50;
pub const DEFAULT_PRESS_SCALE: f32 = 0.96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Easing {
    Standard,
    Decelerate,
    Accelerate,
    Linear,
}

impl Easing {
    /// Cubic bezier control points `(x1, y1, x2, y2)`.
    pub fn control_points(self) -> (f32, f32, f32, f32) {
        match self {
            Self::Standard => (0.2, 0.0, 0.0, 1.0),
            Self::Decelerate => (0.0, 0.0, 0.0, 1.0),
            Self::Accelerate => (0.3, 0.0, 0.8, 0.15),
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingConfig {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl TimingConfig {
    pub const FAST: Self = Self {
        duration_ms: 180,
        easing: Easing::Standard,
    };
    pub const DEFAULT: Self = Self {
        duration_ms: DEFAULT_DURATION_MS,
        easing: Easing::Standard,
    };
    pub const SLOW: Self = Self {
        duration_ms: 320,
        easing: Easing::Decelerate,
    };
    pub const EXIT: Self = Self {
        duration_ms: 200,
        easing: Easing::Accelerate,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpringConfig {
    pub damping: f32,
    pub stiffness: f32,
    pub mass: f32,
    pub overshoot_clamping: bool,
}

impl SpringConfig {
    pub const DEFAULT: Self = Self {
        damping: 15.0,
        stiffness: 150.0,
        mass: 1.0,
        overshoot_clamping: false,
    };
    /// Heavily damped, no bounce.
    pub const SMOOTH: Self = Self {
        damping: 20.0,
        stiffness: 100.0,
        mass: 1.0,
        overshoot_clamping: true,
    };
    pub const BOUNCY: Self = Self {
        damping: 10.0,
        stiffness: 200.0,
        mass: 1.0,
        overshoot_clamping: false,
    };

    /// `damping / (2 * sqrt(stiffness * mass))`; below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Motion {
    Fade,
    FadeDown,
    FadeUp,
    Zoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Curve {
    Timing(TimingConfig),
    Spring(SpringConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub motion: Motion,
    pub delay_ms: u32,
    pub curve: Curve,
}

impl Transition {
    fn timed(motion: Motion, duration_ms: u32) -> Self {
        Self {
            motion,
            delay_ms: 0,
            curve: Curve::Timing(TimingConfig {
                duration_ms,
                easing: Easing::Standard,
            }),
        }
    }

    fn sprung(motion: Motion) -> Self {
        Self {
            motion,
            delay_ms: 0,
            curve: Curve::Spring(SpringConfig::DEFAULT),
        }
    }

    pub fn delayed(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetConfig {
    pub entering: Transition,
    pub exiting: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Preset {
    Fade,
    /// Cards and list items.
    SlideUp,
    /// Dropdowns and top notifications.
    SlideDown,
    /// Modals and dialogs.
    Scale,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Fade, Preset::SlideUp, Preset::SlideDown, Preset::Scale];

    pub fn config(self) -> PresetConfig {
        match self {
            Self::Fade => PresetConfig {
                entering: Transition::timed(Motion::Fade, DEFAULT_DURATION_MS),
                exiting: Transition::timed(Motion::Fade, DEFAULT_DURATION_MS),
            },
            Self::SlideUp => PresetConfig {
                entering: Transition::sprung(Motion::FadeDown),
                exiting: Transition::timed(Motion::FadeDown, 200),
            },
            Self::SlideDown => PresetConfig {
                entering: Transition::sprung(Motion::FadeUp),
                exiting: Transition::timed(Motion::FadeUp, 200),
            },
            Self::Scale => PresetConfig {
                entering: Transition::sprung(Motion::Zoom),
                exiting: Transition::timed(Motion::Zoom, 200),
            },
        }
    }
}

/// List entrance for the item at `index`: each item starts 50 ms after the
/// previous one.
pub fn staggered_slide_up(index: usize) -> PresetConfig {
    let delay = u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(STAGGER_STEP_MS);
    PresetConfig {
        entering: Transition::sprung(Motion::FadeDown).delayed(delay),
        exiting: Transition::timed(Motion::Fade, 150),
    }
}

/// Scale-down feedback while a pressable is held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressScale {
    pub pressed_scale: f32,
    pub spring: SpringConfig,
}

impl Default for PressScale {
    fn default() -> Self {
        Self {
            pressed_scale: DEFAULT_PRESS_SCALE,
            spring: SpringConfig::SMOOTH,
        }
    }
}

impl PressScale {
    pub fn target(&self, pressed: bool) -> f32 {
        if pressed { self.pressed_scale } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timings_stay_within_motion_budget() {
        for timing in [
            TimingConfig::FAST,
            TimingConfig::DEFAULT,
            TimingConfig::SLOW,
            TimingConfig::EXIT,
        ] {
            assert!((180..=320).contains(&timing.duration_ms));
        }
    }

    #[test]
    fn smooth_spring_does_not_overshoot() {
        assert!(SpringConfig::SMOOTH.overshoot_clamping);
        assert!(SpringConfig::SMOOTH.damping_ratio() > SpringConfig::DEFAULT.damping_ratio());
        assert!(SpringConfig::BOUNCY.damping_ratio() < SpringConfig::DEFAULT.damping_ratio());
    }

    #[test]
    fn sprung_presets_enter_with_default_spring() {
        for preset in [Preset::SlideUp, Preset::SlideDown, Preset::Scale] {
            assert_eq!(
                preset.config().entering.curve,
                Curve::Spring(SpringConfig::DEFAULT)
            );
        }
        assert_eq!(
            Preset::Fade.config().entering.curve,
            Curve::Timing(TimingConfig::DEFAULT)
        );
    }

    #[test]
    fn stagger_delays_by_index() {
        assert_eq!(staggered_slide_up(0).entering.delay_ms, 0);
        assert_eq!(staggered_slide_up(3).entering.delay_ms, 150);
        assert_eq!(staggered_slide_up(usize::MAX).entering.delay_ms, u32::MAX);
    }

    #[test]
    fn press_scale_targets() {
        let press = PressScale::default();
        assert_eq!(press.target(true), 0.96);
        assert_eq!(press.target(false), 1.0);
    }
}
