use crate::color::{Rgb, interpolate};
use crate::config::RetargetPolicy;

/// Slack allowed when checking whether accumulated progress reached `1.0`
///
/// Repeatedly adding `0.01` in `f32` ends slightly below `1.0`, which would
/// otherwise cost one extra tick.
const PROGRESS_EPSILON: f32 = 1e-4;

/// Color transition driven by fixed progress steps
///
/// The path is always the straight line from `current` (the color the
/// transition started from) to `target`. `current` only moves when the
/// transition settles, so every step is computed from the same origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransition {
    /// Last settled color
    current: Rgb,
    /// Color requested by the most recent write
    target: Rgb,
    /// Color of the last step handed out, equal to `current` while idle
    shown: Rgb,
    /// Completed fraction, zero while idle
    progress: f32,
    in_transition: bool,
}

impl ColorTransition {
    /// Create an idle transition resting at `initial`
    pub const fn new(initial: Rgb) -> Self {
        Self {
            current: initial,
            target: initial,
            shown: initial,
            progress: 0.0,
            in_transition: false,
        }
    }

    pub const fn current(&self) -> Rgb {
        self.current
    }

    pub const fn target(&self) -> Rgb {
        self.target
    }

    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Check if a transition is in progress
    pub const fn is_transitioning(&self) -> bool {
        self.in_transition
    }

    /// Color currently on the output
    ///
    /// While transitioning this is the last step returned by
    /// [`Self::advance`], not the color at the already advanced progress.
    pub const fn displayed(&self) -> Rgb {
        if self.in_transition {
            self.shown
        } else {
            self.current
        }
    }

    /// Point the transition at a new target
    pub fn retarget(&mut self, target: Rgb, policy: RetargetPolicy) {
        if policy == RetargetPolicy::Restart && self.in_transition {
            self.current = self.displayed();
            self.progress = 0.0;
        }
        self.target = target;
        self.in_transition = true;
    }

    /// Advance the transition by one step
    ///
    /// Returns the color to show for this step, or `None` when idle.
    /// Settles once the step color equals the target or progress reaches
    /// `1.0`, whichever comes first.
    pub fn advance(&mut self, step: f32) -> Option<Rgb> {
        if !self.in_transition {
            return None;
        }

        let next = interpolate(self.current, self.target, self.progress);
        self.progress += step;
        self.shown = next;

        if next == self.target || self.progress + PROGRESS_EPSILON >= 1.0 {
            self.current = self.target;
            self.shown = self.target;
            self.progress = 0.0;
            self.in_transition = false;
        }

        Some(next)
    }
}
