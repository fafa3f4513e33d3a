use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::{
    animation::timeline::{Timeline, TimelineId},
    transform::non_linear::{clamp01, exp_ramp, smoothstep},
};

/// Curve mapping timeline progress in `[0, 1]` to an alpha value in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaFunc {
    /// `v = p`.
    #[default]
    RampInc,
    /// `v = 1 - p`.
    RampDec,
    /// Triangle: up over the first half, down over the second.
    Ramp,
    /// One full period, 0 -> 1 -> 0.
    Sine,
    /// Quarter sine, 0 -> 1.
    SineInc,
    /// Quarter cosine, 1 -> 0.
    SineDec,
    /// Half sine, 0 -> 1 -> 0.
    SineHalf,
    /// 0 for the first half, 1 after.
    Square,
    SmoothStepInc,
    SmoothStepDec,
    ExpInc,
    ExpDec,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl AlphaFunc {
    /// Apply this curve to progress `p`. Both input and output are clamped to `[0, 1]`.
    pub fn apply(self, p: f64) -> f64 {
        let t = clamp01(p);
        let v = match self {
            Self::RampInc => t,
            Self::RampDec => 1.0 - t,
            Self::Ramp => {
                if t <= 0.5 {
                    2.0 * t
                } else {
                    2.0 - 2.0 * t
                }
            }
            Self::Sine => (1.0 - (TAU * t).cos()) / 2.0,
            Self::SineInc => (t * FRAC_PI_2).sin(),
            Self::SineDec => (t * FRAC_PI_2).cos(),
            Self::SineHalf => (t * PI).sin(),
            Self::Square => {
                if t < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::SmoothStepInc => smoothstep(t),
            Self::SmoothStepDec => 1.0 - smoothstep(t),
            Self::ExpInc => exp_ramp(t),
            Self::ExpDec => exp_ramp(1.0 - t),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        };
        clamp01(v)
    }

    /// True for curves that end where they started (one hump or full period).
    pub fn is_oscillating(self) -> bool {
        matches!(self, Self::Ramp | Self::Sine | Self::SineHalf)
    }
}

/// An [`AlphaFunc`] bound to one timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Alpha {
    timeline: TimelineId,
    func: AlphaFunc,
}

impl Alpha {
    pub fn new(timeline: TimelineId, func: AlphaFunc) -> Self {
        Self { timeline, func }
    }

    pub fn timeline(&self) -> TimelineId {
        self.timeline
    }

    pub fn func(&self) -> AlphaFunc {
        self.func
    }

    /// Value for an already-sampled progress. Used by the stage, which reads each timeline once
    /// per tick.
    pub fn value_at(&self, progress: f64) -> f64 {
        self.func.apply(progress)
    }

    /// Current value of this alpha. `timeline` must be the one this alpha is bound to.
    pub fn value(&self, timeline: &Timeline) -> f64 {
        self.value_at(timeline.progress())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/alpha.rs"]
mod tests;
