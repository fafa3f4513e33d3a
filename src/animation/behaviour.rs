use std::fmt;

use crate::{
    animation::alpha::Alpha,
    foundation::core::{Axis, Point},
    foundation::error::{BoxflyError, BoxflyResult},
    transform::linear::{lerp, lerp_point},
};

/// Index of a behaviour owned by a [`crate::Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BehaviourId(pub u32);

impl BehaviourId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Independent transform channel of a box. At most one behaviour drives a channel per box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Channel {
    Rotation(Axis),
    Depth,
    Position,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotation(axis) => write!(f, "rotation-{}", axis.name()),
            Self::Depth => f.write_str("depth"),
            Self::Position => f.write_str("position"),
        }
    }
}

/// A value produced by a behaviour for one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChannelValue {
    Rotation(Axis, f64),
    Depth(f64),
    Position(Point),
}

impl ChannelValue {
    pub fn channel(&self) -> Channel {
        match *self {
            Self::Rotation(axis, _) => Channel::Rotation(axis),
            Self::Depth(_) => Channel::Depth,
            Self::Position(_) => Channel::Position,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDirection {
    /// Angles increase from start to end; an end below the start wraps forward by whole turns.
    #[default]
    Clockwise,
    /// Angles decrease from start to end; an end above the start wraps back by whole turns.
    CounterClockwise,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BehaviourKind {
    Rotate {
        axis: Axis,
        direction: RotateDirection,
        angle_start: f64,
        angle_end: f64,
    },
    Depth {
        depth_start: f64,
        depth_end: f64,
    },
    Path {
        waypoints: Vec<Point>,
    },
}

/// Stateless transform rule driven by an [`Alpha`].
///
/// A behaviour only maps an alpha value onto its channel; the [`crate::Stage`] decides which
/// boxes receive the result.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BehaviourRepr")]
pub struct Behaviour {
    alpha: Alpha,
    kind: BehaviourKind,
}

// Deserialized form; converted through the checked constructors.
#[derive(serde::Deserialize)]
struct BehaviourRepr {
    alpha: Alpha,
    kind: BehaviourKind,
}

impl TryFrom<BehaviourRepr> for Behaviour {
    type Error = BoxflyError;

    fn try_from(repr: BehaviourRepr) -> BoxflyResult<Self> {
        match repr.kind {
            BehaviourKind::Rotate {
                axis,
                direction,
                angle_start,
                angle_end,
            } => Self::rotate(repr.alpha, axis, direction, angle_start, angle_end),
            BehaviourKind::Depth {
                depth_start,
                depth_end,
            } => Self::depth(repr.alpha, depth_start, depth_end),
            BehaviourKind::Path { waypoints } => Self::path(repr.alpha, waypoints),
        }
    }
}

impl Behaviour {
    pub fn rotate(
        alpha: Alpha,
        axis: Axis,
        direction: RotateDirection,
        angle_start: f64,
        angle_end: f64,
    ) -> BoxflyResult<Self> {
        if !(angle_start.is_finite() && angle_end.is_finite()) {
            return Err(BoxflyError::configuration("rotate angles must be finite"));
        }
        Ok(Self {
            alpha,
            kind: BehaviourKind::Rotate {
                axis,
                direction,
                angle_start,
                angle_end,
            },
        })
    }

    pub fn depth(alpha: Alpha, depth_start: f64, depth_end: f64) -> BoxflyResult<Self> {
        if !(depth_start.is_finite() && depth_end.is_finite()) {
            return Err(BoxflyError::configuration("depth range must be finite"));
        }
        Ok(Self {
            alpha,
            kind: BehaviourKind::Depth {
                depth_start,
                depth_end,
            },
        })
    }

    pub fn path(alpha: Alpha, waypoints: Vec<Point>) -> BoxflyResult<Self> {
        if waypoints.len() < 2 {
            return Err(BoxflyError::configuration(format!(
                "path needs at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if waypoints.iter().any(|p| !p.is_finite()) {
            return Err(BoxflyError::configuration("path waypoints must be finite"));
        }
        Ok(Self {
            alpha,
            kind: BehaviourKind::Path { waypoints },
        })
    }

    pub fn alpha(&self) -> &Alpha {
        &self.alpha
    }

    pub fn kind(&self) -> &BehaviourKind {
        &self.kind
    }

    pub fn channel(&self) -> Channel {
        match &self.kind {
            BehaviourKind::Rotate { axis, .. } => Channel::Rotation(*axis),
            BehaviourKind::Depth { .. } => Channel::Depth,
            BehaviourKind::Path { .. } => Channel::Position,
        }
    }

    /// Map alpha value `v` onto this behaviour's channel.
    pub fn sample(&self, v: f64) -> ChannelValue {
        match &self.kind {
            BehaviourKind::Rotate {
                axis,
                direction,
                angle_start,
                angle_end,
            } => {
                let end = resolve_end_angle(*angle_start, *angle_end, *direction);
                ChannelValue::Rotation(*axis, lerp(*angle_start, end, v))
            }
            BehaviourKind::Depth {
                depth_start,
                depth_end,
            } => ChannelValue::Depth(lerp(*depth_start, *depth_end, v)),
            BehaviourKind::Path { waypoints } => ChannelValue::Position(sample_path(waypoints, v)),
        }
    }
}

fn resolve_end_angle(start: f64, end: f64, direction: RotateDirection) -> f64 {
    match direction {
        RotateDirection::Clockwise if end < start => {
            end + ((start - end) / 360.0).ceil() * 360.0
        }
        RotateDirection::CounterClockwise if end > start => {
            end - ((end - start) / 360.0).ceil() * 360.0
        }
        _ => end,
    }
}

fn sample_path(waypoints: &[Point], v: f64) -> Point {
    let n = waypoints.len();
    match waypoints {
        [] => return Point::ZERO,
        [only] => return *only,
        [a, b] => return lerp_point(*a, *b, v),
        _ => {}
    }
    let scaled = v.clamp(0.0, 1.0) * (n - 1) as f64;
    let segment = (scaled.floor() as usize).min(n - 2);
    let t = scaled - segment as f64;
    lerp_point(waypoints[segment], waypoints[segment + 1], t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/behaviour.rs"]
mod tests;
