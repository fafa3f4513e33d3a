use std::ops::{Add, Mul, Neg, Sub};

use crate::foundation::error::{BoxflyError, BoxflyResult};

pub use kurbo::{Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> BoxflyResult<Self> {
        if den == 0 {
            return Err(BoxflyError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BoxflyError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Frames elapsed in `msecs`, unfloored so callers can carry the remainder.
    pub fn msecs_to_frames(self, msecs: f64) -> f64 {
        (msecs.max(0.0) / 1000.0) * self.as_f64()
    }
}

/// A rotation axis in the box's local frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn approx_eq(self, other: Vec3, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Rotation about a single axis, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rotation {
    pub axis: Axis,
    pub angle_deg: f64,
}

impl Rotation {
    pub const fn new(axis: Axis, angle_deg: f64) -> Self {
        Self { axis, angle_deg }
    }
}

/// Display surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageSize {
    pub width: f64,
    pub height: f64,
}

impl StageSize {
    pub fn new(width: f64, height: f64) -> BoxflyResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(BoxflyError::configuration(format!(
                "stage size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Camera projection parameters read from the display surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Perspective {
    pub fov_deg: f64,
    pub aspect: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            aspect: 4.0 / 3.0,
            z_near: 1.0,
            z_far: 5.0,
        }
    }
}

impl Perspective {
    pub fn validate(&self) -> BoxflyResult<()> {
        if !(self.z_near.is_finite() && self.z_far.is_finite()) || self.z_near <= 0.0 {
            return Err(BoxflyError::configuration(
                "perspective z_near must be finite and > 0",
            ));
        }
        if self.z_far < self.z_near {
            return Err(BoxflyError::configuration(
                "perspective z_far must be >= z_near",
            ));
        }
        Ok(())
    }

    /// Ratio used to project the stage extent onto the far clip plane.
    pub fn far_ratio(&self) -> f64 {
        self.z_far / self.z_near
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
