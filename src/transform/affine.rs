//! Affine transform helpers.
//!
//! [`Affine3`] is a 4x4 column-major matrix for rigid 3D placement of faces and boxes. Angles
//! are in degrees; rotations follow the right-hand rule about the given axis.

use std::ops::Mul;

use crate::foundation::core::{Axis, Rotation, Vec3};

/// Column-major 4x4 affine transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Affine3 {
    /// Matrix entries, column by column.
    pub cols: [f64; 16],
}

impl Default for Affine3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine3 {
    /// The identity transform.
    pub const IDENTITY: Affine3 = Affine3 {
        cols: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Translation by `v`.
    pub fn translate(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[12] = v.x;
        m.cols[13] = v.y;
        m.cols[14] = v.z;
        m
    }

    /// Rotation of `angle_deg` degrees about `axis`.
    pub fn rotate(axis: Axis, angle_deg: f64) -> Self {
        let (s, c) = snap_sin_cos(angle_deg);
        let mut m = Self::IDENTITY;
        match axis {
            Axis::X => {
                m.cols[5] = c;
                m.cols[6] = s;
                m.cols[9] = -s;
                m.cols[10] = c;
            }
            Axis::Y => {
                m.cols[0] = c;
                m.cols[2] = -s;
                m.cols[8] = s;
                m.cols[10] = c;
            }
            Axis::Z => {
                m.cols[0] = c;
                m.cols[1] = s;
                m.cols[4] = -s;
                m.cols[5] = c;
            }
        }
        m
    }

    pub fn from_rotation(r: Rotation) -> Self {
        Self::rotate(r.axis, r.angle_deg)
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.cols[col * 4 + row]
    }

    /// Apply this transform to a point (w = 1).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.at(0, 0) * p.x + self.at(0, 1) * p.y + self.at(0, 2) * p.z + self.at(0, 3),
            self.at(1, 0) * p.x + self.at(1, 1) * p.y + self.at(1, 2) * p.z + self.at(1, 3),
            self.at(2, 0) * p.x + self.at(2, 1) * p.y + self.at(2, 2) * p.z + self.at(2, 3),
        )
    }

    /// Apply the linear part of this transform to a direction (w = 0).
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z,
            self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z,
            self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z,
        )
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.cols[12], self.cols[13], self.cols[14])
    }
}

impl Mul for Affine3 {
    type Output = Affine3;

    fn mul(self, rhs: Affine3) -> Affine3 {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| self.at(row, k) * rhs.at(k, col)).sum();
            }
        }
        Affine3 { cols: out }
    }
}

// Quarter turns are exact so composed face matrices stay free of 1e-17 noise.
fn snap_sin_cos(angle_deg: f64) -> (f64, f64) {
    let turns = angle_deg / 90.0;
    if turns.fract() == 0.0 {
        return match (turns as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    angle_deg.to_radians().sin_cos()
}

#[inline]
pub fn compose(a: Affine3, b: Affine3) -> Affine3 {
    a * b
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
