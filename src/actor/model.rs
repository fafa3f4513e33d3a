use crate::{
    animation::behaviour::ChannelValue,
    assets::texture::Texture,
    foundation::core::{Axis, Point, Rect, Rotation, Vec2, Vec3},
    transform::affine::Affine3,
};

/// Index of a box owned by a [`crate::Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BoxId(pub u32);

impl BoxId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceKind {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl FaceKind {
    /// Assembly order; also the order of [`BoxActor::faces`].
    pub const ALL: [FaceKind; 6] = [
        FaceKind::Front,
        FaceKind::Back,
        FaceKind::Left,
        FaceKind::Right,
        FaceKind::Bottom,
        FaceKind::Top,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Front => 0,
            Self::Back => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::Bottom => 4,
            Self::Top => 5,
        }
    }
}

/// One textured panel of a box, fixed relative to the box after assembly.
#[derive(Clone, Debug)]
pub struct Face {
    kind: FaceKind,
    texture: Texture,
    width: f64,
    height: f64,
    rotation: Rotation,
    anchor: Vec2, // pivot in local unrotated space; always the panel centre
    offset: Vec3, // where the anchor lands in the box frame
}

impl Face {
    pub(crate) fn new(
        kind: FaceKind,
        texture: Texture,
        width: f64,
        height: f64,
        rotation: Rotation,
        offset: Vec3,
    ) -> Self {
        Self {
            kind,
            texture,
            width,
            height,
            rotation,
            anchor: Vec2::new(width / 2.0, height / 2.0),
            offset,
        }
    }

    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// In-plane part of the offset.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.offset.x, self.offset.y)
    }

    pub fn depth(&self) -> f64 {
        self.offset.z
    }

    /// Face-local to box-local transform.
    pub fn local_transform(&self) -> Affine3 {
        // Canonical order:
        // T(offset) * R(rotation) * T(-anchor)
        Affine3::translate(self.offset)
            * Affine3::from_rotation(self.rotation)
            * Affine3::translate(Vec3::new(-self.anchor.x, -self.anchor.y, 0.0))
    }

    /// Unit normal pointing away from the box centre.
    pub fn normal(&self) -> Vec3 {
        Affine3::from_rotation(self.rotation).transform_vector(Vec3::new(0.0, 0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Rotation in degrees about each box axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisAngles {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, angle_deg: f64) {
        match axis {
            Axis::X => self.x = angle_deg,
            Axis::Y => self.y = angle_deg,
            Axis::Z => self.z = angle_deg,
        }
    }
}

/// Everything a behaviour may change on a box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxState {
    pub position: Point,
    pub depth: f64,
    pub rotation: AxisAngles,
}

impl Default for BoxState {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            depth: 0.0,
            rotation: AxisAngles::default(),
        }
    }
}

/// Six faces cloned from one texture, forming a prism centred on the local origin.
#[derive(Clone, Debug)]
pub struct BoxActor {
    faces: [Face; 6],
    size: BoxSize,
    state: BoxState,
}

impl BoxActor {
    pub(crate) fn from_faces(faces: [Face; 6], size: BoxSize) -> Self {
        Self {
            faces,
            size,
            state: BoxState::default(),
        }
    }

    pub fn faces(&self) -> &[Face; 6] {
        &self.faces
    }

    pub fn face(&self, kind: FaceKind) -> &Face {
        &self.faces[kind.slot()]
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    pub fn texture(&self) -> &Texture {
        self.faces[0].texture()
    }

    pub fn state(&self) -> &BoxState {
        &self.state
    }

    pub fn position(&self) -> Point {
        self.state.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.state.position = position;
    }

    pub fn depth(&self) -> f64 {
        self.state.depth
    }

    pub fn set_depth(&mut self, depth: f64) {
        self.state.depth = depth;
    }

    pub fn rotation(&self, axis: Axis) -> f64 {
        self.state.rotation.get(axis)
    }

    pub fn set_rotation(&mut self, axis: Axis, angle_deg: f64) {
        self.state.rotation.set(axis, angle_deg);
    }

    /// Write a behaviour's output to the matching field.
    pub fn apply_channel(&mut self, value: ChannelValue) {
        match value {
            ChannelValue::Rotation(axis, angle) => self.set_rotation(axis, angle),
            ChannelValue::Depth(depth) => self.set_depth(depth),
            ChannelValue::Position(p) => self.set_position(p),
        }
    }

    /// Box-local to stage transform for the current state.
    pub fn world_transform(&self) -> Affine3 {
        let s = &self.state;
        // Canonical order:
        // T(position, depth) * R(z) * R(y) * R(x)
        Affine3::translate(Vec3::new(s.position.x, s.position.y, s.depth))
            * Affine3::rotate(Axis::Z, s.rotation.z)
            * Affine3::rotate(Axis::Y, s.rotation.y)
            * Affine3::rotate(Axis::X, s.rotation.x)
    }

    pub fn face_world_transform(&self, kind: FaceKind) -> Affine3 {
        self.world_transform() * self.face(kind).local_transform()
    }

    /// Screen-plane footprint (width x height around the position), ignoring rotation and
    /// depth.
    pub fn footprint(&self) -> Rect {
        Rect::from_center_size(self.state.position, (self.size.width, self.size.height))
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.footprint().contains(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actor/model.rs"]
mod tests;
