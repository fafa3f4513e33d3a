use crate::{
    actor::model::{BoxActor, BoxSize, Face, FaceKind},
    assets::texture::Texture,
    foundation::core::{Axis, Rotation, Vec3},
    foundation::error::{BoxflyError, BoxflyResult},
};

/// Build a `width` x `height` x `depth` box from six clones of `texture`.
///
/// Every face is anchored at its own centre, turned to face outward and pushed out by half the
/// box dimension along its normal, so the box is centred on its local origin. `depth == 0` is
/// allowed and yields a flat box. Negative or non-finite sizes are rejected before any face is
/// built.
#[tracing::instrument(skip(texture), fields(texture = texture.name()))]
pub fn compose_box(
    texture: &Texture,
    width: f64,
    height: f64,
    depth: f64,
) -> BoxflyResult<BoxActor> {
    for (name, v) in [("width", width), ("height", height), ("depth", depth)] {
        if !v.is_finite() || v < 0.0 {
            return Err(BoxflyError::configuration(format!(
                "box {name} must be a finite non-negative size, got {v}"
            )));
        }
    }

    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let face = |kind, w, h, axis, angle, offset| {
        Face::new(
            kind,
            texture.clone(),
            w,
            h,
            Rotation::new(axis, angle),
            offset,
        )
    };

    let faces = [
        face(FaceKind::Front, width, height, Axis::Y, 0.0, Vec3::new(0.0, 0.0, hd)),
        face(FaceKind::Back, width, height, Axis::Y, 180.0, Vec3::new(0.0, 0.0, -hd)),
        face(FaceKind::Left, depth, height, Axis::Y, 90.0, Vec3::new(hw, 0.0, 0.0)),
        face(FaceKind::Right, depth, height, Axis::Y, -90.0, Vec3::new(-hw, 0.0, 0.0)),
        face(FaceKind::Bottom, width, depth, Axis::X, 90.0, Vec3::new(0.0, -hh, 0.0)),
        face(FaceKind::Top, width, depth, Axis::X, -90.0, Vec3::new(0.0, hh, 0.0)),
    ];

    tracing::debug!(width, height, depth, "box composed");
    Ok(BoxActor::from_faces(
        faces,
        BoxSize {
            width,
            height,
            depth,
        },
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/actor/compose.rs"]
mod tests;
