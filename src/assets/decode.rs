use std::path::Path;

use crate::{
    assets::texture::{Texture, premultiply_rgba8_in_place},
    foundation::error::{BoxflyResult, ResourceError},
};

/// Decode encoded image bytes into a premultiplied RGBA8 [`Texture`].
///
/// `source` names the texture and is reported in [`ResourceError::DecodeFailed`].
pub fn decode_image(source: &Path, bytes: &[u8]) -> BoxflyResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| ResourceError::DecodeFailed {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    Texture::from_rgba8_premul(name, width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
