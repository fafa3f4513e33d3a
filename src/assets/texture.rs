use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::decode_image,
    foundation::error::{BoxflyError, BoxflyResult, ResourceError},
};

#[derive(Debug)]
struct TextureData {
    name: String,
    width: u32,
    height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    rgba8_premul: Vec<u8>,
}

/// Immutable 2D image handle.
///
/// Cloning a `Texture` shares the pixel buffer, which is how each of a box's six faces
/// references the one texture the scene loaded.
#[derive(Clone, Debug)]
pub struct Texture {
    data: Arc<TextureData>,
}

impl Texture {
    /// Wrap an already premultiplied RGBA8 buffer.
    pub fn from_rgba8_premul(
        name: impl Into<String>,
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> BoxflyResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8_premul.len() != expected {
            return Err(BoxflyError::configuration(format!(
                "texture buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            data: Arc::new(TextureData {
                name: name.into(),
                width,
                height,
                rgba8_premul,
            }),
        })
    }

    /// A single-colour texture from straight (non-premultiplied) RGBA.
    pub fn solid(name: impl Into<String>, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        let count = (width as usize) * (height as usize);
        let mut buf = Vec::with_capacity(count * 4);
        for _ in 0..count {
            buf.extend_from_slice(&px);
        }
        Self {
            data: Arc::new(TextureData {
                name: name.into(),
                width,
                height,
                rgba8_premul: buf,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }

    pub fn rgba8_premul(&self) -> &[u8] {
        &self.data.rgba8_premul
    }

    /// True when both handles point at the same pixel buffer.
    pub fn shares_pixels_with(&self, other: &Texture) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Number of live handles (scene copy plus every face clone).
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Source of textures for scene assembly.
pub trait TextureProvider {
    /// Load the texture at `path`. Failures are [`ResourceError`]s and are fatal to assembly.
    fn load_texture(&self, path: &Path) -> BoxflyResult<Texture>;
}

/// Loads textures from disk through the `image` crate.
#[derive(Clone, Debug)]
pub struct ImageTextureProvider {
    root: PathBuf,
}

impl ImageTextureProvider {
    /// Relative paths are resolved against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl TextureProvider for ImageTextureProvider {
    #[tracing::instrument(skip(self))]
    fn load_texture(&self, path: &Path) -> BoxflyResult<Texture> {
        let full = self.resolve(path);
        let bytes = match std::fs::read(&full) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ResourceError::NotFound { path: full }.into());
            }
            Err(e) => {
                return Err(BoxflyError::Other(
                    anyhow::Error::new(e).context(format!("read texture '{}'", full.display())),
                ));
            }
        };
        let texture = decode_image(&full, &bytes)?;
        tracing::debug!(
            path = %full.display(),
            width = texture.width(),
            height = texture.height(),
            "texture loaded"
        );
        Ok(texture)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
