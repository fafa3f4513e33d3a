use std::path::PathBuf;

use crate::animation::behaviour::Channel;

/// Convenience result type used across boxfly.
pub type BoxflyResult<T> = Result<T, BoxflyError>;

/// Top-level error taxonomy used by the scene and animation APIs.
#[derive(thiserror::Error, Debug)]
pub enum BoxflyError {
    /// Invalid sizes, grids, timelines or behaviour parameters. Raised before anything is built.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A behaviour was applied to a box whose channel is already driven.
    #[error("binding conflict: box {box_id} already has a behaviour driving {channel}")]
    BindingConflict {
        /// Raw id of the box that rejected the binding.
        box_id: u32,
        /// Channel both behaviours would write.
        channel: Channel,
    },

    /// Texture loading failed in the provider.
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// An id did not resolve to a live stage object.
    #[error("unknown {kind} id {id}")]
    UnknownId {
        /// Object family (`box`, `timeline`, `behaviour`).
        kind: &'static str,
        /// Raw id value.
        id: u32,
    },

    /// Errors when serializing or deserializing configuration and snapshots.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures reported by a [`crate::TextureProvider`].
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    /// No file at the requested path.
    #[error("texture not found: '{}'", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be decoded into an image.
    #[error("failed to decode texture '{}': {reason}", path.display())]
    DecodeFailed {
        /// Path (or name) of the undecodable source.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },
}

impl BoxflyError {
    /// Build a [`BoxflyError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`BoxflyError::UnknownId`] value.
    pub fn unknown_id(kind: &'static str, id: u32) -> Self {
        Self::UnknownId { kind, id }
    }

    /// Build a [`BoxflyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for errors the caller can fix by changing scene parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
