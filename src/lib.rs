//! boxfly composes six-faced boxes out of a single texture and flies them into place with
//! alpha-driven behaviours.
//!
//! The public API is stage-oriented:
//!
//! - Compose boxes with [`compose_box`], or assemble a whole [`Scene`] from a [`SceneConfig`]
//! - Bind [`Behaviour`]s to boxes on a [`Stage`], all driven by shared [`Timeline`]s
//! - Call [`Stage::tick`] once per frame and read back a [`FrameSnapshot`]
//!
//! Nothing here rasterizes: hosts draw faces using [`FaceSnapshot::transform`].
#![forbid(unsafe_code)]

mod actor;
mod animation;
mod assets;
mod foundation;

pub(crate) mod transform;

/// Per-frame evaluation output.
pub mod eval;
/// Layout, assembly and the stage that owns every box.
pub mod scene;

pub use crate::actor::compose::compose_box;
pub use crate::actor::model::{AxisAngles, BoxActor, BoxId, BoxSize, BoxState, Face, FaceKind};
pub use crate::animation::alpha::{Alpha, AlphaFunc};
pub use crate::animation::behaviour::{
    Behaviour, BehaviourId, BehaviourKind, Channel, ChannelValue, RotateDirection,
};
pub use crate::animation::timeline::{Direction, Timeline, TimelineEvent, TimelineId};
pub use crate::assets::texture::{ImageTextureProvider, Texture, TextureProvider};
pub use crate::foundation::core::{
    Axis, Fps, FrameIndex, Perspective, Point, Rect, Rotation, StageSize, Vec2, Vec3,
};
pub use crate::foundation::error::{BoxflyError, BoxflyResult, ResourceError};
pub use crate::transform::affine::Affine3;

pub use crate::eval::snapshot::{BoxSnapshot, FaceSnapshot, FrameSnapshot, TimelineSnapshot};
pub use crate::scene::assemble::{ClickOutcome, Scene};
pub use crate::scene::config::{
    ClickAction, DepthConfig, PathConfig, RotateConfig, SceneConfig, TimelineConfig, TimelineMode,
};
pub use crate::scene::display::{DisplaySurface, StaticDisplay};
pub use crate::scene::layout::{GridCell, LayoutParams, SceneLayout, compute_layout};
pub use crate::scene::stage::{Binding, Interaction, Stage, TeardownReport, TickReport};
