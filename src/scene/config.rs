use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    animation::alpha::AlphaFunc,
    animation::behaviour::RotateDirection,
    animation::timeline::Direction,
    foundation::core::{Axis, Fps, Perspective, StageSize},
    foundation::error::{BoxflyError, BoxflyResult},
    scene::layout::LayoutParams,
};

/// What a press on a box does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    #[default]
    Quit,
    /// Restart the timelines driving the pressed box.
    Replay,
    Ignore,
}

/// Whether boxes share one clock or each get their own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineMode {
    #[default]
    Shared,
    PerBox,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub frames: u64,
    pub fps: Fps,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub direction: Direction,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            frames: 180,
            fps: Fps { num: 60, den: 1 },
            looping: false,
            direction: Direction::Forward,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RotateConfig {
    pub axis: Axis,
    pub direction: RotateDirection,
    pub angle_start: f64,
    pub angle_end: f64,
    pub alpha: AlphaFunc,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            direction: RotateDirection::Clockwise,
            angle_start: 0.0,
            angle_end: 180.0,
            alpha: AlphaFunc::RampInc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    pub enabled: bool,
    pub alpha: AlphaFunc,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alpha: AlphaFunc::RampInc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub enabled: bool,
    pub alpha: AlphaFunc,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alpha: AlphaFunc::RampInc,
        }
    }
}

/// Everything needed to assemble a scene apart from the texture and the display.
///
/// Every field has a default, so `{}` is a valid config (the 2x2 flying grid).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub rows: u32,
    pub cols: u32,
    pub timeline: TimelineConfig,
    pub timeline_mode: TimelineMode,
    pub rotations: Vec<RotateConfig>,
    pub depth: DepthConfig,
    pub path: PathConfig,
    pub box_scale: f64,
    pub depth_ratio: f64,
    pub stage_depth_factor: f64,
    pub far_scale: f64,
    pub grid_gap: f64,
    pub click_action: ClickAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            timeline: TimelineConfig::default(),
            timeline_mode: TimelineMode::Shared,
            rotations: vec![
                RotateConfig::default(),
                RotateConfig {
                    axis: Axis::Z,
                    angle_end: 90.0,
                    alpha: AlphaFunc::SineHalf,
                    ..RotateConfig::default()
                },
            ],
            depth: DepthConfig::default(),
            path: PathConfig::default(),
            box_scale: 1.0,
            depth_ratio: 0.25,
            stage_depth_factor: 4.0,
            far_scale: 1.0,
            grid_gap: 1.0,
            click_action: ClickAction::Quit,
            texture: None,
        }
    }
}

impl SceneConfig {
    /// One box on its own timeline; a press replays it.
    pub fn single_box_replay() -> Self {
        Self {
            rows: 1,
            cols: 1,
            timeline_mode: TimelineMode::PerBox,
            click_action: ClickAction::Replay,
            ..Self::default()
        }
    }

    /// Four boxes flying in from the corners on one shared timeline; a press quits.
    pub fn grid_2x2() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> BoxflyResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| BoxflyError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config. A relative `texture` path is resolved against the
    /// config file's directory.
    pub fn from_path(path: &Path) -> BoxflyResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        let mut config = Self::from_json_str(&s)?;
        if let (Some(tex), Some(dir)) = (config.texture.as_mut(), path.parent())
            && tex.is_relative()
        {
            *tex = dir.join(&*tex);
        }
        tracing::debug!(path = %path.display(), "scene config loaded");
        Ok(config)
    }

    pub fn to_json_string(&self) -> BoxflyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BoxflyError::serde(e.to_string()))
    }

    pub fn validate(&self) -> BoxflyResult<()> {
        if self.timeline.frames == 0 {
            return Err(BoxflyError::configuration("timeline frames must be > 0"));
        }
        Fps::new(self.timeline.fps.num, self.timeline.fps.den)?;

        for (i, r) in self.rotations.iter().enumerate() {
            if !(r.angle_start.is_finite() && r.angle_end.is_finite()) {
                return Err(BoxflyError::configuration(format!(
                    "rotation {i} angles must be finite"
                )));
            }
            if self.rotations[..i].iter().any(|o| o.axis == r.axis) {
                return Err(BoxflyError::configuration(format!(
                    "more than one rotation about the {} axis",
                    r.axis.name()
                )));
            }
        }

        let nominal = StageSize {
            width: 1.0,
            height: 1.0,
        };
        self.layout_params(nominal, Perspective::default()).validate()
    }

    /// Layout inputs for a display of `stage` size seen through `perspective`.
    pub fn layout_params(&self, stage: StageSize, perspective: Perspective) -> LayoutParams {
        LayoutParams {
            box_scale: self.box_scale,
            depth_ratio: self.depth_ratio,
            stage_depth_factor: self.stage_depth_factor,
            far_scale: self.far_scale,
            grid_gap: self.grid_gap,
            ..LayoutParams::new(stage, perspective, self.rows, self.cols)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
