use crate::{
    actor::compose::compose_box,
    actor::model::BoxId,
    animation::alpha::Alpha,
    animation::behaviour::{Behaviour, BehaviourId},
    animation::timeline::{Timeline, TimelineId},
    assets::texture::Texture,
    eval::snapshot::FrameSnapshot,
    foundation::core::Point,
    foundation::error::{BoxflyError, BoxflyResult},
    scene::config::{ClickAction, SceneConfig, TimelineConfig, TimelineMode},
    scene::display::DisplaySurface,
    scene::layout::{SceneLayout, compute_layout},
    scene::stage::{Stage, TeardownReport, TickReport},
};

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    Ignored,
    /// The pressed box's timelines were restarted.
    Replayed {
        box_id: BoxId,
        timelines: Vec<TimelineId>,
    },
    /// The host should leave its main loop.
    Quit,
}

/// A stage populated from a [`SceneConfig`]: one composed box per grid cell, each flying from
/// its cell's start point to the stage centre while tumbling in from depth.
#[derive(Debug)]
pub struct Scene {
    // Field order is drop order: the stage releases everything before the texture goes.
    stage: Stage,
    layout: SceneLayout,
    click_action: ClickAction,
    box_timelines: Vec<TimelineId>,
    texture: Texture,
}

/// A timeline and the rotate/depth behaviours bound to it.
#[derive(Clone)]
struct BehaviourSet {
    timeline: TimelineId,
    behaviours: Vec<BehaviourId>,
}

impl Scene {
    /// Lay out, compose and wire up every box. Nothing is started.
    #[tracing::instrument(
        skip_all,
        fields(rows = config.rows, cols = config.cols, texture = texture.name())
    )]
    pub fn assemble(
        config: &SceneConfig,
        texture: Texture,
        display: &dyn DisplaySurface,
    ) -> BoxflyResult<Self> {
        config.validate()?;
        let layout = compute_layout(&config.layout_params(display.size(), display.perspective()))?;

        let mut stage = Stage::new();
        let shared = match config.timeline_mode {
            TimelineMode::Shared => Some(behaviour_set(&mut stage, config, &layout)?),
            TimelineMode::PerBox => None,
        };

        let mut box_timelines = Vec::with_capacity(layout.cells.len());
        for cell in &layout.cells {
            let size = layout.box_size;
            let mut actor = compose_box(&texture, size.width, size.height, size.depth)?;
            actor.set_position(cell.start);
            if config.depth.enabled {
                actor.set_depth(-layout.stage_depth);
            }
            let id = stage.add_box(actor);

            let set = match &shared {
                Some(set) => set.clone(),
                None => behaviour_set(&mut stage, config, &layout)?,
            };
            for behaviour in &set.behaviours {
                stage.apply(*behaviour, id)?;
            }

            if config.path.enabled {
                let alpha = Alpha::new(set.timeline, config.path.alpha);
                let path = Behaviour::path(alpha, vec![cell.start, layout.destination])?;
                let path = stage.add_behaviour(path)?;
                stage.apply(path, id)?;
            }
            box_timelines.push(set.timeline);
        }

        tracing::info!(
            boxes = stage.box_count(),
            timelines = stage.timelines().count(),
            bindings = stage.bindings().len(),
            "scene assembled"
        );
        Ok(Self {
            stage,
            layout,
            click_action: config.click_action,
            box_timelines,
            texture,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn click_action(&self) -> ClickAction {
        self.click_action
    }

    /// Timeline that drives `id`.
    pub fn timeline_for(&self, id: BoxId) -> BoxflyResult<TimelineId> {
        self.box_timelines
            .get(id.index())
            .copied()
            .ok_or_else(|| BoxflyError::unknown_id("box", id.0))
    }

    /// Start every timeline.
    pub fn start(&mut self) {
        self.stage.start_all();
    }

    pub fn tick(&mut self, elapsed_frames: u64) -> TickReport {
        self.stage.tick(elapsed_frames)
    }

    pub fn tick_msecs(&mut self, msecs: f64) -> TickReport {
        self.stage.tick_msecs(msecs)
    }

    pub fn is_idle(&self) -> bool {
        self.stage.is_idle()
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.stage.snapshot()
    }

    /// Hit-test `coords` and dispatch the configured click action.
    ///
    /// `Quit` fires for any press on the stage. `Replay` needs a box under the pointer.
    pub fn handle_click(&mut self, coords: Point) -> BoxflyResult<ClickOutcome> {
        let outcome = match (self.click_action, self.stage.pick(coords)) {
            (ClickAction::Quit, _) => ClickOutcome::Quit,
            (ClickAction::Ignore, _) | (ClickAction::Replay, None) => ClickOutcome::Ignored,
            (ClickAction::Replay, Some(id)) => self.on_box_interacted(id, coords)?,
        };
        tracing::debug!(x = coords.x, y = coords.y, ?outcome, "click handled");
        Ok(outcome)
    }

    /// A press on box `id`, already hit-tested by the host.
    pub fn on_box_interacted(&mut self, id: BoxId, coords: Point) -> BoxflyResult<ClickOutcome> {
        let interaction = self.stage.on_box_interacted(id, coords)?;
        match self.click_action {
            ClickAction::Quit => Ok(ClickOutcome::Quit),
            ClickAction::Ignore => Ok(ClickOutcome::Ignored),
            ClickAction::Replay => {
                for tl in &interaction.timelines {
                    self.stage.restart(*tl)?;
                }
                Ok(ClickOutcome::Replayed {
                    box_id: id,
                    timelines: interaction.timelines,
                })
            }
        }
    }

    /// Release the stage in dependency order, then the texture.
    pub fn teardown(self) -> TeardownReport {
        let Self { stage, texture, .. } = self;
        let report = stage.teardown();
        tracing::debug!(
            texture = texture.name(),
            handles = texture.handle_count(),
            "texture released"
        );
        drop(texture);
        report
    }
}

fn timeline(config: &TimelineConfig) -> BoxflyResult<Timeline> {
    let mut tl = Timeline::new(config.frames, config.fps)?;
    tl.set_looping(config.looping);
    tl.set_direction(config.direction);
    tl.rewind();
    Ok(tl)
}

fn behaviour_set(
    stage: &mut Stage,
    config: &SceneConfig,
    layout: &SceneLayout,
) -> BoxflyResult<BehaviourSet> {
    let tl = stage.add_timeline(timeline(&config.timeline)?);
    let mut behaviours = Vec::with_capacity(config.rotations.len() + 1);

    for r in &config.rotations {
        let alpha = Alpha::new(tl, r.alpha);
        let b = Behaviour::rotate(alpha, r.axis, r.direction, r.angle_start, r.angle_end)?;
        behaviours.push(stage.add_behaviour(b)?);
    }
    if config.depth.enabled {
        let alpha = Alpha::new(tl, config.depth.alpha);
        let b = Behaviour::depth(alpha, -layout.stage_depth, 0.0)?;
        behaviours.push(stage.add_behaviour(b)?);
    }

    Ok(BehaviourSet {
        timeline: tl,
        behaviours,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/assemble.rs"]
mod tests;
