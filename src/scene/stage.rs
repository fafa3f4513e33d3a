use crate::{
    actor::model::{BoxActor, BoxId},
    animation::behaviour::{Behaviour, BehaviourId, Channel, ChannelValue},
    animation::timeline::{Timeline, TimelineEvent, TimelineId},
    eval::snapshot::FrameSnapshot,
    foundation::core::Point,
    foundation::error::{BoxflyError, BoxflyResult},
};

/// A live behaviour -> box subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Binding {
    pub behaviour: BehaviourId,
    pub target: BoxId,
    pub channel: Channel,
}

/// Outcome of one [`Stage::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Timeline events in timeline order.
    pub events: Vec<(TimelineId, TimelineEvent)>,
    /// Number of box channels written this tick.
    pub writes: usize,
}

impl TickReport {
    pub fn completed(&self) -> impl Iterator<Item = TimelineId> + '_ {
        self.events
            .iter()
            .filter(|(_, e)| *e == TimelineEvent::Completed)
            .map(|(id, _)| *id)
    }
}

/// A press delivered to one box.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Interaction {
    pub target: BoxId,
    pub coords: Point,
    pub timelines: Vec<TimelineId>,
}

/// Counts of objects released by [`Stage::teardown`], in release order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TeardownReport {
    pub bindings: usize,
    pub behaviours: usize,
    pub timelines: usize,
    pub boxes: usize,
}

/// Owner of every box, timeline and behaviour, and of the bindings between them.
///
/// Ids are indices into the stage's arenas and stay valid for the stage's lifetime.
#[derive(Debug, Default)]
pub struct Stage {
    // Field order is drop order: bindings, behaviours, timelines, then boxes.
    bindings: Vec<Binding>,
    behaviours: Vec<Behaviour>,
    timelines: Vec<Timeline>,
    boxes: Vec<BoxActor>,
    ticks: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_box(&mut self, actor: BoxActor) -> BoxId {
        self.boxes.push(actor);
        BoxId((self.boxes.len() - 1) as u32)
    }

    pub fn add_timeline(&mut self, timeline: Timeline) -> TimelineId {
        self.timelines.push(timeline);
        TimelineId((self.timelines.len() - 1) as u32)
    }

    /// Register a behaviour. Its alpha must be bound to a timeline of this stage.
    pub fn add_behaviour(&mut self, behaviour: Behaviour) -> BoxflyResult<BehaviourId> {
        self.timeline(behaviour.alpha().timeline())?;
        self.behaviours.push(behaviour);
        Ok(BehaviourId((self.behaviours.len() - 1) as u32))
    }

    pub fn box_ref(&self, id: BoxId) -> BoxflyResult<&BoxActor> {
        self.boxes
            .get(id.index())
            .ok_or_else(|| BoxflyError::unknown_id("box", id.0))
    }

    pub fn box_mut(&mut self, id: BoxId) -> BoxflyResult<&mut BoxActor> {
        self.boxes
            .get_mut(id.index())
            .ok_or_else(|| BoxflyError::unknown_id("box", id.0))
    }

    pub fn timeline(&self, id: TimelineId) -> BoxflyResult<&Timeline> {
        self.timelines
            .get(id.index())
            .ok_or_else(|| BoxflyError::unknown_id("timeline", id.0))
    }

    pub fn timeline_mut(&mut self, id: TimelineId) -> BoxflyResult<&mut Timeline> {
        self.timelines
            .get_mut(id.index())
            .ok_or_else(|| BoxflyError::unknown_id("timeline", id.0))
    }

    pub fn behaviour(&self, id: BehaviourId) -> BoxflyResult<&Behaviour> {
        self.behaviours
            .get(id.index())
            .ok_or_else(|| BoxflyError::unknown_id("behaviour", id.0))
    }

    pub fn boxes(&self) -> impl Iterator<Item = (BoxId, &BoxActor)> {
        self.boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (BoxId(i as u32), b))
    }

    pub fn timelines(&self) -> impl Iterator<Item = (TimelineId, &Timeline)> {
        self.timelines
            .iter()
            .enumerate()
            .map(|(i, t)| (TimelineId(i as u32), t))
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once no timeline is playing.
    pub fn is_idle(&self) -> bool {
        !self.timelines.iter().any(Timeline::is_playing)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }

    /// Behaviours currently driving `target`.
    pub fn behaviours_on(&self, target: BoxId) -> impl Iterator<Item = BehaviourId> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.target == target)
            .map(|b| b.behaviour)
    }

    /// Boxes currently driven by `behaviour`.
    pub fn targets_of(&self, behaviour: BehaviourId) -> impl Iterator<Item = BoxId> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.behaviour == behaviour)
            .map(|b| b.target)
    }

    /// Subscribe `target` to `behaviour`.
    ///
    /// Rejected with [`BoxflyError::BindingConflict`] when the box already has a behaviour on
    /// the same channel (including this one); existing bindings are left untouched.
    pub fn apply(&mut self, behaviour: BehaviourId, target: BoxId) -> BoxflyResult<()> {
        let channel = self.behaviour(behaviour)?.channel();
        self.box_ref(target)?;

        if self
            .bindings
            .iter()
            .any(|b| b.target == target && b.channel == channel)
        {
            return Err(BoxflyError::BindingConflict {
                box_id: target.0,
                channel,
            });
        }

        self.bindings.push(Binding {
            behaviour,
            target,
            channel,
        });
        tracing::debug!(behaviour = behaviour.0, target = target.0, %channel, "behaviour applied");
        Ok(())
    }

    /// Unsubscribe `target`. The box keeps its last written value. Returns whether a binding
    /// existed.
    pub fn detach(&mut self, behaviour: BehaviourId, target: BoxId) -> BoxflyResult<bool> {
        self.behaviour(behaviour)?;
        self.box_ref(target)?;
        let before = self.bindings.len();
        self.bindings
            .retain(|b| !(b.behaviour == behaviour && b.target == target));
        let removed = before != self.bindings.len();
        if removed {
            tracing::debug!(behaviour = behaviour.0, target = target.0, "behaviour detached");
        }
        Ok(removed)
    }

    /// Unsubscribe every box from `behaviour`. Returns how many bindings were dropped.
    pub fn detach_all(&mut self, behaviour: BehaviourId) -> BoxflyResult<usize> {
        self.behaviour(behaviour)?;
        let before = self.bindings.len();
        self.bindings.retain(|b| b.behaviour != behaviour);
        Ok(before - self.bindings.len())
    }

    pub fn start(&mut self, id: TimelineId) -> BoxflyResult<()> {
        self.timeline_mut(id)?.start();
        Ok(())
    }

    pub fn stop(&mut self, id: TimelineId) -> BoxflyResult<()> {
        self.timeline_mut(id)?.stop();
        Ok(())
    }

    /// Rewind and replay `id`; its behaviours write their range start on the next tick.
    pub fn restart(&mut self, id: TimelineId) -> BoxflyResult<()> {
        self.timeline_mut(id)?.restart();
        tracing::debug!(timeline = id.0, "timeline restarted");
        Ok(())
    }

    pub fn start_all(&mut self) {
        for tl in &mut self.timelines {
            tl.start();
        }
    }

    /// Advance every timeline by `elapsed_frames` and push the new values to bound boxes.
    pub fn tick(&mut self, elapsed_frames: u64) -> TickReport {
        self.tick_with(|tl| tl.advance(elapsed_frames))
    }

    /// Like [`Stage::tick`] but driven by wall-clock milliseconds.
    pub fn tick_msecs(&mut self, msecs: f64) -> TickReport {
        self.tick_with(|tl| tl.advance_msecs(msecs))
    }

    fn tick_with(&mut self, mut advance: impl FnMut(&mut Timeline) -> Vec<TimelineEvent>) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport::default();
        let mut moved = vec![false; self.timelines.len()];

        for (idx, tl) in self.timelines.iter_mut().enumerate() {
            for event in advance(tl) {
                match event {
                    TimelineEvent::NewFrame(_) => moved[idx] = true,
                    TimelineEvent::Completed => {
                        tracing::debug!(timeline = idx, "timeline completed");
                    }
                    TimelineEvent::Looped => tracing::trace!(timeline = idx, "timeline looped"),
                    TimelineEvent::Started => tracing::trace!(timeline = idx, "timeline started"),
                }
                report.events.push((TimelineId(idx as u32), event));
            }
        }

        // One progress read per timeline and one sample per behaviour, shared by all targets.
        let progress: Vec<f64> = self.timelines.iter().map(Timeline::progress).collect();
        let values: Vec<Option<ChannelValue>> = self
            .behaviours
            .iter()
            .map(|b| {
                let tl = b.alpha().timeline().index();
                moved[tl].then(|| b.sample(b.alpha().value_at(progress[tl])))
            })
            .collect();

        for binding in &self.bindings {
            if let Some(value) = values[binding.behaviour.index()] {
                self.boxes[binding.target.index()].apply_channel(value);
                report.writes += 1;
            }
        }
        report
    }

    /// Input hook for a press on `target` at `coords`. Reports the timelines that currently
    /// drive the box, in id order, so the caller can act on them.
    pub fn on_box_interacted(&self, target: BoxId, coords: Point) -> BoxflyResult<Interaction> {
        self.box_ref(target)?;
        let mut timelines: Vec<TimelineId> = self
            .behaviours_on(target)
            .map(|b| self.behaviours[b.index()].alpha().timeline())
            .collect();
        timelines.sort_unstable();
        timelines.dedup();
        tracing::debug!(target = target.0, x = coords.x, y = coords.y, "box interacted");
        Ok(Interaction {
            target,
            coords,
            timelines,
        })
    }

    /// Topmost box whose footprint contains `p`: nearest to the viewer first, then the one
    /// added last.
    pub fn pick(&self, p: Point) -> Option<BoxId> {
        self.boxes()
            .filter(|(_, b)| b.contains_point(p))
            .max_by(|(ia, a), (ib, b)| a.depth().total_cmp(&b.depth()).then(ia.cmp(ib)))
            .map(|(id, _)| id)
    }

    /// Release everything in dependency order: bindings, behaviours (with their alphas),
    /// timelines, boxes.
    pub fn teardown(mut self) -> TeardownReport {
        let report = TeardownReport {
            bindings: self.bindings.len(),
            behaviours: self.behaviours.len(),
            timelines: self.timelines.len(),
            boxes: self.boxes.len(),
        };
        self.bindings.clear();
        self.behaviours.clear();
        self.timelines.clear();
        self.boxes.clear();
        tracing::debug!(?report, "stage torn down");
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
