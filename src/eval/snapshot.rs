use crate::{
    actor::model::{BoxId, BoxState, FaceKind},
    animation::timeline::TimelineId,
    foundation::core::FrameIndex,
    scene::stage::Stage,
    transform::affine::{Affine3, compose},
};

/// Serializable view of a stage after a tick, for headless hosts and tests.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub timelines: Vec<TimelineSnapshot>,
    pub boxes: Vec<BoxSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineSnapshot {
    pub id: TimelineId,
    pub frame: FrameIndex,
    pub progress: f64,
    pub playing: bool,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxSnapshot {
    pub id: BoxId,
    pub state: BoxState,
    /// Box-local to stage.
    pub transform: Affine3,
    pub faces: Vec<FaceSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FaceSnapshot {
    pub kind: FaceKind,
    pub width: f64,
    pub height: f64,
    /// Face-local to stage: box transform times face transform.
    pub transform: Affine3,
}

impl FrameSnapshot {
    pub fn capture(stage: &Stage) -> Self {
        let timelines = stage
            .timelines()
            .map(|(id, tl)| TimelineSnapshot {
                id,
                frame: tl.current_frame(),
                progress: tl.progress(),
                playing: tl.is_playing(),
                complete: tl.is_complete(),
            })
            .collect();

        let boxes = stage
            .boxes()
            .map(|(id, actor)| {
                let world = actor.world_transform();
                BoxSnapshot {
                    id,
                    state: *actor.state(),
                    transform: world,
                    faces: actor
                        .faces()
                        .iter()
                        .map(|face| FaceSnapshot {
                            kind: face.kind(),
                            width: face.width(),
                            height: face.height(),
                            transform: compose(world, face.local_transform()),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            tick: stage.ticks(),
            timelines,
            boxes,
        }
    }

    pub fn box_snapshot(&self, id: BoxId) -> Option<&BoxSnapshot> {
        self.boxes.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/snapshot.rs"]
mod tests;
