use crate::{
    foundation::core::{Fps, FrameIndex},
    foundation::error::{BoxflyError, BoxflyResult},
};

/// Index of a timeline owned by a [`crate::Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimelineId(pub u32);

impl TimelineId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Playback direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// What happened to a timeline during one [`Timeline::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TimelineEvent {
    /// First tick after `start`/`restart`.
    Started,
    /// The timeline moved to (or re-reported) this frame; bound behaviours must update.
    NewFrame(FrameIndex),
    /// A looping timeline wrapped around.
    Looped,
    /// A non-looping timeline reached its end and stopped.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayState {
    Stopped,
    Playing,
    Completed,
}

/// Frame clock shared by every alpha bound to it.
///
/// Progress is `current_frame / n_frames`. The clock never reads wall time itself: the host
/// render loop calls [`Timeline::advance`] (or [`Timeline::advance_msecs`]) once per frame.
#[derive(Clone, Debug)]
pub struct Timeline {
    n_frames: u64,
    fps: Fps,
    current: u64,
    direction: Direction,
    looping: bool,
    state: PlayState,
    // Set by start/restart; the next advance reports the start frame without moving.
    pending_start: bool,
    // Set by seek; the next advance re-reports the current frame.
    pending_frame: bool,
    frame_carry: f64,
}

impl Timeline {
    pub fn new(n_frames: u64, fps: Fps) -> BoxflyResult<Self> {
        if n_frames == 0 {
            return Err(BoxflyError::configuration("timeline must have at least one frame"));
        }
        let fps = Fps::new(fps.num, fps.den)?;
        Ok(Self {
            n_frames,
            fps,
            current: 0,
            direction: Direction::Forward,
            looping: false,
            state: PlayState::Stopped,
            pending_start: false,
            pending_frame: false,
            frame_carry: 0.0,
        })
    }

    pub fn n_frames(&self) -> u64 {
        self.n_frames
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.n_frames)
    }

    pub fn current_frame(&self) -> FrameIndex {
        FrameIndex(self.current)
    }

    pub fn progress(&self) -> f64 {
        (self.current as f64 / self.n_frames as f64).clamp(0.0, 1.0)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlayState::Completed
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    fn start_frame(&self) -> u64 {
        match self.direction {
            Direction::Forward => 0,
            Direction::Backward => self.n_frames,
        }
    }

    /// Begin (or resume) playback. A completed timeline is rewound first.
    pub fn start(&mut self) {
        match self.state {
            PlayState::Playing => {}
            PlayState::Stopped => {
                self.state = PlayState::Playing;
                self.pending_start = true;
            }
            PlayState::Completed => self.restart(),
        }
    }

    /// Pause playback, keeping the current frame.
    pub fn stop(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Stopped;
        }
        self.pending_start = false;
    }

    /// Jump back to the start frame without changing the play state (a completed timeline
    /// becomes stopped).
    pub fn rewind(&mut self) {
        self.current = self.start_frame();
        self.frame_carry = 0.0;
        if self.state == PlayState::Completed {
            self.state = PlayState::Stopped;
        }
    }

    /// Rewind and play from the start.
    pub fn restart(&mut self) {
        self.rewind();
        self.state = PlayState::Playing;
        self.pending_start = true;
    }

    /// Move to `frame`, clamped to the timeline length. The next advance reports the new
    /// frame even if it moves zero frames, and even while stopped.
    pub fn seek(&mut self, frame: FrameIndex) {
        self.current = frame.0.min(self.n_frames);
        self.frame_carry = 0.0;
        self.pending_frame = true;
    }

    /// Advance by whole frames. Only a playing timeline moves; a pending seek is reported
    /// either way.
    pub fn advance(&mut self, elapsed_frames: u64) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        let seeked = std::mem::take(&mut self.pending_frame);
        if self.state != PlayState::Playing {
            if seeked {
                events.push(TimelineEvent::NewFrame(FrameIndex(self.current)));
            }
            return events;
        }
        if self.pending_start {
            self.pending_start = false;
            events.push(TimelineEvent::Started);
            events.push(TimelineEvent::NewFrame(FrameIndex(self.current)));
            return events;
        }
        if elapsed_frames == 0 {
            if seeked {
                events.push(TimelineEvent::NewFrame(FrameIndex(self.current)));
            }
            return events;
        }

        match self.direction {
            Direction::Forward => {
                let next = self.current.saturating_add(elapsed_frames);
                if next < self.n_frames {
                    self.current = next;
                } else if self.looping {
                    self.current = next % self.n_frames;
                    events.push(TimelineEvent::Looped);
                } else {
                    self.current = self.n_frames;
                    self.state = PlayState::Completed;
                }
            }
            Direction::Backward => {
                if elapsed_frames < self.current {
                    self.current -= elapsed_frames;
                } else if self.looping {
                    let overflow = elapsed_frames - self.current;
                    self.current = self.n_frames - (overflow % self.n_frames);
                    events.push(TimelineEvent::Looped);
                } else {
                    self.current = 0;
                    self.state = PlayState::Completed;
                }
            }
        }

        events.push(TimelineEvent::NewFrame(FrameIndex(self.current)));
        if self.state == PlayState::Completed {
            events.push(TimelineEvent::Completed);
        }
        events
    }

    /// Advance by wall-clock milliseconds, carrying sub-frame remainders between calls.
    pub fn advance_msecs(&mut self, msecs: f64) -> Vec<TimelineEvent> {
        if self.state != PlayState::Playing {
            return self.advance(0);
        }
        self.frame_carry += self.fps.msecs_to_frames(msecs);
        let whole = self.frame_carry.floor();
        self.frame_carry -= whole;
        self.advance(whole as u64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
