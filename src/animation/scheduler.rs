use std::sync::mpsc::{self, Receiver, Sender};

use crate::foundation::error::FramesmithError;

/// Lowest accepted speed.
pub const MIN_SPEED: u8 = 10;
/// Highest accepted speed.
pub const MAX_SPEED: u8 = 100;
/// Speed used when none is configured.
pub const DEFAULT_SPEED: u8 = 50;

/// What an animation tick advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Room style cycle.
    Room,
    /// Lighting cycle.
    Lighting,
    /// Frame and mat indices together.
    Styles,
}

/// Opaque handle for one requested host frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Host capability to schedule and cancel the next frame callback.
///
/// A browser would back this with `requestAnimationFrame`; the offline renderer and tests use
/// [`crate::ManualFrameClock`].
pub trait FrameRequester {
    /// Arm one callback and return its token.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a previously armed callback. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Message sent to the owner of the selection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    /// Apply one step of the given kind.
    Advance(AnimationKind),
}

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// No animation; no callback armed.
    Idle,
    /// One callback armed for this kind.
    Running(AnimationKind),
    /// Terminal; every call is a no-op.
    TornDown,
}

/// Delay between ticks for a speed, after clamping the speed into `[10, 100]`.
pub fn frame_delay_ms(speed: u8) -> f64 {
    2000.0 - f64::from(speed.clamp(MIN_SPEED, MAX_SPEED)) * 15.0
}

/// Self-driving timed loop advancing one [`AnimationKind`] on a speed-derived cadence.
///
/// At most one callback is ever armed. Advances are not applied here; they are emitted as
/// [`AnimationEvent`]s on the channel returned by [`AnimationScheduler::new`].
pub struct AnimationScheduler {
    requester: Box<dyn FrameRequester>,
    state: SchedulerState,
    speed: u8,
    pending: Option<FrameToken>,
    last_tick_ms: Option<f64>,
    events: Sender<AnimationEvent>,
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("state", &self.state)
            .field("speed", &self.speed)
            .field("pending", &self.pending)
            .field("last_tick_ms", &self.last_tick_ms)
            .finish_non_exhaustive()
    }
}

impl AnimationScheduler {
    /// Idle scheduler plus the receiving end of its event channel.
    pub fn new(
        requester: Box<dyn FrameRequester>,
        speed: u8,
    ) -> (Self, Receiver<AnimationEvent>) {
        let (events, rx) = mpsc::channel();
        let scheduler = Self {
            requester,
            state: SchedulerState::Idle,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            pending: None,
            last_tick_ms: None,
            events,
        };
        (scheduler, rx)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Running kind, if any.
    pub fn running(&self) -> Option<AnimationKind> {
        match self.state {
            SchedulerState::Running(kind) => Some(kind),
            _ => None,
        }
    }

    /// Token of the armed callback, if any.
    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Clamped speed.
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Current tick delay in milliseconds.
    pub fn frame_delay_ms(&self) -> f64 {
        frame_delay_ms(self.speed)
    }

    /// Change the speed; takes effect on the next callback.
    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Start (or cleanly restart) an animation of `kind`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self, kind: AnimationKind) {
        if self.state == SchedulerState::TornDown {
            return;
        }
        self.cancel_pending();
        self.last_tick_ms = None;
        self.state = SchedulerState::Running(kind);
        self.arm();
    }

    /// Stop the running animation. Idempotent.
    pub fn stop(&mut self) {
        if self.state == SchedulerState::TornDown {
            return;
        }
        self.cancel_pending();
        self.last_tick_ms = None;
        self.state = SchedulerState::Idle;
    }

    /// Stop when `kind` is already running, start it otherwise.
    pub fn toggle(&mut self, kind: AnimationKind) {
        if self.running() == Some(kind) {
            self.stop();
        } else {
            self.start(kind);
        }
    }

    /// Cancel any armed callback and refuse all further work.
    pub fn teardown(&mut self) {
        if self.state == SchedulerState::TornDown {
            return;
        }
        self.cancel_pending();
        self.state = SchedulerState::TornDown;
    }

    /// Host frame callback. Returns `true` when an advance was emitted.
    ///
    /// The first callback after `start` only records the baseline timestamp. Later callbacks
    /// advance once when more than the frame delay has elapsed since the last committed tick.
    /// The loop re-arms either way.
    pub fn on_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> bool {
        let kind = match self.state {
            SchedulerState::Running(kind) if self.pending == Some(token) => kind,
            state => {
                let err = FramesmithError::scheduler(format!(
                    "dropping frame callback {token:?} in state {state:?}"
                ));
                tracing::trace!(%err);
                return false;
            }
        };
        self.pending = None;

        let advanced = match self.last_tick_ms {
            None => {
                self.last_tick_ms = Some(timestamp_ms);
                false
            }
            Some(last) if timestamp_ms - last > self.frame_delay_ms() => {
                self.last_tick_ms = Some(timestamp_ms);
                if self.events.send(AnimationEvent::Advance(kind)).is_err() {
                    tracing::debug!("animation event receiver dropped");
                }
                true
            }
            Some(_) => false,
        };

        self.arm();
        advanced
    }

    fn arm(&mut self) {
        self.pending = Some(self.requester.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.requester.cancel_frame(token);
        }
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
