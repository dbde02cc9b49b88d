//! Idle animation timing and the equipment-change reaction.
//!
//! Time is always an explicit `f64` millisecond value supplied by the
//! caller, so every phase here is reproducible.

/// Per-limb vertical offsets for one breathing frame, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbOffsets {
    pub torso: f32,
    pub head: f32,
    pub arms: f32,
}

const fn limbs(torso: f32, head: f32, arms: f32) -> LimbOffsets {
    LimbOffsets { torso, head, arms }
}

/// Eight-frame breathing cycle.
pub const BREATHING_FRAMES: [LimbOffsets; 8] = [
    limbs(0.0, 0.0, 0.0),
    limbs(0.0, -0.5, 0.5),
    limbs(0.5, -0.5, 0.5),
    limbs(0.5, 0.0, 0.0),
    limbs(0.0, 0.0, -0.5),
    limbs(-0.5, 0.5, -0.5),
    limbs(-0.5, 0.0, 0.0),
    limbs(0.0, 0.0, 0.0),
];

/// Sideways cape sway per breathing frame.
pub const CLOAK_SWAY: [f32; 8] = [0.0, 1.0, 2.0, 1.0, 0.0, -1.0, -2.0, -1.0];

/// Milliseconds per breathing frame.
pub const FRAME_INTERVAL_MS: f64 = 150.0;

/// Breathing offset of the whole figure at `time_ms`.
pub fn breath_offset(time_ms: f64) -> f32 {
    ((time_ms / 600.0).sin() * 0.8) as f32
}

/// Brightness pulse shared by effects, in 0.4..=1.0.
pub fn pulse(time_ms: f64) -> f32 {
    ((time_ms / 200.0).sin() * 0.3 + 0.7) as f32
}

// ============================================================================
// Reaction
// ============================================================================

/// Brief perturbation played after an equipment change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReactionState {
    #[default]
    Idle,
    Reacting {
        since: f64,
    },
}

impl ReactionState {
    pub const DURATION_MS: f64 = 300.0;

    /// Peak upward lift in logical pixels.
    pub const LIFT: f32 = 2.0;

    /// Starts (or restarts) a reaction at `now`.
    pub fn trigger(now: f64) -> Self {
        Self::Reacting { since: now }
    }

    /// Advances the state machine; a reaction ends once its duration elapsed.
    pub fn tick(self, now: f64) -> Self {
        match self {
            Self::Reacting { since } if now - since >= Self::DURATION_MS => Self::Idle,
            other => other,
        }
    }

    pub fn is_reacting(&self) -> bool {
        matches!(self, Self::Reacting { .. })
    }

    /// Completion in 0.0..1.0 while reacting.
    pub fn progress(&self, now: f64) -> Option<f32> {
        match *self {
            Self::Idle => None,
            Self::Reacting { since } => {
                Some(((now - since) / Self::DURATION_MS).clamp(0.0, 1.0) as f32)
            }
        }
    }

    /// Vertical displacement at `now`: negative lifts the figure.
    pub fn lift(&self, now: f64) -> f32 {
        self.progress(now)
            .map(|p| -Self::LIFT * (1.0 - p))
            .unwrap_or(0.0)
    }
}

// ============================================================================
// AnimationPhase
// ============================================================================

/// Everything the compositor needs to know about time for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPhase {
    pub time_ms: f64,
    /// Whole-figure breathing offset (`sin(t/600) * 0.8`).
    pub breath: f32,
    /// Index into [`BREATHING_FRAMES`].
    pub frame: usize,
    pub limbs: LimbOffsets,
    pub cloak_sway: f32,
    /// Reaction lift, already evaluated at `time_ms`.
    pub lift: f32,
}

impl AnimationPhase {
    /// Builds the phase for an explicit breathing frame and reaction state.
    pub fn new(time_ms: f64, frame: usize, reaction: ReactionState) -> Self {
        let frame = frame % BREATHING_FRAMES.len();
        Self {
            time_ms,
            breath: breath_offset(time_ms),
            frame,
            limbs: BREATHING_FRAMES[frame],
            cloak_sway: CLOAK_SWAY[frame],
            lift: reaction.lift(time_ms),
        }
    }

    /// Stateless phase at `time_ms`: the frame index follows directly from
    /// time and no reaction is playing.
    pub fn at(time_ms: f64) -> Self {
        let frame = (time_ms.max(0.0) / FRAME_INTERVAL_MS) as usize;
        Self::new(time_ms, frame, ReactionState::Idle)
    }

    /// Vertical offset applied to every layer: rounded breath plus lift.
    pub fn figure_offset(&self) -> f32 {
        self.breath.round() + self.lift
    }

    /// Pulse factor for effects at this phase.
    pub fn pulse(&self) -> f32 {
        pulse(self.time_ms)
    }
}

// ============================================================================
// AnimationDriver
// ============================================================================

/// Per-frame ticker for the procedural variant.
///
/// Accumulates elapsed time between ticks and only advances the breathing
/// frame once a full frame interval has passed.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    last_tick: Option<f64>,
    accumulated: f64,
    frame: usize,
    reaction: ReactionState,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn reaction(&self) -> ReactionState {
        self.reaction
    }

    /// Starts a reaction at `now`, restarting any reaction in progress.
    pub fn trigger_reaction(&mut self, now: f64) {
        self.reaction = ReactionState::trigger(now);
    }

    /// Phase at `now` from the current frame and reaction, without advancing.
    pub fn phase(&self, now: f64) -> AnimationPhase {
        AnimationPhase::new(now, self.frame, self.reaction.tick(now))
    }

    /// Advances to `now` and returns the phase to render.
    ///
    /// A clock that moves backwards resets the accumulator without
    /// advancing.
    pub fn tick(&mut self, now: f64) -> AnimationPhase {
        match self.last_tick {
            Some(last) if now >= last => self.accumulated += now - last,
            Some(_) => self.accumulated = 0.0,
            None => {}
        }
        self.last_tick = Some(now);

        if self.accumulated >= FRAME_INTERVAL_MS {
            let steps = (self.accumulated / FRAME_INTERVAL_MS) as usize;
            self.frame = (self.frame + steps) % BREATHING_FRAMES.len();
            self.accumulated -= steps as f64 * FRAME_INTERVAL_MS;
        }

        self.reaction = self.reaction.tick(now);
        AnimationPhase::new(now, self.frame, self.reaction)
    }
}
