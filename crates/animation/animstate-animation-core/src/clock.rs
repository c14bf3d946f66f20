//! Duration/delay clock: per-entity temporal state for one animation definition.
//!
//! Driven once per simulation tick by an `engaged` signal. Render frames only read it.

use std::sync::Arc;

use crate::config::RampCurve;
use crate::data::AnimationDefinition;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockPhase {
    Idle,
    RampingUp,
    Held,
    RampingDown,
}

#[derive(Clone, Debug)]
pub struct AnimationClock {
    definition: Arc<AnimationDefinition>,
    curve: RampCurve,
    phase: ClockPhase,
    /// Ticks of ramp accumulated, in `0..=span`.
    ramp_ticks: u32,
    /// Disengaged ticks still tolerated before ramping down.
    hold_remaining: u32,
    engaged: bool,
    moved_this_update: bool,
}

impl AnimationClock {
    pub fn new(definition: Arc<AnimationDefinition>, curve: RampCurve) -> Self {
        Self {
            definition,
            curve,
            phase: ClockPhase::Idle,
            ramp_ticks: 0,
            hold_remaining: 0,
            engaged: false,
            moved_this_update: false,
        }
    }

    #[inline]
    pub fn definition(&self) -> &AnimationDefinition {
        &self.definition
    }

    /// False when both duration and delay are zero; such clocks pass raw values through.
    #[inline]
    pub fn is_useful(&self) -> bool {
        self.definition.is_useful()
    }

    /// True iff the engaged state flipped on the last tick.
    #[inline]
    pub fn moved_this_update(&self) -> bool {
        self.moved_this_update
    }

    #[inline]
    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    #[inline]
    pub fn engaged(&self) -> bool {
        self.engaged
    }

    #[inline]
    fn span(&self) -> u32 {
        self.definition.duration_ticks().max(1)
    }

    /// Smoothed level in [0, 1], shaped by the ramp curve.
    pub fn factored_state(&self) -> f64 {
        self.curve.apply(self.ramp_ticks as f64 / self.span() as f64)
    }

    /// Effective value for a raw resolved input: the smoothed level when useful,
    /// the raw value otherwise.
    #[inline]
    pub fn value(&self, raw: f64) -> f64 {
        if self.is_useful() {
            self.factored_state()
        } else {
            raw
        }
    }

    /// Step the state machine by one tick.
    pub fn advance(&mut self, engaged: bool) {
        self.moved_this_update = engaged != self.engaged;
        self.engaged = engaged;

        if engaged {
            self.hold_remaining = self.definition.delay_ticks();
            if self.phase != ClockPhase::Held {
                self.ramp_up();
            }
            return;
        }

        match self.phase {
            ClockPhase::Idle => {}
            ClockPhase::RampingUp | ClockPhase::Held if self.hold_remaining > 0 => {
                self.hold_remaining -= 1;
                if self.phase == ClockPhase::RampingUp {
                    self.ramp_up();
                }
            }
            ClockPhase::RampingUp | ClockPhase::Held | ClockPhase::RampingDown => {
                self.ramp_down();
            }
        }
    }

    fn ramp_up(&mut self) {
        let span = self.span();
        self.ramp_ticks = (self.ramp_ticks + 1).min(span);
        self.phase = if self.ramp_ticks >= span {
            ClockPhase::Held
        } else {
            ClockPhase::RampingUp
        };
    }

    fn ramp_down(&mut self) {
        self.ramp_ticks = self.ramp_ticks.saturating_sub(1);
        self.phase = if self.ramp_ticks == 0 {
            ClockPhase::Idle
        } else {
            ClockPhase::RampingDown
        };
    }

    /// Back to the freshly created state.
    pub fn reset(&mut self) {
        self.phase = ClockPhase::Idle;
        self.ramp_ticks = 0;
        self.hold_remaining = 0;
        self.engaged = false;
        self.moved_this_update = false;
    }
}
