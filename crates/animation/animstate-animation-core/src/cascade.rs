//! Cascade evaluation: ordered clocks of one channel -> one gate or value.
//!
//! Rules, applied clock by clock in list order:
//! - Inhibitor (when not inhibited): in range -> inhibited.
//! - Activator (when inhibited): in range -> not inhibited.
//! - Visibility (when not inhibited): out of range -> gate closed, stop immediately.
//! - Translation/Rotation/Scaling (when not inhibited): channel-specific accumulation.
//!
//! The same code serves tick passes ([`TickClocks`], advances clocks) and render
//! frames ([`FrameClocks`], read-only).

use animstate_variables_core::{UnknownVariables, VariableResolver};
use serde::{Deserialize, Serialize};

use crate::clamp::clamp_and_scale;
use crate::clock::AnimationClock;
use crate::data::{AnimationDefinition, AnimationKind, Vec3};

/// Access to a channel's clocks during one evaluation.
pub trait ClockSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn definition(&self, index: usize) -> &AnimationDefinition;

    /// Engaged state committed by the last tick.
    fn engaged(&self, index: usize) -> bool;

    /// Effective (pre-clamp) value for `raw`, and whether the clock's engaged state
    /// flipped on the current tick.
    fn sample(&mut self, index: usize, raw: f64, engaged: bool) -> (f64, bool);
}

/// Simulation-tick view: sampling advances each clock's state machine.
pub struct TickClocks<'a>(pub &'a mut [AnimationClock]);

impl ClockSource for TickClocks<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn definition(&self, index: usize) -> &AnimationDefinition {
        self.0[index].definition()
    }

    #[inline]
    fn engaged(&self, index: usize) -> bool {
        self.0[index].engaged()
    }

    fn sample(&mut self, index: usize, raw: f64, engaged: bool) -> (f64, bool) {
        let clock = &mut self.0[index];
        clock.advance(engaged);
        (clock.value(raw), clock.moved_this_update())
    }
}

/// Render-frame view: reads tick-committed clock state only.
pub struct FrameClocks<'a>(pub &'a [AnimationClock]);

impl ClockSource for FrameClocks<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn definition(&self, index: usize) -> &AnimationDefinition {
        self.0[index].definition()
    }

    #[inline]
    fn engaged(&self, index: usize) -> bool {
        self.0[index].engaged()
    }

    fn sample(&mut self, index: usize, raw: f64, _engaged: bool) -> (f64, bool) {
        let clock = &self.0[index];
        (clock.value(raw), clock.moved_this_update())
    }
}

/// Variable access for one evaluation pass.
pub struct EvalContext<'a> {
    resolver: &'a dyn VariableResolver,
    partial_tick: f32,
    unknown: &'a mut UnknownVariables,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        resolver: &'a dyn VariableResolver,
        partial_tick: f32,
        unknown: &'a mut UnknownVariables,
    ) -> Self {
        Self {
            resolver,
            partial_tick,
            unknown,
        }
    }

    /// Resolved value; unknown names (and NaN) are reported once per name and give `None`.
    pub fn resolve(&mut self, name: &str) -> Option<f64> {
        match self.resolver.resolve(name, self.partial_tick) {
            Some(value) if !value.is_nan() => Some(value),
            _ => {
                self.unknown.note(name);
                None
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClockSample {
    pub value: f64,
    pub moved: bool,
}

/// Outcome of the gate part of a cascade.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GateResult {
    pub open: bool,
    /// Inhibited state when evaluation ended.
    pub inhibited: bool,
    /// OR of `moved_this_update` over every Visibility clock that was evaluated.
    pub any_clock_moved: bool,
}

/// One transform contribution of an animated object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    /// Index of the animation within the object's list.
    pub animation: usize,
    pub kind: AnimationKind,
    pub axis: Vec3,
    pub value: f64,
    /// The value already includes the preceding same-kind step.
    pub stacked: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionResult {
    pub visible: bool,
    pub steps: Vec<TransformStep>,
}

/// `Math.signum`-style sign: zero stays zero.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Raw engaged signal that drives a clock's state machine.
fn engaged_for(def: &AnimationDefinition, raw: f64) -> bool {
    match def.kind {
        AnimationKind::Visibility => def.in_range(def.offset + clamp_and_scale(raw, def, 0.0)),
        kind if kind.is_gate() => def.in_range(clamp_and_scale(raw, def, 0.0)),
        _ => raw > 0.0,
    }
}

/// Resolve, smooth and shape one clock.
///
/// An unresolved variable counts as 0 for the value but never flips the clock's
/// engaged state, so it cannot produce an edge.
pub fn sample_clock<C: ClockSource>(
    clocks: &mut C,
    index: usize,
    ctx: &mut EvalContext<'_>,
    stacking_offset: f64,
) -> ClockSample {
    let (raw, engaged) = {
        let def = clocks.definition(index);
        match ctx.resolve(&def.variable) {
            Some(raw) => (raw, engaged_for(def, raw)),
            None => (0.0, clocks.engaged(index)),
        }
    };
    let (effective, moved) = clocks.sample(index, raw, engaged);
    ClockSample {
        value: clamp_and_scale(effective, clocks.definition(index), stacking_offset),
        moved,
    }
}

fn walk<'a, C, F>(clocks: &mut C, ctx: &mut EvalContext<'a>, mut on_motion: F) -> GateResult
where
    C: ClockSource,
    F: FnMut(&mut C, usize, &mut EvalContext<'a>),
{
    let mut inhibited = false;
    let mut any_clock_moved = false;
    for index in 0..clocks.len() {
        let kind = clocks.definition(index).kind;
        match kind {
            AnimationKind::Inhibitor => {
                if !inhibited {
                    let s = sample_clock(clocks, index, ctx, 0.0);
                    if clocks.definition(index).in_range(s.value) {
                        inhibited = true;
                    }
                }
            }
            AnimationKind::Activator => {
                if inhibited {
                    let s = sample_clock(clocks, index, ctx, 0.0);
                    if clocks.definition(index).in_range(s.value) {
                        inhibited = false;
                    }
                }
            }
            AnimationKind::Visibility => {
                if !inhibited {
                    let s = sample_clock(clocks, index, ctx, 0.0);
                    any_clock_moved |= s.moved;
                    let def = clocks.definition(index);
                    if !def.in_range(def.offset + s.value) {
                        return GateResult {
                            open: false,
                            inhibited,
                            any_clock_moved,
                        };
                    }
                }
            }
            AnimationKind::Translation | AnimationKind::Rotation | AnimationKind::Scaling => {
                if !inhibited {
                    on_motion(clocks, index, ctx);
                }
            }
        }
    }
    GateResult {
        open: true,
        inhibited,
        any_clock_moved,
    }
}

/// Boolean gate of an `active`/spawn channel. Transform clocks are ignored.
pub fn evaluate_gate<C: ClockSource>(clocks: &mut C, ctx: &mut EvalContext<'_>) -> GateResult {
    walk(clocks, ctx, |_, _, _| {})
}

/// Light brightness in [0, 1].
///
/// Translation clocks multiply (axis.x set), add (axis.y set) or replace the level.
pub fn evaluate_brightness<C: ClockSource>(clocks: &mut C, ctx: &mut EvalContext<'_>) -> f32 {
    let mut level = 0.0f64;
    let mut defined = false;
    let gate = walk(clocks, ctx, |clocks, index, ctx| {
        let def = clocks.definition(index);
        if def.kind != AnimationKind::Translation {
            return;
        }
        let axis = def.axis.unwrap_or_default();
        let value = sample_clock(clocks, index, ctx, 0.0).value;
        if axis.x != 0.0 {
            level *= value;
        } else if axis.y != 0.0 {
            level += value;
        } else {
            level = value;
        }
        defined = true;
    });

    if !gate.open || (defined && level < 0.0) {
        0.0
    } else if !defined {
        if gate.inhibited {
            0.0
        } else {
            1.0
        }
    } else {
        level.min(1.0) as f32
    }
}

/// Volume or pitch. Translation adds a linear term, Rotation a parabola
/// `axis.x * (v - axis.z)^2`; both add the definition offset back after shaping.
/// Defaults to 1 when nothing contributed; never negative.
pub fn evaluate_level<C: ClockSource>(clocks: &mut C, ctx: &mut EvalContext<'_>) -> f64 {
    let mut level = 0.0f64;
    let mut defined = false;
    let gate = walk(clocks, ctx, |clocks, index, ctx| {
        let def = clocks.definition(index);
        let (kind, offset, axis) = (def.kind, def.offset, def.axis.unwrap_or_default());
        match kind {
            AnimationKind::Translation => {
                let value = sample_clock(clocks, index, ctx, -offset).value;
                level += sign(axis.y) * value + offset;
                defined = true;
            }
            AnimationKind::Rotation => {
                let parabola = sign(axis.y) * sample_clock(clocks, index, ctx, -offset).value;
                level += axis.x * (parabola - axis.z).powi(2) + offset;
                defined = true;
            }
            _ => {}
        }
    });

    if !gate.open {
        0.0
    } else if !defined {
        1.0
    } else {
        level.max(0.0)
    }
}

/// Visibility plus ordered transform steps of an animated object.
pub fn evaluate_motion<C: ClockSource>(clocks: &mut C, ctx: &mut EvalContext<'_>) -> MotionResult {
    let mut steps: Vec<TransformStep> = Vec::new();
    let gate = walk(clocks, ctx, |clocks, index, ctx| {
        let def = clocks.definition(index);
        let (kind, axis, stacked) = (def.kind, def.axis.unwrap_or_default(), def.add_prior_offset);
        let stacking_offset = if stacked {
            steps
                .iter()
                .rev()
                .find(|s| s.kind == kind)
                .map_or(0.0, |s| s.value)
        } else {
            0.0
        };
        let value = sample_clock(clocks, index, ctx, stacking_offset).value;
        steps.push(TransformStep {
            animation: index,
            kind,
            axis,
            value,
            stacked,
        });
    });

    if !gate.open {
        steps.clear();
    }
    MotionResult {
        visible: gate.open,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RampCurve;
    use animstate_variables_core::MapResolver;
    use std::sync::Arc;

    fn clocks(defs: Vec<AnimationDefinition>) -> Vec<AnimationClock> {
        defs.into_iter()
            .map(|d| AnimationClock::new(Arc::new(d), RampCurve::Linear))
            .collect()
    }

    #[test]
    fn empty_channel_is_open_and_still() {
        let resolver = MapResolver::new();
        let mut unknown = UnknownVariables::new(false);
        let mut ctx = EvalContext::new(&resolver, 0.0, &mut unknown);
        let mut list: Vec<AnimationClock> = Vec::new();
        let gate = evaluate_gate(&mut TickClocks(&mut list), &mut ctx);
        assert!(gate.open);
        assert!(!gate.any_clock_moved);
        assert_eq!(evaluate_brightness(&mut TickClocks(&mut list), &mut ctx), 1.0);
        assert_eq!(evaluate_level(&mut TickClocks(&mut list), &mut ctx), 1.0);
    }

    #[test]
    fn unknown_variables_are_noted_once() {
        let resolver = MapResolver::new();
        let mut unknown = UnknownVariables::new(false);
        let mut ctx = EvalContext::new(&resolver, 0.0, &mut unknown);
        assert_eq!(ctx.resolve("missing"), None);
        assert_eq!(ctx.resolve("missing"), None);
        drop(ctx);
        assert_eq!(unknown.len(), 1);
    }

    #[test]
    fn unknown_variable_never_moves_a_clock() {
        let resolver = MapResolver::new();
        let mut unknown = UnknownVariables::new(false);
        let mut ctx = EvalContext::new(&resolver, 0.0, &mut unknown);
        // [0, 0] would accept the arithmetic fallback of 0.
        let mut list = clocks(vec![AnimationDefinition::new(
            AnimationKind::Visibility,
            "engine_running",
        )
        .with_clamp(0.0, 0.0)]);
        for _ in 0..3 {
            let gate = evaluate_gate(&mut TickClocks(&mut list), &mut ctx);
            assert!(!gate.any_clock_moved);
        }
        assert!(!list[0].engaged());
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(2.0), 1.0);
    }

    #[test]
    fn frame_view_does_not_advance_clocks() {
        let resolver = MapResolver::new().with("door", 1.0);
        let mut unknown = UnknownVariables::new(false);
        let mut list = clocks(vec![AnimationDefinition::new(
            AnimationKind::Translation,
            "door",
        )
        .with_axis(0.0, 1.0, 0.0)
        .with_timing(4, 0)]);

        let mut ctx = EvalContext::new(&resolver, 0.5, &mut unknown);
        for _ in 0..3 {
            evaluate_motion(&mut FrameClocks(&list), &mut ctx);
        }
        assert_eq!(list[0].factored_state(), 0.0);

        evaluate_motion(&mut TickClocks(&mut list), &mut ctx);
        assert_eq!(list[0].factored_state(), 0.25);
    }
}
