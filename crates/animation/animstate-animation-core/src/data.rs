//! Presentation definitions as authored in content packs.
//!
//! JSON field names follow the pack format (camelCase). Definitions are immutable
//! once loaded; clocks hold them through `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Closed set of animation kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Visibility,
    Inhibitor,
    Activator,
    Translation,
    Rotation,
    Scaling,
}

impl AnimationKind {
    /// Visibility, inhibitor and activator clocks only gate; they never move anything.
    #[inline]
    pub fn is_gate(self) -> bool {
        matches!(
            self,
            AnimationKind::Visibility | AnimationKind::Inhibitor | AnimationKind::Activator
        )
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// One animation entry: a variable, how to shape it, and how to smooth it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDefinition {
    #[serde(rename = "animationType")]
    pub kind: AnimationKind,
    pub variable: String,
    /// Absent for pure gates; scaling, offset and clamping only apply when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Vec3>,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub clamp_min: f64,
    #[serde(default)]
    pub clamp_max: f64,
    #[serde(default)]
    pub absolute: bool,
    /// Ramp length in ticks.
    #[serde(default)]
    pub duration: i32,
    /// Hold after disengage, in ticks.
    #[serde(default)]
    pub delay: i32,
    /// Stack on top of the preceding transform of the same kind.
    #[serde(default)]
    pub add_prior_offset: bool,
}

impl AnimationDefinition {
    pub fn new(kind: AnimationKind, variable: &str) -> Self {
        Self {
            kind,
            variable: variable.to_string(),
            axis: None,
            offset: 0.0,
            clamp_min: 0.0,
            clamp_max: 0.0,
            absolute: false,
            duration: 0,
            delay: 0,
            add_prior_offset: false,
        }
    }

    pub fn with_axis(mut self, x: f64, y: f64, z: f64) -> Self {
        self.axis = Some(Vec3::new(x, y, z));
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_clamp(mut self, min: f64, max: f64) -> Self {
        self.clamp_min = min;
        self.clamp_max = max;
        self
    }

    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn with_timing(mut self, duration: i32, delay: i32) -> Self {
        self.duration = duration;
        self.delay = delay;
        self
    }

    pub fn with_prior_offset(mut self) -> Self {
        self.add_prior_offset = true;
        self
    }

    /// Literal range test used by gates. Unlike clamping, a zero bound is a real bound here.
    #[inline]
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.clamp_min && value <= self.clamp_max
    }

    #[inline]
    pub fn duration_ticks(&self) -> u32 {
        self.duration.max(0) as u32
    }

    #[inline]
    pub fn delay_ticks(&self) -> u32 {
        self.delay.max(0) as u32
    }

    /// Whether a clock must smooth this definition at all.
    #[inline]
    pub fn is_useful(&self) -> bool {
        self.duration > 0 || self.delay > 0
    }
}

/// Ordered clock list for one channel.
pub type AnimationList = Vec<Arc<AnimationDefinition>>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightDef {
    /// Model object this light belongs to.
    pub object_name: String,
    #[serde(default)]
    pub brightness_animations: AnimationList,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundDef {
    pub name: String,
    #[serde(default)]
    pub looping: bool,
    /// Start on every qualifying tick, even if an instance is already playing.
    #[serde(default)]
    pub force_sound: bool,
    /// Only audible from inside (first-person, riding this entity).
    #[serde(default)]
    pub is_interior: bool,
    /// Only audible from outside.
    #[serde(default)]
    pub is_exterior: bool,
    #[serde(default)]
    pub active_animations: AnimationList,
    #[serde(default)]
    pub volume_animations: AnimationList,
    #[serde(default)]
    pub pitch_animations: AnimationList,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleDef {
    /// Particle type handed to the particle subsystem.
    #[serde(rename = "type")]
    pub kind: String,
    /// Particles per spawn; 0 still spawns one.
    #[serde(default)]
    pub quantity: u32,
    /// Keep spawning on every tick while the gate is open.
    #[serde(default)]
    pub spawn_every_tick: bool,
    #[serde(default)]
    pub active_animations: AnimationList,
}

impl ParticleDef {
    #[inline]
    pub fn spawn_count(&self) -> u32 {
        self.quantity.max(1)
    }
}

/// A movable sub-component of the model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedObjectDef {
    pub object_name: String,
    #[serde(default)]
    pub animations: AnimationList,
}

/// Everything one entity presents, rebuilt as a whole on hot-reload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSet {
    #[serde(default)]
    pub light_objects: Vec<LightDef>,
    #[serde(default)]
    pub sounds: Vec<SoundDef>,
    #[serde(default)]
    pub particles: Vec<ParticleDef>,
    #[serde(default)]
    pub animated_objects: Vec<AnimatedObjectDef>,
    /// Flags that are always on for entities using this set.
    #[serde(default)]
    pub constants: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pack_field_names() {
        let raw = r#"{
            "animationType": "translation",
            "variable": "throttle",
            "axis": [0, 1, 0],
            "clampMax": 2.0,
            "addPriorOffset": true
        }"#;
        let def: AnimationDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(def.kind, AnimationKind::Translation);
        assert_eq!(def.axis, Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(def.clamp_min, 0.0);
        assert_eq!(def.clamp_max, 2.0);
        assert!(def.add_prior_offset);
        assert!(!def.is_useful());
    }

    #[test]
    fn gate_range_uses_literal_bounds() {
        let def = AnimationDefinition::new(AnimationKind::Visibility, "x").with_clamp(0.0, 0.0);
        assert!(def.in_range(0.0));
        assert!(!def.in_range(0.5));
    }

    #[test]
    fn particle_spawns_at_least_one() {
        let p = ParticleDef::default();
        assert_eq!(p.spawn_count(), 1);
    }
}
