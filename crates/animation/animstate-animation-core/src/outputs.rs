//! Output contracts from the synchronizers.
//!
//! Tick passes produce audio commands and particle spawn requests; render frames
//! produce light brightness and object poses. Hosts apply them to their audio,
//! particle and rendering subsystems.

use serde::{Deserialize, Serialize};

use crate::cascade::TransformStep;
use crate::ids::{EntityId, LightId, ObjectId, ParticleId, SoundId};

/// Commands for the audio subsystem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AudioCommand {
    Start {
        entity: EntityId,
        sound: SoundId,
        name: String,
        looping: bool,
    },
    Stop {
        entity: EntityId,
        sound: SoundId,
        name: String,
    },
    /// Volume and pitch for a live sound; both in `[0, inf)`.
    Update {
        entity: EntityId,
        sound: SoundId,
        volume: f32,
        pitch: f32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleSpawn {
    pub entity: EntityId,
    pub particle: ParticleId,
    pub count: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightChange {
    pub entity: EntityId,
    pub light: LightId,
    /// In `[0, 1]`.
    pub brightness: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectPose {
    pub entity: EntityId,
    pub object: ObjectId,
    pub visible: bool,
    pub steps: Vec<TransformStep>,
}

/// Outputs of one simulation tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub audio: Vec<AudioCommand>,
    #[serde(default)]
    pub particles: Vec<ParticleSpawn>,
}

/// Outputs of one render frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOutputs {
    #[serde(default)]
    pub lights: Vec<LightChange>,
    #[serde(default)]
    pub poses: Vec<ObjectPose>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.audio.clear();
        self.particles.clear();
    }

    #[inline]
    pub fn push_audio(&mut self, command: AudioCommand) {
        self.audio.push(command);
    }

    #[inline]
    pub fn push_particles(&mut self, spawn: ParticleSpawn) {
        self.particles.push(spawn);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.particles.is_empty()
    }
}

impl FrameOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.lights.clear();
        self.poses.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty() && self.poses.is_empty()
    }
}
