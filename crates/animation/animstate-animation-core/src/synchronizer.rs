//! Per-entity presentation state: one clock per animation definition, evaluated
//! every simulation tick (sounds, particles, clock advancement) and every render
//! frame (light brightness, object poses).

use std::sync::Arc;

use animstate_variables_core::{UnknownVariables, VariableResolver};
use hashbrown::HashMap;

use crate::cascade::{
    evaluate_brightness, evaluate_gate, evaluate_level, evaluate_motion, EvalContext,
    FrameClocks, TickClocks,
};
use crate::clock::AnimationClock;
use crate::config::{Config, RampCurve};
use crate::data::{AnimationList, PresentationSet};
use crate::ids::{EntityId, LightId, ObjectId, ParticleId, SoundId};
use crate::outputs::{
    AudioCommand, FrameOutputs, LightChange, ObjectPose, Outputs, ParticleSpawn,
};
use crate::sound::{ObserverView, SoundInstance};

#[derive(Debug)]
struct LightChannels {
    brightness: Vec<AnimationClock>,
}

#[derive(Debug)]
struct SoundChannels {
    active: Vec<AnimationClock>,
    volume: Vec<AnimationClock>,
    pitch: Vec<AnimationClock>,
}

#[derive(Debug)]
struct ParticleChannels {
    active: Vec<AnimationClock>,
    last_spawn_tick: u64,
}

#[derive(Debug)]
struct ObjectChannels {
    motion: Vec<AnimationClock>,
}

/// Every clock of one entity, built from one definition set. Replaced as a whole.
#[derive(Debug)]
struct ChannelSet {
    definition: Arc<PresentationSet>,
    lights: Vec<LightChannels>,
    sounds: Vec<SoundChannels>,
    particles: Vec<ParticleChannels>,
    objects: Vec<ObjectChannels>,
}

fn build_clocks(list: &AnimationList, curve: RampCurve) -> Vec<AnimationClock> {
    list.iter()
        .map(|def| AnimationClock::new(Arc::clone(def), curve))
        .collect()
}

impl ChannelSet {
    fn build(definition: Arc<PresentationSet>, curve: RampCurve, tick: u64) -> Self {
        let lights = definition
            .light_objects
            .iter()
            .map(|l| LightChannels {
                brightness: build_clocks(&l.brightness_animations, curve),
            })
            .collect();
        let sounds = definition
            .sounds
            .iter()
            .map(|s| SoundChannels {
                active: build_clocks(&s.active_animations, curve),
                volume: build_clocks(&s.volume_animations, curve),
                pitch: build_clocks(&s.pitch_animations, curve),
            })
            .collect();
        let particles = definition
            .particles
            .iter()
            .map(|p| ParticleChannels {
                active: build_clocks(&p.active_animations, curve),
                last_spawn_tick: tick,
            })
            .collect();
        let objects = definition
            .animated_objects
            .iter()
            .map(|o| ObjectChannels {
                motion: build_clocks(&o.animations, curve),
            })
            .collect();
        Self {
            definition,
            lights,
            sounds,
            particles,
            objects,
        }
    }

    fn clock_count(&self) -> usize {
        self.lights.iter().map(|l| l.brightness.len()).sum::<usize>()
            + self
                .sounds
                .iter()
                .map(|s| s.active.len() + s.volume.len() + s.pitch.len())
                .sum::<usize>()
            + self.particles.iter().map(|p| p.active.len()).sum::<usize>()
            + self.objects.iter().map(|o| o.motion.len()).sum::<usize>()
    }
}

/// Presentation state of one entity.
#[derive(Debug)]
pub struct PresentationSynchronizer {
    entity: EntityId,
    cfg: Config,
    channels: Option<ChannelSet>,
    playing: Vec<SoundInstance>,
    brightness: HashMap<LightId, f32>,
    unknown: UnknownVariables,
}

impl PresentationSynchronizer {
    pub fn new(entity: EntityId, cfg: Config) -> Self {
        Self {
            entity,
            playing: Vec::with_capacity(cfg.sound_capacity),
            unknown: UnknownVariables::new(cfg.log_unknown_variables),
            cfg,
            channels: None,
            brightness: HashMap::new(),
        }
    }

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.channels.is_some()
    }

    pub fn definition(&self) -> Option<&Arc<PresentationSet>> {
        self.channels.as_ref().map(|c| &c.definition)
    }

    /// Total number of clocks owned, 0 before activation.
    pub fn clock_count(&self) -> usize {
        self.channels.as_ref().map_or(0, ChannelSet::clock_count)
    }

    /// Build clocks for `definition`. Called once by the entity lifecycle owner;
    /// repeated calls are ignored and return false.
    pub fn activate(&mut self, definition: Arc<PresentationSet>, tick: u64) -> bool {
        if self.channels.is_some() {
            return false;
        }
        let channels = ChannelSet::build(definition, self.cfg.ramp_curve, tick);
        log::debug!(
            "activated presentation for entity {:?} ({} clocks)",
            self.entity,
            channels.clock_count()
        );
        self.channels = Some(channels);
        true
    }

    /// Hot-reload: stop owned sounds and swap in a freshly built clock set.
    pub fn reload(&mut self, definition: Arc<PresentationSet>, tick: u64, out: &mut Outputs) {
        let channels = ChannelSet::build(definition, self.cfg.ramp_curve, tick);
        self.stop_all_sounds(out);
        self.brightness.clear();
        log::debug!(
            "reloaded presentation for entity {:?} ({} clocks)",
            self.entity,
            channels.clock_count()
        );
        self.channels = Some(channels);
    }

    /// Entity removal: stop every owned sound and release all clocks.
    pub fn teardown(&mut self, out: &mut Outputs) {
        self.stop_all_sounds(out);
        self.brightness.clear();
        if self.channels.take().is_some() {
            log::debug!("released presentation for entity {:?}", self.entity);
        }
    }

    fn stop_all_sounds(&mut self, out: &mut Outputs) {
        for sound in self.playing.drain(..) {
            out.push_audio(AudioCommand::Stop {
                entity: self.entity,
                sound: sound.sound,
                name: sound.name,
            });
        }
    }

    /// Sounds started by this synchronizer that have not stopped yet.
    pub fn playing_sounds(&self) -> &[SoundInstance] {
        &self.playing
    }

    /// The audio host finished playing an instance of `sound`.
    pub fn sound_finished(&mut self, sound: SoundId) -> bool {
        match self.playing.iter().position(|s| s.sound == sound) {
            Some(pos) => {
                self.playing.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Brightness computed by the latest tick or frame pass.
    pub fn light_brightness(&self, light: LightId) -> Option<f32> {
        self.brightness.get(&light).copied()
    }

    pub fn unknown_variables(&self) -> &UnknownVariables {
        &self.unknown
    }

    /// One simulation tick. Advances every evaluated clock.
    pub fn tick(
        &mut self,
        tick: u64,
        resolver: &dyn VariableResolver,
        observer: &ObserverView,
        out: &mut Outputs,
    ) {
        let Some(channels) = self.channels.as_mut() else {
            return;
        };
        let entity = self.entity;
        let mut ctx = EvalContext::new(resolver, 0.0, &mut self.unknown);
        let definition = &channels.definition;

        for (index, chan) in channels.sounds.iter_mut().enumerate() {
            let def = &definition.sounds[index];
            let id = SoundId::from_index(index);

            let mut should_play = observer.hears(def.is_interior, def.is_exterior);
            let mut any_clock_moved = false;
            if should_play {
                let gate = evaluate_gate(&mut TickClocks(&mut chan.active), &mut ctx);
                should_play = gate.open;
                any_clock_moved = gate.any_clock_moved;
            }
            // One-shots need an edge, otherwise they would restart every tick.
            if !def.looping && !def.force_sound && !any_clock_moved {
                should_play = false;
            }

            if !should_play {
                if def.looping {
                    if let Some(pos) = self.playing.iter().position(|s| s.sound == id) {
                        let stopped = self.playing.remove(pos);
                        out.push_audio(AudioCommand::Stop {
                            entity,
                            sound: id,
                            name: stopped.name,
                        });
                    }
                }
                continue;
            }

            let already_playing = !def.force_sound && self.playing.iter().any(|s| s.sound == id);
            if !already_playing {
                self.playing
                    .push(SoundInstance::new(id, &def.name, def.looping));
                out.push_audio(AudioCommand::Start {
                    entity,
                    sound: id,
                    name: def.name.clone(),
                    looping: def.looping,
                });
            }

            let mut volume = evaluate_level(&mut TickClocks(&mut chan.volume), &mut ctx) as f32;
            if observer.is_muffled() {
                volume *= self.cfg.enclosed_attenuation;
            }
            let pitch = evaluate_level(&mut TickClocks(&mut chan.pitch), &mut ctx) as f32;
            for sound in self.playing.iter_mut().filter(|s| s.sound == id) {
                sound.volume = volume;
                sound.pitch = pitch;
            }
            out.push_audio(AudioCommand::Update {
                entity,
                sound: id,
                volume,
                pitch,
            });
        }

        for (index, chan) in channels.particles.iter_mut().enumerate() {
            let def = &definition.particles[index];
            let gate = evaluate_gate(&mut TickClocks(&mut chan.active), &mut ctx);
            let continuous = def.spawn_every_tick && tick > chan.last_spawn_tick;
            if gate.open && (gate.any_clock_moved || continuous) {
                chan.last_spawn_tick = tick;
                out.push_particles(ParticleSpawn {
                    entity,
                    particle: ParticleId::from_index(index),
                    count: def.spawn_count(),
                });
            }
        }

        for (index, chan) in channels.lights.iter_mut().enumerate() {
            let value = evaluate_brightness(&mut TickClocks(&mut chan.brightness), &mut ctx);
            self.brightness.insert(LightId::from_index(index), value);
        }

        for chan in channels.objects.iter_mut() {
            evaluate_motion(&mut TickClocks(&mut chan.motion), &mut ctx);
        }
    }

    /// One render frame. Reads tick-committed clock state; never advances clocks.
    pub fn frame(
        &mut self,
        partial_tick: f32,
        resolver: &dyn VariableResolver,
        out: &mut FrameOutputs,
    ) {
        let Some(channels) = self.channels.as_ref() else {
            return;
        };
        let entity = self.entity;
        let mut ctx = EvalContext::new(resolver, partial_tick, &mut self.unknown);

        for (index, chan) in channels.lights.iter().enumerate() {
            let light = LightId::from_index(index);
            let brightness = evaluate_brightness(&mut FrameClocks(&chan.brightness), &mut ctx);
            self.brightness.insert(light, brightness);
            out.lights.push(LightChange {
                entity,
                light,
                brightness,
            });
        }

        for (index, chan) in channels.objects.iter().enumerate() {
            let motion = evaluate_motion(&mut FrameClocks(&chan.motion), &mut ctx);
            out.poses.push(ObjectPose {
                entity,
                object: ObjectId::from_index(index),
                visible: motion.visible,
                steps: motion.steps,
            });
        }
    }
}
