//! Animstate Animation Core (engine-agnostic)
//!
//! Variable-driven presentation state for simulated entities: per-definition
//! duration/delay clocks, the inhibitor/activator/visibility cascade, and the
//! per-entity synchronizer that turns them into audio commands, particle spawns,
//! light brightness and object poses.

pub mod cascade;
pub mod clamp;
pub mod clock;
pub mod config;
pub mod data;
pub mod ids;
pub mod loader;
pub mod outputs;
pub mod sound;
pub mod synchronizer;

// Re-exports for consumers (hosts and the world registry)
pub use cascade::{
    evaluate_brightness, evaluate_gate, evaluate_level, evaluate_motion, sample_clock,
    ClockSample, ClockSource, EvalContext, FrameClocks, GateResult, MotionResult, TickClocks,
    TransformStep,
};
pub use clamp::clamp_and_scale;
pub use clock::{AnimationClock, ClockPhase};
pub use config::{Config, RampCurve};
pub use data::{
    AnimatedObjectDef, AnimationDefinition, AnimationKind, AnimationList, LightDef, ParticleDef,
    PresentationSet, SoundDef, Vec3,
};
pub use ids::{EntityId, LightId, ObjectId, ParticleId, SoundId};
pub use loader::{
    validate_definition, ChannelKind, DefinitionError, LoadedPresentation, RejectedChannel,
};
pub use outputs::{AudioCommand, FrameOutputs, LightChange, ObjectPose, Outputs, ParticleSpawn};
pub use sound::{ObserverView, SoundInstance};
pub use synchronizer::PresentationSynchronizer;
pub use animstate_variables_core::{MapResolver, VariableResolver};
