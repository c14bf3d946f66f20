//! Load-time validation of presentation definitions.
//!
//! A channel holding any invalid definition is emptied (the owner keeps working with
//! no animations on that channel) and reported back, so one bad entry never stops a
//! whole entity from loading.

use std::fmt;

use animstate_variables_core::{validate_variable_name, VariableError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{AnimationDefinition, AnimationList, PresentationSet};

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("presentation json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("variable '{variable}': clampMin {min} is greater than clampMax {max}")]
    ClampRange { variable: String, min: f64, max: f64 },
    #[error("variable '{variable}': duration and delay must not be negative (duration {duration}, delay {delay})")]
    NegativeTiming {
        variable: String,
        duration: i32,
        delay: i32,
    },
    #[error(transparent)]
    Variable(#[from] VariableError),
}

/// Which list of a definition a rejected entry belonged to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Active,
    Volume,
    Pitch,
    Brightness,
    Spawn,
    Motion,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChannelKind::Active => "active",
            ChannelKind::Volume => "volume",
            ChannelKind::Pitch => "pitch",
            ChannelKind::Brightness => "brightness",
            ChannelKind::Spawn => "spawn",
            ChannelKind::Motion => "motion",
        };
        f.write_str(s)
    }
}

/// A channel that was emptied because one of its definitions was invalid.
#[derive(Debug)]
pub struct RejectedChannel {
    /// Human-readable owner, e.g. `sound 'engine_idle'`.
    pub owner: String,
    pub channel: ChannelKind,
    pub error: DefinitionError,
}

/// A sanitized set plus what had to be dropped to get there.
#[derive(Debug)]
pub struct LoadedPresentation {
    pub set: PresentationSet,
    pub rejected: Vec<RejectedChannel>,
}

/// Check a single definition against its invariants.
pub fn validate_definition(def: &AnimationDefinition) -> Result<(), DefinitionError> {
    validate_variable_name(&def.variable)?;
    if def.duration < 0 || def.delay < 0 {
        return Err(DefinitionError::NegativeTiming {
            variable: def.variable.clone(),
            duration: def.duration,
            delay: def.delay,
        });
    }
    if def.clamp_min != 0.0 && def.clamp_max != 0.0 && def.clamp_min > def.clamp_max {
        return Err(DefinitionError::ClampRange {
            variable: def.variable.clone(),
            min: def.clamp_min,
            max: def.clamp_max,
        });
    }
    Ok(())
}

fn sanitize_list(
    list: &mut AnimationList,
    owner: impl FnOnce() -> String,
    channel: ChannelKind,
    rejected: &mut Vec<RejectedChannel>,
) {
    if let Some(error) = list.iter().find_map(|d| validate_definition(d).err()) {
        let owner = owner();
        log::warn!(
            "rejecting {} animations of {}: {} - channel falls back to no animations",
            channel,
            owner,
            error
        );
        list.clear();
        rejected.push(RejectedChannel {
            owner,
            channel,
            error,
        });
    }
}

impl PresentationSet {
    /// Empty every channel holding an invalid definition.
    pub fn sanitize(&mut self) -> Vec<RejectedChannel> {
        let mut rejected = Vec::new();
        for light in &mut self.light_objects {
            let name = &light.object_name;
            sanitize_list(
                &mut light.brightness_animations,
                || format!("light '{name}'"),
                ChannelKind::Brightness,
                &mut rejected,
            );
        }
        for sound in &mut self.sounds {
            let name = &sound.name;
            sanitize_list(
                &mut sound.active_animations,
                || format!("sound '{name}'"),
                ChannelKind::Active,
                &mut rejected,
            );
            sanitize_list(
                &mut sound.volume_animations,
                || format!("sound '{name}'"),
                ChannelKind::Volume,
                &mut rejected,
            );
            sanitize_list(
                &mut sound.pitch_animations,
                || format!("sound '{name}'"),
                ChannelKind::Pitch,
                &mut rejected,
            );
        }
        for (idx, particle) in self.particles.iter_mut().enumerate() {
            let kind = &particle.kind;
            sanitize_list(
                &mut particle.active_animations,
                || format!("particle #{idx} '{kind}'"),
                ChannelKind::Spawn,
                &mut rejected,
            );
        }
        for object in &mut self.animated_objects {
            let name = &object.object_name;
            sanitize_list(
                &mut object.animations,
                || format!("object '{name}'"),
                ChannelKind::Motion,
                &mut rejected,
            );
        }
        rejected
    }

    /// Parse and sanitize a pack JSON blob.
    ///
    /// Only unparseable JSON is an error; invalid definitions are reported in
    /// [`LoadedPresentation::rejected`].
    pub fn from_json(text: &str) -> Result<LoadedPresentation, DefinitionError> {
        let mut set: PresentationSet = serde_json::from_str(text)?;
        let rejected = set.sanitize();
        Ok(LoadedPresentation { set, rejected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AnimationKind;

    #[test]
    fn zero_bounds_are_exempt_from_ordering() {
        let ok = AnimationDefinition::new(AnimationKind::Translation, "v").with_clamp(5.0, 0.0);
        assert!(validate_definition(&ok).is_ok());
        let bad = AnimationDefinition::new(AnimationKind::Translation, "v").with_clamp(5.0, 1.0);
        assert!(matches!(
            validate_definition(&bad),
            Err(DefinitionError::ClampRange { .. })
        ));
    }

    #[test]
    fn negative_timing_is_rejected() {
        let bad = AnimationDefinition::new(AnimationKind::Visibility, "v").with_timing(-1, 0);
        assert!(matches!(
            validate_definition(&bad),
            Err(DefinitionError::NegativeTiming { .. })
        ));
    }

    #[test]
    fn malformed_cycle_is_a_variable_error() {
        let bad = AnimationDefinition::new(AnimationKind::Visibility, "a_b_c_cycle");
        let err = validate_definition(&bad).unwrap_err();
        assert!(matches!(err, DefinitionError::Variable(_)));
        assert!(err.to_string().contains("non-numeric"));
    }
}
