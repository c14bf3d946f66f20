//! Observer context and live sound bookkeeping.

use serde::{Deserialize, Serialize};

use crate::ids::SoundId;

/// Where the listening observer is, relative to the entity producing sounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverView {
    /// Observer is riding this entity (or the entity this part is mounted on).
    pub riding_this: bool,
    pub first_person: bool,
    pub custom_cameras_active: bool,
    /// Observer is riding some other entity with a closed top.
    pub riding_enclosed_other: bool,
}

impl ObserverView {
    /// Listening from this entity's own first-person view.
    #[inline]
    pub fn is_inside(&self) -> bool {
        self.riding_this && self.first_person && !self.custom_cameras_active
    }

    /// Sounds from this entity are heard through another entity's enclosure.
    #[inline]
    pub fn is_muffled(&self) -> bool {
        !self.riding_this
            && self.riding_enclosed_other
            && self.first_person
            && !self.custom_cameras_active
    }

    /// Interior sounds only play inside, exterior sounds only outside.
    #[inline]
    pub fn hears(&self, is_interior: bool, is_exterior: bool) -> bool {
        if self.is_inside() {
            !is_exterior
        } else {
            !is_interior
        }
    }
}

/// A sound this synchronizer started and has not yet seen stop.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundInstance {
    pub sound: SoundId,
    pub name: String,
    pub looping: bool,
    pub volume: f32,
    pub pitch: f32,
}

impl SoundInstance {
    pub fn new(sound: SoundId, name: &str, looping: bool) -> Self {
        Self {
            sound,
            name: name.to_string(),
            looping,
            volume: 1.0,
            pitch: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_and_exterior_classification() {
        let inside = ObserverView {
            riding_this: true,
            first_person: true,
            ..Default::default()
        };
        assert!(inside.hears(true, false));
        assert!(!inside.hears(false, true));
        assert!(inside.hears(false, false));

        let third_person = ObserverView {
            riding_this: true,
            ..Default::default()
        };
        assert!(!third_person.is_inside());
        assert!(!third_person.hears(true, false));
        assert!(third_person.hears(false, true));
    }

    #[test]
    fn muffled_only_from_another_enclosure() {
        let other_cab = ObserverView {
            first_person: true,
            riding_enclosed_other: true,
            ..Default::default()
        };
        assert!(other_cab.is_muffled());
        let cameras = ObserverView {
            custom_cameras_active: true,
            ..other_cab
        };
        assert!(!cameras.is_muffled());
    }
}
