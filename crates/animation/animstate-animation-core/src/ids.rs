//! Identifiers for entities and the presentation definitions they own.
//!
//! Definition ids are dense indices into the owning [`PresentationSet`](crate::data::PresentationSet)
//! lists, so they stay stable until the next hot-reload.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LightId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

macro_rules! dense_index {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                #[inline]
                pub fn from_index(index: usize) -> Self {
                    Self(index as u32)
                }

                #[inline]
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

dense_index!(LightId, SoundId, ParticleId, ObjectId);
