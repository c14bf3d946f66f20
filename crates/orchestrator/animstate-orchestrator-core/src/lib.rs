//! animstate-orchestrator
//!
//! Owns the per-world arena of presentation synchronizers and drives it from the
//! host's simulation tick and render frames. Hosts plug in world queries, entity
//! variables and observer context through [`PresentationHost`].

pub mod error;
pub mod host;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use crate::error::RegistryError;
pub use crate::host::PresentationHost;
pub use crate::registry::{EntityRecord, WorldRegistry};

/// Identifies one simulated world (dimension, level, test session, ...).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub u32);
