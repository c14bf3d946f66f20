use animstate_animation_core::EntityId;
use thiserror::Error;

use crate::WorldId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("entity {entity:?} is already active in world {world:?}")]
    AlreadyActive { world: WorldId, entity: EntityId },
    #[error("entity {entity:?} is not registered in world {world:?}")]
    UnknownEntity { world: WorldId, entity: EntityId },
}
