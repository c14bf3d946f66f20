use animstate_animation_core::{EntityId, ObserverView};
use animstate_variables_core::{VariableResolver, WorldState};

/// Host capabilities the registry needs to evaluate an entity.
pub trait PresentationHost {
    /// World queries evaluated at the entity's position.
    fn world_state(&self, entity: EntityId) -> &dyn WorldState;

    /// Entity-specific variables (speed, engine state, ...). These shadow built-ins.
    fn entity_variables(&self, _entity: EntityId) -> Option<&dyn VariableResolver> {
        None
    }

    /// Where the local observer is relative to `entity`.
    fn observer(&self, entity: EntityId) -> ObserverView;
}
