use crate::builtin::{resolve_builtin, WorldState};
use crate::flags::FlagSet;
use crate::resolver::VariableResolver;

/// Layered resolver for one entity.
///
/// Entity-specific variables shadow world built-ins, which shadow flags.
pub struct EntityVariables<'a> {
    custom: Option<&'a dyn VariableResolver>,
    world: &'a dyn WorldState,
    flags: &'a FlagSet,
}

impl<'a> EntityVariables<'a> {
    pub fn new(world: &'a dyn WorldState, flags: &'a FlagSet) -> Self {
        Self {
            custom: None,
            world,
            flags,
        }
    }

    pub fn with_custom(mut self, custom: Option<&'a dyn VariableResolver>) -> Self {
        self.custom = custom;
        self
    }
}

impl VariableResolver for EntityVariables<'_> {
    fn resolve(&self, name: &str, partial_tick: f32) -> Option<f64> {
        if let Some(value) = self.custom.and_then(|c| c.resolve(name, partial_tick)) {
            return Some(value);
        }
        if let Some(value) = resolve_builtin(self.world, name, partial_tick) {
            return Some(value);
        }
        self.flags.resolve(name)
    }
}
