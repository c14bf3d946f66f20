//! Explicit arena of presentation synchronizers, keyed by world then entity.
//!
//! Entities are only inserted on activation and removed on despawn or world unload.
//! Iteration order is activation order, so tick outputs are deterministic.

use std::sync::Arc;

use animstate_animation_core::{
    Config, EntityId, FrameOutputs, Outputs, PresentationSet, PresentationSynchronizer, SoundId,
};
use animstate_variables_core::{EntityVariables, FlagSet};
use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::host::PresentationHost;
use crate::WorldId;

/// One active entity: its synchronizer and the flags its variables can read.
#[derive(Debug)]
pub struct EntityRecord {
    sync: PresentationSynchronizer,
    flags: FlagSet,
}

impl EntityRecord {
    pub fn synchronizer(&self) -> &PresentationSynchronizer {
        &self.sync
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }
}

#[derive(Debug, Default)]
pub struct WorldRegistry {
    cfg: Config,
    worlds: HashMap<WorldId, IndexMap<EntityId, EntityRecord>>,
}

impl WorldRegistry {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            worlds: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Register `entity` and build its clocks. Definition constants are turned on as flags.
    pub fn activate(
        &mut self,
        world: WorldId,
        entity: EntityId,
        definition: Arc<PresentationSet>,
        tick: u64,
    ) -> Result<(), RegistryError> {
        let entities = self.worlds.entry(world).or_default();
        if entities.contains_key(&entity) {
            return Err(RegistryError::AlreadyActive { world, entity });
        }
        let mut flags = FlagSet::new();
        flags.replace_constants(&definition.constants);
        let mut sync = PresentationSynchronizer::new(entity, self.cfg.clone());
        sync.activate(definition, tick);
        entities.insert(entity, EntityRecord { sync, flags });
        log::debug!("world {:?}: entity {:?} activated", world, entity);
        Ok(())
    }

    /// Hot-reload one entity's definitions. Constants are swapped for the new list; flags set
    /// by the host survive.
    pub fn reload(
        &mut self,
        world: WorldId,
        entity: EntityId,
        definition: Arc<PresentationSet>,
        tick: u64,
        out: &mut Outputs,
    ) -> Result<(), RegistryError> {
        let record = self.record_mut(world, entity)?;
        record.flags.replace_constants(&definition.constants);
        record.sync.reload(definition, tick, out);
        Ok(())
    }

    /// Despawn: stop the entity's sounds and drop its record.
    pub fn remove(
        &mut self,
        world: WorldId,
        entity: EntityId,
        out: &mut Outputs,
    ) -> Result<(), RegistryError> {
        let mut record = self
            .worlds
            .get_mut(&world)
            .and_then(|entities| entities.shift_remove(&entity))
            .ok_or(RegistryError::UnknownEntity { world, entity })?;
        record.sync.teardown(out);
        log::debug!("world {:?}: entity {:?} removed", world, entity);
        Ok(())
    }

    /// World unload: remove every entity of `world`. Returns how many were removed.
    pub fn remove_all(&mut self, world: WorldId, out: &mut Outputs) -> usize {
        let snapshot = self.entities(world);
        let mut removed = 0;
        for entity in snapshot {
            if self.remove(world, entity, out).is_ok() {
                removed += 1;
            }
        }
        self.worlds.remove(&world);
        removed
    }

    /// Entity ids of `world` in activation order.
    pub fn entities(&self, world: WorldId) -> Vec<EntityId> {
        self.worlds
            .get(&world)
            .map(|entities| entities.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, world: WorldId) -> usize {
        self.worlds.get(&world).map_or(0, |entities| entities.len())
    }

    pub fn is_empty(&self, world: WorldId) -> bool {
        self.len(world) == 0
    }

    pub fn get(&self, world: WorldId, entity: EntityId) -> Option<&EntityRecord> {
        self.worlds.get(&world)?.get(&entity)
    }

    fn record_mut(
        &mut self,
        world: WorldId,
        entity: EntityId,
    ) -> Result<&mut EntityRecord, RegistryError> {
        self.worlds
            .get_mut(&world)
            .and_then(|entities| entities.get_mut(&entity))
            .ok_or(RegistryError::UnknownEntity { world, entity })
    }

    /// Host-side flag mutation (switches, one-shot inputs such as `clicked`).
    pub fn flags_mut(
        &mut self,
        world: WorldId,
        entity: EntityId,
    ) -> Result<&mut FlagSet, RegistryError> {
        Ok(&mut self.record_mut(world, entity)?.flags)
    }

    /// The audio host finished an instance of `sound` started for `entity`.
    pub fn sound_finished(
        &mut self,
        world: WorldId,
        entity: EntityId,
        sound: SoundId,
    ) -> Result<bool, RegistryError> {
        Ok(self.record_mut(world, entity)?.sync.sound_finished(sound))
    }

    /// One simulation tick for every entity of `world`, in activation order.
    /// One-shot flags are dropped once the entity has been evaluated.
    pub fn tick_world(
        &mut self,
        world: WorldId,
        tick: u64,
        host: &dyn PresentationHost,
        out: &mut Outputs,
    ) {
        let Some(entities) = self.worlds.get_mut(&world) else {
            return;
        };
        for (entity, record) in entities.iter_mut() {
            let observer = host.observer(*entity);
            {
                let vars = EntityVariables::new(host.world_state(*entity), &record.flags)
                    .with_custom(host.entity_variables(*entity));
                record.sync.tick(tick, &vars, &observer, out);
            }
            record.flags.clear_one_shots();
        }
    }

    /// One render frame for every entity of `world`.
    pub fn frame_world(
        &mut self,
        world: WorldId,
        partial_tick: f32,
        host: &dyn PresentationHost,
        out: &mut FrameOutputs,
    ) {
        let Some(entities) = self.worlds.get_mut(&world) else {
            return;
        };
        for (entity, record) in entities.iter_mut() {
            let vars = EntityVariables::new(host.world_state(*entity), &record.flags)
                .with_custom(host.entity_variables(*entity));
            record.sync.frame(partial_tick, &vars, out);
        }
    }
}
