use std::sync::Arc;

use animstate_animation_core::{
    AudioCommand, ChannelKind, Config, DefinitionError, EntityId, FrameOutputs, MapResolver,
    ObserverView, Outputs, PresentationSet, PresentationSynchronizer,
};
use animstate_test_fixtures::scenarios::Scenario;
use animstate_variables_core::{EntityVariables, FlagSet, WorldState};

struct Garage {
    tick: u64,
}

impl WorldState for Garage {
    fn tick(&self) -> u64 {
        self.tick
    }
    fn time(&self) -> f64 {
        6000.0
    }
    fn rain_strength(&self) -> f64 {
        0.0
    }
    fn light_level(&self, _include_block_light: bool) -> f64 {
        0.5
    }
    fn ground_distance(&self) -> f64 {
        0.0
    }
}

fn load(name: &str) -> PresentationSet {
    let json = animstate_test_fixtures::presentations::json(name).expect("load presentation fixture");
    let loaded = PresentationSet::from_json(&json).expect("parse presentation fixture");
    assert!(loaded.rejected.is_empty(), "{:?}", loaded.rejected);
    loaded.set
}

fn resolver_for(scenario: &Scenario, tick: u64) -> MapResolver {
    let mut vars = MapResolver::new();
    if let Some(frame) = scenario.frame(tick) {
        for (name, value) in frame {
            vars.set(name, *value);
        }
    }
    vars
}

fn run(
    sync: &mut PresentationSynchronizer,
    scenario: &Scenario,
    flags: &FlagSet,
) -> Vec<(Outputs, FrameOutputs)> {
    let observer = ObserverView::default();
    let mut history = Vec::new();
    for tick in 1..=scenario.ticks {
        let world = Garage { tick };
        let custom = resolver_for(scenario, tick);
        let vars = EntityVariables::new(&world, flags).with_custom(Some(&custom));

        let mut out = Outputs::default();
        sync.tick(tick, &vars, &observer, &mut out);
        let mut frame = FrameOutputs::default();
        for partial in [0.25, 0.75] {
            frame.clear();
            sync.frame(partial, &vars, &mut frame);
        }
        history.push((out, frame));
    }
    history
}

#[test]
fn beacon_vehicle_fixture_loads_cleanly() {
    let set = load("beacon-vehicle");
    assert_eq!(set.light_objects.len(), 2);
    assert_eq!(set.sounds.len(), 3);
    assert_eq!(set.particles.len(), 2);
    assert_eq!(set.animated_objects.len(), 2);
    assert_eq!(set.constants, vec!["has_beacon".to_string()]);
    assert!(set.sounds[0].looping);
    assert!(set.sounds[2].is_interior);
    assert!(set.animated_objects[1].animations[2].add_prior_offset);
}

#[test]
fn malformed_channels_fall_back_to_no_animations() {
    let json = animstate_test_fixtures::presentations::json("malformed-channels")
        .expect("load presentation fixture");
    let loaded = PresentationSet::from_json(&json).expect("json itself is valid");

    let channels: Vec<ChannelKind> = loaded.rejected.iter().map(|r| r.channel).collect();
    assert_eq!(channels, vec![ChannelKind::Active, ChannelKind::Spawn]);
    assert!(matches!(
        loaded.rejected[0].error,
        DefinitionError::Variable(_)
    ));
    assert!(matches!(
        loaded.rejected[1].error,
        DefinitionError::ClampRange { .. }
    ));

    let set = loaded.set;
    assert!(set.sounds[0].active_animations.is_empty());
    assert_eq!(set.sounds[0].volume_animations.len(), 1);
    assert!(set.particles[0].active_animations.is_empty());
    assert_eq!(set.light_objects[0].brightness_animations.len(), 1);

    let mut sync = PresentationSynchronizer::new(EntityId(1), Config::default());
    sync.activate(Arc::new(set), 0);
    assert_eq!(sync.clock_count(), 2);
}

#[test]
fn broken_json_is_a_parse_error() {
    let err = PresentationSet::from_json("{ \"sounds\": [ { \"name\": 3 } ] }").unwrap_err();
    assert!(matches!(err, DefinitionError::Parse(_)));
}

#[test]
fn replay_after_reload_is_identical() {
    let scenario = animstate_test_fixtures::scenarios::load("beacon-drive").expect("load scenario");
    let set = Arc::new(load(&scenario.presentation));
    let mut flags = FlagSet::new();
    flags.replace_constants(&set.constants);

    let mut sync = PresentationSynchronizer::new(EntityId(3), Config::default());
    sync.activate(Arc::clone(&set), 0);
    let first = run(&mut sync, &scenario, &flags);

    let mut stops = Outputs::default();
    sync.reload(Arc::clone(&set), 0, &mut stops);
    assert!(stops
        .audio
        .iter()
        .all(|c| matches!(c, AudioCommand::Stop { .. })));
    let second = run(&mut sync, &scenario, &flags);

    assert_eq!(first.len(), 100);
    assert_eq!(first, second);

    let starts = first
        .iter()
        .flat_map(|(out, _)| out.audio.iter())
        .filter(|c| matches!(c, AudioCommand::Start { .. }))
        .count();
    assert!(starts > 0);
    assert!(first.iter().any(|(out, _)| !out.particles.is_empty()));
    assert!(first.iter().any(|(_, frame)| frame.lights[0].brightness > 0.0));
}
