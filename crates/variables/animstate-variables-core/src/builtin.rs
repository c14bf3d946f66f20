//! World-driven built-in variables.

use crate::cycle::CycleSpec;

/// Closed set of built-in variable names resolved by [`resolve_builtin`].
pub const BUILTIN_NAMES: &[&str] = &[
    "tick",
    "tick_sin",
    "tick_cos",
    "time",
    "rain_strength",
    "rain_sin",
    "rain_cos",
    "light_sunlight",
    "light_total",
    "ground_distance",
    "redstone_active",
    "redstone_level",
];

/// World/environment queries, evaluated at the entity's position.
///
/// Implemented by the host; the engine only reads through it.
pub trait WorldState {
    /// Current world tick.
    fn tick(&self) -> u64;
    /// Time of day.
    fn time(&self) -> f64;
    /// Precipitation intensity. Truncated to a whole number before use.
    fn rain_strength(&self) -> f64;
    /// Light level; `include_block_light = false` gives ambient/sky light only.
    fn light_level(&self, include_block_light: bool) -> f64;
    /// Distance down to the nearest solid surface.
    fn ground_distance(&self) -> f64;
    /// Signal power at the entity's position (0 = unpowered).
    fn redstone_power(&self) -> u8 {
        0
    }
}

/// Resolve a built-in or cycle variable. Unknown names return `None`.
pub fn resolve_builtin(world: &dyn WorldState, name: &str, partial_tick: f32) -> Option<f64> {
    let tick = world.tick() as f64 + partial_tick as f64;
    let value = match name {
        "tick" => tick,
        "tick_sin" => tick.to_radians().sin(),
        "tick_cos" => tick.to_radians().cos(),
        "time" => world.time(),
        "rain_strength" => world.rain_strength().trunc(),
        "rain_sin" => rain_wave(world, tick, f64::sin),
        "rain_cos" => rain_wave(world, tick, f64::cos),
        "light_sunlight" => world.light_level(false),
        "light_total" => world.light_level(true),
        "ground_distance" => world.ground_distance(),
        "redstone_active" => {
            if world.redstone_power() > 0 {
                1.0
            } else {
                0.0
            }
        }
        "redstone_level" => world.redstone_power() as f64,
        _ => {
            if CycleSpec::is_cycle_name(name) {
                // Names are validated at load time; a bad one here is simply unknown.
                return CycleSpec::parse(name).ok().map(|c| c.value_at(world.tick()));
            }
            return None;
        }
    };
    Some(value)
}

/// Phase-shifted wave in [0, 1] whose frequency scales with rain strength.
fn rain_wave(world: &dyn WorldState, tick: f64, wave: fn(f64) -> f64) -> f64 {
    let strength = world.rain_strength().trunc();
    if strength > 0.0 {
        wave(strength * (360.0 * tick / 20.0).to_radians()) / 2.0 + 0.5
    } else {
        0.0
    }
}
