//! The single capability the engine uses to read runtime state.

use hashbrown::HashMap;

use crate::cycle::CycleSpec;
use crate::error::VariableError;

/// Maps a variable name to its current value.
///
/// `partial_tick` is the fractional progress into the next simulation tick
/// (0.0 during tick passes). Returns `None` for names the resolver does not know;
/// callers treat that as 0 for arithmetic.
pub trait VariableResolver {
    fn resolve(&self, name: &str, partial_tick: f32) -> Option<f64>;
}

impl<T: VariableResolver + ?Sized> VariableResolver for &T {
    #[inline]
    fn resolve(&self, name: &str, partial_tick: f32) -> Option<f64> {
        (**self).resolve(name, partial_tick)
    }
}

impl<T: VariableResolver + ?Sized> VariableResolver for Box<T> {
    #[inline]
    fn resolve(&self, name: &str, partial_tick: f32) -> Option<f64> {
        (**self).resolve(name, partial_tick)
    }
}

/// Fixed name -> value table. Ignores `partial_tick`.
///
/// Handy for hosts exposing a handful of entity values, and for tests.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    values: HashMap<String, f64>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }
}

impl VariableResolver for MapResolver {
    fn resolve(&self, name: &str, _partial_tick: f32) -> Option<f64> {
        self.values.get(name).copied()
    }
}

/// Load-time check for a variable name. Malformed cycle names are configuration
/// errors, never per-tick faults.
pub fn validate_variable_name(name: &str) -> Result<(), VariableError> {
    if name.is_empty() {
        return Err(VariableError::EmptyName);
    }
    if CycleSpec::is_cycle_name(name) {
        CycleSpec::parse(name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_resolver_reports_unknown_names() {
        let r = MapResolver::new().with("throttle", 0.25);
        assert_eq!(r.resolve("throttle", 0.0), Some(0.25));
        assert_eq!(r.resolve("brake", 0.0), None);
        let by_ref: &dyn VariableResolver = &r;
        assert_eq!(by_ref.resolve("throttle", 0.5), Some(0.25));
    }

    #[test]
    fn validation_only_rejects_bad_cycles_and_empty_names() {
        assert!(validate_variable_name("engine_rpm").is_ok());
        assert!(validate_variable_name("5_10_0_cycle").is_ok());
        assert!(validate_variable_name("5_x_0_cycle").is_err());
        assert_eq!(validate_variable_name(""), Err(VariableError::EmptyName));
    }
}
