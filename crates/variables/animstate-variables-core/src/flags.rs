//! Boolean flags set on an entity (switches, constants, one-shot inputs).

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Flags currently "on" for an entity, plus every name that has ever been declared.
///
/// A declared flag that is off resolves to 0; a name that was never declared is unknown.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlagSet {
    on: HashSet<String>,
    declared: HashSet<String>,
    /// Cleared by [`FlagSet::clear_one_shots`] after the tick that observed them.
    #[serde(default)]
    one_shot: HashSet<String>,
    /// Flags turned on by the current definition's constants.
    #[serde(default)]
    constants: HashSet<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` resolvable (as 0) without turning it on.
    pub fn declare(&mut self, name: &str) {
        if !self.declared.contains(name) {
            self.declared.insert(name.to_string());
        }
    }

    pub fn set(&mut self, name: &str) {
        self.declare(name);
        self.on.insert(name.to_string());
    }

    /// Turn a flag on for exactly one tick.
    pub fn set_one_shot(&mut self, name: &str) {
        self.set(name);
        self.one_shot.insert(name.to_string());
    }

    pub fn clear(&mut self, name: &str) -> bool {
        self.one_shot.remove(name);
        self.constants.remove(name);
        self.on.remove(name)
    }

    /// Flip a flag and return its new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.clear(name) {
            false
        } else {
            self.set(name);
            true
        }
    }

    #[inline]
    pub fn is_set(&self, name: &str) -> bool {
        self.on.contains(name)
    }

    #[inline]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Swap in a definition's constants (always-on flags).
    ///
    /// Constants from the previous definition are turned off unless the new list repeats
    /// them. Flags the host set itself are left alone.
    pub fn replace_constants<'a, I>(&mut self, constants: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let previous = std::mem::take(&mut self.constants);
        for name in constants {
            self.set(name);
            self.constants.insert(name.clone());
        }
        for name in previous {
            if !self.constants.contains(&name) {
                self.on.remove(&name);
            }
        }
    }

    #[inline]
    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }

    /// Drop one-shot flags; call once at the end of each simulation tick.
    pub fn clear_one_shots(&mut self) {
        for name in self.one_shot.drain() {
            self.on.remove(&name);
        }
    }

    /// 1 if set, 0 if declared but off, `None` otherwise.
    pub fn resolve(&self, name: &str) -> Option<f64> {
        if self.on.contains(name) {
            Some(1.0)
        } else if self.declared.contains(name) {
            Some(0.0)
        } else {
            None
        }
    }

    pub fn iter_on(&self) -> impl Iterator<Item = &str> {
        self.on.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_flags_resolve_to_zero() {
        let mut flags = FlagSet::new();
        assert_eq!(flags.resolve("headlight"), None);
        flags.declare("headlight");
        assert_eq!(flags.resolve("headlight"), Some(0.0));
        flags.set("headlight");
        assert_eq!(flags.resolve("headlight"), Some(1.0));
        assert!(flags.clear("headlight"));
        assert_eq!(flags.resolve("headlight"), Some(0.0));
    }

    #[test]
    fn toggle_flips_state() {
        let mut flags = FlagSet::new();
        assert!(flags.toggle("horn"));
        assert!(flags.is_set("horn"));
        assert!(!flags.toggle("horn"));
        assert!(!flags.is_set("horn"));
        assert!(flags.is_declared("horn"));
    }

    #[test]
    fn one_shots_last_a_single_tick() {
        let mut flags = FlagSet::new();
        flags.set("beacon_on");
        flags.set_one_shot("clicked");
        assert_eq!(flags.resolve("clicked"), Some(1.0));
        flags.clear_one_shots();
        assert_eq!(flags.resolve("clicked"), Some(0.0));
        assert!(flags.is_set("beacon_on"));
    }

    #[test]
    fn constants_are_set() {
        let mut flags = FlagSet::new();
        let constants = vec!["has_siren".to_string(), "painted".to_string()];
        flags.replace_constants(&constants);
        let mut on: Vec<&str> = flags.iter_on().collect();
        on.sort_unstable();
        assert_eq!(on, vec!["has_siren", "painted"]);
    }

    #[test]
    fn replacing_constants_drops_stale_ones_only() {
        let mut flags = FlagSet::new();
        flags.replace_constants(&["has_siren".to_string(), "painted".to_string()]);
        flags.set("headlights");

        flags.replace_constants(&["painted".to_string()]);
        assert!(!flags.is_set("has_siren"));
        assert_eq!(flags.resolve("has_siren"), Some(0.0));
        assert!(flags.is_set("painted"));
        assert!(flags.is_constant("painted"));
        assert!(flags.is_set("headlights"));

        flags.replace_constants(std::iter::empty());
        assert!(!flags.is_set("painted"));
        assert!(flags.is_set("headlights"));
    }
}
