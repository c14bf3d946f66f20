//! Once-per-name reporting of unresolved variables.

use hashbrown::HashSet;

/// Remembers which unknown variable names have already been reported.
#[derive(Debug, Clone)]
pub struct UnknownVariables {
    enabled: bool,
    seen: HashSet<String>,
}

impl Default for UnknownVariables {
    fn default() -> Self {
        Self::new(true)
    }
}

impl UnknownVariables {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            seen: HashSet::new(),
        }
    }

    /// Record an unresolved name. Returns true the first time a name is seen.
    pub fn note(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        if self.enabled {
            log::warn!("animation variable not found: '{}' - using 0.0", name);
        }
        true
    }

    pub fn seen(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_name_once() {
        let mut unknown = UnknownVariables::new(false);
        assert!(unknown.note("bogus"));
        assert!(!unknown.note("bogus"));
        assert!(unknown.note("other"));
        assert_eq!(unknown.len(), 2);
    }
}
