use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    presentations: HashMap<String, String>,
    #[serde(default)]
    scenarios: HashMap<String, String>,
}

fn read_fixture(map: &HashMap<String, String>, kind: &str, name: &str) -> Result<String> {
    let rel = map
        .get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))?;
    let path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

pub mod presentations {
    use super::*;

    /// Raw definition JSON; callers run it through the loader so sanitising is exercised.
    pub fn json(name: &str) -> Result<String> {
        read_fixture(&MANIFEST.presentations, "presentation", name)
    }
}

pub mod scenarios {
    use super::*;

    /// Variable values for one tick, keyed by variable name.
    pub type Frame = HashMap<String, f64>;

    /// A scripted run: which presentation to load and the variable timeline to drive it with.
    #[derive(Debug, Deserialize)]
    pub struct Scenario {
        /// Key into the presentations manifest.
        pub presentation: String,
        /// Ticks the timeline is repeated for; the timeline wraps around.
        pub ticks: u64,
        pub timeline: Vec<Frame>,
    }

    impl Scenario {
        /// Variables for `tick` (1-based), wrapping over the timeline.
        pub fn frame(&self, tick: u64) -> Option<&Frame> {
            if self.timeline.is_empty() {
                return None;
            }
            let idx = (tick.saturating_sub(1) % self.timeline.len() as u64) as usize;
            self.timeline.get(idx)
        }
    }

    pub fn load(name: &str) -> Result<Scenario> {
        let text = read_fixture(&MANIFEST.scenarios, "scenario", name)?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse scenario {name}"))
    }
}
