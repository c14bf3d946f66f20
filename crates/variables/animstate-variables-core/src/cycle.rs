//! Repeating on/off cycle variables: `<off>_<on>_<extra...>_cycle`.

use crate::error::VariableError;

const CYCLE_SUFFIX: &str = "_cycle";

/// Parsed cycle timing, in whole ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleSpec {
    pub off: u64,
    pub on: u64,
    /// Full period; `off + on + sum(extra segments)`.
    pub total: u64,
}

impl CycleSpec {
    /// True for any name ending in `_cycle`, well-formed or not.
    #[inline]
    pub fn is_cycle_name(name: &str) -> bool {
        name.ends_with(CYCLE_SUFFIX)
    }

    /// Parse every `_`-separated segment before the suffix positionally.
    /// The first two are the off and on windows; any further segments extend the period.
    pub fn parse(name: &str) -> Result<Self, VariableError> {
        let body = name
            .strip_suffix(CYCLE_SUFFIX)
            .ok_or_else(|| VariableError::CycleTooShort {
                name: name.to_string(),
            })?;

        let mut segments = Vec::new();
        for segment in body.split('_') {
            let parsed = segment
                .parse::<u64>()
                .map_err(|_| VariableError::MalformedCycle {
                    name: name.to_string(),
                    segment: segment.to_string(),
                })?;
            segments.push(parsed);
        }
        if segments.len() < 2 {
            return Err(VariableError::CycleTooShort {
                name: name.to_string(),
            });
        }

        let off = segments[0];
        let on = segments[1];
        let total = segments.iter().fold(0u64, |acc, s| acc.saturating_add(*s));
        if total == 0 {
            return Err(VariableError::EmptyCycle {
                name: name.to_string(),
            });
        }
        Ok(Self { off, on, total })
    }

    /// 1 while inside the "on" window of the current period, else 0.
    pub fn value_at(&self, tick: u64) -> f64 {
        let t = tick % self.total;
        if t > self.off && t - self.off < self.on {
            1.0
        } else {
            0.0
        }
    }
}
