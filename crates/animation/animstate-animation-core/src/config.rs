//! Core configuration for animstate-animation-core.

use serde::{Deserialize, Serialize};

/// Shape applied to a clock's linear ramp progress before it is used as a value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampCurve {
    #[default]
    Linear,
    /// Hermite ease-in/ease-out (`3t^2 - 2t^3`).
    SmoothStep,
}

impl RampCurve {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            RampCurve::Linear => t,
            RampCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Tuning for presentation synchronizers.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Volume multiplier applied when the observer sits inside a different, enclosed entity.
    pub enclosed_attenuation: f32,

    /// Interpolation used by duration/delay clocks.
    pub ramp_curve: RampCurve,

    /// Emit a warning the first time each unknown variable name is seen.
    pub log_unknown_variables: bool,

    /// Initial capacity hint for the live sound instance list.
    pub sound_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enclosed_attenuation: 0.5,
            ramp_curve: RampCurve::Linear,
            log_unknown_variables: true,
            sound_capacity: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_pin_endpoints() {
        for curve in [RampCurve::Linear, RampCurve::SmoothStep] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            assert_eq!(curve.apply(2.0), 1.0);
        }
        assert_eq!(RampCurve::SmoothStep.apply(0.5), 0.5);
        assert!(RampCurve::SmoothStep.apply(0.25) < 0.25);
    }

    #[test]
    fn partial_config_json_keeps_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "ramp_curve": "smooth_step" }"#).unwrap();
        assert_eq!(cfg.ramp_curve, RampCurve::SmoothStep);
        assert_eq!(cfg.enclosed_attenuation, 0.5);
        assert!(cfg.log_unknown_variables);
    }
}
