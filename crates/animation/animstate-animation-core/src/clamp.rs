use crate::data::AnimationDefinition;

/// Shape a resolved value per its definition.
///
/// With an axis: `|axis| * value + offset + stacking_offset`, clamped on each side whose
/// bound is non-zero. Without an axis the value passes through untouched. `absolute`
/// rectifies both the input and the final result.
///
/// `stacking_offset` lets one animation ride on another's result without being
/// clamped separately.
pub fn clamp_and_scale(value: f64, def: &AnimationDefinition, stacking_offset: f64) -> f64 {
    let mut value = value;
    if let Some(axis) = def.axis {
        let input = if def.absolute { value.abs() } else { value };
        value = axis.length() * input + def.offset + stacking_offset;
        if def.clamp_min != 0.0 && value < def.clamp_min {
            value = def.clamp_min;
        } else if def.clamp_max != 0.0 && value > def.clamp_max {
            value = def.clamp_max;
        }
    }
    if def.absolute {
        value.abs()
    } else {
        value
    }
}
