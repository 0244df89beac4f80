//! Numeric literals

use optics::common::Float;

/// Returns the shortest decimal text that parses back to exactly `v`,
/// always with a decimal point so the shading language reads it as a float.
///
/// * `v` - The value.
pub fn float_literal(v: Float) -> String {
    let s = format!("{v:?}");
    if s.contains('.') || !v.is_finite() {
        s
    } else if let Some((mantissa, exponent)) = s.split_once('e') {
        format!("{mantissa}.0e{exponent}")
    } else {
        format!("{s}.0")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
