//! Small numeric helpers shared by the codecs and reports

/// Round to `decimals` places, halves rounding towards +infinity
pub fn round_number(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor + 0.5).floor() / factor
}
