use crate::catalog::SensorType;
use std::f64::consts::PI;

/// Smooth daily curve in `[0, 1]`, at its midpoint at 06:00 and 18:00.
pub fn hour_factor(hour: u32) -> f64 {
    0.5 + 0.5 * ((hour as f64 - 6.0) * PI / 12.0).sin()
}

/// Noise-free reading for `hour`, spread across the type's range.
pub fn base_value(sensor_type: &SensorType, hour: u32) -> f64 {
    let span = sensor_type.max_value - sensor_type.min_value;
    sensor_type.min_value + span * hour_factor(hour)
}

/// Applies multiplicative noise, clamps to the type's range and rounds to
/// two decimals.
pub fn apply_noise(base_value: f64, noise: f64, sensor_type: &SensorType) -> f64 {
    let value = (base_value * (1.0 + noise)).clamp(sensor_type.min_value, sensor_type.max_value);
    round_to_cents(value)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
