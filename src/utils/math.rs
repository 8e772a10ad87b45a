/// Clamp into `[0, 1]`. Non-finite input (NaN, +/-infinity) maps to 0.
pub fn normalize01(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Missing or non-finite values become 0
pub fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Missing, non-finite or negative magnitudes become 0
pub fn non_negative(value: Option<f64>) -> f64 {
    finite_or_zero(value).max(0.0)
}

/// Linear interpolation of `x` between `(x0, y0)` and `(x1, y1)`, extrapolating past `x1`
pub fn lerp_through(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    if (x1 - x0).abs() < f64::EPSILON {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}
