//! Input parsing and validation
//!
//! Calculator fields arrive as free text. A field that is empty, not a
//! number, or not strictly positive means the calculator is not ready yet,
//! never an error.

/// Parse a free-text numeric field, accepting only finite positive values
pub fn parse_positive(s: &str) -> Option<f64> {
    let value: f64 = s.trim().parse().ok()?;
    positive(value)
}

/// Accept only finite positive values
pub fn positive(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}
