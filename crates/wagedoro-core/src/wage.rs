//! Wage input coercion.
//!
//! Wage text comes straight from the user. It is never rejected: anything
//! that is not a finite number becomes zero.

/// Parse wage text, coercing malformed input to `0.0`.
///
/// Negative numbers are passed through unchanged.
pub fn parse_wage_input(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
