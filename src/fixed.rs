//! Fixed-point encoding of solver results
//!
//! Prices and allocations are published as signed integers scaled by
//! `10^decimals` (12 by default), the format settlement contracts consume.

use crate::errors::{Result, StackelbergError};

/// Decimal places used when no other precision is configured
pub const DEFAULT_DECIMALS: u32 = 12;

/// Largest supported precision; `10^30` still fits an `f64` exponent comfortably
pub const MAX_DECIMALS: u32 = 30;

fn scale(decimals: u32) -> Result<f64> {
    if decimals > MAX_DECIMALS {
        return Err(StackelbergError::FixedPoint(format!(
            "{} decimals exceeds maximum of {}",
            decimals, MAX_DECIMALS
        )));
    }
    Ok(10f64.powi(decimals as i32))
}

/// Encode `value` as `round(value * 10^decimals)`
pub fn to_fixed(value: f64, decimals: u32) -> Result<i128> {
    if !value.is_finite() {
        return Err(StackelbergError::FixedPoint(format!(
            "cannot encode non-finite value {}",
            value
        )));
    }

    let scaled = (value * scale(decimals)?).round();
    if scaled.abs() >= i128::MAX as f64 {
        return Err(StackelbergError::FixedPoint(format!(
            "{} overflows at {} decimals",
            value, decimals
        )));
    }

    Ok(scaled as i128)
}

/// Decode a fixed-point integer back into a float
pub fn from_fixed(raw: i128, decimals: u32) -> Result<f64> {
    Ok(raw as f64 / scale(decimals)?)
}

/// Encode every value of a slice
pub fn to_fixed_vec(values: &[f64], decimals: u32) -> Result<Vec<i128>> {
    values.iter().map(|v| to_fixed(*v, decimals)).collect()
}

/// Decode every value of a slice
pub fn from_fixed_vec(raw: &[i128], decimals: u32) -> Result<Vec<f64>> {
    raw.iter().map(|r| from_fixed(*r, decimals)).collect()
}

/// Round `value` to `places` decimal places
///
/// `places` above `MAX_DECIMALS` is clamped to `MAX_DECIMALS`.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_DECIMALS) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_default_decimals() {
        assert_eq!(to_fixed(1.0, DEFAULT_DECIMALS).unwrap(), 1_000_000_000_000);
        assert_eq!(to_fixed(1e10, DEFAULT_DECIMALS).unwrap(), 10_000_000_000_000_000_000_000);
        assert_eq!(to_fixed(0.0, DEFAULT_DECIMALS).unwrap(), 0);
    }

    #[test]
    fn test_small_prices_lose_precision() {
        // 1.2879e-8 keeps only five significant digits at 12 decimals
        assert_eq!(to_fixed(1.2879121576411264e-08, DEFAULT_DECIMALS).unwrap(), 12879);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(2_500_000_000_000, DEFAULT_DECIMALS).unwrap(), 2.5);
        assert_eq!(from_fixed(-5, 1).unwrap(), -0.5);
    }

    #[test]
    fn test_vec_helpers() {
        let raw = to_fixed_vec(&[0.5, 2.0], 3).unwrap();
        assert_eq!(raw, vec![500, 2000]);
        assert_eq!(from_fixed_vec(&raw, 3).unwrap(), vec![0.5, 2.0]);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(to_fixed(f64::NAN, 12).is_err());
        assert!(to_fixed(f64::INFINITY, 12).is_err());
        assert!(to_fixed(1.0, MAX_DECIMALS + 1).is_err());
        assert!(to_fixed(1e30, 12).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3735406.5767958164, 6), 3735406.576796);
        assert_eq!(round_to(2.0688837, 2), 2.07);
    }

    #[test]
    fn test_round_to_clamps_places() {
        assert_eq!(round_to(1.5, 400), round_to(1.5, MAX_DECIMALS));
        assert!(round_to(1.5, u32::MAX).is_finite());
        assert!(round_to(-2.25, 309).is_finite());
    }
}
