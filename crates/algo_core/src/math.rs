//! Fixed-point helpers for deterministic planning decisions.
//!
//! Resource levels, damage, ranges and risk scores arrive from the engine as
//! decimals. They are converted once at the boundary so that every threshold
//! comparison made while planning is exact and reproducible.

use fixed::types::I32F32;

/// Fixed-point number type used for every planning quantity.
///
/// 32 integer bits and 32 fractional bits.
pub type Fixed = I32F32;

/// Convert a decimal reported by the engine into [`Fixed`].
///
/// Values outside the representable range saturate; NaN maps to zero.
#[must_use]
pub fn from_decimal(value: f64) -> Fixed {
    if value.is_nan() {
        return Fixed::ZERO;
    }
    Fixed::saturating_from_num(value)
}

/// Returns true when `count` is strictly greater than `ratio * size`.
#[must_use]
pub fn exceeds_ratio(count: usize, size: usize, ratio: Fixed) -> bool {
    let count = Fixed::saturating_from_num(count);
    let size = Fixed::saturating_from_num(size);
    count > ratio.saturating_mul(size)
}

/// `count / size` as a fixed-point ratio, zero for an empty region.
#[must_use]
pub fn ratio(count: usize, size: usize) -> Fixed {
    if size == 0 {
        return Fixed::ZERO;
    }
    Fixed::saturating_from_num(count) / Fixed::saturating_from_num(size)
}

/// Serde support for human-written decimal thresholds.
///
/// Policy files are edited by hand, so fixed-point fields are written as
/// plain decimals (`0.7`) and converted with [`from_decimal`] on load.
pub mod decimal_serde {
    use super::{from_decimal, Fixed};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as a decimal.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_num::<f64>().serialize(serializer)
    }

    /// Deserialize a fixed-point number from a decimal.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(from_decimal(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_handles_nan() {
        assert_eq!(from_decimal(f64::NAN), Fixed::ZERO);
        assert_eq!(from_decimal(2.5), Fixed::from_num(2.5));
    }

    #[test]
    fn test_exceeds_ratio_is_strict() {
        let threshold = from_decimal(0.7);
        assert!(exceeds_ratio(8, 10, threshold));
        assert!(exceeds_ratio(7, 10, Fixed::from_num(0.5)));
        assert!(!exceeds_ratio(5, 10, Fixed::from_num(0.5)));
        assert!(!exceeds_ratio(0, 0, threshold));
    }

    #[test]
    fn test_ratio_of_empty_region() {
        assert_eq!(ratio(3, 0), Fixed::ZERO);
        assert_eq!(ratio(8, 10), Fixed::from_num(8) / Fixed::from_num(10));
    }
}
