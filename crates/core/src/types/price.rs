//! Whole-rupiah price representation.
//!
//! Catalog prices are quoted in whole rupiah with no minor units, so the
//! amount is an unsigned integer rather than a decimal. `Display` renders
//! with Indonesian dot grouping (`1.234.567`), which is what the order
//! summary and the gallery expect after the `Rp ` prefix.

use serde::{Deserialize, Serialize};

/// A price in whole Indonesian rupiah.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(u64);

impl Rupiah {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new amount from whole rupiah.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount in whole rupiah.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Add, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a unit count, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_mul(self, qty: u64) -> Self {
        Self(self.0.saturating_mul(qty))
    }
}

impl From<u64> for Rupiah {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Rupiah> for u64 {
    fn from(amount: Rupiah) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Rupiah {
    /// Format with dot thousand separators (`1.234.567`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouping() {
        assert_eq!(Rupiah::new(0).to_string(), "0");
        assert_eq!(Rupiah::new(999).to_string(), "999");
        assert_eq!(Rupiah::new(1_000).to_string(), "1.000");
        assert_eq!(Rupiah::new(100_000).to_string(), "100.000");
        assert_eq!(Rupiah::new(1_234_567).to_string(), "1.234.567");
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let total = Rupiah::new(1_000).saturating_sub(Rupiah::new(5_000));
        assert_eq!(total, Rupiah::ZERO);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Rupiah::new(150_000)).unwrap();
        assert_eq!(json, "150000");
        let back: Rupiah = serde_json::from_str("150000").unwrap();
        assert_eq!(back, Rupiah::new(150_000));
    }
}
