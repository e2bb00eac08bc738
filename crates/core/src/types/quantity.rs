//! Order line quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A positive order quantity.
///
/// Raw form input is never rejected: [`Quantity::from_input`] resolves any
/// string to a usable quantity so that totals are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// Quantity used for empty or unusable input.
    pub const DEFAULT: Self = Self(NonZeroU32::MIN);

    /// Resolve raw form input to a quantity.
    ///
    /// Takes the leading integer of the trimmed input (`"3 boxes"` is 3,
    /// `"2.7"` is 2). Empty, non-numeric, zero, and negative input resolve to
    /// [`Quantity::DEFAULT`]. Values beyond `u32::MAX` saturate.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if unsigned.starts_with('-') {
            return Self::DEFAULT;
        }

        let digits_len = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let Some(digits) = unsigned.get(..digits_len) else {
            return Self::DEFAULT;
        };
        if digits.is_empty() {
            return Self::DEFAULT;
        }

        let count = digits.parse::<u32>().unwrap_or(u32::MAX);
        NonZeroU32::new(count).map_or(Self::DEFAULT, Self)
    }

    /// The count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
