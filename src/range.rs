use rug::Integer;

use crate::error::{Result, SearchError};

/// Half-open search interval `lower ≤ n < upper`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRange {
    pub lower: Integer,
    pub upper: Integer,
}

impl SearchRange {
    /// All integers with exactly `digits` decimal digits: `[10^(d-1), 10^d)`.
    pub fn for_digits(digits: u32) -> Result<Self> {
        if digits < 2 {
            return Err(SearchError::InvalidArgument(format!(
                "number of digits must be greater than 1, got {}",
                digits
            )));
        }
        Ok(SearchRange {
            lower: Integer::from(Integer::u_pow_u(10, digits - 1)),
            upper: Integer::from(Integer::u_pow_u(10, digits)),
        })
    }

    /// Arbitrary range, for crafted searches. Requires `0 < lower < upper`
    /// and at least one odd integer inside.
    pub fn new(lower: Integer, upper: Integer) -> Result<Self> {
        if lower <= 0u32 || lower >= upper {
            return Err(SearchError::InvalidArgument(format!(
                "search range must satisfy 0 < lower < upper, got [{}, {})",
                lower, upper
            )));
        }
        let first_odd = Integer::from(&lower | 1u32);
        if first_odd >= upper {
            return Err(SearchError::InvalidArgument(format!(
                "search range [{}, {}) contains no odd integer",
                lower, upper
            )));
        }
        Ok(SearchRange { lower, upper })
    }

    /// Width `upper - lower`; always positive.
    pub fn span(&self) -> Integer {
        Integer::from(&self.upper - &self.lower)
    }

    pub fn contains(&self, n: &Integer) -> bool {
        *n >= self.lower && *n < self.upper
    }
}
