//! Salary levels for comparison tables.
//!
//! Tables either use a fixed list of representative annual salaries (finer
//! steps at lower incomes, coarser above) or a linearly interpolated custom
//! range between two user-supplied bounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::SalaryBasis;
use crate::calculations::common::round_won;
use crate::calculations::payroll::MAX_MONTHLY_GROSS;

/// Representative annual salaries in won.
const DEFAULT_ANNUAL_LEVELS: [i64; 67] = [
    // 1,000만 ~ 2,900만, 100만 steps
    10_000_000, 11_000_000, 12_000_000, 13_000_000, 14_000_000,
    15_000_000, 16_000_000, 17_000_000, 18_000_000, 19_000_000,
    20_000_000, 21_000_000, 22_000_000, 23_000_000, 24_000_000,
    25_000_000, 26_000_000, 27_000_000, 28_000_000, 29_000_000,
    // 3,000만 ~ 3,900만, 100만 steps
    30_000_000, 31_000_000, 32_000_000, 33_000_000, 34_000_000,
    35_000_000, 36_000_000, 37_000_000, 38_000_000, 39_000_000,
    // 4,000만 ~ 6,800만, 200만 steps
    40_000_000, 42_000_000, 44_000_000, 46_000_000, 48_000_000,
    50_000_000, 52_000_000, 54_000_000, 56_000_000, 58_000_000,
    60_000_000, 62_000_000, 64_000_000, 66_000_000, 68_000_000,
    // 7,000만 ~ 9,500만, 500만 steps
    70_000_000, 75_000_000, 80_000_000, 85_000_000, 90_000_000, 95_000_000,
    // 1억 ~ 1.5억, 1,000만 steps
    100_000_000, 110_000_000, 120_000_000, 130_000_000, 140_000_000, 150_000_000,
    // 1.75억 ~ 3억, 2,500만 steps
    175_000_000, 200_000_000, 225_000_000, 250_000_000, 275_000_000, 300_000_000,
    // 3.5억 ~ 5억, 5,000만 steps
    350_000_000, 400_000_000, 450_000_000, 500_000_000,
];

/// Reasons a custom range cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range bounds must be positive")]
    NonPositiveBound,

    #[error("range minimum {min} is not below maximum {max}")]
    Inverted { min: Decimal, max: Decimal },

    #[error("a range needs at least 2 steps, got {0}")]
    TooFewSteps(usize),

    /// The annualized maximum is above twelve times the largest monthly gross
    /// the calculator accepts.
    #[error("range maximum {max} is too large")]
    TooLarge { max: Decimal },

    /// The span cannot hold the requested number of distinct whole-won levels.
    #[error("range {min}..{max} is too narrow for {steps} distinct levels")]
    TooNarrow {
        min: Decimal,
        max: Decimal,
        steps: usize,
    },
}

/// A user-defined comparison range.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::SalaryBasis;
/// use salary_core::calculations::CustomRange;
///
/// let range = CustomRange {
///     min: dec!(2500000),
///     max: dec!(5000000),
///     steps: 6,
///     basis: SalaryBasis::Monthly,
/// };
///
/// let levels = range.levels().unwrap();
///
/// assert_eq!(levels.len(), 6);
/// assert_eq!(levels[0], dec!(30000000));
/// assert_eq!(levels[5], dec!(60000000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRange {
    pub min: Decimal,
    pub max: Decimal,
    pub steps: usize,
    /// Basis the bounds are quoted on; monthly bounds are annualized.
    pub basis: SalaryBasis,
}

impl CustomRange {
    /// Interpolates `steps` annual levels from the annualized minimum to the
    /// annualized maximum, each rounded to the nearest won.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when a bound is not positive, the minimum is
    /// not below the maximum, fewer than two steps are requested, the maximum
    /// is beyond what the calculator accepts, or the span
    /// is too narrow to give strictly increasing whole-won levels.
    pub fn levels(&self) -> Result<Vec<Decimal>, RangeError> {
        if self.min <= Decimal::ZERO || self.max <= Decimal::ZERO {
            return Err(RangeError::NonPositiveBound);
        }
        if self.min >= self.max {
            return Err(RangeError::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        if self.steps < 2 {
            return Err(RangeError::TooFewSteps(self.steps));
        }

        let min_annual = self.basis.annualize(self.min);
        let max_annual = self.basis.annualize(self.max);
        if max_annual > MAX_MONTHLY_GROSS * Decimal::from(12) {
            return Err(RangeError::TooLarge { max: max_annual });
        }
        let intervals = Decimal::from(self.steps - 1);
        if max_annual - min_annual < intervals {
            return Err(RangeError::TooNarrow {
                min: min_annual,
                max: max_annual,
                steps: self.steps,
            });
        }

        let step = (max_annual - min_annual) / intervals;
        let mut levels: Vec<Decimal> = (0..self.steps)
            .map(|i| round_won(min_annual + step * Decimal::from(i)))
            .collect();
        // The last level is pinned to the bound so division rounding cannot
        // shift it.
        if let Some(last) = levels.last_mut() {
            *last = round_won(max_annual);
        }
        Ok(levels)
    }
}

/// Returns the fixed list of representative annual salaries.
pub fn default_annual_levels() -> Vec<Decimal> {
    DEFAULT_ANNUAL_LEVELS.iter().copied().map(Decimal::from).collect()
}

/// Annual levels for a comparison table: the custom range when one is given
/// and valid, otherwise the default levels.
pub fn comparison_levels(custom: Option<&CustomRange>) -> Vec<Decimal> {
    let Some(range) = custom else {
        return default_annual_levels();
    };

    match range.levels() {
        Ok(levels) => {
            debug!(count = levels.len(), "using custom comparison range");
            levels
        }
        Err(error) => {
            warn!(%error, "custom range rejected, using default levels");
            default_annual_levels()
        }
    }
}

/// Monthly gross pay used for an annual salary level.
pub fn monthly_gross_for(annual: Decimal) -> Decimal {
    round_won(annual / Decimal::from(12))
}
