//! Rate table configuration.
//!
//! The 2026 rates ship embedded in the binary as a TOML document
//! (`rates/2026.toml`) and are parsed once on first use. A replacement table
//! with the same schema can be loaded from disk with [`RateTable::from_file`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::default_rates;
//!
//! let rates = default_rates();
//!
//! assert_eq!(rates.year, 2026);
//! assert_eq!(rates.insurance.national_pension, dec!(0.0475));
//! assert_eq!(rates.pension_limits.max, dec!(6370000));
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::RateTable;

const EMBEDDED_RATES: &str = include_str!("../rates/2026.toml");

static DEFAULT_RATES: OnceLock<RateTable> = OnceLock::new();

/// Structural problems in a rate table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("{table} table is empty")]
    Empty { table: &'static str },

    /// A tier does not start where the previous one ended.
    #[error("{table} tier {index} does not start at the previous tier's upper bound")]
    NotContiguous { table: &'static str, index: usize },

    #[error("{table} tier {index} has an upper bound not above its lower bound")]
    InvertedTier { table: &'static str, index: usize },

    /// Only the top tier may omit its upper bound.
    #[error("{table} tier {index} is unbounded but is not the top tier")]
    UnboundedTier { table: &'static str, index: usize },

    #[error("top {table} tier must be unbounded")]
    BoundedTop { table: &'static str },

    #[error("{field} must be between 0 and 1, got {rate}")]
    RateOutOfRange { field: &'static str, rate: Decimal },

    #[error("{field} must be non-negative, got {amount}")]
    NegativeAmount { field: &'static str, amount: Decimal },

    #[error("pension limits are inverted: min {min} exceeds max {max}")]
    InvertedPensionLimits { min: Decimal, max: Decimal },
}

/// Errors raised while loading a rate table.
#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("cannot read rate table '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rate table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] TableError),
}

/// Returns the embedded 2026 rate table, parsing it on first call.
///
/// # Panics
///
/// Panics if the embedded TOML document is malformed. It is covered by the
/// crate's tests, so this cannot happen in a released build.
pub fn default_rates() -> &'static RateTable {
    DEFAULT_RATES.get_or_init(|| {
        RateTable::from_toml_str(EMBEDDED_RATES).expect("embedded rate table is valid")
    })
}

impl RateTable {
    /// Parses and validates a rate table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError::Parse`] for malformed TOML or tier lists that
    /// are not contiguous, and [`RateTableError::Invalid`] when a rate or
    /// limit is out of range.
    pub fn from_toml_str(input: &str) -> Result<Self, RateTableError> {
        let table: Self = toml::from_str(input)?;
        table.validate()?;
        debug!(year = table.year, "rate table loaded");
        Ok(table)
    }

    /// Reads a rate table from `path`; see [`RateTable::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError::Read`] when the file cannot be read, or any
    /// error from [`RateTable::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self, RateTableError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RateTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validates rates and limits that the tier lists do not check
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found.
    pub fn validate(&self) -> Result<(), TableError> {
        check_rate("national pension rate", self.insurance.national_pension)?;
        check_rate("health insurance rate", self.insurance.health_insurance)?;
        check_rate("long-term care rate", self.insurance.long_term_care)?;
        check_rate("employment insurance rate", self.insurance.employment_insurance)?;
        check_rate("local tax rate", self.income_tax.local_tax_rate)?;

        check_amount("pension minimum", self.pension_limits.min)?;
        if self.pension_limits.min > self.pension_limits.max {
            return Err(TableError::InvertedPensionLimits {
                min: self.pension_limits.min,
                max: self.pension_limits.max,
            });
        }
        check_amount(
            "basic deduction per dependent",
            self.income_tax.basic_deduction_per_dependent,
        )?;
        check_amount("standard tax credit", self.income_tax.standard_tax_credit)?;
        Ok(())
    }
}

fn check_rate(
    field: &'static str,
    rate: Decimal,
) -> Result<(), TableError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(TableError::RateOutOfRange { field, rate });
    }
    Ok(())
}

fn check_amount(
    field: &'static str,
    amount: Decimal,
) -> Result<(), TableError> {
    if amount < Decimal::ZERO {
        return Err(TableError::NegativeAmount { field, amount });
    }
    Ok(())
}

/// Checks a list of `(min, max, rate)` tiers: non-empty, contiguous,
/// ascending, rates within `[0, 1]`, only the top tier unbounded.
pub(crate) fn check_tiers(
    table: &'static str,
    tiers: impl ExactSizeIterator<Item = (Decimal, Option<Decimal>, Decimal)>,
) -> Result<(), TableError> {
    let count = tiers.len();
    if count == 0 {
        return Err(TableError::Empty { table });
    }

    let mut previous_max: Option<Decimal> = None;
    for (index, (min, max, rate)) in tiers.enumerate() {
        check_rate(table, rate)?;
        if previous_max.is_some_and(|previous| previous != min) {
            return Err(TableError::NotContiguous { table, index });
        }

        let is_top = index + 1 == count;
        match max {
            Some(_) if is_top => return Err(TableError::BoundedTop { table }),
            Some(upper) if upper <= min => {
                return Err(TableError::InvertedTier { table, index });
            }
            Some(upper) => previous_max = Some(upper),
            None if !is_top => return Err(TableError::UnboundedTier { table, index }),
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_RATES: &str = r#"
year = 2026

[insurance]
national_pension = "0.0475"
health_insurance = "0.03595"
long_term_care = "0.1314"
employment_insurance = "0.009"

[pension_limits]
min = 400000
max = 6370000

[income_tax]
basic_deduction_per_dependent = 1500000
standard_tax_credit = 130000
local_tax_rate = "0.1"

[[earned_income_deduction]]
min = 0
base = 0
rate = "0.7"

[[withholding]]
min = 0
base = 0
rate = "0.06"

[[tax_brackets]]
min = 0
rate = "0.06"
deduction = 0
"#;

    // =========================================================================
    // embedded table
    // =========================================================================

    #[test]
    fn embedded_table_parses() {
        let table = RateTable::from_toml_str(EMBEDDED_RATES).unwrap();

        assert_eq!(table.year, 2026);
        assert_eq!(table.earned_income_deduction.tiers().len(), 5);
        assert_eq!(table.withholding.tiers().len(), 8);
        assert_eq!(table.tax_brackets.brackets().len(), 8);
    }

    #[test]
    fn embedded_table_carries_2026_rates() {
        let rates = default_rates();

        assert_eq!(rates.insurance.health_insurance, dec!(0.03595));
        assert_eq!(rates.insurance.long_term_care, dec!(0.1314));
        assert_eq!(rates.insurance.employment_insurance, dec!(0.009));
        assert_eq!(rates.pension_limits.min, dec!(400000));
        assert_eq!(rates.income_tax.standard_tax_credit, dec!(130000));
        assert_eq!(rates.tax_brackets.top().rate, dec!(0.45));
        assert_eq!(rates.tax_brackets.top().max, None);
    }

    // =========================================================================
    // parsing and validation
    // =========================================================================

    #[test]
    fn minimal_single_tier_table_is_accepted() {
        let table = RateTable::from_toml_str(MINIMAL_RATES).unwrap();

        assert_eq!(table.withholding.evaluate(dec!(100)), dec!(6));
    }

    #[test]
    fn rejects_rate_above_one() {
        let input = MINIMAL_RATES.replace("\"0.0475\"", "\"4.75\"");

        let result = RateTable::from_toml_str(&input);

        assert!(matches!(
            result,
            Err(RateTableError::Invalid(TableError::RateOutOfRange {
                field: "national pension rate",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_inverted_pension_limits() {
        let input = MINIMAL_RATES.replace("max = 6370000", "max = 300000");

        let result = RateTable::from_toml_str(&input);

        assert!(matches!(
            result,
            Err(RateTableError::Invalid(TableError::InvertedPensionLimits { .. }))
        ));
    }

    #[test]
    fn rejects_bounded_top_tier_during_parse() {
        let input = MINIMAL_RATES.replace(
            "[[withholding]]\nmin = 0\n",
            "[[withholding]]\nmin = 0\nmax = 1000\n",
        );

        let result = RateTable::from_toml_str(&input);

        assert!(matches!(result, Err(RateTableError::Parse(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = RateTable::from_toml_str("year = ");

        assert!(matches!(result, Err(RateTableError::Parse(_))));
    }

    #[test]
    fn reading_missing_file_reports_path() {
        let path = Path::new("/this/path/does/not/exist.toml");

        let error = RateTable::from_file(path).unwrap_err();

        assert!(error.to_string().contains("/this/path/does/not/exist.toml"));
    }

    // =========================================================================
    // check_tiers
    // =========================================================================

    #[test]
    fn check_tiers_rejects_unbounded_middle_tier() {
        let tiers = vec![
            (dec!(0), None, dec!(0.1)),
            (dec!(1000), None, dec!(0.2)),
        ];

        let result = check_tiers("test", tiers.into_iter());

        assert_eq!(
            result,
            Err(TableError::UnboundedTier {
                table: "test",
                index: 0
            })
        );
    }

    #[test]
    fn check_tiers_rejects_inverted_tier() {
        let tiers = vec![
            (dec!(1000), Some(dec!(500)), dec!(0.1)),
            (dec!(500), None, dec!(0.2)),
        ];

        let result = check_tiers("test", tiers.into_iter());

        assert_eq!(
            result,
            Err(TableError::InvertedTier {
                table: "test",
                index: 0
            })
        );
    }

    #[test]
    fn check_tiers_rejects_negative_rate() {
        let tiers = vec![(dec!(0), None, dec!(-0.1))];

        let result = check_tiers("test", tiers.into_iter());

        assert_eq!(
            result,
            Err(TableError::RateOutOfRange {
                field: "test",
                rate: dec!(-0.1)
            })
        );
    }
}
