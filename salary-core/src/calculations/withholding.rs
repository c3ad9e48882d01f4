//! Monthly withholding income tax.
//!
//! A simplified annualized computation in the spirit of the simplified
//! withholding table:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annual gross = monthly gross × 12 |
//! | 2    | Earned-income deduction from the tiered schedule |
//! | 3    | Basic deduction = per-dependent amount × dependents |
//! | 4    | Taxable income = (1) − (2) − (3), minimum 0 |
//! | 5    | Annual tax from the withholding schedule |
//! | 6    | Annual tax after the standard tax credit, minimum 0 |
//! | 7    | Monthly income tax = (6) ÷ 12, rounded down to 10 won |
//! | 8    | Local income tax = (7) × local rate, rounded down to the won |
//!
//! The withholding schedule is kept separate from the statutory bracket
//! table even though both describe the same progressive rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::RateTable;
use crate::calculations::common::{floor_to_ten, floor_won, max};

/// Intermediate and final values of the withholding computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBreakdown {
    pub annual_gross: Decimal,
    pub earned_income_deduction: Decimal,
    pub basic_deduction: Decimal,
    pub taxable_income: Decimal,
    /// Annual tax after the standard tax credit.
    pub annual_tax: Decimal,
    pub monthly_income_tax: Decimal,
    pub local_tax: Decimal,
}

/// Withholding tax calculator bound to a rate table.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::WithholdingTax;
/// use salary_core::default_rates;
///
/// let withholding = WithholdingTax::new(default_rates());
/// let breakdown = withholding.calculate(dec!(3000000), 1);
///
/// assert_eq!(breakdown.taxable_income, dec!(23850000));
/// assert_eq!(breakdown.monthly_income_tax, dec!(182290));
/// assert_eq!(breakdown.local_tax, dec!(18229));
/// ```
#[derive(Debug, Clone)]
pub struct WithholdingTax<'a> {
    rates: &'a RateTable,
}

impl<'a> WithholdingTax<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Runs every step for one monthly gross amount and dependent count.
    pub fn calculate(
        &self,
        monthly_gross: Decimal,
        dependents: u32,
    ) -> WithholdingBreakdown {
        let annual_gross = monthly_gross.saturating_mul(Decimal::from(12));
        let earned_income_deduction = self.earned_income_deduction(annual_gross);
        let basic_deduction = self.basic_deduction(dependents);
        let taxable_income =
            self.taxable_income(annual_gross, earned_income_deduction, basic_deduction);
        let annual_tax = self.tax_after_credit(self.annual_tax(taxable_income));
        let monthly_income_tax = self.monthly_income_tax(annual_tax);
        let local_tax = self.local_tax(monthly_income_tax);

        debug!(
            %annual_gross,
            %earned_income_deduction,
            %taxable_income,
            %annual_tax,
            %monthly_income_tax,
            "withholding computed"
        );

        WithholdingBreakdown {
            annual_gross,
            earned_income_deduction,
            basic_deduction,
            taxable_income,
            annual_tax,
            monthly_income_tax,
            local_tax,
        }
    }

    fn earned_income_deduction(
        &self,
        annual_gross: Decimal,
    ) -> Decimal {
        self.rates.earned_income_deduction.evaluate(annual_gross)
    }

    fn basic_deduction(
        &self,
        dependents: u32,
    ) -> Decimal {
        self.rates.income_tax.basic_deduction_per_dependent * Decimal::from(dependents)
    }

    fn taxable_income(
        &self,
        annual_gross: Decimal,
        earned_income_deduction: Decimal,
        basic_deduction: Decimal,
    ) -> Decimal {
        max(
            annual_gross - earned_income_deduction - basic_deduction,
            Decimal::ZERO,
        )
    }

    fn annual_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.rates.withholding.evaluate(taxable_income)
    }

    fn tax_after_credit(
        &self,
        annual_tax: Decimal,
    ) -> Decimal {
        max(
            annual_tax - self.rates.income_tax.standard_tax_credit,
            Decimal::ZERO,
        )
    }

    fn monthly_income_tax(
        &self,
        annual_tax: Decimal,
    ) -> Decimal {
        floor_to_ten(annual_tax / Decimal::from(12))
    }

    fn local_tax(
        &self,
        monthly_income_tax: Decimal,
    ) -> Decimal {
        floor_won(monthly_income_tax * self.rates.income_tax.local_tax_rate)
    }
}
