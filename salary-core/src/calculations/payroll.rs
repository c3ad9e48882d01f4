//! Payroll deductions and net pay.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Pension base = monthly gross clamped to the pension limits |
//! | 2    | National pension = base × pension rate, rounded down to 10 won |
//! | 3    | Health insurance = gross × health rate, rounded down to 10 won |
//! | 4    | Long-term care = health insurance × care rate, rounded down to 10 won |
//! | 5    | Employment insurance = gross × employment rate, rounded down to 10 won |
//! | 6    | Income tax and local income tax (see [`crate::calculations::withholding`]) |
//! | 7    | Total deduction = steps 2–6; net pay = gross − total deduction |
//! | 8    | Each amount as a percentage of gross |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::calculations::{PayrollCalculator, PayrollInput};
//! use salary_core::default_rates;
//!
//! let calculator = PayrollCalculator::new(default_rates());
//! let result = calculator.calculate(&PayrollInput::new(dec!(3000000)));
//!
//! assert_eq!(result.national_pension, dec!(142500));
//! assert_eq!(result.health_insurance, dec!(107850));
//! assert_eq!(result.long_term_care, dec!(14170));
//! assert_eq!(result.employment_insurance, dec!(27000));
//! assert_eq!(result.net_monthly, dec!(2507961));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{floor_to_ten, percent_of};
use crate::calculations::withholding::WithholdingTax;
use crate::{DeductionShares, RateTable, SalaryResult};

/// Largest monthly gross the calculator works with; larger amounts are
/// capped (1,000조 won).
pub const MAX_MONTHLY_GROSS: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Dependent count used when none is given. The earner counts as one.
pub const DEFAULT_DEPENDENTS: u32 = 1;

/// Inputs to a payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Monthly gross pay in won.
    pub monthly_gross: Decimal,
    /// Number of dependents including the earner.
    pub dependents: u32,
}

impl PayrollInput {
    /// Input for `monthly_gross` with the default dependent count.
    pub fn new(monthly_gross: Decimal) -> Self {
        Self {
            monthly_gross,
            dependents: DEFAULT_DEPENDENTS,
        }
    }

    pub fn with_dependents(
        mut self,
        dependents: u32,
    ) -> Self {
        self.dependents = dependents;
        self
    }
}

impl Default for PayrollInput {
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}

/// Payroll deduction calculator bound to a rate table.
///
/// Calculation cannot fail: the rate table is validated when it is loaded,
/// and out-of-range inputs are clamped.
#[derive(Debug, Clone)]
pub struct PayrollCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Calculates every deduction, net pay and percentage share for one
    /// monthly gross amount.
    ///
    /// A negative gross is treated as zero, a gross above
    /// [`MAX_MONTHLY_GROSS`] is capped, and a dependent count of zero is
    /// raised to one.
    pub fn calculate(
        &self,
        input: &PayrollInput,
    ) -> SalaryResult {
        let gross = self.sanitize_gross(input.monthly_gross);
        let dependents = self.sanitize_dependents(input.dependents);

        let national_pension = self.national_pension(gross);
        let health_insurance = self.health_insurance(gross);
        let long_term_care = self.long_term_care(health_insurance);
        let employment_insurance = self.employment_insurance(gross);
        let total_insurance =
            national_pension + health_insurance + long_term_care + employment_insurance;

        let withholding = WithholdingTax::new(self.rates).calculate(gross, dependents);
        let income_tax = withholding.monthly_income_tax;
        let local_tax = withholding.local_tax;

        let total_deduction = total_insurance + income_tax + local_tax;
        let net_monthly = gross - total_deduction;

        let tax_bracket = self
            .rates
            .tax_brackets
            .classify(withholding.taxable_income)
            .clone();

        debug!(
            %gross,
            dependents,
            %total_deduction,
            %net_monthly,
            "payroll calculated"
        );

        let shares = DeductionShares {
            net: percent_of(net_monthly, gross),
            total_deduction: percent_of(total_deduction, gross),
            national_pension: percent_of(national_pension, gross),
            health_insurance: percent_of(health_insurance, gross),
            long_term_care: percent_of(long_term_care, gross),
            employment_insurance: percent_of(employment_insurance, gross),
            income_tax: percent_of(income_tax, gross),
            local_tax: percent_of(local_tax, gross),
        };

        let months = Decimal::from(12);
        SalaryResult {
            gross_monthly: gross,
            gross_annual: gross * months,
            national_pension,
            health_insurance,
            long_term_care,
            employment_insurance,
            total_insurance,
            income_tax,
            local_tax,
            total_deduction,
            net_monthly,
            net_annual: net_monthly * months,
            taxable_income: withholding.taxable_income,
            tax_bracket,
            shares,
        }
    }

    fn sanitize_gross(
        &self,
        monthly_gross: Decimal,
    ) -> Decimal {
        if monthly_gross < Decimal::ZERO {
            warn!(%monthly_gross, "negative gross pay treated as zero");
            return Decimal::ZERO;
        }
        if monthly_gross > MAX_MONTHLY_GROSS {
            warn!(%monthly_gross, "gross pay capped at {MAX_MONTHLY_GROSS}");
            return MAX_MONTHLY_GROSS;
        }
        monthly_gross
    }

    fn sanitize_dependents(
        &self,
        dependents: u32,
    ) -> u32 {
        if dependents == 0 {
            warn!("dependent count of zero raised to {DEFAULT_DEPENDENTS}");
            return DEFAULT_DEPENDENTS;
        }
        dependents
    }

    /// Pension on the contribution base clamped to the pension limits.
    fn national_pension(
        &self,
        gross: Decimal,
    ) -> Decimal {
        let base = self.rates.pension_limits.contribution_base(gross);
        floor_to_ten(base * self.rates.insurance.national_pension)
    }

    fn health_insurance(
        &self,
        gross: Decimal,
    ) -> Decimal {
        floor_to_ten(gross * self.rates.insurance.health_insurance)
    }

    /// Long-term care is levied on the health insurance premium.
    fn long_term_care(
        &self,
        health_insurance: Decimal,
    ) -> Decimal {
        floor_to_ten(health_insurance * self.rates.insurance.long_term_care)
    }

    fn employment_insurance(
        &self,
        gross: Decimal,
    ) -> Decimal {
        floor_to_ten(gross * self.rates.insurance.employment_insurance)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::default_rates;

    fn calculator() -> PayrollCalculator<'static> {
        PayrollCalculator::new(default_rates())
    }

    fn deduction_sum(result: &SalaryResult) -> Decimal {
        result.national_pension
            + result.health_insurance
            + result.long_term_care
            + result.employment_insurance
            + result.income_tax
            + result.local_tax
    }

    // =========================================================================
    // pension tests
    // =========================================================================

    #[test]
    fn pension_within_limits_uses_gross() {
        assert_eq!(calculator().national_pension(dec!(3000000)), dec!(142500));
    }

    #[test]
    fn pension_below_minimum_uses_minimum_base() {
        // 400,000 × 4.75%
        assert_eq!(calculator().national_pension(dec!(100000)), dec!(19000));
        assert_eq!(calculator().national_pension(Decimal::ZERO), dec!(19000));
    }

    #[test]
    fn pension_above_maximum_uses_maximum_base() {
        // 6,370,000 × 4.75% = 302,575 → 302,570
        assert_eq!(calculator().national_pension(dec!(6370000)), dec!(302570));
        assert_eq!(calculator().national_pension(dec!(50000000)), dec!(302570));
    }

    // =========================================================================
    // insurance tests
    // =========================================================================

    #[test]
    fn health_insurance_rounds_down_to_ten() {
        // 3,000,000 × 3.595% = 107,850
        assert_eq!(calculator().health_insurance(dec!(3000000)), dec!(107850));
        // 4,166,667 × 3.595% = 149,791.68…
        assert_eq!(calculator().health_insurance(dec!(4166667)), dec!(149790));
    }

    #[test]
    fn long_term_care_is_levied_on_health_premium() {
        // 107,850 × 13.14% = 14,171.49
        assert_eq!(calculator().long_term_care(dec!(107850)), dec!(14170));
    }

    #[test]
    fn employment_insurance_rounds_down_to_ten() {
        assert_eq!(calculator().employment_insurance(dec!(3000000)), dec!(27000));
        // 4,166,667 × 0.9% = 37,500.003
        assert_eq!(
            calculator().employment_insurance(dec!(4166667)),
            dec!(37500)
        );
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_three_million_one_dependent() {
        let result = calculator().calculate(&PayrollInput::new(dec!(3000000)));

        assert_eq!(result.gross_monthly, dec!(3000000));
        assert_eq!(result.gross_annual, dec!(36000000));
        assert_eq!(result.national_pension, dec!(142500));
        assert_eq!(result.health_insurance, dec!(107850));
        assert_eq!(result.long_term_care, dec!(14170));
        assert_eq!(result.employment_insurance, dec!(27000));
        assert_eq!(result.total_insurance, dec!(291520));
        assert_eq!(result.income_tax, dec!(182290));
        assert_eq!(result.local_tax, dec!(18229));
        assert_eq!(result.total_deduction, dec!(492039));
        assert_eq!(result.net_monthly, dec!(2507961));
        assert_eq!(result.net_annual, dec!(30095532));
        assert_eq!(result.taxable_income, dec!(23850000));
        assert_eq!(result.tax_bracket.rate, dec!(0.15));
    }

    #[test]
    fn calculate_percentages_have_two_decimals() {
        let result = calculator().calculate(&PayrollInput::new(dec!(3000000)));

        assert_eq!(result.shares.national_pension.to_string(), "4.75");
        assert_eq!(result.shares.health_insurance.to_string(), "3.60");
        assert_eq!(result.shares.employment_insurance.to_string(), "0.90");
        assert_eq!(result.shares.long_term_care.to_string(), "0.47");
        assert_eq!(result.shares.income_tax.to_string(), "6.08");
        assert_eq!(result.shares.local_tax.to_string(), "0.61");
        assert_eq!(result.shares.total_deduction.to_string(), "16.40");
        assert_eq!(result.shares.net.to_string(), "83.60");
    }

    #[test]
    fn calculate_zero_gross_has_zero_percentages() {
        let result = calculator().calculate(&PayrollInput::new(Decimal::ZERO));

        assert_eq!(result.shares, DeductionShares::default());
        assert_eq!(result.shares.net.to_string(), "0");
        assert_eq!(result.income_tax, Decimal::ZERO);
    }

    #[test]
    fn calculate_negative_gross_is_treated_as_zero() {
        let negative = calculator().calculate(&PayrollInput::new(dec!(-500000)));
        let zero = calculator().calculate(&PayrollInput::new(Decimal::ZERO));

        assert_eq!(negative, zero);
    }

    #[test]
    fn calculate_huge_gross_is_capped() {
        let huge = calculator().calculate(&PayrollInput::new(dec!(9000000000000000000000000000)));
        let capped = calculator().calculate(&PayrollInput::new(MAX_MONTHLY_GROSS));

        assert_eq!(huge, capped);
        assert_eq!(huge.gross_annual, dec!(12000000000000000));
        assert_eq!(huge.net_monthly + huge.total_deduction, MAX_MONTHLY_GROSS);
    }

    #[test]
    fn calculate_zero_dependents_defaults_to_one() {
        let zero = calculator().calculate(&PayrollInput::new(dec!(5000000)).with_dependents(0));
        let one = calculator().calculate(&PayrollInput::new(dec!(5000000)));

        assert_eq!(zero, one);
    }

    #[test]
    fn calculate_net_equals_gross_minus_deductions() {
        let grosses = [
            dec!(0),
            dec!(1),
            dec!(399999),
            dec!(833333),
            dec!(2500000),
            dec!(4166667),
            dec!(6370001),
            dec!(12500000),
            dec!(41666667),
        ];

        for gross in grosses {
            for dependents in 1..=8 {
                let result = calculator()
                    .calculate(&PayrollInput::new(gross).with_dependents(dependents));

                assert_eq!(result.total_deduction, deduction_sum(&result));
                assert_eq!(result.net_monthly, gross - deduction_sum(&result));
                assert!(result.national_pension >= Decimal::ZERO);
                assert!(result.health_insurance >= Decimal::ZERO);
                assert!(result.long_term_care >= Decimal::ZERO);
                assert!(result.employment_insurance >= Decimal::ZERO);
                assert!(result.income_tax >= Decimal::ZERO);
                assert!(result.local_tax >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn calculate_long_term_care_always_follows_health_premium() {
        for gross in [dec!(1234567), dec!(2999999), dec!(7777777), dec!(15000000)] {
            let result = calculator().calculate(&PayrollInput::new(gross));

            assert_eq!(
                result.long_term_care,
                floor_to_ten(result.health_insurance * dec!(0.1314))
            );
        }
    }

    #[test]
    fn calculate_high_earner_lands_in_high_bracket() {
        let result = calculator().calculate(&PayrollInput::new(dec!(25000000)));

        // 300,000,000 annual - 18,750,000 - 1,500,000
        assert_eq!(result.taxable_income, dec!(279750000));
        assert_eq!(result.tax_bracket.rate, dec!(0.38));
        assert_eq!(result.national_pension, dec!(302570));
    }
}
