use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;

/// Each deduction expressed as a percentage of monthly gross pay.
///
/// Values carry two decimal places. When gross pay is zero every field is
/// a plain `0`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionShares {
    pub net: Decimal,
    pub total_deduction: Decimal,
    pub national_pension: Decimal,
    pub health_insurance: Decimal,
    pub long_term_care: Decimal,
    pub employment_insurance: Decimal,
    pub income_tax: Decimal,
    pub local_tax: Decimal,
}

/// Outcome of a payroll deduction calculation for one monthly gross amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub gross_monthly: Decimal,
    pub gross_annual: Decimal,

    // Social insurance premiums
    pub national_pension: Decimal,
    pub health_insurance: Decimal,
    pub long_term_care: Decimal,
    pub employment_insurance: Decimal,
    pub total_insurance: Decimal,

    // Taxes
    pub income_tax: Decimal,
    pub local_tax: Decimal,

    pub total_deduction: Decimal,
    pub net_monthly: Decimal,
    pub net_annual: Decimal,

    /// Annual taxable income after the earned-income and basic deductions.
    pub taxable_income: Decimal,
    /// Statutory bracket the taxable income falls into.
    pub tax_bracket: TaxBracket,

    pub shares: DeductionShares,
}
