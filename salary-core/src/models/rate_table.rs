use serde::{Deserialize, Serialize};

use crate::{IncomeTaxParams, InsuranceRates, PensionLimits, Schedule, TaxBracketTable};

/// Every rate and table needed for one year's payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub year: i32,
    pub insurance: InsuranceRates,
    pub pension_limits: PensionLimits,
    pub income_tax: IncomeTaxParams,
    pub earned_income_deduction: Schedule,
    pub withholding: Schedule,
    pub tax_brackets: TaxBracketTable,
}
