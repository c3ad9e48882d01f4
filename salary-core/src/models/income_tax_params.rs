use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxParams {
    /// Annual basic deduction granted for each dependent, the earner included.
    pub basic_deduction_per_dependent: Decimal,
    /// Flat annual credit subtracted from the computed tax.
    pub standard_tax_credit: Decimal,
    /// Local income tax as a fraction of the income tax.
    pub local_tax_rate: Decimal,
}
