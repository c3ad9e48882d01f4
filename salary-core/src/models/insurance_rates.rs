use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee-side social insurance rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRates {
    pub national_pension: Decimal,
    pub health_insurance: Decimal,
    /// Fraction of the health insurance premium, not of gross pay.
    pub long_term_care: Decimal,
    pub employment_insurance: Decimal,
}
