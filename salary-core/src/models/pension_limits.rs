use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lower and upper bounds of the monthly income base used for the national
/// pension contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionLimits {
    pub min: Decimal,
    pub max: Decimal,
}

impl PensionLimits {
    /// Clamps a monthly gross amount into `[min, max]`.
    pub fn contribution_base(
        &self,
        monthly_gross: Decimal,
    ) -> Decimal {
        monthly_gross.max(self.min).min(self.max)
    }
}
