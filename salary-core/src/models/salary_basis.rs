use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a salary figure is quoted per month or per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryBasis {
    #[default]
    Annual,
    Monthly,
}

impl SalaryBasis {
    /// Converts an amount on this basis to an annual figure, saturating at
    /// [`Decimal::MAX`].
    pub fn annualize(
        self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Annual => amount,
            Self::Monthly => amount.saturating_mul(Decimal::from(12)),
        }
    }
}
