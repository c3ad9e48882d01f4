use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::max;
use crate::config::{TableError, check_tiers};

/// Statutory income tax bracket. Tax on a taxable income inside the bracket
/// is `income * rate - deduction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
    /// Cumulative progressive deduction.
    pub deduction: Decimal,
}

impl TaxBracket {
    /// Returns true when `taxable_income` does not exceed the upper bound.
    pub fn covers(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        self.max.is_none_or(|max| taxable_income <= max)
    }

    /// The marginal rate as a whole percentage, e.g. `15` for `0.15`.
    pub fn rate_percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).normalize()
    }

    /// Annual liability for `taxable_income` under this bracket's formula.
    pub fn tax_on(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        max(taxable_income * self.rate - self.deduction, Decimal::ZERO)
    }
}

/// Ascending, non-empty list of [`TaxBracket`]s whose top bracket is
/// unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The unbounded top bracket.
    pub fn top(&self) -> &TaxBracket {
        &self.brackets[self.brackets.len() - 1]
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxBracketTable {
    type Error = TableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        check_tiers(
            "tax bracket",
            brackets.iter().map(|b| (b.min, b.max, b.rate)),
        )?;
        if let Some(bracket) = brackets.iter().find(|b| b.deduction < Decimal::ZERO) {
            return Err(TableError::NegativeAmount {
                field: "tax bracket deduction",
                amount: bracket.deduction,
            });
        }
        Ok(Self { brackets })
    }
}

impl From<TaxBracketTable> for Vec<TaxBracket> {
    fn from(table: TaxBracketTable) -> Self {
        table.brackets
    }
}
