//! Classifies a taxable income into its statutory tax bracket.

use rust_decimal::Decimal;

use crate::{TaxBracket, TaxBracketTable};

impl TaxBracketTable {
    /// Returns the first bracket, in ascending order, whose upper bound is at
    /// least `taxable_income`. Incomes beyond every finite bound land in the
    /// unbounded top bracket, so a bracket is always returned.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::default_rates;
    ///
    /// let brackets = &default_rates().tax_brackets;
    ///
    /// assert_eq!(brackets.classify(dec!(14000000)).rate, dec!(0.06));
    /// assert_eq!(brackets.classify(dec!(14000001)).rate, dec!(0.15));
    /// ```
    pub fn classify(
        &self,
        taxable_income: Decimal,
    ) -> &TaxBracket {
        self.brackets()
            .iter()
            .find(|bracket| bracket.covers(taxable_income))
            .unwrap_or_else(|| self.top())
    }
}
