//! UI state for the salary calculator.
//!
//! Every view is derived from an [`AppState`]; changing any field and
//! re-rendering recomputes the single-salary result and the comparison table.

use clap::ValueEnum;
use rust_decimal::Decimal;
use salary_core::calculations::{
    CustomRange, PayrollCalculator, PayrollInput, comparison_levels, monthly_gross_for,
};
use salary_core::{RateTable, SalaryBasis, SalaryResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{format_input, parse_amount};

/// Dependent counts offered by the selector.
pub const DEPENDENT_OPTIONS: std::ops::RangeInclusive<u32> = 1..=8;

/// Step counts offered for a custom comparison range.
pub const RANGE_STEP_OPTIONS: [usize; 6] = [5, 8, 10, 12, 15, 20];

pub const DEFAULT_RANGE_STEPS: usize = 10;

/// Which table the calculator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Net pay by annual salary.
    #[default]
    Annual,
    /// Net pay by monthly salary.
    Monthly,
    /// Tax brackets with taxable income and applied rate by annual salary.
    Tax,
}

impl ViewMode {
    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Annual, ViewMode::Monthly, ViewMode::Tax]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Annual => "Annual salary",
            ViewMode::Monthly => "Monthly salary",
            ViewMode::Tax => "Tax brackets",
        }
    }

    /// Basis that salary input is entered on in this mode.
    pub fn input_basis(&self) -> SalaryBasis {
        match self {
            ViewMode::Monthly => SalaryBasis::Monthly,
            ViewMode::Annual | ViewMode::Tax => SalaryBasis::Annual,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "annual" | "a" => Some(Self::Annual),
            "monthly" | "m" => Some(Self::Monthly),
            "tax" | "t" => Some(Self::Tax),
            _ => None,
        }
    }
}

/// Rejected state changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("dependents must be between 1 and 8, got {0}")]
    DependentsOutOfRange(u32),

    #[error("range steps must be one of 5, 8, 10, 12, 15 or 20, got {0}")]
    UnsupportedSteps(usize),
}

/// The calculator's complete input state.
///
/// Amount fields hold the text as displayed, already reformatted with
/// thousands separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: ViewMode,
    pub salary_input: String,
    pub dependents: u32,
    /// Show each deduction as its own table column.
    pub show_details: bool,
    pub use_custom_range: bool,
    pub range_min: String,
    pub range_max: String,
    pub range_steps: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            salary_input: String::new(),
            dependents: 1,
            show_details: false,
            use_custom_range: false,
            range_min: String::new(),
            range_max: String::new(),
            range_steps: DEFAULT_RANGE_STEPS,
        }
    }
}

impl AppState {
    pub fn set_salary_input(
        &mut self,
        raw: &str,
    ) {
        self.salary_input = format_input(raw);
    }

    pub fn set_range_min(
        &mut self,
        raw: &str,
    ) {
        self.range_min = format_input(raw);
    }

    pub fn set_range_max(
        &mut self,
        raw: &str,
    ) {
        self.range_max = format_input(raw);
    }

    /// # Errors
    ///
    /// Returns [`StateError::DependentsOutOfRange`] outside 1–8.
    pub fn set_dependents(
        &mut self,
        dependents: u32,
    ) -> Result<(), StateError> {
        if !DEPENDENT_OPTIONS.contains(&dependents) {
            return Err(StateError::DependentsOutOfRange(dependents));
        }
        self.dependents = dependents;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StateError::UnsupportedSteps`] for counts the selector does
    /// not offer.
    pub fn set_range_steps(
        &mut self,
        steps: usize,
    ) -> Result<(), StateError> {
        if !RANGE_STEP_OPTIONS.contains(&steps) {
            return Err(StateError::UnsupportedSteps(steps));
        }
        self.range_steps = steps;
        Ok(())
    }

    /// Clears the custom range bounds and restores the default step count.
    pub fn reset_range(&mut self) {
        self.range_min.clear();
        self.range_max.clear();
        self.range_steps = DEFAULT_RANGE_STEPS;
    }

    /// The custom range, when custom-range mode is on.
    pub fn custom_range(&self) -> Option<CustomRange> {
        self.use_custom_range.then(|| CustomRange {
            min: parse_amount(&self.range_min),
            max: parse_amount(&self.range_max),
            steps: self.range_steps,
            basis: self.mode.input_basis(),
        })
    }

    /// Annual salary levels of the comparison table.
    pub fn annual_levels(&self) -> Vec<Decimal> {
        comparison_levels(self.custom_range().as_ref())
    }

    /// One calculated row per comparison level.
    pub fn table_rows(
        &self,
        rates: &RateTable,
    ) -> Vec<SalaryResult> {
        let calculator = PayrollCalculator::new(rates);
        self.annual_levels()
            .into_iter()
            .map(|annual| {
                let input =
                    PayrollInput::new(monthly_gross_for(annual)).with_dependents(self.dependents);
                calculator.calculate(&input)
            })
            .collect()
    }

    /// Monthly gross pay for the salary input, or `None` when the input is
    /// empty or not positive.
    pub fn input_monthly_gross(&self) -> Option<Decimal> {
        let amount = parse_amount(&self.salary_input);
        if amount <= Decimal::ZERO {
            return None;
        }
        Some(match self.mode.input_basis() {
            SalaryBasis::Annual => monthly_gross_for(amount),
            SalaryBasis::Monthly => amount,
        })
    }

    /// Result for the salary input, if there is one to show.
    pub fn single_result(
        &self,
        rates: &RateTable,
    ) -> Option<SalaryResult> {
        let monthly_gross = self.input_monthly_gross()?;
        let input = PayrollInput::new(monthly_gross).with_dependents(self.dependents);
        Some(PayrollCalculator::new(rates).calculate(&input))
    }
}
