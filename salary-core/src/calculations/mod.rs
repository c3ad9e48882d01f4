//! Payroll deduction and income tax calculations.
//!
//! The [`PayrollCalculator`] is the main entry point; the other modules hold
//! the individual steps it combines and the comparison range generator that
//! feeds salary tables.

pub mod bracket_classifier;
pub mod common;
pub mod payroll;
pub mod range;
pub mod withholding;

pub use payroll::{DEFAULT_DEPENDENTS, MAX_MONTHLY_GROSS, PayrollCalculator, PayrollInput};
pub use range::{CustomRange, RangeError, comparison_levels, default_annual_levels, monthly_gross_for};
pub use withholding::{WithholdingBreakdown, WithholdingTax};
