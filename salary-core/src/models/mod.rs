mod income_tax_params;
mod insurance_rates;
mod pension_limits;
mod rate_table;
mod salary_basis;
mod salary_result;
mod schedule;
mod tax_bracket;

pub use income_tax_params::IncomeTaxParams;
pub use insurance_rates::InsuranceRates;
pub use pension_limits::PensionLimits;
pub use rate_table::RateTable;
pub use salary_basis::SalaryBasis;
pub use salary_result::{DeductionShares, SalaryResult};
pub use schedule::{Schedule, ScheduleTier};
pub use tax_bracket::{TaxBracket, TaxBracketTable};
