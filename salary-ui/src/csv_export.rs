//! CSV export of the comparison table.
//!
//! ## CSV Format
//!
//! One row per salary level, always with every deduction column regardless
//! of whether the detail columns are shown on screen. Amounts are whole won,
//! percentages are shares of monthly gross pay.
//!
//! | Column                 | Type    | Notes                               |
//! |------------------------|---------|-------------------------------------|
//! | `annual_gross`         | decimal | monthly gross × 12                  |
//! | `monthly_gross`        | decimal |                                     |
//! | `national_pension`     | decimal |                                     |
//! | `health_insurance`     | decimal |                                     |
//! | `long_term_care`       | decimal |                                     |
//! | `employment_insurance` | decimal |                                     |
//! | `income_tax`           | decimal | monthly withholding                 |
//! | `local_tax`            | decimal |                                     |
//! | `total_deduction`      | decimal |                                     |
//! | `net_monthly`          | decimal |                                     |
//! | `net_share`            | decimal | e.g. `83.60`                        |
//! | `deduction_share`      | decimal | e.g. `16.40`                        |
//! | `*_share`              | decimal | one per deduction, in column order  |
//! | `taxable_income`       | decimal | annual                              |
//! | `tax_rate`             | decimal | marginal rate in percent, e.g. `15` |
//!
//! ### Example
//!
//! ```csv
//! annual_gross,monthly_gross,national_pension,health_insurance,long_term_care,employment_insurance,income_tax,local_tax,total_deduction,net_monthly,net_share,deduction_share,national_pension_share,health_insurance_share,long_term_care_share,employment_insurance_share,income_tax_share,local_tax_share,taxable_income,tax_rate
//! 36000000,3000000,142500,107850,14170,27000,182290,18229,492039,2507961,83.60,16.40,4.75,3.60,0.47,0.90,6.08,0.61,23850000,15
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use salary_core::SalaryResult;
use serde::Serialize;
use tracing::info;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CsvRow {
    annual_gross: Decimal,
    monthly_gross: Decimal,
    national_pension: Decimal,
    health_insurance: Decimal,
    long_term_care: Decimal,
    employment_insurance: Decimal,
    income_tax: Decimal,
    local_tax: Decimal,
    total_deduction: Decimal,
    net_monthly: Decimal,
    net_share: Decimal,
    deduction_share: Decimal,
    national_pension_share: Decimal,
    health_insurance_share: Decimal,
    long_term_care_share: Decimal,
    employment_insurance_share: Decimal,
    income_tax_share: Decimal,
    local_tax_share: Decimal,
    taxable_income: Decimal,
    tax_rate: Decimal,
}

/// Amounts are written without trailing fraction zeros; shares keep their
/// two decimal places.
impl From<&SalaryResult> for CsvRow {
    fn from(result: &SalaryResult) -> Self {
        Self {
            annual_gross: result.gross_annual.normalize(),
            monthly_gross: result.gross_monthly.normalize(),
            national_pension: result.national_pension.normalize(),
            health_insurance: result.health_insurance.normalize(),
            long_term_care: result.long_term_care.normalize(),
            employment_insurance: result.employment_insurance.normalize(),
            income_tax: result.income_tax.normalize(),
            local_tax: result.local_tax.normalize(),
            total_deduction: result.total_deduction.normalize(),
            net_monthly: result.net_monthly.normalize(),
            net_share: result.shares.net,
            deduction_share: result.shares.total_deduction,
            national_pension_share: result.shares.national_pension,
            health_insurance_share: result.shares.health_insurance,
            long_term_care_share: result.shares.long_term_care,
            employment_insurance_share: result.shares.employment_insurance,
            income_tax_share: result.shares.income_tax,
            local_tax_share: result.shares.local_tax,
            taxable_income: result.taxable_income.normalize(),
            tax_rate: result.tax_bracket.rate_percent(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot create '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Writes `rows` with a header line to any writer.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if serialization fails and
/// [`ExportError::Io`] if the final flush fails.
pub fn write_rows<W: Write>(
    writer: W,
    rows: &[SalaryResult],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in rows {
        csv_writer.serialize(CsvRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `rows` to a new file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Create`] if the file cannot be created, or any
/// error from [`write_rows`].
pub fn write_to_path(
    path: &Path,
    rows: &[SalaryResult],
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_rows(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "comparison table exported");
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
