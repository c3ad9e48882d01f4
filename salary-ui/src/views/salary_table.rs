//! Comparison table of net pay across salary levels.

use rust_decimal::Decimal;
use salary_core::{RateTable, SalaryResult};

use crate::state::{AppState, ViewMode};
use crate::theme::{Palette, RateTier, Style};
use crate::utils::{format_man, format_number, format_salary, format_won};

use super::table::{Cell, Column, TextTable};

const TWELVE: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Salary shown in the first column: monthly gross in monthly mode,
/// annual gross otherwise.
pub fn display_gross(
    result: &SalaryResult,
    mode: ViewMode,
) -> Decimal {
    match mode {
        ViewMode::Monthly => result.gross_monthly,
        ViewMode::Annual | ViewMode::Tax => result.gross_annual,
    }
}

fn amount_with_share(
    amount: Decimal,
    percent: Decimal,
) -> String {
    format!("{} ({percent}%)", format_number(amount))
}

fn pay_table(
    rows: &[SalaryResult],
    state: &AppState,
) -> TextTable {
    let salary_header = match state.mode {
        ViewMode::Monthly => "Monthly salary",
        ViewMode::Annual | ViewMode::Tax => "Annual salary",
    };
    let mut columns = vec![
        Column::left(salary_header),
        Column::right("Monthly net"),
        Column::right("Deductions"),
    ];
    if state.show_details {
        columns.extend([
            Column::right("Pension"),
            Column::right("Health"),
            Column::right("Long-term care"),
            Column::right("Employment"),
            Column::right("Income tax"),
            Column::right("Local tax"),
        ]);
    }

    let mut table = TextTable::new(columns);
    for result in rows {
        let mut cells = vec![
            Cell::plain(format_salary(display_gross(result, state.mode), state.mode)),
            Cell::new(
                amount_with_share(result.net_monthly, result.shares.net),
                Style::Positive,
            ),
            Cell::new(
                amount_with_share(result.total_deduction, result.shares.total_deduction),
                Style::Negative,
            ),
        ];
        if state.show_details {
            let shares = &result.shares;
            cells.extend(
                [
                    (result.national_pension, shares.national_pension),
                    (result.health_insurance, shares.health_insurance),
                    (result.long_term_care, shares.long_term_care),
                    (result.employment_insurance, shares.employment_insurance),
                    (result.income_tax, shares.income_tax),
                    (result.local_tax, shares.local_tax),
                ]
                .into_iter()
                .map(|(amount, percent)| Cell::plain(amount_with_share(amount, percent))),
            );
        }
        table.push_row(cells);
    }
    table
}

fn tax_table(rows: &[SalaryResult]) -> TextTable {
    let mut table = TextTable::new(vec![
        Column::left("Annual salary"),
        Column::right("Taxable income"),
        Column::center("Rate"),
        Column::right("Income tax (yearly)"),
        Column::right("Local tax (yearly)"),
        Column::right("Monthly net"),
    ]);
    for result in rows {
        let percent = result.tax_bracket.rate_percent();
        table.push_row(vec![
            Cell::plain(format_salary(result.gross_annual, ViewMode::Tax)),
            Cell::new(format_man(result.taxable_income), Style::Accent),
            Cell::new(
                format!("{percent}%"),
                Style::Tier(RateTier::from_percent(percent)),
            ),
            Cell::plain(format_won(result.income_tax * TWELVE)),
            Cell::plain(format_won(result.local_tax * TWELVE)),
            Cell::new(format_won(result.net_monthly), Style::Positive),
        ]);
    }
    table
}

/// Builds the table for the current mode from already calculated rows.
pub fn build(
    rows: &[SalaryResult],
    state: &AppState,
) -> TextTable {
    match state.mode {
        ViewMode::Tax => tax_table(rows),
        ViewMode::Annual | ViewMode::Monthly => pay_table(rows, state),
    }
}

fn settings_line(
    state: &AppState,
    palette: Palette,
) -> String {
    let toggle = |on: bool| if on { "on" } else { "off" };
    let mut line = format!(
        "  Details: {}  Custom range: {}",
        toggle(state.show_details),
        toggle(state.use_custom_range)
    );
    if let Some(range) = state.custom_range() {
        let bound = |text: &str| {
            if text.is_empty() {
                "-".to_string()
            } else {
                format!("{text}원")
            }
        };
        line.push_str(&format!(
            "  ({} ~ {}, {} steps)",
            bound(&state.range_min),
            bound(&state.range_max),
            state.range_steps
        ));
        if range.levels().is_err() {
            line.push_str(&format!(
                "  {}",
                palette.paint("invalid range, showing default levels", Style::Negative)
            ));
        }
    }
    line.push('\n');
    line
}

pub fn render(
    state: &AppState,
    rates: &RateTable,
    palette: Palette,
) -> String {
    let title = match state.mode {
        ViewMode::Annual => "Net pay by annual salary",
        ViewMode::Monthly => "Net pay by monthly salary",
        ViewMode::Tax => "Tax rate by annual salary",
    };
    let rows = state.table_rows(rates);

    let mut out = String::new();
    out.push_str(&palette.paint(title, Style::Heading));
    out.push('\n');
    out.push_str(&settings_line(state, palette));
    out.push('\n');
    out.push_str(&build(&rows, state).render(palette));
    out
}
