//! Result panel for the salary the user entered.

use rust_decimal::Decimal;
use salary_core::{RateTable, SalaryResult};

use crate::state::{AppState, ViewMode};
use crate::theme::{Palette, Style};
use crate::utils::{display_width, format_number, format_won, pad_right};

const LABEL_WIDTH: usize = 22;

fn share(percent: Decimal) -> String {
    format!("({percent}%)")
}

fn line(
    out: &mut String,
    label: &str,
    value: String,
) {
    out.push_str("  ");
    out.push_str(&pad_right(label, LABEL_WIDTH));
    out.push_str(&value);
    out.push('\n');
}

/// Input line plus, when the input is a positive amount, the calculated
/// breakdown.
pub fn render(
    state: &AppState,
    rates: &RateTable,
    palette: Palette,
) -> String {
    let mut out = String::new();
    let title = match state.mode {
        ViewMode::Monthly => "My monthly salary",
        ViewMode::Annual | ViewMode::Tax => "My annual salary",
    };
    out.push_str(&palette.paint(title, Style::Heading));
    out.push('\n');

    let entered = if state.salary_input.is_empty() {
        palette.paint("(not entered)", Style::Muted)
    } else {
        format!("{}원", state.salary_input)
    };
    line(&mut out, "Salary", entered);
    line(
        &mut out,
        "Dependents",
        format!("{} (including yourself)", state.dependents),
    );

    if let Some(result) = state.single_result(rates) {
        out.push('\n');
        out.push_str(&render_result(&result, state.mode, palette));
    }
    out
}

/// Headline figures and the itemized deductions of one result.
pub fn render_result(
    result: &SalaryResult,
    mode: ViewMode,
    palette: Palette,
) -> String {
    let mut out = String::new();
    let shares = &result.shares;

    let (gross_label, gross) = match mode {
        ViewMode::Monthly => ("Monthly gross", result.gross_monthly),
        ViewMode::Annual | ViewMode::Tax => ("Annual gross", result.gross_annual),
    };
    line(&mut out, gross_label, format_won(gross));
    line(
        &mut out,
        "Monthly net pay",
        format!(
            "{} {}",
            palette.paint(&format_won(result.net_monthly), Style::Positive),
            share(shares.net)
        ),
    );
    line(
        &mut out,
        "Monthly deductions",
        format!(
            "{} {}",
            palette.paint(&format_won(result.total_deduction), Style::Negative),
            share(shares.total_deduction)
        ),
    );
    line(
        &mut out,
        "Taxable income",
        palette.paint(&format_won(result.taxable_income), Style::Accent),
    );
    line(
        &mut out,
        "Applied tax rate",
        palette.paint(
            &format!("{}%", result.tax_bracket.rate_percent()),
            Style::Highlight,
        ),
    );

    out.push('\n');
    out.push_str(&palette.paint("  Deduction details", Style::Heading));
    out.push('\n');
    let items = [
        ("National pension", result.national_pension, shares.national_pension),
        ("Health insurance", result.health_insurance, shares.health_insurance),
        ("Long-term care", result.long_term_care, shares.long_term_care),
        (
            "Employment insurance",
            result.employment_insurance,
            shares.employment_insurance,
        ),
        ("Income tax", result.income_tax, shares.income_tax),
        ("Local income tax", result.local_tax, shares.local_tax),
    ];
    let amount_width = items
        .iter()
        .map(|(_, amount, _)| display_width(&format_number(*amount)))
        .max()
        .unwrap_or(0);
    for (label, amount, percent) in items {
        let amount = format_number(amount);
        line(
            &mut out,
            &format!("  {label}"),
            format!(
                "{}{amount}원 {}",
                " ".repeat(amount_width - display_width(&amount)),
                share(percent)
            ),
        );
    }
    out
}
