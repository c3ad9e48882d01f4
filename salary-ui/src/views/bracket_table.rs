//! Statutory income tax brackets.

use salary_core::{RateTable, TaxBracket};

use crate::theme::{Palette, RateTier, Style};
use crate::utils::{format_man, format_number, format_rate, format_won};

use super::table::{Cell, Column, TextTable};

/// Taxable income range of a bracket, e.g. `1,400만원 ~ 5,000만원`.
pub fn range_label(bracket: &TaxBracket) -> String {
    match bracket.max {
        Some(max) if bracket.min.is_zero() => format!("up to {}", format_man(max)),
        Some(max) => format!("{} ~ {}", format_man(bracket.min), format_man(max)),
        None => format!("over {}", format_man(bracket.min)),
    }
}

/// How the tax of a bracket is computed, e.g.
/// `taxable × 15% - 1,260,000원`.
pub fn formula(bracket: &TaxBracket) -> String {
    let rate = format!("taxable × {}%", bracket.rate_percent());
    if bracket.deduction.is_zero() {
        rate
    } else {
        format!("{rate} - {}원", format_number(bracket.deduction))
    }
}

/// Tax owed at the top of a bracket, `-` for the unbounded top bracket.
pub fn tax_at_upper_bound(bracket: &TaxBracket) -> String {
    match bracket.max {
        Some(max) => format_won(bracket.tax_on(max)),
        None => "-".to_string(),
    }
}

pub fn render(
    rates: &RateTable,
    palette: Palette,
) -> String {
    let mut table = TextTable::new(vec![
        Column::left("Taxable income"),
        Column::center("Rate"),
        Column::right("Progressive deduction"),
        Column::left("Tax"),
        Column::right("Tax at upper bound"),
    ]);
    for bracket in rates.tax_brackets.brackets() {
        let percent = bracket.rate_percent();
        let deduction = if bracket.deduction.is_zero() {
            "-".to_string()
        } else {
            format_won(bracket.deduction)
        };
        table.push_row(vec![
            Cell::plain(range_label(bracket)),
            Cell::new(
                format!("{percent}%"),
                Style::Tier(RateTier::from_percent(percent)),
            ),
            Cell::plain(deduction),
            Cell::new(formula(bracket), Style::Muted),
            Cell::plain(tax_at_upper_bound(bracket)),
        ]);
    }

    let mut out = String::new();
    out.push_str(&palette.paint(
        &format!("{} income tax brackets", rates.year),
        Style::Heading,
    ));
    out.push('\n');
    out.push_str(&table.render(palette));
    out.push_str(&palette.paint(
        &format!(
            "* Local income tax of {} of the income tax is charged on top.",
            format_rate(rates.income_tax.local_tax_rate)
        ),
        Style::Muted,
    ));
    out.push('\n');
    out
}
