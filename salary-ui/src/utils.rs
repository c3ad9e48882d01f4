use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use salary_core::calculations::MAX_MONTHLY_GROSS;

use crate::state::ViewMode;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("non-digit pattern is valid"));

const TEN_THOUSAND: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Inserts a comma every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Reformats free-text amount input as it is typed: every non-digit is
/// dropped and the remaining number is shown with thousands separators.
/// Input with no digits becomes empty.
pub fn format_input(raw: &str) -> String {
    let digits = NON_DIGITS.replace_all(raw, "");
    if digits.is_empty() {
        return String::new();
    }
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        significant => group_thousands(significant),
    }
}

/// Parses an amount, ignoring thousands separators and surrounding
/// whitespace.
///
/// Empty or unparseable input, and amounts above [`MAX_MONTHLY_GROSS`],
/// are treated as 0 (logged at warn when non-empty).
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    match normalized.parse::<Decimal>() {
        Ok(amount) if amount > MAX_MONTHLY_GROSS => {
            tracing::warn!(input = %s, "amount above {MAX_MONTHLY_GROSS} treated as zero");
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(e) => {
            tracing::warn!(input = %s, "invalid amount treated as zero: {}", e);
            Decimal::ZERO
        }
    }
}

/// Formats a number with thousands separators and at most three fraction
/// digits, e.g. `36,250,003.8`.
pub fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut formatted = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }
    formatted.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

/// `3,000,000원`
pub fn format_won(value: Decimal) -> String {
    format!("{}원", format_number(value))
}

/// `2,385만원`
pub fn format_man(value: Decimal) -> String {
    format!("{}만원", format_number(value / TEN_THOUSAND))
}

/// Formats an amount in whole 억 and 만 units: `4,500만원`, `3억원`,
/// `1억 2,500만원`. Amounts are rounded to the nearest 만 first.
pub fn format_korean_units(value: Decimal) -> String {
    let man = (value / TEN_THOUSAND)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if man < TEN_THOUSAND {
        return format!("{}만원", format_number(man));
    }
    let eok = (man / TEN_THOUSAND).floor().normalize();
    let remain = man % TEN_THOUSAND;
    if remain.is_zero() {
        format!("{eok}억원")
    } else {
        format!("{eok}억 {}만원", format_number(remain))
    }
}

/// Salary as shown in tables: 만/억 units for annual figures, plain won for
/// monthly figures.
pub fn format_salary(
    amount: Decimal,
    mode: ViewMode,
) -> String {
    match mode {
        ViewMode::Monthly => format_won(amount),
        ViewMode::Annual | ViewMode::Tax => format_korean_units(amount),
    }
}

/// Formats a fractional rate as a percentage, e.g. `0.03595` → `3.595%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn is_wide(ch: char) -> bool {
    matches!(
        ch,
        '\u{1100}'..='\u{115F}'
            | '\u{2E80}'..='\u{A4CF}'
            | '\u{AC00}'..='\u{D7A3}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF00}'..='\u{FF60}'
            | '\u{FFE0}'..='\u{FFE6}'
    )
}

/// Terminal column width of `text`; Hangul and other East Asian wide
/// characters take two columns.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|ch| if is_wide(ch) { 2 } else { 1 }).sum()
}

pub fn pad_left(
    text: &str,
    width: usize,
) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{text}", " ".repeat(padding))
}

pub fn pad_right(
    text: &str,
    width: usize,
) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn format_input_strips_non_digits_and_groups() {
        assert_eq!(format_input("50000000"), "50,000,000");
        assert_eq!(format_input("5,000,0001"), "50,000,001");
        assert_eq!(format_input("₩ 3.000.000 won"), "3,000,000");
    }

    #[test]
    fn format_input_without_digits_is_empty() {
        assert_eq!(format_input(""), "");
        assert_eq!(format_input("abc"), "");
    }

    #[test]
    fn format_input_drops_leading_zeros() {
        assert_eq!(format_input("000"), "0");
        assert_eq!(format_input("0012345"), "12,345");
    }

    #[test]
    fn parse_amount_accepts_separators() {
        assert_eq!(parse_amount("50,000,000"), dec!(50000000));
        assert_eq!(parse_amount("  1,234 "), dec!(1234));
    }

    #[test]
    fn parse_amount_invalid_or_empty_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("lots"), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_above_limit_is_zero() {
        assert_eq!(parse_amount("1,000,000,000,000,000"), MAX_MONTHLY_GROSS);
        assert_eq!(parse_amount("1,000,000,000,000,001"), Decimal::ZERO);
        assert_eq!(parse_amount("9000000000000000000000000000"), Decimal::ZERO);
        assert_eq!(parse_amount("99999999999999999999999999999999"), Decimal::ZERO);
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(dec!(0)), "0");
        assert_eq!(format_number(dec!(999)), "999");
        assert_eq!(format_number(dec!(1000)), "1,000");
        assert_eq!(format_number(dec!(2507961)), "2,507,961");
        assert_eq!(format_number(dec!(-19000)), "-19,000");
    }

    #[test]
    fn format_number_keeps_up_to_three_fraction_digits() {
        assert_eq!(format_number(dec!(36250003.8)), "36,250,003.8");
        assert_eq!(format_number(dec!(3625.00038)), "3,625");
        assert_eq!(format_number(dec!(1.23456)), "1.235");
        assert_eq!(format_number(dec!(5000.000)), "5,000");
    }

    #[test]
    fn format_korean_units_below_one_eok() {
        assert_eq!(format_korean_units(dec!(45000000)), "4,500만원");
        assert_eq!(format_korean_units(dec!(50000004)), "5,000만원");
    }

    #[test]
    fn format_korean_units_whole_and_partial_eok() {
        assert_eq!(format_korean_units(dec!(300000000)), "3억원");
        assert_eq!(format_korean_units(dec!(125000000)), "1억 2,500만원");
        assert_eq!(format_korean_units(dec!(100000000)), "1억원");
        assert_eq!(format_korean_units(dec!(99999996)), "1억원");
        assert_eq!(format_korean_units(dec!(150000000)), "1억 5,000만원");
    }

    #[test]
    fn format_salary_depends_on_mode() {
        assert_eq!(format_salary(dec!(36000000), ViewMode::Annual), "3,600만원");
        assert_eq!(format_salary(dec!(36000000), ViewMode::Tax), "3,600만원");
        assert_eq!(format_salary(dec!(3000000), ViewMode::Monthly), "3,000,000원");
    }

    #[test]
    fn format_rate_trims_trailing_zeros() {
        assert_eq!(format_rate(dec!(0.0475)), "4.75%");
        assert_eq!(format_rate(dec!(0.03595)), "3.595%");
        assert_eq!(format_rate(dec!(0.15)), "15%");
    }

    #[test]
    fn display_width_counts_hangul_as_two_columns() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("만원"), 4);
        assert_eq!(pad_left("만원", 6), "  만원");
        assert_eq!(pad_right("ab", 4), "ab  ");
    }
}
