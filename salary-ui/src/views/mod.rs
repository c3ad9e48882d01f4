//! Text views of the calculator.
//!
//! Everything is rendered from an [`AppState`] and a [`RateTable`]:
//! - `summary` - result panel for the entered salary
//! - `salary_table` - comparison table across salary levels
//! - `bracket_table` - statutory tax brackets (tax mode only)

pub mod bracket_table;
pub mod salary_table;
pub mod summary;
pub mod table;

use salary_core::RateTable;

use crate::state::{AppState, ViewMode};
use crate::theme::{Palette, Style};
use crate::utils::{format_man, format_rate};

const REFERENCE_URL: &str = "https://www.nts.go.kr";

fn header(
    rates: &RateTable,
    palette: Palette,
) -> String {
    let insurance = &rates.insurance;
    format!(
        "{}\n{}\n",
        palette.paint(
            &format!("{} Salary Net Pay Calculator", rates.year),
            Style::Heading
        ),
        palette.paint(
            &format!(
                "Pension {} · Health {} · Long-term care {} · Employment {}",
                format_rate(insurance.national_pension),
                format_rate(insurance.health_insurance),
                format_rate(insurance.long_term_care),
                format_rate(insurance.employment_insurance),
            ),
            Style::Muted
        ),
    )
}

fn mode_tabs(
    mode: ViewMode,
    palette: Palette,
) -> String {
    let tabs: Vec<String> = ViewMode::all()
        .iter()
        .map(|&tab| {
            if tab == mode {
                palette.paint(&format!("[{}]", tab.label()), Style::Selected)
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();
    format!("{}\n", tabs.join(" "))
}

fn notes(
    rates: &RateTable,
    palette: Palette,
) -> String {
    let insurance = &rates.insurance;
    let lines = [
        format!(
            "{} employee rates: national pension {}, health insurance {}, long-term care {} of the health premium, employment insurance {}.",
            rates.year,
            format_rate(insurance.national_pension),
            format_rate(insurance.health_insurance),
            format_rate(insurance.long_term_care),
            format_rate(insurance.employment_insurance),
        ),
        format!(
            "National pension is charged on monthly pay between {} and {}.",
            format_man(rates.pension_limits.min),
            format_man(rates.pension_limits.max),
        ),
        "Income tax uses a simplified withholding table; year-end settlement may differ.".to_string(),
        "Non-taxable allowances and pay beyond base salary are not included.".to_string(),
        format!("Figures are estimates. See {REFERENCE_URL} for official guidance."),
    ];

    let mut out = palette.paint("Notes", Style::Heading);
    out.push('\n');
    for line in lines {
        out.push_str(&palette.paint(&format!("  * {line}"), Style::Muted));
        out.push('\n');
    }
    out
}

/// Renders the full screen for `state`.
///
/// # Example
///
/// ```
/// use salary_core::default_rates;
/// use salary_ui::state::AppState;
/// use salary_ui::theme::Palette;
/// use salary_ui::views::render;
///
/// let mut state = AppState::default();
/// state.set_salary_input("50000000");
///
/// let screen = render(&state, default_rates(), Palette::plain());
///
/// assert!(screen.contains("Monthly net pay"));
/// assert!(screen.contains("5,000만원"));
/// ```
pub fn render(
    state: &AppState,
    rates: &RateTable,
    palette: Palette,
) -> String {
    let mut sections = vec![header(rates, palette), mode_tabs(state.mode, palette)];
    if state.mode == ViewMode::Tax {
        sections.push(bracket_table::render(rates, palette));
    }
    sections.push(summary::render(state, rates, palette));
    sections.push(salary_table::render(state, rates, palette));
    sections.push(notes(rates, palette));
    sections.join("\n")
}
