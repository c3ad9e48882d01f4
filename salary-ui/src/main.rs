use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use salary_core::{RateTable, default_rates};
use salary_ui::csv_export;
use salary_ui::logging;
use salary_ui::session::Session;
use salary_ui::state::{AppState, ViewMode};
use salary_ui::theme::Palette;
use salary_ui::views;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Korean salary net pay calculator.
///
/// Shows social insurance premiums, withholding income tax and take-home pay
/// for a salary, alongside a comparison table across salary levels.
#[derive(Debug, Parser)]
#[command(name = "salary-calc", version)]
struct Cli {
    /// Which table to show.
    #[arg(long, value_enum, default_value_t = ViewMode::Annual)]
    mode: ViewMode,

    /// Salary to calculate, annual in annual and tax modes, monthly in
    /// monthly mode. Separators are ignored (e.g. `50,000,000`).
    #[arg(long)]
    salary: Option<String>,

    /// Dependents including yourself.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=8))]
    dependents: u32,

    /// Show every deduction as its own column.
    #[arg(long)]
    details: bool,

    /// Lower bound of a custom comparison range.
    #[arg(long)]
    range_min: Option<String>,

    /// Upper bound of a custom comparison range.
    #[arg(long)]
    range_max: Option<String>,

    /// Levels in a custom comparison range: 5, 8, 10, 12, 15 or 20.
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Rate table to use instead of the built-in 2026 rates.
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Also write the comparison table to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Read commands from stdin after the first screen.
    #[arg(short, long)]
    interactive: bool,

    /// Log filter, e.g. `info` or `salary_core=debug`. Defaults to RUST_LOG,
    /// then `warn`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn initial_state(&self) -> anyhow::Result<AppState> {
        let mut state = AppState {
            mode: self.mode,
            show_details: self.details,
            use_custom_range: self.range_min.is_some() || self.range_max.is_some(),
            ..Default::default()
        };
        if let Some(salary) = &self.salary {
            state.set_salary_input(salary);
        }
        state.set_dependents(self.dependents)?;
        if let Some(min) = &self.range_min {
            state.set_range_min(min);
        }
        if let Some(max) = &self.range_max {
            state.set_range_max(max);
        }
        state.set_range_steps(self.steps)?;
        Ok(state)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?cli, "starting");

    let loaded;
    let rates: &RateTable = match &cli.rates {
        Some(path) => {
            loaded = RateTable::from_file(path)
                .with_context(|| format!("loading rates from {}", path.display()))?;
            info!(year = loaded.year, path = %path.display(), "using rate table from file");
            &loaded
        }
        None => default_rates(),
    };

    let state = cli.initial_state().context("invalid option")?;
    let palette = if cli.no_color {
        Palette::plain()
    } else {
        Palette::detect()
    };

    if let Some(path) = &cli.csv {
        let rows = state.table_rows(rates);
        csv_export::write_to_path(path, &rows)
            .with_context(|| format!("exporting to {}", path.display()))?;
    }

    if cli.interactive {
        let mut session = Session::new(state, rates, palette);
        session.run(io::stdin().lock(), io::stdout().lock())?;
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", views::render(&state, rates, palette))?;
    }

    logging::disable_file_logging();
    Ok(())
}
