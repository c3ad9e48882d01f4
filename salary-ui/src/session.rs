//! Interactive line-command session.
//!
//! Each line read from the input is one command. Commands that change the
//! state re-render the whole screen; errors are reported and the session
//! keeps going.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use salary_core::RateTable;
use thiserror::Error;
use tracing::{debug, info};

use crate::csv_export::{self, ExportError};
use crate::logging;
use crate::state::{AppState, StateError, ViewMode};
use crate::theme::{Palette, Style};
use crate::views;

pub const HELP: &str = "\
Commands:
  mode annual|monthly|tax     switch view
  salary [amount]             set salary (empty clears)
  dependents <1-8>            set dependents including yourself
  details [on|off]            toggle deduction detail columns
  range on|off                toggle custom comparison range
  range min|max <amount>      set a custom range bound
  range steps <n>             5, 8, 10, 12, 15 or 20 steps
  range reset                 clear the custom range
  export <file.csv>           write the comparison table as CSV
  log <level>                 change log level (error, warn, info, debug, trace)
  log on|off                  show or hide log output on the console
  show                        redraw the screen
  help                        this text
  quit                        leave";

const PROMPT: &str = "> ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid value '{value}' for '{command}'")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },

    #[error(transparent)]
    State(#[from] StateError),

    #[error("export failed: {0}")]
    Export(String),

    #[error("logging not changed: {0}")]
    Log(String),
}

impl From<ExportError> for CommandError {
    fn from(error: ExportError) -> Self {
        CommandError::Export(error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    Flip,
}

impl Toggle {
    fn parse(
        command: &'static str,
        arg: Option<&str>,
    ) -> Result<Self, CommandError> {
        match arg.map(str::to_ascii_lowercase).as_deref() {
            None => Ok(Toggle::Flip),
            Some("on") => Ok(Toggle::On),
            Some("off") => Ok(Toggle::Off),
            Some(other) => Err(CommandError::InvalidArgument {
                command,
                value: other.to_string(),
            }),
        }
    }

    fn apply(
        self,
        current: bool,
    ) -> bool {
        match self {
            Toggle::On => true,
            Toggle::Off => false,
            Toggle::Flip => !current,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeCommand {
    Enable(Toggle),
    Min(String),
    Max(String),
    Steps(usize),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(ViewMode),
    Salary(String),
    Dependents(u32),
    Details(Toggle),
    Range(RangeCommand),
    Export(PathBuf),
    Log(String),
    Show,
    Help,
    Quit,
}

fn required<'a>(
    command: &'static str,
    arg: Option<&'a str>,
) -> Result<&'a str, CommandError> {
    arg.filter(|a| !a.is_empty())
        .ok_or(CommandError::MissingArgument(command))
}

fn parse_number<T: FromStr>(
    command: &'static str,
    value: &str,
) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    })
}

fn parse_range(args: &str) -> Result<RangeCommand, CommandError> {
    let (sub, rest) = match args.split_once(char::is_whitespace) {
        Some((sub, rest)) => (sub, Some(rest.trim())),
        None => (args, None),
    };
    match sub.to_ascii_lowercase().as_str() {
        "" => Ok(RangeCommand::Enable(Toggle::Flip)),
        "on" | "off" => Ok(RangeCommand::Enable(Toggle::parse("range", Some(sub))?)),
        "min" => Ok(RangeCommand::Min(required("range min", rest)?.to_string())),
        "max" => Ok(RangeCommand::Max(required("range max", rest)?.to_string())),
        "steps" => Ok(RangeCommand::Steps(parse_number(
            "range steps",
            required("range steps", rest)?,
        )?)),
        "reset" => Ok(RangeCommand::Reset),
        other => Err(CommandError::InvalidArgument {
            command: "range",
            value: other.to_string(),
        }),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (line, ""),
        };
        let arg = (!args.is_empty()).then_some(args);

        match name.to_ascii_lowercase().as_str() {
            "mode" => {
                let value = required("mode", arg)?;
                ViewMode::parse(value)
                    .map(Command::Mode)
                    .ok_or_else(|| CommandError::InvalidArgument {
                        command: "mode",
                        value: value.to_string(),
                    })
            }
            "salary" => Ok(Command::Salary(args.to_string())),
            "dependents" => Ok(Command::Dependents(parse_number(
                "dependents",
                required("dependents", arg)?,
            )?)),
            "details" => Ok(Command::Details(Toggle::parse("details", arg)?)),
            "range" => Ok(Command::Range(parse_range(args)?)),
            "export" => Ok(Command::Export(PathBuf::from(required("export", arg)?))),
            "log" => Ok(Command::Log(required("log", arg)?.to_string())),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the session should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Message(String),
    Quit,
}

pub struct Session<'a> {
    pub state: AppState,
    rates: &'a RateTable,
    palette: Palette,
}

impl<'a> Session<'a> {
    pub fn new(
        state: AppState,
        rates: &'a RateTable,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            rates,
            palette,
        }
    }

    pub fn render(&self) -> String {
        views::render(&self.state, self.rates, self.palette)
    }

    /// Applies one command to the state.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] when the command is rejected; the state is
    /// left unchanged.
    pub fn apply(
        &mut self,
        command: Command,
    ) -> Result<Outcome, CommandError> {
        debug!(?command, "applying command");
        let state = &mut self.state;
        match command {
            Command::Mode(mode) => state.mode = mode,
            Command::Salary(raw) => state.set_salary_input(&raw),
            Command::Dependents(dependents) => state.set_dependents(dependents)?,
            Command::Details(toggle) => state.show_details = toggle.apply(state.show_details),
            Command::Range(RangeCommand::Enable(toggle)) => {
                state.use_custom_range = toggle.apply(state.use_custom_range);
            }
            Command::Range(RangeCommand::Min(raw)) => state.set_range_min(&raw),
            Command::Range(RangeCommand::Max(raw)) => state.set_range_max(&raw),
            Command::Range(RangeCommand::Steps(steps)) => state.set_range_steps(steps)?,
            Command::Range(RangeCommand::Reset) => state.reset_range(),
            Command::Export(path) => {
                let rows = state.table_rows(self.rates);
                csv_export::write_to_path(&path, &rows)?;
                return Ok(Outcome::Message(format!(
                    "exported {} rows to {}",
                    rows.len(),
                    path.display()
                )));
            }
            Command::Log(setting) => {
                let (result, message) = match setting.to_ascii_lowercase().as_str() {
                    "on" => (logging::set_console_enabled(true), "console logging on".to_string()),
                    "off" => (
                        logging::set_console_enabled(false),
                        "console logging off".to_string(),
                    ),
                    _ => (
                        logging::set_log_level(&setting),
                        format!("log level set to {setting}"),
                    ),
                };
                result.map_err(|e| CommandError::Log(e.to_string()))?;
                return Ok(Outcome::Message(message));
            }
            Command::Show => {}
            Command::Help => return Ok(Outcome::Message(HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Render)
    }

    /// Renders the screen, then reads commands from `input` until `quit` or
    /// end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading or writing fails. Command errors are
    /// written to `output` and do not end the session.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> io::Result<()> {
        info!("interactive session started");
        writeln!(output, "{}", self.render())?;
        write!(output, "{PROMPT}")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let outcome = line.parse::<Command>().and_then(|command| self.apply(command));
            match outcome {
                Ok(Outcome::Render) => writeln!(output, "{}", self.render())?,
                Ok(Outcome::Message(message)) => writeln!(output, "{message}")?,
                Ok(Outcome::Quit) => break,
                Err(error) => writeln!(
                    output,
                    "{}",
                    self.palette.paint(&format!("error: {error}"), Style::Negative)
                )?,
            }
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }
        info!("interactive session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use salary_core::default_rates;

    fn session() -> Session<'static> {
        Session::new(AppState::default(), default_rates(), Palette::plain())
    }

    // =========================================================================
    // parsing
    // =========================================================================

    #[test]
    fn parses_mode_names_and_initials() {
        assert_eq!("mode tax".parse::<Command>(), Ok(Command::Mode(ViewMode::Tax)));
        assert_eq!("MODE m".parse::<Command>(), Ok(Command::Mode(ViewMode::Monthly)));
        assert_eq!(
            "mode weekly".parse::<Command>(),
            Err(CommandError::InvalidArgument {
                command: "mode",
                value: "weekly".to_string()
            })
        );
    }

    #[test]
    fn salary_keeps_raw_text() {
        assert_eq!(
            "salary 50,000,000".parse::<Command>(),
            Ok(Command::Salary("50,000,000".to_string()))
        );
        assert_eq!("salary".parse::<Command>(), Ok(Command::Salary(String::new())));
    }

    #[test]
    fn parses_range_subcommands() {
        assert_eq!(
            "range on".parse::<Command>(),
            Ok(Command::Range(RangeCommand::Enable(Toggle::On)))
        );
        assert_eq!(
            "range min 30,000,000".parse::<Command>(),
            Ok(Command::Range(RangeCommand::Min("30,000,000".to_string())))
        );
        assert_eq!(
            "range steps 8".parse::<Command>(),
            Ok(Command::Range(RangeCommand::Steps(8)))
        );
        assert_eq!(
            "range max".parse::<Command>(),
            Err(CommandError::MissingArgument("range max"))
        );
    }

    #[test]
    fn rejects_unknown_commands_and_bad_numbers() {
        assert_eq!(
            "fly".parse::<Command>(),
            Err(CommandError::Unknown("fly".to_string()))
        );
        assert_eq!(
            "dependents two".parse::<Command>(),
            Err(CommandError::InvalidArgument {
                command: "dependents",
                value: "two".to_string()
            })
        );
        assert_eq!(
            "details maybe".parse::<Command>(),
            Err(CommandError::InvalidArgument {
                command: "details",
                value: "maybe".to_string()
            })
        );
    }

    // =========================================================================
    // applying
    // =========================================================================

    #[test]
    fn details_without_argument_flips() {
        let mut session = session();

        session.apply(Command::Details(Toggle::Flip)).unwrap();
        assert!(session.state.show_details);
        session.apply(Command::Details(Toggle::Flip)).unwrap();
        assert!(!session.state.show_details);
    }

    #[test]
    fn rejected_dependents_leave_state_unchanged() {
        let mut session = session();

        let result = session.apply(Command::Dependents(12));

        assert_eq!(
            result,
            Err(CommandError::State(StateError::DependentsOutOfRange(12)))
        );
        assert_eq!(session.state.dependents, 1);
    }

    #[test]
    fn help_and_quit_do_not_render() {
        let mut session = session();

        assert_eq!(
            session.apply(Command::Help),
            Ok(Outcome::Message(HELP.to_string()))
        );
        assert_eq!(session.apply(Command::Quit), Ok(Outcome::Quit));
    }

    #[test]
    fn log_commands_need_initialized_logging() {
        let mut session = session();

        assert_eq!(
            session.apply(Command::Log("debug".to_string())),
            Err(CommandError::Log("logging not yet initialized".to_string()))
        );
        assert_eq!(
            session.apply(Command::Log("off".to_string())),
            Err(CommandError::Log("logging not yet initialized".to_string()))
        );
    }

    #[test]
    fn run_stops_at_quit() {
        let mut session = session();
        let input = io::Cursor::new("salary 36000000\nquit\nsalary 1\n");
        let mut output = Vec::new();

        session.run(input, &mut output).unwrap();

        assert_eq!(session.state.salary_input, "36,000,000");
    }
}
