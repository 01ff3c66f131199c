//! Interactive prompts for options missing from the command line.

use crate::errors::{AppError, AppResult};
use crate::models::Password;
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of values the user did not pass as flags.
pub trait Prompter {
    /// Asks for `label`, showing `default`. An empty answer takes the default.
    fn ask(&mut self, label: &str, default: &str) -> AppResult<String>;

    /// Asks for the SWOL password without echo.
    fn password(&mut self) -> AppResult<Password>;
}

/// Prompts on the terminal: questions on stdout, answers from stdin.
///
/// When stdin is closed every question takes its default, so piped runs
/// behave like runs with every flag at its default. The password is the
/// exception and needs a terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, label: &str, default: &str) -> AppResult<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{label} [{default}]: ")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer_or_default(&answer, default))
    }

    fn password(&mut self) -> AppResult<Password> {
        if !io::stdin().is_terminal() {
            return Err(AppError::InvalidInput(
                "Cannot read the password without a terminal, pass --password".into(),
            ));
        }

        let password = read_hidden("SWOL Password (not stored): ")?;
        let confirmation = read_hidden("Repeat for confirmation: ")?;
        if password != confirmation {
            return Err(AppError::InvalidInput(
                "The two entered passwords do not match".into(),
            ));
        }
        Ok(Password::new(password))
    }
}

fn read_hidden(label: &str) -> AppResult<String> {
    rpassword::prompt_password(label)
        .map_err(|e| AppError::IoError(format!("Failed to read password: {e}")))
}

/// Trims the typed answer, falling back to `default` when nothing was typed.
pub fn answer_or_default(answer: &str, default: &str) -> String {
    match answer.trim() {
        "" => default.to_string(),
        typed => typed.to_string(),
    }
}
