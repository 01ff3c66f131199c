use crate::config::ExportConfig;
use crate::constants::{DEFAULT_EMPNO, DEFAULT_FORMAT, DEFAULT_OUTPUT};
use crate::errors::{AppError, AppResult};
use crate::exporter::run_export;
use crate::logging::init_logging;
use crate::models::{
    BidMonth, Credentials, EmployeeNumber, ExportFormat, ExportRequest, ExportSummary, Password,
};
use crate::period::DateRange;
use crate::prompt::{Prompter, TerminalPrompter};
use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

const YEARS: RangeInclusive<i64> = BidMonth::MIN_YEAR as i64..=BidMonth::MAX_YEAR as i64;
const MONTHS: RangeInclusive<i64> = 1..=12;

/// Builds the argument parser.
///
/// No option carries a clap default: anything left out is asked for
/// interactively by [`request_from_matches`], with its default shown.
pub fn build_command() -> Command<'static> {
    Command::new("swol-export")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help(
            "Exports your block times month by month into <OUTPUT>_<FORMAT>.csv.\n\
             Options left out are prompted for; press Enter to accept the default shown.\n\
             Be nice to SWOL: at most 24 months are requested per run, the most recent ones.\n\
             Example:\n  swol-export -u 1234 --start-year 2024 --start-month 1 -f Decimal",
        )
        .arg(
            Arg::new("empno")
                .short('u')
                .long("empno")
                .help("Employee number (SWOL username), zero-padded to 6 digits (default: 000000)")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("SWOL password; prompted without echo when omitted")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("start_year")
                .long("start-year")
                .help("Export from this year (default: last month's year)")
                .value_parser(clap::value_parser!(i32).range(YEARS))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("start_month")
                .long("start-month")
                .help("Export from this month, 1-12 (default: last month)")
                .value_parser(clap::value_parser!(u32).range(MONTHS))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("end_year")
                .long("end-year")
                .help("Export up to this year (default: last month's year)")
                .value_parser(clap::value_parser!(i32).range(YEARS))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("end_month")
                .long("end-month")
                .help("Export up to this month, 1-12 (default: last month)")
                .value_parser(clap::value_parser!(u32).range(MONTHS))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Block time format: HHMM or Decimal, anything else is HHMM (default: HHMM)")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file name without extension (default: export)")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a TOML config file")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Parses command-line arguments and runs the export.
///
/// Workflow:
/// 1. Loads the optional TOML config and initializes logging
/// 2. Prompts for every option that was not given
/// 3. Validates the month range and employee number (before any network activity)
/// 4. Prompts for the password if it was not given
/// 5. Logs in and exports every month into a single CSV file
///
/// # Errors
///
/// Returns an error if the range is invalid, the config cannot be loaded,
/// the portal is unreachable, the credentials are rejected, or the output
/// file cannot be written.
pub async fn cli() -> AppResult<ExportSummary> {
    let matches = build_command().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ExportConfig::from_toml_file(path)?,
        None => ExportConfig::default(),
    };
    init_logging(&config)?;

    let last_month = BidMonth::from_date(Local::now().date_naive())
        .and_then(|month| month.pred())
        .ok_or_else(|| AppError::InvalidInput("Today's date has no previous bid month".into()))?;
    let request = request_from_matches(&matches, last_month, &mut TerminalPrompter)?;

    info!(
        from = %request.range.start(),
        to = %request.range.end(),
        format = request.format.as_str(),
        output = %request.output_path().display(),
        "Starting export"
    );

    run_export(&request, &config).await
}

/// Resolves parsed arguments into an [`ExportRequest`], asking `prompter`
/// for whatever is missing.
///
/// Prompts come in flag order: employee number, range, format, output.
/// `default_month` is the default shown for the four date prompts. The
/// password is asked for last, only after the range and employee number
/// have been validated.
pub fn request_from_matches<P: Prompter>(
    matches: &ArgMatches,
    default_month: BidMonth,
    prompter: &mut P,
) -> AppResult<ExportRequest> {
    let empno =
        string_or_prompt(matches, "empno", "SWOL Employee Number", DEFAULT_EMPNO, prompter)?;
    let range = resolve_range(matches, default_month, prompter)?;
    let employee_number = EmployeeNumber::parse(&empno)?;

    let format = string_or_prompt(matches, "format", "Block format", DEFAULT_FORMAT, prompter)?;
    let format = ExportFormat::from(format.as_str());
    let output =
        string_or_prompt(matches, "output", "Output file name", DEFAULT_OUTPUT, prompter)?;

    let password = match matches.get_one::<String>("password") {
        Some(p) => Password::new(p.as_str()),
        None => prompter.password()?,
    };

    Ok(ExportRequest {
        credentials: Credentials {
            employee_number,
            password,
        },
        range,
        format,
        output,
    })
}

/// Builds the month range from the four date arguments, prompting for each
/// one that is missing with `default_month` as its default.
pub fn resolve_range<P: Prompter>(
    matches: &ArgMatches,
    default_month: BidMonth,
    prompter: &mut P,
) -> AppResult<DateRange> {
    let year = default_month.year();
    let month = default_month.month();

    let start_year = number_or_prompt(matches, "start_year", "From year", year, YEARS, prompter)?;
    let start_month =
        number_or_prompt(matches, "start_month", "From month", month, MONTHS, prompter)?;
    let end_year = number_or_prompt(matches, "end_year", "To year", year, YEARS, prompter)?;
    let end_month = number_or_prompt(matches, "end_month", "To month", month, MONTHS, prompter)?;

    DateRange::from_parts(start_year, start_month, end_year, end_month)
}

fn string_or_prompt<P: Prompter>(
    matches: &ArgMatches,
    id: &str,
    label: &str,
    default: &str,
    prompter: &mut P,
) -> AppResult<String> {
    match matches.get_one::<String>(id) {
        Some(value) => Ok(value.clone()),
        None => prompter.ask(label, default),
    }
}

/// Reads a numeric flag, or asks for it and checks the answer against the
/// same bounds the argument parser enforces.
fn number_or_prompt<T, P>(
    matches: &ArgMatches,
    id: &str,
    label: &str,
    default: T,
    bounds: RangeInclusive<i64>,
    prompter: &mut P,
) -> AppResult<T>
where
    T: Copy + Display + FromStr + Into<i64> + Send + Sync + 'static,
    P: Prompter,
{
    if let Some(value) = matches.get_one::<T>(id) {
        return Ok(*value);
    }

    let answer = prompter.ask(label, &default.to_string())?;
    answer
        .parse::<T>()
        .ok()
        .filter(|value| bounds.contains(&Into::<i64>::into(*value)))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "{label} must be a number from {} to {}, got: {answer}",
                bounds.start(),
                bounds.end()
            ))
        })
}
