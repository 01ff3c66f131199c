use crate::errors::{AppError, AppResult};
use crate::period::DateRange;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::path::PathBuf;

/// Year-month identifier used by SkedPlus to select an export period.
///
/// Displays as `YYYYMM`, which is exactly what the export endpoint expects
/// in its `BidMonth` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BidMonth {
    year: i32,
    month: u32,
}

impl BidMonth {
    /// Years that fit the four `YYYY` digits of a bid month id.
    pub const MIN_YEAR: i32 = 1;
    pub const MAX_YEAR: i32 = 9999;

    /// Returns `None` when `year` is outside 1-9999 or `month` outside 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let valid_year = (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year);
        (valid_year && (1..=12).contains(&month)).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month, `None` after December 9999.
    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The preceding calendar month, `None` before January 0001.
    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for BidMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Block time format of the exported CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Hhmm,
    Decimal,
}

impl ExportFormat {
    /// Value sent as the `Block` query parameter and used in the output file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hhmm => "HHMM",
            Self::Decimal => "Decimal",
        }
    }
}

impl From<&str> for ExportFormat {
    fn from(value: &str) -> Self {
        match value {
            "Decimal" => Self::Decimal,
            // Anything else, including "HHMM", falls back to the portal default.
            _ => Self::Hhmm,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SWOL username: the employee number, left zero-padded to six digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeNumber(String);

impl EmployeeNumber {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 6 || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AppError::InvalidInput(format!(
                "Employee number must be 1 to 6 digits, got: '{trimmed}'"
            )));
        }
        Ok(Self(format!("{trimmed:0>6}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext SWOL password. It has to go over the wire as-is, so the only
/// protection here is keeping it out of `Debug` output and logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub employee_number: EmployeeNumber,
    pub password: Password,
}

/// Everything a single export run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub credentials: Credentials,
    pub range: DateRange,
    pub format: ExportFormat,
    /// Output base name, without format suffix or extension
    pub output: String,
}

impl ExportRequest {
    /// `<output>_<format>.csv`
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_{}.csv", self.output, self.format))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub months_exported: usize,
    pub rows_written: usize,
}
