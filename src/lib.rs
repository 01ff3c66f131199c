//! swol-export library
//!
//! Everything the `swol-export` binary does lives here, so the workflow can
//! be driven from tests against a mock portal. The binary only builds the
//! runtime and reports errors.
//!
//! ## Overview
//!
//! - [`session`] - Logs into SWOL by replaying the ASP.NET login form and downloads monthly exports
//! - [`period`] - Validates the requested month range and enumerates bid months
//! - [`csv_output`] - Concatenates monthly CSV bodies into one file with a single header
//! - [`exporter`] - Runs the whole login + export workflow
//! - [`cli`] - Command-line interface
//! - [`prompt`] - Asks for options missing from the command line
//! - [`config`] - TOML run configuration
//! - [`models`] - Bid months, export formats and credentials
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use swol_export::config::ExportConfig;
//! use swol_export::exporter::run_export;
//! use swol_export::models::{BidMonth, Credentials, EmployeeNumber, ExportFormat, ExportRequest, Password};
//! use swol_export::period::DateRange;
//! use swol_export::errors::AppResult;
//!
//! # async fn example() -> AppResult<()> {
//! let request = ExportRequest {
//!     credentials: Credentials {
//!         employee_number: EmployeeNumber::parse("1234")?,
//!         password: Password::new("secret"),
//!     },
//!     range: DateRange::from_parts(2024, 1, 2024, 6)?,
//!     format: ExportFormat::Hhmm,
//!     output: "export".to_string(),
//! };
//!
//! // Writes export_HHMM.csv with one header and every month's rows
//! let summary = run_export(&request, &ExportConfig::default()).await?;
//! println!("{} rows", summary.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod csv_output;
pub mod errors;
pub mod exporter;
pub mod logging;
pub mod models;
pub mod period;
pub mod prompt;
pub mod session;
pub mod ui;
