//! Authenticated HTTP session against the SWOL portal.
//!
//! [`Session::login`] scrapes and replays the ASP.NET login form, and the
//! resulting [`AuthenticatedSession`] downloads the monthly CSV exports.

mod client;
mod login_form;

// Re-export public API
pub use client::{AuthenticatedSession, Session};
pub use login_form::{has_login_error, is_login_page, LoginForm};
