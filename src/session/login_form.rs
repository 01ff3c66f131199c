use crate::constants::{
    EMPNO_FIELD, FORM_SELECTOR, INPUT_SELECTOR, LOGIN_ERROR_SELECTOR, LOGIN_PAGE_MARKER,
    PASSWORD_FIELD,
};
use crate::errors::{AppError, AppResult};
use crate::models::Credentials;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

static FORM_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static INPUT_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static LOGIN_ERROR_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

fn form_selector() -> &'static Selector {
    FORM_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(FORM_SELECTOR).expect("FORM_SELECTOR is a valid CSS selector")
    })
}

fn input_selector() -> &'static Selector {
    INPUT_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(INPUT_SELECTOR).expect("INPUT_SELECTOR is a valid CSS selector")
    })
}

fn login_error_selector() -> &'static Selector {
    LOGIN_ERROR_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(LOGIN_ERROR_SELECTOR).expect("LOGIN_ERROR_SELECTOR is a valid CSS selector")
    })
}

/// The ASP.NET login form as scraped from the login page.
///
/// Holds every `<input>` of the form in document order, which carries the
/// hidden `__VIEWSTATE`/`__EVENTVALIDATION` fields a postback needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    action: Option<String>,
    fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Parses the first `<form>` of `html` and collects its input fields.
    ///
    /// Inputs without a `value` attribute map to the empty string; inputs
    /// without a `name` cannot be posted and are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the page has no form.
    pub fn parse(html: &str) -> AppResult<Self> {
        let document = Html::parse_document(html);

        let form = document
            .select(form_selector())
            .next()
            .ok_or_else(|| AppError::ParseError("No login form found on the login page".into()))?;

        let mut login_form = Self {
            action: form.value().attr("action").map(str::to_string),
            fields: Vec::new(),
        };

        for input in form.select(input_selector()) {
            if let Some(name) = input.value().attr("name") {
                let value = input.value().attr("value").unwrap_or_default();
                login_form.set_field(name, value);
            }
        }

        Ok(login_form)
    }

    /// Sets `name` to `value`, keeping the field's original position when it
    /// already exists and appending it otherwise.
    pub fn set_field(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    /// Overwrites the username and password inputs.
    pub fn fill_credentials(&mut self, credentials: &Credentials) {
        self.set_field(EMPNO_FIELD, credentials.employee_number.as_str());
        self.set_field(PASSWORD_FIELD, credentials.password.expose());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Resolves the form `action` against the URL the login page was served from.
    ///
    /// A relative action lands in the page's directory; a missing one posts
    /// back to the page itself.
    pub fn submit_url(&self, page_url: &Url) -> AppResult<Url> {
        Ok(page_url.join(self.action.as_deref().unwrap_or_default())?)
    }
}

/// Whether `url` is the portal's login page, i.e. the login did not go through.
pub fn is_login_page(url: &Url) -> bool {
    url.path().to_ascii_lowercase().contains(LOGIN_PAGE_MARKER)
}

/// Whether the login page carries the "invalid username or password" box.
pub fn has_login_error(html: &str) -> bool {
    Html::parse_document(html)
        .select(login_error_selector())
        .next()
        .is_some()
}
