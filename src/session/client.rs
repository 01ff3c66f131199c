use super::login_form::{has_login_error, is_login_page, LoginForm};
use crate::config::ExportConfig;
use crate::constants::{ACCEPT, ACCEPT_LANGUAGE, EXPORT_PATH, MY_SCHEDULE_PATH};
use crate::errors::{AppError, AppResult};
use crate::models::{BidMonth, Credentials, ExportFormat};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Sends a prepared request and rejects non-success statuses, naming `page`
/// in the error so the user knows which step failed.
async fn send(request: reqwest::RequestBuilder, page: &str) -> AppResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Problem loading the {page}: {e}")))?;

    let status = response.status();
    response.error_for_status().map_err(|e| {
        AppError::NetworkError(format!(
            "HTTP {}: Problem loading the {page}: {e}",
            status.as_u16()
        ))
    })
}

async fn read_body(response: Response, page: &str) -> AppResult<String> {
    response
        .text()
        .await
        .map_err(|e| AppError::NetworkError(format!("Problem reading the {page}: {e}")))
}

/// An HTTP session against the portal that has not logged in yet.
///
/// Carries the cookie jar and the browser-like headers every request needs.
/// [`Session::login`] consumes it and hands back an [`AuthenticatedSession`].
#[derive(Debug)]
pub struct Session {
    client: Client,
    base_url: Url,
    delay: Duration,
}

impl Session {
    /// Builds the HTTP client for a run.
    ///
    /// # Errors
    ///
    /// Returns `UrlError` if the configured base URL is invalid, or
    /// `NetworkError` if the client cannot be built.
    pub fn open(config: &ExportConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            delay: config.request_delay(),
        })
    }

    /// Logs into SWOL by replaying the login form with `credentials` filled in.
    ///
    /// 1. GETs the schedule page, which serves the login form
    /// 2. Scrapes every form input (view state and friends)
    /// 3. Overrides the employee number and password fields
    /// 4. Waits the courtesy delay, then POSTs the form to its `action`
    /// 5. Checks that the portal did not bounce us back to `Login.aspx`
    ///
    /// # Errors
    ///
    /// - `NetworkError` if either request fails or returns a non-success status
    /// - `ParseError` if the login page has no form
    /// - `InvalidCredentials` if the portal shows its credential error box
    /// - `LoginFailed` if the portal returns to the login page for any other reason
    pub async fn login(self, credentials: &Credentials) -> AppResult<AuthenticatedSession> {
        let schedule_url = self.base_url.join(MY_SCHEDULE_PATH)?;

        info!(url = %schedule_url, "Loading login page");
        let response = send(
            self.client.get(schedule_url).query(&[("Notify", "N")]),
            "login page",
        )
        .await?;
        let page_url = response.url().clone();
        let html = read_body(response, "login page").await?;

        let mut form = LoginForm::parse(&html)?;
        form.fill_credentials(credentials);
        let submit_url = form.submit_url(&page_url)?;

        self.pause().await;

        debug!(url = %submit_url, fields = form.fields().len(), "Posting login form");
        let response = send(
            self.client
                .post(submit_url)
                .header(header::REFERER, page_url.as_str())
                .form(form.fields()),
            "SkedPlus page",
        )
        .await?;
        let landed_url = response.url().clone();

        if is_login_page(&landed_url) {
            let html = read_body(response, "SkedPlus page").await?;
            if has_login_error(&html) {
                warn!("Portal rejected the employee number or password");
                return Err(AppError::InvalidCredentials);
            }
            return Err(AppError::LoginFailed(format!(
                "still on the login page ({landed_url}), retry later"
            )));
        }

        info!(url = %landed_url, "Logged in");
        Ok(AuthenticatedSession {
            session: self,
            referer: landed_url,
        })
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// A logged-in session, ready to download exports.
#[derive(Debug)]
pub struct AuthenticatedSession {
    session: Session,
    /// Page the portal landed on after login, sent as `Referer` on exports
    referer: Url,
}

impl AuthenticatedSession {
    /// Downloads the CSV export for one bid month and returns its raw body.
    ///
    /// Waits the courtesy delay first.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the request fails or returns a non-success status.
    pub async fn fetch_export(
        &self,
        bid_month: BidMonth,
        format: ExportFormat,
    ) -> AppResult<String> {
        self.session.pause().await;

        let export_url = self.session.base_url.join(EXPORT_PATH)?;
        let bid_month_id = bid_month.to_string();

        debug!(bid_month = %bid_month_id, format = format.as_str(), "Requesting CSV export");
        let response = send(
            self.session
                .client
                .get(export_url)
                .header(header::REFERER, self.referer.as_str())
                .query(&[
                    ("Format", "CSV"),
                    ("Block", format.as_str()),
                    ("BidMonth", bid_month_id.as_str()),
                ]),
            "CSV export page",
        )
        .await?;

        read_body(response, "CSV export page").await
    }

    /// Ends the session. Cookies and connections go with it.
    pub fn close(self) {
        debug!("Session closed");
    }
}
