//! Common test utilities for integration tests

use std::path::Path;
use swol_export::config::ExportConfig;
use swol_export::constants::LINE_ENDING;
use swol_export::models::{Credentials, EmployeeNumber, ExportFormat, ExportRequest, Password};
use swol_export::period::DateRange;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SCHEDULE_PATH: &str = "/SKYW/SkedPlus/MySchedule.aspx";
pub const LOGIN_PATH: &str = "/SKYW/SkedPlus/Login.aspx";
pub const LANDING_PATH: &str = "/SKYW/SkedPlus/Default.aspx";
pub const EXPORT_PATH: &str = "/SKYW/SkedPlus/Export.aspx";

/// Login page as served by SWOL, trimmed down to the form
pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <form name="aspnetForm" method="post" action="./Login.aspx?ReturnUrl=%2fSKYW%2fSkedPlus%2fMySchedule.aspx" id="aspnetForm">
    <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="dDwtMTA4NzI" />
    <input type="hidden" name="__EVENTVALIDATION" id="__EVENTVALIDATION" value="wEWBAK" />
    <input name="ctl02$txtEmpNo" type="text" id="ctl02_txtEmpNo" />
    <input name="ctl02$txtPassword" type="password" id="ctl02_txtPassword" />
    <input type="submit" name="ctl02$btnLogin" value="Login" />
  </form>
</body>
</html>"#;

/// Login page with the credential error box shown
pub const LOGIN_PAGE_WITH_ERROR: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="ctl02_divErr">Invalid Username or Password</div>
  <form method="post" action="./Login.aspx"></form>
</body>
</html>"#;

/// Config pointing at the mock server, without courtesy delays
pub fn test_config(server: &MockServer) -> ExportConfig {
    ExportConfig {
        base_url: server.uri(),
        request_delay_ms: 0,
        ..ExportConfig::default()
    }
}

/// Request writing `<dir>/export_<format>.csv`
pub fn export_request(dir: &Path, range: DateRange, format: ExportFormat) -> ExportRequest {
    ExportRequest {
        credentials: Credentials {
            employee_number: EmployeeNumber::parse("1234").unwrap(),
            password: Password::new("s3cret"),
        },
        range,
        format,
        output: dir.join("export").to_string_lossy().into_owned(),
    }
}

/// Joins lines with the platform line terminator, each line terminated
pub fn csv_lines(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| format!("{line}{LINE_ENDING}"))
        .collect()
}

/// URL the login page is served from, which the login POST names as Referer
pub fn login_page_url(server: &MockServer) -> String {
    format!("{}{}?Notify=N", server.uri(), SCHEDULE_PATH)
}

/// Serves the login page on the schedule URL
pub async fn mount_login_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SCHEDULE_PATH))
        .and(query_param("Notify", "N"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(server)
        .await;
}

/// Accepts the login POST (when it carries the scraped and filled-in fields
/// and the login page as Referer) and redirects to the landing page
pub async fn mount_successful_login(server: &MockServer) {
    mount_login_page(server).await;

    let referer = login_page_url(server);
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("referer", referer.as_str()))
        .and(query_param("ReturnUrl", SCHEDULE_PATH))
        .and(body_string_contains("__VIEWSTATE=dDwtMTA4NzI"))
        .and(body_string_contains("ctl02%24txtEmpNo=001234"))
        .and(body_string_contains("ctl02%24txtPassword=s3cret"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", LANDING_PATH)
                .insert_header("Set-Cookie", ".ASPXAUTH=abc123; Path=/"),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(LANDING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>My Schedule</html>"))
        .mount(server)
        .await;
}

/// Serves `body` for one bid month's export
pub async fn mount_export(server: &MockServer, bid_month: &str, format: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(EXPORT_PATH))
        .and(query_param("Format", "CSV"))
        .and(query_param("Block", format))
        .and(query_param("BidMonth", bid_month))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}
