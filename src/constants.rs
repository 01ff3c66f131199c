// Portal
pub const DEFAULT_BASE_URL: &str = "https://www.skywestonline.com";
pub const MY_SCHEDULE_PATH: &str = "/SKYW/SkedPlus/MySchedule.aspx";
pub const EXPORT_PATH: &str = "/SKYW/SkedPlus/Export.aspx";
pub const LOGIN_PAGE_MARKER: &str = "login.aspx";

// Login form
pub const EMPNO_FIELD: &str = "ctl02$txtEmpNo";
pub const PASSWORD_FIELD: &str = "ctl02$txtPassword";

// Selectors
pub const FORM_SELECTOR: &str = "form";
pub const INPUT_SELECTOR: &str = "input";
pub const LOGIN_ERROR_SELECTOR: &str = "div#ctl02_divErr";

// Request headers
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.138 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,fr;q=0.8";

// Output
pub const DEFAULT_OUTPUT: &str = "export";
pub const DEFAULT_FORMAT: &str = "HHMM";
pub const DEFAULT_EMPNO: &str = "000000";
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";
