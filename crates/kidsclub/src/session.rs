use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, REFERER, USER_AGENT};

use crate::aggregator::SlotSource;
use crate::parser::is_login_rejected;

const LOGIN_PATH: &str = "/bbs/login_check.php";
const SLOT_LIST_PATH: &str = "/theme/rs/skin/board/rs/write_res_list_get.php";
const BOARD_TABLE: &str = "res";

/// The board only serves its mobile skin reliably, so every request looks like
/// Safari on an iPhone.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("ID and password must not be empty.")]
    MissingCredentials,
    #[error("ID or password is incorrect.")]
    InvalidCredentials,
    #[error("{0}")]
    Transport(#[from] ScraperError),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Transport(ScraperError::HttpError(e))
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.identifier.is_empty() && !self.secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// An authenticated connection to the reservation board. Holds the cookies the
/// site handed out at login; there is no logout.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    base_url: String,
}

impl Session {
    pub async fn login(credentials: &Credentials) -> Result<Self, AuthError> {
        Self::login_at(crate::BASE_URL, credentials).await
    }

    /// Logs in against an arbitrary origin, e.g. a mirror or a local stub.
    pub async fn login_at(base_url: &str, credentials: &Credentials) -> Result<Self, AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::MissingCredentials);
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        let site_root = format!("{}/", base_url);
        let client = build_client(&site_root)?;

        log::info!("Logging in to {} as {}", site_root, credentials.identifier);

        let form = [
            ("mb_id", credentials.identifier.as_str()),
            ("mb_password", credentials.secret.as_str()),
            ("url", site_root.as_str()),
        ];
        let body = client
            .post(format!("{}{}", base_url, LOGIN_PATH))
            .form(&form)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?;

        if is_login_rejected(&body) {
            log::warn!("Login rejected for {}", credentials.identifier);
            return Err(AuthError::InvalidCredentials);
        }

        log::info!("Login succeeded");
        Ok(Self { client, base_url })
    }

    /// Raw reservation fragment for one `k` window on `date`.
    pub async fn fetch_slot_html(&self, date: NaiveDate, slot_id: u8) -> Result<String, ScraperError> {
        let url = format!("{}{}", self.base_url, SLOT_LIST_PATH);
        let select = date.format("%Y-%m-%d").to_string();
        let k = slot_id.to_string();
        log::debug!("Fetching {} k={}", select, k);

        Ok(self
            .client
            .get(&url)
            .query(&[("bo_table", BOARD_TABLE), ("select", select.as_str()), ("k", k.as_str())])
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}

impl SlotSource for Session {
    type Error = ScraperError;

    async fn fetch_slot(&self, date: NaiveDate, slot_id: u8) -> Result<String, Self::Error> {
        self.fetch_slot_html(date, slot_id).await
    }
}

fn build_client(site_root: &str) -> Result<Client, ScraperError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(MOBILE_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_str(site_root)?);

    Ok(Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .cookie_store(true)
        .default_headers(headers)
        .build()?)
}

/// Opens a fresh session on the production site.
pub async fn authenticate(identifier: &str, secret: &str) -> Result<Session, AuthError> {
    Session::login(&Credentials::new(identifier, secret)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("parent01", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("parent01"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("a", "b").is_complete());
        assert!(!Credentials::new("", "b").is_complete());
        assert!(!Credentials::new("a", "").is_complete());
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "ID or password is incorrect."
        );
    }

    #[tokio::test]
    async fn test_login_rejects_empty_credentials_without_network() {
        let result = Session::login_at("http://127.0.0.1:9", &Credentials::new("", "")).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_build_client_rejects_bad_referer() {
        assert!(matches!(
            build_client("http://bad\nhost/"),
            Err(ScraperError::InvalidHeader(_))
        ));
    }
}
