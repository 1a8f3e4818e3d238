//! OAuth2 token manager: code exchange, refresh, and file persistence.
//!
//! The token file is canonical snake_case JSON; older camelCase files are
//! still read and silently rewritten. Writes go through a temp sibling and
//! a rename so a crash never leaves a half-written file.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::endpoints;

/// Refresh this long before the nominal expiry.
const REFRESH_MARGIN_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token endpoint error: code={code}, description={description}")]
    Server { code: String, description: String },
    #[error("token response missing access_token")]
    MissingAccessToken,
    #[error("no token loaded; complete the authorization flow first")]
    NoToken,
    #[error("token has no refresh_token")]
    MissingRefreshToken,
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("token file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One OAuth2 token set with its local issue timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(alias = "refreshToken")]
    pub refresh_token: String,
    #[serde(alias = "expiresIn")]
    pub expires_in: u64,
    /// Unix seconds at acquisition; stamped locally, never by the server.
    /// Files written by older tooling carry a float here.
    #[serde(default, deserialize_with = "de_epoch_secs")]
    pub issued_at: u64,
    #[serde(alias = "tokenType", default = "default_token_type")]
    pub token_type: String,
}

impl TokenSet {
    pub fn expires_at(&self) -> u64 {
        self.issued_at.saturating_add(self.expires_in)
    }

    /// True once `now` is within the refresh margin of the expiry.
    pub fn is_expiring(&self, now: u64) -> bool {
        now >= self.expires_at().saturating_sub(REFRESH_MARGIN_SECS)
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn de_epoch_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.max(0.0) as u64)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
    #[serde(rename = "errorCode")]
    error_code: Option<serde_json::Value>,
    description: Option<String>,
}

pub struct TokenManager {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_path: PathBuf,
    auth_uri: String,
    token_uri: String,
    token: Mutex<Option<TokenSet>>,
}

impl TokenManager {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        token_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            token_path: token_path.into(),
            auth_uri: endpoints::AUTH_URI.to_string(),
            token_uri: endpoints::TOKEN_URI.to_string(),
            token: Mutex::new(None),
        }
    }

    /// Points the manager at non-default endpoints (test servers, proxies).
    pub fn with_endpoints(
        mut self,
        auth_uri: impl Into<String>,
        token_uri: impl Into<String>,
    ) -> Self {
        self.auth_uri = auth_uri.into();
        self.token_uri = token_uri.into();
        self
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Token currently held in memory.
    pub fn current(&self) -> Option<TokenSet> {
        self.token.lock().clone()
    }

    /// The URL the resource owner opens to grant access.
    pub fn auth_url(&self, scope: &str) -> String {
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope),
            ],
        )
        .expect("auth endpoint is a valid base url");
        url.to_string()
    }

    /// Loads the persisted token, if any.
    ///
    /// A legacy camelCase file is accepted and rewritten canonically; a
    /// missing `issued_at` defaults to the read time.
    pub fn load(&self) -> Result<Option<TokenSet>, TokenError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.token_path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let legacy = value.get("accessToken").is_some()
            || value.get("issued_at").is_none();

        let mut token: TokenSet = serde_json::from_value(value)?;
        if token.issued_at == 0 {
            token.issued_at = now_epoch();
        }

        if legacy {
            self.save(&token)?;
            info!(
                "legacy token file rewritten: path={}",
                self.token_path.display()
            );
        }

        *self.token.lock() = Some(token.clone());
        Ok(Some(token))
    }

    /// Exchanges an authorization code for a token set and persists it.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, TokenError> {
        self.request_token(
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ],
            None,
        )
        .await
    }

    /// Trades the refresh token for a fresh token set and persists it.
    pub async fn refresh(&self) -> Result<TokenSet, TokenError> {
        let current = self.current().ok_or(TokenError::NoToken)?;
        if current.refresh_token.is_empty() {
            return Err(TokenError::MissingRefreshToken);
        }

        self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", current.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ],
            Some(&current),
        )
        .await
    }

    /// Refreshes only when the current token is inside the expiry margin.
    pub async fn ensure_valid(&self) -> Result<TokenSet, TokenError> {
        let token = match self.current() {
            Some(token) => token,
            None => self.load()?.ok_or(TokenError::NoToken)?,
        };

        if token.is_expiring(now_epoch()) {
            info!("access token expiring, refreshing");
            self.refresh().await
        } else {
            Ok(token)
        }
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous: Option<&TokenSet>,
    ) -> Result<TokenSet, TokenError> {
        let response = self
            .http
            .post(self.token_uri.as_str())
            .form(form)
            .send()
            .await?;
        let body: TokenResponse = response.json().await?;

        if let Some(code) = body.error_code.filter(|code| !code.is_null()) {
            let code = match code {
                serde_json::Value::String(code) => code,
                other => other.to_string(),
            };
            return Err(TokenError::Server {
                code,
                description: body.description.unwrap_or_default(),
            });
        }

        let access_token = body.access_token.ok_or(TokenError::MissingAccessToken)?;
        let refresh_token = body
            .refresh_token
            .or_else(|| previous.map(|token| token.refresh_token.clone()))
            .unwrap_or_default();

        let token = TokenSet {
            access_token,
            refresh_token,
            expires_in: body.expires_in.unwrap_or(0),
            issued_at: now_epoch(),
            token_type: body.token_type.unwrap_or_else(default_token_type),
        };

        self.save(&token)?;
        *self.token.lock() = Some(token.clone());
        info!(
            "token persisted: path={}, expires_in={}s",
            self.token_path.display(),
            token.expires_in
        );
        Ok(token)
    }

    /// Atomic replace: write a temp sibling, then rename over the target.
    fn save(&self, token: &TokenSet) -> Result<(), TokenError> {
        let tmp = self.token_path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(token)?)?;
        std::fs::rename(&tmp, &self.token_path)?;
        Ok(())
    }
}

fn now_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn sample_token(issued_at: u64) -> TokenSet {
        TokenSet {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_in: 900,
            issued_at,
            token_type: "Bearer".to_string(),
        }
    }

    fn manager_at(dir: &Path) -> TokenManager {
        TokenManager::new(
            "app-id",
            "app-secret",
            "http://localhost:8080/redirect",
            dir.join("tokens.json"),
        )
    }

    #[test]
    fn is_expiring_honors_the_five_minute_margin() {
        let token = sample_token(1_000);
        // expires_at = 1900, margin starts at 1600
        assert!(!token.is_expiring(1_599));
        assert!(token.is_expiring(1_600));
        assert!(token.is_expiring(2_000));
    }

    #[test]
    fn auth_url_carries_the_oauth_query() {
        let manager = manager_at(Path::new("/tmp"));
        let url = manager.auth_url("trading");

        assert!(url.starts_with("https://openapi.ctrader.com/apps/auth?"));
        assert!(url.contains("client_id=app-id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fredirect"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=trading"));
    }

    #[test]
    fn legacy_camel_case_file_is_read_and_rewritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path());
        std::fs::write(
            manager.token_path(),
            r#"{"accessToken": "legacy-access", "refreshToken": "legacy-refresh", "expiresIn": 2628000, "tokenType": "Bearer"}"#,
        )
        .expect("seed file");

        let token = manager.load().expect("load").expect("present");
        assert_eq!(token.access_token, "legacy-access");
        assert_eq!(token.refresh_token, "legacy-refresh");
        assert_eq!(token.expires_in, 2_628_000);
        assert!(token.issued_at > 0);

        // File on disk is now canonical snake_case.
        let rewritten =
            std::fs::read_to_string(manager.token_path()).expect("read back");
        assert!(rewritten.contains("\"access_token\""));
        assert!(!rewritten.contains("accessToken"));
        assert!(rewritten.contains("\"issued_at\""));

        // Reading the rewritten file yields the identical token.
        let reload = manager_at(dir.path()).load().expect("load").expect("present");
        assert_eq!(reload, token);
    }

    #[test]
    fn save_leaves_no_temp_sibling() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path());
        manager.save(&sample_token(1_000)).expect("save");

        assert!(manager.token_path().exists());
        assert!(!manager.token_path().with_extension("tmp").exists());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path());
        assert!(manager.load().expect("load").is_none());
    }

    /// One-shot HTTP stub; returns the endpoint URL and a handle resolving
    /// to the captured request body.
    async fn spawn_token_endpoint(
        response_body: &'static str,
    ) -> Option<(String, tokio::task::JoinHandle<String>)> {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                eprintln!("skipping network test: {err}");
                return None;
            }
            Err(err) => panic!("bind test listener failed: {err}"),
        };
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");

            let mut buf = Vec::new();
            let mut chunk = [0_u8; 1024];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.expect("read");
                assert!(n > 0, "client closed before sending headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) =
                    buf.windows(4).position(|window| window == b"\r\n\r\n")
                {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.expect("read body");
                assert!(n > 0, "client closed mid-body");
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                response_body.len(),
                response_body
            );
            stream.write_all(response.as_bytes()).await.expect("write response");
            stream.shutdown().await.ok();

            String::from_utf8_lossy(&buf[header_end..header_end + content_length])
                .to_string()
        });

        Some((format!("http://{addr}/apps/token"), handle))
    }

    #[tokio::test]
    async fn refresh_posts_the_refresh_grant_and_restamps_issued_at() {
        let Some((token_uri, handle)) = spawn_token_endpoint(
            r#"{"access_token": "access-2", "refresh_token": "refresh-2", "expires_in": 2628000, "token_type": "Bearer"}"#,
        )
        .await
        else {
            return;
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path())
            .with_endpoints(endpoints::AUTH_URI, token_uri);

        // Two minutes to expiry: inside the refresh margin.
        let stale = sample_token(now_epoch() - (900 - 120));
        manager.save(&stale).expect("seed");
        manager.load().expect("load").expect("present");

        let refreshed = manager.ensure_valid().await.expect("refresh");
        assert_eq!(refreshed.access_token, "access-2");
        assert_eq!(refreshed.refresh_token, "refresh-2");
        assert!(refreshed.issued_at >= stale.issued_at + (900 - 120));

        let body = handle.await.expect("stub");
        assert!(body.contains("grant_type=refresh_token"));
        assert!(body.contains("refresh_token=refresh-1"));
        assert!(body.contains("client_id=app-id"));
        assert!(body.contains("client_secret=app-secret"));

        // Persisted file carries the new stamps.
        let on_disk: TokenSet = serde_json::from_str(
            &std::fs::read_to_string(manager.token_path()).expect("read back"),
        )
        .expect("parse");
        assert_eq!(on_disk, refreshed);
    }

    #[tokio::test]
    async fn fresh_token_is_not_refreshed() {
        let dir = tempfile::tempdir().expect("tempdir");
        // No stub endpoint: a refresh attempt would fail loudly.
        let manager = manager_at(dir.path())
            .with_endpoints(endpoints::AUTH_URI, "http://127.0.0.1:9/apps/token");

        let fresh = sample_token(now_epoch());
        manager.save(&fresh).expect("seed");
        manager.load().expect("load").expect("present");

        let token = manager.ensure_valid().await.expect("still valid");
        assert_eq!(token, fresh);
    }

    #[tokio::test]
    async fn exchange_code_posts_the_authorization_grant() {
        let Some((token_uri, handle)) = spawn_token_endpoint(
            r#"{"access_token": "access-0", "refresh_token": "refresh-0", "expires_in": 2628000, "token_type": "Bearer"}"#,
        )
        .await
        else {
            return;
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path())
            .with_endpoints(endpoints::AUTH_URI, token_uri);

        let token = manager.exchange_code("the-code").await.expect("exchange");
        assert_eq!(token.access_token, "access-0");
        assert!(manager.token_path().exists());

        let body = handle.await.expect("stub");
        assert!(body.contains("grant_type=authorization_code"));
        assert!(body.contains("code=the-code"));
        assert!(body.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fredirect"));
    }

    #[tokio::test]
    async fn server_error_code_maps_to_token_error() {
        let Some((token_uri, _handle)) = spawn_token_endpoint(
            r#"{"errorCode": "INVALID_GRANT", "description": "code already used"}"#,
        )
        .await
        else {
            return;
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path())
            .with_endpoints(endpoints::AUTH_URI, token_uri);

        match manager.exchange_code("stale").await.expect_err("must fail") {
            TokenError::Server { code, description } => {
                assert_eq!(code, "INVALID_GRANT");
                assert_eq!(description, "code already used");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_access_token_is_rejected() {
        let Some((token_uri, _handle)) =
            spawn_token_endpoint(r#"{"token_type": "Bearer"}"#).await
        else {
            return;
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path())
            .with_endpoints(endpoints::AUTH_URI, token_uri);

        let err = manager.exchange_code("code").await.expect_err("must fail");
        assert!(matches!(err, TokenError::MissingAccessToken));
    }
}
