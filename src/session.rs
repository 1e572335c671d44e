// ABOUTME: Auth session handling: token cookies for the web front-end and token storage for the CLI
//
// handle_session mirrors the session endpoint: POST {accessToken, refreshToken}
// answers with two Set-Cookie headers, any other method gets 405.
// SessionStore keeps the same tokens in the system keychain for the CLI.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use keyring::Entry;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use url::form_urlencoded;

use crate::config::{AppConfig, SessionConfig};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

const SESSION_OK_MESSAGE: &str = "서버에 토큰 전달 성공";
const SESSION_FAILED_MESSAGE: &str = "서버에 토큰 전달 실패";

/// Token pair posted by the client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: String,
    pub max_age_secs: u64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieOptions {
    /// Options shared by both token cookies
    pub fn for_session(config: &SessionConfig, http_only: bool) -> Self {
        Self {
            path: "/".to_string(),
            max_age_secs: config.max_age_secs,
            http_only,
            secure: config.secure,
            same_site: SameSite::Strict,
        }
    }
}

/// Render a `Set-Cookie` header value; the cookie value is URL-encoded
pub fn set_cookie_header(name: &str, value: &str, options: &CookieOptions) -> String {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    let mut header = format!(
        "{name}={encoded}; Max-Age={}; Path={}",
        options.max_age_secs, options.path
    );
    if options.http_only {
        header.push_str("; HttpOnly");
    }
    if options.secure {
        header.push_str("; Secure");
    }
    header.push_str("; SameSite=");
    header.push_str(options.same_site.as_str());
    header
}

#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub method: Method,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl SessionResponse {
    fn json_message(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: serde_json::json!({ "message": message }).to_string(),
        }
    }

    /// All `Set-Cookie` header values, in order
    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("Set-Cookie"))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Store the posted tokens as cookies
pub fn handle_session(request: &SessionRequest, config: &SessionConfig) -> SessionResponse {
    if request.method != Method::POST {
        return SessionResponse {
            status: StatusCode::METHOD_NOT_ALLOWED,
            headers: vec![("Allow".to_string(), "POST".to_string())],
            body: format!("Method {} Not Allowed", request.method),
        };
    }

    let tokens: AuthTokens = match serde_json::from_str(&request.body) {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("Failed to store session tokens: {}", e);
            return SessionResponse::json_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                SESSION_FAILED_MESSAGE,
            );
        }
    };

    let mut response = SessionResponse::json_message(StatusCode::OK, SESSION_OK_MESSAGE);
    response.headers.push((
        "Set-Cookie".to_string(),
        set_cookie_header(
            ACCESS_TOKEN_COOKIE,
            &tokens.access_token,
            &CookieOptions::for_session(config, false),
        ),
    ));
    response.headers.push((
        "Set-Cookie".to_string(),
        set_cookie_header(
            REFRESH_TOKEN_COOKIE,
            &tokens.refresh_token,
            &CookieOptions::for_session(config, true),
        ),
    ));
    response
}

const KEYRING_SERVICE: &str = "waved";

/// Keychain slots for the two session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
}

impl TokenKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

/// Secret storage for session tokens
pub trait TokenVault {
    fn store(&self, key: TokenKey, value: &str) -> Result<()>;
    /// `None` when nothing is stored under `key`
    fn get(&self, key: TokenKey) -> Result<Option<String>>;
    /// Deleting a missing entry is not an error
    fn delete(&self, key: TokenKey) -> Result<()>;
}

/// System keychain (macOS Keychain, Linux keyutils)
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringVault;

impl TokenVault for KeyringVault {
    fn store(&self, key: TokenKey, value: &str) -> Result<()> {
        let entry = Entry::new(KEYRING_SERVICE, key.as_str())
            .context("Failed to create keyring entry")?;
        entry
            .set_password(value)
            .context("Failed to store token in keychain")?;
        debug!("Stored {} in keychain", key.as_str());
        Ok(())
    }

    fn get(&self, key: TokenKey) -> Result<Option<String>> {
        let entry = Entry::new(KEYRING_SERVICE, key.as_str())
            .context("Failed to create keyring entry")?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => {
                debug!("No {} in keychain", key.as_str());
                Ok(None)
            }
            Err(e) => {
                warn!("Failed to read {} from keychain: {}", key.as_str(), e);
                Err(anyhow!("Failed to read token from keychain: {e}"))
            }
        }
    }

    fn delete(&self, key: TokenKey) -> Result<()> {
        let entry = Entry::new(KEYRING_SERVICE, key.as_str())
            .context("Failed to create keyring entry")?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(anyhow!("Failed to delete token from keychain: {e}")),
        }
    }
}

/// Non-secret bookkeeping kept next to the config
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionMetadata {
    saved_at: Option<DateTime<Utc>>,
}

impl SessionMetadata {
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session metadata from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse session metadata from {}", path.display()))
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize session metadata")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write session metadata to {}", path.display()))
    }
}

/// Tokens kept for CLI use: secrets in the vault, `saved_at` on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    pub tokens: AuthTokens,
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionStore {
    pub fn new(tokens: AuthTokens) -> Self {
        Self {
            tokens,
            saved_at: Some(Utc::now()),
        }
    }

    /// Get the path to the session metadata file
    pub fn metadata_path() -> Result<PathBuf> {
        Ok(AppConfig::app_dir()?.join("session.toml"))
    }

    /// Load tokens from the system keychain, `None` if nobody has signed in
    pub fn load() -> Result<Option<Self>> {
        Self::load_with(&KeyringVault, &Self::metadata_path()?)
    }

    pub fn load_with(vault: &impl TokenVault, metadata_path: &Path) -> Result<Option<Self>> {
        let (Some(access_token), Some(refresh_token)) = (
            vault.get(TokenKey::AccessToken)?,
            vault.get(TokenKey::RefreshToken)?,
        ) else {
            return Ok(None);
        };
        let metadata = SessionMetadata::load_from(metadata_path)?;
        Ok(Some(Self {
            tokens: AuthTokens {
                access_token,
                refresh_token,
            },
            saved_at: metadata.saved_at,
        }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_with(&KeyringVault, &Self::metadata_path()?)
    }

    pub fn save_with(&self, vault: &impl TokenVault, metadata_path: &Path) -> Result<()> {
        vault.store(TokenKey::AccessToken, &self.tokens.access_token)?;
        vault.store(TokenKey::RefreshToken, &self.tokens.refresh_token)?;
        SessionMetadata {
            saved_at: self.saved_at,
        }
        .save_to(metadata_path)?;
        info!("Saved session tokens to keychain");
        Ok(())
    }

    /// Remove stored tokens. Returns whether anything was stored.
    pub fn clear() -> Result<bool> {
        Self::clear_with(&KeyringVault, &Self::metadata_path()?)
    }

    pub fn clear_with(vault: &impl TokenVault, metadata_path: &Path) -> Result<bool> {
        let mut existed = false;
        for key in [TokenKey::AccessToken, TokenKey::RefreshToken] {
            existed |= vault.get(key)?.is_some();
            vault.delete(key)?;
        }
        if metadata_path.exists() {
            fs::remove_file(metadata_path)
                .with_context(|| format!("Failed to remove {}", metadata_path.display()))?;
            existed = true;
        }
        Ok(existed)
    }
}
