// ABOUTME: Error types for platform API calls and the user-facing notices derived from them
// A failed page load becomes a snackbar message chosen by HTTP status

use serde::Serialize;
use std::future::Future;
use thiserror::Error;
use tracing::warn;

/// Snackbar text for server-side failures (HTTP 500)
pub const SERVER_ERROR_MESSAGE: &str = "문제가 발생했어요. 잠시 후 다시 시도해주세요.";
/// Snackbar text for timeouts (client timeout or HTTP 408)
pub const TIMEOUT_MESSAGE: &str = "요청시간이 초과되었습니다. 다시 시도 해주세요.";
/// Snackbar text when nothing more specific is known
pub const GENERIC_ERROR_MESSAGE: &str = "에러가 발생했습니다.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("HTTP {status}{}", status_detail(.reason, .message))]
    Status {
        status: u16,
        reason: String,
        /// Server-provided message, or the raw body when it is not JSON
        message: String,
    },
    #[error("Request timed out")]
    Timeout,
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API client configuration: {0}")]
    Config(String),
}

/// " <reason>: <message>", skipping whichever part is empty
fn status_detail(reason: &str, message: &str) -> String {
    let mut detail = String::new();
    if !reason.is_empty() {
        detail.push(' ');
        detail.push_str(reason);
    }
    if !message.trim().is_empty() {
        detail.push_str(": ");
        detail.push_str(message);
    }
    detail
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

impl ApiError {
    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout) || self.status() == Some(408)
    }

    /// Best message to show a user, if there is one
    fn user_message(&self) -> Option<String> {
        match self {
            Self::Status { message, .. } if !message.trim().is_empty() => Some(message.clone()),
            other => {
                let text = other.to_string();
                (!text.trim().is_empty()).then_some(text)
            }
        }
    }
}

/// A user-facing message raised instead of failing a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorNotice {
    pub require_snack_bar: bool,
    pub error_msg: String,
}

impl ErrorNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            require_snack_bar: true,
            error_msg: message.into(),
        }
    }

    /// Pick the message for an API failure:
    /// 500 gets the server-error text, timeouts and 408 the timeout text,
    /// anything else its own message.
    pub fn from_api_error(err: &ApiError) -> Self {
        if err.status() == Some(500) {
            return Self::new(SERVER_ERROR_MESSAGE);
        }
        if err.is_timeout() {
            return Self::new(TIMEOUT_MESSAGE);
        }
        Self::new(
            err.user_message()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        )
    }
}

/// Result of loading data for a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageProps<T> {
    Loaded(T),
    Failed(ErrorNotice),
}

impl<T> PageProps<T> {
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }
}

/// Run a page loader, turning any API failure into a notice instead of an error
pub async fn catch_server_error<T, F>(loader: F) -> PageProps<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match loader.await {
        Ok(value) => PageProps::Loaded(value),
        Err(err) => {
            warn!("Page data request failed: {}", err);
            PageProps::Failed(ErrorNotice::from_api_error(&err))
        }
    }
}
