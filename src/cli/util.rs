// ABOUTME: Shared CLI utilities for client construction and output

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::api::WavedApiClient;
use crate::config::AppConfig;
use crate::error::ErrorNotice;
use crate::session::SessionStore;

/// Build an API client from config, authenticated with the stored session when present
pub fn build_client(config: &AppConfig, session: Option<&SessionStore>) -> Result<WavedApiClient> {
    let client = WavedApiClient::new(&config.api).context("Failed to create API client")?;
    let client = match session {
        Some(store) => client.with_access_token(store.tokens.access_token.as_str()),
        None => client,
    };
    debug!(
        "API client for {} (authenticated: {})",
        client.base_url(),
        client.is_authenticated()
    );
    Ok(client)
}

/// Load config and the keychain session, then build a client
pub fn load_client() -> Result<WavedApiClient> {
    let config = AppConfig::load()?;
    let session = SessionStore::load()?;
    build_client(&config, session.as_ref())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print a notice the way the web client shows a snackbar
pub fn print_notice(notice: &ErrorNotice) {
    eprintln!("\u{26a0} {}", notice.error_msg);
}

/// Truncate a string to fit in the given width (character-aware for UTF-8)
pub fn truncate(s: &str, max_len: usize) -> String {
    if max_len <= 3 {
        return ".".repeat(max_len);
    }
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Ask a yes/no question on stdin; anything but y/yes is no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
