// ABOUTME: CLI session commands - store, show and clear auth tokens
//
// set: runs the tokens through the session handler, prints the cookies and
// stores the tokens in the system keychain for authenticated API calls.

use anyhow::{bail, Result};
use reqwest::Method;
use serde::Serialize;

use super::util::{build_client, print_json};
use super::{OutputFormat, SessionCommand, SessionSetArgs};
use crate::config::AppConfig;
use crate::session::{handle_session, AuthTokens, SessionRequest, SessionStore};

#[derive(Debug, Serialize)]
struct SessionOutput {
    stored: bool,
    saved_at: Option<String>,
    access_token: Option<String>,
    api_base_url: String,
    authenticated: bool,
}

/// Execute a session subcommand
pub fn execute(command: SessionCommand, format: OutputFormat) -> Result<()> {
    match command {
        SessionCommand::Set(args) => set(&args, format),
        SessionCommand::Show => show(format),
        SessionCommand::Clear => clear(),
    }
}

fn set(args: &SessionSetArgs, format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let tokens = AuthTokens {
        access_token: args.access_token.clone(),
        refresh_token: args.refresh_token.clone(),
    };
    let request = SessionRequest {
        method: Method::POST,
        body: serde_json::to_string(&tokens)?,
    };

    let response = handle_session(&request, &config.session);
    if !response.status.is_success() {
        bail!("Session handler rejected tokens: {} {}", response.status, response.body);
    }

    SessionStore::new(tokens).save()?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "status": response.status.as_u16(),
            "cookies": response.set_cookies(),
        }))?,
        OutputFormat::Text => {
            for cookie in response.set_cookies() {
                println!("Set-Cookie: {cookie}");
            }
        }
    }
    Ok(())
}

/// Keep the first few characters of a token for display
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    format!("{visible}…")
}

fn show(format: OutputFormat) -> Result<()> {
    let config = AppConfig::load()?;
    let store = SessionStore::load()?;
    let client = build_client(&config, store.as_ref())?;
    let output = SessionOutput {
        stored: store.is_some(),
        saved_at: store
            .as_ref()
            .and_then(|s| s.saved_at)
            .map(|saved_at| saved_at.to_rfc3339()),
        access_token: store.as_ref().map(|s| mask_token(&s.tokens.access_token)),
        api_base_url: client.base_url().to_string(),
        authenticated: client.is_authenticated(),
    };

    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => {
            match &output.access_token {
                Some(token) => println!(
                    "Signed in (access token {token}, saved {})",
                    output.saved_at.as_deref().unwrap_or("unknown")
                ),
                None => println!("Not signed in. Run 'waved session set' to store tokens."),
            }
            println!("API: {}", output.api_base_url);
        }
    }
    Ok(())
}

fn clear() -> Result<()> {
    if SessionStore::clear()? {
        println!("Stored tokens removed.");
    } else {
        println!("No stored tokens.");
    }
    Ok(())
}
