// ABOUTME: CLI argument parsing and command routing for waved
//
// Provides command-line interface for:
// - Registering a member (register)
// - Browsing challenges and reviews (challenge, recruiting, reviews, my-reviews)
// - Managing participation (cancel, verify, delete-review)
// - Storing auth tokens (session)

pub mod challenge;
pub mod register;
pub mod review;
pub mod session;
pub mod util;
pub mod verify;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// WAVED challenge platform client
#[derive(Parser)]
#[command(name = "waved")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Register as a member (interactive wizard)
    Register,

    /// Show a challenge group
    Challenge(ChallengeArgs),

    /// List challenge groups that are recruiting
    Recruiting,

    /// List reviews for a challenge
    Reviews(ReviewsArgs),

    /// List your own reviews
    MyReviews,

    /// Delete one of your reviews
    DeleteReview(DeleteReviewArgs),

    /// Cancel participation and request a refund
    Cancel(CancelArgs),

    /// Submit verification proof for a challenge
    Verify(VerifyArgs),

    /// Manage stored auth tokens
    #[command(subcommand)]
    Session(SessionCommand),
}

/// Arguments for the challenge command
#[derive(clap::Args)]
pub struct ChallengeArgs {
    /// Challenge group ID
    pub group_id: String,
}

/// Arguments for the reviews command
#[derive(clap::Args)]
pub struct ReviewsArgs {
    /// Challenge ID
    pub challenge_id: u64,

    /// Page number (0 is the first page)
    #[arg(long, short, default_value = "0")]
    pub page: u32,
}

/// Arguments for the delete-review command
#[derive(clap::Args)]
pub struct DeleteReviewArgs {
    /// Review ID
    pub review_id: u64,

    /// Delete without confirmation
    #[arg(long, short)]
    pub force: bool,
}

/// Arguments for the cancel command
#[derive(clap::Args)]
pub struct CancelArgs {
    /// ID of your challenge participation
    pub my_challenge_id: u64,
}

/// Arguments for the verify command
#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Challenge group ID
    pub group_id: String,

    /// Verification type (TEXT, PICTURE, LINK); anything else means TEXT
    #[arg(long = "type", short = 't')]
    pub verification_type: Option<String>,

    /// ID of your challenge participation
    #[arg(long)]
    pub my_challenge_id: Option<String>,

    /// Answer or description text
    #[arg(long)]
    pub text: Option<String>,

    /// Link for LINK verifications
    #[arg(long)]
    pub link: Option<String>,

    /// Photo for PICTURE verifications
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Session subcommands
#[derive(Subcommand)]
pub enum SessionCommand {
    /// Store tokens and print the cookies a browser would receive
    Set(SessionSetArgs),

    /// Show whether tokens are stored
    Show,

    /// Remove stored tokens
    Clear,
}

/// Arguments for session set
#[derive(clap::Args)]
pub struct SessionSetArgs {
    #[arg(long)]
    pub access_token: String,

    #[arg(long)]
    pub refresh_token: String,
}
