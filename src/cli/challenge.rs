// ABOUTME: CLI challenge commands - group details, recruiting list, participation cancel
//
// Page-style loads go through catch_server_error so failures print a notice
// instead of aborting with an error.

use anyhow::Result;

use super::util::{load_client, print_json, print_notice, truncate};
use super::{CancelArgs, ChallengeArgs, OutputFormat};
use crate::api::{ChallengeGroup, RecruitingChallenge};
use crate::error::{catch_server_error, ErrorNotice, PageProps};

/// Execute the challenge command
pub async fn execute(args: ChallengeArgs, format: OutputFormat) -> Result<()> {
    let client = load_client()?;
    match catch_server_error(client.get_challenge_group(&args.group_id)).await {
        PageProps::Loaded(group) => match format {
            OutputFormat::Json => print_json(&group)?,
            OutputFormat::Text => output_group(&args.group_id, &group),
        },
        PageProps::Failed(notice) => print_notice(&notice),
    }
    Ok(())
}

fn output_group(group_id: &str, group: &ChallengeGroup) {
    println!("{} (#{group_id})", group.group_title);
    println!("  Type:         {}", group.verification_type);
    println!("  Free:         {}", if group.is_free { "yes" } else { "no" });
    println!("  Participants: {}", group.participant_count);
    if !group.start_date.is_empty() {
        println!("  Period:       {} ~ {}", group.start_date, group.end_date);
    }
    if !group.description.is_empty() {
        println!();
        println!("{}", group.description);
    }
}

/// Execute the recruiting command
pub async fn recruiting(format: OutputFormat) -> Result<()> {
    let client = load_client()?;
    match catch_server_error(client.get_recruiting_challenges()).await {
        PageProps::Loaded(challenges) => match format {
            OutputFormat::Json => print_json(&challenges)?,
            OutputFormat::Text => output_recruiting(&challenges),
        },
        PageProps::Failed(notice) => print_notice(&notice),
    }
    Ok(())
}

fn output_recruiting(challenges: &[RecruitingChallenge]) {
    if challenges.is_empty() {
        println!("No challenges are recruiting right now.");
        return;
    }

    println!("{:<8} {:<30} {:<8} {:<6} {:>6} START", "ID", "TITLE", "TYPE", "FREE", "PEOPLE");
    println!("{}", "-".repeat(80));
    for challenge in challenges {
        println!(
            "{:<8} {:<30} {:<8} {:<6} {:>6} {}",
            challenge.challenge_group_id,
            truncate(&challenge.group_title, 30),
            challenge.verification_type,
            if challenge.is_free { "yes" } else { "no" },
            challenge.participant_count,
            challenge.start_date
        );
    }
}

/// Execute the cancel command
pub async fn cancel(args: CancelArgs, format: OutputFormat) -> Result<()> {
    let client = load_client()?;
    match client.cancel_participation(args.my_challenge_id).await {
        Ok(ack) => match format {
            OutputFormat::Json => print_json(&ack)?,
            OutputFormat::Text => println!("{}", ack.message),
        },
        Err(e) => {
            tracing::error!("Failed to cancel participation {}: {}", args.my_challenge_id, e);
            print_notice(&ErrorNotice::from_api_error(&e));
        }
    }
    Ok(())
}
