// ABOUTME: CLI verify command - submit text, photo or link proof for a challenge

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::util::{load_client, print_json, print_notice};
use super::{OutputFormat, VerifyArgs};
use crate::api::VerificationType;
use crate::navigation::{HistoryNavigator, Route};
use crate::verification::{
    load_quiz, submit_verification, Attachment, VerificationDraft, VerificationOutcome,
    VerificationTarget,
};

/// Build the draft from command-line arguments
fn draft_from_args(args: &VerifyArgs, verification_type: VerificationType) -> Result<VerificationDraft> {
    let mut draft = VerificationDraft::new(verification_type);
    draft.text = args.text.clone().unwrap_or_default();
    draft.link = args.link.clone().unwrap_or_default();
    if let Some(path) = &args.file {
        draft.file = Some(read_attachment(path)?);
    }
    Ok(draft)
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read photo from {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Attachment { file_name, bytes })
}

/// Execute the verify command
pub async fn execute(args: VerifyArgs, format: OutputFormat) -> Result<()> {
    let verification_type = VerificationType::from_query(args.verification_type.as_deref());
    let target = VerificationTarget {
        challenge_group_id: args.group_id.clone(),
        my_challenge_id: args.my_challenge_id.clone(),
        verification_type,
    };
    let draft = draft_from_args(&args, verification_type)?;

    let client = load_client()?;
    if let Some(prompt) = load_quiz(&client, &target).await {
        println!("Q.{}", prompt.question);
        if let Some(notice) = &prompt.notice {
            print_notice(notice);
        }
    }

    if !draft.is_ready() {
        match verification_type {
            VerificationType::Text => bail!("--text is required for TEXT verifications"),
            VerificationType::Picture => bail!("--file is required for PICTURE verifications"),
            VerificationType::Link => bail!("--link must be a valid http(s) URL"),
        }
    }

    let navigator = HistoryNavigator::with_history(&[Route::ChallengeGroup {
        challenge_group_id: target.challenge_group_id.clone(),
    }]);
    let outcome = submit_verification(&client, &navigator, &target, &draft).await;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "result": outcome,
            "route": navigator.current(),
        }))?,
        OutputFormat::Text => match &outcome {
            VerificationOutcome::Submitted => println!("Verification submitted."),
            VerificationOutcome::Duplicate => println!("You have already verified today."),
            VerificationOutcome::Failed(message) => println!("Verification failed: {message}"),
        },
    }
    Ok(())
}
