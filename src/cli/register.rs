// ABOUTME: CLI register command - interactive member registration wizard
//
// Reads one answer per line. "back" returns to the previous step (and leaves
// the wizard from step 1); end of input abandons the registration.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, BufRead, Write};

use super::util::{load_client, print_json};
use super::OutputFormat;
use crate::api::MemberApi;
use crate::navigation::{HistoryNavigator, Navigator, Route};
use crate::register::{
    is_birth_year_valid, nickname_validity, BackEffect, Gender, NicknameValidity, RegisterPatch,
    RegistrationStep, RegistrationWizard, SubmitOutcome,
};

/// How the interactive wizard ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardExit {
    Registered,
    Cancelled,
    InputClosed,
}

/// Execute the register command
pub async fn execute(format: OutputFormat) -> Result<()> {
    let client = load_client()?;
    let navigator = HistoryNavigator::with_history(&[Route::Home, Route::Register]);
    let mut wizard = RegistrationWizard::new(client, navigator);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let exit = run_wizard(&mut wizard, &mut input, &mut output).await?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "result": exit,
            "route": wizard.navigator().current(),
        }))?,
        OutputFormat::Text => match exit {
            WizardExit::Registered => println!("Welcome to WAVED, {}!", wizard.flow().record().nickname),
            WizardExit::Cancelled => println!("Registration cancelled."),
            WizardExit::InputClosed => println!("Registration abandoned."),
        },
    }
    Ok(())
}

fn step_prompt(step: RegistrationStep) -> &'static str {
    match step {
        RegistrationStep::TermAgreement => "Agree to the terms of service? [y/n]: ",
        RegistrationStep::Privacy => "Birth year and optional gender (e.g. 1995 female): ",
        RegistrationStep::Nickname => "Nickname (1-10 characters): ",
        RegistrationStep::JobTitle => "Job title: ",
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Drive the wizard from line-based input until it finishes or input ends
pub async fn run_wizard<A, N, R, W>(
    wizard: &mut RegistrationWizard<A, N>,
    input: &mut R,
    output: &mut W,
) -> Result<WizardExit>
where
    A: MemberApi,
    N: Navigator,
    R: BufRead,
    W: Write,
{
    loop {
        let step = wizard.flow().step();
        writeln!(
            output,
            "({}/{}) {}",
            step.number(),
            RegistrationStep::total(),
            step.guide()
        )?;
        write!(output, "{}", step_prompt(step))?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(WizardExit::InputClosed);
        };

        if answer.eq_ignore_ascii_case("back") {
            if wizard.go_to_previous_step().await == BackEffect::ExitWizard {
                return Ok(WizardExit::Cancelled);
            }
            continue;
        }

        match step {
            RegistrationStep::TermAgreement => {
                let agreed = matches!(answer.to_lowercase().as_str(), "y" | "yes");
                wizard.update_register_data(RegisterPatch::default().with_term_agreement(agreed));
                if !wizard.go_to_next_step() {
                    writeln!(output, "You must accept the terms of service to continue.")?;
                }
            }
            RegistrationStep::Privacy => {
                let mut parts = answer.split_whitespace();
                let birth_year = parts.next().unwrap_or_default();
                if !is_birth_year_valid(birth_year) {
                    writeln!(output, "Enter a four digit birth year.")?;
                    continue;
                }
                let gender = match parts.next() {
                    None => None,
                    Some(raw) => match Gender::parse(raw) {
                        Some(gender) => Some(gender),
                        None => {
                            writeln!(output, "Gender must be male or female.")?;
                            continue;
                        }
                    },
                };
                wizard.update_register_data(
                    RegisterPatch::default()
                        .with_birth_year(birth_year)
                        .with_gender(gender),
                );
                wizard.go_to_next_step();
            }
            RegistrationStep::Nickname => {
                wizard.update_register_data(RegisterPatch::default().with_nickname(answer.as_str()));
                let validity = nickname_validity(&answer);
                if validity != NicknameValidity::Valid {
                    writeln!(output, "{}", validity.message())?;
                    continue;
                }
                wizard.go_to_next_step();
            }
            RegistrationStep::JobTitle => {
                // Empty answer resubmits whatever job title is already recorded
                if !answer.is_empty() {
                    wizard.update_register_data(
                        RegisterPatch::default().with_job_title(answer.as_str()),
                    );
                }
                match wizard.submit_member_info().await {
                    SubmitOutcome::Submitted => return Ok(WizardExit::Registered),
                    SubmitOutcome::Failed(message) => {
                        writeln!(output, "Registration failed: {message}")?;
                        writeln!(output, "Press enter to retry or type back to edit.")?;
                    }
                    SubmitOutcome::NotReady => writeln!(output, "Enter your job title to finish.")?,
                    SubmitOutcome::AlreadyInFlight => {}
                }
            }
        }
    }
}
