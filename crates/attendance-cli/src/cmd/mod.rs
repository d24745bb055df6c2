pub mod admin;
pub mod branches;
pub mod config;
pub mod run;
pub mod student;
pub mod teacher;

use crate::output::{print_json, print_notification, print_section, section_json};
use crate::prompt::StdinConfirm;
use anyhow::Context;
use attendance_core::{ActionKind, AdminConsole, AssumeYes, ConsoleConfig, FormValues, Outcome};

/// Settings shared by every subcommand.
pub struct Ctx {
    pub config: ConsoleConfig,
    pub json: bool,
    pub assume_yes: bool,
}

/// Run one action against the backend and print what it left on screen.
///
/// Fails (exit 1) when the action failed; the notification explaining why
/// has already been printed.
pub fn perform(ctx: &Ctx, kind: ActionKind, mut form: FormValues) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let mut console =
        AdminConsole::new(ctx.config.clone()).context("failed to build HTTP client")?;

    let result = rt.block_on(async {
        if ctx.assume_yes {
            console.run(kind, &mut form, &AssumeYes).await
        } else {
            console.run(kind, &mut form, &StdinConfirm).await
        }
    });
    let notification = console.ui().notifications.current();

    if ctx.json {
        let (outcome, status, error) = match &result {
            Ok(Outcome::Completed(p)) => ("completed", Some(p.status), None),
            Ok(Outcome::Cancelled) => ("cancelled", None, None),
            Ok(Outcome::Busy) => ("busy", None, None),
            Err(e) => ("failed", None, Some(e.kind())),
        };
        print_json(&serde_json::json!({
            "action": kind,
            "outcome": outcome,
            "status": status,
            "error": error,
            "notification": notification,
            "view": section_json(kind, console.view())?,
        }))?;
    } else {
        if matches!(result, Ok(Outcome::Completed(_))) {
            print_section(kind, console.view());
        }
        match (&result, &notification) {
            (Ok(Outcome::Cancelled), _) => eprintln!("Cancelled."),
            (_, Some(event)) => print_notification(event),
            _ => {}
        }
    }

    match result {
        Ok(Outcome::Busy) => anyhow::bail!("another action is still running"),
        Ok(_) => Ok(()),
        Err(e) => anyhow::bail!("{kind} failed ({})", e.kind()),
    }
}
