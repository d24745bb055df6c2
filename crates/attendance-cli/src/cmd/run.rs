use super::{perform, Ctx};
use crate::output::{print_json, print_table};
use anyhow::Context;
use attendance_core::{ActionKind, FormValues};

/// `run <action> -f key=value ...`: any action, raw field names.
pub fn run(ctx: &Ctx, action: &str, fields: &[String]) -> anyhow::Result<()> {
    let kind: ActionKind = action.parse().map_err(anyhow::Error::msg)?;
    let mut form = FormValues::new();
    form.extend_assignments(fields)
        .context("fields must be given as key=value")?;
    perform(ctx, kind, form)
}

/// `actions`: the action table.
pub fn list(ctx: &Ctx) -> anyhow::Result<()> {
    let descriptors: Vec<_> = ActionKind::all().iter().map(|k| k.descriptor()).collect();

    if ctx.json {
        return print_json(&descriptors);
    }

    let rows = descriptors
        .iter()
        .map(|d| {
            vec![
                d.kind.to_string(),
                d.method.as_str().to_string(),
                d.endpoint.to_string(),
                d.payload_fields.join(","),
                d.required_fields.join(","),
                if d.confirmation_prompt.is_some() { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    print_table(
        &["ACTION", "METHOD", "ENDPOINT", "FIELDS", "REQUIRED", "CONFIRM"],
        rows,
    );
    Ok(())
}
