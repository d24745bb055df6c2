use super::Ctx;
use crate::output::print_json;
use attendance_core::config::WarnLevel;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(ctx: &Ctx, subcmd: ConfigSubcommand) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(ctx),
        ConfigSubcommand::Validate => validate(ctx),
    }
}

fn show(ctx: &Ctx) -> anyhow::Result<()> {
    let cfg = &ctx.config;
    if ctx.json {
        return print_json(cfg);
    }
    println!("base_url                   {}", cfg.base_url);
    println!("api_base                   {}", cfg.api_base);
    println!("request_timeout_secs       {}", cfg.request_timeout_secs);
    println!("notification_dismiss_secs  {}", cfg.notification_dismiss_secs);
    Ok(())
}

fn validate(ctx: &Ctx) -> anyhow::Result<()> {
    let warnings = ctx.config.validate();

    if ctx.json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
