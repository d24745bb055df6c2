mod cmd;
mod output;
mod prompt;
mod settings;

use clap::{Parser, Subcommand};
use cmd::{
    admin::AdminSubcommand, config::ConfigSubcommand, student::StudentSubcommand,
    teacher::TeacherSubcommand, Ctx,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "attendance-admin",
    about = "Admin console for the attendance system: teachers, students and devices",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./attendance-admin.yaml, then ~/.config/attendance-admin/config.yaml)
    #[arg(long, global = true, env = "ATTENDANCE_CONFIG")]
    config: Option<PathBuf>,

    /// Backend URL, overrides the config file (e.g. http://localhost:5000)
    #[arg(long, global = true, env = "ATTENDANCE_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds, overrides the config file
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    /// Show info-level logs (use RUST_LOG=debug for per-request detail)
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the admin profile
    Admin {
        #[command(subcommand)]
        subcommand: AdminSubcommand,
    },

    /// Manage teachers and their Bluetooth devices
    Teacher {
        #[command(subcommand)]
        subcommand: TeacherSubcommand,
    },

    /// Manage students and attendance blocks
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },

    /// List branch / year / division choices
    Branches,

    /// Run any action by name with raw form fields
    Run {
        /// Action name (e.g. remove_teacher, fetch-students)
        action: String,

        /// Form field as key=value (repeatable)
        #[arg(long = "field", short = 'f', value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// List every action with its endpoint and required fields
    Actions,

    /// Inspect the console configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = settings::load_config(cli.config.as_deref(), cli.base_url, cli.timeout)
        .and_then(|config| {
            let ctx = Ctx {
                config,
                json: cli.json,
                assume_yes: cli.yes,
            };
            match cli.command {
                Commands::Admin { subcommand } => cmd::admin::run(&ctx, subcommand),
                Commands::Teacher { subcommand } => cmd::teacher::run(&ctx, subcommand),
                Commands::Student { subcommand } => cmd::student::run(&ctx, subcommand),
                Commands::Branches => cmd::branches::run(&ctx),
                Commands::Run { action, fields } => cmd::run::run(&ctx, &action, &fields),
                Commands::Actions => cmd::run::list(&ctx),
                Commands::Config { subcommand } => cmd::config::run(&ctx, subcommand),
            }
        });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
