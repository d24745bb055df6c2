use super::{perform, Ctx};
use attendance_core::{ActionKind, FormValues};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum StudentSubcommand {
    /// List students of one branch / year / division with attendance
    Fetch {
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        division: Option<String>,
    },

    /// Block a student's attendance until a date
    Block {
        /// Student id, email or name
        #[arg(long)]
        search: Option<String>,
        /// Last blocked day (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        reason_text: Option<String>,
    },

    /// Look up a student and show their details
    Search {
        /// Student id, email or name
        query: Option<String>,
    },

    /// Update a student's details
    Update {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        division: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove a student (asks for confirmation unless --yes)
    Remove {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        reason_text: Option<String>,
    },
}

pub fn run(ctx: &Ctx, subcmd: StudentSubcommand) -> anyhow::Result<()> {
    let (kind, form) = match subcmd {
        StudentSubcommand::Fetch {
            branch,
            year,
            division,
        } => (
            ActionKind::FetchStudents,
            FormValues::new()
                .with("branch", branch)
                .with("year", year)
                .with("division", division),
        ),
        StudentSubcommand::Block {
            search,
            until,
            reason,
            reason_text,
        } => (
            ActionKind::BlockAttendance,
            FormValues::new()
                .with("studentSearch", search)
                .with("blockUntilDate", until)
                .with("reason", reason)
                .with("reasonText", reason_text),
        ),
        StudentSubcommand::Search { query } => (
            ActionKind::SearchStudent,
            FormValues::new().with("query", query),
        ),
        StudentSubcommand::Update {
            search,
            branch,
            year,
            division,
            phone,
            email,
            password,
        } => (
            ActionKind::UpdateStudent,
            FormValues::new()
                .with("search", search)
                .with("newBranch", branch)
                .with("newYear", year)
                .with("newDivision", division)
                .with("newPhone", phone)
                .with("newEmail", email)
                .with("newPassword", password),
        ),
        StudentSubcommand::Remove {
            search,
            reason,
            reason_text,
        } => (
            ActionKind::RemoveStudent,
            FormValues::new()
                .with("studentSearch", search)
                .with("reason", reason)
                .with("reasonText", reason_text),
        ),
    };
    perform(ctx, kind, form)
}
