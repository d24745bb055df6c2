use super::{perform, Ctx};
use attendance_core::{ActionKind, FormValues};
use clap::Subcommand;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TeacherSubcommand {
    /// Remove a teacher (asks for confirmation unless --yes)
    Remove {
        /// Teacher id, email or name
        #[arg(long)]
        search: Option<String>,
        /// Reason code (e.g. resigned, transferred, other)
        #[arg(long)]
        reason: Option<String>,
        /// Free-text reason
        #[arg(long)]
        reason_text: Option<String>,
    },

    /// Look up a teacher and show their details
    Search {
        /// Teacher id, email or name
        query: Option<String>,
    },

    /// Update a teacher's details
    Update {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Bluetooth device id
        #[arg(long)]
        device_id: Option<String>,
    },

    /// Set a new password for a teacher
    ChangePassword {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
    },

    /// List teachers without a Bluetooth device id
    MissingDevices,

    /// Assign a Bluetooth device id, then refresh the missing list
    AssignDevice {
        #[arg(long)]
        teacher_id: Option<String>,
        #[arg(long)]
        device_id: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(ctx: &Ctx, subcmd: TeacherSubcommand) -> anyhow::Result<()> {
    let (kind, form) = match subcmd {
        TeacherSubcommand::Remove {
            search,
            reason,
            reason_text,
        } => (
            ActionKind::RemoveTeacher,
            FormValues::new()
                .with("search", search)
                .with("reason", reason)
                .with("reasonText", reason_text),
        ),
        TeacherSubcommand::Search { query } => (
            ActionKind::SearchTeacher,
            FormValues::new().with("query", query),
        ),
        TeacherSubcommand::Update {
            search,
            name,
            email,
            phone,
            device_id,
        } => (
            ActionKind::UpdateTeacher,
            FormValues::new()
                .with("search", search)
                .with("name", name)
                .with("email", email)
                .with("phone", phone)
                .with("bluetoothDeviceId", device_id),
        ),
        TeacherSubcommand::ChangePassword {
            email,
            new_password,
        } => (
            ActionKind::ChangeTeacherPassword,
            FormValues::new()
                .with("email", email)
                .with("newPassword", new_password),
        ),
        TeacherSubcommand::MissingDevices => (ActionKind::ListMissingDevices, FormValues::new()),
        TeacherSubcommand::AssignDevice {
            teacher_id,
            device_id,
        } => (
            ActionKind::AssignDevice,
            FormValues::new()
                .with("teacherId", teacher_id)
                .with("bluetoothId", device_id),
        ),
    };
    perform(ctx, kind, form)
}
