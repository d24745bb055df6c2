use super::{perform, Ctx};
use attendance_core::{ActionKind, FormValues};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum AdminSubcommand {
    /// Update the admin's phone, email or password
    Update {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// New password (must be repeated with --confirm-password)
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
}

pub fn run(ctx: &Ctx, subcmd: AdminSubcommand) -> anyhow::Result<()> {
    match subcmd {
        AdminSubcommand::Update {
            phone,
            email,
            new_password,
            confirm_password,
        } => {
            let form = FormValues::new()
                .with("phone", phone)
                .with("email", email)
                .with("newPassword", new_password)
                .with("confirmPassword", confirm_password);
            perform(ctx, ActionKind::UpdateAdmin, form)
        }
    }
}
