use super::{perform, Ctx};
use attendance_core::{ActionKind, FormValues};

pub fn run(ctx: &Ctx) -> anyhow::Result<()> {
    perform(ctx, ActionKind::ListBranches, FormValues::new())
}
