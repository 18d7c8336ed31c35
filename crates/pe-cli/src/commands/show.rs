use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::present::print_current;
use crate::context::AppContext;

/// Handle `pereview show`.
pub fn handle(args: &ShowArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(at) = &args.at {
        ctx.session.jump(at)?;
    }
    print_current(ctx, flags)
}
