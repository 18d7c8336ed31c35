use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pereview stats`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx.session.stats();
    match flags.format {
        OutputFormat::Table => {
            println!("{stats}");
            Ok(())
        }
        _ => output(&stats, flags.format),
    }
}
