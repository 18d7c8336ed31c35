use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed dataset command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Show(args) => commands::show::handle(args, ctx, flags),
        Commands::Next(args) => commands::next::handle(args, ctx, flags),
        Commands::Stats => commands::stats::handle(ctx, flags),
        Commands::Commit(args) => commands::commit::handle(args, ctx, flags),
        Commands::Review(args) => commands::review::handle(args, ctx),
        Commands::Config => unreachable!("config is pre-dispatched in main"),
    }
}
