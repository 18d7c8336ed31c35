use pe_session::{NextUnreviewed, ReviewStats};
use serde::Serialize;

use crate::cli::root_commands::NextArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::present::print_current;
use crate::context::AppContext;
use crate::output::output;

const ALL_REVIEWED: &str = "All reports have been reviewed.";

#[derive(Debug, Serialize)]
struct NoneRemaining {
    status: &'static str,
    progress: ReviewStats,
}

/// Handle `pereview next`.
///
/// With `--from N` the search starts after report N and wraps. Without it
/// the session's starting record (the first unreviewed) is the answer,
/// unless every record is reviewed.
pub fn handle(args: &NextArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let found = match &args.from {
        Some(from) => {
            ctx.session.jump(from)?;
            ctx.session.next_unreviewed()
        }
        None => match (ctx.session.position(), ctx.session.current()) {
            (Some(position), Some(record)) if !record.is_reviewed() => {
                NextUnreviewed::Found(position)
            }
            _ => NextUnreviewed::NoneRemaining,
        },
    };

    match found {
        NextUnreviewed::Found(_) => print_current(ctx, flags),
        NextUnreviewed::NoneRemaining => match flags.format {
            OutputFormat::Table => {
                println!("{ALL_REVIEWED} {}", ctx.session.stats());
                Ok(())
            }
            _ => output(
                &NoneRemaining {
                    status: "none_remaining",
                    progress: ctx.session.stats(),
                },
                flags.format,
            ),
        },
    }
}
