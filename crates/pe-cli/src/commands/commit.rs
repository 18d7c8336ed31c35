use anyhow::Context;
use pe_core::{ReviewPayload, Violation};
use pe_session::{CommitOutcome, ReviewStats};
use serde::Serialize;

use crate::cli::root_commands::CommitArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct CommitResponse<'a> {
    report: usize,
    outcome: &'static str,
    violations: &'a [Violation],
    progress: ReviewStats,
}

fn payload_from(args: &CommitArgs) -> ReviewPayload {
    ReviewPayload {
        pe_present: args.pe,
        location: args.location,
        acuity: args.acuity,
        laterality: args.laterality,
        clot_burden: args.clot_burden,
        confidence: args.confidence,
        comments: args.comments.clone(),
    }
}

/// Handle `pereview commit`.
///
/// Exits non-zero unless the review was saved; JSON callers still receive
/// the violation list on stdout.
pub fn handle(args: &CommitArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let position = ctx.session.jump(&args.at)?;
    let report = position + 1;

    let spinner = Progress::spinner("Saving review");
    let outcome = ctx.session.commit(&payload_from(args));
    spinner.finish_clear();

    let violations: &[Violation] = match &outcome {
        CommitOutcome::Rejected(violations) => violations,
        _ => &[],
    };
    let response = CommitResponse {
        report,
        outcome: outcome.as_str(),
        violations,
        progress: ctx.session.stats(),
    };

    match (&outcome, flags.format) {
        (CommitOutcome::Committed, OutputFormat::Table) => {
            println!("Report {report}: {outcome}. {}", response.progress);
        }
        (CommitOutcome::Committed | CommitOutcome::Rejected(_), _) => {
            output(&response, flags.format)?;
        }
        _ => {}
    }

    match outcome {
        CommitOutcome::Committed => Ok(()),
        CommitOutcome::Failed(error) => Err(error)
            .with_context(|| format!("report {report} was not saved to {}", ctx.dataset_path.display())),
        rejected @ (CommitOutcome::Rejected(_) | CommitOutcome::NoCurrentRecord) => {
            anyhow::bail!("report {report}: {rejected}")
        }
    }
}
