use serde_json::json;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::view::{RecordView, render_card};

pub const EMPTY_DATASET: &str = "The dataset has no reports.";

/// Print the session's current record as a card or as JSON.
pub fn print_current(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(view) = RecordView::current(&ctx.session) else {
        return match flags.format {
            OutputFormat::Table => {
                println!("{EMPTY_DATASET}");
                Ok(())
            }
            _ => output(&json!({ "report": null, "total": 0 }), flags.format),
        };
    };

    match flags.format {
        OutputFormat::Table => {
            println!("{}", render_card(&view, &ctx.style));
            Ok(())
        }
        _ => output(&view, flags.format),
    }
}
