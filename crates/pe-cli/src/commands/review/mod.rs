//! `pereview review`: an interactive, line-driven review session.
//!
//! The reviewer edits a [`Draft`] of the current record and saves it with
//! `save` (or `next`, which saves before moving). Moving away from a record
//! with unsaved edits discards them and says so. A review whose save failed
//! to write stays in memory and is reported as unwritten until a later save
//! succeeds.

pub mod command;
pub mod draft;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use pe_session::{Advance, NextUnreviewed, ReviewSession};

use self::command::{HELP, ReplCommand};
use self::draft::Draft;
use crate::cli::root_commands::ReviewArgs;
use crate::commands::shared::present::EMPTY_DATASET;
use crate::context::AppContext;
use crate::view::{RecordView, render_card, review_summary};

const PROMPT: &str = "pereview> ";
const ALL_REVIEWED: &str = "All reports have been reviewed.";

/// Handle `pereview review` on the process's stdin and stdout.
pub fn handle(args: &ReviewArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    if let Some(at) = &args.at {
        ctx.session.jump(at)?;
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(stdin.lock(), stdout.lock(), ctx)
}

/// Drive the session from `input` until `quit` or end of input.
///
/// # Errors
///
/// Only I/O failures on `input` or `out` end the session early. Invalid
/// commands, rejected saves and failed writes are reported and the session
/// continues.
pub fn run<R: BufRead, W: Write>(input: R, out: W, ctx: &mut AppContext) -> anyhow::Result<()> {
    let mut repl = Repl::new(ctx, out);
    if repl.ctx.session.current().is_none() {
        writeln!(repl.out, "{EMPTY_DATASET}")?;
        return Ok(());
    }
    repl.show()?;

    let mut lines = input.lines();
    loop {
        write!(repl.out, "{PROMPT}")?;
        repl.out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(repl.out)?;
            repl.report_discarded()?;
            break;
        };
        let line = line.context("failed to read command")?;

        match command::parse(&line) {
            Ok(command) => {
                if repl.step(command)? == Flow::Quit {
                    break;
                }
            }
            Err(error) => writeln!(repl.out, "{error:#}")?,
        }
    }

    writeln!(repl.out, "{}", repl.ctx.session.stats())?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Repl<'a, W> {
    ctx: &'a mut AppContext,
    out: W,
    draft: Draft,
    quit_armed: bool,
}

impl<'a, W: Write> Repl<'a, W> {
    fn new(ctx: &'a mut AppContext, out: W) -> Self {
        let draft = Draft::load(ctx.session.current());
        Self {
            ctx,
            out,
            draft,
            quit_armed: false,
        }
    }

    fn session(&mut self) -> &mut ReviewSession {
        &mut self.ctx.session
    }

    fn report_number(&self) -> usize {
        self.ctx.session.position().map_or(0, |position| position + 1)
    }

    fn step(&mut self, command: ReplCommand) -> anyhow::Result<Flow> {
        if command != ReplCommand::Quit {
            self.quit_armed = false;
        }

        match command {
            ReplCommand::Nothing => {}
            ReplCommand::Show => self.show()?,
            ReplCommand::Next => self.save_and_advance()?,
            ReplCommand::Prev => {
                if !self.navigate(|session| {
                    session.retreat();
                })? {
                    writeln!(self.out, "Already at the first report.")?;
                }
            }
            ReplCommand::Skip => self.skip()?,
            ReplCommand::Jump(target) => {
                let mut failure = None;
                self.navigate(|session| {
                    if let Err(error) = session.jump(&target) {
                        failure = Some(error);
                    }
                })?;
                if let Some(error) = failure {
                    writeln!(self.out, "{error}")?;
                }
            }
            ReplCommand::Pe(finding) => {
                self.draft.set_pe(finding);
                self.edited()?;
            }
            ReplCommand::Set(field, value) => match self.draft.set(field, &value) {
                Ok(()) => self.edited()?,
                Err(error) => writeln!(self.out, "{error:#}")?,
            },
            ReplCommand::Comment(text) => {
                self.draft.set_comment(&text);
                self.edited()?;
            }
            ReplCommand::Reset => {
                self.reload_draft();
                self.session().discard_edit();
                if self.current_unwritten() {
                    writeln!(
                        self.out,
                        "Draft reset to the review held in memory; it is not written to disk yet."
                    )?;
                } else {
                    writeln!(self.out, "Draft reset to the saved review.")?;
                }
            }
            ReplCommand::Save => {
                if self.save()? && self.ctx.config.review.auto_advance {
                    self.skip()?;
                }
            }
            ReplCommand::Stats => writeln!(self.out, "{}", self.ctx.session.stats())?,
            ReplCommand::Help => writeln!(self.out, "{HELP}")?,
            ReplCommand::Quit => {
                let at_risk = self.ctx.session.is_dirty() || self.ctx.session.has_unwritten();
                if at_risk && !self.quit_armed {
                    self.quit_armed = true;
                    if self.ctx.session.has_unwritten() {
                        writeln!(
                            self.out,
                            "Reviews for report {} are not written to {}. Type save to retry or quit again to lose them.",
                            self.unwritten_reports(),
                            self.ctx.dataset_path.display()
                        )?;
                    } else {
                        writeln!(
                            self.out,
                            "Report {} has unsaved changes. Type save to keep them or quit again to discard them.",
                            self.report_number()
                        )?;
                    }
                } else {
                    self.report_discarded()?;
                    return Ok(Flow::Quit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> anyhow::Result<()> {
        if let Some(view) = RecordView::current(&self.ctx.session) {
            let card = render_card(&view, &self.ctx.style);
            writeln!(self.out, "{card}")?;
        }
        if self.current_unwritten() {
            writeln!(self.out, "This review is held in memory and not written to disk yet.")?;
        }
        if self.ctx.session.is_dirty() {
            write!(self.out, "{}", review_summary(self.draft.payload(), "Draft"))?;
        }
        Ok(())
    }

    fn current_unwritten(&self) -> bool {
        self.ctx
            .session
            .position()
            .is_some_and(|position| self.ctx.session.is_unwritten(position))
    }

    /// 1-based numbers of the unwritten reports, comma separated.
    fn unwritten_reports(&self) -> String {
        self.ctx
            .session
            .unwritten()
            .map(|position| (position + 1).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn edited(&mut self) -> anyhow::Result<()> {
        self.session().mark_dirty();
        write!(self.out, "{}", review_summary(self.draft.payload(), "Draft"))?;
        Ok(())
    }

    fn reload_draft(&mut self) {
        self.draft = Draft::load(self.ctx.session.current());
    }

    /// Run a navigation and, if the cursor moved, announce any discarded
    /// edit and show the new record. Returns whether the cursor moved.
    fn navigate(&mut self, nav: impl FnOnce(&mut ReviewSession)) -> anyhow::Result<bool> {
        let from = self.ctx.session.position();
        let was_dirty = self.ctx.session.is_dirty();

        nav(self.session());

        if self.ctx.session.position() == from {
            return Ok(false);
        }
        if let (true, Some(from)) = (was_dirty, from) {
            if self.ctx.session.is_unwritten(from) {
                writeln!(
                    self.out,
                    "Report {}: review held in memory but not written to disk; the next successful save writes it.",
                    from + 1
                )?;
            } else {
                writeln!(self.out, "Unsaved changes to report {} discarded.", from + 1)?;
            }
        }
        self.reload_draft();
        self.show()?;
        Ok(true)
    }

    fn skip(&mut self) -> anyhow::Result<()> {
        let mut found = NextUnreviewed::NoneRemaining;
        self.navigate(|session| found = session.next_unreviewed())?;
        if found == NextUnreviewed::NoneRemaining {
            let current_unreviewed = self.ctx.session.current().is_some_and(|r| !r.is_reviewed());
            if current_unreviewed {
                writeln!(self.out, "No other unreviewed reports.")?;
            } else {
                writeln!(self.out, "{ALL_REVIEWED} {}", self.ctx.session.stats())?;
            }
        }
        Ok(())
    }

    fn save_and_advance(&mut self) -> anyhow::Result<()> {
        if self.ctx.session.is_dirty() && !self.save()? {
            return Ok(());
        }
        let mut moved = Advance::EndOfDataset;
        self.navigate(|session| moved = session.advance())?;
        if moved == Advance::EndOfDataset {
            writeln!(self.out, "Reached the last report.")?;
        }
        Ok(())
    }

    /// Commit the draft. Returns whether it was saved.
    fn save(&mut self) -> anyhow::Result<bool> {
        let report = self.report_number();
        let outcome = self.ctx.session.commit(self.draft.payload());

        if outcome.is_committed() {
            self.reload_draft();
            writeln!(
                self.out,
                "Report {report}: {outcome}. {}",
                self.ctx.session.stats()
            )?;
        } else {
            writeln!(self.out, "Report {report}: {outcome}")?;
        }
        Ok(outcome.is_committed())
    }

    fn report_discarded(&mut self) -> anyhow::Result<()> {
        if self.ctx.session.has_unwritten() {
            let reports = self.unwritten_reports();
            tracing::warn!(reports = %reports, "session ended with unwritten reviews");
            writeln!(
                self.out,
                "Reviews for report {reports} were never written to {} and are lost.",
                self.ctx.dataset_path.display()
            )?;
        }
        if self.ctx.session.is_dirty() && !self.current_unwritten() {
            tracing::warn!(report = self.report_number(), "session ended with unsaved edit");
            writeln!(
                self.out,
                "Unsaved changes to report {} discarded.",
                self.report_number()
            )?;
        }
        Ok(())
    }
}
