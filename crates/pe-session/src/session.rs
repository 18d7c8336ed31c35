use std::collections::BTreeSet;

use pe_core::{Dataset, Record, ReviewPayload, validate};
use pe_store::{CsvStore, LoadError};

use crate::agreement::{AgreementVerdict, agreement};
use crate::commit::{CommitOutcome, apply};
use crate::cursor::{self, Advance, Cursor, NextUnreviewed};
use crate::error::NavigationError;
use crate::stats::{ReviewStats, stats};

/// One reviewer's session over one dataset.
///
/// Owns the in-memory dataset, the store it was loaded from, the cursor and
/// the dirty flag. [`ReviewSession::commit`] is the only path that mutates a
/// record or writes the file.
///
/// `dirty` tracks the reviewer's draft of the current record. `unwritten`
/// tracks records whose review was applied in memory by a commit whose write
/// failed; only a later successful write clears it, since every write
/// rewrites the whole dataset.
#[derive(Debug)]
pub struct ReviewSession {
    store: CsvStore,
    dataset: Dataset,
    cursor: Cursor,
    dirty: bool,
    unwritten: BTreeSet<usize>,
}

impl ReviewSession {
    /// Load the dataset and place the cursor on the first unreviewed record.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the dataset cannot be read.
    pub fn open(store: CsvStore) -> Result<Self, LoadError> {
        let dataset = store.load()?;
        Ok(Self::new(store, dataset))
    }

    /// Start a session over an already loaded dataset.
    #[must_use]
    pub fn new(store: CsvStore, dataset: Dataset) -> Self {
        let start = cursor::first_unreviewed(dataset.records());
        let cursor = Cursor::new(dataset.len(), start);
        tracing::debug!(records = dataset.len(), start, "review session started");
        Self {
            store,
            dataset,
            cursor,
            dirty: false,
            unwritten: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &CsvStore {
        &self.store
    }

    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// 0-based position of the current record, `None` for an empty dataset.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.cursor.current()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Record> {
        self.position().and_then(|position| self.dataset.get(position))
    }

    /// Whether an edit for the current record has not been committed.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether any applied review is missing from the file on disk.
    #[must_use]
    pub fn has_unwritten(&self) -> bool {
        !self.unwritten.is_empty()
    }

    /// 0-based positions whose applied review has not been written yet.
    pub fn unwritten(&self) -> impl Iterator<Item = usize> + '_ {
        self.unwritten.iter().copied()
    }

    #[must_use]
    pub fn is_unwritten(&self, position: usize) -> bool {
        self.unwritten.contains(&position)
    }

    /// Record that the reviewer changed the draft for the current record.
    pub const fn mark_dirty(&mut self) {
        if self.cursor.current().is_some() {
            self.dirty = true;
        }
    }

    /// Drop the uncommitted draft for the current record without moving.
    ///
    /// A review already applied by a failed commit stays in memory and stays
    /// unwritten; only the draft is dropped.
    pub fn discard_edit(&mut self) {
        if self.dirty {
            tracing::debug!(position = ?self.position(), "uncommitted edit reset");
            self.dirty = false;
        }
    }

    #[must_use]
    pub fn first_unreviewed(&self) -> usize {
        cursor::first_unreviewed(self.dataset.records())
    }

    /// Move to the next unreviewed record after the current one, wrapping.
    ///
    /// Leaves the cursor in place when nothing remains.
    pub fn next_unreviewed(&mut self) -> NextUnreviewed {
        let Some(from) = self.position() else {
            return NextUnreviewed::NoneRemaining;
        };
        let found = cursor::next_unreviewed(self.dataset.records(), from);
        if let NextUnreviewed::Found(position) = found {
            self.cursor.move_to(position);
            self.discard_draft(from);
        }
        found
    }

    pub fn advance(&mut self) -> Advance {
        let from = self.cursor.current();
        let moved = self.cursor.advance();
        if let (Some(from), Advance::Moved(_)) = (from, moved) {
            self.discard_draft(from);
        }
        moved
    }

    pub fn retreat(&mut self) -> Option<usize> {
        let from = self.position()?;
        let position = self.cursor.retreat();
        self.discard_draft(from);
        Some(position)
    }

    /// Jump to a 1-based report number typed by the reviewer.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` without moving when the input is not a
    /// number or is out of range.
    pub fn jump(&mut self, input: &str) -> Result<usize, NavigationError> {
        let from = self.position();
        let position = self.cursor.jump(input)?;
        if let Some(from) = from {
            self.discard_draft(from);
        }
        Ok(position)
    }

    /// Validate, apply and persist a review of the current record.
    ///
    /// The dirty flag is cleared only when the write succeeds. A failed write
    /// keeps the in-memory edit; committing again retries the full rewrite.
    pub fn commit(&mut self, payload: &ReviewPayload) -> CommitOutcome {
        let Some(position) = self.position() else {
            return CommitOutcome::NoCurrentRecord;
        };

        let violations = validate(payload);
        if !violations.is_empty() {
            tracing::debug!(position, violations = violations.len(), "commit rejected");
            return CommitOutcome::Rejected(violations);
        }

        let Some(record) = self.dataset.get_mut(position) else {
            return CommitOutcome::NoCurrentRecord;
        };
        apply(&mut record.review, payload);
        self.dirty = true;

        match self.store.persist(&self.dataset) {
            Ok(()) => {
                self.dirty = false;
                if !self.unwritten.is_empty() {
                    tracing::info!(
                        records = self.unwritten.len(),
                        "earlier unwritten reviews written"
                    );
                    self.unwritten.clear();
                }
                tracing::info!(position, "review committed");
                CommitOutcome::Committed
            }
            Err(error) => {
                self.unwritten.insert(position);
                tracing::warn!(position, %error, "review kept in memory, persist failed");
                CommitOutcome::Failed(error)
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> ReviewStats {
        stats(self.dataset.records())
    }

    /// Agreement verdict for the current record.
    #[must_use]
    pub fn agreement(&self) -> Option<AgreementVerdict> {
        self.current().and_then(agreement)
    }

    fn discard_draft(&mut self, from: usize) {
        if self.dirty && self.position() != Some(from) {
            if self.unwritten.contains(&from) {
                tracing::warn!(position = from, "left record whose review is not written yet");
            } else {
                tracing::warn!(position = from, "uncommitted edit discarded");
            }
            self.dirty = false;
        }
    }
}
