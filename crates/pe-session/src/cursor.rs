//! The reviewer's position in the dataset.
//!
//! Positions are 0-based; report numbers shown to the reviewer are 1-based.
//! An empty dataset has no current position.

use pe_core::Record;
use serde::Serialize;

use crate::error::NavigationError;

/// Result of searching for the next unreviewed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "position")]
pub enum NextUnreviewed {
    Found(usize),
    /// Every record other than the starting one has been reviewed.
    NoneRemaining,
}

/// Result of stepping forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "position")]
pub enum Advance {
    Moved(usize),
    /// Already at the last record; forward navigation does not wrap.
    EndOfDataset,
}

/// Index of the first unreviewed record, or 0 when review is complete.
#[must_use]
pub fn first_unreviewed(records: &[Record]) -> usize {
    records
        .iter()
        .position(|record| !record.is_reviewed())
        .unwrap_or(0)
}

/// Search forward from `from + 1`, then wrap to `0..from`.
///
/// The record at `from` itself is never a candidate.
#[must_use]
pub fn next_unreviewed(records: &[Record], from: usize) -> NextUnreviewed {
    let len = records.len();
    (from.saturating_add(1)..len)
        .chain(0..from.min(len))
        .find(|&index| !records[index].is_reviewed())
        .map_or(NextUnreviewed::NoneRemaining, NextUnreviewed::Found)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    len: usize,
}

impl Cursor {
    /// A cursor over `len` records starting at `position` (clamped into range).
    #[must_use]
    pub const fn new(len: usize, position: usize) -> Self {
        let position = if len == 0 {
            0
        } else if position >= len {
            len - 1
        } else {
            position
        };
        Self { position, len }
    }

    /// Current position, `None` for an empty dataset.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.position)
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn advance(&mut self) -> Advance {
        if self.position + 1 < self.len {
            self.position += 1;
            Advance::Moved(self.position)
        } else {
            Advance::EndOfDataset
        }
    }

    /// Step back one record; a no-op at position 0.
    pub const fn retreat(&mut self) -> usize {
        self.position = self.position.saturating_sub(1);
        self.position
    }

    /// Move to a 1-based report number given as text.
    ///
    /// # Errors
    ///
    /// `NotANumber` when the trimmed input is not an integer, `OutOfRange`
    /// when it is below 1 or above the dataset length. The cursor does not
    /// move on error.
    pub fn jump(&mut self, input: &str) -> Result<usize, NavigationError> {
        let trimmed = input.trim();
        let target = trimmed
            .parse::<i64>()
            .map_err(|_| NavigationError::NotANumber(trimmed.to_string()))?;

        let position = usize::try_from(target)
            .ok()
            .filter(|&n| n >= 1 && n <= self.len)
            .map(|n| n - 1)
            .ok_or(NavigationError::OutOfRange {
                target,
                len: self.len,
            })?;

        self.position = position;
        Ok(position)
    }

    /// Move to a position already known to be valid (e.g. from `next_unreviewed`).
    pub(crate) const fn move_to(&mut self, position: usize) {
        if position < self.len {
            self.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::dataset;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&["1", "0", "", ""], 2)]
    #[case(&["", "1"], 0)]
    #[case(&["1", "0", "1"], 0)]
    #[case(&[], 0)]
    fn first_unreviewed_is_minimum_index_or_zero(#[case] pe: &[&str], #[case] expected: usize) {
        assert_eq!(first_unreviewed(dataset(pe).records()), expected);
    }

    #[test]
    fn next_unreviewed_wraps_around() {
        let data = dataset(&["1", "0", "1", "", "1"]);
        assert_eq!(next_unreviewed(data.records(), 4), NextUnreviewed::Found(3));
    }

    #[test]
    fn next_unreviewed_prefers_forward_match() {
        let data = dataset(&["", "1", "", "1", ""]);
        assert_eq!(next_unreviewed(data.records(), 2), NextUnreviewed::Found(4));
        assert_eq!(next_unreviewed(data.records(), 4), NextUnreviewed::Found(0));
    }

    #[test]
    fn next_unreviewed_skips_starting_record() {
        let data = dataset(&["1", "", "1"]);
        assert_eq!(
            next_unreviewed(data.records(), 1),
            NextUnreviewed::NoneRemaining
        );
    }

    #[test]
    fn next_unreviewed_on_empty_dataset() {
        let data = dataset(&[]);
        assert_eq!(
            next_unreviewed(data.records(), 0),
            NextUnreviewed::NoneRemaining
        );
    }

    #[test]
    fn advance_stops_at_end() {
        let mut cursor = Cursor::new(2, 0);
        assert_eq!(cursor.advance(), Advance::Moved(1));
        assert_eq!(cursor.advance(), Advance::EndOfDataset);
        assert_eq!(cursor.current(), Some(1));
    }

    #[test]
    fn retreat_is_noop_at_start() {
        let mut cursor = Cursor::new(3, 1);
        assert_eq!(cursor.retreat(), 0);
        assert_eq!(cursor.retreat(), 0);
    }

    #[rstest]
    #[case("0")]
    #[case("9999")]
    #[case("-3")]
    #[case("11")]
    fn jump_out_of_range(#[case] input: &str) {
        let mut cursor = Cursor::new(10, 2);
        assert!(matches!(
            cursor.jump(input),
            Err(NavigationError::OutOfRange { len: 10, .. })
        ));
        assert_eq!(cursor.current(), Some(2));
    }

    #[rstest]
    #[case("five")]
    #[case("")]
    #[case("2.5")]
    fn jump_not_a_number(#[case] input: &str) {
        let mut cursor = Cursor::new(10, 2);
        assert!(matches!(
            cursor.jump(input),
            Err(NavigationError::NotANumber(_))
        ));
        assert_eq!(cursor.current(), Some(2));
    }

    #[test]
    fn jump_converts_to_zero_based() {
        let mut cursor = Cursor::new(10, 0);
        assert_eq!(cursor.jump(" 5 "), Ok(4));
        assert_eq!(cursor.current(), Some(4));
        assert_eq!(cursor.jump("10"), Ok(9));
    }

    #[test]
    fn empty_cursor_has_no_position() {
        let mut cursor = Cursor::new(0, 0);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.advance(), Advance::EndOfDataset);
        assert!(matches!(
            cursor.jump("1"),
            Err(NavigationError::OutOfRange { target: 1, len: 0 })
        ));
    }
}
