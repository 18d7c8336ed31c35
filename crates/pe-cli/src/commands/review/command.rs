//! Line commands understood by the interactive session.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use pe_core::enums::PeFinding;

pub const HELP: &str = "\
Commands:
  show                  show the current report and any unsaved draft
  next | n              save the draft, then move to the following report
  prev | p              move to the previous report (unsaved edits are discarded)
  skip | u              move to the next unreviewed report, wrapping to the top
  jump N | j N          move to report N
  pe 0|1                set PE present
  set FIELD VALUE       set confidence, location, acuity, laterality or burden
                        (VALUE 'none' clears the field)
  comment TEXT | c      replace the comments (no TEXT clears them)
  reset                 discard the draft and reload the saved review
  save | s              save the draft
  stats                 show review progress
  help | ?              show this help
  quit | q              leave the session";

/// A draft field editable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Confidence,
    Location,
    Acuity,
    Laterality,
    ClotBurden,
}

impl EditField {
    pub const ALL: [Self; 5] = [
        Self::Confidence,
        Self::Location,
        Self::Acuity,
        Self::Laterality,
        Self::ClotBurden,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confidence => "confidence",
            Self::Location => "location",
            Self::Acuity => "acuity",
            Self::Laterality => "laterality",
            Self::ClotBurden => "burden",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "confidence" => Ok(Self::Confidence),
            "location" => Ok(Self::Location),
            "acuity" => Ok(Self::Acuity),
            "laterality" => Ok(Self::Laterality),
            "burden" | "clot_burden" => Ok(Self::ClotBurden),
            _ => Err(anyhow!(
                "unknown field '{s}' (expected one of: {})",
                Self::ALL.map(Self::as_str).join(", ")
            )),
        }
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Show,
    Next,
    Prev,
    Skip,
    Jump(String),
    Pe(PeFinding),
    Set(EditField, String),
    Comment(String),
    Reset,
    Save,
    Stats,
    Help,
    Quit,
    /// A blank line.
    Nothing,
}

/// Parse one input line.
///
/// # Errors
///
/// Unknown commands and missing or malformed arguments.
pub fn parse(line: &str) -> anyhow::Result<ReplCommand> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ReplCommand::Nothing,
        "show" => ReplCommand::Show,
        "next" | "n" => ReplCommand::Next,
        "prev" | "p" | "back" => ReplCommand::Prev,
        "skip" | "u" => ReplCommand::Skip,
        "jump" | "j" | "goto" => {
            if rest.is_empty() {
                return Err(anyhow!("usage: jump N"));
            }
            ReplCommand::Jump(rest.to_string())
        }
        "pe" => ReplCommand::Pe(rest.parse()?),
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: set FIELD VALUE"))?;
            ReplCommand::Set(field.parse()?, value.trim().to_string())
        }
        "comment" | "c" => ReplCommand::Comment(rest.to_string()),
        "reset" => ReplCommand::Reset,
        "save" | "s" => ReplCommand::Save,
        "stats" => ReplCommand::Stats,
        "help" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => return Err(anyhow!("unknown command '{other}'; type help")),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", ReplCommand::Nothing)]
    #[case("  n  ", ReplCommand::Next)]
    #[case("PREV", ReplCommand::Prev)]
    #[case("j 12", ReplCommand::Jump("12".to_string()))]
    #[case("jump  abc", ReplCommand::Jump("abc".to_string()))]
    #[case("pe 1", ReplCommand::Pe(PeFinding::Present))]
    #[case("pe 0.0", ReplCommand::Pe(PeFinding::Absent))]
    #[case("set burden High", ReplCommand::Set(EditField::ClotBurden, "High".to_string()))]
    #[case("set Clot-Burden low", ReplCommand::Set(EditField::ClotBurden, "low".to_string()))]
    #[case("comment  saddle embolus, see prior ", ReplCommand::Comment("saddle embolus, see prior".to_string()))]
    #[case("comment", ReplCommand::Comment(String::new()))]
    #[case("?", ReplCommand::Help)]
    #[case("exit", ReplCommand::Quit)]
    fn parses_commands(#[case] line: &str, #[case] expected: ReplCommand) {
        assert_eq!(parse(line).unwrap(), expected);
    }

    #[rstest]
    #[case("frobnicate", "unknown command")]
    #[case("jump", "usage: jump N")]
    #[case("pe maybe", "invalid PE Present value")]
    #[case("set location", "usage: set FIELD VALUE")]
    #[case("set size large", "unknown field 'size'")]
    fn rejects_malformed_lines(#[case] line: &str, #[case] message: &str) {
        let err = parse(line).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }
}
