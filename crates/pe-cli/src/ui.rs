//! Terminal presentation preferences, resolved once at startup.
//!
//! Report cards and tables go to stdout, spinners to stderr, so each stream
//! is checked on its own. The interactive session always prints cards, so
//! `--format` does not gate its colour.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};

/// Narrower `COLUMNS` values are ignored; tables fall back to natural width.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiPrefs {
    /// ANSI keyword highlighting in report text and coloured outcome cells.
    pub color: bool,
    /// Loading and saving spinners on stderr.
    pub progress: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    const PLAIN: Self = Self {
        color: false,
        progress: false,
        term_width: None,
    };

    fn resolve(flags: &GlobalFlags, interactive: bool, terminal: &Terminal) -> Self {
        let renders_cards = interactive || flags.format == OutputFormat::Table;
        let color = match flags.color {
            ColorMode::Always => renders_cards,
            ColorMode::Never => false,
            ColorMode::Auto => {
                renders_cards
                    && terminal.stdout_tty
                    && !terminal.no_color
                    && !terminal.dumb
                    && !flags.quiet
            }
        };

        let progress = match flags.progress {
            ProgressMode::On => true,
            ProgressMode::Off => false,
            ProgressMode::Auto => terminal.stderr_tty && !flags.quiet && renders_cards,
        };

        Self {
            color,
            progress,
            term_width: terminal.columns.filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

/// What the process can learn about its terminal.
#[derive(Debug, Default)]
struct Terminal {
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    dumb: bool,
    columns: Option<usize>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            columns: std::env::var("COLUMNS")
                .ok()
                .and_then(|value| value.trim().parse().ok()),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// Resolve preferences for this run. `interactive` is set for `pereview review`.
pub fn init(flags: &GlobalFlags, interactive: bool) {
    let prefs = UiPrefs::resolve(flags, interactive, &Terminal::detect());
    tracing::debug!(?prefs, "ui preferences");
    let _ = UI_PREFS.set(prefs);
}

/// Preferences set by [`init`]; plain output when called before it.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or(UiPrefs::PLAIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet: false,
            verbose: false,
            color,
            progress: ProgressMode::Auto,
            csv: None,
        }
    }

    fn tty() -> Terminal {
        Terminal {
            stdout_tty: true,
            stderr_tty: true,
            columns: Some(120),
            ..Terminal::default()
        }
    }

    #[rstest]
    #[case::table_on_tty(OutputFormat::Table, false, true)]
    #[case::json_never_colours(OutputFormat::Json, false, false)]
    #[case::interactive_ignores_format(OutputFormat::Json, true, true)]
    fn auto_colour_follows_what_is_rendered(
        #[case] format: OutputFormat,
        #[case] interactive: bool,
        #[case] expected: bool,
    ) {
        let prefs = UiPrefs::resolve(&flags(format, ColorMode::Auto), interactive, &tty());
        assert_eq!(prefs.color, expected);
    }

    #[test]
    fn no_color_and_dumb_terminals_stay_plain() {
        let auto = flags(OutputFormat::Table, ColorMode::Auto);
        let no_color = Terminal {
            no_color: true,
            ..tty()
        };
        let dumb = Terminal { dumb: true, ..tty() };
        assert!(!UiPrefs::resolve(&auto, true, &no_color).color);
        assert!(!UiPrefs::resolve(&auto, true, &dumb).color);

        let forced = flags(OutputFormat::Table, ColorMode::Always);
        assert!(UiPrefs::resolve(&forced, false, &dumb).color);
    }

    #[test]
    fn piped_output_has_no_spinner_and_ignores_narrow_columns() {
        let piped = Terminal {
            columns: Some(20),
            ..Terminal::default()
        };
        let prefs = UiPrefs::resolve(&flags(OutputFormat::Table, ColorMode::Auto), false, &piped);
        assert_eq!(prefs, UiPrefs::PLAIN);
    }
}
