use clap::{Args, Subcommand};
use pe_core::enums::{Acuity, ClotBurden, Confidence, Laterality, Location, PeFinding};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show a report with its reference predictions and current review.
    Show(ShowArgs),
    /// Find the next unreviewed report, wrapping to the top.
    Next(NextArgs),
    /// Review progress for the dataset.
    Stats,
    /// Save a review for one report.
    Commit(CommitArgs),
    /// Review reports interactively, one at a time.
    Review(ReviewArgs),
    /// Print the resolved configuration.
    Config,
}

impl Commands {
    /// Whether the command may rewrite the dataset.
    #[must_use]
    pub const fn writes_dataset(&self) -> bool {
        matches!(self, Self::Commit(_) | Self::Review(_))
    }
}

/// Arguments for `pereview show`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Report number to show (1-based); defaults to the first unreviewed report.
    #[arg(long, value_name = "N")]
    pub at: Option<String>,
}

/// Arguments for `pereview next`.
#[derive(Clone, Debug, Args)]
pub struct NextArgs {
    /// Search after this report number (1-based), wrapping; without it the first unreviewed report is shown.
    #[arg(long, value_name = "N")]
    pub from: Option<String>,
}

/// Arguments for `pereview commit`.
#[derive(Clone, Debug, Args)]
pub struct CommitArgs {
    /// Report number to review (1-based).
    #[arg(long, value_name = "N")]
    pub at: String,
    /// PE present: 1 or 0.
    #[arg(long)]
    pub pe: Option<PeFinding>,
    /// Reviewer confidence: high, medium, low.
    #[arg(long)]
    pub confidence: Option<Confidence>,
    /// Central, Segmental, Subsegmental, Multiple, Unknown.
    #[arg(long)]
    pub location: Option<Location>,
    /// Acute, Chronic, Acute-on-chronic, Unknown.
    #[arg(long)]
    pub acuity: Option<Acuity>,
    /// Right, Left, Bilateral, Unknown.
    #[arg(long)]
    pub laterality: Option<Laterality>,
    /// High, Low, Unknown.
    #[arg(long)]
    pub clot_burden: Option<ClotBurden>,
    /// Free-text comments.
    #[arg(long, default_value = "")]
    pub comments: String,
}

/// Arguments for `pereview review`.
#[derive(Clone, Debug, Args)]
pub struct ReviewArgs {
    /// Start at this report number (1-based) instead of the first unreviewed.
    #[arg(long, value_name = "N")]
    pub at: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pe_core::enums::{Acuity, ClotBurden, Confidence, PeFinding};
    use pretty_assertions::assert_eq;

    use crate::cli::{Cli, Commands};

    #[test]
    fn commit_parses_vocabulary_case_insensitively() {
        let cli = Cli::try_parse_from([
            "pereview",
            "commit",
            "--at",
            "3",
            "--pe",
            "1",
            "--confidence",
            "HIGH",
            "--acuity",
            "acute-on-chronic",
            "--clot-burden",
            "low",
            "--comments",
            "reviewed twice",
        ])
        .expect("cli should parse");

        let Commands::Commit(args) = cli.command else {
            panic!("expected commit");
        };
        assert_eq!(args.at, "3");
        assert_eq!(args.pe, Some(PeFinding::Present));
        assert_eq!(args.confidence, Some(Confidence::High));
        assert_eq!(args.acuity, Some(Acuity::AcuteOnChronic));
        assert_eq!(args.clot_burden, Some(ClotBurden::Low));
        assert_eq!(args.location, None);
        assert_eq!(args.comments, "reviewed twice");
    }

    #[test]
    fn commit_rejects_out_of_vocabulary_value() {
        let parsed = Cli::try_parse_from(["pereview", "commit", "--at", "1", "--location", "Lobar"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn commit_requires_report_number() {
        assert!(Cli::try_parse_from(["pereview", "commit", "--pe", "0"]).is_err());
    }

    #[test]
    fn only_commit_and_review_write() {
        let commit = Cli::try_parse_from(["pereview", "commit", "--at", "1"]).unwrap();
        let review = Cli::try_parse_from(["pereview", "review"]).unwrap();
        let show = Cli::try_parse_from(["pereview", "show", "--at", "2"]).unwrap();
        assert!(commit.command.writes_dataset());
        assert!(review.command.writes_dataset());
        assert!(!show.command.writes_dataset());
    }
}
