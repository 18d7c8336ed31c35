//! Keyword highlighting for report text.

use regex::{Regex, RegexBuilder};

const HIGHLIGHT_ON: &str = "\u{1b}[1;33m";
const HIGHLIGHT_OFF: &str = "\u{1b}[0m";
const BOUNDARY: &str = r"\b";

/// Case-insensitive keyword matcher.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Build a matcher for `keywords`. Longer keywords win over keywords they
    /// contain, so "pulmonary embolism" is marked as one span.
    ///
    /// Keywords match inside words ("emboli" in "embolic") unless they carry
    /// a leading or trailing `\b`, as the default `\bPE\b` does.
    ///
    /// # Errors
    ///
    /// Fails if the combined pattern exceeds the regex size limit.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let mut terms = keywords
            .iter()
            .filter_map(|keyword| Term::parse(keyword.as_ref()))
            .collect::<Vec<_>>();
        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }
        terms.sort_by_key(|term| std::cmp::Reverse(term.text.len()));
        terms.dedup();

        let alternation = terms
            .iter()
            .map(Term::pattern)
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!("(?:{alternation})"))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// A highlighter that matches nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { pattern: None }
    }

    /// Wrap every keyword occurrence in bold yellow.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, format!("{HIGHLIGHT_ON}$0{HIGHLIGHT_OFF}").as_str())
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// Keyword spans as byte ranges, in order.
    #[cfg(test)]
    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        self.pattern.as_ref().map_or_else(Vec::new, |pattern| {
            pattern.find_iter(text).map(|m| (m.start(), m.end())).collect()
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Term<'a> {
    text: &'a str,
    leading: bool,
    trailing: bool,
}

impl<'a> Term<'a> {
    fn parse(keyword: &'a str) -> Option<Self> {
        let keyword = keyword.trim();
        let (leading, rest) = keyword
            .strip_prefix(BOUNDARY)
            .map_or((false, keyword), |rest| (true, rest));
        let (trailing, text) = rest
            .strip_suffix(BOUNDARY)
            .map_or((false, rest), |text| (true, text));
        let text = text.trim();
        (!text.is_empty()).then_some(Self {
            text,
            leading,
            trailing,
        })
    }

    fn pattern(&self) -> String {
        let edge = |pinned: bool| if pinned { BOUNDARY } else { "" };
        format!(
            "{}{}{}",
            edge(self.leading),
            regex::escape(self.text),
            edge(self.trailing)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Highlighter;
    use pe_config::DEFAULT_KEYWORDS;
    use pretty_assertions::assert_eq;

    fn matched<'a>(highlighter: &Highlighter, text: &'a str) -> Vec<&'a str> {
        highlighter
            .spans(text)
            .into_iter()
            .map(|(start, end)| &text[start..end])
            .collect()
    }

    #[test]
    fn longest_keyword_wins() {
        let highlighter = Highlighter::new(&DEFAULT_KEYWORDS).unwrap();
        assert_eq!(
            matched(&highlighter, "Acute Pulmonary Embolism with thrombus."),
            vec!["Pulmonary Embolism", "thrombus"]
        );
    }

    #[test]
    fn boundaries_apply_only_where_marked() {
        let highlighter = Highlighter::new(&DEFAULT_KEYWORDS).unwrap();
        assert_eq!(
            matched(&highlighter, "Peripheral PE; type PERFUSION; emboli."),
            vec!["PE", "emboli"]
        );
        assert_eq!(
            matched(&highlighter, "Embolic shower, thrombi-like, no pe."),
            vec!["Emboli", "thrombi", "pe"]
        );
    }

    #[test]
    fn trailing_boundary_alone() {
        let highlighter = Highlighter::new(&[r"clot\b"]).unwrap();
        assert_eq!(matched(&highlighter, "clots, clot."), vec!["clot"]);
        assert_eq!(matched(&highlighter, "a mini-clot"), vec!["clot"]);
    }

    #[test]
    fn apply_wraps_in_ansi() {
        let highlighter = Highlighter::new(&["embolus"]).unwrap();
        assert_eq!(
            highlighter.apply("Small embolus."),
            "Small \u{1b}[1;33membolus\u{1b}[0m."
        );
    }

    #[test]
    fn keywords_are_escaped() {
        let highlighter = Highlighter::new(&["a+b"]).unwrap();
        assert!(highlighter.spans("aab").is_empty());
    }

    #[test]
    fn empty_list_matches_nothing() {
        let empty: [&str; 2] = ["", r"\b\b"];
        let highlighter = Highlighter::new(&empty).unwrap();
        assert_eq!(highlighter.apply("embolus"), "embolus");
        assert!(Highlighter::disabled().spans("PE").is_empty());
    }
}
