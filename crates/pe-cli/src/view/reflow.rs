//! Paragraph reflow for raw report text.
//!
//! Reports arrive as one run-on block. Upper-case section headers followed by
//! a colon (`FINDINGS:`, `IMPRESSION:`, `CLINICAL HISTORY:`) start a new
//! paragraph.

use std::sync::LazyLock;

use regex::Regex;

static SECTION_HEADER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,}[A-Z\s]*?):").ok());

static EXTRA_BLANK_LINES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n{3,}").ok());

/// Insert a blank line before each section header, collapse runs of blank
/// lines to one, and trim.
#[must_use]
pub fn reflow(text: &str) -> String {
    let (Some(header), Some(blank)) = (SECTION_HEADER.as_ref(), EXTRA_BLANK_LINES.as_ref()) else {
        return text.trim().to_string();
    };

    let spaced = header.replace_all(text, "\n\n${1}:");
    blank.replace_all(&spaced, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::reflow;
    use pretty_assertions::assert_eq;

    #[test]
    fn headers_start_paragraphs() {
        let text = "CLINICAL HISTORY: dyspnea. FINDINGS: Filling defect. IMPRESSION: Acute PE.";
        assert_eq!(
            reflow(text),
            "CLINICAL HISTORY: dyspnea. \n\nFINDINGS: Filling defect. \n\nIMPRESSION: Acute PE."
        );
    }

    #[test]
    fn existing_blank_lines_collapse() {
        let text = "Intro.\n\n\n\nFINDINGS: none";
        assert_eq!(reflow(text), "Intro.\n\nFINDINGS: none");
    }

    #[test]
    fn mixed_case_labels_are_untouched() {
        let text = "Comparison: none. Technique: CTA.";
        assert_eq!(reflow(text), text);
    }

    #[test]
    fn single_capital_is_not_a_header() {
        assert_eq!(reflow("Grade A: mild"), "Grade A: mild");
    }
}
