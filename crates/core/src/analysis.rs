//! Analysis report parsing.
//!
//! The analysis backend returns a free-text report with loosely structured sections:
//!
//! ```text
//! ISSUES IDENTIFIED
//! - billing error
//! - long wait
//! ACTIONS TO RESOLVE
//! - refund issued
//! PREDICTED CSAT
//! 4 out of 5
//! FCR
//! true
//! OVERALL
//! The customer left satisfied.
//! ```
//!
//! [`parse_report`] buckets the lines of such a report into an [`AnalysisReport`]. Parsing is
//! total: text without recognisable structure yields an empty report and callers are expected to
//! fall back to showing the raw text (see [`AnalysisReport::is_unstructured`]).
//!
//! Matching rules are deliberately loose and must stay compatible with existing reports:
//! - Section headers are detected by case-sensitive substring anywhere in the trimmed line, so
//!   a bullet mentioning `OUTCOMES` mid-sentence switches section.
//! - The CSAT score is the first decimal digit on the line, so `"Score: 10"` yields `1`.

use crate::constants::{
    ACTIONS_MARKER, CSAT_MARKER, FCR_MARKER, ISSUES_MARKER, OUTCOMES_MARKER, PERFORMANCE_MARKER,
    SUMMARY_MARKER,
};
use cc_types::CsatScore;
use serde::Serialize;

/// Logical section of an analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Issues,
    Actions,
    Outcomes,
    Csat,
    Fcr,
    Performance,
    Summary,
}

/// Header markers in priority order. The first marker contained in a line wins.
const SECTION_MARKERS: [(&str, Section); 7] = [
    (ISSUES_MARKER, Section::Issues),
    (ACTIONS_MARKER, Section::Actions),
    (OUTCOMES_MARKER, Section::Outcomes),
    (CSAT_MARKER, Section::Csat),
    (FCR_MARKER, Section::Fcr),
    (PERFORMANCE_MARKER, Section::Performance),
    (SUMMARY_MARKER, Section::Summary),
];

impl Section {
    /// Returns the section whose marker appears in `line`, if any.
    pub fn from_header(line: &str) -> Option<Self> {
        SECTION_MARKERS
            .iter()
            .find(|(marker, _)| line.contains(marker))
            .map(|(_, section)| *section)
    }
}

/// Structured view of one analysis report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Issues raised by the customer, in source order
    pub issues: Vec<String>,
    /// Actions the agent took to resolve the issues
    pub actions: Vec<String>,
    /// Outcomes of the interaction
    pub outcomes: Vec<String>,
    /// Predicted customer satisfaction, if a score line was found
    pub csat: Option<CsatScore>,
    /// First call resolution, if an FCR line was found
    pub fcr: Option<bool>,
    /// Notes on agent performance
    pub performance_notes: Vec<String>,
    /// Summary lines, each followed by a single space
    pub summary: String,
}

impl AnalysisReport {
    /// Parses a report. Equivalent to [`parse_report`].
    pub fn parse(text: &str) -> Self {
        parse_report(text)
    }

    /// True when neither a CSAT score nor any issue was recognised.
    ///
    /// Renderers show the raw report text in this case.
    pub fn is_unstructured(&self) -> bool {
        self.csat.is_none() && self.issues.is_empty()
    }

    /// True when no field received any content.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
            && self.actions.is_empty()
            && self.outcomes.is_empty()
            && self.performance_notes.is_empty()
            && self.csat.is_none()
            && self.fcr.is_none()
            && self.summary.is_empty()
    }

    /// Summary without the trailing separator.
    pub fn summary_text(&self) -> &str {
        self.summary.trim()
    }
}

/// Parses a free-text analysis report into an [`AnalysisReport`].
///
/// Lines are processed in order with a single current section:
/// - a line containing a section marker switches section and contributes nothing else
/// - a bullet line (`-` or `•`) is appended to the issues, actions, outcomes or performance list
/// - a plain line sets the CSAT score or FCR flag, or extends the summary
///
/// Anything that does not fit the current section is dropped.
pub fn parse_report(text: &str) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    let mut current: Option<Section> = None;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if let Some(section) = Section::from_header(trimmed) {
            current = Some(section);
            continue;
        }

        if let Some(content) = strip_bullet(trimmed) {
            match current {
                Some(Section::Issues) => report.issues.push(content.to_string()),
                Some(Section::Actions) => report.actions.push(content.to_string()),
                Some(Section::Outcomes) => report.outcomes.push(content.to_string()),
                Some(Section::Performance) => report.performance_notes.push(content.to_string()),
                _ => {}
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        match current {
            Some(Section::Csat) => {
                if let Some(score) = trimmed.chars().find_map(first_digit) {
                    report.csat = Some(score);
                }
            }
            Some(Section::Fcr) => {
                report.fcr = Some(trimmed.to_lowercase().contains("true"));
            }
            Some(Section::Summary) => {
                report.summary.push_str(trimmed);
                report.summary.push(' ');
            }
            _ => {}
        }
    }

    report
}

/// Strips one leading bullet character and trims the remainder.
fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .map(str::trim)
}

fn first_digit(c: char) -> Option<CsatScore> {
    if c.is_ascii_digit() {
        CsatScore::from_digit(c)
    } else {
        None
    }
}
