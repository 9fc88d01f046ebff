//! Text rendering of parsed analysis reports.
//!
//! Produces a Markdown view of an [`AnalysisReport`]: metric badges, tag lists for issues and
//! actions, bullet lists for outcomes and performance notes, and the summary paragraph. When the
//! report carries no usable structure the raw analysis text is appended verbatim so nothing the
//! backend returned is hidden.

use crate::analysis::AnalysisReport;
use cc_types::CsatScore;

/// Renders `report` as Markdown, falling back to `raw` when the report is unstructured.
///
/// A CSAT of zero is treated as absent for both the badge and the fallback decision, matching
/// how scores have always been displayed.
pub fn render_report(report: &AnalysisReport, raw: &str) -> String {
    let mut output = String::new();
    let shown_csat = report.csat.filter(|score| score.value() > 0);

    let badges = badges(shown_csat, report.fcr);
    if !badges.is_empty() {
        output.push_str(&badges.join(" "));
        output.push_str("\n\n");
    }

    if !report.issues.is_empty() {
        push_tags(&mut output, "Issues Identified", &report.issues);
    }
    if !report.actions.is_empty() {
        push_tags(&mut output, "Actions Taken", &report.actions);
    }
    if !report.outcomes.is_empty() {
        push_bullets(&mut output, "Outcomes", &report.outcomes);
    }
    if !report.performance_notes.is_empty() {
        push_bullets(&mut output, "Agent Performance", &report.performance_notes);
    }
    if !report.summary.is_empty() {
        output.push_str("## Summary\n\n");
        output.push_str(report.summary_text());
        output.push_str("\n\n");
    }

    if shown_csat.is_none() && report.issues.is_empty() {
        output.push_str(raw);
        if !raw.ends_with('\n') {
            output.push('\n');
        }
    }

    output
}

fn badges(csat: Option<CsatScore>, fcr: Option<bool>) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(score) = csat {
        badges.push(format!(
            "**CSAT: {}/{}** `{}`",
            score,
            CsatScore::SCALE_MAX,
            score.band().css_class()
        ));
    }
    if let Some(resolved) = fcr {
        let (text, class) = if resolved {
            ("Yes", "fcr-yes")
        } else {
            ("No", "fcr-no")
        };
        badges.push(format!("**FCR: {}** `{}`", text, class));
    }
    badges
}

fn push_tags(output: &mut String, title: &str, items: &[String]) {
    output.push_str(&format!("## {}\n\n", title));
    let tags = items
        .iter()
        .map(|item| format!("[{}]", item))
        .collect::<Vec<_>>()
        .join(" ");
    output.push_str(&tags);
    output.push_str("\n\n");
}

fn push_bullets(output: &mut String, title: &str, items: &[String]) {
    output.push_str(&format!("## {}\n\n", title));
    for item in items {
        output.push_str(&format!("- {}\n", item));
    }
    output.push('\n');
}
