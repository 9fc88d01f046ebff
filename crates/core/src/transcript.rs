//! Speaker attribution for generated transcripts.
//!
//! Transcripts arrive as plain dialogue where each turn is usually prefixed with `Agent:` or
//! `Customer:`. Lines are attributed by prefix (case-insensitive) and everything else is passed
//! through untouched.

use serde::Serialize;

const AGENT_PREFIX: &str = "agent:";
const CUSTOMER_PREFIX: &str = "customer:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Agent,
    Customer,
}

/// One non-blank line of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    /// Who is speaking, if the line carries a recognised prefix
    pub speaker: Option<Speaker>,
    /// Speaker label as written in the source (for example `AGENT`)
    pub label: Option<String>,
    /// Spoken text, or the whole line when no speaker was recognised
    pub content: String,
}

impl TranscriptLine {
    pub fn css_class(&self) -> &'static str {
        match self.speaker {
            Some(Speaker::Agent) => "transcript-line agent-line",
            Some(Speaker::Customer) => "transcript-line customer-line",
            None => "transcript-line",
        }
    }
}

/// Splits a transcript into attributed lines, dropping blank lines.
///
/// Content after the first colon is trimmed; later colons (timestamps, URLs) are kept.
pub fn format_transcript(text: &str) -> Vec<TranscriptLine> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(format_line)
        .collect()
}

fn format_line(line: &str) -> TranscriptLine {
    let lowered = line.to_lowercase();
    let speaker = if lowered.starts_with(AGENT_PREFIX) {
        Some(Speaker::Agent)
    } else if lowered.starts_with(CUSTOMER_PREFIX) {
        Some(Speaker::Customer)
    } else {
        None
    };

    match (speaker, line.split_once(':')) {
        (Some(speaker), Some((label, rest))) => TranscriptLine {
            speaker: Some(speaker),
            label: Some(label.to_string()),
            content: rest.trim().to_string(),
        },
        _ => TranscriptLine {
            speaker: None,
            label: None,
            content: line.to_string(),
        },
    }
}

/// Renders attributed lines back to text, one per line.
pub fn render_transcript(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| match &line.label {
            Some(label) => format!("{}: {}", label, line.content),
            None => line.content.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_speakers() {
        let lines = format_transcript("Agent: Hello, how can I help?\nCustomer: My bill is wrong.");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].speaker, Some(Speaker::Agent));
        assert_eq!(lines[0].label.as_deref(), Some("Agent"));
        assert_eq!(lines[0].content, "Hello, how can I help?");
        assert_eq!(lines[1].speaker, Some(Speaker::Customer));
        assert_eq!(lines[1].css_class(), "transcript-line customer-line");
    }

    #[test]
    fn test_prefix_is_case_insensitive_and_label_kept() {
        let lines = format_transcript("AGENT:   Thanks for waiting");
        assert_eq!(lines[0].speaker, Some(Speaker::Agent));
        assert_eq!(lines[0].label.as_deref(), Some("AGENT"));
        assert_eq!(lines[0].content, "Thanks for waiting");
    }

    #[test]
    fn test_later_colons_are_kept() {
        let lines = format_transcript("Customer: I called at 10:30: twice");
        assert_eq!(lines[0].content, "I called at 10:30: twice");
    }

    #[test]
    fn test_other_lines_pass_through_and_blanks_drop() {
        let lines = format_transcript("[Call connected]\n\n   \n  Agent: indented\nSupervisor: hi");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].speaker, None);
        assert_eq!(lines[0].content, "[Call connected]");
        assert_eq!(lines[1].speaker, None);
        assert_eq!(lines[1].content, "  Agent: indented");
        assert_eq!(lines[2].css_class(), "transcript-line");
    }

    #[test]
    fn test_render_transcript() {
        let lines = format_transcript("agent:hi\n[hold music]\nCustomer: ok");
        assert_eq!(render_transcript(&lines), "agent: hi\n[hold music]\nCustomer: ok");
    }
}
