//! Turns aggregated results into the text blocks of the Teams card.

use crate::results::{ProtestRecord, ProtestState, SolicitationResult};
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Prefix for decision links, which the site renders as relative paths
pub const DECISION_ORIGIN: &str = "https://www.gao.gov";

/// One Adaptive Card text block; always wrapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBlock {
    text: String,
}

impl DisplayBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn spacer() -> Self {
        Self::new("")
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Serialize for DisplayBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut block = serializer.serialize_struct("TextBlock", 3)?;
        block.serialize_field("type", "TextBlock")?;
        block.serialize_field("text", &self.text)?;
        block.serialize_field("wrap", &true)?;
        block.end()
    }
}

/// Formats the report: a dated header, then one block per solicitation,
/// each followed by a spacer. No results means no blocks at all.
pub fn format_results(results: &[SolicitationResult], today: NaiveDate) -> Vec<DisplayBlock> {
    if results.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&SolicitationResult> = results.iter().collect();
    ordered.sort_by_key(|result| result.display_index);

    let mut blocks = Vec::with_capacity(2 + 2 * results.len());
    blocks.push(DisplayBlock::new(header(today)));
    blocks.push(DisplayBlock::spacer());

    for result in ordered {
        blocks.push(DisplayBlock::new(solicitation_text(result)));
        blocks.push(DisplayBlock::spacer());
    }

    blocks
}

/// e.g. "**Saturday, 02/03/2024.** Protest updates."
pub fn header(today: NaiveDate) -> String {
    format!("**{}.** Protest updates.", today.format("%A, %m/%d/%Y"))
}

fn solicitation_text(result: &SolicitationResult) -> String {
    let mut content = format!(
        "**{}. {} - Solicitation {} - [View updates]({})**",
        result.display_index, result.solicitation_name, result.solicitation_no, result.search_url
    );

    for record in &result.records {
        content.push_str("\n\n");
        content.push_str(&record_line(record));
    }

    content
}

/// Closed records print their outcome; open records always say "Opened"
fn record_line(record: &ProtestRecord) -> String {
    match &record.state {
        ProtestState::Closed {
            decided_date,
            decision_url,
        } => {
            let mut line = format!(
                "- {} **|** {} {} **|** Decided {}",
                record.company, record.case_type, record.status, decided_date
            );
            if let Some(path) = decision_url {
                line.push_str(&format!(
                    " **|** [View decision]({}{})",
                    DECISION_ORIGIN, path
                ));
            }
            line
        }
        ProtestState::Open {
            filed_date,
            due_date,
        } => format!(
            "- {} **|** {} Opened **|** Filed {} **|** Due {}",
            record.company, record.case_type, filed_date, due_date
        ),
    }
}
