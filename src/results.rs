use serde::{Deserialize, Serialize};

/// One search-results summary entry, as rendered on the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeaserRecord {
    /// Position within the search results
    pub index: usize,

    /// Heading text, e.g. "Acme Corp (B-422681.5)"
    pub heading: String,

    /// Outcome text; present only for decided protests
    pub outcome: Option<String>,

    /// Status text; present only for open protests
    pub status: Option<String>,

    /// Decision date text shown on the teaser
    pub decision_date: String,

    /// Href of the published decision, when one is linked
    pub decision_link: Option<String>,

    /// Href of the record's own detail page
    pub detail_link: Option<String>,
}

/// Fields only available on a record's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub case_type: String,
    pub filed_date: String,
    pub due_date: String,
}

/// Closed or open, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProtestState {
    Closed {
        decided_date: String,
        decision_url: Option<String>,
    },
    Open {
        filed_date: String,
        due_date: String,
    },
}

/// A protest that changed state on the reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtestRecord {
    pub company: String,
    pub case_type: String,
    pub status: String,
    pub state: ProtestState,
}

impl ProtestRecord {
    pub fn is_closed(&self) -> bool {
        matches!(self.state, ProtestState::Closed { .. })
    }
}

/// Activity found for one tracked solicitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolicitationResult {
    pub solicitation_no: String,
    pub solicitation_name: String,
    pub search_url: String,
    pub records: Vec<ProtestRecord>,

    /// 1-based position among solicitations that had activity
    pub display_index: usize,
}

/// A search results page reduced to its teaser records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub url: String,
    pub teasers: Vec<TeaserRecord>,
}

impl SearchPage {
    /// Number of teasers carrying an outcome and a status, in that order
    pub fn counts(&self) -> (usize, usize) {
        let closed = self.teasers.iter().filter(|t| t.outcome.is_some()).count();
        let open = self.teasers.iter().filter(|t| t.status.is_some()).count();
        (closed, open)
    }
}
