//! Decides whether a teaser record is a protest that closed or opened on the
//! reference date, and normalizes it.

use crate::crawlers::DetailProvider;
use crate::error::Result;
use crate::results::{ProtestRecord, ProtestState, TeaserRecord};

/// Status text the site shows for a protest still under review
pub const CURRENTLY_OPEN: &str = "Case Currently Open";

/// Status stored for a protest that opened on the reference date
pub const OPENED: &str = "Opened";

/// Classifies one teaser record against the reference date
///
/// Returns `Ok(None)` for records that did not change on `reference_date`
/// or that carry neither an outcome nor a status. Closed records only
/// reach the detail page once their decision date matches; open records
/// always need it because the filed date lives there.
pub async fn classify<D: DetailProvider>(
    teaser: &TeaserRecord,
    details: &mut D,
    reference_date: &str,
) -> Result<Option<ProtestRecord>> {
    if let Some(outcome) = &teaser.outcome {
        let decided_date = teaser.decision_date.trim();
        if decided_date != reference_date {
            return Ok(None);
        }

        ::log::info!("Protest updated");
        let decision_url = teaser
            .decision_link
            .as_deref()
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string);
        let detail = details.detail(teaser).await?;

        return Ok(Some(ProtestRecord {
            company: company_name(&teaser.heading),
            case_type: detail.case_type.trim().to_string(),
            status: outcome.trim().to_string(),
            state: ProtestState::Closed {
                decided_date: decided_date.to_string(),
                decision_url,
            },
        }));
    }

    if let Some(status) = &teaser.status {
        let detail = details.detail(teaser).await?;
        let filed_date = detail.filed_date.trim();
        if filed_date != reference_date {
            return Ok(None);
        }

        ::log::info!("Opened protest");
        let status = match status.trim() {
            CURRENTLY_OPEN => OPENED.to_string(),
            other => other.to_string(),
        };

        return Ok(Some(ProtestRecord {
            company: company_name(&teaser.heading),
            case_type: detail.case_type.trim().to_string(),
            status,
            state: ProtestState::Open {
                filed_date: filed_date.to_string(),
                due_date: detail.due_date.trim().to_string(),
            },
        }));
    }

    Ok(None)
}

/// Heading text up to the first " (", e.g. "Acme Corp (B-422681.5)" -> "Acme Corp"
pub fn company_name(heading: &str) -> String {
    heading
        .split(" (")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::memory::StaticDetails;
    use crate::results::DetailRecord;

    const YDAY: &str = "Feb 02, 2024";

    fn closed_teaser(index: usize, decided: &str, decision_link: Option<&str>) -> TeaserRecord {
        TeaserRecord {
            index,
            heading: "Test Company (B-422681.5)".to_string(),
            outcome: Some(" Sustained ".to_string()),
            decision_date: decided.to_string(),
            decision_link: decision_link.map(str::to_string),
            detail_link: Some("/products/b-422681.5".to_string()),
            ..TeaserRecord::default()
        }
    }

    fn open_teaser(index: usize, status: &str) -> TeaserRecord {
        TeaserRecord {
            index,
            heading: "Test Company2 (B-422700.1)".to_string(),
            status: Some(status.to_string()),
            detail_link: Some("/docket/b-422700.1".to_string()),
            ..TeaserRecord::default()
        }
    }

    fn detail(filed: &str) -> DetailRecord {
        DetailRecord {
            case_type: " Bid Protest ".to_string(),
            filed_date: filed.to_string(),
            due_date: " May 13, 2024 ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_closed_on_reference_date() {
        let teaser = closed_teaser(0, YDAY, Some(" /products/b-422681.5 "));
        let mut details = StaticDetails::default().with(0, detail("Nov 01, 2023"));

        let record = classify(&teaser, &mut details, YDAY).await.unwrap().unwrap();
        assert_eq!(record.company, "Test Company");
        assert_eq!(record.case_type, "Bid Protest");
        assert_eq!(record.status, "Sustained");
        assert_eq!(
            record.state,
            ProtestState::Closed {
                decided_date: YDAY.to_string(),
                decision_url: Some("/products/b-422681.5".to_string()),
            }
        );
        assert_eq!(details.fetched, vec![0]);
    }

    #[tokio::test]
    async fn test_closed_without_decision_link() {
        let teaser = closed_teaser(3, YDAY, None);
        let mut details = StaticDetails::default().with(3, detail(YDAY));

        let record = classify(&teaser, &mut details, YDAY).await.unwrap().unwrap();
        assert!(matches!(
            record.state,
            ProtestState::Closed {
                decision_url: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_stale_closed_skips_detail_fetch() {
        let teaser = closed_teaser(0, "Jan 30, 2024", None);
        let mut details = StaticDetails::default().with(0, detail(YDAY));

        assert_eq!(classify(&teaser, &mut details, YDAY).await.unwrap(), None);
        assert!(details.fetched.is_empty());
    }

    #[tokio::test]
    async fn test_open_on_reference_date_normalizes_status() {
        let teaser = open_teaser(1, " Case Currently Open ");
        let mut details = StaticDetails::default().with(1, detail(YDAY));

        let record = classify(&teaser, &mut details, YDAY).await.unwrap().unwrap();
        assert_eq!(record.company, "Test Company2");
        assert_eq!(record.status, OPENED);
        assert_eq!(
            record.state,
            ProtestState::Open {
                filed_date: YDAY.to_string(),
                due_date: "May 13, 2024".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_open_keeps_other_status_text() {
        let teaser = open_teaser(1, "Reconsideration Requested");
        let mut details = StaticDetails::default().with(1, detail(YDAY));

        let record = classify(&teaser, &mut details, YDAY).await.unwrap().unwrap();
        assert_eq!(record.status, "Reconsideration Requested");
    }

    #[tokio::test]
    async fn test_stale_open_still_fetches_detail() {
        let teaser = open_teaser(2, CURRENTLY_OPEN);
        let mut details = StaticDetails::default().with(2, detail("Jan 15, 2024"));

        assert_eq!(classify(&teaser, &mut details, YDAY).await.unwrap(), None);
        assert_eq!(details.fetched, vec![2]);
    }

    #[tokio::test]
    async fn test_neither_signal_is_skipped() {
        let teaser = TeaserRecord {
            index: 4,
            heading: "Withdrawn Co (B-1)".to_string(),
            decision_date: YDAY.to_string(),
            ..TeaserRecord::default()
        };
        let mut details = StaticDetails::default();

        assert_eq!(classify(&teaser, &mut details, YDAY).await.unwrap(), None);
        assert!(details.fetched.is_empty());
    }

    #[tokio::test]
    async fn test_outcome_takes_precedence_over_status() {
        let mut teaser = closed_teaser(0, YDAY, None);
        teaser.status = Some(CURRENTLY_OPEN.to_string());
        let mut details = StaticDetails::default().with(0, detail("Jan 15, 2024"));

        let record = classify(&teaser, &mut details, YDAY).await.unwrap().unwrap();
        assert!(record.is_closed());
    }

    #[tokio::test]
    async fn test_detail_failure_propagates() {
        let teaser = closed_teaser(9, YDAY, None);
        let mut details = StaticDetails::default();

        assert!(classify(&teaser, &mut details, YDAY).await.is_err());
    }

    #[test]
    fn test_company_name() {
        assert_eq!(company_name("Test Company (B-422681.5)"), "Test Company");
        assert_eq!(company_name("  No Docket Number  "), "No Docket Number");
        assert_eq!(company_name("A (B) (C)"), "A");
        assert_eq!(company_name("Paren(Inside) Co"), "Paren(Inside) Co");
    }
}
