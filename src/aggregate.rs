//! Runs the search and classification for every tracked solicitation and
//! keeps the ones with activity.

use crate::classify::classify;
use crate::crawlers::{ProtestSource, SearchSession};
use crate::error::{Result, WatchError};
use crate::results::{ProtestRecord, SolicitationResult};

/// A tracked solicitation, parsed from "number:name"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolicitationEntry {
    pub number: String,
    pub name: String,
}

impl SolicitationEntry {
    /// Splits on the first ':' and trims both halves
    pub fn parse(entry: &str) -> Result<Self> {
        let (number, name) = entry
            .split_once(':')
            .ok_or_else(|| WatchError::Entry(entry.to_string()))?;
        Ok(Self {
            number: number.trim().to_string(),
            name: name.trim().to_string(),
        })
    }
}

/// Parses a comma-separated list of entries; an empty list yields nothing
pub fn parse_entries(list: &str) -> Result<Vec<SolicitationEntry>> {
    if list.is_empty() {
        return Ok(Vec::new());
    }
    list.split(',').map(SolicitationEntry::parse).collect()
}

/// Searches each solicitation in order and numbers the ones with activity
///
/// Each solicitation gets its own session, closed before the next one opens
/// whether or not its search succeeded. The first failure ends the run.
pub async fn aggregate<S: ProtestSource>(
    source: &S,
    entries: &[SolicitationEntry],
    reference_date: &str,
) -> Result<Vec<SolicitationResult>> {
    let mut results = Vec::new();

    for entry in entries {
        ::log::info!("Processing solicitation {}", entry.number);

        let (search_url, records) = search(source, &entry.number, reference_date).await?;
        if records.is_empty() {
            ::log::debug!("No updates for solicitation {}", entry.number);
            continue;
        }

        results.push(SolicitationResult {
            solicitation_no: entry.number.clone(),
            solicitation_name: entry.name.clone(),
            search_url,
            records,
            display_index: results.len() + 1,
        });
    }

    Ok(results)
}

/// One solicitation's search inside a dedicated session
async fn search<S: ProtestSource>(
    source: &S,
    solicitation_no: &str,
    reference_date: &str,
) -> Result<(String, Vec<ProtestRecord>)> {
    let mut session = source.open().await?;
    let outcome = search_in(&mut session, solicitation_no, reference_date).await;

    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close session for {}: {}", solicitation_no, e);
    }

    outcome
}

async fn search_in<T: SearchSession>(
    session: &mut T,
    solicitation_no: &str,
    reference_date: &str,
) -> Result<(String, Vec<ProtestRecord>)> {
    let page = session.search(solicitation_no).await?;
    ::log::info!("{} protests found", page.teasers.len());

    if !page.teasers.is_empty() {
        let (closed, open) = page.counts();
        ::log::info!("{} closed protests, {} open protests", closed, open);
    }

    let mut records = Vec::new();
    for teaser in &page.teasers {
        if let Some(record) = classify(teaser, session, reference_date).await? {
            records.push(record);
        }
    }

    Ok((page.url, records))
}
