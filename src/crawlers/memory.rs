//! In-memory page record source for exercising the pipeline without a browser.

use crate::crawlers::crawler::{DetailProvider, ProtestSource, SearchSession};
use crate::error::{Result, WatchError};
use crate::results::{DetailRecord, SearchPage, TeaserRecord};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Canned detail pages keyed by teaser index, counting every fetch
#[derive(Debug, Default)]
pub struct StaticDetails {
    pub details: HashMap<usize, DetailRecord>,
    pub fetched: Vec<usize>,
}

impl StaticDetails {
    pub fn with(mut self, index: usize, detail: DetailRecord) -> Self {
        self.details.insert(index, detail);
        self
    }
}

impl DetailProvider for StaticDetails {
    async fn detail(&mut self, teaser: &TeaserRecord) -> Result<DetailRecord> {
        self.fetched.push(teaser.index);
        self.details
            .get(&teaser.index)
            .cloned()
            .ok_or(WatchError::MissingLink(teaser.index))
    }
}

/// What the fake source observed across sessions
#[derive(Debug, Default)]
pub struct Journal {
    pub opened: usize,
    pub closed: usize,
    pub searched: Vec<String>,
}

/// Search pages and details per solicitation number
#[derive(Default)]
pub struct MemorySource {
    pub pages: HashMap<String, (Vec<TeaserRecord>, HashMap<usize, DetailRecord>)>,
    pub failing: Vec<String>,
    pub journal: Rc<RefCell<Journal>>,
}

impl MemorySource {
    pub fn page(
        mut self,
        solicitation_no: &str,
        teasers: Vec<TeaserRecord>,
        details: Vec<(usize, DetailRecord)>,
    ) -> Self {
        self.pages.insert(
            solicitation_no.to_string(),
            (teasers, details.into_iter().collect()),
        );
        self
    }

    /// Searches for this number answer with an upstream error
    pub fn failing(mut self, solicitation_no: &str) -> Self {
        self.failing.push(solicitation_no.to_string());
        self
    }
}

pub struct MemorySession {
    pages: HashMap<String, (Vec<TeaserRecord>, HashMap<usize, DetailRecord>)>,
    failing: Vec<String>,
    current: HashMap<usize, DetailRecord>,
    journal: Rc<RefCell<Journal>>,
}

impl ProtestSource for MemorySource {
    type Session = MemorySession;

    async fn open(&self) -> Result<MemorySession> {
        self.journal.borrow_mut().opened += 1;
        Ok(MemorySession {
            pages: self.pages.clone(),
            failing: self.failing.clone(),
            current: HashMap::new(),
            journal: Rc::clone(&self.journal),
        })
    }
}

impl DetailProvider for MemorySession {
    async fn detail(&mut self, teaser: &TeaserRecord) -> Result<DetailRecord> {
        self.current
            .get(&teaser.index)
            .cloned()
            .ok_or(WatchError::MissingLink(teaser.index))
    }
}

impl SearchSession for MemorySession {
    async fn search(&mut self, solicitation_no: &str) -> Result<SearchPage> {
        self.journal
            .borrow_mut()
            .searched
            .push(solicitation_no.to_string());

        let url = format!("https://example.com/search?solicitation={}", solicitation_no);
        if self.failing.iter().any(|no| no == solicitation_no) {
            return Err(WatchError::Upstream { status: 403, url });
        }

        let (teasers, details) = self.pages.get(solicitation_no).cloned().unwrap_or_default();
        self.current = details;
        Ok(SearchPage { url, teasers })
    }

    async fn close(self) -> Result<()> {
        self.journal.borrow_mut().closed += 1;
        Ok(())
    }
}
