use crate::error::Result;
use crate::results::{DetailRecord, SearchPage, TeaserRecord};

/// Something that can fetch a teaser record's detail page
#[allow(async_fn_in_trait)]
pub trait DetailProvider {
    async fn detail(&mut self, teaser: &TeaserRecord) -> Result<DetailRecord>;
}

/// A browser session scoped to a single solicitation search
#[allow(async_fn_in_trait)]
pub trait SearchSession: DetailProvider {
    /// Load the search results for a solicitation number
    async fn search(&mut self, solicitation_no: &str) -> Result<SearchPage>;

    /// Release the session
    async fn close(self) -> Result<()>;
}

/// Opens a fresh search session per solicitation
#[allow(async_fn_in_trait)]
pub trait ProtestSource {
    type Session: SearchSession;

    async fn open(&self) -> Result<Self::Session>;
}
