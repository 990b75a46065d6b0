//! Watches the GAO bid protest search for protests that were decided or
//! filed yesterday on a list of tracked solicitations, and reports them to a
//! Teams channel.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod notify;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::WatchConfig;
pub use crawlers::{ProtestSource, WebDriverSource};
pub use error::{Result, WatchError};
pub use notify::{Deliver, Notifier, PrintCard, TeamsMessage};
pub use report::DisplayBlock;

use chrono::{Local, NaiveDate};

/// Per-run values every stage needs
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Day the run executes; dated in the report header
    pub today: NaiveDate,

    /// Yesterday, in the site's "Mon DD, YYYY" form
    pub reference_date: String,

    pub config: WatchConfig,
}

impl RunContext {
    pub fn new(today: NaiveDate, config: WatchConfig) -> Self {
        Self {
            today,
            reference_date: utils::reference_date(today),
            config,
        }
    }

    /// Context dated by the local clock
    pub fn from_clock(config: WatchConfig) -> Self {
        Self::new(Local::now().date_naive(), config)
    }
}

/// Searches every solicitation in the "number:name,..." list and formats the report
///
/// An empty result means nothing changed and nothing should be posted.
pub async fn scan<S: ProtestSource>(
    ctx: &RunContext,
    source: &S,
    solicitations: &str,
) -> Result<Vec<DisplayBlock>> {
    ::log::info!("Yesterday: {}", ctx.reference_date);

    let entries = aggregate::parse_entries(solicitations)?;
    let results = aggregate::aggregate(source, &entries, &ctx.reference_date).await?;
    Ok(report::format_results(&results, ctx.today))
}

/// Scans the solicitations and hands a non-empty report to `deliver`
///
/// Returns whether anything was delivered. A run with no activity never
/// reaches `deliver`.
pub async fn run<S: ProtestSource, D: Deliver>(
    ctx: &RunContext,
    source: &S,
    deliver: &D,
    solicitations: &str,
) -> Result<bool> {
    let blocks = scan(ctx, source, solicitations).await?;
    if blocks.is_empty() {
        ::log::info!("No protest updates for {}", ctx.reference_date);
        return Ok(false);
    }

    deliver.deliver(&blocks).await;
    Ok(true)
}
