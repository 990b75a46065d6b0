use crate::error::{Result, WatchError};
use chrono::{Days, NaiveDate};
use url::Url;

/// Date format used by the case-search site, e.g. "Feb 02, 2024"
pub const SITE_DATE_FORMAT: &str = "%b %d, %Y";

/// The calendar day before `today`, formatted the way the site renders dates
pub fn reference_date(today: NaiveDate) -> String {
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    yesterday.format(SITE_DATE_FORMAT).to_string()
}

/// Resolve a site-relative href against the configured origin
pub fn absolute_url(origin: &str, href: &str) -> Result<String> {
    let base = Url::parse(origin).map_err(|e| WatchError::Config(format!("{}: {}", origin, e)))?;
    base.join(href)
        .map(|url| url.to_string())
        .map_err(|e| WatchError::Config(format!("cannot resolve {:?}: {}", href, e)))
}
