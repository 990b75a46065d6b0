use crate::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

/// Configuration for a protest watch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Scheme and host of the case-search site
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    /// Path of the bid protest search page
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// User agent presented by the browser
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// CSS selectors used to pull fields out of rendered pages
    #[serde(default)]
    pub selectors: Selectors,
}

/// CSS selectors for the search results and detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// One match per teaser record; its count is the record count
    pub bookmark: String,
    pub outcome: String,
    pub status: String,
    pub decision_date: String,
    pub heading: String,
    pub heading_link: String,
    pub decision: String,
    pub decision_link: String,
    pub case_type: String,
    pub filed_date: String,
    pub due_date: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            bookmark: "div.teaser-search--bookmark".to_string(),
            outcome: "div.teaser-search--outcome .field__item".to_string(),
            status: "div.teaser-search--status .field__item".to_string(),
            decision_date: "div.teaser-search--decision_date .field__item".to_string(),
            heading: "div.teaser-search--heading h4.heading".to_string(),
            heading_link: "div.teaser-search--heading h4.heading a".to_string(),
            decision: "div.teaser-search-decision".to_string(),
            decision_link: "div.teaser-search-decision a".to_string(),
            case_type: "div.field--name-field-case-type .field__item".to_string(),
            filed_date: "div.field--name-field-filed-date .field__item".to_string(),
            due_date: "div.field--name-field-due-date .field__item".to_string(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            site_origin: default_site_origin(),
            search_path: default_search_path(),
            user_agent: default_user_agent(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            headless: default_headless(),
            selectors: Selectors::default(),
        }
    }
}

impl WatchConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject an origin that cannot be joined with relative links
    pub fn validate(&self) -> Result<()> {
        let origin = Url::parse(&self.site_origin)
            .map_err(|e| WatchError::Config(format!("site_origin {:?}: {}", self.site_origin, e)))?;
        if origin.cannot_be_a_base() {
            return Err(WatchError::Config(format!(
                "site_origin {:?} cannot be used as a base URL",
                self.site_origin
            )));
        }
        Ok(())
    }

    /// Search results URL for one solicitation number
    pub fn search_url(&self, solicitation_no: &str) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("processed", "1")
            .append_pair("solicitation", solicitation_no)
            .append_pair("outcome", "all")
            .finish();
        format!(
            "{}{}?{}#s-skipLinkTargetForMainSearchResults",
            self.site_origin.trim_end_matches('/'),
            self.search_path,
            query
        )
    }
}

/// WebDriver URL used when none is configured
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    DEFAULT_WEBDRIVER_URL.to_string()
}

fn default_site_origin() -> String {
    "https://www.gao.gov".to_string()
}

fn default_search_path() -> String {
    "/legal/bid-protests/search".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_headless() -> bool {
    true
}
