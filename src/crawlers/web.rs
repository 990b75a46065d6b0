use crate::config::{DEFAULT_WEBDRIVER_URL, WatchConfig};
use crate::crawlers::crawler::{DetailProvider, ProtestSource, SearchSession};
use crate::error::{Result, WatchError};
use crate::parsers;
use crate::results::{DetailRecord, SearchPage, TeaserRecord};
use crate::utils::absolute_url;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};

/// Reads the HTTP status of the last top-level navigation, when the browser exposes it
const NAVIGATION_STATUS_SCRIPT: &str =
    "const nav = performance.getEntriesByType('navigation')[0]; return nav && nav.responseStatus ? nav.responseStatus : null;";

/// Page record source backed by a WebDriver server (e.g. ChromeDriver)
pub struct WebDriverSource {
    config: WatchConfig,
}

impl WebDriverSource {
    pub fn new(config: WatchConfig) -> Self {
        Self { config }
    }

    /// Browser capabilities mirroring a regular desktop Chrome
    fn capabilities(&self) -> Map<String, Value> {
        let mut args = vec![
            format!(
                "--window-size={},{}",
                self.config.window_width, self.config.window_height
            ),
            format!("--user-agent={}", self.config.user_agent),
            "--lang=en-US".to_string(),
            "--force-color-profile=srgb".to_string(),
        ];
        if self.config.headless {
            args.push("--headless=new".to_string());
        }

        let mut caps = Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": args,
                "prefs": { "intl.accept_languages": "en-US,en" },
            }),
        );
        caps
    }
}

impl ProtestSource for WebDriverSource {
    type Session = WebDriverSession;

    async fn open(&self) -> Result<WebDriverSession> {
        let client = connect_to_webdriver(&self.config.webdriver_url, self.capabilities()).await?;
        Ok(WebDriverSession {
            client,
            config: self.config.clone(),
        })
    }
}

/// Local ports tried after the default URL fails
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444",
];

/// URLs to try in order; an explicitly configured URL is tried alone
fn candidate_urls(webdriver_url: &str) -> Vec<&str> {
    let mut urls = vec![webdriver_url];
    if webdriver_url == DEFAULT_WEBDRIVER_URL {
        urls.extend(
            FALLBACK_WEBDRIVER_URLS
                .iter()
                .copied()
                .filter(|url| *url != webdriver_url),
        );
    }
    urls
}

/// Connects to the WebDriver instance, trying common local ports only for the default URL
async fn connect_to_webdriver(webdriver_url: &str, caps: Map<String, Value>) -> Result<Client> {
    for (attempt, url) in candidate_urls(webdriver_url).into_iter().enumerate() {
        if attempt > 0 {
            ::log::info!("Trying fallback WebDriver URL: {}", url);
        }

        match ClientBuilder::native()
            .capabilities(caps.clone())
            .connect(url)
            .await
        {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", url);
                return Ok(client);
            }
            Err(e) if attempt == 0 => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", url, e);
            }
            Err(_) => {}
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(WatchError::WebDriver(format!(
        "no WebDriver server reachable at {}",
        webdriver_url
    )))
}

/// One browser session; dropped after the solicitation it was opened for
pub struct WebDriverSession {
    client: Client,
    config: WatchConfig,
}

impl WebDriverSession {
    /// Navigates to a URL and returns the rendered page source
    async fn load(&mut self, url: &str) -> Result<String> {
        ::log::debug!("GOTO: {}", url);
        self.client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;

        self.client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))
    }

    async fn navigation_status(&mut self) -> Option<u16> {
        match self.client.execute(NAVIGATION_STATUS_SCRIPT, vec![]).await {
            Ok(value) => value.as_u64().and_then(|status| u16::try_from(status).ok()),
            Err(e) => {
                ::log::debug!("Navigation status unavailable: {}", e);
                None
            }
        }
    }
}

impl DetailProvider for WebDriverSession {
    async fn detail(&mut self, teaser: &TeaserRecord) -> Result<DetailRecord> {
        let href = teaser
            .detail_link
            .as_deref()
            .ok_or(WatchError::MissingLink(teaser.index))?;
        let url = absolute_url(&self.config.site_origin, href)?;

        let html = self.load(&url).await?;
        parsers::parse_detail_page(&html, &self.config.selectors)
    }
}

impl SearchSession for WebDriverSession {
    async fn search(&mut self, solicitation_no: &str) -> Result<SearchPage> {
        let url = self.config.search_url(solicitation_no);
        let html = self.load(&url).await?;

        if let Some(status) = self.navigation_status().await {
            if status != 200 {
                return Err(WatchError::Upstream { status, url });
            }
        }

        let teasers = parsers::parse_search_page(&html, &self.config.selectors)?;
        Ok(SearchPage { url, teasers })
    }

    async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// Maps navigation failures, calling out lost sessions separately
fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> WatchError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed to {} {}: {}", context, url, error);
    }
    WatchError::from(error)
}
