use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "protest-watch")]
#[command(about = "Posts yesterday's GAO bid protest updates for tracked solicitations to Teams")]
#[command(version)]
pub struct Args {
    /// Comma-separated "number:name" solicitation pairs
    pub solicitations: String,

    /// Teams incoming webhook URL
    pub webhook_url: String,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (overrides the configuration file)
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Print the card JSON instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}
