use clap::Parser;
use protest_watch::{Notifier, PrintCard, RunContext, WatchConfig, WebDriverSource};
use std::error::Error;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging, defaulting to info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    ::log::info!("Start processing");

    let mut config = match &args.config {
        Some(path) => WatchConfig::from_file(path)?,
        None => WatchConfig::default(),
    };
    if let Some(webdriver_url) = args.webdriver_url.filter(|url| !url.is_empty()) {
        config.webdriver_url = webdriver_url;
    }

    let ctx = RunContext::from_clock(config);
    let source = WebDriverSource::new(ctx.config.clone());

    let start_time = std::time::Instant::now();
    let delivered = if args.dry_run {
        protest_watch::run(&ctx, &source, &PrintCard, &args.solicitations).await?
    } else {
        let notifier = Notifier::new(args.webhook_url);
        protest_watch::run(&ctx, &source, &notifier, &args.solicitations).await?
    };
    ::log::info!(
        "Run complete in {:.2} seconds (report delivered: {})",
        start_time.elapsed().as_secs_f64(),
        delivered
    );

    Ok(())
}
