//! Skill Scrape CLI
//!
//! Reads the skills index, scrapes the requested skill pages and prints the
//! extracted records as JSON on stdout. Logs go to stderr.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use skill_scrape::{
    BrowserPageAccess, HttpPageAccess, PageAccess, PageBackend, ScraperConfig, SkillScraper,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Skill Scrape
#[derive(Parser, Debug)]
#[command(name = "skill-scrape")]
#[command(version)]
#[command(about = "Extract skill, tool and resource tables from a game wiki")]
struct Args {
    /// Skills index page URL
    #[arg(short, long)]
    url: Option<String>,

    /// Path segment preceding page names
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Skill to scrape (repeatable; default: every configured skill)
    #[arg(short, long = "skill")]
    skills: Vec<String>,

    /// Page Access backend
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print the skill registry
    #[arg(long)]
    list: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Show the browser window (browser backend)
    #[arg(long)]
    headed: bool,

    /// Disable Chromium's sandbox, e.g. inside containers (browser backend)
    #[arg(long)]
    no_sandbox: bool,

    /// Timeout per page navigation in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Http,
    Browser,
}

impl From<Backend> for PageBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Http => PageBackend::Http,
            Backend::Browser => PageBackend::Browser,
        }
    }
}

impl Args {
    fn load_config(&self) -> anyhow::Result<ScraperConfig> {
        let mut config = match self.config {
            Some(ref path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };

        if let Some(ref url) = self.url {
            config.site_url = url.clone();
        }
        if let Some(ref delimiter) = self.delimiter {
            config.path_delimiter = delimiter.clone();
        }
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(ref path) = self.chrome_path {
            config.chrome_path = Some(path.clone());
        }
        if self.headed {
            config.headless = false;
        }
        if self.no_sandbox {
            config.sandbox = false;
        }
        if let Some(ms) = self.timeout_ms {
            config.navigation_timeout_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every requested skill was scraped
async fn run(args: &Args) -> anyhow::Result<bool> {
    let config = args.load_config()?;
    tracing::info!(
        "Scraping {} with {:?} backend",
        config.site_url,
        config.backend
    );

    match config.backend {
        PageBackend::Http => {
            let access =
                HttpPageAccess::new(config.navigation_timeout_ms, config.user_agent.as_deref())?;
            let (_, outcome) = scrape(access, config, args).await;
            outcome
        }
        PageBackend::Browser => {
            let access = BrowserPageAccess::launch(config.browser_config())
                .await
                .context("launching browser")?;
            let (access, outcome) = scrape(access, config, args).await;
            access.close().await.context("closing browser")?;
            outcome
        }
    }
}

/// Hands the backend back so the caller can release it after any outcome
async fn scrape<P: PageAccess>(
    access: P,
    config: ScraperConfig,
    args: &Args,
) -> (P, anyhow::Result<bool>) {
    let mut scraper = SkillScraper::new(access, config);
    let outcome = scrape_with(&mut scraper, args).await;
    (scraper.into_access(), outcome)
}

async fn scrape_with<P: PageAccess>(
    scraper: &mut SkillScraper<P>,
    args: &Args,
) -> anyhow::Result<bool> {
    let registry = scraper.init().await.context("reading skills index")?;

    if args.list {
        print_json(&serde_json::to_value(registry)?, args.pretty)?;
        return Ok(true);
    }

    let results = if args.skills.is_empty() {
        scraper.scrape_all().await
    } else {
        let mut results = Vec::new();
        for name in &args.skills {
            let result = scraper.scrape_skill(name).await;
            if let Err(ref e) = result {
                tracing::error!("{}", e);
            }
            results.push((name.clone(), result));
        }
        results
    };

    let mut output = Map::new();
    let mut all_ok = true;
    for (name, result) in results {
        match result {
            Ok(data) => {
                output.insert(name, serde_json::to_value(data)?);
            }
            Err(_) => all_ok = false,
        }
    }

    print_json(&Value::Object(output), args.pretty)?;
    Ok(all_ok)
}

fn print_json(value: &Value, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
