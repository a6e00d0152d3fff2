use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commonscat_config::Config;
use commonscat_engine::{
    AliasRegistry, Bot, BotSettings, CommonsCategoryLookup, Decision, Document, NullSource,
    RunSummary, WikiClient, WikidataClient, decide,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "commonscat-bot")]
#[command(about = "Adds {{Commonscat}} to articles from their Wikidata P373 claim")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/commonscat-bot/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log plan decisions and template lookups
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process random articles
    Run {
        /// Articles to process (default: articles_per_run from config)
        #[arg(short, long)]
        count: Option<usize>,

        /// Build the edits without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Process specific articles
    Page {
        #[arg(required = true)]
        titles: Vec<String>,

        #[arg(long)]
        dry_run: bool,
    },

    /// Show what would happen to a local wikitext file, without network access
    Check {
        file: PathBuf,

        /// Print the edited text for this Commons category
        #[arg(long)]
        category: Option<String>,
    },

    /// Write a config file holding the defaults
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());
    let load = || Config::load_or_default(&config_path);

    match cli.command {
        Commands::Run { count, dry_run } => {
            let config = load()?;
            let count = count.unwrap_or(config.articles_per_run);
            with_bot(&config, dry_run, |bot| bot.run(count))
        }
        Commands::Page { titles, dry_run } => {
            with_bot(&load()?, dry_run, |bot| bot.run_titles(&titles))
        }
        Commands::Check { file, category } => check(&file, category.as_deref()),
        Commands::Init { force } => init(&config_path, force),
    }
}

fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to replace it)",
            config_path.display()
        );
    }
    Config::default()
        .save_to_path(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    log::info!("Wrote default config to {}", config_path.display());
    Ok(())
}

/// Logs in, wires the clients into a [`Bot`] and reports its run.
fn with_bot<F>(config: &Config, dry_run: bool, body: F) -> Result<()>
where
    F: FnOnce(&Bot<'_>) -> RunSummary,
{
    let credentials = config.credentials()?;

    let wiki = WikiClient::new(&config.api_url, &config.user_agent)
        .context("Failed to create wiki client")?
        .with_random_attempts(config.random_attempts);
    let wikidata = WikidataClient::new(&config.wikidata_api_url, &config.user_agent)
        .context("Failed to create Wikidata client")?;
    wiki.login(&credentials.username, &credentials.password)
        .with_context(|| format!("Failed to log in to {}", wiki.api_url()))?;

    let lookup = CommonsCategoryLookup {
        wiki: &wiki,
        wikidata: &wikidata,
    };
    let settings = BotSettings {
        summary: config.edit_summary.clone(),
        edit_delay: config.edit_delay(),
        error_delay: config.error_delay(),
        dry_run,
    };
    let bot = Bot::new(&wiki, &lookup, &wiki, settings);

    let summary = body(&bot);
    log::info!(
        "Done: {} processed, {} edited, {} skipped, {} failed",
        summary.processed,
        summary.edited,
        summary.skipped,
        summary.failed
    );
    Ok(())
}

fn check(file: &Path, category: Option<&str>) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = Document::new(&text);

    match decide(&document, AliasRegistry::global(), &NullSource) {
        Decision::AlreadyPresent => println!("Commonscat: present"),
        Decision::Pending(pending) => {
            println!("Commonscat: missing");
            println!("Plan: {}", pending.plan());
            if let Some(category) = category {
                println!();
                println!("{}", pending.mutate(category));
            }
        }
    }
    Ok(())
}
