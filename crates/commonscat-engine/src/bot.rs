//! # Batch Runner
//!
//! Drives the engine over live articles: fetch, check for a marker, look up
//! the Commons category, plan, edit, save. The stores are traits so the
//! runner can be exercised without a network.

use std::fmt;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::classify::DefinitionSource;
use crate::decide::{Decision, decide};
use crate::document::Document;
use crate::io::responses::EditResult;
use crate::io::{CommonsCategoryLookup, StoreError, WikiClient};
use crate::registry::AliasRegistry;

/// Where articles come from and go back to.
pub trait ArticleStore {
    fn random_title(&self) -> Result<String, StoreError>;
    fn fetch_page(&self, title: &str) -> Result<Option<String>, StoreError>;
    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<EditResult, StoreError>;
}

impl ArticleStore for WikiClient {
    fn random_title(&self) -> Result<String, StoreError> {
        self.random_article()
    }

    fn fetch_page(&self, title: &str) -> Result<Option<String>, StoreError> {
        WikiClient::fetch_page(self, title)
    }

    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<EditResult, StoreError> {
        WikiClient::save_page(self, title, text, summary)
    }
}

/// Maps an article title to its Commons category.
pub trait CategorySource {
    fn commons_category(&self, title: &str) -> Result<Option<String>, StoreError>;
}

impl CategorySource for CommonsCategoryLookup<'_> {
    fn commons_category(&self, title: &str) -> Result<Option<String>, StoreError> {
        self.lookup(title)
    }
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub summary: String,
    /// Pause after every processed article.
    pub edit_delay: Duration,
    /// Pause after an article that failed.
    pub error_delay: Duration,
    /// Plan and build the edit, but never save it.
    pub dry_run: bool,
}

/// What happened to one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page does not exist.
    Missing,
    AlreadyPresent,
    /// No Wikidata item or no P373 claim.
    NoCategory,
    Edited {
        category: String,
        revision: Option<u64>,
    },
    /// The wiki accepted the edit but the text was already identical.
    Unchanged,
    DryRun {
        category: String,
        text: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Missing => write!(f, "page missing"),
            Outcome::AlreadyPresent => write!(f, "already has Commonscat"),
            Outcome::NoCategory => write!(f, "no Commons category on Wikidata"),
            Outcome::Edited { category, .. } => write!(f, "added Commonscat|{category}"),
            Outcome::Unchanged => write!(f, "edit made no change"),
            Outcome::DryRun { category, .. } => write!(f, "would add Commonscat|{category}"),
        }
    }
}

/// Counts over one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub edited: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &Result<Outcome>) {
        self.processed += 1;
        match outcome {
            Ok(Outcome::Edited { .. } | Outcome::DryRun { .. }) => self.edited += 1,
            Ok(_) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}

pub struct Bot<'a> {
    articles: &'a dyn ArticleStore,
    categories: &'a dyn CategorySource,
    definitions: &'a dyn DefinitionSource,
    registry: &'a AliasRegistry,
    settings: BotSettings,
}

impl<'a> Bot<'a> {
    pub fn new(
        articles: &'a dyn ArticleStore,
        categories: &'a dyn CategorySource,
        definitions: &'a dyn DefinitionSource,
        settings: BotSettings,
    ) -> Self {
        Self {
            articles,
            categories,
            definitions,
            registry: AliasRegistry::global(),
            settings,
        }
    }

    pub fn process(&self, title: &str) -> Result<Outcome> {
        let Some(text) = self
            .articles
            .fetch_page(title)
            .with_context(|| format!("Failed to fetch {title}"))?
        else {
            return Ok(Outcome::Missing);
        };

        let document = Document::new(&text);
        if document.has_marker(self.registry) {
            return Ok(Outcome::AlreadyPresent);
        }

        let Some(category) = self
            .categories
            .commons_category(title)
            .with_context(|| format!("Failed to look up Commons category for {title}"))?
        else {
            return Ok(Outcome::NoCategory);
        };

        let pending = match decide(&document, self.registry, self.definitions) {
            Decision::AlreadyPresent => return Ok(Outcome::AlreadyPresent),
            Decision::Pending(pending) => pending,
        };
        let text = pending.mutate(&category);

        if self.settings.dry_run {
            return Ok(Outcome::DryRun { category, text });
        }

        let result = self
            .articles
            .save_page(title, &text, &self.settings.summary)
            .with_context(|| format!("Failed to save {title}"))?;
        if result.is_nochange() {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::Edited {
            category,
            revision: result.new_revision,
        })
    }

    /// Processes `count` random articles. A failing article is logged and
    /// counted; the run carries on after the error delay.
    pub fn run(&self, count: usize) -> RunSummary {
        let mut summary = RunSummary::default();
        for n in 1..=count {
            info!("Article {n}/{count}");
            let outcome = match self.articles.random_title() {
                Ok(title) => self.process_logged(&title),
                Err(e) => {
                    warn!("Failed to pick a random article: {e}");
                    Err(e.into())
                }
            };
            self.pause(&outcome);
            summary.record(&outcome);
        }
        summary
    }

    /// Processes the given titles in order.
    pub fn run_titles<S: AsRef<str>>(&self, titles: &[S]) -> RunSummary {
        let mut summary = RunSummary::default();
        for title in titles {
            let outcome = self.process_logged(title.as_ref());
            self.pause(&outcome);
            summary.record(&outcome);
        }
        summary
    }

    fn process_logged(&self, title: &str) -> Result<Outcome> {
        let outcome = self.process(title);
        match &outcome {
            Ok(outcome) => {
                info!("{title}: {outcome}");
                if let Outcome::DryRun { text, .. } = outcome {
                    debug!("{title} would become:\n{text}");
                }
            }
            Err(e) => warn!("{title}: {e:#}"),
        }
        outcome
    }

    fn pause(&self, outcome: &Result<Outcome>) {
        let delay = if outcome.is_err() {
            self.settings.error_delay
        } else {
            self.settings.edit_delay
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
