//! Collector
//!
//! Fetches the configured pages one after another, extracts candidate spans with the
//! heuristic of each category and buckets them into [`ScrapedData`].
//! Fetch failures are logged and skipped. The run always ends with a save, including
//! when it is interrupted with Ctrl-C.

pub mod extract;
pub mod persist;
pub mod sources;

use std::{collections::HashSet, future::Future, path::PathBuf, time::Duration};

use anyhow::Context;
use log::{debug, error, info, trace, warn};
use rand::Rng;

use crate::{
    category::{Category, ScrapedData, ScrapedRecord},
    config::ConfigCollector,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub category: Category,
    pub url: String,
}

impl Source {
    pub fn new(category: Category, url: impl Into<String>) -> Self {
        Self { category, url: url.into() }
    }

    /// The built-in URL lists, in sub-task order.
    pub fn defaults() -> Vec<Source> {
        Category::ALL
            .into_iter()
            .flat_map(|c| sources::default_sources(c).iter().map(move |url| Source::new(c, *url)))
            .collect()
    }
}

/// Run the extraction heuristic of `category` over a page body.
pub fn extract(category: Category, body: &str) -> Vec<String> {
    match category {
        Category::PenetrationTesting => extract::code_blocks(body),
        Category::LinuxCommands => extract::command_lines(body),
        Category::NmapCommands => extract::keyword_lines(body, "nmap"),
        Category::CybersecurityGuides => extract::paragraphs(body),
        Category::BashScripts => extract::script_blocks(body),
    }
}

#[derive(Debug)]
pub struct Collector {
    client: reqwest::Client,
    min_delay: f64,
    max_delay: f64,
    output_dir: PathBuf,
    sources: Vec<Source>,
    visited: HashSet<String>,
    data: ScrapedData,
}

impl Collector {
    pub fn new(config: &ConfigCollector) -> anyhow::Result<Self> {
        Self::with_sources(config, Source::defaults())
    }

    pub fn with_sources(config: &ConfigCollector, sources: Vec<Source>) -> anyhow::Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            min_delay: config.min_delay_secs,
            max_delay: config.max_delay_secs,
            output_dir: config.output_dir.clone(),
            sources,
            visited: HashSet::new(),
            data: ScrapedData::default(),
        })
    }

    pub fn data(&self) -> &ScrapedData {
        &self.data
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client.get(url).send().await?.error_for_status()?.text().await
    }

    async fn delay(&self) {
        let secs = if self.max_delay > self.min_delay {
            rand::thread_rng().gen_range(self.min_delay..=self.max_delay)
        } else {
            self.min_delay
        };
        if secs > 0.0 {
            trace!(target: "collector", "sleeping {secs:.2}s");
            tokio::time::sleep(Duration::from_secs_f64(secs)).await;
        }
    }

    /// Fetch and extract one source. Returns the number of records added.
    async fn scrape_source(&mut self, source: &Source) -> Result<usize, reqwest::Error> {
        info!(target: "collector", "Scraping: {}", source.url);
        let body = self.fetch(&source.url).await?;
        let found = extract(source.category, &body);
        let n = found.len();
        for content in found {
            self.data.push(source.category, ScrapedRecord::new(source.category, &source.url, content));
        }
        debug!(target: "collector", "{}: {n} spans from {}", source.category.name(), source.url);
        Ok(n)
    }

    /// Visit every source once, in order, pausing between consecutive fetches.
    pub async fn scrape_all(&mut self) {
        let sources = self.sources.clone();
        let mut current = None;
        let mut fetched_any = false;
        for source in &sources {
            if !self.visited.insert(source.url.clone()) {
                debug!(target: "collector", "already visited {}", source.url);
                continue;
            }
            if current != Some(source.category) {
                info!(target: "collector", "Scraping {}...", source.category.name());
                current = Some(source.category);
            }
            if fetched_any {
                self.delay().await;
            }
            fetched_any = true;
            if let Err(err) = self.scrape_source(source).await {
                error!(target: "collector", "Error fetching {}: {err}", source.url);
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        persist::save(&self.output_dir, &self.data)
    }

    /// Scrape everything, stopping early on Ctrl-C, then save whatever was collected.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(target: "collector", "cannot listen for Ctrl-C: {err}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Scrape until done or until `shutdown` resolves, then save.
    pub async fn run_until(&mut self, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
        info!(target: "collector", "Starting cybersecurity data scraping...");
        tokio::select! {
            _ = self.scrape_all() => info!(target: "collector", "Scraping completed successfully!"),
            _ = shutdown => info!(target: "collector", "Scraping interrupted by user"),
        }
        self.save()
    }
}
