use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, info};
use serde::Deserialize;

use crate::error::PipelineError;

const DEFAULT_CONFIG_PATH: &str = "./cyberbot.toml";
/// Upper bound for either politeness delay bound.
pub const MAX_DELAY_SECS: f64 = 3600.0;
const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collector: ConfigCollector,
    pub corpus: ConfigCorpus,
    pub packager: ConfigPackager,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfigCollector {
    pub output_dir: PathBuf,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ConfigCollector {
    /// The delay bounds must be finite, ordered and at most [`MAX_DELAY_SECS`].
    pub fn validate(&self) -> Result<(), PipelineError> {
        let (min, max) = (self.min_delay_secs, self.max_delay_secs);
        let in_range = |secs: f64| secs.is_finite() && (0.0..=MAX_DELAY_SECS).contains(&secs);
        if !in_range(min) || !in_range(max) || min > max {
            return Err(PipelineError::InvalidConfig(format!(
                "delay range [{min}, {max}] must be ordered and lie within [0, {MAX_DELAY_SECS}] seconds"
            )));
        }
        Ok(())
    }
}

impl Default for ConfigCollector {
    fn default() -> Self {
        Self {
            output_dir: "data/raw_data".into(),
            min_delay_secs: 1.0,
            max_delay_secs: 3.0,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfigCorpus {
    /// Directory holding `cybersecurity_data.json`
    pub scraped_dir: PathBuf,
    /// Optional `User:`/`Bot:` question file
    pub curated_questions: PathBuf,
    /// Refuse to build a corpus when the scraped JSON is absent
    pub require_scraped_data: bool,
}

impl Default for ConfigCorpus {
    fn default() -> Self {
        Self {
            scraped_dir: "data/raw_data".into(),
            curated_questions: "data/train_questions.txt".into(),
            require_scraped_data: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfigPackager {
    pub output_dir: PathBuf,
    pub train_percent: u8,
    /// A local `tokenizer.json`; takes precedence over `tokenizer_repo`
    pub tokenizer_file: Option<PathBuf>,
    pub tokenizer_repo: String,
}

impl Default for ConfigPackager {
    fn default() -> Self {
        Self {
            output_dir: "data/processed_data".into(),
            train_percent: 90,
            tokenizer_file: None,
            tokenizer_repo: "gpt2".to_string(),
        }
    }
}

impl Config {
    /// Load `.env`, then the TOML file named by `CYBERBOT_CONFIG` (or `./cyberbot.toml`).
    ///
    /// A missing file is not an error: every field has a default.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(target: "config", "loaded environment from {path:?}");
        }
        let path = std::env::var("CYBERBOT_CONFIG").unwrap_or(DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(target: "config", "no config at {path:?}, using defaults");
            return Ok(Self::default());
        }
        let config_str =
            fs::read_to_string(path).with_context(|| format!("read config {path:?}"))?;
        Self::from_toml_str(&config_str).with_context(|| format!("parse config {path:?}"))
    }

    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.collector.validate()?;
        if !(1..=100).contains(&self.packager.train_percent) {
            return Err(PipelineError::InvalidConfig(format!(
                "train_percent must lie in 1..=100, got {}",
                self.packager.train_percent
            )));
        }
        Ok(())
    }
}
