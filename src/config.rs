use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATASETS_SERVER_URL: &str = "https://datasets-server.huggingface.co";
pub const DEFAULT_DATASET: &str = "hao-li/AIDev";
pub const DEFAULT_SPLIT: &str = "train";
/// The datasets-server refuses pages longer than this.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub hf_token: Option<String>,
    pub datasets_server_url: String,
    pub dataset: String,
    pub split: String,
    pub output_dir: PathBuf,
    pub page_size: usize,
    pub requests_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hf_token: None,
            datasets_server_url: DEFAULT_DATASETS_SERVER_URL.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            split: DEFAULT_SPLIT.to_string(),
            output_dir: PathBuf::from("."),
            page_size: MAX_PAGE_SIZE,
            requests_per_minute: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let hf_token = env::var("HF_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let datasets_server_url = env::var("DATASETS_SERVER_URL")
            .unwrap_or(defaults.datasets_server_url);

        let dataset = env::var("DATASET_NAME").unwrap_or(defaults.dataset);

        let split = env::var("DATASET_SPLIT").unwrap_or(defaults.split);

        let output_dir = env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let page_size = match env::var("PAGE_SIZE") {
            Ok(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("PAGE_SIZE is not a number: {}", v)))?,
            Err(_) => defaults.page_size,
        };

        let requests_per_minute = match env::var("REQUESTS_PER_MINUTE") {
            Ok(v) => v.parse().map_err(|_| {
                Error::Config(format!("REQUESTS_PER_MINUTE is not a number: {}", v))
            })?,
            Err(_) => defaults.requests_per_minute,
        };

        let config = Self {
            hf_token,
            datasets_server_url,
            dataset,
            split,
            output_dir,
            page_size,
            requests_per_minute,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "PAGE_SIZE must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.requests_per_minute == 0 {
            return Err(Error::Config(
                "REQUESTS_PER_MINUTE must be greater than zero".to_string(),
            ));
        }
        if self.dataset.trim().is_empty() {
            return Err(Error::Config("dataset name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub dataset: String,
    pub split: String,
    /// Caps the rows fetched per subset; `None` loads everything.
    pub row_limit: Option<usize>,
}

impl From<&Config> for ExportConfig {
    fn from(config: &Config) -> Self {
        Self {
            dataset: config.dataset.clone(),
            split: config.split.clone(),
            row_limit: None,
        }
    }
}
