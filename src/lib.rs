pub mod config;
pub mod error;
pub mod models;
pub mod dataset;
pub mod taxonomy;
pub mod analysis;
pub mod storage;

pub use config::{Config, ExportConfig};
pub use error::{Error, Result};
pub use dataset::{DatasetProvider, HubProvider, LocalProvider};
pub use analysis::{ExportPipeline, RunSummary, SecurityClassifier};
pub use storage::Storage;
pub use taxonomy::KeywordSet;
