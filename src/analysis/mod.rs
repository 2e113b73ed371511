pub mod sanitize;
pub mod classifier;
pub mod merge;
pub mod pipeline;

pub use sanitize::sanitize_text;
pub use classifier::SecurityClassifier;
pub use merge::{annotate_security, left_join, MergedRecord};
pub use pipeline::{ExportPipeline, RunSummary};
