use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset API error: {0}")]
    DatasetApi(String),

    #[error("Rate limit exceeded by dataset server{}", retry_hint(.0))]
    RateLimited(Option<u64>),

    #[error("Failed to parse record: {0}")]
    ParseError(String),

    #[error("Column `{column}` missing from subset `{subset}`")]
    MissingColumn { subset: String, column: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {} seconds", secs),
        None => String::new(),
    }
}

impl Error {
    /// Errors caused by the remote source rather than the local run.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Error::DatasetApi(_) | Error::RateLimited(_) | Error::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_message() {
        assert_eq!(
            Error::RateLimited(Some(30)).to_string(),
            "Rate limit exceeded by dataset server, retry after 30 seconds"
        );
        assert_eq!(
            Error::RateLimited(None).to_string(),
            "Rate limit exceeded by dataset server"
        );
    }

    #[test]
    fn test_source_errors() {
        assert!(Error::DatasetApi("down".to_string()).is_source_error());
        assert!(Error::RateLimited(None).is_source_error());
        assert!(!Error::Config("bad".to_string()).is_source_error());
        assert!(!Error::MissingColumn {
            subset: "all_repository".to_string(),
            column: "stars".to_string(),
        }
        .is_source_error());
    }
}
