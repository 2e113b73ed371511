use std::collections::HashSet;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::dataset::provider::{DatasetRequest, DatasetTable};
use crate::dataset::rate_limiter::RateLimiter;
use crate::error::{Error, Result};

/// One page of the datasets-server `/rows` endpoint.
#[derive(Debug, Deserialize)]
pub struct RowsPage {
    #[serde(default)]
    pub features: Vec<Feature>,
    pub rows: Vec<RowEntry>,
    pub num_rows_total: usize,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RowEntry {
    pub row_idx: usize,
    pub row: Map<String, Value>,
    #[serde(default)]
    pub truncated_cells: Vec<String>,
}

pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    /// Fetches pages sequentially by offset until the subset (or the request
    /// limit) is exhausted.
    pub async fn fetch_rows(
        &self,
        rows_url: &str,
        request: &DatasetRequest,
        page_size: usize,
    ) -> Result<DatasetTable> {
        let mut columns = Vec::new();
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        let mut truncated = 0usize;
        let mut offset = 0usize;
        let mut pb: Option<ProgressBar> = None;

        loop {
            let length = match request.limit {
                Some(limit) => page_size.min(limit.saturating_sub(offset)),
                None => page_size,
            };
            if length == 0 {
                break;
            }

            self.rate_limiter.wait().await;

            tracing::debug!(
                "Fetching {} offset={} length={}",
                request.subset,
                offset,
                length
            );
            let response = self
                .client
                .get(rows_url)
                .query(&[
                    ("dataset", request.dataset.as_str()),
                    ("config", request.subset.as_str()),
                    ("split", request.split.as_str()),
                ])
                .query(&[("offset", offset), ("length", length)])
                .send()
                .await?;

            let page: RowsPage = check_status(response).await?.json().await?;

            // Declared features first, then any row keys they do not cover.
            for feature in &page.features {
                if seen.insert(feature.name.clone()) {
                    columns.push(feature.name.clone());
                }
            }

            let expected = request
                .limit
                .map_or(page.num_rows_total, |l| l.min(page.num_rows_total));
            let bar = pb.get_or_insert_with(|| progress_bar(expected as u64, request));

            let page_len = page.rows.len();
            for entry in page.rows {
                for key in entry.row.keys() {
                    if seen.insert(key.clone()) {
                        columns.push(key.clone());
                    }
                }
                truncated += entry.truncated_cells.len();
                rows.push(entry.row);
            }
            offset += page_len;
            bar.set_position(offset as u64);

            if page_len == 0 || offset >= expected {
                break;
            }
        }

        if let Some(bar) = pb {
            bar.finish_and_clear();
        }
        if truncated > 0 {
            tracing::warn!(
                "{} cells of {} were truncated by the dataset server",
                truncated,
                request.subset
            );
        }

        Ok(DatasetTable::new(request.subset, columns, rows))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(Error::RateLimited(retry_after));
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    Err(Error::DatasetApi(format!(
        "Request to {} failed: {} - {}",
        url, status, body
    )))
}

fn progress_bar(len: u64, request: &DatasetRequest) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(request.subset.to_string());
    pb
}
