pub mod pull_request;
pub mod repository;
pub mod task_type;
pub mod commit;
pub mod annotation;

pub use pull_request::*;
pub use repository::*;
pub use task_type::*;
pub use commit::*;
pub use annotation::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dataset::Subset;

/// A row type loaded from one dataset subset.
pub trait SourceRecord: DeserializeOwned {
    const SUBSET: Subset;
    /// Columns that must be present in the subset for the export to run.
    const COLUMNS: &'static [&'static str];
}

/// A row type written to one of the CSV exports.
///
/// `HEADERS` is written even when there are no rows, and must list the
/// serialized field names in declaration order.
pub trait ExportRecord: Serialize {
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];
}

#[cfg(test)]
pub(crate) fn serialized_headers<T: ExportRecord>(sample: &T) -> Vec<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(sample).unwrap();
    let bytes = writer.into_inner().unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    reader
        .headers()
        .unwrap()
        .iter()
        .map(|h| h.to_string())
        .collect()
}
