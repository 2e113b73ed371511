use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::models::ExportRecord;

/// Writes export tables as CSV files into one output directory.
///
/// Each file is written to a temporary file next to its destination and
/// renamed into place only once every row has been written.
pub struct Storage {
    output_dir: PathBuf,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for<T: ExportRecord>(&self) -> PathBuf {
        self.output_dir.join(T::FILE_NAME)
    }

    /// Writes `rows` with a header line and returns the number of rows.
    pub fn write_table<T: ExportRecord>(&self, rows: &[T]) -> Result<usize> {
        let destination = self.path_for::<T>();
        let tmp = NamedTempFile::new_in(&self.output_dir)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp);
        writer.write_record(T::HEADERS)?;
        for row in rows {
            writer.serialize(row)?;
        }

        let tmp = writer.into_inner().map_err(|e| e.into_error())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&destination).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} rows to {}", rows.len(), destination.display());
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommitDetail, CommitExport, SecurityAnnotation};

    #[test]
    fn test_writes_header_for_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let written = storage.write_table::<SecurityAnnotation>(&[]).unwrap();
        assert_eq!(written, 0);

        let contents = fs::read_to_string(dir.path().join("task5_output.csv")).unwrap();
        assert_eq!(contents, "ID,AGENT,TYPE,CONFIDENCE,SECURITY\n");
    }

    #[test]
    fn test_absent_values_are_empty_and_text_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let rows = vec![
            SecurityAnnotation {
                id: Some(42),
                agent: Some("OpenAI_Codex".to_string()),
                pr_type: "Unknown".to_string(),
                confidence: 0.0,
                security: 1,
            },
            SecurityAnnotation {
                id: None,
                agent: None,
                pr_type: "fix, maybe".to_string(),
                confidence: 7.5,
                security: 0,
            },
        ];
        storage.write_table(&rows).unwrap();

        let contents = fs::read_to_string(dir.path().join("task5_output.csv")).unwrap();
        assert_eq!(
            contents,
            "ID,AGENT,TYPE,CONFIDENCE,SECURITY\n\
             42,OpenAI_Codex,Unknown,0.0,1\n\
             ,,\"fix, maybe\",7.5,0\n"
        );
    }

    #[test]
    fn test_multiline_diff_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let commit = CommitDetail {
            pr_id: Some(9),
            patch: Some("@@ -1 +1 @@\n-a\n+\"b\"\n".to_string()),
            ..Default::default()
        };
        storage.write_table(&[CommitExport::from(&commit)]).unwrap();

        let mut reader = csv::Reader::from_path(storage.path_for::<CommitExport>()).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "9");
        assert_eq!(&record[8], "@@ -1 +1 @@\n-a\n+\"b\"\n");
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("run1");
        let storage = Storage::new(&nested).unwrap();
        assert!(storage.output_dir().is_dir());
    }
}
