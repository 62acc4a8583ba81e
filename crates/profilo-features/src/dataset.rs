use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregator::FeatureRow;
use crate::schema::COLUMNS;

/// Writes the feature dataset: a header naming every schema column, then one
/// row per document in input order. Rows are repaired to schema length
/// before writing, so the file always has a rectangular shape.
///
/// The file starts with a UTF-8 BOM so spreadsheet tools detect the encoding
/// and non-ASCII filenames survive.
pub fn write_dataset(path: &Path, mut rows: Vec<FeatureRow>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }
    }
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create dataset file {}", path.display()))?;
    file.write_all(b"\xEF\xBB\xBF")
        .with_context(|| format!("Failed to write BOM to {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer
        .write_record(COLUMNS)
        .context("Failed to write dataset header")?;
    for row in &mut rows {
        row.pad_or_truncate();
        writer
            .serialize(&*row)
            .with_context(|| format!("Failed to write row for {}", row.filename()))?;
    }
    writer.flush().context("Failed to flush dataset file")?;

    info!(path = %path.display(), rows = rows.len(), "Dataset written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NUM_FEATURES;
    use tempfile::tempdir;

    #[test]
    fn writes_bom_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("features.csv");
        let rows = vec![
            FeatureRow::from_conllu("test#1#diary#F.conllu", ""),
            FeatureRow::from_conllu("test#2#perché#M.conllu", ""),
        ];
        write_dataset(&path, rows).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");

        let content = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Filename,n_sentences,n_tokens"));
        assert_eq!(header.split(',').count(), COLUMNS.len());

        let data: Vec<&str> = lines.collect();
        assert_eq!(data.len(), 2);
        assert!(data[0].starts_with("test#1#diary#F.conllu,"));
        // non-ASCII filename preserved
        assert!(data[1].contains("perché"));
    }

    #[test]
    fn every_data_row_has_schema_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("features.csv");
        write_dataset(&path, vec![FeatureRow::from_conllu("a.conllu", "")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), 1 + NUM_FEATURES);
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("features.csv");
        write_dataset(&path, Vec::new()).unwrap();
        assert!(path.is_file());
    }
}
