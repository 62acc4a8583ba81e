use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use profilo_corpus::{process_split, progress_bar};
use profilo_features::conllu::write_document;
use profilo_features::{write_dataset, FeatureRow};

use crate::annotator::Annotator;

/// Collects files with the given extension directly in `dir` and one level
/// down (the cleaned-text tree groups documents into per-genre
/// subdirectories). Sorted for deterministic batch order.
fn collect_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            for child in fs::read_dir(&path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
            {
                let child = child?.path();
                if child.extension().is_some_and(|ext| ext == extension) {
                    files.push(child);
                }
            }
        } else if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The batch pipeline: raw containers → cleaned texts → CoNLL-U files →
/// feature dataset. Each stage is one-file-per-document and embarrassingly
/// parallel; results only merge at the final dataset write.
///
/// # Examples
///
/// ```no_run
/// use profilo::{CommandAnnotator, Pipeline};
///
/// let pipeline = Pipeline::new("work");
/// let annotator = CommandAnnotator::new("udpipe-wrapper --lang it")?;
/// pipeline.extract_split("data/original/training".as_ref(), "training")?;
/// pipeline.annotate(&annotator)?;
/// pipeline.extract_features()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Pipeline {
    clean_dir: PathBuf,
    conllu_dir: PathBuf,
    dataset_path: PathBuf,
}

impl Pipeline {
    /// Creates a pipeline with the conventional layout under `work_dir`:
    /// `clean/`, `conllu/` and `linguistic_features.csv`.
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            clean_dir: work_dir.join("clean"),
            conllu_dir: work_dir.join("conllu"),
            dataset_path: work_dir.join("linguistic_features.csv"),
        }
    }

    #[must_use]
    pub fn with_clean_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.clean_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_conllu_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.conllu_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// Sanitizes one dataset split of raw container files into the cleaned
    /// per-genre text tree. Missing or empty input is a warning, not an
    /// error. Returns the number of documents written.
    pub fn extract_split(&self, raw_dir: &Path, split: &str) -> Result<usize> {
        process_split(raw_dir, &self.clean_dir, split)
    }

    /// Runs the external annotator over every cleaned text, writing one
    /// `.conllu` file per document. Documents the annotator rejects are
    /// warned about and skipped; the batch keeps going. Returns the number
    /// of documents annotated.
    pub fn annotate(&self, annotator: &dyn Annotator) -> Result<usize> {
        if !self.clean_dir.is_dir() {
            warn!(dir = %self.clean_dir.display(), "Cleaned-text directory missing, nothing to annotate");
            return Ok(0);
        }
        let files = collect_files(&self.clean_dir, "txt")?;
        if files.is_empty() {
            warn!(dir = %self.clean_dir.display(), "No cleaned texts found, nothing to annotate");
            return Ok(0);
        }
        fs::create_dir_all(&self.conllu_dir).with_context(|| {
            format!("Failed to create conllu directory {}", self.conllu_dir.display())
        })?;

        debug!(num_files = files.len(), "Annotating cleaned texts");
        let pb = progress_bar(files.len(), "Annotating texts");
        let annotated = files
            .par_iter()
            .progress_with(pb.clone())
            .map(|path| -> Result<usize> {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read cleaned text {}", path.display()))?;

                let sentences = match annotator.annotate(&text) {
                    Ok(sentences) => sentences,
                    Err(error) => {
                        warn!(document = %stem, %error, "Annotator failed, skipping document");
                        return Ok(0);
                    }
                };

                let out_path = self.conllu_dir.join(format!("{stem}.conllu"));
                fs::write(&out_path, write_document(&stem, &sentences))
                    .with_context(|| format!("Failed to write {}", out_path.display()))?;
                Ok(1)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?;
        pb.finish_with_message(format!("Annotated {annotated} documents"));

        info!(documents = annotated, "Annotation complete");
        Ok(annotated)
    }

    /// Aggregates every `.conllu` file into one feature row and writes the
    /// dataset. Rows merge in deterministic file order regardless of which
    /// worker finished first. Returns the number of rows written.
    pub fn extract_features(&self) -> Result<usize> {
        let mut rows = Vec::new();
        if !self.conllu_dir.is_dir() {
            warn!(dir = %self.conllu_dir.display(), "CoNLL-U directory missing, skipping");
        } else {
            let files = collect_files(&self.conllu_dir, "conllu")?;
            if files.is_empty() {
                warn!(dir = %self.conllu_dir.display(), "No CoNLL-U files found, skipping");
            } else {
                debug!(num_files = files.len(), "Aggregating features");
                let pb = progress_bar(files.len(), "Extracting features");
                rows = files
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(|path| -> Result<FeatureRow> {
                        let content = fs::read_to_string(path).with_context(|| {
                            format!("Failed to read CoNLL-U file {}", path.display())
                        })?;
                        let filename = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        Ok(FeatureRow::from_conllu(filename, &content))
                    })
                    .collect::<Result<Vec<_>>>()?;
                pb.finish_with_message(format!("Extracted {} feature rows", rows.len()));
            }
        }

        let written = rows.len();
        write_dataset(&self.dataset_path, rows)?;
        Ok(written)
    }

    /// The whole pipeline: every `(raw_dir, split)` pair through extraction,
    /// then annotation, then the dataset write. Returns the number of
    /// dataset rows.
    pub fn run(&self, annotator: &dyn Annotator, raw_splits: &[(PathBuf, String)]) -> Result<usize> {
        for (raw_dir, split) in raw_splits {
            self.extract_split(raw_dir, split)?;
        }
        self.annotate(annotator)?;
        self.extract_features()
    }
}
