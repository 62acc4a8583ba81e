use std::fs;
use std::path::Path;

use ahash::HashMap;
use anyhow::{Context, Result};
use indicatif::ProgressIterator;
use tracing::{debug, info, warn};

use crate::container::parse_container;
use crate::progress::progress_bar;
use crate::sanitizer::clean_text;

/// Turns every container file of one dataset split into cleaned per-document
/// text files under `clean_dir/{genre}/`, named by the composite key
/// `{split}#{id}#{genre}#{gender}.txt`.
///
/// A missing or empty input directory is a warning, not an error, so a run
/// over several splits keeps going. Returns the number of documents written.
pub fn process_split(input_dir: &Path, clean_dir: &Path, split: &str) -> Result<usize> {
    if !input_dir.is_dir() {
        warn!(input_dir = %input_dir.display(), split, "Input directory missing, skipping split");
        return Ok(0);
    }

    let mut files: Vec<_> = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read input directory {}", input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!(input_dir = %input_dir.display(), split, "No container files found, skipping split");
        return Ok(0);
    }

    debug!(num_files = files.len(), split, "Extracting documents from containers");
    let pb = progress_bar(files.len(), format!("Extracting {split} texts"));

    let mut per_genre: HashMap<String, usize> = HashMap::default();
    let mut written = 0usize;

    for path in files.iter().progress_with(pb.clone()) {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read container {}", path.display()))?;

        for doc in parse_container(&content) {
            let genre_dir = clean_dir.join(&doc.genre);
            fs::create_dir_all(&genre_dir)
                .with_context(|| format!("Failed to create genre directory {}", genre_dir.display()))?;

            let out_path = genre_dir.join(doc.filename(split));
            fs::write(&out_path, clean_text(&doc.text))
                .with_context(|| format!("Failed to write cleaned text {}", out_path.display()))?;

            *per_genre.entry(doc.genre).or_insert(0) += 1;
            written += 1;
        }
    }
    pb.finish_with_message(format!("Extracted {written} {split} documents"));

    for (genre, count) in &per_genre {
        debug!(genre = %genre, count = *count, "Documents per genre");
    }
    info!(split, documents = written, "Split extraction complete");
    Ok(written)
}
