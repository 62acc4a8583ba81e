//! The feature aggregator: one pass over a CoNLL-U file, one fixed-width
//! numeric row out.

use serde::Serialize;
use tracing::{debug, warn};

use crate::conllu::Upos;
use crate::schema::{
    COLUMNS, IDX_CHAR_PER_TOK, IDX_LEXICAL_DENSITY, IDX_N_SENTENCES, IDX_N_TOKENS,
    IDX_TOKENS_PER_SENT, IDX_UPOS_START, NUM_FEATURES,
};

/// One dataset row: the document filename plus one value per schema column.
///
/// Rows always carry exactly [`NUM_FEATURES`] values; columns without real
/// computation stay at zero so the schema acts as a stable contract.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureRow {
    filename: String,
    values: Vec<f64>,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl FeatureRow {
    /// Computes the row for one serialized document.
    ///
    /// Counting is permissive by design: comment and blank lines never count
    /// as tokens, token lines with too few fields contribute only the fields
    /// they have, and tags outside the closed UPOS set are excluded from the
    /// distribution entirely. Every ratio guards its zero denominator, so an
    /// empty document yields an all-zero row rather than an error.
    #[must_use]
    pub fn from_conllu(filename: impl Into<String>, content: &str) -> Self {
        let mut n_sentences = 0u64;
        let mut n_tokens = 0u64;
        let mut form_chars = 0u64;
        let mut upos_counts = [0u64; Upos::ALL.len()];

        for line in content.lines() {
            if line.starts_with('#') {
                if line.starts_with("# sent_id") {
                    n_sentences += 1;
                }
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            n_tokens += 1;

            if !line.contains('\t') {
                continue;
            }
            let mut fields = line.split('\t');
            let _index = fields.next();
            if let Some(form) = fields.next() {
                form_chars += form.chars().count() as u64;
            }
            let _lemma = fields.next();
            if let Some(tag) = fields.next().and_then(Upos::from_tag) {
                upos_counts[tag as usize] += 1;
            }
        }

        let total_upos: u64 = upos_counts.iter().sum();
        let content_words: u64 = Upos::ALL
            .iter()
            .filter(|tag| tag.is_content_word())
            .map(|tag| upos_counts[*tag as usize])
            .sum();

        let mut values = vec![0.0; NUM_FEATURES];
        values[IDX_N_SENTENCES] = n_sentences as f64;
        values[IDX_N_TOKENS] = n_tokens as f64;
        values[IDX_TOKENS_PER_SENT] = ratio(n_tokens, n_sentences);
        values[IDX_CHAR_PER_TOK] = ratio(form_chars, n_tokens);
        for (offset, count) in upos_counts.iter().enumerate() {
            values[IDX_UPOS_START + offset] = ratio(*count, total_upos);
        }
        values[IDX_LEXICAL_DENSITY] = ratio(content_words, n_tokens);

        let filename = filename.into();
        debug!(filename = %filename, n_sentences, n_tokens, "Aggregated document features");
        Self { filename, values }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Looks a value up by its schema column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        let position = COLUMNS.iter().position(|name| *name == column)?;
        self.values.get(position.checked_sub(1)?).copied()
    }

    /// Forces the value vector to the schema length, zero-padding or
    /// truncating. A mismatch is repaired and logged, never fatal.
    pub fn pad_or_truncate(&mut self) {
        if self.values.len() != NUM_FEATURES {
            warn!(
                filename = %self.filename,
                found = self.values.len(),
                expected = NUM_FEATURES,
                "Feature row length mismatch, repairing"
            );
            self.values.resize(NUM_FEATURES, 0.0);
        }
    }
}
