//! # profilo
//!
//! A batch pipeline that prepares labeled raw text corpora for a downstream
//! authorship/genre classifier: container files are sanitized into
//! per-document texts, an external annotator turns them into CoNLL-U, and a
//! single-pass aggregator reduces each document to a fixed-schema numeric
//! feature row collected into one CSV.
//!
//! The linguistic analysis itself (tokenization, tagging, parsing) is not
//! done here: it lives behind the [`Annotator`] trait, normally implemented
//! by [`CommandAnnotator`] wrapping an external NLP tool.
//!
//! ## Quick start
//!
//! ```no_run
//! use profilo::{CommandAnnotator, Pipeline};
//! # fn main() -> anyhow::Result<()> {
//! let annotator = CommandAnnotator::new("stanza-wrapper --lang it")?;
//! let rows = Pipeline::new("work").run(
//!     &annotator,
//!     &[("data/original/training".into(), "training".into())],
//! )?;
//! println!("{rows} documents profiled");
//! # Ok(())
//! # }
//! ```

mod annotator;
mod pipeline;

pub use annotator::{Annotator, CommandAnnotator};
pub use pipeline::Pipeline;

pub use profilo_corpus::{clean_text, parse_container, process_split, Gender, RawDoc};
pub use profilo_features::{conllu, schema, write_dataset, FeatureRow};
