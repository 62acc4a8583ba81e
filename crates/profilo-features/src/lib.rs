//! Core of the profilo pipeline: the CoNLL-U interchange model, the fixed
//! dataset schema, the per-document feature aggregator and the CSV writer.
//!
//! ## Quick start
//!
//! ```rust
//! use profilo_features::FeatureRow;
//!
//! let conllu = "# sent_id = doc-1\n1\tciao\tciao\tINTJ\t_\t_\t0\troot\t_\t_\n";
//! let row = FeatureRow::from_conllu("doc.conllu", conllu);
//! assert_eq!(row.get("n_tokens"), Some(1.0));
//! ```

mod aggregator;
pub mod conllu;
mod dataset;
pub mod schema;

pub use aggregator::FeatureRow;
pub use dataset::write_dataset;
