//! Raw corpus handling for the profilo pipeline: parsing `<doc>` container
//! files and scrubbing the text inside them so the downstream annotator only
//! sees linguistic material.

mod container;
mod extract;
mod progress;
mod sanitizer;

pub use container::{parse_container, Gender, RawDoc};
pub use extract::process_split;
pub use progress::progress_bar;
pub use sanitizer::clean_text;
