use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches one `<doc …>…</doc>` entry; the body may span lines.
static DOC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<doc id="(\d+)" genre="(.*?)" gender="(.*?)">(.*?)</doc>"#)
        .expect("valid container regex")
});

/// Author gender label carried by the corpus. Anything other than the two
/// annotated values collapses to [`Gender::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    M,
    F,
    Unknown,
}

impl Gender {
    fn from_raw(raw: &str) -> Self {
        match raw {
            "M" => Self::M,
            "F" => Self::F,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One document pulled out of a raw container file.
#[derive(Clone, Debug)]
pub struct RawDoc {
    pub id: u64,
    pub genre: String,
    pub gender: Gender,
    /// Body text with newlines flattened to spaces, not yet sanitized.
    pub text: String,
}

impl RawDoc {
    /// Composite filename key: `{split}#{id}#{genre}#{gender}.txt`.
    #[must_use]
    pub fn filename(&self, split: &str) -> String {
        format!("{split}#{}#{}#{}.txt", self.id, self.genre, self.gender)
    }
}

/// Extracts every `<doc>` entry from a container file, in document order.
/// Text outside the markers is ignored.
#[must_use]
pub fn parse_container(content: &str) -> Vec<RawDoc> {
    DOC_PATTERN
        .captures_iter(content)
        .map(|caps| RawDoc {
            // \d+ in the pattern guarantees digits; ids longer than u64 do
            // not occur in any known corpus.
            id: caps[1].parse().unwrap_or(0),
            genre: caps[2].to_string(),
            gender: Gender::from_raw(&caps[3]),
            text: caps[4].trim().replace('\n', " "),
        })
        .collect()
}
