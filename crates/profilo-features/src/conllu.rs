//! In-memory model of annotated documents and the CoNLL-U interchange
//! format that connects the external annotator to the feature aggregator.
//!
//! The reader is deliberately tolerant: real annotator output contains
//! multi-word range lines, stray comments and truncated fields, and none of
//! that should abort a batch. Lines that cannot be read as tokens are
//! skipped; fields that are missing fall back to their CoNLL-U defaults.

use std::fmt::Write as _;

use tracing::trace;

/// The closed set of Universal Dependencies coarse part-of-speech tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Upos {
    /// All tags, in the order the dataset schema lists them.
    pub const ALL: [Self; 17] = [
        Self::Adj,
        Self::Adp,
        Self::Adv,
        Self::Aux,
        Self::Cconj,
        Self::Det,
        Self::Intj,
        Self::Noun,
        Self::Num,
        Self::Part,
        Self::Pron,
        Self::Propn,
        Self::Punct,
        Self::Sconj,
        Self::Sym,
        Self::Verb,
        Self::X,
    ];

    /// Parses a tag column value; anything outside the closed set is `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ADJ" => Some(Self::Adj),
            "ADP" => Some(Self::Adp),
            "ADV" => Some(Self::Adv),
            "AUX" => Some(Self::Aux),
            "CCONJ" => Some(Self::Cconj),
            "DET" => Some(Self::Det),
            "INTJ" => Some(Self::Intj),
            "NOUN" => Some(Self::Noun),
            "NUM" => Some(Self::Num),
            "PART" => Some(Self::Part),
            "PRON" => Some(Self::Pron),
            "PROPN" => Some(Self::Propn),
            "PUNCT" => Some(Self::Punct),
            "SCONJ" => Some(Self::Sconj),
            "SYM" => Some(Self::Sym),
            "VERB" => Some(Self::Verb),
            "X" => Some(Self::X),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }

    /// Content-word tags, the numerator of lexical density.
    #[must_use]
    pub fn is_content_word(self) -> bool {
        matches!(self, Self::Noun | Self::Verb | Self::Adj | Self::Adv)
    }
}

/// One annotated token. `head` is the 1-based index of the dependency parent
/// within the same sentence, 0 for the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub index: u32,
    pub form: String,
    pub lemma: String,
    /// `None` when the annotator emitted a tag outside the closed set.
    pub upos: Option<Upos>,
    pub xpos: String,
    pub head: u32,
    pub deprel: String,
}

/// An ordered run of tokens, immutable once produced by the annotator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// The surface text, forms joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        let forms: Vec<&str> = self.tokens.iter().map(|t| t.form.as_str()).collect();
        forms.join(" ")
    }
}

/// Reads CoNLL-U text into sentences. Blank lines end a sentence; comment
/// lines are passed over; unreadable token lines are skipped.
#[must_use]
pub fn parse(content: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = Sentence::default();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.tokens.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        // Multi-word ranges ("3-4") and empty nodes ("5.1") fail here and
        // are skipped along with anything else that has no plain index.
        let Ok(index) = fields[0].parse::<u32>() else {
            trace!(line, "Skipping unreadable token line");
            continue;
        };
        current.tokens.push(Token {
            index,
            form: fields.get(1).copied().unwrap_or("").to_string(),
            lemma: fields.get(2).copied().unwrap_or("_").to_string(),
            upos: fields.get(3).and_then(|tag| Upos::from_tag(tag)),
            xpos: fields.get(4).copied().unwrap_or("_").to_string(),
            head: fields
                .get(6)
                .and_then(|h| h.parse().ok())
                .unwrap_or(0),
            deprel: fields.get(7).copied().unwrap_or("_").to_string(),
        });
    }
    if !current.tokens.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// Renders one annotated document in the interchange format: a `# newdoc`
/// marker, then per sentence `# newpar`, `# sent_id = {doc}-{n}` and
/// `# text`, one tab-separated line per token, and a blank separator line.
#[must_use]
pub fn write_document(doc_id: &str, sentences: &[Sentence]) -> String {
    let mut out = String::from("# newdoc\n");
    for (n, sentence) in sentences.iter().enumerate() {
        out.push_str("# newpar\n");
        let _ = writeln!(out, "# sent_id = {doc_id}-{}", n + 1);
        let _ = writeln!(out, "# text = {}", sentence.text());
        for token in &sentence.tokens {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t_\t{}\t{}\t_\t_",
                token.index,
                token.form,
                token.lemma,
                token.upos.map_or("_", Upos::as_str),
                token.xpos,
                token.head,
                token.deprel,
            );
        }
        out.push('\n');
    }
    out
}
