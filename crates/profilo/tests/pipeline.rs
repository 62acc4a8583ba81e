//! End-to-end pipeline test over a temporary corpus, with the external
//! annotator replaced by a stub.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use tempfile::tempdir;

use profilo::conllu::{Sentence, Token, Upos};
use profilo::schema::COLUMNS;
use profilo::{Annotator, Pipeline};

fn token(index: u32, form: &str, upos: Upos, head: u32, deprel: &str) -> Token {
    Token {
        index,
        form: form.to_string(),
        lemma: form.to_lowercase(),
        upos: Some(upos),
        xpos: "_".to_string(),
        head,
        deprel: deprel.to_string(),
    }
}

/// Returns the same two-sentence parse for every document: three tokens per
/// sentence, tagged NOUN, VERB, PUNCT.
struct StubAnnotator;

impl Annotator for StubAnnotator {
    fn annotate(&self, _text: &str) -> Result<Vec<Sentence>> {
        let sentence = |noun: &str, verb: &str| Sentence {
            tokens: vec![
                token(1, noun, Upos::Noun, 2, "nsubj"),
                token(2, verb, Upos::Verb, 0, "root"),
                token(3, ".", Upos::Punct, 2, "punct"),
            ],
        };
        Ok(vec![sentence("Cane", "corre"), sentence("Gatto", "dorme")])
    }
}

/// Fails on one specific document, to prove the batch keeps going. The
/// trigger word is under ten characters so the sanitizer leaves it alone
/// and it reaches the annotator.
struct FlakyAnnotator;

impl Annotator for FlakyAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Sentence>> {
        if text.contains("negato") {
            bail!("annotator rejected this document");
        }
        StubAnnotator.annotate(text)
    }
}

fn parse_csv_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let bytes = fs::read(path).expect("dataset exists");
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF", "dataset starts with a UTF-8 BOM");
    let content = String::from_utf8(bytes[3..].to_vec()).expect("valid UTF-8");
    let mut lines = content.lines();
    let header: Vec<String> = lines.next().expect("header").split(',').map(String::from).collect();
    let rows = lines
        .map(|line| line.split(',').map(String::from).collect())
        .collect();
    (header, rows)
}

fn field<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let idx = header.iter().position(|name| name == column).expect("known column");
    &row[idx]
}

#[test]
fn full_pipeline_produces_the_expected_dataset() {
    let raw = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(
        raw.path().join("corpus.txt"),
        "<doc id=\"1\" genre=\"diary\" gender=\"F\">guarda http://spam.example/xyz #offerta qui</doc>\
         <doc id=\"2\" genre=\"twitter\" gender=\"M\">ciao @amico</doc>",
    )
    .unwrap();

    let pipeline = Pipeline::new(work.path());
    let splits = [(raw.path().to_path_buf(), "training".to_string())];
    let rows = pipeline.run(&StubAnnotator, &splits).unwrap();
    assert_eq!(rows, 2);

    // cleaned texts land in per-genre directories, scrubbed
    let cleaned = fs::read_to_string(
        work.path()
            .join("clean")
            .join("diary")
            .join("training#1#diary#F.txt"),
    )
    .unwrap();
    assert_eq!(cleaned, "guarda qui");

    // conllu files carry one sent_id marker per sentence
    let conllu = fs::read_to_string(
        work.path()
            .join("conllu")
            .join("training#1#diary#F.conllu"),
    )
    .unwrap();
    assert_eq!(conllu.matches("# sent_id = ").count(), 2);

    let (header, data) = parse_csv_rows(&work.path().join("linguistic_features.csv"));
    assert_eq!(header.len(), COLUMNS.len());
    assert_eq!(data.len(), 2);
    for row in &data {
        assert_eq!(row.len(), COLUMNS.len());
    }

    // rows merge in filename order; stub gives every document the same stats
    let row = &data[0];
    assert_eq!(field(&header, row, "Filename"), "training#1#diary#F.conllu");
    assert_eq!(field(&header, row, "n_sentences"), "2.0");
    assert_eq!(field(&header, row, "n_tokens"), "6.0");
    assert_eq!(field(&header, row, "tokens_per_sent"), "3.0");
    let noun_dist: f64 = field(&header, row, "upos_dist_NOUN").parse().unwrap();
    assert!((noun_dist - 2.0 / 6.0).abs() < 1e-9);
    let density: f64 = field(&header, row, "lexical_density").parse().unwrap();
    assert!((density - 4.0 / 6.0).abs() < 1e-9);
    // schema columns without computation are zero-filled
    assert_eq!(field(&header, row, "avg_max_depth"), "0.0");
}

#[test]
fn one_failing_document_does_not_abort_the_batch() {
    let raw = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(
        raw.path().join("corpus.txt"),
        "<doc id=\"1\" genre=\"diary\" gender=\"F\">testo negato</doc>\
         <doc id=\"2\" genre=\"diary\" gender=\"M\">testo normale</doc>",
    )
    .unwrap();

    let pipeline = Pipeline::new(work.path());
    let splits = [(raw.path().to_path_buf(), "test".to_string())];
    let rows = pipeline.run(&FlakyAnnotator, &splits).unwrap();

    // the trigger word must survive sanitization, or nothing ever fails
    let cleaned = fs::read_to_string(
        work.path().join("clean").join("diary").join("test#1#diary#F.txt"),
    )
    .unwrap();
    assert!(cleaned.contains("negato"));

    // the rejected document is skipped, the other one goes through
    assert_eq!(rows, 1);
    let (_, data) = parse_csv_rows(&work.path().join("linguistic_features.csv"));
    assert_eq!(data.len(), 1);
    assert!(data[0][0].starts_with("test#2#diary#M"));
}

#[test]
fn rerunning_the_pipeline_rebuilds_the_dataset_wholesale() {
    let raw = tempdir().unwrap();
    let work = tempdir().unwrap();
    fs::write(
        raw.path().join("corpus.txt"),
        "<doc id=\"5\" genre=\"youtube\" gender=\"M\">un commento</doc>",
    )
    .unwrap();

    let pipeline = Pipeline::new(work.path());
    let splits: Vec<(PathBuf, String)> =
        vec![(raw.path().to_path_buf(), "training".to_string())];
    assert_eq!(pipeline.run(&StubAnnotator, &splits).unwrap(), 1);
    assert_eq!(pipeline.run(&StubAnnotator, &splits).unwrap(), 1);

    let (_, data) = parse_csv_rows(&work.path().join("linguistic_features.csv"));
    assert_eq!(data.len(), 1);
}
