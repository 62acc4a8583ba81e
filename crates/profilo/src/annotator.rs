use std::io::Write as _;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use profilo_features::conllu::{self, Sentence};

/// The external linguistic annotator, as a capability.
///
/// Tokenization, POS tagging and dependency parsing all happen behind this
/// trait; the pipeline never does NLP itself. Implementations are loaded
/// once and shared across the worker pool by reference, so they must be
/// `Sync`. Tests substitute a stub.
pub trait Annotator: Sync {
    /// Annotates one cleaned document, returning its sentences.
    fn annotate(&self, text: &str) -> Result<Vec<Sentence>>;
}

/// Production annotator backed by an external command (a UDPipe or Stanza
/// wrapper, typically): the document text goes to the command's stdin and
/// the CoNLL-U it prints on stdout is read back.
///
/// Note there is no timeout: a stuck annotator stalls its worker.
pub struct CommandAnnotator {
    program: String,
    args: Vec<String>,
}

impl CommandAnnotator {
    /// Builds an annotator from a whitespace-separated command line.
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let Some(program) = parts.next() else {
            bail!("Annotator command line is empty");
        };
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl Annotator for CommandAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Sentence>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to spawn annotator command '{}'", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .context("Annotator stdin was not captured")?;

        // Feed stdin from a separate thread while draining stdout, so a
        // document larger than the pipe buffer cannot deadlock. A write
        // error just means the child quit early; the exit status below is
        // the authoritative failure signal.
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || {
                let _ = stdin.write_all(text.as_bytes());
            });
            let output = child.wait_with_output();
            let _ = writer.join();
            output
        })
        .context("Failed to read annotator output")?;
        if !output.status.success() {
            bail!("Annotator command '{}' exited with {}", self.program, output.status);
        }
        let stdout = String::from_utf8(output.stdout)
            .context("Annotator produced non-UTF-8 output")?;
        Ok(conllu::parse(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(CommandAnnotator::new("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn identity_command_round_trips_conllu() {
        // `cat` stands in for a real annotator: whatever CoNLL-U goes in
        // comes back out and must parse.
        let annotator = CommandAnnotator::new("cat").unwrap();
        let sentences = annotator
            .annotate("1\tciao\tciao\tINTJ\t_\t_\t0\troot\t_\t_\n")
            .unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].tokens[0].form, "ciao");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_an_error() {
        let annotator = CommandAnnotator::new("false").unwrap();
        assert!(annotator.annotate("whatever").is_err());
    }
}
