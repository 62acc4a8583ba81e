use std::borrow::Cow;

use indicatif::{ProgressBar, ProgressStyle};

/// The batch progress bar every pipeline stage attaches to its file loop.
#[must_use]
pub fn progress_bar(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_length_and_message() {
        let pb = progress_bar(3, "Processing");
        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.message(), "Processing");
    }
}
