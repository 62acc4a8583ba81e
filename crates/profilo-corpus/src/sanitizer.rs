use std::sync::LazyLock;

use regex::Regex;

/// Redaction passes, applied in order. The replacement for the amzn rule
/// restores the leading whitespace its pattern has to consume (the `regex`
/// crate has no look-behind).
static REDACTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // URLs, including bare www. links
        (r"http\S+|www\.\S+", ""),
        // amzn.com share links pasted into tweets
        (r"(^|\s)amzn\.com\S+", "$1"),
        // @-mentions
        (r"@\w+", ""),
        // #-hashtags
        (r"#\w+", ""),
        // very long tokens: random codes, mashed-together words
        (r"\b\w{10,}\b", ""),
        // anything that is not a word character, whitespace or basic punctuation
        (r"[^\w\s,.!?;]", ""),
        // collapse whitespace runs
        (r"\s+", " "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid redaction regex"),
            replacement,
        )
    })
    .collect()
});

/// Strips non-linguistic material from a raw document body: URLs, mentions,
/// hashtags, 10+-character tokens and stray symbols, then collapses
/// whitespace. The result is what the annotator gets to see.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (pattern, replacement) in REDACTIONS.iter() {
        cleaned = pattern.replace_all(&cleaned, *replacement).into_owned();
    }
    cleaned.trim().to_string()
}
