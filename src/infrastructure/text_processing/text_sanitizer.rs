use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L})-[ \t]*\r?\n[ \t]*(\p{L})").unwrap());

/// Cleans up text coming out of PDF parsing or OCR: NFKC normalization,
/// words re-joined across hyphenated line breaks, runs of blank lines
/// collapsed to paragraph breaks, internal whitespace collapsed to single
/// spaces.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let joined = HYPHEN_BREAK.replace_all(&normalized, "$1$2");

    let paragraphs: Vec<String> = joined
        .split("\n\n")
        .map(|paragraph| {
            paragraph
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(collapse_spaces)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect();

    paragraphs.join("\n\n")
}

fn collapse_spaces(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
