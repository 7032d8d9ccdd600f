//! Text tokenization and stemming for the client search model.
//!
//! Mirrors the browser engine's pipeline closely enough for previews:
//! split on whitespace and hyphens, trim punctuation from both ends,
//! lowercase, drop stop words, then stem.

use rust_stemmers::Stemmer;

/// Common English stop words filtered out of both documents and queries.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "he", "if", "in",
    "into", "is", "it", "its", "no", "not", "of", "on", "or", "that", "the", "their", "then",
    "there", "these", "they", "this", "to", "was", "will", "with",
];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into raw words, before any normalization.
pub(crate) fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

/// Lowercase a word and trim non-word characters from both ends.
///
/// Returns `None` when nothing is left.
pub(crate) fn normalize(word: &str) -> Option<String> {
    let trimmed = word.trim_matches(|c: char| !is_word_char(c));
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Normalize and stem a single word, filtering out stop words.
pub(crate) fn index_token(word: &str, stemmer: &Stemmer) -> Option<String> {
    let lowercase = normalize(word)?;

    // Skip stop words
    if STOP_WORDS.contains(&lowercase.as_str()) {
        return None;
    }

    Some(stemmer.stem(&lowercase).into_owned())
}

/// Tokenizes text into searchable, stemmed terms in order of appearance.
pub(crate) fn tokenize_and_stem(text: &str, stemmer: &Stemmer) -> Vec<String> {
    split_words(text)
        .filter_map(|word| index_token(word, stemmer))
        .collect()
}
