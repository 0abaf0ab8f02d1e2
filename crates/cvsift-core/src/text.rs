//! String helpers shared by the reader, the segmenter and the field parsers.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:[.'-]\w+)*|[^\w\s]").expect("token pattern is valid"));

/// English stopwords, lower-case.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Strips accents, drops every remaining non-ASCII character, flattens
/// newlines and trims.
#[must_use]
pub fn normalize_string(s: &str) -> String {
    let ascii: String = s
        .nfd()
        .filter(char::is_ascii)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    ascii.trim().to_string()
}

/// Removes English stopwords, re-joining the remaining tokens with spaces.
#[must_use]
pub fn filter_stopwords(text: &str) -> String {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !STOPWORD_SET.contains(token.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps only the first occurrence of each word, compared case-insensitively.
#[must_use]
pub fn merge_doubled_words(text: &str) -> String {
    let mut seen = HashSet::new();
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| seen.insert(word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case alphanumeric words of `text`, in order.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
