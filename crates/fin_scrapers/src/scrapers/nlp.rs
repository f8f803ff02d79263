//! Keyword and extractive-summary helpers for downloaded article text.

use std::collections::{HashMap, HashSet};

pub const KEYWORD_COUNT: usize = 10;
pub const SUMMARY_SENTENCES: usize = 5;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "more",
    "most", "mr", "ms", "my", "new", "no", "nor", "not", "now", "of", "off", "on", "once",
    "one", "only", "or", "other", "our", "ours", "out", "over", "own", "said", "same", "says",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "year", "you", "your",
];

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\'').replace('\'', "").to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_content_word(word: &str) -> bool {
    word.chars().count() > 2
        && !word.chars().all(|c| c.is_ascii_digit())
        && !STOPWORDS.contains(&word)
}

/// Most frequent content words, ties broken by first appearance.
pub fn keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in tokens(text).into_iter().enumerate() {
        if !is_content_word(&word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// Splits on sentence-ending punctuation followed by whitespace, and on newlines.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            sentences.push(std::mem::take(&mut current));
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |n| n.is_whitespace()) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    sentences.push(current);

    sentences
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Up to `max_sentences` sentences that carry the most keywords and title
/// words, kept in their original order and joined by newlines.
pub fn summarize(title: &str, text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || max_sentences == 0 {
        return String::new();
    }

    let top: HashSet<String> = keywords(text, KEYWORD_COUNT).into_iter().collect();
    let title_words: HashSet<String> = tokens(title)
        .into_iter()
        .filter(|w| is_content_word(w))
        .collect();

    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let words = tokens(sentence);
            if words.is_empty() {
                return (i, 0.0);
            }
            let keyword_hits = words.iter().filter(|w| top.contains(*w)).count() as f64;
            let title_hits = words.iter().filter(|w| title_words.contains(*w)).count() as f64;
            (i, (keyword_hits + 1.5 * title_hits) / words.len() as f64)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut chosen: Vec<usize> = scored.into_iter().take(max_sentences).map(|(i, _)| i).collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
