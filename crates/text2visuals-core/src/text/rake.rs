use super::PhraseExtractor;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    // Word runs, or runs of punctuation; whitespace is dropped.
    Regex::new(r"\w+|[^\w\s]+").expect("token pattern is valid")
});

static ENGLISH_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
        "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
        "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
        "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn",
        "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
        "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
        "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Rapid Automatic Keyword Extraction.
///
/// Candidate phrases are the word runs between stopwords and punctuation.
/// Each word scores `degree / frequency`, each phrase the sum of its word
/// scores. Phrases come back lowercased, best first, ties in order of first
/// appearance, without duplicates.
pub struct RakeExtractor {
    stopwords: &'static HashSet<&'static str>,
}

impl Default for RakeExtractor {
    fn default() -> Self {
        Self {
            stopwords: &ENGLISH_STOPWORDS,
        }
    }
}

impl RakeExtractor {
    fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let mut phrases = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for token in TOKEN.find_iter(text) {
            let word = token.as_str().to_lowercase();
            let is_word = word.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_');
            if is_word && !self.stopwords.contains(word.as_str()) {
                current.push(word);
            } else if !current.is_empty() {
                phrases.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            phrases.push(current);
        }
        phrases
    }
}

impl PhraseExtractor for RakeExtractor {
    fn ranked_phrases(&self, text: &str) -> Vec<String> {
        let phrases = self.candidate_phrases(text);

        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            for word in phrase {
                *frequency.entry(word).or_default() += 1.0;
                *degree.entry(word).or_default() += phrase.len() as f64;
            }
        }

        let mut seen = HashSet::new();
        let mut scored: Vec<(f64, String)> = Vec::new();
        for phrase in &phrases {
            let joined = phrase.join(" ");
            if !seen.insert(joined.clone()) {
                continue;
            }
            let score = phrase
                .iter()
                .map(|w| degree[w.as_str()] / frequency[w.as_str()])
                .sum::<f64>();
            scored.push((score, joined));
        }

        // Stable sort keeps first-appearance order among equal scores.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, phrase)| phrase).collect()
    }
}
