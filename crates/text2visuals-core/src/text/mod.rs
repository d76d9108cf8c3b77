//! Text analysis collaborators used to preprocess input and to build
//! fallback trees. Both are traits so other extractors can be injected.

mod rake;
mod sentences;

pub use rake::RakeExtractor;
pub use sentences::RuleSentenceSplitter;

/// Ranks key phrases of a text, most relevant first. May return nothing.
pub trait PhraseExtractor: Send + Sync {
    fn ranked_phrases(&self, text: &str) -> Vec<String>;
}

/// Splits a text into trimmed, non-empty sentences in order.
pub trait SentenceSplitter: Send + Sync {
    fn sentences(&self, text: &str) -> Vec<String>;
}

/// Process-wide text analysis state, built once and shared read-only.
pub struct TextAnalyzer {
    phrases: Box<dyn PhraseExtractor>,
    splitter: Box<dyn SentenceSplitter>,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(RakeExtractor::default(), RuleSentenceSplitter)
    }
}

impl TextAnalyzer {
    pub fn new(
        phrases: impl PhraseExtractor + 'static,
        splitter: impl SentenceSplitter + 'static,
    ) -> Self {
        Self {
            phrases: Box::new(phrases),
            splitter: Box::new(splitter),
        }
    }

    pub fn ranked_phrases(&self, text: &str) -> Vec<String> {
        self.phrases.ranked_phrases(text)
    }

    pub fn sentences(&self, text: &str) -> Vec<String> {
        self.splitter.sentences(text)
    }

    /// Up to `limit` main topics: ranked phrases, or the leading sentences
    /// when no phrase could be extracted.
    pub fn main_topics(&self, text: &str, limit: usize) -> Vec<String> {
        let mut topics = self.ranked_phrases(text);
        if topics.is_empty() {
            topics = self.sentences(text);
            topics.truncate(limit.min(3));
        }
        topics.truncate(limit);
        topics
    }
}
