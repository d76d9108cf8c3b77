/// Collapse every run of whitespace to a single space and trim the ends.
pub fn clean_phrase(phrase: &str) -> String {
    phrase.split_whitespace().collect::<Vec<_>>().join(" ")
}
