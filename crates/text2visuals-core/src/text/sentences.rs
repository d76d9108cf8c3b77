use super::SentenceSplitter;

/// Punctuation-driven sentence splitter.
///
/// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) that is followed by whitespace or the end of the text, or at a
/// blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSentenceSplitter;

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201d}' | '\u{2019}')
}

fn starts_blank_line(rest: &str) -> bool {
    rest.trim_start_matches([' ', '\t', '\r']).starts_with('\n')
}

impl SentenceSplitter for RuleSentenceSplitter {
    fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut push = |piece: &str| {
            let piece = piece.trim();
            if !piece.is_empty() {
                sentences.push(piece.to_string());
            }
        };

        let mut start = 0;
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let end = if is_terminator(c) {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if !(is_terminator(next) || is_closer(next)) {
                        break;
                    }
                    end = j + next.len_utf8();
                    chars.next();
                }
                match chars.peek() {
                    None => Some(end),
                    Some(&(_, next)) if next.is_whitespace() => Some(end),
                    Some(_) => None,
                }
            } else if c == '\n' && starts_blank_line(&text[i + 1..]) {
                Some(i)
            } else {
                None
            };

            if let Some(end) = end {
                push(&text[start..end]);
                start = end;
            }
        }
        push(&text[start..]);

        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        RuleSentenceSplitter.sentences(text)
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        assert_eq!(
            split("Build a login page. Design the form. Implement validation. Test the flow."),
            [
                "Build a login page.",
                "Design the form.",
                "Implement validation.",
                "Test the flow."
            ]
        );
    }

    #[test]
    fn keeps_decimals_and_closing_quotes_together() {
        assert_eq!(
            split("Version 2.5 shipped! He said \"done.\" Then what?"),
            ["Version 2.5 shipped!", "He said \"done.\"", "Then what?"]
        );
    }

    #[test]
    fn blank_lines_end_sentences() {
        assert_eq!(
            split("First heading\n\nSecond part without period"),
            ["First heading", "Second part without period"]
        );
    }

    #[test]
    fn trailing_text_without_punctuation_is_kept() {
        assert_eq!(split("One. two"), ["One.", "two"]);
    }

    #[test]
    fn empty_and_blank_text_has_no_sentences() {
        assert!(split("").is_empty());
        assert!(split("  \n ").is_empty());
        assert_eq!(split("...  "), ["..."]);
    }
}
