//! Character-offset tokenization for standoff alignment
//!
//! BRAT annotations address text by character offsets, so converting them
//! into token spans needs a segmenter that remembers where each token came
//! from. This one walks unicode word bounds and drops pure-whitespace
//! segments; punctuation survives as standalone tokens, which is what the
//! alignment step expects.
//!
//! Only the BRAT converter uses this. The analysis core never tokenizes -
//! documents arrive pre-tokenized.

use unicode_segmentation::UnicodeSegmentation;

/// A surface token with its `[start, end)` character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Segment `text` into offset-carrying tokens along unicode word bounds.
pub fn segment(text: &str) -> Vec<OffsetToken> {
    let mut tokens = Vec::new();
    let mut char_pos = 0usize;
    for piece in text.split_word_bounds() {
        let char_len = piece.chars().count();
        if !piece.chars().all(char::is_whitespace) {
            tokens.push(OffsetToken {
                text: piece.to_string(),
                start: char_pos,
                end: char_pos + char_len,
            });
        }
        char_pos += char_len;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[OffsetToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        let tokens = segment("The drug aspirin reduces pain.");
        assert_eq!(
            texts(&tokens),
            ["The", "drug", "aspirin", "reduces", "pain", "."]
        );
    }

    #[test]
    fn offsets_address_the_source_text() {
        let tokens = segment("He said \"stop\" twice.");
        let stop = tokens.iter().find(|t| t.text == "stop").expect("token");
        let chars: Vec<char> = "He said \"stop\" twice.".chars().collect();
        let recovered: String = chars[stop.start..stop.end].iter().collect();
        assert_eq!(recovered, "stop");
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        // 'é' is two bytes but one character
        let tokens = segment("café au lait");
        assert_eq!(tokens[0].text, "café");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 4);
        assert_eq!(tokens[1].text, "au");
        assert_eq!(tokens[1].start, 5);
    }

    #[test]
    fn whitespace_never_becomes_a_token() {
        let tokens = segment("  a \t b\n");
        assert_eq!(texts(&tokens), ["a", "b"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(segment("").is_empty());
    }
}
