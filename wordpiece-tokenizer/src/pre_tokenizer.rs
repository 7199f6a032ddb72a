/// The characters which are isolated into words of their own.
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '\\', '/', '?', '!', '#', '$', '%', '(', ')', '=', '+', '-', '*', '"',
    '\'', '–', '_', '`', '<', '>', '&', '^', '@', '{', '}', '[', ']', '|', '~',
];

/// A pre-tokenizer which splits sequences into lowercased words.
///
/// Sequences are split on spaces and line breaks, then every punctuation character becomes a
/// word of its own. Other whitespace is kept within the words.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreTokenizer;

impl PreTokenizer {
    /// Pre-tokenizes the sequence.
    pub(crate) fn pre_tokenize(&self, sequence: &str) -> Vec<String> {
        // runs of spaces are covered by splitting on single spaces
        sequence
            .split(' ')
            .flat_map(|fragment| fragment.split("\r\n"))
            .flat_map(isolate_punctuation)
            .map(str::to_lowercase)
            .collect()
    }
}

/// Splits the fragment before and after each punctuation character.
fn isolate_punctuation(fragment: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    for (idx, punctuation) in fragment.match_indices(PUNCTUATION) {
        if idx > start {
            words.push(&fragment[start..idx]);
        }
        words.push(punctuation);
        start = idx + punctuation.len();
    }
    if start < fragment.len() {
        words.push(&fragment[start..]);
    }

    words
}
