use std::{borrow::Cow, sync::Arc};

use crate::vocab::{SpecialToken, Vocab, VocabError};

/// A token of the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The surface form of the token.
    pub value: String,
    /// The id of the token in the vocabulary.
    pub id: u32,
}

impl Token {
    pub(crate) fn new(value: impl Into<String>, id: u32) -> Self {
        Self {
            value: value.into(),
            id,
        }
    }

    /// Creates the special token from the vocabulary.
    pub(crate) fn special(vocab: &Vocab, token: SpecialToken) -> Result<Self, VocabError> {
        vocab
            .special_id(token)
            .map(|id| Self::new(token.as_str(), id))
    }
}

/// A greedy longest-prefix word piece model.
///
/// A word is matched against the vocabulary as a whole first. Otherwise the longest entry which
/// is a prefix of the remaining word is taken as a piece and the consumed characters are replaced
/// by the continuing subword prefix, so that the following pieces are matched against prefixed
/// entries. A word which can't be decomposed completely is a single unknown token.
#[derive(Clone, Debug)]
pub struct Model {
    pub(crate) vocab: Arc<Vocab>,
    pub(crate) prefix: String,
    pub(crate) max_chars: usize,
}

impl Model {
    /// Words of up to this many characters must match verbatim.
    const MIN_DECOMPOSABLE_CHARS: usize = 3;

    /// Decomposes the word into pieces of the vocabulary.
    ///
    /// Empty and whitespace words don't yield any tokens.
    pub(crate) fn tokenize(&self, word: &str) -> Result<Vec<Token>, VocabError> {
        if word.trim().is_empty() {
            return Ok(Vec::new());
        }
        if let Some(id) = self.vocab.id(word) {
            return Ok(vec![Token::new(word, id)]);
        }

        let unknown = || Token::special(&self.vocab, SpecialToken::Unknown).map(|unk| vec![unk]);
        let chars = word.chars().count();
        if chars < Self::MIN_DECOMPOSABLE_CHARS || chars > self.max_chars {
            return unknown();
        }

        let mut pieces = Vec::new();
        let mut rest = word;
        while !rest.is_empty() {
            let candidate = if pieces.is_empty() {
                Cow::Borrowed(rest)
            } else {
                Cow::Owned(format!("{}{}", self.prefix, rest))
            };
            let marker = candidate.len() - rest.len();

            match self.vocab.longest_prefix(&candidate) {
                // the piece must consume at least one character of the word
                Some((piece, id)) if piece.len() > marker => {
                    rest = &rest[piece.len() - marker..];
                    pieces.push(Token::new(piece, id));
                }
                _ => return unknown(),
            }
        }

        Ok(pieces)
    }
}
