use log::warn;

use crate::{
    encoding::EncodingError,
    model::Token,
    vocab::{SpecialToken, Vocab},
};

/// A strategy for sequences which exceed the maximum sequence length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation(Truncations);

/// The available truncation strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Truncations {
    /// Rejects oversized sequences.
    Reject,
    /// Truncates oversized sequences to a fixed length.
    Fixed,
}

impl Default for Truncation {
    fn default() -> Self {
        Self::reject()
    }
}

impl Truncation {
    /// Creates a strategy which fails on oversized sequences.
    pub fn reject() -> Self {
        Self(Truncations::Reject)
    }

    /// Creates a strategy which drops the trailing tokens of oversized sequences.
    ///
    /// The truncated sequence is closed by a separation token.
    pub fn fixed() -> Self {
        Self(Truncations::Fixed)
    }

    /// Truncates the tokens to the maximum length.
    ///
    /// The maximum length must be at least two.
    pub(crate) fn truncate(
        &self,
        mut tokens: Vec<Token>,
        max_len: usize,
        vocab: &Vocab,
    ) -> Result<Vec<Token>, EncodingError> {
        if tokens.len() <= max_len {
            return Ok(tokens);
        }

        match self.0 {
            Truncations::Reject => Err(EncodingError::Oversize {
                len: tokens.len(),
                max_len,
            }),
            Truncations::Fixed => {
                let sep = Token::special(vocab, SpecialToken::Separation)?;
                warn!(
                    "Truncated a sequence of {} tokens to the maximum sequence length of {}.",
                    tokens.len(),
                    max_len,
                );
                tokens.truncate(max_len - 1);
                tokens.push(sep);
                Ok(tokens)
            }
        }
    }
}
