use std::{fmt, sync::Arc};

use displaydoc::Display;
use num_traits::ToPrimitive;
use thiserror::Error;

use crate::vocab::{Vocab, VocabError};

/// A token with its predicted label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labeled {
    pub token: String,
    pub label: String,
}

/// The potential errors of the label decoder.
#[derive(Debug, Display, Error)]
pub enum DecoderError {
    /// The labels must not be empty
    Labels,
    /// The {logits} logits are not divisible into rows of {labels} labels
    Shape { logits: usize, labels: usize },
    /// The logits cover {positions} positions but there are only {ids} token ids
    Positions { positions: usize, ids: usize },
    /// The token id {id} at position {position} doesn't exist in the vocabulary
    TokenId { position: usize, id: String },
    /// Invalid vocabulary: {0}
    Vocab(#[from] VocabError),
}

/// A decoder of per-token logits into labels.
#[derive(Clone, Debug)]
pub struct Decoder {
    vocab: Arc<Vocab>,
}

impl Decoder {
    /// Creates a decoder for the vocabulary.
    pub fn new(vocab: Arc<Vocab>) -> Self {
        Self { vocab }
    }

    /// Decodes the logits into the most probable labels of the tokens.
    ///
    /// The logits are a row-major sequence of one row of scores per position, each row as long
    /// as the labels. Positions of special tokens are skipped.
    pub fn decode<N, L>(
        &self,
        token_ids: &[N],
        logits: &[f32],
        labels: &[L],
    ) -> Result<Vec<Labeled>, DecoderError>
    where
        N: ToPrimitive + fmt::Display,
        L: AsRef<str>,
    {
        if labels.is_empty() {
            return Err(DecoderError::Labels);
        }
        if logits.len() % labels.len() != 0 {
            return Err(DecoderError::Shape {
                logits: logits.len(),
                labels: labels.len(),
            });
        }
        let positions = logits.len() / labels.len();
        if token_ids.len() < positions {
            return Err(DecoderError::Positions {
                positions,
                ids: token_ids.len(),
            });
        }
        let special_ids = self.vocab.special_token_ids()?;

        let mut labeled = Vec::new();
        for (position, (id, scores)) in token_ids
            .iter()
            .zip(logits.chunks_exact(labels.len()))
            .enumerate()
        {
            let unknown = || DecoderError::TokenId {
                position,
                id: id.to_string(),
            };
            let id = id.to_u32().ok_or_else(unknown)?;
            if special_ids.contains(id) {
                continue;
            }
            let token = self.vocab.token(id).ok_or_else(unknown)?;
            labeled.push(Labeled {
                token: token.to_string(),
                label: labels[argmax(scores)].as_ref().to_string(),
            });
        }

        Ok(labeled)
    }
}

/// Finds the index of the first maximum score, where any number beats NaN.
fn argmax(scores: &[f32]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold((0, f32::NAN), |(max_idx, max), (idx, &score)| {
            if score > max || (max.is_nan() && !score.is_nan()) {
                (idx, score)
            } else {
                (max_idx, max)
            }
        })
        .0
}
