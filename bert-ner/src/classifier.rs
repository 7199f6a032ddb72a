use std::error::Error;

use derive_more::{Deref, From};
use displaydoc::Display;
use ndarray::Array2;
use thiserror::Error;

use crate::tokenizer::Encodings;

/// The predicted scores of the labels per token position.
///
/// The shape is `[positions, labels]`.
#[derive(Clone, Debug, Deref, From)]
pub struct Logits(pub Array2<f32>);

/// The potential errors of the logits.
#[derive(Debug, Display, Error)]
pub enum LogitsError {
    /// The {len} logits are not divisible into rows of {labels} labels
    Shape { len: usize, labels: usize },
}

impl Logits {
    /// Creates the logits from a flat, row-major sequence of scores.
    pub fn from_flat(logits: Vec<f32>, labels: usize) -> Result<Self, LogitsError> {
        let len = logits.len();
        if labels == 0 || len % labels != 0 {
            return Err(LogitsError::Shape { len, labels });
        }

        Array2::from_shape_vec((len / labels, labels), logits)
            .map(Into::into)
            .map_err(|_| LogitsError::Shape { len, labels })
    }

    /// Gets the number of token positions.
    pub fn positions(&self) -> usize {
        self.nrows()
    }

    /// Gets the number of scores per token position.
    pub fn labels(&self) -> usize {
        self.ncols()
    }
}

/// A token classification model.
///
/// The model itself is external, this is the boundary through which it receives the encoded
/// sequence and returns the logits.
pub trait Classifier {
    type Error: Error + Send + Sync + 'static;

    /// Predicts the logits of the encoded sequence.
    fn classify(&self, encodings: &Encodings) -> Result<Logits, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat() {
        let logits = Logits::from_flat(vec![0.1, 0.9, 0.2, 0.8, 0.3, 0.7], 2).unwrap();
        assert_eq!(logits.positions(), 3);
        assert_eq!(logits.labels(), 2);
        assert_eq!(logits[[1, 0]], 0.2);
    }

    #[test]
    fn test_from_flat_invalid() {
        assert!(matches!(
            Logits::from_flat(vec![0.1, 0.9, 0.2], 2),
            Err(LogitsError::Shape { len: 3, labels: 2 }),
        ));
        assert!(matches!(
            Logits::from_flat(vec![0.1], 0),
            Err(LogitsError::Shape { len: 1, labels: 0 }),
        ));
    }
}
