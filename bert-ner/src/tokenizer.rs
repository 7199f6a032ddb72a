use std::io::BufRead;

use derive_more::{Deref, From};
use displaydoc::Display;
use ndarray::{Array2, Dim, Ix2};
use thiserror::Error;
use wordpiece_tokenizer::{
    Builder,
    BuilderError,
    Token,
    Tokenizer as BertTokenizer,
    TokenizerError as BertTokenizerError,
    Truncation,
    Vocab,
};

/// A wrapped, pre-configured Bert tokenizer.
pub struct Tokenizer {
    tokenizer: BertTokenizer,
    shape: Ix2,
}

/// The potential errors of the tokenizer.
#[derive(Debug, Display, Error)]
pub enum TokenizerError {
    /// Failed to build the tokenizer: {0}
    Builder(#[from] BuilderError),
    /// Failed to tokenize the sequence: {0}
    Tokenize(#[from] BertTokenizerError),
}

/// The token ids of the encoded sequence.
#[derive(Clone, Debug, Deref, From)]
pub struct TokenIds(pub Array2<i64>);

/// The attention mask of the encoded sequence.
#[derive(Clone, Debug, Deref, From)]
pub struct AttentionMasks(pub Array2<i64>);

/// The type ids of the encoded sequence.
#[derive(Clone, Debug, Deref, From)]
pub struct TypeIds(pub Array2<i64>);

/// The encoded sequence.
///
/// Only the token ids and the attention mask are inputs of the model, the type ids are kept for
/// models which distinguish segments.
#[derive(Clone, Debug)]
pub struct Encodings {
    pub token_ids: TokenIds,
    pub attention_masks: AttentionMasks,
    pub type_ids: TypeIds,
}

impl Tokenizer {
    /// Creates a tokenizer from a vocabulary.
    ///
    /// Requires the maximum number of tokens per tokenized sequence, which applies to padding and
    /// truncation and includes special tokens as well.
    pub fn new(
        vocab: impl BufRead,
        token_size: usize,
        truncation: Truncation,
    ) -> Result<Self, TokenizerError> {
        let tokenizer = Builder::new(vocab)?
            .with_model("##", 100)
            .with_max_len(token_size)?
            .with_truncation(truncation)
            .build()?;
        let shape = Dim([1, token_size]);

        Ok(Tokenizer { tokenizer, shape })
    }

    /// Tokenizes the sequence.
    pub fn tokenize(&self, sequence: impl AsRef<str>) -> Result<Vec<Token>, TokenizerError> {
        self.tokenizer.tokenize(&[sequence]).map_err(Into::into)
    }

    /// Encodes the sequence.
    ///
    /// The encoding is in correct shape for the model.
    pub fn encode(&self, sequence: impl AsRef<str>) -> Result<Encodings, TokenizerError> {
        let encoding = self.tokenizer.encode::<i64>(&[sequence])?;

        let token_ids = Array2::from_shape_fn(self.shape, |(_, j)| {
            encoding.ids().get(j).copied().unwrap_or(0)
        })
        .into();
        let attention_masks = Array2::from_shape_fn(self.shape, |(_, j)| {
            encoding.attention_mask().get(j).copied().unwrap_or(0)
        })
        .into();
        let type_ids = Array2::from_shape_fn(self.shape, |(_, j)| {
            encoding.type_ids().get(j).copied().unwrap_or(0)
        })
        .into();

        Ok(Encodings {
            token_ids,
            attention_masks,
            type_ids,
        })
    }

    /// Gets the token size.
    pub fn token_size(&self) -> usize {
        self.shape[1]
    }

    /// Gets the underlying word piece tokenizer.
    pub(crate) fn inner(&self) -> &BertTokenizer {
        &self.tokenizer
    }

    /// Gets the vocabulary.
    pub fn vocab(&self) -> &Vocab {
        self.tokenizer.vocab()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::BufReader};

    use ndarray::ArrayView;
    use wordpiece_tokenizer::EncodingError;

    use super::*;

    fn tokenizer(token_size: usize, truncation: Truncation) -> Tokenizer {
        let vocab = BufReader::new(File::open(test_utils::ner::vocab().unwrap()).unwrap());
        Tokenizer::new(vocab, token_size, truncation).unwrap()
    }

    #[test]
    fn test_encode() {
        let shape = (1, 16);
        let encoding = tokenizer(shape.1, Truncation::reject())
            .encode("Issued $ 250 million of senior notes.")
            .unwrap();
        assert_eq!(
            encoding.token_ids.0,
            ArrayView::from_shape(
                shape,
                &[2, 13, 14, 15, 16, 9, 10, 11, 8, 3, 0, 0, 0, 0, 0, 0],
            )
            .unwrap(),
        );
        assert_eq!(
            encoding.attention_masks.0,
            ArrayView::from_shape(shape, &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0])
                .unwrap(),
        );
        assert_eq!(
            encoding.type_ids.0,
            ArrayView::from_shape(shape, &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])
                .unwrap(),
        );
    }

    #[test]
    fn test_encode_subwords() {
        let tokenizer = tokenizer(8, Truncation::reject());
        let tokens = tokenizer.tokenize("Securitization").unwrap();
        assert_eq!(
            tokens
                .iter()
                .map(|token| token.value.as_str())
                .collect::<Vec<_>>(),
            ["[CLS]", "sec", "##ur", "##iti", "##zation", "[SEP]"],
        );
        let encoding = tokenizer.encode("Securitization").unwrap();
        assert_eq!(
            encoding.token_ids.0,
            ArrayView::from_shape((1, 8), &[2, 30, 31, 32, 33, 3, 0, 0]).unwrap(),
        );
    }

    #[test]
    fn test_encode_too_long() {
        let sequence = "Issued $ 250 million of senior notes.";
        assert!(matches!(
            tokenizer(5, Truncation::reject()).encode(sequence),
            Err(TokenizerError::Tokenize(BertTokenizerError::Encoding(
                EncodingError::Oversize { len: 10, max_len: 5 }
            ))),
        ));

        let encoding = tokenizer(5, Truncation::fixed()).encode(sequence).unwrap();
        assert_eq!(
            encoding.token_ids.0,
            ArrayView::from_shape((1, 5), &[2, 13, 14, 15, 3]).unwrap(),
        );
        assert_eq!(
            encoding.attention_masks.0,
            ArrayView::from_shape((1, 5), &[1, 1, 1, 1, 1]).unwrap(),
        );
    }

    #[test]
    fn test_encode_empty() {
        let encoding = tokenizer(4, Truncation::reject()).encode("").unwrap();
        assert_eq!(
            encoding.token_ids.0,
            ArrayView::from_shape((1, 4), &[2, 3, 0, 0]).unwrap(),
        );
    }
}
