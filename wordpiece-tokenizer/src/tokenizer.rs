use std::sync::Arc;

use displaydoc::Display;
use log::debug;
use num_traits::{FromPrimitive, Num};
use thiserror::Error;

use crate::{
    decoder::Decoder,
    encoding::{Encoder, Encoding, EncodingError},
    model::{Model, Token},
    pre_tokenizer::PreTokenizer,
    vocab::{SpecialToken, Vocab, VocabError},
};

/// A Bert tokenizer.
///
/// Can be created via the [`Builder`] and consists of a pre-tokenizer, a greedy word piece model
/// and a fixed-length encoder.
///
/// [`Builder`]: crate::Builder
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pub(crate) vocab: Arc<Vocab>,
    pub(crate) pre_tokenizer: PreTokenizer,
    pub(crate) model: Model,
    pub(crate) encoder: Encoder,
}

/// The potential errors of the tokenizer.
#[derive(Debug, Display, Error)]
pub enum TokenizerError {
    /// Invalid vocabulary: {0}
    Vocab(#[from] VocabError),
    /// Failed to encode the tokens: {0}
    Encoding(#[from] EncodingError),
}

impl Tokenizer {
    /// Tokenizes the sequences.
    ///
    /// The tokens start with a class token and the tokens of each sequence are followed by a
    /// separation token.
    pub fn tokenize(&self, sequences: &[impl AsRef<str>]) -> Result<Vec<Token>, TokenizerError> {
        let cls = Token::special(&self.vocab, SpecialToken::Classification)?;
        let sep = Token::special(&self.vocab, SpecialToken::Separation)?;

        let mut tokens = vec![cls];
        for sequence in sequences {
            for word in self.pre_tokenizer.pre_tokenize(sequence.as_ref()) {
                tokens.extend(self.model.tokenize(&word)?);
            }
            tokens.push(sep.clone());
        }
        debug!(
            "Tokenized {} sequences into {} tokens.",
            sequences.len(),
            tokens.len(),
        );

        Ok(tokens)
    }

    /// Encodes the sequences.
    pub fn encode<N>(&self, sequences: &[impl AsRef<str>]) -> Result<Encoding<N>, TokenizerError>
    where
        N: Num + FromPrimitive + Copy,
    {
        let tokens = self.tokenize(sequences)?;
        self.encoder.encode(tokens).map_err(Into::into)
    }

    /// Gets the vocabulary.
    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    /// Gets the encoder.
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Creates a label decoder sharing the vocabulary.
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.vocab.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::Builder, tests::vocab, Truncation};

    fn tokenizer(max_len: usize) -> Tokenizer {
        Builder::from_vocab(vocab())
            .with_max_len(max_len)
            .unwrap()
            .build()
            .unwrap()
    }

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.value.as_str()).collect()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenizer(16).tokenize(&["hello world"]).unwrap();
        assert_eq!(values(&tokens), ["[CLS]", "hello", "world", "[SEP]"]);
        assert_eq!(
            tokens.iter().map(|token| token.id).collect::<Vec<_>>(),
            [2, 5, 6, 3],
        );
    }

    #[test]
    fn test_tokenize_multiple() {
        let tokens = tokenizer(16)
            .tokenize(&["Hello!", "", "worldx world"])
            .unwrap();
        assert_eq!(
            values(&tokens),
            ["[CLS]", "hello", "[UNK]", "[SEP]", "[SEP]", "[UNK]", "world", "[SEP]"],
        );
    }

    #[test]
    fn test_bracketing() {
        for sequences in [
            vec![],
            vec!["hello"],
            vec!["hello", "world"],
            vec!["  ", "hello\r\nworld", "xyz"],
        ] {
            let tokens = tokenizer(16).tokenize(&sequences).unwrap();
            assert_eq!(tokens[0].value, "[CLS]");
            assert_eq!(
                tokens.iter().filter(|token| token.value == "[SEP]").count(),
                sequences.len(),
            );
            if !sequences.is_empty() {
                assert_eq!(tokens.last().unwrap().value, "[SEP]");
            }
        }
    }

    #[test]
    fn test_encode() {
        let encoding = tokenizer(6).encode::<i64>(&["hello world"]).unwrap();
        assert_eq!(encoding.ids(), [2, 5, 6, 3, 0, 0]);
        assert_eq!(encoding.attention_mask(), [1, 1, 1, 1, 0, 0]);
        assert_eq!(encoding.type_ids(), [0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_oversize() {
        assert!(matches!(
            tokenizer(3).encode::<i64>(&["hello world"]),
            Err(TokenizerError::Encoding(EncodingError::Oversize { len: 4, max_len: 3 })),
        ));

        let encoding = Builder::from_vocab(vocab())
            .with_max_len(3)
            .unwrap()
            .with_truncation(Truncation::fixed())
            .build()
            .unwrap()
            .encode::<i64>(&["hello world"])
            .unwrap();
        assert_eq!(encoding.ids(), [2, 5, 3]);
    }

    #[test]
    fn test_missing_class_token() {
        let tokenizer = Builder::from_vocab(Vocab::new(vec!["[PAD]", "[SEP]", "hello"]))
            .build()
            .unwrap();
        assert!(matches!(
            tokenizer.tokenize(&["hello"]),
            Err(TokenizerError::Vocab(VocabError::MissingSpecialToken("[CLS]"))),
        ));
    }

    #[test]
    fn test_shared_across_threads() {
        let tokenizer = Arc::new(tokenizer(16));
        let handles = (0..4)
            .map(|_| {
                let tokenizer = tokenizer.clone();
                std::thread::spawn(move || tokenizer.tokenize(&["hello world"]).unwrap().len())
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
    }
}
