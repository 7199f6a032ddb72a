use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError},
    path::Path,
    sync::Arc,
};

use displaydoc::Display;
use thiserror::Error;

use crate::{
    encoding::Encoder,
    model::Model,
    pre_tokenizer::PreTokenizer,
    tokenizer::Tokenizer,
    truncation::Truncation,
    vocab::{Vocab, VocabError},
};

/// A builder to create a [`Tokenizer`].
pub struct Builder {
    vocab: Arc<Vocab>,
    prefix: String,
    max_chars: usize,
    max_len: usize,
    truncation: Truncation,
}

/// The potential errors of the builder.
#[derive(Debug, Display, Error)]
pub enum BuilderError {
    /// Failed to load a data file: {0}
    DataFile(#[from] IoError),
    /// Failed to load the vocabulary: {0}
    Vocab(#[from] VocabError),
    /// The maximum sequence length must be at least two to allow for special tokens
    MaxLen,
    /// The continuing subword prefix must not be empty
    Prefix,
}

impl Builder {
    /// Creates a [`Tokenizer`] builder from a vocabulary file.
    ///
    /// The default settings are the same as for [`new()`].
    ///
    /// [`new()`]: Self::new
    pub fn from_file(vocab: impl AsRef<Path>) -> Result<Self, BuilderError> {
        Self::new(BufReader::new(File::open(vocab)?))
    }

    /// Creates a [`Tokenizer`] builder from an in-memory vocabulary.
    ///
    /// The default settings are the same as for [`from_vocab()`].
    ///
    /// [`from_vocab()`]: Self::from_vocab
    pub fn new(vocab: impl BufRead) -> Result<Self, BuilderError> {
        Ok(Self::from_vocab(Vocab::parse(vocab)?))
    }

    /// Creates a [`Tokenizer`] builder from a parsed vocabulary.
    ///
    /// The default settings are:
    /// - A word piece model with `"##"` continuing subword prefix and `100` maximum characters
    /// per word.
    /// - A maximum sequence length of `200`.
    /// - The [`Truncation::reject()`] strategy.
    pub fn from_vocab(vocab: impl Into<Arc<Vocab>>) -> Self {
        Self {
            vocab: vocab.into(),
            prefix: "##".into(),
            max_chars: 100,
            max_len: 200,
            truncation: Truncation::default(),
        }
    }

    /// Configures the word piece model.
    pub fn with_model(mut self, prefix: impl Into<String>, max_chars: usize) -> Self {
        self.prefix = prefix.into();
        self.max_chars = max_chars;
        self
    }

    /// Sets the maximum sequence length, which includes the special tokens.
    ///
    /// # Errors
    /// Fails if `len` is less than two.
    pub fn with_max_len(mut self, len: usize) -> Result<Self, BuilderError> {
        if len < 2 {
            Err(BuilderError::MaxLen)
        } else {
            self.max_len = len;
            Ok(self)
        }
    }

    /// Configures the truncation strategy.
    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Builds the tokenizer.
    ///
    /// The special tokens are looked up on first use.
    pub fn build(self) -> Result<Tokenizer, BuilderError> {
        if self.prefix.is_empty() {
            return Err(BuilderError::Prefix);
        }

        let model = Model {
            vocab: self.vocab.clone(),
            prefix: self.prefix,
            max_chars: self.max_chars,
        };
        let encoder = Encoder {
            vocab: self.vocab.clone(),
            max_len: self.max_len,
            truncation: self.truncation,
        };

        Ok(Tokenizer {
            vocab: self.vocab,
            pre_tokenizer: PreTokenizer,
            model,
            encoder,
        })
    }
}
