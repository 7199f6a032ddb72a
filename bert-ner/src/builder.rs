use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError},
    path::Path,
};

use displaydoc::Display;
use thiserror::Error;
use wordpiece_tokenizer::Truncation;

use crate::{
    labels::{Labels, LabelsError},
    pipeline::Pipeline,
    tokenizer::{Tokenizer, TokenizerError},
};

/// A builder to create a [`Pipeline`].
pub struct Builder<V, L> {
    vocab: V,
    labels: L,
    max_len: usize,
    truncation: Truncation,
}

/// Potential errors of the [`Pipeline`] [`Builder`].
#[derive(Debug, Display, Error)]
pub enum BuilderError {
    /// The maximum length must be at least two to allow for special tokens
    MaxLen,
    /// Failed to load a data file: {0}
    DataFile(#[from] IoError),
    /// Failed to build the tokenizer: {0}
    Tokenizer(#[from] TokenizerError),
    /// Failed to load the labels: {0}
    Labels(#[from] LabelsError),
}

impl Builder<BufReader<File>, BufReader<File>> {
    /// Creates a [`Pipeline`] builder from files.
    pub fn from_files(
        vocab: impl AsRef<Path>,
        labels: impl AsRef<Path>,
    ) -> Result<Self, BuilderError> {
        let vocab = BufReader::new(File::open(vocab)?);
        let labels = BufReader::new(File::open(labels)?);
        Ok(Self::new(vocab, labels))
    }
}

impl<V, L> Builder<V, L>
where
    V: BufRead,
    L: BufRead,
{
    /// Creates a [`Pipeline`] builder.
    pub fn new(vocab: V, labels: L) -> Self {
        Self {
            vocab,
            labels,
            max_len: 200,
            truncation: Truncation::default(),
        }
    }

    /// Sets the fixed length of the encoded sequences.
    ///
    /// Defaults to `200`.
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

    /// Sets the truncation strategy for sequences exceeding the maximum length.
    ///
    /// Defaults to rejecting them.
    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Builds a [`Pipeline`] around the classifier.
    ///
    /// # Errors
    /// Fails on an invalid vocabulary or invalid labels.
    pub fn build<C>(self, classifier: C) -> Result<Pipeline<C>, BuilderError> {
        let tokenizer = Tokenizer::new(self.vocab, self.max_len, self.truncation)?;
        let decoder = tokenizer.inner().decoder();
        let labels = Labels::parse(self.labels)?;

        Ok(Pipeline {
            tokenizer,
            decoder,
            labels,
            classifier,
        })
    }
}
