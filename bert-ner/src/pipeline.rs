use std::error::Error;

use displaydoc::Display;
use thiserror::Error;
use wordpiece_tokenizer::{Decoder, DecoderError, Labeled, Token, Vocab};

use crate::{
    classifier::{Classifier, Logits},
    labels::Labels,
    tokenizer::{Encodings, Tokenizer, TokenizerError},
};

/// A pipeline for a token classification model.
///
/// Can be created via the [`Builder`] and consists of a tokenizer, an external classifier and a
/// label decoder.
///
/// [`Builder`]: crate::builder::Builder
pub struct Pipeline<C> {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) decoder: Decoder,
    pub(crate) labels: Labels,
    pub(crate) classifier: C,
}

/// The potential errors of the [`Pipeline`].
#[derive(Debug, Display, Error)]
pub enum PipelineError {
    /// Failed to run the tokenizer: {0}
    Tokenizer(#[from] TokenizerError),
    /// Failed to run the classifier: {0}
    Classifier(#[source] Box<dyn Error + Send + Sync>),
    /// The classifier predicted {predicted} scores per token instead of {labels}
    Scores { predicted: usize, labels: usize },
    /// Failed to decode the logits: {0}
    Decoder(#[from] DecoderError),
}

impl<C> Pipeline<C> {
    /// Tokenizes the sequence.
    pub fn tokenize(&self, sequence: impl AsRef<str>) -> Result<Vec<Token>, PipelineError> {
        self.tokenizer.tokenize(sequence).map_err(Into::into)
    }

    /// Encodes the sequence into the inputs of the classifier.
    pub fn encode(&self, sequence: impl AsRef<str>) -> Result<Encodings, PipelineError> {
        self.tokenizer.encode(sequence).map_err(Into::into)
    }

    /// Decodes the logits of the encoded sequence into labeled tokens.
    ///
    /// Special and padding tokens are skipped.
    pub fn decode(
        &self,
        encodings: &Encodings,
        logits: &Logits,
    ) -> Result<Vec<Labeled>, PipelineError> {
        if logits.labels() != self.labels.len() {
            return Err(PipelineError::Scores {
                predicted: logits.labels(),
                labels: self.labels.len(),
            });
        }

        let token_ids = encodings.token_ids.iter().copied().collect::<Vec<_>>();
        let logits = logits.iter().copied().collect::<Vec<_>>();
        self.decoder
            .decode(&token_ids, &logits, self.labels.as_slice())
            .map_err(Into::into)
    }

    /// Labels the tokens of the sequence.
    pub fn run(&self, sequence: impl AsRef<str>) -> Result<Vec<Labeled>, PipelineError>
    where
        C: Classifier,
    {
        let encodings = self.encode(sequence)?;
        let logits = self
            .classifier
            .classify(&encodings)
            .map_err(|error| PipelineError::Classifier(Box::new(error)))?;
        self.decode(&encodings, &logits)
    }

    /// Gets the fixed length of the encoded sequences.
    pub fn max_len(&self) -> usize {
        self.tokenizer.token_size()
    }

    /// Gets the labels.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Gets the vocabulary.
    pub fn vocab(&self) -> &Vocab {
        self.tokenizer.vocab()
    }
}
