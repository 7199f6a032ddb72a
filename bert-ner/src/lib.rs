#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! The Bert NER pipeline labels the tokens of sequences.
//!
//! Sequences are tokenized and encoded into fixed-length inputs for an external token
//! classification model, which is plugged in as a [`Classifier`]. The predicted logits are decoded
//! into one label per token, skipping special and padding tokens.
//!
//! ```no_run
//! use bert_ner::{Builder, Classifier, Encodings, Logits};
//!
//! struct Model;
//!
//! impl Classifier for Model {
//!     type Error = std::convert::Infallible;
//!
//!     fn classify(&self, encodings: &Encodings) -> Result<Logits, Self::Error> {
//!         let positions = encodings.token_ids.ncols();
//!         Ok(Logits::from_flat(vec![0.; positions * 5], 5).unwrap())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Builder::from_files("vocab.txt", "labels.txt")?
//!         .with_max_len(200)?
//!         .build(Model)?;
//!
//!     for labeled in pipeline.run("Issued $ 250 million of senior notes.")? {
//!         println!("{} --- {}", labeled.token, labeled.label);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod classifier;
mod labels;
mod pipeline;
mod tokenizer;

pub use crate::{
    builder::{Builder, BuilderError},
    classifier::{Classifier, Logits, LogitsError},
    labels::{Labels, LabelsError},
    pipeline::{Pipeline, PipelineError},
    tokenizer::{AttentionMasks, Encodings, TokenIds, TokenizerError, TypeIds},
};
pub use wordpiece_tokenizer::{Labeled, Token, Truncation, Vocab};
