#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! A Bert word piece tokenizer which converts sequences into fixed-length encodings and decodes
//! per-token logits into labels.
//!
//! The tokenizer is based on a word piece vocabulary and consists of a pre-tokenizer, a greedy
//! longest-prefix word piece model and an encoder including a truncation strategy. The encodings
//! can be of any numerical data type which implements [`Num`]` + `[`FromPrimitive`]` + `[`Copy`].
//!
//! The pre-tokenizer is not configurable:
//! - Splits on spaces and line breaks.
//! - Isolates punctuation characters.
//! - Lowercases the words.
//!
//! The word piece model is configurable by:
//! - The continuing subword prefix.
//! - The maximum number of characters per word.
//!
//! The encoder is configurable by:
//! - The maximum sequence length.
//! - A truncation strategy.
//!
//! ```no_run
//! use wordpiece_tokenizer::{Builder, Truncation};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokenizer = Builder::from_file("vocab.txt")?
//!         .with_model("##", 100)
//!         .with_max_len(128)?
//!         .with_truncation(Truncation::fixed())
//!         .build()?;
//!
//!     let encoding = tokenizer.encode::<i64>(&["This is a sequence."])?;
//!     let logits = vec![0.; encoding.len() * 2];
//!     let labeled = tokenizer
//!         .decoder()
//!         .decode(encoding.ids(), &logits, &["O", "B-X"])?;
//!
//!     Ok(())
//! }
//! ```
//!
//! [`Num`]: num_traits::Num
//! [`FromPrimitive`]: num_traits::FromPrimitive

mod builder;
mod decoder;
mod encoding;
mod model;
mod pre_tokenizer;
mod tokenizer;
mod truncation;
mod vocab;

pub use crate::{
    builder::{Builder, BuilderError},
    decoder::{Decoder, DecoderError, Labeled},
    encoding::{Encoder, Encoding, EncodingError},
    model::Token,
    tokenizer::{Tokenizer, TokenizerError},
    truncation::Truncation,
    vocab::{SpecialToken, SpecialTokenIds, Vocab, VocabError},
};

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use crate::Vocab;

    /// A small vocabulary with the special tokens in front.
    pub const VOCAB: [&str; 9] = [
        "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "hello", "world", "wor", "##ld",
    ];

    pub fn vocab() -> Arc<Vocab> {
        Arc::new(Vocab::new(VOCAB.iter().copied()))
    }
}
