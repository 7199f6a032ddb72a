use std::{iter, sync::Arc};

use displaydoc::Display;
use num_traits::{FromPrimitive, Num};
use thiserror::Error;

use crate::{
    model::Token,
    truncation::Truncation,
    vocab::{SpecialToken, Vocab, VocabError},
};

/// An encoded sequence of fixed length.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Encoding<N> {
    /// The IDs of the tokens.
    pub(crate) ids: Vec<N>,
    /// The segment IDs of the tokens.
    pub(crate) type_ids: Vec<N>,
    /// The mask identifying padding tokens.
    pub(crate) attention_mask: Vec<N>,
    /// The tokens, without padding.
    pub(crate) tokens: Vec<Token>,
}

impl<N> Encoding<N> {
    /// Gets the total length.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks whether this is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Gets the number of tokens before the padding.
    pub fn real_len(&self) -> usize {
        self.tokens.len()
    }

    /// Gets the ids.
    pub fn ids(&self) -> &[N] {
        self.ids.as_slice()
    }

    /// Gets the type ids.
    pub fn type_ids(&self) -> &[N] {
        self.type_ids.as_slice()
    }

    /// Gets the attention mask.
    pub fn attention_mask(&self) -> &[N] {
        self.attention_mask.as_slice()
    }

    /// Gets the tokens.
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_slice()
    }
}

/// The potential errors of the encoder.
#[derive(Debug, Display, Error)]
pub enum EncodingError {
    /// The sequence of {len} tokens exceeds the maximum sequence length of {max_len}
    Oversize { len: usize, max_len: usize },
    /// The token id {0} overflows the numeric type of the encoding
    Overflow(u32),
    /// The segment id {0} overflows the numeric type of the encoding
    SegmentOverflow(usize),
    /// Invalid vocabulary: {0}
    Vocab(#[from] VocabError),
}

/// An encoder of tokens into fixed-length sequences.
#[derive(Clone, Debug)]
pub struct Encoder {
    pub(crate) vocab: Arc<Vocab>,
    pub(crate) max_len: usize,
    pub(crate) truncation: Truncation,
}

impl Encoder {
    /// Gets the maximum sequence length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encodes the tokens.
    ///
    /// The ids are padded to the maximum sequence length. The segment ids start at zero and
    /// increase after each separation token.
    pub fn encode<N>(&self, tokens: Vec<Token>) -> Result<Encoding<N>, EncodingError>
    where
        N: Num + FromPrimitive + Copy,
    {
        let tokens = self.truncation.truncate(tokens, self.max_len, &self.vocab)?;
        let pad_id = self.vocab.special_id(SpecialToken::Padding)?;
        let pad_id = N::from_u32(pad_id).ok_or(EncodingError::Overflow(pad_id))?;
        let len = tokens.len();
        let pad_len = self.max_len - len;

        let ids = tokens
            .iter()
            .map(|token| N::from_u32(token.id).ok_or(EncodingError::Overflow(token.id)))
            .chain(iter::repeat(pad_id).take(pad_len).map(Ok))
            .collect::<Result<Vec<_>, _>>()?;
        let type_ids = tokens
            .iter()
            .scan(0, |segment, token| {
                let type_id = *segment;
                if token.value == SpecialToken::Separation.as_str() {
                    *segment += 1;
                }
                Some(type_id)
            })
            .map(|segment| {
                N::from_usize(segment).ok_or(EncodingError::SegmentOverflow(segment))
            })
            .chain(iter::repeat(N::zero()).take(pad_len).map(Ok))
            .collect::<Result<Vec<_>, _>>()?;
        let attention_mask = iter::repeat(N::one())
            .take(len)
            .chain(iter::repeat(N::zero()).take(pad_len))
            .collect();

        Ok(Encoding {
            ids,
            type_ids,
            attention_mask,
            tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::vocab;

    fn encoder(max_len: usize, truncation: Truncation) -> Encoder {
        Encoder {
            vocab: vocab(),
            max_len,
            truncation,
        }
    }

    fn tokens(values: &[(&str, u32)]) -> Vec<Token> {
        values
            .iter()
            .map(|(value, id)| Token::new(*value, *id))
            .collect()
    }

    #[test]
    fn test_encode() {
        let encoding = encoder(8, Truncation::reject())
            .encode::<i64>(tokens(&[
                ("[CLS]", 2),
                ("hello", 5),
                ("world", 6),
                ("[SEP]", 3),
            ]))
            .unwrap();
        assert_eq!(encoding.ids(), [2, 5, 6, 3, 0, 0, 0, 0]);
        assert_eq!(encoding.attention_mask(), [1, 1, 1, 1, 0, 0, 0, 0]);
        assert_eq!(encoding.type_ids(), [0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encoding.len(), 8);
        assert_eq!(encoding.real_len(), 4);
    }

    #[test]
    fn test_segments() {
        let encoding = encoder(8, Truncation::reject())
            .encode::<u32>(tokens(&[
                ("[CLS]", 2),
                ("hello", 5),
                ("[SEP]", 3),
                ("world", 6),
                ("[SEP]", 3),
                ("wor", 7),
            ]))
            .unwrap();
        assert_eq!(encoding.type_ids(), [0, 0, 0, 1, 1, 2, 0, 0]);

        // monotone until the padding and increasing right after each separation
        let type_ids = &encoding.type_ids()[..encoding.real_len()];
        for (idx, pair) in type_ids.windows(2).enumerate() {
            let step = if encoding.tokens()[idx].value == "[SEP]" { 1 } else { 0 };
            assert_eq!(pair[1], pair[0] + step);
        }
    }

    #[test]
    fn test_attention_mask_sum() {
        for max_len in 4..10 {
            let encoding = encoder(max_len, Truncation::reject())
                .encode::<u8>(tokens(&[
                    ("[CLS]", 2),
                    ("hello", 5),
                    ("world", 6),
                    ("[SEP]", 3),
                ]))
                .unwrap();
            assert_eq!(encoding.len(), max_len);
            assert_eq!(
                encoding.attention_mask().iter().map(|&m| m as usize).sum::<usize>(),
                4,
            );
        }
    }

    #[test]
    fn test_oversize() {
        let sequence = tokens(&[("[CLS]", 2), ("hello", 5), ("world", 6), ("[SEP]", 3)]);

        assert!(matches!(
            encoder(3, Truncation::reject()).encode::<i64>(sequence.clone()),
            Err(EncodingError::Oversize { len: 4, max_len: 3 }),
        ));

        let encoding = encoder(3, Truncation::fixed())
            .encode::<i64>(sequence)
            .unwrap();
        assert_eq!(encoding.ids(), [2, 5, 3]);
        assert_eq!(encoding.attention_mask(), [1, 1, 1]);
    }

    #[test]
    fn test_overflow() {
        let encoder = Encoder {
            vocab: Arc::new(Vocab::new((0..300).map(|id| {
                if id == 0 {
                    "[PAD]".to_string()
                } else {
                    id.to_string()
                }
            }))),
            max_len: 4,
            truncation: Truncation::reject(),
        };
        assert!(encoder.encode::<u8>(tokens(&[("255", 255)])).is_ok());
        assert!(matches!(
            encoder.encode::<u8>(tokens(&[("256", 256)])),
            Err(EncodingError::Overflow(256)),
        ));
    }

    #[test]
    fn test_segment_overflow() {
        let separations = (0..257).map(|_| ("[SEP]", 3)).collect::<Vec<_>>();
        let encoder = encoder(300, Truncation::reject());
        assert!(matches!(
            encoder.encode::<u8>(tokens(&separations)),
            Err(EncodingError::SegmentOverflow(256)),
        ));
        assert!(encoder.encode::<u8>(tokens(&separations[..256])).is_ok());
        assert_eq!(
            encoder
                .encode::<u16>(tokens(&separations))
                .unwrap()
                .type_ids()[256],
            256,
        );
    }

    #[test]
    fn test_missing_padding_token() {
        let encoder = Encoder {
            vocab: Arc::new(Vocab::new(vec!["hello"])),
            max_len: 4,
            truncation: Truncation::reject(),
        };
        assert!(matches!(
            encoder.encode::<i64>(tokens(&[("hello", 0)])),
            Err(EncodingError::Vocab(VocabError::MissingSpecialToken("[PAD]"))),
        ));
    }
}
