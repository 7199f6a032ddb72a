use std::{
    collections::HashMap,
    io::{BufRead, Error as IoError},
};

use displaydoc::Display;
use log::debug;
use thiserror::Error;

/// The special tokens with a reserved meaning in a Bert vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialToken {
    Padding,
    Unknown,
    Classification,
    Separation,
    Mask,
}

impl SpecialToken {
    /// All special tokens in a fixed order.
    pub const ALL: [SpecialToken; 5] = [
        SpecialToken::Padding,
        SpecialToken::Unknown,
        SpecialToken::Classification,
        SpecialToken::Separation,
        SpecialToken::Mask,
    ];

    /// Gets the literal of the special token.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialToken::Padding => "[PAD]",
            SpecialToken::Unknown => "[UNK]",
            SpecialToken::Classification => "[CLS]",
            SpecialToken::Separation => "[SEP]",
            SpecialToken::Mask => "[MASK]",
        }
    }
}

/// The potential errors of the vocabulary.
#[derive(Debug, Display, Error)]
pub enum VocabError {
    /// Failed to read the vocabulary: {0}
    Read(#[from] IoError),
    /// The token `{0}` doesn't exist in the vocabulary
    UnknownToken(String),
    /// The special token `{0}` doesn't exist in the vocabulary
    MissingSpecialToken(&'static str),
}

/// The ids of all special tokens of a vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialTokenIds([u32; 5]);

impl SpecialTokenIds {
    /// Checks whether the id belongs to a special token.
    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    /// Gets the id of the special token.
    pub fn get(&self, token: SpecialToken) -> u32 {
        match token {
            SpecialToken::Padding => self.0[0],
            SpecialToken::Unknown => self.0[1],
            SpecialToken::Classification => self.0[2],
            SpecialToken::Separation => self.0[3],
            SpecialToken::Mask => self.0[4],
        }
    }

    /// Iterates over the ids in the order of [`SpecialToken::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

/// A node of the character trie over the vocabulary entries.
#[derive(Clone, Debug, Default)]
struct Node {
    id: Option<u32>,
    children: HashMap<char, Node>,
}

impl Node {
    fn insert(&mut self, entry: &str, id: u32) {
        let node = entry
            .chars()
            .fold(self, |node, c| node.children.entry(c).or_default());
        // duplicates keep the position of their first occurrence
        node.id.get_or_insert(id);
    }

    /// Finds the byte length and id of the longest entry which is a prefix of the text.
    fn longest_prefix(&self, text: &str) -> Option<(usize, u32)> {
        let mut node = self;
        let mut longest = None;
        for (idx, c) in text.char_indices() {
            match node.children.get(&c) {
                Some(child) => {
                    node = child;
                    if let Some(id) = node.id {
                        longest = Some((idx + c.len_utf8(), id));
                    }
                }
                None => break,
            }
        }

        longest
    }
}

/// A word piece vocabulary.
///
/// The id of an entry is its position in the load order. The vocabulary is immutable once
/// created and meant to be shared behind an [`Arc`](std::sync::Arc).
#[derive(Clone, Debug)]
pub struct Vocab {
    tokens: Vec<String>,
    ids: HashMap<String, u32>,
    trie: Node,
}

impl Vocab {
    /// Creates a vocabulary from its ordered entries.
    ///
    /// The entries are trimmed of surrounding whitespace.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = Vec::new();
        let mut ids = HashMap::new();
        let mut trie = Node::default();
        for (idx, entry) in entries.into_iter().enumerate() {
            let entry: String = entry.into();
            let entry = entry.trim().to_string();
            let id = idx as u32;
            ids.entry(entry.clone()).or_insert(id);
            // an empty entry holds its position but never matches as a piece
            if !entry.is_empty() {
                trie.insert(&entry, id);
            }
            tokens.push(entry);
        }

        Self { tokens, ids, trie }
    }

    /// Parses the vocabulary with one entry per line.
    pub fn parse(vocab: impl BufRead) -> Result<Self, VocabError> {
        let entries = vocab.lines().collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed a vocabulary of {} entries.", entries.len());

        Ok(Self::new(entries))
    }

    /// Gets the number of entries.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checks whether the token is an entry.
    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    /// Gets the id of the token.
    pub fn index_of(&self, token: &str) -> Result<u32, VocabError> {
        self.id(token)
            .ok_or_else(|| VocabError::UnknownToken(token.to_string()))
    }

    pub(crate) fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    /// Gets the token of the id.
    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Gets the id of the special token.
    pub fn special_id(&self, token: SpecialToken) -> Result<u32, VocabError> {
        self.id(token.as_str())
            .ok_or(VocabError::MissingSpecialToken(token.as_str()))
    }

    /// Gets the ids of all special tokens.
    pub fn special_token_ids(&self) -> Result<SpecialTokenIds, VocabError> {
        let mut ids = [0; 5];
        for (id, token) in ids.iter_mut().zip(SpecialToken::ALL.iter()) {
            *id = self.special_id(*token)?;
        }

        Ok(SpecialTokenIds(ids))
    }

    /// Finds the longest entry which is a literal prefix of the text.
    pub fn longest_prefix<'t>(&self, text: &'t str) -> Option<(&'t str, u32)> {
        self.trie
            .longest_prefix(text)
            .map(|(len, id)| (&text[..len], id))
    }
}
