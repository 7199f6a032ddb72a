use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use log::debug;
use serde_json::{json, Value};
use structopt::StructOpt;
use wordpiece_tokenizer::{Builder, Tokenizer, Truncation};

use crate::exit_code::NO_ERROR;

/// Tokenizes and encodes a text and prints the result as JSON.
#[derive(StructOpt, Debug)]
pub struct TokenizeCmd {
    /// The vocabulary file with one word piece per line.
    #[structopt(long)]
    pub vocab: PathBuf,

    /// The fixed length of the encoded sequence.
    #[structopt(long, default_value = "200")]
    pub max_len: usize,

    /// Truncates oversized sequences instead of failing.
    #[structopt(long)]
    pub truncate: bool,

    /// Pretty-prints the JSON.
    #[structopt(long)]
    pub pretty: bool,

    /// The text to tokenize.
    pub text: String,
}

impl TokenizeCmd {
    pub fn run(self) -> Result<i32, Error> {
        let TokenizeCmd {
            vocab,
            max_len,
            truncate,
            pretty,
            text,
        } = self;

        let tokenizer = build_tokenizer(&vocab, max_len, truncate)?;
        let result = tokenize(&tokenizer, &text)?;
        debug!("Encoded text of {} characters.", text.len());

        let serialized = if pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{}", serialized);

        Ok(NO_ERROR)
    }
}

fn build_tokenizer(vocab: &Path, max_len: usize, truncate: bool) -> Result<Tokenizer, Error> {
    let truncation = if truncate {
        Truncation::fixed()
    } else {
        Truncation::reject()
    };

    Builder::from_file(vocab)
        .with_context(|| format!("Loading the vocabulary {} failed", vocab.display()))?
        .with_max_len(max_len)?
        .with_truncation(truncation)
        .build()
        .context("Building the tokenizer failed")
}

fn tokenize(tokenizer: &Tokenizer, text: &str) -> Result<Value, Error> {
    let encoding = tokenizer
        .encode::<i64>(&[text])
        .context("Encoding the text failed")?;
    let tokens = encoding
        .tokens()
        .iter()
        .map(|token| token.value.as_str())
        .collect::<Vec<_>>();

    Ok(json!({
        "tokens": tokens,
        "token_ids": encoding.ids(),
        "attention_mask": encoding.attention_mask(),
        "type_ids": encoding.type_ids(),
    }))
}
