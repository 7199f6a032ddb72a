use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Error};
use bert_ner::{Builder, Labeled, Logits, Pipeline, Truncation};
use log::debug;
use structopt::StructOpt;

use crate::exit_code::NO_ERROR;

/// Decodes the logits of a text into labeled tokens.
#[derive(StructOpt, Debug)]
pub struct DecodeCmd {
    /// The vocabulary file with one word piece per line.
    #[structopt(long)]
    pub vocab: PathBuf,

    /// The labels file with one label per line.
    #[structopt(long)]
    pub labels: PathBuf,

    /// The JSON file with the flat array of logits predicted for the text.
    #[structopt(long)]
    pub logits: PathBuf,

    /// The fixed length of the encoded sequence.
    #[structopt(long, default_value = "200")]
    pub max_len: usize,

    /// Truncates oversized sequences instead of failing.
    #[structopt(long)]
    pub truncate: bool,

    /// The text the logits were predicted for.
    pub text: String,
}

impl DecodeCmd {
    pub fn run(self) -> Result<i32, Error> {
        let DecodeCmd {
            vocab,
            labels,
            logits,
            max_len,
            truncate,
            text,
        } = self;

        check_file(&logits)?;
        let truncation = if truncate {
            Truncation::fixed()
        } else {
            Truncation::reject()
        };
        let pipeline = Builder::from_files(&vocab, &labels)
            .context("Loading the data files failed")?
            .with_max_len(max_len)?
            .with_truncation(truncation)
            .build(())
            .context("Building the pipeline failed")?;
        let logits = load_logits(&logits)?;

        for labeled in decode(&pipeline, &text, logits)? {
            println!("{} --- {}", labeled.token, labeled.label);
        }

        Ok(NO_ERROR)
    }
}

fn check_file(path: &Path) -> Result<(), Error> {
    if path.is_file() {
        Ok(())
    } else {
        Err(anyhow!("Logits File is not a file: {}", path.display()))
    }
}

fn load_logits(path: &Path) -> Result<Vec<f32>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let logits: Vec<f32> = serde_json::from_reader(reader).context("Parsing the logits failed")?;
    debug!("Loaded {} logits.", logits.len());

    Ok(logits)
}

fn decode<C>(pipeline: &Pipeline<C>, text: &str, logits: Vec<f32>) -> Result<Vec<Labeled>, Error> {
    let encodings = pipeline.encode(text).context("Encoding the text failed")?;
    let logits = Logits::from_flat(logits, pipeline.labels().len())?;

    pipeline
        .decode(&encodings, &logits)
        .context("Decoding the logits failed")
}
