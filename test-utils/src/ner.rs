use std::{io::Result, path::PathBuf};

use crate::asset::resolve_asset;

/// Resolves the path to the NER vocabulary.
pub fn vocab() -> Result<PathBuf> {
    resolve_asset("nerVocab")
}

/// Resolves the path to the NER labels.
pub fn labels() -> Result<PathBuf> {
    resolve_asset("nerLabels")
}
