//! The single source of truth for all data paths.
//!
//! The assets are listed in the `assets_manifest.json` of the workspace and located in its `data`
//! directory.

mod asset;
pub mod ner;
