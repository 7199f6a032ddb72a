use std::{
    collections::HashMap,
    env::var_os,
    fs::File,
    io::{BufReader, Error, ErrorKind, Result},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::from_reader;

const DATA_DIR: &str = "data";
const MANIFEST: &str = "assets_manifest.json";

/// Resolves the path to the requested data relative to the workspace directory.
fn resolve_path(path: &[impl AsRef<Path>]) -> Result<PathBuf> {
    let manifest = var_os("CARGO_MANIFEST_DIR")
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing CARGO_MANIFEST_DIR"))?;
    let workspace = PathBuf::from(manifest)
        .parent()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "missing cargo workspace dir"))?
        .to_path_buf();

    path.iter()
        .fold(workspace, |path, component| path.join(component))
        .canonicalize()
}

#[derive(Deserialize)]
struct DataAsset {
    id: String,
    url_suffix: String,
}

#[derive(Deserialize)]
struct Manifest {
    data_assets: Vec<DataAsset>,
}

/// Reads the data asset paths from the manifest, relative to the data directory.
fn read_manifest() -> Result<HashMap<String, PathBuf>> {
    let manifest = BufReader::new(File::open(resolve_path(&[MANIFEST])?)?);
    from_reader::<_, Manifest>(manifest)
        .map(|manifest| {
            manifest
                .data_assets
                .into_iter()
                .map(|asset| (asset.id, [DATA_DIR, &asset.url_suffix].iter().collect()))
                .collect()
        })
        .map_err(|error| Error::new(ErrorKind::InvalidData, error.to_string()))
}

/// Resolves the path to the requested asset relative to the workspace directory.
pub(crate) fn resolve_asset(id: &str) -> Result<PathBuf> {
    let assets = read_manifest()?;
    let path = assets
        .get(id)
        .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("missing asset '{}'", id)))?;
    resolve_path(&[path])
}
