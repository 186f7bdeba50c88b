use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::LoadError;
use crate::types::{Catalogue, Product};

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    catalogue: Vec<Product>,
}

/// Parse a catalogue document of the form `{"catalogue": [{"name", "version", "label"?}]}`.
pub fn load(bytes: &[u8]) -> Result<Catalogue, LoadError> {
    let file: CatalogueFile = serde_json::from_slice(bytes)?;
    debug!("loaded {} products from catalogue", file.catalogue.len());
    Ok(Catalogue::new(file.catalogue))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Catalogue, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load(&contents)
}
