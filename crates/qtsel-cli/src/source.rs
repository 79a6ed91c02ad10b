//! Metadata source backed by an on-disk JSON cache.
//!
//! The cache mirrors the upstream layout: `<root>/<host>/<target>/directory.json`
//! plus one `<stem>.json` per Qt folder or tool.

use std::fs;
use std::path::{Path, PathBuf};

use qtsel_metadata::{Directory, FetchError, MetadataLocator, MetadataSource};
use qtsel_model::{Host, Target};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Reads metadata documents from a local directory tree.
#[derive(Debug, Clone)]
pub struct CacheDirSource {
    root: PathBuf,
    locator: MetadataLocator,
}

impl CacheDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let locator = MetadataLocator::new(root.to_string_lossy());
        Self { root, locator }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read<T: DeserializeOwned>(&self, location: String) -> Result<T, FetchError> {
        trace!(%location, "reading cached document");
        let text = fs::read_to_string(&location)
            .map_err(|source| FetchError::from_io(location.clone(), source))?;
        serde_json::from_str(&text).map_err(|source| FetchError::Parse { location, source })
    }
}

impl MetadataSource for CacheDirSource {
    fn directory(&self, host: Host, target: Target) -> Result<Directory, FetchError> {
        self.read(self.locator.directory(host, target))
    }

    fn updates(&self, host: Host, target: Target, stem: &str) -> Result<Value, FetchError> {
        self.read(self.locator.document(host, target, stem))
    }
}
