use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::core::error::CatalogResult;

/// Indentation of the stored document
const INDENT: &[u8] = b"    ";

/// Read/write permissions of the storage file as seen by this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAccess {
    pub exists: bool,
    pub readable: bool,
    pub writable: bool,
}

/// The whole catalog as a single JSON document on disk.
///
/// Every save rewrites the full file; there is no journal and no backup.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the catalog from disk
    ///
    /// # Returns
    /// * `Ok(Catalog)` - Parsed catalog, empty when the file does not exist
    /// * `Err(CatalogError::PersistenceFailure)` - The file exists but could not be read
    /// * `Err(CatalogError::MalformedStorage)` - The content is not a catalog document
    pub async fn load(&self) -> CatalogResult<Catalog> {
        let raw = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No catalog file at {}, starting empty", self.path.display());
                return Ok(Catalog::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    /// Overwrites the file with the full catalog
    pub async fn save(&self, catalog: &Catalog) -> CatalogResult<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        catalog
            .serialize(&mut serializer)
            .map_err(std::io::Error::from)?;

        fs_err::tokio::write(&self.path, buf).await?;
        Ok(())
    }

    /// Probes whether the file can be read and written, and logs the result.
    ///
    /// Opens the file without creating or truncating it.
    pub fn check_access(&self) -> FileAccess {
        let exists = self.path.exists();
        let readable = OpenOptions::new().read(true).open(&self.path).is_ok();
        let writable = OpenOptions::new().write(true).open(&self.path).is_ok();
        let path = self.path.display();

        match (exists, readable, writable) {
            (false, _, _) => log::info!("The file '{}' does not exist yet, it is created on the first change.", path),
            (true, true, true) => log::info!("The file '{}' can be read and written.", path),
            (true, true, false) => log::warn!("The file '{}' can be read but not written.", path),
            (true, false, true) => log::warn!("The file '{}' can be written but not read.", path),
            (true, false, false) => log::error!("The file '{}' can be neither read nor written.", path),
        }

        FileAccess {
            exists,
            readable,
            writable,
        }
    }
}
