//! JSON manifest holding the project version.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::BumpError;

/// Version used when the manifest has none.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// A loaded manifest. Keys keep their on-disk order.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    doc: Map<String, Value>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BumpError> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|source| BumpError::ManifestIo {
            path: path.clone(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&raw).map_err(|source| BumpError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        match value {
            Value::Object(doc) => Ok(Self { path, doc }),
            _ => Err(BumpError::ManifestShape { path }),
        }
    }

    /// Path this manifest was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current version, or [`DEFAULT_VERSION`] when missing, null or empty.
    ///
    /// A numeric field is read as its decimal text (`2` is `"2"`). Booleans,
    /// arrays and objects are rejected.
    pub fn version(&self) -> Result<String, BumpError> {
        match self.doc.get("version") {
            None | Some(Value::Null) => Ok(DEFAULT_VERSION.to_string()),
            Some(Value::String(v)) if v.is_empty() => Ok(DEFAULT_VERSION.to_string()),
            Some(Value::String(v)) => Ok(v.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(BumpError::InvalidVersion(other.to_string())),
        }
    }

    /// Replace the version field, appending it if absent.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.doc
            .insert("version".to_string(), Value::String(version.into()));
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn render(&self) -> Result<String, BumpError> {
        let mut out = serde_json::to_string_pretty(&self.doc).map_err(|source| {
            BumpError::ManifestParse {
                path: self.path.clone(),
                source,
            }
        })?;
        out.push('\n');
        Ok(out)
    }

    /// Write the manifest back to its path.
    pub fn save(&self) -> Result<(), BumpError> {
        let rendered = self.render()?;
        fs::write(&self.path, rendered).map_err(|source| BumpError::ManifestIo {
            path: self.path.clone(),
            source,
        })
    }
}
