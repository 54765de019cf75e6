//! File records handed to the generator

use crate::exceptions::{BundleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque file identifier, unique within one generation request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role a file plays in the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Python source, placed under `source/`
    Script,
    /// Executable icon, placed under `resources/`
    Icon,
    /// Any other resource, placed under `resources/`
    Data,
}

impl FileCategory {
    /// Default categorizer used by file-intake collaborators.
    ///
    /// `.py`/`.pyw` are scripts, `.ico` is an icon, everything else is data.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "py" | "pyw" => FileCategory::Script,
            "ico" => FileCategory::Icon,
            _ => FileCategory::Data,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Script => "script",
            FileCategory::Icon => "icon",
            FileCategory::Data => "data",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record's bytes come from
#[derive(Debug, Clone)]
pub enum FileContent {
    /// Bytes already held in memory
    Inline(Vec<u8>),
    /// File on disk, read when the archive is assembled
    Path(PathBuf),
}

impl FileContent {
    /// Read the full binary content
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            FileContent::Inline(bytes) => Ok(bytes.clone()),
            FileContent::Path(path) => std::fs::read(path).map_err(|e| {
                BundleError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("failed to read '{}': {e}", path.display()),
                ))
            }),
        }
    }
}

/// One user-supplied file
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: FileId,
    pub category: FileCategory,
    /// Original file name, used verbatim in archive paths
    pub name: String,
    /// Byte length, for display only
    pub size: u64,
    pub content: FileContent,
}

impl FileRecord {
    /// Record backed by in-memory bytes
    pub fn inline(
        id: impl Into<String>,
        category: FileCategory,
        name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            id: FileId::new(id),
            category,
            name: name.into(),
            size: bytes.len() as u64,
            content: FileContent::Inline(bytes),
        }
    }

    /// Record backed by a file on disk; size is taken from its metadata
    pub fn from_path(
        id: impl Into<String>,
        category: FileCategory,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                BundleError::InvalidManifest(format!("'{}' has no file name", path.display()))
            })?
            .to_string();
        let size = std::fs::metadata(path)?.len();

        Ok(Self {
            id: FileId::new(id),
            category,
            name,
            size,
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    pub fn is_script(&self) -> bool {
        self.category == FileCategory::Script
    }
}
