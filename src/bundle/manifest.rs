//! Project manifest: the on-disk description of a bundle request
//!
//! ```json
//! {
//!   "options": { "app_name": "Ledger", "target_base": "Win32GUI", "optimize_level": 1 },
//!   "entry_script": "src/main.py",
//!   "files": [
//!     { "path": "src/main.py" },
//!     { "path": "assets/*.png", "category": "data" },
//!     { "path": "icons/app.ico", "id": "icon" }
//!   ]
//! }
//! ```
//!
//! File paths are relative to the manifest's directory and may be glob
//! patterns. Entries without a category go through
//! [`FileCategory::from_file_name`].

use super::files::{FileCategory, FileId, FileRecord};
use super::options::{BuildOptions, OptionsPatch};
use super::request::GenerationRequest;
use crate::exceptions::{BundleError, Result};
use anyhow::Context;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One file (or glob of files) listed in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FileCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Parsed project manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub options: BuildOptions,
    /// Shorthand for `options.entry_script_id`; wins over it when both are set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_script: Option<FileId>,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

fn is_glob_pattern(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Id for a matched file: its path relative to the manifest directory
fn relative_id(base_dir: &Path, path: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

impl ProjectManifest {
    /// Parse manifest JSON
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .context("parsing project manifest")
            .map_err(|e| BundleError::InvalidManifest(format!("{e:#}")))
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("📄 Loading project manifest: {}", path.display());
        let data = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&data)?;
        trace!("✅ Manifest lists {} file entries", manifest.files.len());
        Ok(manifest)
    }

    /// Expand file entries into records, resolving paths against `base_dir`
    pub fn file_records(&self, base_dir: &Path) -> Result<Vec<FileRecord>> {
        let mut records = Vec::new();

        for entry in &self.files {
            let paths = expand_entry(base_dir, &entry.path)?;
            if entry.id.is_some() && paths.len() > 1 {
                return Err(BundleError::InvalidManifest(format!(
                    "'{}' matches {} files but sets a single id",
                    entry.path,
                    paths.len()
                )));
            }

            for path in paths {
                let id = entry
                    .id
                    .clone()
                    .unwrap_or_else(|| relative_id(base_dir, &path));
                let category = match entry.category {
                    Some(category) => category,
                    None => FileCategory::from_file_name(&path.to_string_lossy()),
                };
                trace!("📎 {} -> {} ({})", entry.path, path.display(), category);
                records.push(FileRecord::from_path(id, category, &path)?);
            }
        }

        Ok(records)
    }

    /// Build a generation request, applying `patch` on top of the manifest options
    pub fn into_request(self, base_dir: &Path, patch: OptionsPatch) -> Result<GenerationRequest> {
        let files = self.file_records(base_dir)?;
        let mut options = self.options;
        if let Some(entry) = self.entry_script {
            options.entry_script_id = Some(entry);
        }
        let options = options.patched(patch);
        GenerationRequest::new(options, files)
    }
}

fn expand_entry(base_dir: &Path, raw: &str) -> Result<Vec<PathBuf>> {
    let joined = base_dir.join(raw);

    if !is_glob_pattern(raw) {
        return Ok(vec![joined]);
    }

    let pattern = joined.to_string_lossy().into_owned();
    let mut matches = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| BundleError::IoError(e.into()))?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(BundleError::InvalidManifest(format!(
            "pattern '{raw}' matched no files"
        )));
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("src/main.py"), "print('hi')\n").unwrap();
        fs::write(dir.path().join("src/util.py"), "X = 1\n").unwrap();
        fs::write(dir.path().join("assets/b.png"), [1u8, 2, 3]).unwrap();
        fs::write(dir.path().join("assets/a.png"), [4u8]).unwrap();
        fs::write(dir.path().join("app.ico"), [0u8; 8]).unwrap();
        dir
    }

    #[test]
    fn test_glob_pattern_detection() {
        assert!(is_glob_pattern("assets/*.png"));
        assert!(is_glob_pattern("src/mod?.py"));
        assert!(is_glob_pattern("data/[ab].json"));
        assert!(!is_glob_pattern("src/main.py"));
    }

    #[test]
    fn test_parse_defaults() {
        let manifest = ProjectManifest::parse("{}").unwrap();
        assert!(manifest.files.is_empty());
        assert_eq!(manifest.options, BuildOptions::default());
    }

    #[test]
    fn test_parse_error_is_invalid_manifest() {
        let err = ProjectManifest::parse("{ not json").unwrap_err();
        assert!(matches!(err, BundleError::InvalidManifest(msg) if msg.contains("parsing project manifest")));
    }

    #[test]
    fn test_records_categorized_and_globbed_in_order() {
        let dir = project();
        let manifest = ProjectManifest::parse(
            r#"{
                "files": [
                    { "path": "src/main.py" },
                    { "path": "assets/*.png" },
                    { "path": "app.ico", "id": "icon" }
                ]
            }"#,
        )
        .unwrap();

        let records = manifest.file_records(dir.path()).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.id.as_str(), r.category, r.name.as_str(), r.size))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("src/main.py", FileCategory::Script, "main.py", 12),
                ("assets/a.png", FileCategory::Data, "a.png", 1),
                ("assets/b.png", FileCategory::Data, "b.png", 3),
                ("icon", FileCategory::Icon, "app.ico", 8),
            ]
        );
    }

    #[test]
    fn test_explicit_category_wins() {
        let dir = project();
        let manifest = ProjectManifest::parse(
            r#"{ "files": [ { "path": "src/util.py", "category": "data" } ] }"#,
        )
        .unwrap();
        let records = manifest.file_records(dir.path()).unwrap();
        assert_eq!(records[0].category, FileCategory::Data);
    }

    #[test]
    fn test_unmatched_glob_is_error() {
        let dir = project();
        let manifest =
            ProjectManifest::parse(r#"{ "files": [ { "path": "missing/*.py" } ] }"#).unwrap();
        assert!(matches!(
            manifest.file_records(dir.path()),
            Err(BundleError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_single_id_on_multi_match_is_error() {
        let dir = project();
        let manifest = ProjectManifest::parse(
            r#"{ "files": [ { "path": "assets/*.png", "id": "art" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.file_records(dir.path()),
            Err(BundleError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = project();
        let manifest =
            ProjectManifest::parse(r#"{ "files": [ { "path": "nope.py" } ] }"#).unwrap();
        assert!(matches!(
            manifest.file_records(dir.path()),
            Err(BundleError::IoError(_))
        ));
    }

    #[test]
    fn test_into_request_applies_patch() {
        let dir = project();
        let manifest = ProjectManifest::parse(
            r#"{
                "options": { "app_name": "Ledger" },
                "files": [ { "path": "src/main.py" }, { "path": "src/util.py" } ]
            }"#,
        )
        .unwrap();

        let request = manifest
            .into_request(
                dir.path(),
                OptionsPatch {
                    entry_script_id: Some(FileId::new("src/util.py")),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(request.options().app_name, "Ledger");
        assert_eq!(request.entry_script().unwrap().name, "util.py");
    }

    #[test]
    fn test_top_level_entry_script() {
        let dir = project();
        let manifest = ProjectManifest::parse(
            r#"{
                "entry_script": "src/util.py",
                "files": [ { "path": "src/main.py" }, { "path": "src/util.py" } ]
            }"#,
        )
        .unwrap();

        let request = manifest
            .into_request(dir.path(), OptionsPatch::default())
            .unwrap();
        assert_eq!(
            request.options().entry_script_id,
            Some(FileId::new("src/util.py"))
        );
        assert_eq!(request.entry_script().unwrap().name, "util.py");
    }
}
