//! High-level API for bundle operations

use crate::bundle::{
    ArchiveFormat, CancelFlag, GenerationRequest, OptionsPatch, ProjectManifest, assemble_with,
    download_file_name, generate,
};
use crate::exceptions::{BundleError, Result};
use crate::utils::format_bytes;
use anyhow::Context;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Options for building or previewing a project
#[derive(Debug, Default)]
pub struct PackOptions {
    /// Archive serialization format
    pub format: ArchiveFormat,
    /// Refuse free-text fields that contain double quotes
    pub strict_quotes: bool,
    /// Overrides applied on top of the manifest options
    pub patch: OptionsPatch,
}

/// Result of a finished build
#[derive(Debug)]
pub struct PackResult {
    pub path: PathBuf,
    pub sha256: String,
    pub entries: Vec<String>,
    pub size: usize,
}

/// Load a manifest into a generation request; files resolve against the
/// manifest's directory.
pub fn load_request(manifest_path: &Path, options: &PackOptions) -> Result<GenerationRequest> {
    let base_dir = manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let manifest = ProjectManifest::load(manifest_path)?;
    if !options.patch.is_empty() {
        debug!("🔧 Applying command line overrides");
    }
    let request = manifest.into_request(base_dir, options.patch.clone())?;

    if options.strict_quotes {
        request.reject_quotes()?;
    }

    Ok(request)
}

/// Render the `setup.py` preview for a manifest
pub fn preview_project(manifest_path: &Path, options: &PackOptions) -> Result<String> {
    let request = load_request(manifest_path, options)?;
    generate(&request)
}

/// One line per file: id, category, archive-relative name and size.
/// The resolved entry script is marked with `*`.
pub fn file_listing(request: &GenerationRequest) -> Vec<String> {
    let entry_id = request.entry_script().map(|f| f.id.clone());

    request
        .files()
        .iter()
        .map(|file| {
            let marker = if Some(&file.id) == entry_id.as_ref() {
                "*"
            } else {
                " "
            };
            format!(
                "{marker} {:<24} {:<6} {:<24} {:>10}",
                file.id.as_str(),
                file.category.as_str(),
                file.name,
                format_bytes(file.size)
            )
        })
        .collect()
}

/// Build the project archive described by `manifest_path`.
///
/// `output` may name a file or an existing directory; a directory receives
/// the archive under its download name. Returns `Ok(None)` when `cancel`
/// fires before the archive is written.
pub fn build_project(
    manifest_path: &Path,
    output: &Path,
    options: &PackOptions,
    cancel: &CancelFlag,
) -> Result<Option<PackResult>> {
    let request = load_request(manifest_path, options)?;

    let Some(blob) = assemble_with(&request, options.format, cancel)? else {
        warn!("🛑 Build cancelled, no archive written");
        return Ok(None);
    };

    let path = if output.is_dir() {
        output.join(download_file_name(
            &request.options().app_name,
            options.format,
        ))
    } else {
        output.to_path_buf()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let mut partial = path.clone().into_os_string();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    blob.write_to(&partial)?;
    if let Err(e) = std::fs::rename(&partial, &path) {
        let _ = std::fs::remove_file(&partial);
        return Err(BundleError::IoError(e));
    }

    info!(
        "🎉 Wrote {} ({})",
        path.display(),
        format_bytes(blob.len() as u64)
    );

    Ok(Some(PackResult {
        path,
        sha256: blob.sha256().to_string(),
        entries: blob.entries().to_vec(),
        size: blob.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::TargetBase;
    use std::fs;
    use tempfile::TempDir;

    fn project(manifest: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "print('hi')\n").unwrap();
        fs::write(dir.path().join("app.ico"), [0u8; 4]).unwrap();
        fs::write(dir.path().join("cxbundle.json"), manifest).unwrap();
        dir
    }

    const MANIFEST: &str = r#"{
        "options": { "app_name": "Demo App" },
        "files": [ { "path": "main.py" }, { "path": "app.ico" } ]
    }"#;

    #[test]
    fn test_preview_renders_setup() {
        let dir = project(MANIFEST);
        let text =
            preview_project(&dir.path().join("cxbundle.json"), &PackOptions::default()).unwrap();
        assert!(text.contains("script=\"source/main.py\""));
        assert!(text.contains("icon=\"resources/app.ico\""));
        assert!(text.contains("name=\"Demo App\""));
    }

    #[test]
    fn test_patch_overrides_manifest() {
        let dir = project(MANIFEST);
        let options = PackOptions {
            patch: OptionsPatch {
                target_base: Some(TargetBase::WindowedGui),
                ..Default::default()
            },
            ..Default::default()
        };
        let text = preview_project(&dir.path().join("cxbundle.json"), &options).unwrap();
        assert!(text.contains("base=\"Win32GUI\""));
    }

    #[test]
    fn test_strict_quotes_rejects() {
        let dir = project(
            r#"{ "options": { "description": "a \"b\"" }, "files": [ { "path": "main.py" } ] }"#,
        );
        let manifest = dir.path().join("cxbundle.json");

        assert!(preview_project(&manifest, &PackOptions::default()).is_ok());

        let strict = PackOptions {
            strict_quotes: true,
            ..Default::default()
        };
        assert!(matches!(
            preview_project(&manifest, &strict),
            Err(BundleError::UnescapedQuote { .. })
        ));
    }

    #[test]
    fn test_file_listing_marks_entry() {
        let dir = project(MANIFEST);
        let request =
            load_request(&dir.path().join("cxbundle.json"), &PackOptions::default()).unwrap();
        let lines = file_listing(&request);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("* main.py"));
        assert!(lines[0].contains("12.0 B"));
        assert!(lines[1].starts_with("  app.ico"));
    }

    #[test]
    fn test_build_into_directory_uses_download_name() {
        let dir = project(MANIFEST);
        let out = TempDir::new().unwrap();

        let result = build_project(
            &dir.path().join("cxbundle.json"),
            out.path(),
            &PackOptions::default(),
            &CancelFlag::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.path, out.path().join("demo-app-cx-freeze.zip"));
        assert!(result.path.exists());
        assert_eq!(fs::metadata(&result.path).unwrap().len() as usize, result.size);
        assert_eq!(result.sha256.len(), 64);
        assert!(result.entries.contains(&"setup.py".to_string()));
        assert!(!out.path().join("demo-app-cx-freeze.zip.partial").exists());
    }

    #[test]
    fn test_build_to_explicit_file_creates_parents() {
        let dir = project(MANIFEST);
        let out = TempDir::new().unwrap();
        let target = out.path().join("nested/bundle.tar.gz");

        let options = PackOptions {
            format: ArchiveFormat::TarGz,
            ..Default::default()
        };
        let result = build_project(
            &dir.path().join("cxbundle.json"),
            &target,
            &options,
            &CancelFlag::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.path, target);
        assert!(target.exists());
    }

    #[test]
    fn test_cancelled_build_writes_nothing() {
        let dir = project(MANIFEST);
        let out = TempDir::new().unwrap();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = build_project(
            &dir.path().join("cxbundle.json"),
            out.path(),
            &PackOptions::default(),
            &cancel,
        )
        .unwrap();

        assert!(result.is_none());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_build_without_entry_fails() {
        let dir = project(r#"{ "files": [ { "path": "app.ico" } ] }"#);
        let out = TempDir::new().unwrap();
        let err = build_project(
            &dir.path().join("cxbundle.json"),
            out.path(),
            &PackOptions::default(),
            &CancelFlag::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::MissingEntryScript));
        assert_eq!(err.exit_code(), crate::exit_codes::EXIT_PROJECT_ERROR);
    }
}
