//! Immutable generation request and the resolution rules shared by preview and build

use super::defaults::RESOURCES_DIR;
use super::files::{FileCategory, FileRecord};
use super::options::BuildOptions;
use crate::exceptions::{BundleError, Result};
use log::trace;
use std::collections::HashSet;

/// Snapshot of build options plus the ordered file set.
///
/// Built fresh for every preview and every build, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    options: BuildOptions,
    files: Vec<FileRecord>,
}

/// Resource-side view of a request: included file paths and the icon path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLayout {
    /// `resources/<name>` for every non-script file, in file order
    pub included_files: Vec<String>,
    /// First icon-category file's resource path
    pub icon_path: Option<String>,
}

impl ResourceLayout {
    /// Account for one non-script record
    pub fn record(&mut self, file: &FileRecord) -> String {
        let path = resource_path(&file.name);
        self.included_files.push(path.clone());
        if file.category == FileCategory::Icon && self.icon_path.is_none() {
            self.icon_path = Some(path.clone());
        }
        path
    }
}

/// Archive path of a non-script file
pub fn resource_path(name: &str) -> String {
    format!("{RESOURCES_DIR}/{name}")
}

impl GenerationRequest {
    /// Build a request, rejecting file sets with duplicate ids
    pub fn new(options: BuildOptions, files: Vec<FileRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for file in &files {
            if !seen.insert(file.id.as_str()) {
                return Err(BundleError::DuplicateFileId(file.id.to_string()));
            }
        }

        Ok(Self { options, files })
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Entry script: the record named by `entry_script_id`, else the first script.
    pub fn entry_script(&self) -> Option<&FileRecord> {
        let explicit = self
            .options
            .entry_script_id
            .as_ref()
            .and_then(|id| self.files.iter().find(|file| &file.id == id));

        let entry = explicit.or_else(|| self.files.iter().find(|file| file.is_script()));
        trace!(
            "🎯 Entry script resolved to {:?}",
            entry.map(|file| file.name.as_str())
        );
        entry
    }

    /// Included files and icon path derived from the non-script records
    pub fn resource_layout(&self) -> ResourceLayout {
        let mut layout = ResourceLayout::default();
        for file in self.files.iter().filter(|file| !file.is_script()) {
            layout.record(file);
        }
        layout
    }

    /// Names of free-text fields containing a double quote.
    ///
    /// Such values are interpolated verbatim and yield an invalid setup.py.
    pub fn fields_with_quotes(&self) -> Vec<String> {
        let options = &self.options;
        let mut fields: Vec<String> = [
            ("app_name", &options.app_name),
            ("description", &options.description),
            ("version", &options.version),
            ("build_output_path", &options.build_output_path),
        ]
        .into_iter()
        .filter(|(_, value)| value.contains('"'))
        .map(|(name, _)| name.to_string())
        .collect();

        for module in options.include_modules.iter().filter(|m| m.contains('"')) {
            fields.push(format!("include_modules[{module}]"));
        }
        for package in options.include_packages.iter().filter(|p| p.contains('"')) {
            fields.push(format!("include_packages[{package}]"));
        }
        for file in self.files.iter().filter(|f| f.name.contains('"')) {
            fields.push(format!("file name {}", file.name));
        }
        fields
    }

    /// Fail with [`BundleError::UnescapedQuote`] on the first quoted field
    pub fn reject_quotes(&self) -> Result<()> {
        match self.fields_with_quotes().into_iter().next() {
            Some(field) => Err(BundleError::UnescapedQuote { field }),
            None => Ok(()),
        }
    }
}
