//! Bundle generation engine
//!
//! Turns a [`GenerationRequest`] (build options plus categorized files) into
//! a cx_Freeze `setup.py` preview or a complete project archive.

pub mod archive;
pub mod defaults;
pub mod document;
pub mod files;
pub mod formatter;
pub mod manifest;
pub mod naming;
pub mod options;
pub mod readme;
pub mod request;
pub mod setup_script;

pub use archive::{ArchiveBlob, ArchiveFormat, CancelFlag, assemble, assemble_with};
pub use files::{FileCategory, FileContent, FileId, FileRecord};
pub use manifest::{ManifestFile, ProjectManifest};
pub use naming::{download_file_name, sanitize_name};
pub use options::{BuildOptions, OptimizeLevel, OptionsPatch, TargetBase, parse_list};
pub use request::{GenerationRequest, ResourceLayout};
pub use setup_script::generate;
