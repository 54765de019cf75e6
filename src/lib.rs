//! cxbundle - cx_Freeze project bundle generator
//!
//! This crate turns a list of Python scripts, icons and data files plus a
//! set of build options into a ready-to-build cx_Freeze project: a
//! `setup.py` preview, or a zip/tar.gz archive holding sources, resources,
//! build configuration and instructions.

#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod bundle;
pub mod exceptions;
pub mod exit_codes;
pub mod logger;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{PackOptions, PackResult, build_project, file_listing, load_request, preview_project};
pub use bundle::{
    ArchiveBlob, ArchiveFormat, BuildOptions, CancelFlag, FileCategory, FileRecord,
    GenerationRequest, TargetBase, assemble, generate,
};
pub use exceptions::BundleError;
