//! Standard exit codes for the cxbundle builder
//!
//! Every failure category the builder can report maps to exactly one code
//! so wrapper scripts can branch on the outcome without parsing stderr.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Project is missing files or an entry script
pub const EXIT_PROJECT_ERROR: i32 = 102;

/// Archive could not be created or serialized
pub const EXIT_ARCHIVE_ERROR: i32 = 103;

/// Build was cancelled before the archive was produced
pub const EXIT_CANCELLED: i32 = 104;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error (file not found, permission denied, disk error)
pub const EXIT_IO_ERROR: i32 = 106;

/// Configuration error (invalid manifest, bad option values)
pub const EXIT_CONFIG_ERROR: i32 = 109;
