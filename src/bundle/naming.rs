//! Download file naming

use super::archive::ArchiveFormat;
use super::defaults::{DEFAULT_DOWNLOAD_STEM, DOWNLOAD_SUFFIX};

/// Lowercase the application name, collapse every run of non-alphanumeric
/// characters into a single `-` and trim separators from both ends.
pub fn sanitize_name(app_name: &str) -> String {
    let mut stem = String::with_capacity(app_name.len());
    let mut pending_separator = false;

    for c in app_name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !stem.is_empty() {
                stem.push('-');
            }
            pending_separator = false;
            stem.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if stem.is_empty() {
        DEFAULT_DOWNLOAD_STEM.to_string()
    } else {
        stem
    }
}

/// File name offered for the downloaded archive (`my-app-cx-freeze.zip`)
pub fn download_file_name(app_name: &str, format: ArchiveFormat) -> String {
    format!(
        "{}{DOWNLOAD_SUFFIX}.{}",
        sanitize_name(app_name),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_and_trims_separators() {
        assert_eq!(sanitize_name("My  App!! 2.0"), "my-app-2-0");
        assert_eq!(sanitize_name("--Tool--"), "tool");
        assert_eq!(sanitize_name("already-clean"), "already-clean");
    }

    #[test]
    fn test_non_ascii_is_a_separator() {
        assert_eq!(sanitize_name("Café Menu"), "caf-menu");
    }

    #[test]
    fn test_fallback_when_nothing_remains() {
        assert_eq!(sanitize_name(""), "cx-freeze-bundle");
        assert_eq!(sanitize_name("!!! ???"), "cx-freeze-bundle");
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name("My App", ArchiveFormat::Zip),
            "my-app-cx-freeze.zip"
        );
        assert_eq!(
            download_file_name("", ArchiveFormat::TarGz),
            "cx-freeze-bundle-cx-freeze.tar.gz"
        );
    }
}
