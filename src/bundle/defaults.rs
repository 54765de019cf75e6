//! Fixed names, paths and texts used by the bundle generator

/// Archive directory holding script-category files
pub const SOURCE_DIR: &str = "source";

/// Archive directory holding every non-script file
pub const RESOURCES_DIR: &str = "resources";

/// Generated build-configuration file at the archive root
pub const SETUP_FILE_NAME: &str = "setup.py";

/// Generated instructions document at the archive root
pub const README_FILE_NAME: &str = "README.md";

/// Static ignore-list file at the archive root
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Patterns written to `.gitignore`, in order
pub const GITIGNORE_PATTERNS: [&str; 6] = [
    "*.pyc",
    "build/",
    "dist/",
    "__pycache__/",
    "*.log",
    "*.spec",
];

/// Extension appended to the derived executable name
pub const EXECUTABLE_EXTENSION: &str = ".exe";

/// cx_Freeze base used when the console window is hidden
pub const GUI_BASE: &str = "Win32GUI";

/// Indent increment for every nesting level of generated text
pub const INDENT_WIDTH: usize = 4;

/// Preview shown when no files have been supplied
pub const EMPTY_PROJECT_NOTICE: &str = "# Add a Python file to generate a setup preview.";

/// Preview shown when no entry script can be resolved
pub const MISSING_ENTRY_NOTICE: &str =
    "# Add a Python entry script to see the generated setup.py.";

/// Download stem used when the application name sanitizes to nothing
pub const DEFAULT_DOWNLOAD_STEM: &str = "cx-freeze-bundle";

/// Suffix placed between the download stem and the archive extension
pub const DOWNLOAD_SUFFIX: &str = "-cx-freeze";

/// Default application name
pub const DEFAULT_APP_NAME: &str = "MyApplication";

/// Default application version
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Default application description
pub const DEFAULT_DESCRIPTION: &str = "Executable built with cx_Freeze.";

/// Default build output directory
pub const DEFAULT_BUILD_OUTPUT_PATH: &str = "build";
