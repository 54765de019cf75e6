//! Companion README and ignore-list documents

use super::defaults::GITIGNORE_PATTERNS;
use super::options::BuildOptions;

/// Build instructions, parameterized by application name and build output path
pub fn render_readme(options: &BuildOptions) -> String {
    format!(
        r#"# {app_name} cx_Freeze Bundle

This package was generated with the CX Freeze Builder. Follow these steps to produce a Windows executable.

## Prerequisites

- Python 3.8+ installed and added to PATH
- pip and virtual environment tools available

## Setup Instructions

1. Create and activate a virtual environment:

   ```bash
   python -m venv .venv
   .venv\Scripts\activate
   ```

2. Install cx_Freeze:

   ```bash
   pip install cx_Freeze
   ```

3. Run the build:

   ```bash
   python setup.py build
   ```

The executable will be located under the `{build_path}` directory.

## Included Files

- Python sources in `source/`
- Resources in `resources/`
- Generated `setup.py`

Feel free to update `setup.py` with additional cx_Freeze options before building.
"#,
        app_name = options.app_name,
        build_path = options.build_output_path,
    )
}

/// Static `.gitignore` contents, newline separated without a trailing newline
pub fn render_gitignore() -> String {
    GITIGNORE_PATTERNS.join("\n")
}
