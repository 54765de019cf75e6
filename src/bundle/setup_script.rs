//! cx_Freeze `setup.py` generation
//!
//! [`generate`] is the preview path: it always yields renderable text and
//! degrades to a notice when the project has no files or no entry script.
//! The archive assembler calls [`render_setup_script`] directly once it has
//! resolved the entry script itself.

use super::defaults::{
    EMPTY_PROJECT_NOTICE, GUI_BASE, INDENT_WIDTH, MISSING_ENTRY_NOTICE, SOURCE_DIR,
};
use super::document::Document;
use super::files::FileRecord;
use super::formatter::format_list;
use super::options::{BuildOptions, TargetBase};
use super::request::{GenerationRequest, ResourceLayout};
use crate::exceptions::Result;
use log::{debug, warn};

/// Render the preview text for a request
pub fn generate(request: &GenerationRequest) -> Result<String> {
    if request.is_empty() {
        debug!("📝 No files yet, rendering placeholder preview");
        return Ok(EMPTY_PROJECT_NOTICE.to_string());
    }

    let Some(entry) = request.entry_script() else {
        debug!("📝 No entry script, rendering placeholder preview");
        return Ok(MISSING_ENTRY_NOTICE.to_string());
    };

    let quoted = request.fields_with_quotes();
    if !quoted.is_empty() {
        warn!(
            "⚠️ Fields interpolated verbatim contain double quotes, setup.py will not parse: {}",
            quoted.join(", ")
        );
    }

    Ok(render_setup_script(
        request.options(),
        entry,
        &request.resource_layout(),
    ))
}

/// Render the full `setup.py` document
pub fn render_setup_script(
    options: &BuildOptions,
    entry: &FileRecord,
    layout: &ResourceLayout,
) -> String {
    let mut doc = Document::new(INDENT_WIDTH);

    doc.line("from cx_Freeze import Executable, setup").blank();

    doc.block("build_exe_options = {", "}", |doc| {
        doc.entries(list_entries(options, layout));
        for setting in build_settings(options) {
            doc.line(&setting);
        }
    });
    doc.blank();

    doc.block("executables = [", "]", |doc| {
        doc.block("Executable(", ")", |doc| {
            doc.entries(executable_kwargs(options, entry, layout));
        });
    });
    doc.blank();

    doc.block("setup(", ")", |doc| {
        doc.entries([
            format!("name=\"{}\"", options.app_name),
            format!("version=\"{}\"", options.version),
            format!("description=\"{}\"", options.description),
            "options={\"build_exe\": build_exe_options}".to_string(),
            "executables=executables".to_string(),
        ]);
    });

    doc.finish()
}

/// Comma separated inclusion lists of `build_exe_options`
fn list_entries(options: &BuildOptions, layout: &ResourceLayout) -> Vec<String> {
    vec![
        format!(
            "\"includes\": {}",
            format_list(&options.include_modules, INDENT_WIDTH)
        ),
        format!(
            "\"packages\": {}",
            format_list(&options.include_packages, INDENT_WIDTH)
        ),
        format!(
            "\"include_files\": {}",
            format_list(&layout.included_files, INDENT_WIDTH)
        ),
    ]
}

/// Compression, optimization and output path, in that order.
/// Rendered after the lists with no separating comma.
fn build_settings(options: &BuildOptions) -> Vec<String> {
    let mut settings = Vec::new();
    if options.compress {
        settings.push("\"compressed\": True".to_string());
    }
    if options.optimize_level.is_enabled() {
        settings.push(format!("\"optimize\": {}", options.optimize_level.value()));
    }
    settings.push(format!("\"build_exe\": \"{}\"", options.build_output_path));
    settings
}

fn executable_kwargs(
    options: &BuildOptions,
    entry: &FileRecord,
    layout: &ResourceLayout,
) -> Vec<String> {
    let base = match options.target_base {
        TargetBase::WindowedGui => format!("\"{GUI_BASE}\""),
        TargetBase::Console => "None".to_string(),
    };

    let mut kwargs = vec![
        format!("script=\"{SOURCE_DIR}/{}\"", entry.name),
        format!("base={base}"),
        format!("target_name=\"{}\"", options.executable_name()),
    ];

    if let Some(icon) = &layout.icon_path {
        kwargs.push(format!("icon=\"{icon}\""));
    }

    kwargs
}
