//! cxbundle builder binary

use clap::Parser;
use cxbundle::bundle::{
    ArchiveFormat, CancelFlag, FileId, OptimizeLevel, OptionsPatch, TargetBase, parse_list,
};
use cxbundle::exit_codes::{EXIT_CANCELLED, EXIT_PANIC, EXIT_SUCCESS};
use cxbundle::utils::is_env_true;
use cxbundle::{BundleError, PackOptions, build_project, file_listing, load_request};
use log::{debug, error};
use signal_hook::consts::SIGINT;
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = cxbundle::version::VERSION;

/// Environment switch equivalent to `--strict-quotes`
const STRICT_QUOTES_ENV: &str = "CXBUNDLE_STRICT_QUOTES";

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Generate cx_Freeze project bundles")]
struct Args {
    /// Path to the project manifest (JSON)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Output archive path, or a directory to receive it under its download name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the generated setup.py and file listing instead of writing an archive
    #[arg(long)]
    preview: bool,

    /// Archive format (zip or tar.gz)
    #[arg(long, default_value = "zip")]
    format: ArchiveFormat,

    /// Fail when a free-text field contains a double quote
    #[arg(long)]
    strict_quotes: bool,

    /// Override the application name
    #[arg(long)]
    app_name: Option<String>,

    /// Override the application version
    #[arg(long)]
    app_version: Option<String>,

    /// Build a windowed GUI executable
    #[arg(long, conflicts_with = "console")]
    gui: bool,

    /// Build a console executable, overriding a GUI manifest
    #[arg(long)]
    console: bool,

    /// Id of the entry script
    #[arg(long)]
    entry: Option<String>,

    /// Comma separated modules to include
    #[arg(long)]
    include: Option<String>,

    /// Comma separated packages to include
    #[arg(long)]
    packages: Option<String>,

    /// Enable compression of the library archive
    #[arg(long, conflicts_with = "no_compress")]
    compress: bool,

    /// Disable compression, overriding the manifest
    #[arg(long)]
    no_compress: bool,

    /// Bytecode optimization level (0, 1 or 2)
    #[arg(long)]
    optimize: Option<u8>,

    /// Log level (trace, debug, info, warn, error; prefix with json: for JSON output)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn patch(&self) -> Result<OptionsPatch, BundleError> {
        Ok(OptionsPatch {
            app_name: self.app_name.clone(),
            version: self.app_version.clone(),
            target_base: self.target_base(),
            include_modules: self.include.as_deref().map(parse_list),
            include_packages: self.packages.as_deref().map(parse_list),
            compress: switch(self.compress, self.no_compress),
            optimize_level: self.optimize.map(OptimizeLevel::try_from).transpose()?,
            entry_script_id: self.entry.clone().map(FileId::new),
            ..Default::default()
        })
    }

    fn target_base(&self) -> Option<TargetBase> {
        switch(self.gui, self.console).map(|gui| {
            if gui {
                TargetBase::WindowedGui
            } else {
                TargetBase::Console
            }
        })
    }
}

/// `Some(true)` for the on flag, `Some(false)` for the off flag, else leave the manifest value
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {panic_info}");
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in builder");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("cxbundle-builder {}", cxbundle::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    let level = match args.log_level {
        Some(ref level) => cxbundle::logger::JsonLogger::init_with_level(level),
        None => cxbundle::logger::JsonLogger::init(),
    };
    debug!("🔍 Log level: {level}");

    match execute(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("❌ {e}");
            eprintln!("Build error: {e}");
            e.exit_code()
        }
    }
}

fn execute(args: &Args) -> Result<i32, BundleError> {
    let options = PackOptions {
        format: args.format,
        strict_quotes: args.strict_quotes || is_env_true(STRICT_QUOTES_ENV),
        patch: args.patch()?,
    };

    if args.preview {
        let request = load_request(&args.manifest, &options)?;
        print!("{}", cxbundle::generate(&request)?);
        println!();
        for line in file_listing(&request) {
            println!("{line}");
        }
        return Ok(EXIT_SUCCESS);
    }

    let output = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    let cancel = CancelFlag::new();
    if let Err(e) = signal_hook::flag::register(SIGINT, cancel.handle()) {
        debug!("⚠️ Could not install SIGINT handler: {e}");
    }

    match build_project(&args.manifest, &output, &options, &cancel)? {
        Some(result) => {
            println!("{}", result.path.display());
            println!("sha256 {}", result.sha256);
            Ok(EXIT_SUCCESS)
        }
        None => {
            eprintln!("Build cancelled");
            Ok(EXIT_CANCELLED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxbundle::BuildOptions;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["cxbundle-builder", "--manifest", "cxbundle.json"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_flags_leave_manifest_values() {
        let patch = parse(&[]).patch().unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_switches_turn_options_off() {
        let manifest = BuildOptions {
            compress: true,
            target_base: TargetBase::WindowedGui,
            ..Default::default()
        };

        let patched = manifest.patched(parse(&["--console", "--no-compress"]).patch().unwrap());
        assert_eq!(patched.target_base, TargetBase::Console);
        assert!(!patched.compress);
    }

    #[test]
    fn test_switches_turn_options_on() {
        let patched = BuildOptions::default().patched(parse(&["--gui", "--compress"]).patch().unwrap());
        assert_eq!(patched.target_base, TargetBase::WindowedGui);
        assert!(patched.compress);
    }

    #[test]
    fn test_conflicting_switches_rejected() {
        let argv = ["cxbundle-builder", "--manifest", "m.json", "--gui", "--console"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["cxbundle-builder", "--manifest", "m.json", "--compress", "--no-compress"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_bad_optimize_level_is_invalid_option() {
        let err = parse(&["--optimize", "5"]).patch().unwrap_err();
        assert!(matches!(err, BundleError::InvalidOption(_)));
    }
}
