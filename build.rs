use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Read version from a VERSION file next to Cargo.toml, unless overridden
    let pkg_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.1".to_string());
    let version = if let Ok(v) = env::var("CXBUNDLE_VERSION") {
        v
    } else {
        let version_file = Path::new("VERSION");
        if version_file.exists() {
            fs::read_to_string(version_file)
                .unwrap_or_else(|_| pkg_version.clone())
                .trim()
                .to_string()
        } else {
            pkg_version
        }
    };

    println!("cargo:rustc-env=CXBUNDLE_VERSION={}", version);
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-env-changed=CXBUNDLE_VERSION");
}
