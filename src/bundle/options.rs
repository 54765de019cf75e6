//! Build options describing the target executable

use super::defaults::{
    DEFAULT_APP_NAME, DEFAULT_BUILD_OUTPUT_PATH, DEFAULT_DESCRIPTION, DEFAULT_VERSION,
};
use super::files::FileId;
use crate::exceptions::BundleError;
use serde::{Deserialize, Serialize};

/// Whether a console window is attached at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetBase {
    #[default]
    Console,
    #[serde(rename = "Win32GUI", alias = "gui")]
    WindowedGui,
}

/// Bytecode optimization level; `Zero` leaves the setting to cx_Freeze
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OptimizeLevel {
    #[default]
    Zero,
    One,
    Two,
}

impl OptimizeLevel {
    pub fn value(self) -> u8 {
        match self {
            OptimizeLevel::Zero => 0,
            OptimizeLevel::One => 1,
            OptimizeLevel::Two => 2,
        }
    }

    pub fn is_enabled(self) -> bool {
        self != OptimizeLevel::Zero
    }
}

impl TryFrom<u8> for OptimizeLevel {
    type Error = BundleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OptimizeLevel::Zero),
            1 => Ok(OptimizeLevel::One),
            2 => Ok(OptimizeLevel::Two),
            other => Err(BundleError::InvalidOption(format!(
                "optimize level must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<OptimizeLevel> for u8 {
    fn from(level: OptimizeLevel) -> Self {
        level.value()
    }
}

/// Value object describing the target build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub app_name: String,
    pub description: String,
    pub version: String,
    pub target_base: TargetBase,
    pub build_output_path: String,
    pub include_modules: Vec<String>,
    pub include_packages: Vec<String>,
    pub compress: bool,
    pub optimize_level: OptimizeLevel,
    /// Explicit entry script; the first script record is used when unset
    pub entry_script_id: Option<FileId>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            target_base: TargetBase::Console,
            build_output_path: DEFAULT_BUILD_OUTPUT_PATH.to_string(),
            include_modules: Vec::new(),
            include_packages: Vec::new(),
            compress: false,
            optimize_level: OptimizeLevel::Zero,
            entry_script_id: None,
        }
    }
}

/// Partial update of [`BuildOptions`]; only `Some` fields are replaced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub app_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub target_base: Option<TargetBase>,
    pub build_output_path: Option<String>,
    pub include_modules: Option<Vec<String>>,
    pub include_packages: Option<Vec<String>>,
    pub compress: Option<bool>,
    pub optimize_level: Option<OptimizeLevel>,
    pub entry_script_id: Option<FileId>,
}

impl OptionsPatch {
    pub fn is_empty(&self) -> bool {
        *self == OptionsPatch::default()
    }
}

impl BuildOptions {
    /// Return a copy with every field listed in `patch` replaced
    pub fn patched(&self, patch: OptionsPatch) -> BuildOptions {
        let mut next = self.clone();
        if let Some(v) = patch.app_name {
            next.app_name = v;
        }
        if let Some(v) = patch.description {
            next.description = v;
        }
        if let Some(v) = patch.version {
            next.version = v;
        }
        if let Some(v) = patch.target_base {
            next.target_base = v;
        }
        if let Some(v) = patch.build_output_path {
            next.build_output_path = v;
        }
        if let Some(v) = patch.include_modules {
            next.include_modules = v;
        }
        if let Some(v) = patch.include_packages {
            next.include_packages = v;
        }
        if let Some(v) = patch.compress {
            next.compress = v;
        }
        if let Some(v) = patch.optimize_level {
            next.optimize_level = v;
        }
        if let Some(v) = patch.entry_script_id {
            next.entry_script_id = Some(v);
        }
        next
    }

    /// Executable name: application name with all whitespace removed, plus extension
    pub fn executable_name(&self) -> String {
        let stripped: String = self
            .app_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("{stripped}{}", super::defaults::EXECUTABLE_EXTENSION)
    }
}

/// Parse a comma separated list, dropping blanks (`"a, b,,c"` -> `[a, b, c]`)
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert_eq!(options.app_name, "MyApplication");
        assert_eq!(options.build_output_path, "build");
        assert_eq!(options.optimize_level, OptimizeLevel::Zero);
        assert!(options.entry_script_id.is_none());
    }

    #[test]
    fn test_patch_replaces_only_listed_fields() {
        let base = BuildOptions::default();
        let patched = base.patched(OptionsPatch {
            app_name: Some("Editor".into()),
            compress: Some(true),
            ..Default::default()
        });

        assert_eq!(patched.app_name, "Editor");
        assert!(patched.compress);
        assert_eq!(patched.version, base.version);
        assert_eq!(patched.description, base.description);
        // original untouched
        assert_eq!(base.app_name, "MyApplication");
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let base = BuildOptions::default();
        assert!(OptionsPatch::default().is_empty());
        assert_eq!(base.patched(OptionsPatch::default()), base);
    }

    #[test]
    fn test_optimize_level_bounds() {
        assert_eq!(OptimizeLevel::try_from(2).unwrap(), OptimizeLevel::Two);
        assert!(OptimizeLevel::try_from(3).is_err());
        assert!(!OptimizeLevel::Zero.is_enabled());
        assert!(OptimizeLevel::One.is_enabled());
    }

    #[test]
    fn test_options_from_json_uses_defaults() {
        let options: BuildOptions =
            serde_json::from_str(r#"{"app_name": "Tool", "optimize_level": 1, "target_base": "Win32GUI"}"#)
                .unwrap();
        assert_eq!(options.app_name, "Tool");
        assert_eq!(options.optimize_level, OptimizeLevel::One);
        assert_eq!(options.target_base, TargetBase::WindowedGui);
        assert_eq!(options.version, "1.0.0");

        let bad = serde_json::from_str::<BuildOptions>(r#"{"optimize_level": 7}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_executable_name_strips_whitespace() {
        let options = BuildOptions {
            app_name: " My  Cool\tApp ".into(),
            ..Default::default()
        };
        assert_eq!(options.executable_name(), "MyCoolApp.exe");
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("numpy, requests,, yaml "), vec!["numpy", "requests", "yaml"]);
        assert!(parse_list("  ").is_empty());
    }
}
