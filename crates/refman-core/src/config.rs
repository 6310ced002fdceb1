//! Configuration for building a manual.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock Basil manual. The file is TOML:
//!
//! ```toml
//! [manual]
//! title = "Basil Language Reference"
//! intro = ["First paragraph.", "Second paragraph."]
//!
//! [compile]
//! reference_section_level = 2
//! category_section_level = 3
//!
//! [highlight]
//! language = "basil"
//! comment_markers = ["REM"]
//! ```
//!
//! ```rust
//! use refman_core::Config;
//!
//! let config = Config::from_toml_str("[highlight]\ncomment_markers = [\"REM\", \"'\"]\n")?;
//! assert_eq!(config.highlight.language, "basil");
//! assert_eq!(config.highlight.comment_markers.len(), 2);
//! # Ok::<(), refman_core::Error>(())
//! ```

use crate::compiler::CompileOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub manual: ManualConfig,
    pub compile: CompileConfig,
    pub highlight: HighlightConfig,
}

/// Text of the overview section at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualConfig {
    pub title: String,
    /// One entry per paragraph; each is inline formatted.
    pub intro: Vec<String>,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            title: "Basil Language Reference".to_string(),
            intro: vec![
                "Basil is a compact, BASIC-flavored language for quick scripting, templating, and learning. \
                 This manual consolidates the complete set of keywords, functions, flow-control constructs, directives, and core types. \
                 Use the sidebar to browse alphabetically or by category, search to filter, and click the # button near each heading for a permalink."
                    .to_string(),
                "Tip: Code samples include a copy button; the sidebar highlights where you are as you scroll."
                    .to_string(),
            ],
        }
    }
}

/// Heading levels that open indexed keyword sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    pub reference_section_level: u8,
    pub category_section_level: u8,
}

impl Default for CompileConfig {
    fn default() -> Self {
        let reference = CompileOptions::reference();
        let category = CompileOptions::category();
        Self {
            reference_section_level: reference.section_heading_level,
            category_section_level: category.section_heading_level,
        }
    }
}

impl CompileConfig {
    #[must_use]
    pub const fn reference_options(&self) -> CompileOptions {
        CompileOptions {
            section_heading_level: self.reference_section_level,
            category_mode: false,
        }
    }

    #[must_use]
    pub const fn category_options(&self) -> CompileOptions {
        CompileOptions {
            section_heading_level: self.category_section_level,
            category_mode: true,
        }
    }
}

/// Which code samples get highlighted, and how comments are recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Fence language whose samples are highlighted (compared lowercased).
    pub language: String,
    /// Words that start a comment running to the end of the line.
    pub comment_markers: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            language: "basil".to_string(),
            comment_markers: vec!["REM".to_string()],
        }
    }
}

impl Config {
    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid TOML, does not
    /// match the configuration schema, or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load configuration from the platform config directory, falling back
    /// to defaults when no file exists there.
    ///
    /// - Linux: `~/.config/refman/config.toml`
    /// - macOS: `~/Library/Application Support/refman/config.toml`
    /// - Windows: `%APPDATA%\refman\config\config.toml`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config directory cannot be
    /// determined, or the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Write the configuration as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization or any filesystem step
    /// fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;

        Ok(())
    }

    /// Platform-specific location of the default config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no home directory can be found.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("", "", "refman")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE))
    }

    /// Check value ranges that the schema alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, level) in [
            (
                "compile.reference_section_level",
                self.compile.reference_section_level,
            ),
            (
                "compile.category_section_level",
                self.compile.category_section_level,
            ),
        ] {
            if !(1..=6).contains(&level) {
                return Err(Error::Config(format!(
                    "{name} must be between 1 and 6, got {level}"
                )));
            }
        }
        if self.highlight.language.trim().is_empty() {
            return Err(Error::Config("highlight.language must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.manual.title, "Basil Language Reference");
        assert_eq!(config.manual.intro.len(), 2);
        assert_eq!(config.compile.reference_section_level, 2);
        assert_eq!(config.compile.category_section_level, 3);
        assert_eq!(config.highlight.language, "basil");
        assert_eq!(config.highlight.comment_markers, ["REM"]);
    }

    #[test]
    fn test_empty_toml_is_default() -> Result<()> {
        assert_eq!(Config::from_toml_str("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() -> Result<()> {
        // Given: Only the manual title is set
        let config = Config::from_toml_str("[manual]\ntitle = \"Basil Handbook\"\n")?;

        // Then: Intro and every other table keep their defaults
        assert_eq!(config.manual.title, "Basil Handbook");
        assert_eq!(config.manual.intro, ManualConfig::default().intro);
        assert_eq!(config.compile, CompileConfig::default());
        Ok(())
    }

    #[test]
    fn test_compile_options_from_config() {
        let config = CompileConfig {
            reference_section_level: 3,
            category_section_level: 4,
        };

        assert_eq!(config.reference_options().section_heading_level, 3);
        assert!(!config.reference_options().category_mode);
        assert_eq!(config.category_options().section_heading_level, 4);
        assert!(config.category_options().category_mode);
        assert_eq!(
            CompileConfig::default().reference_options(),
            CompileOptions::reference()
        );
    }

    #[test]
    fn test_config_save_and_load_roundtrip() -> Result<()> {
        // Given: A temporary directory and a customized configuration
        let temp_dir = TempDir::new().map_err(|e| Error::Config(e.to_string()))?;
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let mut original = Config::default();
        original.manual.title = "Basil Pocket Guide".to_string();
        original.highlight.comment_markers = vec!["REM".to_string(), "'".to_string()];

        // When: Saving and then loading the configuration
        original.save(&config_path)?;
        let loaded = Config::load(&config_path)?;

        // Then: Configurations should be identical
        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(&temp_dir.path().join("absent.toml"));

        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to read config")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_parse_invalid_toml() {
        let result = Config::from_toml_str("this is not valid toml [[[");

        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected Config parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        let result = Config::from_toml_str("[compile]\nreference_section_level = \"two\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_section_level_out_of_range() {
        for bad in ["0", "7"] {
            let toml = format!("[compile]\ncategory_section_level = {bad}\n");
            match Config::from_toml_str(&toml) {
                Err(Error::Config(msg)) => {
                    assert!(msg.contains("compile.category_section_level"));
                },
                other => panic!("Expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_language_rejected() {
        let result = Config::from_toml_str("[highlight]\nlanguage = \"  \"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_default_path_file_name() -> Result<()> {
        let path = Config::default_path()?;
        assert!(path.ends_with(CONFIG_FILE));
        Ok(())
    }

    #[test]
    fn test_config_unicode_handling() -> Result<()> {
        let config = Config::from_toml_str(
            "[manual]\ntitle = \"Référence Basil\"\nintro = [\"Écrire du code 🚀\"]\n",
        )?;
        assert_eq!(config.manual.title, "Référence Basil");
        assert_eq!(config.manual.intro, ["Écrire du code 🚀"]);
        Ok(())
    }

    proptest! {
        #[test]
        fn test_section_levels_roundtrip(reference in 1u8..=6, category in 1u8..=6) {
            let mut config = Config::default();
            config.compile.reference_section_level = reference;
            config.compile.category_section_level = category;

            let text = toml::to_string_pretty(&config).unwrap();
            let parsed = Config::from_toml_str(&text).unwrap();
            prop_assert_eq!(parsed, config);
        }

        #[test]
        fn test_comment_markers_roundtrip(markers in prop::collection::vec("[A-Za-z'/#]{1,4}", 0..=4)) {
            let mut config = Config::default();
            config.highlight.comment_markers = markers;

            let text = toml::to_string_pretty(&config).unwrap();
            let parsed = Config::from_toml_str(&text).unwrap();
            prop_assert_eq!(parsed, config);
        }
    }
}
