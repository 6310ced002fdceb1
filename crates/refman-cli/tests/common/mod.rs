#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

#[allow(dead_code)]
pub const REFERENCE: &str = r#"# Basil Reference

## PRINT
*Type:* statement

Writes output to the console.

```basil
PRINT "hi", 42 REM greet
```

## INPUT
Reads a line from the console.

## FOR EACH
Iterates over a collection.
"#;

#[allow(dead_code)]
pub const CATEGORY: &str = "# Categories

## Input & Output

### PRINT
Writes output to the console.

### INPUT
Reads a line from the console.

## Loops

### FOR EACH
Iterates over a collection.
";

/// A scratch directory holding both manual sources and an empty config.
pub struct Fixture {
    pub dir: TempDir,
    pub reference: PathBuf,
    pub category: PathBuf,
    pub config: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_sources(REFERENCE, CATEGORY)
    }

    pub fn with_sources(reference: &str, category: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create fixture dir");
        let reference_path = dir.path().join("reference.md");
        let category_path = dir.path().join("categories.md");
        let config_path = dir.path().join("config.toml");
        std::fs::write(&reference_path, reference).unwrap();
        std::fs::write(&category_path, category).unwrap();
        std::fs::write(&config_path, "").unwrap();
        Self {
            dir,
            reference: reference_path,
            category: category_path,
            config: config_path,
        }
    }

    /// A `refman` command isolated from the user's config and terminal.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("refman"));
        cmd.timeout(CMD_TIMEOUT);
        cmd.env("REFMAN_CONFIG", &self.config);
        cmd.env_remove("REFMAN_OUTPUT_FORMAT");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// `-r <reference> -c <category>`
    #[allow(dead_code)]
    pub fn source_args(&self) -> [String; 4] {
        [
            "-r".to_string(),
            self.reference.display().to_string(),
            "-c".to_string(),
            self.category.display().to_string(),
        ]
    }
}
