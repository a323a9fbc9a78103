//! Tool defaults loaded from an optional `bundlegen.toml` in the project root.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::AppError;

pub const CONFIG_FILE: &str = "bundlegen.toml";

/// Defaults applied when the corresponding CLI flags are omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolConfig {
    /// Author credited in generated manifests.
    #[serde(default)]
    pub author: AuthorDefaults,
    /// General generation defaults.
    #[serde(default)]
    pub defaults: GeneralDefaults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorDefaults {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralDefaults {
    #[serde(default = "default_license")]
    pub license: String,
}

impl Default for GeneralDefaults {
    fn default() -> Self {
        Self { license: default_license() }
    }
}

fn default_license() -> String {
    String::from("MIT")
}

impl ToolConfig {
    /// Load `bundlegen.toml` from the project root; a missing file means
    /// pure defaults.
    pub fn load(project_root: &Path) -> Result<Self, AppError> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| AppError::invalid_input(format!("Malformed {CONFIG_FILE}: {e}")))
    }
}
