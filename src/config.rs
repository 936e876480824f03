//! Configuration for Vitae
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the command layer)
//! 2. Environment variables (VITAE_*)
//! 3. Project config (./vitae.toml)
//! 4. User config (~/.config/vitae/config.toml)
//! 5. Built-in defaults (lowest priority)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{VitaeError, VitaeResult};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

/// Directory layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_templates_dir")]
    pub templates: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates: default_templates_dir(),
            output: default_output_dir(),
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// LaTeX engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Engine binary to invoke
    #[serde(default = "default_program")]
    pub program: String,

    /// Number of engine passes (two resolves cross-references)
    #[serde(default = "default_passes")]
    pub passes: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            passes: default_passes(),
        }
    }
}

fn default_program() -> String {
    "xelatex".to_string()
}

fn default_passes() -> u32 {
    2
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> VitaeResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> VitaeResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Config = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| VitaeError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ConfigWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from project config, user config, or defaults, with env overrides
    pub fn load_or_default(project_root: &Path) -> (Self, Vec<ConfigWarning>) {
        let project_config = project_root.join("vitae.toml");
        if project_config.exists() {
            if let Ok((config, warnings)) = Self::load_with_warnings(&project_config) {
                return (with_env_overrides(config), warnings);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("vitae/config.toml");
            if user_config.exists() {
                if let Ok((config, warnings)) = Self::load_with_warnings(&user_config) {
                    return (with_env_overrides(config), warnings);
                }
            }
        }

        (with_env_overrides(Config::default()), Vec::new())
    }
}

/// Apply VITAE_* environment overrides on top of a loaded config
fn with_env_overrides(mut config: Config) -> Config {
    if let Ok(dir) = std::env::var("VITAE_TEMPLATES_DIR") {
        if !dir.is_empty() {
            config.paths.templates = PathBuf::from(dir);
        }
    }
    if let Ok(dir) = std::env::var("VITAE_OUTPUT_DIR") {
        if !dir.is_empty() {
            config.paths.output = PathBuf::from(dir);
        }
    }
    if let Ok(program) = std::env::var("VITAE_COMPILER") {
        if !program.is_empty() {
            config.compiler.program = program;
        }
    }
    config
}
