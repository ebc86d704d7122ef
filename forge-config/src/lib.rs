//! Shared configuration loader for the forge tools.
//!
//! `defaults/forge.default.toml` is embedded into every binary so the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! user files on top of those defaults via [`Loader`] before deserializing
//! into [`ForgeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use forge::{ForgeError, ValidationConfig, Validator};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/forge.default.toml");

/// Top-level configuration consumed by forge applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ForgeConfig {
    pub validation: ValidationConfig,
}

impl ForgeConfig {
    /// The validation settings, checked.
    ///
    /// Loading only guarantees the file has the right shape; a heading such as
    /// `"Your Role"` (no `#`) deserializes fine but is rejected here.
    pub fn validation_config(&self) -> Result<ValidationConfig, ForgeError> {
        self.validation.check()?;
        Ok(self.validation.clone())
    }

    pub fn validator(&self) -> Result<Validator, ForgeError> {
        Validator::new(self.validation.clone())
    }
}

/// File name picked up from a project directory by [`Loader::with_project_file`].
pub const PROJECT_CONFIG_FILE: &str = "forge.toml";

/// Layers validation settings: embedded defaults, then project and user TOML
/// files, then single-key overrides. Later layers win key by key, so a file
/// that only sets `min_section_length` keeps the default required sections.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from `defaults/forge.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file the user named explicitly; it must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), true));
        self
    }

    /// Layer a file only if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), false));
        self
    }

    /// Layer `forge.toml` from `dir` when the project has one.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(PROJECT_CONFIG_FILE);
        self.with_optional_file(path)
    }

    /// Override one key, e.g. `validation.min_section_length`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer into a [`ForgeConfig`]. Heading checks happen later,
    /// in [`ForgeConfig::validator`].
    pub fn build(self) -> Result<ForgeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

fn toml_file(path: &Path, required: bool) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ForgeConfig, ConfigError> {
    Loader::new().build()
}
