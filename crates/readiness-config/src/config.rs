// crates/readiness-config/src/config.rs
// ============================================================================
// Module: Readiness Configuration
// Description: Configuration loading and validation for the readiness checker.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: readiness-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults, so an empty file yields the stock engine:
//! deduplicated `missingInfo`, broken packs skipped, the standard Schengen
//! table, and audit events on stderr. Invalid values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use readiness_core::CheckerConfig;
use readiness_core::FileAuditSink;
use readiness_core::InvalidPackPolicy;
use readiness_core::MissingInfoPolicy;
use readiness_core::NoopAuditSink;
use readiness_core::PackLimits;
use readiness_core::ReadinessAuditSink;
use readiness_core::ReadinessChecker;
use readiness_core::SchengenTable;
use readiness_core::StderrAuditSink;
use readiness_core::core::pack::DEFAULT_MAX_CONDITION_DEPTH;
use readiness_core::runtime::checker::DEFAULT_SCHENGEN_MEMBERS;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "readiness.toml";
/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "READINESS_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted `engine.max_condition_depth`.
pub const MIN_CONDITION_DEPTH: usize = 1;
/// Largest accepted `engine.max_condition_depth`.
pub const MAX_CONDITION_DEPTH: usize = 256;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Readiness engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReadinessConfig {
    /// Evaluation policy.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Schengen membership table.
    #[serde(default)]
    pub schengen: SchengenConfig,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl ReadinessConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path argument wins, then [`CONFIG_ENV_VAR`], then
    /// `readiness.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.schengen.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the checker configuration described by this config.
    #[must_use]
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            schengen: SchengenTable::new(&self.schengen.members),
            missing_info: self.engine.missing_info,
            on_invalid_pack: self.engine.on_invalid_pack,
            limits: PackLimits {
                max_condition_depth: self.engine.max_condition_depth,
            },
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened and
    /// [`ConfigError::Invalid`] when a file sink has no path.
    pub fn build_audit_sink(&self) -> Result<Arc<dyn ReadinessAuditSink>, ConfigError> {
        match self.audit.sink {
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::File => {
                let path = self.audit.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("audit.path must be set for file sink".to_string())
                })?;
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }

    /// Builds a checker wired to the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit sink cannot be opened.
    pub fn build_checker(&self) -> Result<ReadinessChecker, ConfigError> {
        let audit = self.build_audit_sink()?;
        Ok(ReadinessChecker::new(self.checker_config()).with_audit_sink(audit))
    }
}

/// Evaluation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How `missingInfo` questions are collected.
    #[serde(default)]
    pub missing_info: MissingInfoPolicy,
    /// What multi-destination checks do with broken packs.
    #[serde(default)]
    pub on_invalid_pack: InvalidPackPolicy,
    /// Maximum rule condition depth accepted by structural checks.
    #[serde(default = "default_max_condition_depth")]
    pub max_condition_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_info: MissingInfoPolicy::default(),
            on_invalid_pack: InvalidPackPolicy::default(),
            max_condition_depth: default_max_condition_depth(),
        }
    }
}

impl EngineConfig {
    /// Validates engine limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CONDITION_DEPTH ..= MAX_CONDITION_DEPTH).contains(&self.max_condition_depth) {
            return Err(ConfigError::Invalid(format!(
                "engine.max_condition_depth must be between {MIN_CONDITION_DEPTH} and \
                 {MAX_CONDITION_DEPTH}"
            )));
        }
        Ok(())
    }
}

/// Schengen membership table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchengenConfig {
    /// Member country codes (ISO 3166-1 alpha-2, uppercase).
    #[serde(default = "default_schengen_members")]
    pub members: Vec<String>,
}

impl Default for SchengenConfig {
    fn default() -> Self {
        Self {
            members: default_schengen_members(),
        }
    }
}

impl SchengenConfig {
    /// Validates member codes.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for code in &self.members {
            let well_formed = code.len() == 2 && code.bytes().all(|byte| byte.is_ascii_uppercase());
            if !well_formed {
                return Err(ConfigError::Invalid(format!(
                    "schengen.members entry {code:?} must be two uppercase ascii letters"
                )));
            }
            if !seen.insert(code.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate schengen.members entry: {code}")));
            }
        }
        Ok(())
    }
}

/// Audit sink kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Audit disabled.
    None,
}

/// Audit sink selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path, required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path must be set for file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::Stderr | AuditSinkKind::None, _) => Ok(()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `engine.max_condition_depth`.
const fn default_max_condition_depth() -> usize {
    DEFAULT_MAX_CONDITION_DEPTH
}

/// Default for `schengen.members`.
fn default_schengen_members() -> Vec<String> {
    DEFAULT_SCHENGEN_MEMBERS.iter().map(ToString::to_string).collect()
}

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string from the config against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies an explicit path wins over every default.
    #[test]
    fn explicit_path_wins() {
        let resolved = resolve_path(Some(Path::new("custom.toml")));
        assert_eq!(resolved, Ok(PathBuf::from("custom.toml")));
    }

    /// Verifies overlong path components are rejected.
    #[test]
    fn validate_path_rejects_long_components() {
        let long = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        assert!(validate_path(Path::new(&long)).is_err());
        assert!(validate_path(Path::new("readiness.toml")).is_ok());
    }

    /// Verifies blank audit paths are rejected.
    #[test]
    fn validate_path_string_rejects_blank() {
        let result = validate_path_string("audit.path", "   ");
        assert_eq!(result, Err(ConfigError::Invalid("audit.path must be non-empty".to_string())));
    }
}
