//! CLI configuration file
//!
//! Optional JSON file:
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "custom_checks": [
//!     { "name": "is_even", "params": "bare" },
//!     { "name": "divisible_by", "params": "single" },
//!     { "name": "between", "params": ["low", "high"] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::schema::{CheckKind, CheckRegistry, ParamStyle};
use crate::yaml::YamlCodec;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Check kinds accepted on top of the built-in ones
    #[serde(default)]
    pub custom_checks: Vec<CustomCheck>,
}

/// A custom check kind declared in the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCheck {
    pub name: String,
    #[serde(default)]
    pub params: ParamSpec,
}

/// Parameter layout: `"bare"`, `"single"`, or a list of field names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSpec {
    Keyword(String),
    Fields(Vec<String>),
}

impl Default for ParamSpec {
    fn default() -> Self {
        ParamSpec::Keyword("bare".to_string())
    }
}

impl ParamSpec {
    fn to_style(&self) -> CliResult<ParamStyle> {
        match self {
            ParamSpec::Keyword(k) if k == "bare" => Ok(ParamStyle::Bare),
            ParamSpec::Keyword(k) if k == "single" => Ok(ParamStyle::Single),
            ParamSpec::Keyword(other) => Err(CliError::config_error(format!(
                "Invalid check params: '{}'. Must be 'bare', 'single' or a list of names.",
                other
            ))),
            ParamSpec::Fields(fields) if fields.is_empty() => Err(CliError::config_error(
                "Check params field list must not be empty",
            )),
            ParamSpec::Fields(fields) => Ok(ParamStyle::Fields(fields.clone())),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            custom_checks: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;
        self.registry()?;
        Ok(())
    }

    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }

    /// Built-in checks plus the configured custom ones
    pub fn registry(&self) -> CliResult<CheckRegistry> {
        let mut registry = CheckRegistry::builtin();
        for check in &self.custom_checks {
            if check.name.trim().is_empty() {
                return Err(CliError::config_error("Custom check name must not be empty"));
            }
            let kind = CheckKind::new(check.name.clone(), check.params.to_style()?);
            registry
                .register(kind)
                .map_err(|e| CliError::config_error(e.to_string()))?;
        }
        Ok(registry)
    }

    /// Codec stamped with this crate's version
    pub fn codec(&self) -> CliResult<YamlCodec> {
        Ok(YamlCodec::default().with_registry(self.registry()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("dfschema.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert_eq!(config.registry().unwrap().len(), CheckRegistry::builtin().len());
    }

    #[test]
    fn test_load_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(config.custom_checks.is_empty());
    }

    #[test]
    fn test_load_custom_checks() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "log_level": "info",
                "custom_checks": [
                    {"name": "is_even"},
                    {"name": "divisible_by", "params": "single"},
                    {"name": "between", "params": ["low", "high"]}
                ]
            }"#,
        );
        let config = Config::load(&path).unwrap();
        let registry = config.registry().unwrap();

        assert_eq!(registry.get("is_even").unwrap().params, ParamStyle::Bare);
        assert_eq!(registry.get("divisible_by").unwrap().params, ParamStyle::Single);
        assert_eq!(
            registry.get("between").unwrap().params,
            ParamStyle::Fields(vec!["low".into(), "high".into()])
        );
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_invalid_log_level() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"log_level": "chatty"}"#);
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "DFS_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_custom_check_shadowing_builtin() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"custom_checks": [{"name": "greater_than", "params": "single"}]}"#,
        );
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_invalid_params_keyword() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"custom_checks": [{"name": "odd", "params": "many"}]}"#,
        );
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }
}
