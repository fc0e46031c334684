use crate::core::conflicts::DEFAULT_THRESHOLD_KM;
use crate::core::{ColumnMapping, ConfigProvider, OutputFormat, StrategyKind};
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub plan: PlanConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub coloring: ColoringConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub name_column: Option<String>,
    pub latitude_column: Option<String>,
    pub longitude_column: Option<String>,
    pub strict_coordinates: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub threshold_km: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColoringConfig {
    pub strategy: Option<StrategyKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<OutputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlanError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlanError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlanError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("plan.name", &self.plan.name)?;
        validation::validate_csv_path("input.path", &self.input.path)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;

        if let Some(threshold) = self.detection.threshold_km {
            validation::validate_positive_finite("detection.threshold_km", threshold)?;
        }

        for (field, value) in [
            ("input.name_column", &self.input.name_column),
            ("input.latitude_column", &self.input.latitude_column),
            ("input.longitude_column", &self.input.longitude_column),
        ] {
            if let Some(value) = value {
                validation::validate_non_empty_string(field, value)?;
            }
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn columns(&self) -> ColumnMapping {
        let defaults = ColumnMapping::default();
        ColumnMapping {
            name: self.input.name_column.clone().unwrap_or(defaults.name),
            latitude: self
                .input
                .latitude_column
                .clone()
                .unwrap_or(defaults.latitude),
            longitude: self
                .input
                .longitude_column
                .clone()
                .unwrap_or(defaults.longitude),
        }
    }

    fn threshold_km(&self) -> f64 {
        self.detection.threshold_km.unwrap_or(DEFAULT_THRESHOLD_KM)
    }

    fn strategy(&self) -> StrategyKind {
        self.coloring.strategy.unwrap_or_default()
    }

    fn strict_coordinates(&self) -> bool {
        self.input.strict_coordinates.unwrap_or(false)
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.output.output_formats.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[plan]
name = "league-2025"
description = "Regional league spacing"

[input]
path = "teams.csv"
name_column = "Club"
strict_coordinates = true

[detection]
threshold_km = 15.0

[coloring]
strategy = "dsatur"

[output]
output_path = "./plan-output"
output_formats = ["text", "json", "dot"]

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.plan.name, "league-2025");
        assert_eq!(config.input_path(), "teams.csv");
        assert_eq!(config.columns().name, "Club");
        assert_eq!(config.columns().latitude, "Latitude");
        assert_eq!(config.threshold_km(), 15.0);
        assert_eq!(config.strategy(), StrategyKind::Dsatur);
        assert!(config.strict_coordinates());
        assert_eq!(
            config.output_formats(),
            vec![OutputFormat::Text, OutputFormat::Json, OutputFormat::Dot]
        );
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[plan]
name = "minimal"

[input]
path = "data2.csv"

[output]
output_path = "./output"
output_formats = ["text"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.threshold_km(), 20.0);
        assert_eq!(config.strategy(), StrategyKind::LargestFirst);
        assert_eq!(config.columns(), ColumnMapping::default());
        assert!(!config.strict_coordinates());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROXIMITY_TEST_INPUT", "fixtures/teams.csv");

        let toml_content = r#"
[plan]
name = "env"

[input]
path = "${PROXIMITY_TEST_INPUT}"

[output]
output_path = "${PROXIMITY_TEST_UNSET_DIR}"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, "fixtures/teams.csv");
        assert_eq!(config.output.output_path, "${PROXIMITY_TEST_UNSET_DIR}");

        std::env::remove_var("PROXIMITY_TEST_INPUT");
    }

    #[test]
    fn test_config_validation() {
        let base = |extra: &str| {
            format!(
                r#"
[plan]
name = "bad"

[input]
path = "teams.csv"

[output]
output_path = "./output"
output_formats = ["text"]
{}
"#,
                extra
            )
        };

        let config = TomlConfig::from_toml_str(&base("[detection]\nthreshold_km = -5.0")).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_strategy_and_format_are_rejected() {
        let base = |strategy: &str, formats: &str| {
            format!(
                r#"
[plan]
name = "typo"

[input]
path = "teams.csv"

[coloring]
strategy = "{}"

[output]
output_path = "./output"
output_formats = {}
"#,
                strategy, formats
            )
        };

        let err = TomlConfig::from_toml_str(&base("random", r#"["text"]"#)).unwrap_err();
        assert!(matches!(err, PlanError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("random"));

        // A typo in one format must not silently drop it.
        let err = TomlConfig::from_toml_str(&base("dsatur", r#"["text", "pdf"]"#)).unwrap_err();
        assert!(matches!(err, PlanError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("pdf"));

        let err = TomlConfig::from_toml_str(&base("DSATUR", r#"["text"]"#)).unwrap_err();
        assert!(matches!(err, PlanError::ConfigValidationError { .. }));

        let config = TomlConfig::from_toml_str(&base("largest_first", r#"["csv", "dot"]"#)).unwrap();
        assert_eq!(config.strategy(), StrategyKind::LargestFirst);
        assert_eq!(config.output_formats(), vec![OutputFormat::Csv, OutputFormat::Dot]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[plan\nname = ").unwrap_err();
        assert!(matches!(err, PlanError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[plan]
name = "file-test"

[input]
path = "teams.csv"

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.plan.name, "file-test");
    }
}
