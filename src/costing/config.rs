use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::costing::error::{ReportError, Result};

/// Sales tax applied to every cost, as a fraction.
pub const TAX_RATE: f64 = 0.07;
/// Business overhead applied on top of the tax-inclusive cost, as a fraction.
pub const OVERHEAD_RATE: f64 = 0.15;

pub const DEFAULT_INPUT_DIR: &str = "InputFiles";
pub const DEFAULT_OUTPUT_DIR: &str = "OutputFiles";
pub const DEFAULT_LABOR_FILE: &str = "labor_hours.csv";
pub const DEFAULT_MATERIAL_FILE: &str = "material_purchases.csv";

/// Settings for a single report run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory holding the labor and material CSV files.
    pub input_dir: PathBuf,
    /// Directory receiving the generated workbook.
    pub output_dir: PathBuf,
    pub labor_file: String,
    pub material_file: String,
    pub tax_rate: f64,
    pub overhead_rate: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            labor_file: DEFAULT_LABOR_FILE.to_string(),
            material_file: DEFAULT_MATERIAL_FILE.to_string(),
            tax_rate: TAX_RATE,
            overhead_rate: OVERHEAD_RATE,
        }
    }
}

/// Values given on the command line; each one that is set replaces the
/// corresponding file or default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub labor_file: Option<String>,
    pub material_file: Option<String>,
    pub tax_rate: Option<f64>,
    pub overhead_rate: Option<f64>,
}

impl ReportConfig {
    /// Resolves the settings for a run: defaults, then the optional JSON
    /// file, then `overrides`.
    pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input_dir) = overrides.input_dir {
            self.input_dir = input_dir;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(labor_file) = overrides.labor_file {
            self.labor_file = labor_file;
        }
        if let Some(material_file) = overrides.material_file {
            self.material_file = material_file;
        }
        if let Some(tax_rate) = overrides.tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(overhead_rate) = overrides.overhead_rate {
            self.overhead_rate = overhead_rate;
        }
        self
    }

    /// Loads a JSON configuration file. Keys that are not present keep their
    /// default values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::InputNotFound(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn labor_path(&self) -> PathBuf {
        self.input_dir.join(&self.labor_file)
    }

    pub fn material_path(&self) -> PathBuf {
        self.input_dir.join(&self.material_file)
    }

    /// Checks that rates and file names are usable before any input is read.
    pub fn validate(&self) -> Result<()> {
        check_rate("tax_rate", self.tax_rate)?;
        check_rate("overhead_rate", self.overhead_rate)?;
        if self.labor_file.trim().is_empty() {
            return Err(ReportError::InvalidConfig("labor_file is empty".into()));
        }
        if self.material_file.trim().is_empty() {
            return Err(ReportError::InvalidConfig("material_file is empty".into()));
        }
        Ok(())
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ReportError::InvalidConfig(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("report.json");
        fs::write(&path, r#"{ "input_dir": "/data/in", "tax_rate": 0.08 }"#)
            .expect("config written");

        let config = ReportConfig::load(&path).expect("config loaded");

        assert_eq!(config.input_dir, PathBuf::from("/data/in"));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.tax_rate, 0.08);
        assert_eq!(config.overhead_rate, OVERHEAD_RATE);
        assert_eq!(config.labor_path(), PathBuf::from("/data/in/labor_hours.csv"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("report.json");
        fs::write(&path, r#"{ "inputdir": "typo" }"#).expect("config written");

        assert!(matches!(
            ReportConfig::load(&path),
            Err(ReportError::Json(_))
        ));
    }

    #[test]
    fn negative_rate_fails_validation() {
        let config = ReportConfig {
            overhead_rate: -0.1,
            ..ReportConfig::default()
        };

        let error = config.validate().expect_err("negative rate rejected");
        assert!(error.to_string().contains("overhead_rate"));
    }

    #[test]
    fn flags_beat_file_and_file_beats_defaults() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("report.json");
        fs::write(
            &path,
            r#"{ "input_dir": "/file/in", "output_dir": "/file/out", "tax_rate": 0.05 }"#,
        )
        .expect("config written");

        let config = ReportConfig::resolve(
            Some(&path),
            ConfigOverrides {
                output_dir: Some(PathBuf::from("/flag/out")),
                overhead_rate: Some(0.2),
                ..ConfigOverrides::default()
            },
        )
        .expect("config resolved");

        assert_eq!(config.input_dir, PathBuf::from("/file/in"));
        assert_eq!(config.output_dir, PathBuf::from("/flag/out"));
        assert_eq!(config.tax_rate, 0.05);
        assert_eq!(config.overhead_rate, 0.2);
        assert_eq!(config.labor_file, DEFAULT_LABOR_FILE);
    }

    #[test]
    fn flags_apply_without_a_file() {
        let config = ReportConfig::resolve(
            None,
            ConfigOverrides {
                material_file: Some("purchases.csv".into()),
                ..ConfigOverrides::default()
            },
        )
        .expect("config resolved");

        assert_eq!(config.material_file, "purchases.csv");
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.tax_rate, TAX_RATE);
    }
}
