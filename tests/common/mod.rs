use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use scope_cost_report::config::ReportConfig;
use tempfile::TempDir;

pub const EPSILON: f64 = 1e-9;

/// A throwaway input/output directory pair holding the two CSV tables.
pub struct Workspace {
    pub dir: TempDir,
    pub config: ReportConfig,
}

impl Workspace {
    pub fn new(labor_csv: &str, material_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let input_dir = dir.path().join("InputFiles");
        fs::create_dir_all(&input_dir).expect("input directory");

        let config = ReportConfig {
            input_dir,
            output_dir: dir.path().join("OutputFiles"),
            ..ReportConfig::default()
        };
        fs::write(config.labor_path(), labor_csv).expect("labor csv written");
        fs::write(config.material_path(), material_csv).expect("material csv written");

        Self { dir, config }
    }

    #[allow(dead_code)]
    pub fn output_files(&self) -> Vec<String> {
        list(&self.config.output_dir)
    }
}

fn list(dir: &Path) -> Vec<String> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|entry| {
                entry
                    .expect("directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|date| date.and_hms_opt(16, 45, 12))
        .expect("valid timestamp")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
