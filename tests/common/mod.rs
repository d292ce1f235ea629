//! Common test utilities for csvql integration tests
//!
//! Provides shared helpers for:
//! - Locating the checked-in CSV fixtures
//! - Building throwaway data directories
//! - Running a query and capturing its output

#![allow(dead_code)]

use std::path::PathBuf;

use csvql::{run_query, CliResult, Config, QueryOptions};
use tempfile::TempDir;

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn config_for(dir: impl Into<PathBuf>) -> Config {
    Config {
        data_dir: dir.into(),
        ..Config::default()
    }
}

/// Data directory holding the given `(table, csv content)` pairs.
pub fn create_data_dir(tables: &[(&str, &str)]) -> TempDir {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in tables {
        std::fs::write(tmp_dir.path().join(format!("{}.csv", name)), content)
            .expect("Failed to write table");
    }
    tmp_dir
}

pub fn run_with(query: &str, config: &Config, options: &QueryOptions) -> CliResult<String> {
    let mut out = Vec::new();
    run_query(query, config, options, &mut out)?;
    Ok(String::from_utf8(out).expect("output is utf-8"))
}

pub fn run(query: &str, config: &Config) -> CliResult<String> {
    run_with(query, config, &QueryOptions::default())
}

/// Run against the checked-in fixtures.
pub fn run_fixture(query: &str) -> CliResult<String> {
    run(query, &config_for(fixture_dir()))
}
