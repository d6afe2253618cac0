//! Integration test common infrastructure.
//!
//! Provides generated TLS assets and scratch config files for exercising
//! resolution and trust-context assembly end to end.

#![allow(dead_code)]

pub mod tls;

use std::io::Write;
use std::path::PathBuf;

/// Write a JSON config file into a fresh temp dir, returning the handle and
/// the file path. The dir handle must outlive the test's use of the path.
pub fn write_config(json: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("beacond.json");
    let mut file = std::fs::File::create(&path).expect("create config file");
    file.write_all(json.as_bytes()).expect("write config file");
    (dir, path)
}
