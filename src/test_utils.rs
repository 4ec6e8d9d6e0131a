//! Test utilities shared across test modules
//!
//! This module provides common helper functions for testing, avoiding duplication
//! across multiple test suites.

use crate::paths::Paths;
use tempfile::TempDir;

/// Create a Paths struct for testing using a temporary directory
///
/// The temp directory plays the role of the home directory, and the profile
/// document lives at its root as `confs.yaml`.
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    Paths::with_locations(temp_dir.path(), temp_dir.path().join("confs.yaml"))
}
