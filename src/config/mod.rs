//! JSON configuration for the command-line tools.
//!
//! Each tool takes one config file path as its first argument. Option blocks
//! (`dedup`, `hotspots`) may be omitted and fall back to their defaults.
pub mod dedup;
pub mod hotspots;
pub mod pipeline;

use crate::error::{InspectError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and parse a JSON config file.
pub fn load_json_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| {
        InspectError::Config(format!("Failed to read config {}: {e}", path.display()))
    })?;
    serde_json::from_str(&data).map_err(|e| {
        InspectError::Config(format!("Failed to parse config {}: {e}", path.display()))
    })
}
