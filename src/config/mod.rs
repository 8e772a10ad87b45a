pub mod env;
pub mod file;
pub mod merge;

pub use env::*;
pub use file::*;
pub use merge::*;

use crate::error::Result;
use crate::models::{CuratorConfig, CuratorConfigOverrides};
use std::path::Path;

/// Resolve the configuration from an optional overrides file with the
/// environment layered on top
pub fn resolve_config(file: Option<&Path>) -> Result<CuratorConfig> {
    let from_file = match file {
        Some(path) => load_overrides_from_file(path)?,
        None => CuratorConfigOverrides::default(),
    };
    let overrides = from_file.overlay(load_config_from_env());
    Ok(merge_config(Some(&overrides)))
}
