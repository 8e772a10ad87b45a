// Curator configuration overrides loaded from a TOML / JSON / YAML file
use std::path::Path;
use tracing::info;

use crate::error::{CuratorError, Result};
use crate::models::CuratorConfigOverrides;

/// Read a partial configuration document. Keys use the snake_case field names,
/// weights live under a `[weights]` table. Missing keys stay absent.
pub fn load_overrides_from_file(path: impl AsRef<Path>) -> Result<CuratorConfigOverrides> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CuratorError::InvalidInput {
            message: format!("config file not found: {}", path.display()),
        });
    }

    let overrides: CuratorConfigOverrides = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?
        .try_deserialize()?;

    info!(path = %path.display(), "Loaded curator config overrides from file");
    Ok(overrides)
}
