use crate::core::config::AppConfig;
use anyhow::{Context, Result};

const DEFAULT_CONFIG: &str = r#"---
providers:
  mfapi:
    base_url: "https://api.mfapi.in"

# Uncomment to mirror user data to a remote key-value store. Reads fall
# back to the local store whenever the remote one is unreachable.
# remote_store:
#   base_url: "https://kv.example.com"

# data_path: "/path/to/data"
"#;

/// Writes the default configuration file, refusing to overwrite one that
/// already exists.
pub fn run() -> Result<()> {
    let path = AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    println!("Created default configuration at {}", path.display());
    Ok(())
}
