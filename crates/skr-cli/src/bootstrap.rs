use std::path::Path;

use anyhow::Context;
use skr_config::SkrConfig;
use skr_db::SkrDb;

use crate::cli::GlobalFlags;

/// Load layered config and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SkrConfig> {
    let config = SkrConfig::load_with_dotenv().context("failed to load skrump config")?;
    Ok(apply_overrides(config, flags))
}

fn apply_overrides(mut config: SkrConfig, flags: &GlobalFlags) -> SkrConfig {
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
    }
    config
}

/// Open the configured database, creating its parent directory if needed.
pub async fn open_db(config: &SkrConfig) -> anyhow::Result<SkrDb> {
    let path = &config.database.path;
    if !config.database.is_in_memory()
        && let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    SkrDb::open_local(path)
        .await
        .with_context(|| format!("failed to open database at {path}"))
}
