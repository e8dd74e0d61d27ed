use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use glossa_config::Config;

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Resolve the config: explicit flag, then the `GLOSSA_CONFIG` env var,
/// then `config.json` in the working directory, then built-in defaults.
/// An explicitly named file that fails to load is an error; env
/// overrides apply on top of whichever layer won.
pub fn load_config(flag: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = if let Some(path) = flag {
        load_config_file(path)?
    } else if let Ok(path) = std::env::var("GLOSSA_CONFIG") {
        load_config_file(&PathBuf::from(path))?
    } else if Path::new("config.json").exists() {
        load_config_file(Path::new("config.json"))?
    } else {
        tracing::info!("No config file found, using built-in defaults");
        Config::default()
    };

    config.apply_env_overrides();
    Ok(config)
}
