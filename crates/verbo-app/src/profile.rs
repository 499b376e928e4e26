use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use verbo_config::Config;

const DEFAULT_CONFIG_FILE: &str = "verbo.json";

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// An explicit `--config` must exist; otherwise `verbo.json` in the working
/// directory is used when present, and environment defaults when not.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return read_config(path)
            .with_context(|| format!("Failed to read config {}", path.display()));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return read_config(&local);
    }

    Ok(Config::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_is_read() {
        let path = std::env::temp_dir().join(format!("verbo-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"drill": {"tags": "irregular"}, "log": {"json": true}}"#).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.drill.tags, "irregular");
        assert!(config.log.json);
        assert_eq!(config.drill.max_distractor_attempts, 24);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let path = std::env::temp_dir().join("verbo-config-does-not-exist.json");
        assert!(load_config(Some(path.as_path())).is_err());
    }
}
