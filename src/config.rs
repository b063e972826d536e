use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SONGS_URL: &str = "https://kitek.ktkv.dev/songs.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub songs_url: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            songs_url: DEFAULT_SONGS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("songview")
        .join("config.toml")
}

pub fn load_config() -> Config {
    let path = config_path();
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            Config::default()
        }
    }
}

fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).context("설정 파일 형식이 올바르지 않습니다")
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("설정 디렉토리를 만들 수 없습니다: {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)
        .with_context(|| format!("설정 파일을 저장할 수 없습니다: {}", path.display()))?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.source.songs_url, DEFAULT_SONGS_URL);
        assert_eq!(cfg.source.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_source_section() {
        let cfg = parse_config("[source]\ntimeout_secs = 3\n").unwrap();
        assert_eq!(cfg.source.songs_url, DEFAULT_SONGS_URL);
        assert_eq!(cfg.source.timeout_secs, 3);
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(parse_config("[source]\ntimeout_secs = \"soon\"\n").is_err());
    }

    #[test]
    fn test_config_roundtrip_text() {
        let cfg = Config {
            source: SourceConfig {
                songs_url: "http://localhost:8000/songs.json".to_string(),
                timeout_secs: 5,
            },
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("songs_url = \"http://localhost:8000/songs.json\""));
    }
}
