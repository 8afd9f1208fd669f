use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::theme::ThemeName;

/// Storage key the theme preference is written under unless configured otherwise.
pub const DEFAULT_THEME_KEY: &str = "airline-ui-theme";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Theme used when no preference has been stored yet
    #[serde(default)]
    pub default_theme: ThemeName,

    /// Key the selected theme is persisted under in preferences.toml
    #[serde(default = "default_theme_key")]
    pub theme_storage_key: String,

    /// Upper bound on travelers in the booking form
    #[serde(default = "default_passenger_count")]
    pub passenger_count: usize,
}

fn default_theme_key() -> String {
    DEFAULT_THEME_KEY.to_string()
}

fn default_passenger_count() -> usize {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_theme: ThemeName::default(),
            theme_storage_key: default_theme_key(),
            passenger_count: default_passenger_count(),
        }
    }
}

/// Directory holding config.toml and preferences.toml
pub fn config_dir() -> crate::error::Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(Error::ConfigDir)?.join("skydesk");

    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("Could not create config directory: {}", e);
    }

    Ok(dir)
}

impl AppConfig {
    fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        let mut clean_config = self.clone();
        if clean_config.theme_storage_key.trim().is_empty() {
            clean_config.theme_storage_key = default_theme_key();
        }
        clean_config.passenger_count = clean_config.passenger_count.max(1);

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// String key-value persistence, the shape of a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()>;
}

/// In-memory store, used when no preferences file is available and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A flat toml table of string preferences, rewritten in full on every set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `<config_dir>/skydesk/preferences.toml`
    pub fn open_default() -> crate::error::Result<Self> {
        Self::open(config_dir()?.join("preferences.toml"))
    }

    /// Open a preferences file. A missing file is an empty store, and so is
    /// one that does not parse; the next `set` rewrites it.
    pub fn open(path: impl Into<PathBuf>) -> crate::error::Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            match Self::parse(&path, &content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Discarding unreadable preferences: {}", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    fn parse(path: &Path, content: &str) -> crate::error::Result<BTreeMap<String, String>> {
        toml::from_str(content).map_err(|source| Error::TomlDe {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());

        let content = toml::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skydesk-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            default_theme: ThemeName::Maroon,
            theme_storage_key: "my-key".to_string(),
            passenger_count: 3,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.default_theme, ThemeName::Maroon);
        assert_eq!(deserialized.theme_storage_key, "my-key");
        assert_eq!(deserialized.passenger_count, 3);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.default_theme, ThemeName::Light);
        assert_eq!(config.theme_storage_key, DEFAULT_THEME_KEY);
        assert_eq!(config.passenger_count, 1);
    }

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new();
        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();

        assert_eq!(store.get("k").as_deref(), Some("b"));
        assert_eq!(store.entries.len(), 1);
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let path = scratch_path("prefs-roundtrip.toml");
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(DEFAULT_THEME_KEY), None);
        store.set(DEFAULT_THEME_KEY, "dark").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(DEFAULT_THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(reopened.path(), path.as_path());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_parse_error_is_typed() {
        let err = FileStore::parse(Path::new("prefs.toml"), "this is = = not toml").unwrap_err();
        assert!(matches!(err, Error::TomlDe { .. }));
    }

    #[test]
    fn test_file_store_recovers_from_unreadable_file() {
        let path = scratch_path("prefs-garbage.toml");
        std::fs::write(&path, "airline-ui-theme = \"dark\"\nlast_seen = 3\n").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(DEFAULT_THEME_KEY), None);
        store.set(DEFAULT_THEME_KEY, "maroon").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(DEFAULT_THEME_KEY).as_deref(), Some("maroon"));

        let _ = std::fs::remove_file(&path);
    }
}
