use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_FEED_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::QuakeMapError;

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub feed_url: String,
    pub port: u16,
    // Never echoed back over the API
    #[serde(skip)]
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
    pub auto_open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            port: DEFAULT_PORT,
            access_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            auto_open_browser: false,
        }
    }
}

impl Settings {
    /// Reads `quakemap.ini` next to the executable (if present), then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::config_path())?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Settings::default());
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }

        let mut settings = Settings::default();
        let lookup = |key: &str| config_map.get(key).cloned();
        settings.apply(lookup, &INI_KEYS);
        settings.access_token = non_blank(lookup, INI_KEYS.access_token);
        Ok(settings)
    }

    /// Overrides fields from environment-style lookups. The token resolves
    /// `API_KEY`, then `MAPBOX_ACCESS_TOKEN`, then whatever the file set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply(&lookup, &ENV_KEYS);
        if let Some(token) = non_blank(&lookup, ENV_KEYS.access_token)
            .or_else(|| non_blank(&lookup, "MAPBOX_ACCESS_TOKEN"))
        {
            self.access_token = Some(token);
        }
    }

    // Blank values count as unset
    fn apply<F>(&mut self, lookup: F, keys: &Keys)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(feed_url) = non_blank(&lookup, keys.feed_url) {
            self.feed_url = feed_url;
        }
        if let Some(port_str) = non_blank(&lookup, keys.port) {
            if let Ok(port) = port_str.parse::<u16>() {
                self.port = port;
            }
        }
        if let Some(timeout_str) = non_blank(&lookup, keys.request_timeout_secs) {
            match timeout_str.parse::<u64>() {
                Ok(timeout) if timeout > 0 => self.request_timeout_secs = timeout,
                _ => {}
            }
        }
        if let Some(auto_open_str) = non_blank(&lookup, keys.auto_open_browser) {
            if let Ok(auto_open) = auto_open_str.parse::<bool>() {
                self.auto_open_browser = auto_open;
            }
        }
    }

    /// The map tile token, or `MissingCredential` when it is absent or blank.
    pub fn access_token(&self) -> Result<&str, QuakeMapError> {
        match self.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(QuakeMapError::MissingCredential {
                config: Self::config_path().display().to_string(),
            }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}

fn non_blank<F>(lookup: F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

struct Keys {
    feed_url: &'static str,
    port: &'static str,
    access_token: &'static str,
    request_timeout_secs: &'static str,
    auto_open_browser: &'static str,
}

const INI_KEYS: Keys = Keys {
    feed_url: "feed_url",
    port: "port",
    access_token: "access_token",
    request_timeout_secs: "request_timeout_secs",
    auto_open_browser: "auto_open_browser",
};

const ENV_KEYS: Keys = Keys {
    feed_url: "QUAKEMAP_FEED_URL",
    port: "QUAKEMAP_PORT",
    access_token: "API_KEY",
    request_timeout_secs: "QUAKEMAP_TIMEOUT_SECS",
    auto_open_browser: "QUAKEMAP_OPEN_BROWSER",
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(settings.port, 3001);
        assert_eq!(settings.feed_url, DEFAULT_FEED_URL);
        assert!(settings.access_token.is_none());
    }

    #[test]
    fn reads_ini_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# QuakeMap Configuration File").unwrap();
        writeln!(file, "feed_url = \"http://localhost:9000/all_day.geojson\"").unwrap();
        writeln!(file, "port = 4100").unwrap();
        writeln!(file, "access_token = pk.abc").unwrap();
        writeln!(file, "request_timeout_secs = five").unwrap();
        writeln!(file, "auto_open_browser = true").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.feed_url, "http://localhost:9000/all_day.geojson");
        assert_eq!(settings.port, 4100);
        assert_eq!(settings.access_token.as_deref(), Some("pk.abc"));
        assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(settings.auto_open_browser);
    }

    #[test]
    fn env_overrides_file() {
        let mut settings = Settings {
            access_token: Some("from-file".into()),
            ..Settings::default()
        };
        settings.apply_env(env(&[("API_KEY", "from-env"), ("QUAKEMAP_PORT", "5000")]));
        assert_eq!(settings.access_token.as_deref(), Some("from-env"));
        assert_eq!(settings.port, 5000);
    }

    #[test]
    fn mapbox_token_is_a_fallback() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("MAPBOX_ACCESS_TOKEN", "pk.mapbox")]));
        assert_eq!(settings.access_token().unwrap(), "pk.mapbox");

        let mut settings = Settings::default();
        settings.apply_env(env(&[("MAPBOX_ACCESS_TOKEN", "pk.mapbox"), ("API_KEY", "pk.api")]));
        assert_eq!(settings.access_token().unwrap(), "pk.api");
    }

    #[test]
    fn absent_or_blank_token_is_missing_credential() {
        let settings = Settings::default();
        assert!(matches!(
            settings.access_token(),
            Err(QuakeMapError::MissingCredential { .. })
        ));

        let settings = Settings {
            access_token: Some("   ".into()),
            ..Settings::default()
        };
        assert_eq!(settings.access_token().unwrap_err().kind(), "missing_credential");
    }

    #[test]
    fn token_is_not_serialized() {
        let settings = Settings {
            access_token: Some("pk.secret".into()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("pk.secret"));
    }

    fn ini_with_token(token: &str) -> Settings {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "access_token = {}", token).unwrap();
        Settings::load_from(file.path()).unwrap()
    }

    #[test]
    fn blank_api_key_keeps_file_token() {
        let mut settings = ini_with_token("pk.file");
        settings.apply_env(env(&[("API_KEY", "")]));
        assert_eq!(settings.access_token().unwrap(), "pk.file");
    }

    #[test]
    fn blank_api_key_falls_through_to_mapbox_token() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("API_KEY", " "), ("MAPBOX_ACCESS_TOKEN", "pk.mapbox")]));
        assert_eq!(settings.access_token().unwrap(), "pk.mapbox");
    }

    #[test]
    fn mapbox_token_beats_file_token() {
        let mut settings = ini_with_token("pk.file");
        settings.apply_env(env(&[("MAPBOX_ACCESS_TOKEN", "pk.mapbox")]));
        assert_eq!(settings.access_token().unwrap(), "pk.mapbox");
    }

    #[test]
    fn blank_file_token_is_unset() {
        let settings = ini_with_token("\"\"");
        assert!(settings.access_token.is_none());
    }

    #[test]
    fn zero_timeout_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("QUAKEMAP_TIMEOUT_SECS", "0")]));
        assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

        settings.apply_env(env(&[("QUAKEMAP_TIMEOUT_SECS", "12")]));
        assert_eq!(settings.request_timeout(), Duration::from_secs(12));
    }
}
