//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Folio configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/public/`
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Load the demo projects when the server starts
    pub seed_demo_projects: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_demo_projects: true,
        }
    }
}

impl ServerConfig {
    /// Address the server binds to, e.g. `127.0.0.1:5000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

const KEYS: [&str; 4] = [
    "server.host",
    "server.port",
    "server.public_dir",
    "registry.seed_demo_projects",
];

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("FOLIO_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("folio")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default path, then apply environment overrides
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            // Return default config without creating file
            Ok(Config::default())
        }
    }

    /// Save configuration to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Override settings from `FOLIO_HOST`, `FOLIO_PORT` and `FOLIO_PUBLIC_DIR`
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|name| env::var(name).ok())
    }

    /// Override settings from any variable source
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(host) = lookup("FOLIO_HOST") {
            self.set("server.host", &host)?;
        }
        if let Some(port) = lookup("FOLIO_PORT") {
            self.set("server.port", &port)
                .context("Invalid FOLIO_PORT")?;
        }
        if let Some(dir) = lookup("FOLIO_PUBLIC_DIR") {
            self.set("server.public_dir", &dir)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(anyhow!("server.host must not be empty"));
        }
        if self.server.public_dir.as_os_str().is_empty() {
            return Err(anyhow!("server.public_dir must not be empty"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "server.host" => Ok(self.server.host.clone()),
            "server.port" => Ok(self.server.port.to_string()),
            "server.public_dir" => Ok(self.server.public_dir.display().to_string()),
            "registry.seed_demo_projects" => Ok(self.registry.seed_demo_projects.to_string()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `folio config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "server.host" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("Host must not be empty"));
                }
                self.server.host = value.trim().to_string();
            }
            "server.port" => {
                self.server.port = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid port value: {}", value))?;
            }
            "server.public_dir" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("Public directory must not be empty"));
                }
                self.server.public_dir = PathBuf::from(value.trim());
            }
            "registry.seed_demo_projects" => {
                self.registry.seed_demo_projects = match value.trim() {
                    "1" | "true" | "yes" | "on" => true,
                    "0" | "false" | "no" | "off" => false,
                    other => {
                        return Err(anyhow!(
                            "Invalid boolean value: {}. Use true or false.",
                            other
                        ));
                    }
                };
            }
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `folio config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        KEYS.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.public_dir, PathBuf::from("public"));
        assert!(config.registry.seed_demo_projects);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("server.port", "8080").unwrap();
        config.set("registry.seed_demo_projects", "false").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.server.port, 8080);
        assert!(!loaded.registry.seed_demo_projects);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.registry.seed_demo_projects);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = \"many\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();
        config.set("server.host", "0.0.0.0").unwrap();
        config.set("server.public_dir", "/srv/folio/public").unwrap();
        assert_eq!(config.get("server.host").unwrap(), "0.0.0.0");
        assert_eq!(config.get("server.public_dir").unwrap(), "/srv/folio/public");

        assert!(config.set("server.port", "99999").is_err());
        assert!(config.set("server.host", "  ").is_err());
        assert!(config.set("registry.seed_demo_projects", "maybe").is_err());
        assert!(config.set("unknown.key", "x").is_err());
        assert!(config.get("unknown.key").is_err());
    }

    #[test]
    fn test_list_covers_all_keys() {
        let listed = Config::default().list().unwrap();
        let keys: Vec<_> = listed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, KEYS);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [("FOLIO_HOST", "0.0.0.0"), ("FOLIO_PORT", "8081")]
            .into_iter()
            .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8081");
        assert_eq!(config.server.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|name| (name == "FOLIO_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("FOLIO_PORT"));
    }
}
