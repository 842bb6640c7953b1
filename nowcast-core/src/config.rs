use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{Coordinate, UnitSystem};

/// Stored home coordinate for the CLI's static location provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HomeCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// locale = "en_US"
///
/// [home]
/// latitude = 48.8566
/// longitude = 2.3522
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Unit system sent to the API.
    #[serde(default)]
    pub units: UnitSystem,

    /// Locale override; falls back to the environment when absent.
    pub locale: Option<String>,

    /// Default coordinate used when none is given on the command line.
    pub home: Option<HomeCoordinate>,
}

impl Config {
    /// API key, with a hint towards `nowcast configure` when missing.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `nowcast configure` and enter your OpenWeather API key."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Stored home coordinate as a validated [`Coordinate`], if any.
    pub fn home_coordinate(&self) -> Result<Option<Coordinate>> {
        match self.home {
            None => Ok(None),
            Some(home) => Coordinate::new(home.latitude, home.longitude)
                .map(Some)
                .map_err(|e| anyhow!("Configured home coordinate is invalid: {e}")),
        }
    }

    pub fn set_home(&mut self, coordinate: Coordinate) {
        self.home = Some(HomeCoordinate {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nowcast", "nowcast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_with_hint_when_missing() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("nowcast configure"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert!(cfg.require_api_key().is_err());
    }

    #[test]
    fn home_coordinate_roundtrip() {
        let mut cfg = Config::default();
        assert!(cfg.home_coordinate().unwrap().is_none());

        let coord = Coordinate::new(48.8566, 2.3522).unwrap();
        cfg.set_home(coord);
        assert_eq!(cfg.home_coordinate().unwrap(), Some(coord));
    }

    #[test]
    fn invalid_stored_home_coordinate_is_rejected() {
        let cfg = Config {
            home: Some(HomeCoordinate {
                latitude: 95.0,
                longitude: 0.0,
            }),
            ..Config::default()
        };
        assert!(cfg.home_coordinate().is_err());
    }

    #[test]
    fn toml_roundtrip_via_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.units = UnitSystem::Imperial;
        cfg.locale = Some("en_US".into());
        cfg.set_home(Coordinate::new(48.8566, 2.3522).unwrap());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.require_api_key().unwrap(), "KEY");
        assert_eq!(loaded.units, UnitSystem::Imperial);
        assert_eq!(loaded.locale.as_deref(), Some("en_US"));
        assert!(loaded.home_coordinate().unwrap().is_some());
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does-not-exist.toml");
        let cfg = Config::load_from(&path).expect("load");
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.units, UnitSystem::Metric);
    }
}
