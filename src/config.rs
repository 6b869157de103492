use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CampMapError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_ENV_VAR: &str = "CAMP_MAP_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub map: MapConfig,
    pub logging: LoggingConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub tent_icon: PathBuf,
    pub wolf_icon: PathBuf,
    pub output: PathBuf,
    /// Also write the normalized records as a JSON file
    pub json_output: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/camps.tsv"),
            tent_icon: PathBuf::from("data/tent.svg"),
            wolf_icon: PathBuf::from("data/wolf.svg"),
            output: PathBuf::from("public/index.html"),
            json_output: None,
        }
    }
}

/// Settings baked into the generated page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub leaflet_css: String,
    pub leaflet_js: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Mapa Obozów Harcerskich".to_string(),
            center_lat: 52.0,
            center_lng: 19.0,
            zoom: 6,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors".to_string(),
            leaflet_css: "https://unpkg.com/leaflet/dist/leaflet.css".to_string(),
            leaflet_js: "https://unpkg.com/leaflet/dist/leaflet.js".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for JSON log files; console only when unset
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, `$CAMP_MAP_CONFIG`, or
    /// `config.toml` in the working directory. Only an explicitly requested
    /// file has to exist; otherwise defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(path.trim()));
            }
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            CampMapError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let map = &self.map;
        if !(-90.0..=90.0).contains(&map.center_lat) || !(-180.0..=180.0).contains(&map.center_lng) {
            return Err(CampMapError::Config(format!(
                "Map center ({}, {}) is not a valid coordinate",
                map.center_lat, map.center_lng
            )));
        }
        if map.zoom > 20 {
            return Err(CampMapError::Config(format!(
                "Map zoom {} is out of range (0..=20)",
                map.zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.paths.input, PathBuf::from("data/camps.tsv"));
        assert_eq!(config.paths.output, PathBuf::from("public/index.html"));
        assert_eq!(config.map.zoom, 6);
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [paths]
            input = "sheet.tsv"
            json_output = "out/camps.json"

            [map]
            zoom = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.input, PathBuf::from("sheet.tsv"));
        assert_eq!(config.paths.tent_icon, PathBuf::from("data/tent.svg"));
        assert_eq!(config.paths.json_output, Some(PathBuf::from("out/camps.json")));
        assert_eq!(config.map.zoom, 8);
        assert_eq!(config.map.center_lat, 52.0);
    }

    #[test]
    fn test_from_file_rejects_invalid_center() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[map]\ncenter_lat = 123.0").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CampMapError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/camp_map.toml")));
        assert!(result.is_err());
    }
}
