use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ParcelError, Result};
use crate::input::RingFormat;

/// How results are printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_name() -> String {
    "Parcel".to_string()
}
fn default_radius_m() -> f64 {
    250.0
}
fn default_fixes() -> usize {
    24
}

/// Settings for the simulated drone flight
#[derive(Debug, Deserialize, Clone)]
pub struct DroneConfig {
    #[serde(default = "default_radius_m")]
    pub radius_m: f64,
    #[serde(default = "default_fixes")]
    pub fixes: usize,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            fixes: default_fixes(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub format: OutputFormat,
    /// Ring file layout; guessed from the extension when unset
    #[serde(default)]
    pub input_format: Option<RingFormat>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Ring simplification tolerance in meters; 0 disables it
    #[serde(default)]
    pub simplify_tolerance_m: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub drone: DroneConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            format: OutputFormat::default(),
            input_format: None,
            output: None,
            simplify_tolerance_m: 0.0,
            verbose: false,
            drone: DroneConfig::default(),
        }
    }
}

impl FileConfig {
    /// Read a config file the user pointed at explicitly
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ParcelError::Parse {
            line: e
                .span()
                .map(|span| contents[..span.start].lines().count().max(1))
                .unwrap_or(0),
            message: e.message().to_string(),
        })
    }

    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config file");
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parcelmetrics.toml"));
    paths.push(PathBuf::from(".parcelmetrics.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parcelmetrics").join("config.toml"));
        paths.push(config_dir.join("parcelmetrics.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parcelmetrics.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.name, "Parcel");
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.input_format, None);
        assert_eq!(config.simplify_tolerance_m, 0.0);
        assert_eq!(config.drone.fixes, 24);
        assert!(!config.verbose);
    }

    #[test]
    fn test_full_file() {
        let toml_str = r#"
            name = "Fazenda Boa Vista"
            format = "json"
            input_format = "geojson"
            output = "parcels/boa-vista.json"
            simplify_tolerance_m = 2.5
            verbose = true

            [drone]
            radius_m = 400.0
            fixes = 60
        "#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.name, "Fazenda Boa Vista");
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.input_format, Some(RingFormat::GeoJson));
        assert_eq!(
            config.output.as_deref(),
            Some(Path::new("parcels/boa-vista.json"))
        );
        assert_eq!(config.simplify_tolerance_m, 2.5);
        assert_eq!(config.drone.radius_m, 400.0);
        assert_eq!(config.drone.fixes, 60);
    }

    #[test]
    fn test_from_path_reports_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "name = \"ok\"\nformat = \"xml\"\n").unwrap();

        assert!(matches!(
            FileConfig::from_path(&path),
            Err(ParcelError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_skips_unparseable_files() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        fs::write(&broken, "name = ").unwrap();
        fs::write(&good, "name = \"south\"").unwrap();

        let missing = dir.path().join("missing.toml");
        let config = FileConfig::load_from(&[missing, broken, good]).unwrap();
        assert_eq!(config.name, "south");
    }
}
