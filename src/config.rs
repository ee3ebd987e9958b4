//! Configuration for front ends.
//!
//! YAML file with every field optional; missing values take the defaults
//! below. The default location is `<config dir>/chromakit/config.yaml`.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::extract::{
    DominantColorExtractor, ExtractorConfig, DEFAULT_ALPHA_THRESHOLD, DEFAULT_ITERATIONS, DEFAULT_K, DEFAULT_STRIDE,
};
use crate::picker::{PickerState, DEFAULT_COLOR};
use crate::store::FileBackend;

/// Dominant color extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Number of colors to extract.
    #[serde(default = "default_k")]
    pub k: usize,

    /// Sampling stride in bytes.
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Pixels with lower alpha are skipped.
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,

    /// K-means iterations.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_k() -> usize {
    DEFAULT_K
}
fn default_stride() -> usize {
    DEFAULT_STRIDE
}
fn default_alpha_threshold() -> u8 {
    DEFAULT_ALPHA_THRESHOLD
}
fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            stride: default_stride(),
            alpha_threshold: default_alpha_threshold(),
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl ExtractionConfig {
    /// Extractor parameters.
    #[must_use]
    pub fn params(&self) -> ExtractorConfig {
        ExtractorConfig {
            k: self.k,
            stride: self.stride,
            alpha_threshold: self.alpha_threshold,
            iterations: self.iterations,
        }
    }

    /// Build an extractor, seeded if a seed is configured.
    #[must_use]
    pub fn extractor(&self) -> DominantColorExtractor {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        DominantColorExtractor::with_config(self.params(), rng)
    }
}

/// Saved color store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Configured directory, else the platform default, else `.chromakit`.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .or_else(FileBackend::default_location)
            .unwrap_or_else(|| PathBuf::from(".chromakit"))
    }

    /// File backend at [`Self::resolved_path`].
    #[must_use]
    pub fn backend(&self) -> FileBackend {
        FileBackend::new(self.resolved_path())
    }
}

/// Picker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Color shown on startup.
    #[serde(default = "default_initial_color")]
    pub initial_color: Rgb,
}

fn default_initial_color() -> Rgb {
    DEFAULT_COLOR
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_color: default_initial_color(),
        }
    }
}

impl PickerConfig {
    /// Picker state showing the initial color.
    #[must_use]
    pub fn initial_state(&self) -> PickerState {
        PickerState::new(self.initial_color)
    }
}

/// Palette export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported palettes are written to.
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
}

fn default_export_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Extraction settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Picker settings.
    #[serde(default)]
    pub picker: PickerConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            extraction: ExtractionConfig::default(),
            store: StoreConfig::default(),
            picker: PickerConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chromakit").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    ///
    /// A missing file is silent; a malformed one is logged.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::ConfigNotFound(_)) => Self::default(),
            Err(e) => {
                warn!(error = %e, "ignoring invalid configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert_eq!(config.extraction.k, 8);
        assert_eq!(config.extraction.stride, 40);
        assert_eq!(config.extraction.alpha_threshold, 128);
        assert_eq!(config.extraction.iterations, 10);
        assert_eq!(config.extraction.seed, None);
        assert_eq!(config.picker.initial_color.to_hex(), "#2E8B57");
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r##"
version: 1
extraction:
  k: 5
  stride: 4
  iterations: 20
  seed: 42
store:
  path: /tmp/chromakit-store
picker:
  initial_color: "#ff0000"
export:
  directory: exports
"##;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.extraction.k, 5);
        assert_eq!(config.extraction.stride, 4);
        assert_eq!(config.extraction.alpha_threshold, 128);
        assert_eq!(config.extraction.iterations, 20);
        assert_eq!(config.extraction.seed, Some(42));
        assert_eq!(config.store.resolved_path(), PathBuf::from("/tmp/chromakit-store"));
        assert_eq!(config.picker.initial_state().hex(), "#FF0000");
        assert_eq!(config.export.directory, PathBuf::from("exports"));
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
extraction:
  k: not_a_number
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains('4'), "Error should include line number");
    }

    #[test]
    fn test_config_rejects_bad_color() {
        let err = Config::parse("picker:\n  initial_color: \"#12\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_config_load_missing() {
        assert!(matches!(Config::load("/nonexistent/path"), Err(Error::ConfigNotFound(_))));
        assert_eq!(Config::load_or_default("/nonexistent/path"), Config::default());
    }

    #[test]
    fn test_config_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "extraction:\n  k: 3\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().extraction.k, 3);

        std::fs::write(&path, "extraction: [").unwrap();
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_seeded_extractor_from_config() {
        let config = Config::parse("extraction:\n  k: 2\n  seed: 7\n").unwrap();
        let pixels: Vec<u8> = (0..400u32).flat_map(|i| [(i * 7 % 256) as u8, 0, 0, 255]).collect();

        let a = config.extraction.extractor().extract(&pixels).unwrap();
        let b = config.extraction.extractor().extract(&pixels).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
