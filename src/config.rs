//! Configuration for lectern.
//!
//! Settings come from an optional YAML file. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.

use globset::{Glob, GlobSet, GlobSetBuilder};
use lazy_static::lazy_static;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["lectern.yaml", ".lectern.yaml", "lectern.yml"];

pub const DEFAULT_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

lazy_static! {
    static ref LANGUAGE_CODE: Regex = Regex::new(r"^[a-z]{2,3}(-[A-Za-z]{2,4})?$").unwrap();
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// Characters shown in a process-file preview (default: 200)
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    /// Glob patterns skipped when a directory is processed (e.g. "**/node_modules/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Whether dot-files and dot-directories are walked (default: false)
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(skip)]
    pub(crate) excluded: OnceCell<GlobSet>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: String::new(),
            preview_chars: default_preview_chars(),
            excluded_paths: Vec::new(),
            include_hidden: false,
            audio: AudioConfig::default(),
            excluded: OnceCell::new(),
        }
    }
}

fn default_preview_chars() -> usize {
    200
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the explicit file, else the first discovered one, else defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => find_config(),
        };
        match path {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("failed to load config {}: {}", p.display(), e))?;
                validate(&config)?;
                tracing::debug!(path = %p.display(), "loaded config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Check if a path matches any `excluded_paths` pattern.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }
        let set = self.excluded.get_or_init(|| {
            let mut builder = GlobSetBuilder::new();
            for pattern in &self.excluded_paths {
                if let Ok(glob) = Glob::new(pattern) {
                    builder.add(glob);
                }
            }
            builder.build().unwrap_or_else(|_| GlobSet::empty())
        });
        set.is_match(path)
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Directory MP3 artifacts are written to (default: "audio")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Default language code (default: "en")
    #[serde(default = "default_language")]
    pub language: String,
    /// Prefix for the public URL of an artifact (default: "http://localhost:8001")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Speech endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Segments fetched at once (default: 4)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            language: default_language(),
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout(),
            max_concurrent_requests: default_max_concurrent(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("audio")
}

fn default_language() -> String {
    "en".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_TTS_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    10_000
}

fn default_max_concurrent() -> usize {
    4
}

/// Whether `code` looks like a speech language tag ("en", "pt-BR", "yue").
pub fn is_valid_language(code: &str) -> bool {
    LANGUAGE_CODE.is_match(code)
}

/// First config file in the working directory, then the user config directory.
pub fn find_config() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }
    user_config_path().filter(|p| p.exists())
}

/// `lectern.yaml` in the platform config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "lectern").map(|d| d.config_dir().join("lectern.yaml"))
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    if !is_valid_language(&config.audio.language) {
        anyhow::bail!("invalid audio language {:?}", config.audio.language);
    }
    if config.preview_chars == 0 {
        anyhow::bail!("preview_chars must be positive");
    }
    if config.audio.timeout_ms == 0 {
        anyhow::bail!("audio.timeout_ms must be positive");
    }
    if config.audio.max_concurrent_requests == 0 {
        anyhow::bail!("audio.max_concurrent_requests must be positive");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
preview_chars: 120
excluded_paths:
  - "**/node_modules/**"
audio:
  language: "fr"
  max_concurrent_requests: 2
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.preview_chars, 120);
        assert_eq!(config.audio.language, "fr");
        assert_eq!(config.audio.max_concurrent_requests, 2);
        assert_eq!(config.audio.output_dir, PathBuf::from("audio"));
        assert_eq!(config.audio.timeout_ms, 10_000);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse_str("  \n").unwrap();
        assert_eq!(config.preview_chars, 200);
        assert_eq!(config.audio.base_url, "http://localhost:8001");
        assert!(!config.include_hidden);
    }

    #[test]
    fn test_excluded_paths() {
        let config = Config {
            excluded_paths: vec!["**/vendor/**".to_string(), "*.min.js".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(Path::new("project/vendor/lib.py")));
        assert!(config.is_path_excluded(Path::new("app.min.js")));
        assert!(!config.is_path_excluded(Path::new("project/src/main.py")));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config {
            excluded_paths: vec!["[unclosed".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        config.excluded_paths.clear();
        config.audio.language = "English".to_string();
        assert!(validate(&config).is_err());

        config.audio.language = "pt-BR".to_string();
        config.audio.max_concurrent_requests = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_language_codes() {
        assert!(is_valid_language("en"));
        assert!(is_valid_language("zh-CN"));
        assert!(!is_valid_language(""));
        assert!(!is_valid_language("EN"));
        assert!(!is_valid_language("en_US"));
    }
}
