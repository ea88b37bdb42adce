//! Application configuration: TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LedError;
use crate::led::RgbPaths;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# sysled configuration. Changes made outside the tool may be overwritten.\n\n";

/// Where the kernel exposes LED class devices.
pub const DEFAULT_LEDS_ROOT: &str = "/sys/class/leds";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Red channel directory, e.g. "/sys/class/leds/rgb:red".
    #[serde(default)]
    pub red: String,

    /// Green channel directory.
    #[serde(default)]
    pub green: String,

    /// Blue channel directory.
    #[serde(default)]
    pub blue: String,

    /// Shared brightness/trigger channel. Empty = none, colors are independent.
    #[serde(default)]
    pub global: String,

    /// LED class directory scanned by discovery. Default: "/sys/class/leds".
    #[serde(default = "default_leds_root")]
    pub leds_root: String,
}

fn default_leds_root() -> String {
    DEFAULT_LEDS_ROOT.into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            red: String::new(),
            green: String::new(),
            blue: String::new(),
            global: String::new(),
            leds_root: default_leds_root(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required color channel path is empty (`"red"`, `"green"` or `"blue"`).
    MissingChannel(&'static str),
    /// Two channels point at the same directory; each must be owned once.
    SharedChannel {
        first: &'static str,
        second: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingChannel(name) => write!(f, "{name} channel path is empty"),
            ValidationError::SharedChannel { first, second } => {
                write!(f, "{first} and {second} point at the same LED")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sysled"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to warn that manual edits may be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Keys accepted by [`Config::set`].
    pub const KEYS: [&'static str; 5] = ["red", "green", "blue", "global", "leds_root"];

    /// Set one field by key. Values are trimmed; an empty `global` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        let value = value.trim().to_string();
        let field = match key {
            "red" => &mut self.red,
            "green" => &mut self.green,
            "blue" => &mut self.blue,
            "global" => &mut self.global,
            "leds_root" => {
                if value.is_empty() {
                    return Err(LedError::Config("leds_root cannot be empty".into()));
                }
                &mut self.leds_root
            }
            other => {
                return Err(LedError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )));
            }
        };
        *field = value;
        Ok(())
    }

    fn named_channels(&self) -> [(&'static str, &str); 4] {
        [
            ("red", self.red.trim()),
            ("green", self.green.trim()),
            ("blue", self.blue.trim()),
            ("global", self.global.trim()),
        ]
    }

    /// Check that an RGB LED can be built from this config.
    ///
    /// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all problems found.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let channels = self.named_channels();

        for (name, path) in &channels[..3] {
            if path.is_empty() {
                errors.push(ValidationError::MissingChannel(*name));
            }
        }

        for (i, (first, a)) in channels.iter().enumerate() {
            for (second, b) in &channels[i + 1..] {
                if !a.is_empty() && a == b {
                    errors.push(ValidationError::SharedChannel {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whether any RGB channel has been configured at all.
    pub fn has_rgb(&self) -> bool {
        self.named_channels().iter().any(|(_, p)| !p.is_empty())
    }

    /// Validated channel paths for [`crate::led::RgbLed::open`].
    pub fn rgb_paths(&self) -> crate::error::Result<RgbPaths> {
        if let Err(errors) = self.validate() {
            let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(LedError::Config(joined.join("; ")));
        }
        Ok(RgbPaths::new(self.red.trim(), self.green.trim(), self.blue.trim())
            .with_global(self.global.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_config() -> Config {
        Config {
            red: "/sys/class/leds/rgb:red".into(),
            green: "/sys/class/leds/rgb:green".into(),
            blue: "/sys/class/leds/rgb:blue".into(),
            ..Config::default()
        }
    }

    #[test]
    fn defaults() {
        let c = Config::default();
        assert!(c.red.is_empty());
        assert!(c.global.is_empty());
        assert_eq!(c.leds_root, "/sys/class/leds");
        assert!(!c.has_rgb());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str(r#"red = "/x/red""#).unwrap();
        assert_eq!(c.red, "/x/red");
        assert!(c.green.is_empty());
        assert_eq!(c.leds_root, DEFAULT_LEDS_ROOT);
        assert!(c.has_rgb());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn config_path_ends_with_toml() {
        if let Some(p) = Config::path() {
            assert!(p.ends_with("sysled/config.toml"));
        }
    }

    // ── validate ──

    #[test]
    fn validate_complete_config_ok() {
        assert!(rgb_config().validate().is_ok());
    }

    #[test]
    fn validate_default_config_reports_all_missing() {
        let errors = Config::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingChannel("red"),
                ValidationError::MissingChannel("green"),
                ValidationError::MissingChannel("blue"),
            ]
        );
    }

    #[test]
    fn validate_whitespace_path_is_missing() {
        let c = Config {
            blue: "   ".into(),
            ..rgb_config()
        };
        assert_eq!(
            c.validate().unwrap_err(),
            vec![ValidationError::MissingChannel("blue")]
        );
    }

    #[test]
    fn validate_shared_channel() {
        let c = Config {
            global: "/sys/class/leds/rgb:red".into(),
            ..rgb_config()
        };
        assert_eq!(
            c.validate().unwrap_err(),
            vec![ValidationError::SharedChannel {
                first: "red",
                second: "global"
            }]
        );
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::MissingChannel("green").to_string(),
            "green channel path is empty"
        );
        assert_eq!(
            ValidationError::SharedChannel {
                first: "red",
                second: "blue"
            }
            .to_string(),
            "red and blue point at the same LED"
        );
    }

    // ── rgb_paths ──

    #[test]
    fn rgb_paths_without_global() {
        let paths = rgb_config().rgb_paths().unwrap();
        assert_eq!(paths.red, PathBuf::from("/sys/class/leds/rgb:red"));
        assert_eq!(paths.global, None);
    }

    #[test]
    fn rgb_paths_with_global() {
        let c = Config {
            global: " /sys/class/leds/rgb:global ".into(),
            ..rgb_config()
        };
        let paths = c.rgb_paths().unwrap();
        assert_eq!(paths.global, Some(PathBuf::from("/sys/class/leds/rgb:global")));
    }

    #[test]
    fn rgb_paths_invalid_is_config_error() {
        let err = Config::default().rgb_paths().unwrap_err();
        match err {
            LedError::Config(msg) => assert!(msg.contains("red channel path is empty")),
            other => panic!("unexpected error: {other}"),
        }
    }

    // ── set ──

    #[test]
    fn set_known_keys() {
        let mut c = Config::default();
        c.set("red", " /x/red ").unwrap();
        c.set("global", "/x/all").unwrap();
        c.set("leds_root", "/tmp/leds").unwrap();
        assert_eq!(c.red, "/x/red");
        assert_eq!(c.global, "/x/all");
        assert_eq!(c.leds_root, "/tmp/leds");

        c.set("global", "").unwrap();
        assert!(c.global.is_empty());
    }

    #[test]
    fn set_rejects_unknown_key_and_empty_root() {
        let mut c = Config::default();
        assert!(matches!(c.set("purple", "/x"), Err(LedError::Config(_))));
        assert!(matches!(c.set("leds_root", " "), Err(LedError::Config(_))));
        assert_eq!(c, Config::default());
    }

    #[test]
    fn keys_cover_every_field() {
        let mut c = Config::default();
        for key in Config::KEYS {
            c.set(key, "/k").unwrap();
        }
        assert_eq!(c.red, "/k");
        assert_eq!(c.green, "/k");
        assert_eq!(c.blue, "/k");
        assert_eq!(c.global, "/k");
        assert_eq!(c.leds_root, "/k");
    }

    // ── save_to / load_from ──

    #[test]
    fn load_ignores_header_comment() {
        let toml_str = r##"# sysled configuration. Changes made outside the tool may be overwritten.

red = "/a"
green = "/b"
blue = "/c"
global = ""
"##;
        let c: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(c.red, "/a");
        assert_eq!(c.blue, "/c");
    }

    #[test]
    fn save_to_load_from_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            global: "/sys/class/leds/rgb:global".into(),
            leds_root: "/tmp/leds".into(),
            ..rgb_config()
        };
        config.save_to(&path).unwrap();

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded, config);
    }

    #[test]
    fn save_to_includes_header_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::default().save_to(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents.starts_with("# sysled configuration"),
            "saved file should start with header comment"
        );
    }

    #[test]
    fn save_to_creates_parent_and_cleans_up_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::default().save_to(&path).unwrap();
        assert!(path.exists());
        let tmp = dir.path().join("nested").join("config.toml.tmp");
        assert!(!tmp.exists(), "temp file should not remain after save");
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.toml");

        let (config, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_invalid_toml_returns_defaults_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();

        let (config, warnings) = Config::load_from(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn wrong_type_toml_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typed.toml");
        std::fs::write(&path, "red = 5\n").unwrap();

        let (config, warnings) = Config::load_from(&path);
        assert_eq!(warnings.len(), 1);
        assert!(config.red.is_empty());
    }
}
