use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::SchedulerError;
use crate::time_unit::TimeUnit;

/// Delay before the first firing when nothing else is configured
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(10_000);

/// Period between firings when nothing else is configured
pub const DEFAULT_RATE: Duration = Duration::from_millis(1_000);

/// Load config from a specific TOML file, overlaid with `APP_*` environment variables
///
/// Nested keys are joined with a double underscore, so
/// `APP_HEARTBEAT__INITIAL_DELAY` overrides `heartbeat.initial_delay`.
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    load_config(path.as_ref(), FileFormat::Toml)
}

/// Load config from a specific YAML file, overlaid with `APP_*` environment variables
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    load_config(path.as_ref(), FileFormat::Yaml)
}

fn load_config(path: &Path, format: FileFormat) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::from(path).format(format))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
}

/// Resolve a placeholder like `${heartbeat.rate}` or `${heartbeat.rate:1s}`.
///
/// Values that are not placeholders are returned unchanged.
pub fn resolve_config_value(value: &str, config: &Config) -> Result<String, ConfigError> {
    let Some(inner) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) else {
        return Ok(value.to_string());
    };

    match inner.split_once(':') {
        Some((key, default_value)) => match config.get_string(key) {
            Ok(resolved) => Ok(resolved),
            Err(ConfigError::NotFound(_)) => Ok(default_value.to_string()),
            Err(e) => Err(e),
        },
        None => config.get_string(inner),
    }
}

/// Resolve a placeholder and parse the result as a duration
pub fn resolve_duration(key: &str, value: &str, config: &Config) -> Result<Duration, SchedulerError> {
    let resolved = resolve_config_value(value, config)?;
    TimeUnit::parse_duration(&resolved).ok_or_else(|| SchedulerError::InvalidDuration {
        key: key.to_string(),
        value: resolved,
    })
}

#[derive(Debug, Default, Deserialize)]
struct RawSchedulerSettings {
    initial_delay: Option<String>,
    rate: Option<String>,
}

/// Timing of a periodic scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub initial_delay: Duration,
    pub rate: Duration,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            rate: DEFAULT_RATE,
        }
    }
}

impl SchedulerSettings {
    /// Read the table at `section` (e.g. `"heartbeat"`).
    ///
    /// A missing section or missing keys fall back to the defaults. Values are
    /// duration strings such as `"10s"` or bare milliseconds.
    pub fn from_config(config: &Config, section: &str) -> Result<Self, SchedulerError> {
        let raw = match config.get::<RawSchedulerSettings>(section) {
            Ok(raw) => raw,
            Err(ConfigError::NotFound(_)) => RawSchedulerSettings::default(),
            Err(e) => return Err(e.into()),
        };

        let defaults = Self::default();
        let initial_delay = match raw.initial_delay {
            Some(v) => resolve_duration(&format!("{section}.initial_delay"), &v, config)?,
            None => defaults.initial_delay,
        };
        let rate = match raw.rate {
            Some(v) => resolve_duration(&format!("{section}.rate"), &v, config)?,
            None => defaults.rate,
        };

        Ok(Self { initial_delay, rate })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from_toml(toml: &str) -> Config {
        Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn plain_values_pass_through() {
        let config = Config::default();
        assert_eq!(resolve_config_value("5s", &config).unwrap(), "5s");
    }

    #[test]
    fn placeholder_reads_config_key() {
        let config = config_from_toml("[heartbeat]\nrate = \"250ms\"\n");
        assert_eq!(resolve_config_value("${heartbeat.rate}", &config).unwrap(), "250ms");
    }

    #[test]
    fn placeholder_falls_back_to_default() {
        let config = Config::default();
        assert_eq!(resolve_config_value("${heartbeat.rate:2s}", &config).unwrap(), "2s");
    }

    #[test]
    fn placeholder_without_default_fails_when_missing() {
        let config = Config::default();
        assert!(resolve_config_value("${heartbeat.rate}", &config).is_err());
    }

    #[test]
    fn settings_default_to_ten_seconds_and_one_second() {
        let settings = SchedulerSettings::from_config(&Config::default(), "heartbeat").unwrap();
        assert_eq!(settings.initial_delay, Duration::from_millis(10_000));
        assert_eq!(settings.rate, Duration::from_millis(1_000));
    }

    #[test]
    fn settings_read_section() {
        let config = config_from_toml("[heartbeat]\ninitial_delay = \"0\"\nrate = \"100ms\"\n");
        let settings = SchedulerSettings::from_config(&config, "heartbeat").unwrap();
        assert_eq!(settings.initial_delay, Duration::ZERO);
        assert_eq!(settings.rate, Duration::from_millis(100));
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn toml_file_loads_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(&dir, "application.toml", "[watchdog]\ninitial_delay = \"2s\"\nrate = \"500ms\"\n");

        let config = load_toml_config(&path).unwrap();
        let settings = SchedulerSettings::from_config(&config, "watchdog").unwrap();
        assert_eq!(settings.initial_delay, Duration::from_secs(2));
        assert_eq!(settings.rate, Duration::from_millis(500));
    }

    #[test]
    fn yaml_file_loads_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(&dir, "application.yaml", "janitor:\n  initial_delay: \"1m\"\n  rate: \"30s\"\n");

        let config = load_yaml_config(&path).unwrap();
        let settings = SchedulerSettings::from_config(&config, "janitor").unwrap();
        assert_eq!(settings.initial_delay, Duration::from_secs(60));
        assert_eq!(settings.rate, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_underscored_keys() {
        // Section name is unique to this test; env vars are process-wide
        std::env::set_var("APP_ENVPULSE__INITIAL_DELAY", "0");
        std::env::set_var("APP_ENVPULSE__RATE", "250ms");

        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(&dir, "application.toml", "[envpulse]\ninitial_delay = \"10s\"\nrate = \"1s\"\n");
        let config = load_toml_config(&path).unwrap();
        let settings = SchedulerSettings::from_config(&config, "envpulse").unwrap();

        std::env::remove_var("APP_ENVPULSE__INITIAL_DELAY");
        std::env::remove_var("APP_ENVPULSE__RATE");

        assert_eq!(settings.initial_delay, Duration::ZERO);
        assert_eq!(settings.rate, Duration::from_millis(250));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_toml_config(dir.path().join("absent.toml")).is_err());
        assert!(load_yaml_config(dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn settings_reject_garbage_duration() {
        let config = config_from_toml("[heartbeat]\nrate = \"soon\"\n");
        let err = SchedulerSettings::from_config(&config, "heartbeat").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidDuration { ref key, .. } if key == "heartbeat.rate"));
    }
}
