use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrendingError};

/// Raw `[trending]` table. Every key is optional here so that a missing key
/// can be reported by name instead of failing the TOML parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingSection {
    pub likes_bias: Option<f64>,
    pub comments_bias: Option<f64>,
    pub time_bias: Option<i64>,
    pub max_days_since_posted: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingConfig {
    #[serde(default)]
    pub trending: TrendingSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Biases {
    pub likes_bias: f64,
    pub comments_bias: f64,
    pub time_bias: u64,
    pub max_days_since_posted: u32,
}

impl Biases {
    pub fn new(
        likes_bias: f64,
        comments_bias: f64,
        time_bias: i64,
        max_days_since_posted: i64,
    ) -> Result<Self> {
        let likes_bias = non_negative_weight("trending.likes_bias", likes_bias)?;
        let comments_bias = non_negative_weight("trending.comments_bias", comments_bias)?;
        if time_bias < 0 {
            return Err(TrendingError::Configuration(format!(
                "trending.time_bias must be >= 0, got {}",
                time_bias
            )));
        }
        if max_days_since_posted < 0 {
            return Err(TrendingError::Configuration(format!(
                "trending.max_days_since_posted must be >= 0, got {}",
                max_days_since_posted
            )));
        }
        let max_days_since_posted = u32::try_from(max_days_since_posted).map_err(|_| {
            TrendingError::Configuration(format!(
                "trending.max_days_since_posted is out of range: {}",
                max_days_since_posted
            ))
        })?;

        Ok(Self {
            likes_bias,
            comments_bias,
            time_bias: time_bias as u64,
            max_days_since_posted,
        })
    }
}

fn non_negative_weight(key: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(TrendingError::Configuration(format!(
            "{} must be a finite number >= 0, got {}",
            key, value
        )));
    }
    Ok(value)
}

fn required<T>(key: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| TrendingError::Configuration(format!("{} is not set", key)))
}

impl TrendingConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let explicit = path.or_else(env_config_path);
        let mut config = match explicit.as_ref() {
            Some(path) if !path.exists() => {
                return Err(TrendingError::Configuration(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Self::read(path)?,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    Self::read(&fallback)?
                } else {
                    TrendingConfig::default()
                }
            }
        };

        config.apply_env_overrides()?;
        let resolved = explicit.or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_PATH)));
        Ok((config, resolved))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            TrendingError::Configuration(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|err| TrendingError::Configuration(format!("failed to parse config: {}", err)))
    }

    /// Resolves the snapshot used for one evaluation. Missing or out-of-range
    /// values are errors; nothing is defaulted.
    pub fn biases(&self) -> Result<Biases> {
        let section = &self.trending;
        Biases::new(
            required("trending.likes_bias", section.likes_bias)?,
            required("trending.comments_bias", section.comments_bias)?,
            required("trending.time_bias", section.time_bias)?,
            required(
                "trending.max_days_since_posted",
                section.max_days_since_posted,
            )?,
        )
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let section = &mut self.trending;
        if let Some(value) = parse_override::<f64>(&lookup, "TRENDING_LIKES_BIAS")? {
            section.likes_bias = Some(value);
        }
        if let Some(value) = parse_override::<f64>(&lookup, "TRENDING_COMMENTS_BIAS")? {
            section.comments_bias = Some(value);
        }
        if let Some(value) = parse_override::<i64>(&lookup, "TRENDING_TIME_BIAS")? {
            section.time_bias = Some(value);
        }
        if let Some(value) = parse_override::<i64>(&lookup, "TRENDING_MAX_DAYS_SINCE_POSTED")? {
            section.max_days_since_posted = Some(value);
        }
        Ok(())
    }
}

// Blank means unset; anything else must parse.
fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|_| {
        TrendingError::Configuration(format!("{}: invalid value '{}'", key, value))
    })
}

const DEFAULT_CONFIG_PATH: &str = "config/trending.toml";

fn env_config_path() -> Option<PathBuf> {
    env::var("TRENDING_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL: &str = r#"
[trending]
likes_bias = 1.0
comments_bias = 1.0
time_bias = 86400
max_days_since_posted = 7
"#;

    #[test]
    fn parses_full_section() {
        let config = TrendingConfig::from_toml_str(FULL).unwrap();
        let biases = config.biases().unwrap();
        assert_eq!(biases.likes_bias, 1.0);
        assert_eq!(biases.comments_bias, 1.0);
        assert_eq!(biases.time_bias, 86_400);
        assert_eq!(biases.max_days_since_posted, 7);
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let config = TrendingConfig::from_toml_str(
            "[trending]\nlikes_bias = 1.0\ncomments_bias = 1.0\ntime_bias = 10\n",
        )
        .unwrap();
        let err = config.biases().unwrap_err();
        assert!(matches!(err, TrendingError::Configuration(ref msg) if msg.contains("max_days_since_posted")));
    }

    #[test]
    fn empty_config_has_no_defaults() {
        let err = TrendingConfig::default().biases().unwrap_err();
        assert!(matches!(err, TrendingError::Configuration(_)));
    }

    #[test]
    fn rejects_negative_values() {
        assert!(Biases::new(-0.1, 1.0, 0, 7).is_err());
        assert!(Biases::new(1.0, -1.0, 0, 7).is_err());
        assert!(Biases::new(1.0, 1.0, -1, 7).is_err());
        assert!(Biases::new(1.0, 1.0, 0, -1).is_err());
        assert!(Biases::new(f64::NAN, 1.0, 0, 7).is_err());
        assert!(Biases::new(f64::INFINITY, 1.0, 0, 7).is_err());
    }

    #[test]
    fn zero_max_days_is_accepted() {
        let biases = Biases::new(0.0, 0.0, 0, 0).unwrap();
        assert_eq!(biases.max_days_since_posted, 0);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = TrendingConfig::from_toml_str(FULL).unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            ("TRENDING_LIKES_BIAS", "2.5"),
            ("TRENDING_TIME_BIAS", " 3600 "),
            ("TRENDING_MAX_DAYS_SINCE_POSTED", ""),
        ]);
        config
            .apply_overrides(|key| env.get(key).map(|value| value.to_string()))
            .unwrap();

        let biases = config.biases().unwrap();
        assert_eq!(biases.likes_bias, 2.5);
        assert_eq!(biases.time_bias, 3_600);
        assert_eq!(biases.comments_bias, 1.0);
        assert_eq!(biases.max_days_since_posted, 7);
    }

    #[test]
    fn unparseable_env_override_is_configuration_error() {
        for (key, raw) in [
            ("TRENDING_LIKES_BIAS", "abc"),
            ("TRENDING_COMMENTS_BIAS", "not-a-number"),
            ("TRENDING_TIME_BIAS", "3600.5"),
            ("TRENDING_MAX_DAYS_SINCE_POSTED", "seven"),
        ] {
            let mut config = TrendingConfig::from_toml_str(FULL).unwrap();
            let err = config
                .apply_overrides(|lookup| (lookup == key).then(|| raw.to_string()))
                .unwrap_err();
            assert!(
                matches!(err, TrendingError::Configuration(ref msg) if msg.contains(key) && msg.contains(raw)),
                "unexpected error for {}: {}",
                key,
                err
            );
        }
    }

    #[test]
    fn explicit_missing_config_path_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = TrendingConfig::load(Some(missing)).unwrap_err();
        assert!(matches!(err, TrendingError::Configuration(ref msg) if msg.contains("not found")));
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trending.toml");
        std::fs::write(&path, FULL).unwrap();

        let config = TrendingConfig::read(&path).unwrap();
        assert_eq!(config.trending.time_bias, Some(86_400));
    }

    #[test]
    fn malformed_toml_is_configuration_error() {
        let err = TrendingConfig::from_toml_str("[trending\nlikes_bias = ").unwrap_err();
        assert!(matches!(err, TrendingError::Configuration(_)));
    }
}
