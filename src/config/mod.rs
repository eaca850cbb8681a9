use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::predictor::clamp_year;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Country shown at startup instead of the built-in "Kenya"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_country: Option<String>,

    /// Year shown at startup instead of the built-in 2025
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_year: Option<u16>,

    /// Restore the previous session's inputs on launch
    #[serde(default)]
    pub remember_last: bool,

    /// Inputs from the previous session (only written when remember_last)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_year: Option<u16>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("inflacast");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => return Ok(config.sanitized()),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(&self.sanitized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp years to the slider bounds and drop countries carrying escape
    /// codes (pasted terminal output ends up here surprisingly often)
    fn sanitized(&self) -> Self {
        let clean_country = |c: &Option<String>| {
            c.as_ref()
                .filter(|s| !s.contains('\x1b'))
                .map(|s| s.to_string())
        };

        Self {
            default_country: clean_country(&self.default_country),
            default_year: self.default_year.map(clamp_year),
            remember_last: self.remember_last,
            last_country: clean_country(&self.last_country),
            last_year: self.last_year.map(clamp_year),
        }
    }

    /// Country to show at startup, following remember_last > default > "Kenya"
    pub fn startup_country(&self) -> String {
        if self.remember_last {
            if let Some(c) = &self.last_country {
                return c.clone();
            }
        }
        self.default_country
            .clone()
            .unwrap_or_else(|| crate::predictor::DEFAULT_COUNTRY.to_string())
    }

    /// Year to show at startup, same precedence as startup_country
    pub fn startup_year(&self) -> u16 {
        if self.remember_last {
            if let Some(y) = self.last_year {
                return clamp_year(y);
            }
        }
        self.default_year
            .map(clamp_year)
            .unwrap_or(crate::predictor::DEFAULT_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{YEAR_MAX, YEAR_MIN};

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            default_country: Some("Ghana".to_string()),
            default_year: Some(2030),
            remember_last: true,
            last_country: Some("Kenya".to_string()),
            last_year: Some(2025),
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.default_country, deserialized.default_country);
        assert_eq!(config.default_year, deserialized.default_year);
        assert_eq!(config.last_year, deserialized.last_year);
    }

    #[test]
    fn test_sanitize_clamps_years() {
        let config = AppConfig {
            default_year: Some(1850),
            last_year: Some(9999),
            ..Default::default()
        };

        let clean = config.sanitized();
        assert_eq!(clean.default_year, Some(YEAR_MIN));
        assert_eq!(clean.last_year, Some(YEAR_MAX));
    }

    #[test]
    fn test_sanitize_drops_escape_codes() {
        let config = AppConfig {
            default_country: Some("\x1b[31mKenya\x1b[0m".to_string()),
            ..Default::default()
        };

        assert_eq!(config.sanitized().default_country, None);
    }

    #[test]
    fn test_startup_precedence() {
        let config = AppConfig {
            default_country: Some("Ghana".to_string()),
            default_year: Some(2030),
            remember_last: true,
            last_country: Some("Brazil".to_string()),
            last_year: Some(2041),
        };
        assert_eq!(config.startup_country(), "Brazil");
        assert_eq!(config.startup_year(), 2041);

        let config = AppConfig {
            remember_last: false,
            ..config
        };
        assert_eq!(config.startup_country(), "Ghana");
        assert_eq!(config.startup_year(), 2030);

        assert_eq!(AppConfig::default().startup_country(), "Kenya");
        assert_eq!(AppConfig::default().startup_year(), 2025);
    }
}
