use std::fs;
use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use stride_regression::FitOptions;

use crate::error::{CliError, CliResult};

const DEFAULT_CONFIG: &str = include_str!("default.toml");
const ENV_PREFIX: &str = "STRIDE__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub fit: FitOptions,
}

impl AppConfig {
    /// Built-in defaults, then the optional TOML file, then `STRIDE__*`
    /// environment variables (`STRIDE__FIT__MIN_SAMPLES=12`).
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let overrides = match path {
            Some(path) => Some(fs::read_to_string(path).map_err(|source| {
                CliError::ConfigFile {
                    path: path.to_path_buf(),
                    source,
                }
            })?),
            None => None,
        };
        Ok(Self::figment(overrides.as_deref()).extract()?)
    }

    fn figment(overrides: Option<&str>) -> Figment {
        let mut figment = Figment::from(Toml::string(DEFAULT_CONFIG));
        if let Some(toml) = overrides {
            figment = figment.admerge(Toml::string(toml));
        }
        figment.admerge(Env::prefixed(ENV_PREFIX).map(|p| p.as_str().replace("__", ".").into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use stride_regression::linalg::{Tolerance, ToleranceMode};

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_| {
            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.fit, FitOptions::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "stride.toml",
                r#"
                [fit]
                min_samples = 15

                [fit.tolerance]
                mode = "absolute"
                epsilon = 1e-9
                "#,
            )?;
            let config =
                AppConfig::load(Some(Path::new("stride.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.fit.min_samples, 15);
            assert_eq!(config.fit.tolerance, Tolerance::absolute(1e-9));
            Ok(())
        });
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("stride.toml", "[fit.tolerance]\nmode = \"absolute\"\n")?;
            let config =
                AppConfig::load(Some(Path::new("stride.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.fit.min_samples, 10);
            assert_eq!(config.fit.tolerance.mode, ToleranceMode::Absolute);
            assert_eq!(config.fit.tolerance.epsilon, 1e-12);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("stride.toml", "[fit]\nmin_samples = 15\n")?;
            jail.set_env("STRIDE__FIT__MIN_SAMPLES", "20");
            jail.set_env("STRIDE__FIT__TOLERANCE__MODE", "absolute");
            let config =
                AppConfig::load(Some(Path::new("stride.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.fit.min_samples, 20);
            assert_eq!(config.fit.tolerance.mode, ToleranceMode::Absolute);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_an_error() {
        Jail::expect_with(|_| {
            assert!(AppConfig::load(Some(Path::new("missing.toml"))).is_err());
            Ok(())
        });
    }
}
