use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub loglevel: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    /// Insert the default catalog into an empty `videos` table on startup.
    pub seed_catalog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:study.db".to_string(),
            db_max_connections: 5,
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            jwt_secret: String::new(),
            token_ttl_secs: 24 * 60 * 60,
            seed_catalog: true,
        }
    }
}

impl Config {
    /// Defaults overlaid with `STUDY_*` environment variables.
    pub fn load() -> Result<Self, StudyError> {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("STUDY_"))
            .extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), StudyError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(StudyError::Config(
                "STUDY_JWT_SECRET must be set".to_string(),
            ));
        }
        if self.token_ttl_secs <= 0 {
            return Err(StudyError::Config(
                "STUDY_TOKEN_TTL_SECS must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requires_secret() {
        let cfg = Config::default();
        assert!(matches!(cfg.validate(), Err(StudyError::Config(_))));
    }

    #[test]
    fn token_lifetime_defaults_to_one_day() {
        let cfg = Config {
            jwt_secret: "s3cret".to_string(),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.token_ttl_secs, 86_400);
    }
}
