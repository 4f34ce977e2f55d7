use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "3001".to_string());

        let port = port_str.parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:tarefas.db".to_string());

        Ok(Config { port, database_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.database_url, "sqlite:tarefas.db");
    }

    #[test]
    #[serial]
    fn test_reads_values_from_env() {
        env::set_var("PORT", "8080");
        env::set_var("DATABASE_URL", "sqlite::memory:");

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");

        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn test_rejects_invalid_port() {
        env::set_var("PORT", "notaport");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidPort(_))
        ));

        env::set_var("PORT", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::PortOutOfRange(0))
        ));

        env::remove_var("PORT");
    }
}
