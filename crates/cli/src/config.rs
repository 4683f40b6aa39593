//! Invocation configuration.
//!
//! Flags win over environment variables (`clap` reads `GQL_HOME`, `GQL_HOST`
//! and `GQL_BEARER` for us), which win over built-in defaults. The result is
//! resolved once and handed to every command.

use anyhow::{Context, Result};
use gql_client::Endpoint;
use std::path::{Path, PathBuf};

/// Directory under the user config dir used when no home is given.
const DEFAULT_HOME_DIR: &str = "graphql";

/// Directory under the home dir holding query files.
const QUERIES_DIR: &str = "queries";

#[derive(Debug, Clone)]
pub struct Config {
    home: PathBuf,
    endpoint: Endpoint,
}

impl Config {
    /// Builds the configuration from already-merged flag/environment values.
    pub fn resolve(
        home: Option<PathBuf>,
        host: Option<String>,
        bearer: Option<String>,
    ) -> Result<Self> {
        let host = host
            .filter(|h| !h.trim().is_empty())
            .context("--host is required (or set GQL_HOST)")?;

        let home = match home {
            Some(home) => home,
            None => dirs::config_dir()
                .map(|dir| dir.join(DEFAULT_HOME_DIR))
                .context("Could not determine the user config directory; use --home or GQL_HOME")?,
        };

        Ok(Self {
            home,
            endpoint: Endpoint::new(&host, bearer),
        })
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    #[must_use]
    pub fn queries_dir(&self) -> PathBuf {
        self.home.join(QUERIES_DIR)
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_explicit_values() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/gql-home")),
            Some("api.example.com/graphql".to_string()),
            Some("token".to_string()),
        )
        .unwrap();

        assert_eq!(config.home(), Path::new("/tmp/gql-home"));
        assert_eq!(config.queries_dir(), PathBuf::from("/tmp/gql-home/queries"));
        assert_eq!(config.endpoint().url(), "https://api.example.com/graphql");
        assert_eq!(config.endpoint().bearer(), Some("token"));
    }

    #[test]
    fn test_resolve_requires_host() {
        let err = Config::resolve(Some(PathBuf::from("/tmp")), None, None).unwrap_err();
        assert!(err.to_string().contains("--host is required"));

        let err = Config::resolve(Some(PathBuf::from("/tmp")), Some("  ".into()), None);
        assert!(err.is_err());
    }

    #[test]
    fn test_resolve_default_home() {
        let Some(config_dir) = dirs::config_dir() else {
            return;
        };
        let config = Config::resolve(None, Some("localhost".into()), None).unwrap();
        assert_eq!(config.home(), config_dir.join("graphql"));
    }
}
