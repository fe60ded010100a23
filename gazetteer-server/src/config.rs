//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default reference table location.
const DEFAULT_GAZETTEER_PATH: &str = "data/location_data.xlsx";

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Default listen address.
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    5500,
);

/// Region shown on the landing page.
pub const DEFAULT_PLACE: &str = "청주시 서원구";

/// Coordinates shown for [`DEFAULT_PLACE`] when it cannot be resolved.
pub const DEFAULT_LAT: f64 = 36.642434;
pub const DEFAULT_LON: f64 = 127.489031;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `BIND_ADDR` is not a socket address
    #[error("invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration for the gazetteer server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Reference table (CSV or spreadsheet)
    pub gazetteer_path: PathBuf,

    /// JSON file for comments; `None` keeps them in memory only
    pub comments_path: Option<PathBuf>,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Listen address
    pub bind_addr: SocketAddr,

    /// Place shown on the landing page
    pub default_place: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("GAZETTEER_PATH") {
            config.gazetteer_path = path.into();
        }
        if let Some(path) = get("COMMENTS_PATH") {
            config.comments_path = Some(path.into());
        }
        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = dir.into();
        }
        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value: addr, source })?;
        }
        if let Some(place) = get("DEFAULT_PLACE") {
            config.default_place = place.trim().to_string();
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gazetteer_path: DEFAULT_GAZETTEER_PATH.into(),
            comments_path: None,
            static_dir: DEFAULT_STATIC_DIR.into(),
            bind_addr: DEFAULT_BIND_ADDR,
            default_place: DEFAULT_PLACE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.gazetteer_path, PathBuf::from("data/location_data.xlsx"));
        assert_eq!(config.comments_path, None);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:5500");
        assert_eq!(config.default_place, "청주시 서원구");
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn environment_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("GAZETTEER_PATH", "/srv/regions.csv"),
            ("COMMENTS_PATH", "/var/lib/comments.json"),
            ("STATIC_DIR", "/srv/static"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DEFAULT_PLACE", "서울특별시 종로구"),
        ]))
        .unwrap();

        assert_eq!(config.gazetteer_path, PathBuf::from("/srv/regions.csv"));
        assert_eq!(
            config.comments_path,
            Some(PathBuf::from("/var/lib/comments.json"))
        );
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.default_place, "서울특별시 종로구");
    }

    #[test]
    fn blank_values_ignored() {
        let config = ServerConfig::from_lookup(lookup(&[("COMMENTS_PATH", "  ")])).unwrap();
        assert_eq!(config.comments_path, None);
    }

    #[test]
    fn invalid_bind_addr() {
        let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }
}
