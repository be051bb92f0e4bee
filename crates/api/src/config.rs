use std::path::PathBuf;

use rockfall_core::predict::Presentation;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding the `part_<n>.json` sensor sources.
    pub data_dir: PathBuf,
    /// Optional JSON file replacing the built-in site catalog.
    pub site_catalog_path: Option<PathBuf>,
    /// Whether live predictions carry random presentation jitter.
    pub prediction_jitter: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                                       |
    /// |------------------------|---------------------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                                     |
    /// | `PORT`                 | `8000`                                                        |
    /// | `CORS_ORIGINS`         | `http://localhost:8080,http://localhost:3000,http://localhost:8081` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                                          |
    /// | `DATA_DIR`             | `data/mines`                                                  |
    /// | `SITE_CATALOG_PATH`    | unset (built-in catalog)                                      |
    /// | `PREDICTION_JITTER`    | `false`                                                       |
    ///
    /// Panics on an unparseable value so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| {
                "http://localhost:8080,http://localhost:3000,http://localhost:8081".into()
            })
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "data/mines".into()));

        let site_catalog_path = lookup("SITE_CATALOG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let prediction_jitter = lookup("PREDICTION_JITTER")
            .map(|v| parse_flag(&v).expect("PREDICTION_JITTER must be true/false/1/0"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_dir,
            site_catalog_path,
            prediction_jitter,
        }
    }

    pub fn presentation(&self) -> Presentation {
        if self.prediction_jitter {
            Presentation::Jittered
        } else {
            Presentation::Deterministic
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins.len(), 3);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.data_dir, PathBuf::from("data/mines"));
        assert!(config.site_catalog_path.is_none());
        assert_eq!(config.presentation(), Presentation::Deterministic);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9001"),
            ("CORS_ORIGINS", " https://a.example , ,https://b.example"),
            ("DATA_DIR", "/srv/mines"),
            ("SITE_CATALOG_PATH", "/etc/rockfall/sites.json"),
            ("PREDICTION_JITTER", "true"),
        ]);
        assert_eq!(config.port, 9001);
        assert_eq!(config.cors_origins, ["https://a.example", "https://b.example"]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/mines"));
        assert_eq!(
            config.site_catalog_path,
            Some(PathBuf::from("/etc/rockfall/sites.json"))
        );
        assert_eq!(config.presentation(), Presentation::Jittered);
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn invalid_port_fails_fast() {
        config_from(&[("PORT", "not-a-port")]);
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
