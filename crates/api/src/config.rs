use std::path::PathBuf;
use std::str::FromStr;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// SQLite database URL.
    pub database_url: String,
    /// Root directory served under `/storage`.
    pub storage_path: PathBuf,
    /// Directory for locally stored reference audio.
    pub audio_path: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page size used when a listing request omits `size`.
    pub default_page_size: i64,
    /// Largest accepted `size` for listings.
    pub max_page_size: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DEFAULT_PAGE_SIZE ({default}) must be between 1 and MAX_PAGE_SIZE ({max})")]
    PageSize { default: i64, max: i64 },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `8000`                                        |
    /// | `DATABASE_URL`         | `sqlite://data/music_prompt_box.db`           |
    /// | `STORAGE_PATH`         | `./storage`                                   |
    /// | `AUDIO_PATH`           | `<STORAGE_PATH>/audio`                        |
    /// | `CORS_ORIGINS`         | `http://localhost:5173,http://127.0.0.1:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                          |
    /// | `DEFAULT_PAGE_SIZE`    | `20`                                          |
    /// | `MAX_PAGE_SIZE`        | `100`                                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let storage_path = PathBuf::from(var("STORAGE_PATH", "./storage"));
        let audio_path = lookup("AUDIO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| storage_path.join("audio"));

        let cors_origins = var(
            "CORS_ORIGINS",
            "http://localhost:5173,http://127.0.0.1:5173",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let config = Self {
            host: var("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", "8000", "u16")?,
            database_url: var("DATABASE_URL", "sqlite://data/music_prompt_box.db"),
            storage_path,
            audio_path,
            cors_origins,
            request_timeout_secs: parse(&lookup, "REQUEST_TIMEOUT_SECS", "30", "u64")?,
            default_page_size: parse(&lookup, "DEFAULT_PAGE_SIZE", "20", "integer")?,
            max_page_size: parse(&lookup, "MAX_PAGE_SIZE", "100", "integer")?,
        };

        if config.default_page_size < 1 || config.default_page_size > config.max_page_size {
            return Err(ConfigError::PageSize {
                default: config.default_page_size,
                max: config.max_page_size,
            });
        }

        Ok(config)
    }
}

fn parse<T, F>(
    lookup: &F,
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_url, "sqlite://data/music_prompt_box.db");
        assert_eq!(config.audio_path, PathBuf::from("./storage").join("audio"));
        assert_eq!(
            config.cors_origins,
            ["http://localhost:5173", "http://127.0.0.1:5173"]
        );
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn audio_path_follows_storage_path() {
        let config = load(&[("STORAGE_PATH", "/srv/box")]).unwrap();
        assert_eq!(config.audio_path, PathBuf::from("/srv/box/audio"));

        let config = load(&[("STORAGE_PATH", "/srv/box"), ("AUDIO_PATH", "/mnt/audio")]).unwrap();
        assert_eq!(config.audio_path, PathBuf::from("/mnt/audio"));
    }

    #[test]
    fn cors_origins_are_trimmed() {
        let config = load(&[("CORS_ORIGINS", " http://a.test , ,http://b.test")]).unwrap();
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_numbers_are_errors() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        );
        assert_matches!(
            load(&[("DEFAULT_PAGE_SIZE", "500")]),
            Err(ConfigError::PageSize { default: 500, max: 100 })
        );
    }
}
