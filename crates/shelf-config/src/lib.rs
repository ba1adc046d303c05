//! Configuration management for Shelf.
//!
//! Parses `shelf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values in the `[notion]` section support
//! environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, empty when unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise the default
//!
//! When the section is omitted entirely, the `NOTION_TOKEN` and
//! `NOTION_DATABASE_ID` environment variables are consulted directly.
//! A missing credential is never an error - it selects mock mode.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "shelf.toml";

/// Default Notion API base URL.
const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    #[serde(default)]
    content: ContentConfigRaw,
    /// Notion configuration (values may reference environment variables).
    #[serde(default)]
    notion: NotionConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved Notion configuration (set after loading).
    #[serde(skip)]
    pub notion_resolved: NotionSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            notion: NotionConfigRaw::default(),
            content_resolved: ContentConfig::default(),
            notion_resolved: NotionSettings::default(),
            config_path: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Content directory holding the notes tree.
    pub source_dir: PathBuf,
}

/// Raw Notion configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct NotionConfigRaw {
    token: Option<String>,
    database_id: Option<String>,
    api_url: Option<String>,
}

/// Resolved Notion settings.
#[derive(Debug, Clone)]
pub struct NotionSettings {
    /// API access token; `None` selects mock mode.
    pub token: Option<String>,
    /// Database id for menu listing.
    pub database_id: Option<String>,
    /// API base URL.
    pub api_url: String,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            api_url: DEFAULT_NOTION_API_URL.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path`, that file is loaded. Otherwise
    /// `shelf.toml` is discovered by walking up from the current
    /// directory; when none exists, defaults apply. CLI settings
    /// override file values; paths resolve relative to the config
    /// file's directory (or the current directory without one).
    pub fn load(path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let discovered = match path {
            Some(p) => Some(p.to_path_buf()),
            None => discover(&std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
        };

        let mut config = match &discovered {
            Some(file) => {
                let content = std::fs::read_to_string(file).map_err(|source| ConfigError::Io {
                    path: file.clone(),
                    source,
                })?;
                let mut config: Self =
                    toml::from_str(&content).map_err(|source| ConfigError::Parse {
                        path: file.clone(),
                        source,
                    })?;
                config.config_path = Some(file.clone());
                config
            }
            None => Self::default(),
        };

        if let Some(cli) = cli {
            config.apply_cli(cli);
        }
        config.resolve(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &cli.source_dir {
            self.content.source_dir = Some(source_dir.display().to_string());
        }
    }

    /// Resolve raw values: expand environment references, fall back to
    /// well-known variables, and make paths absolute.
    fn resolve(&mut self, lookup: impl Fn(&str) -> Option<String> + Copy) {
        let base_dir = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();

        let source_dir = self.content.source_dir.as_deref().unwrap_or("content");
        let source_dir = PathBuf::from(source_dir);
        self.content_resolved.source_dir = if source_dir.is_absolute() {
            source_dir
        } else {
            base_dir.join(source_dir)
        };

        self.notion_resolved = NotionSettings {
            token: resolve_credential(self.notion.token.as_deref(), "NOTION_TOKEN", lookup),
            database_id: resolve_credential(
                self.notion.database_id.as_deref(),
                "NOTION_DATABASE_ID",
                lookup,
            ),
            api_url: self
                .notion
                .api_url
                .as_deref()
                .map(|url| expand::expand_with(url, lookup))
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_owned()),
        };
    }
}

/// Resolve one credential: config value (with expansion) first, then
/// the well-known environment variable. Empty means unset.
fn resolve_credential(
    raw: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let from_config = raw
        .map(|value| expand::expand_with(value, &lookup))
        .filter(|value| !value.is_empty());
    from_config.or_else(|| lookup(env_name).filter(|value| !value.is_empty()))
}

/// Walk up from `start` looking for a `shelf.toml`.
fn discover(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(content: &str) -> Config {
        let mut config: Config = toml::from_str(content).unwrap();
        config.resolve(|_| None);
        config
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert!(config.content_resolved.source_dir.ends_with("content"));
        assert!(config.notion_resolved.token.is_none());
        assert_eq!(config.notion_resolved.api_url, DEFAULT_NOTION_API_URL);
    }

    #[test]
    fn test_parse_sections() {
        let config = parse(
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n\
             [content]\nsource_dir = \"notes\"\n",
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.content_resolved.source_dir.ends_with("notes"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        config.apply_cli(&CliSettings {
            host: Some("::1".to_owned()),
            port: Some(4000),
            source_dir: Some(PathBuf::from("/abs/notes")),
        });
        config.resolve(|_| None);

        assert_eq!(config.server.host, "::1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.content_resolved.source_dir, PathBuf::from("/abs/notes"));
    }

    #[test]
    fn test_notion_expansion_from_lookup() {
        let mut config: Config =
            toml::from_str("[notion]\ntoken = \"${MY_TOKEN}\"\n").unwrap();
        config.resolve(|name| (name == "MY_TOKEN").then(|| "secret".to_owned()));

        assert_eq!(config.notion_resolved.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_notion_unset_expansion_is_mock_mode() {
        let mut config: Config =
            toml::from_str("[notion]\ntoken = \"${MY_TOKEN}\"\n").unwrap();
        config.resolve(|_| None);

        assert!(config.notion_resolved.token.is_none());
    }

    #[test]
    fn test_notion_well_known_env_fallback() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(|name| match name {
            "NOTION_TOKEN" => Some("tok".to_owned()),
            "NOTION_DATABASE_ID" => Some("db".to_owned()),
            _ => None,
        });

        assert_eq!(config.notion_resolved.token.as_deref(), Some("tok"));
        assert_eq!(config.notion_resolved.database_id.as_deref(), Some("db"));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(CONFIG_FILENAME), "").unwrap();

        let found = discover(&nested).unwrap();

        assert_eq!(found, temp.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_discover_none_without_file() {
        let temp = tempfile::tempdir().unwrap();
        assert!(discover(temp.path()).is_none());
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let err = Config::load(Some(Path::new("/nonexistent/shelf.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
