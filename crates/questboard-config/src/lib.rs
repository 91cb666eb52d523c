use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_QUESTBOARD_CONFIG: &str = "QUESTBOARD_CONFIG";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DATABASE_WAL_ENABLED: bool = true;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Message(String),
}

impl ConfigError {
    fn configuration(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestboardConfig {
    #[serde(default)]
    pub server: ServerConfigToml,
    #[serde(default)]
    pub database: DatabaseConfigToml,
}

impl Default for QuestboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfigToml::default(),
            database: DatabaseConfigToml::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfigToml {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfigToml {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfigToml {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_database_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_database_wal_enabled")]
    pub wal_enabled: bool,
}

impl Default for DatabaseConfigToml {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            busy_timeout_ms: default_database_busy_timeout_ms(),
            wal_enabled: default_database_wal_enabled(),
        }
    }
}

impl QuestboardConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.bind_addr, self.server.port);
        raw.parse().map_err(|err| {
            ConfigError::configuration(format!("invalid server address '{raw}': {err}"))
        })
    }
}

pub fn load_from_env() -> Result<QuestboardConfig, ConfigError> {
    let path = config_path_from_env()?;
    load_from_path(path)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<QuestboardConfig, ConfigError> {
    load_or_create_config(path.as_ref())
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = resolve_home_dir().ok_or_else(|| {
        ConfigError::configuration("Unable to resolve home directory from HOME or USERPROFILE")
    })?;

    Ok(home.join(".config").join("questboard").join("config.toml"))
}

fn config_path_from_env() -> Result<PathBuf, ConfigError> {
    match std::env::var(ENV_QUESTBOARD_CONFIG) {
        Ok(raw) => {
            if raw.trim().is_empty() {
                default_config_path()
            } else {
                Ok(raw.into())
            }
        }
        Err(std::env::VarError::NotPresent) => default_config_path(),
        Err(_) => Err(ConfigError::configuration(
            "QUESTBOARD_CONFIG contained invalid UTF-8",
        )),
    }
}

fn resolve_home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("USERPROFILE")
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
}

fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_DATA_HOME") {
        let path = path.trim();
        if !path.is_empty() {
            return PathBuf::from(path).join("questboard");
        }
    }
    if let Some(home) = resolve_home_dir() {
        return home.join(".local").join("share").join("questboard");
    }

    std::env::temp_dir().join("questboard")
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_owned()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database_path() -> String {
    default_data_dir()
        .join("questboard.db")
        .to_string_lossy()
        .to_string()
}

fn default_database_busy_timeout_ms() -> u64 {
    DEFAULT_DATABASE_BUSY_TIMEOUT_MS
}

fn default_database_wal_enabled() -> bool {
    DEFAULT_DATABASE_WAL_ENABLED
}

fn persist_config(path: &Path, config: &QuestboardConfig) -> Result<(), ConfigError> {
    let rendered = toml::to_string_pretty(config).map_err(|err| {
        ConfigError::configuration(format!(
            "Failed to serialize QUESTBOARD_CONFIG for {}: {err}",
            path.display()
        ))
    })?;

    std::fs::write(path, rendered.as_bytes()).map_err(|err| {
        ConfigError::configuration(format!(
            "Failed to write QUESTBOARD_CONFIG to {}: {err}",
            path.display()
        ))
    })
}

fn load_or_create_config(path: &Path) -> Result<QuestboardConfig, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|err| {
                        ConfigError::configuration(format!(
                            "Failed to create parent directory {} for QUESTBOARD_CONFIG: {err}",
                            parent.display()
                        ))
                    })?;
                }
            }

            let default_config = QuestboardConfig::default();
            persist_config(path, &default_config)?;
            return Ok(default_config);
        }
        Err(err) => {
            return Err(ConfigError::configuration(format!(
                "Failed to read QUESTBOARD_CONFIG from {}: {err}",
                path.display()
            )));
        }
    };

    let mut config: QuestboardConfig = toml::from_str(&raw).map_err(|err| {
        ConfigError::configuration(format!(
            "Failed to parse QUESTBOARD_CONFIG from {}: {err}",
            path.display()
        ))
    })?;

    let changed = normalize_config(&mut config);
    if changed {
        persist_config(path, &config)?;
    }

    Ok(config)
}

fn normalize_config(config: &mut QuestboardConfig) -> bool {
    let mut changed = false;

    changed |= normalize_non_empty_string(&mut config.server.bind_addr, default_bind_addr());
    if config.server.port == 0 {
        config.server.port = default_port();
        changed = true;
    }

    changed |= normalize_non_empty_string(&mut config.database.path, default_database_path());

    let normalized_busy_timeout_ms = if config.database.busy_timeout_ms == 0 {
        default_database_busy_timeout_ms()
    } else {
        config.database.busy_timeout_ms.clamp(100, 60_000)
    };
    if normalized_busy_timeout_ms != config.database.busy_timeout_ms {
        config.database.busy_timeout_ms = normalized_busy_timeout_ms;
        changed = true;
    }

    changed
}

fn normalize_non_empty_string(value: &mut String, default: String) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        if *value != default {
            *value = default;
            return true;
        }
        return false;
    }

    if trimmed != value {
        *value = trimmed.to_owned();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn with_env_vars<F>(vars: &[(&str, Option<&str>)], test: F)
    where
        F: FnOnce(),
    {
        let _guard = env_lock().lock().expect("env lock");
        let backup = vars
            .iter()
            .map(|(name, _)| ((*name).to_owned(), std::env::var(name).ok()))
            .collect::<Vec<_>>();

        for (name, value) in vars {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }

        test();

        for (name, value) in backup {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    fn unique_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "questboard-config-{prefix}-{nanos}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&path).expect("create temp dir");
        path
    }

    fn remove_temp_path(path: &Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    fn write_config_file(path: &Path, raw: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture config parent");
        }
        std::fs::write(path, raw.as_bytes()).expect("write fixture config");
    }

    #[test]
    fn load_from_env_creates_default_config_when_missing() {
        let home = unique_temp_dir("home-defaults");
        let expected = home.join(".config").join("questboard").join("config.toml");

        with_env_vars(
            &[
                ("HOME", Some(home.to_str().expect("home path"))),
                ("USERPROFILE", None),
                (ENV_QUESTBOARD_CONFIG, None),
                ("XDG_DATA_HOME", None),
            ],
            || {
                let config = load_from_env().expect("load defaults");
                assert_eq!(config.server.bind_addr, DEFAULT_BIND_ADDR);
                assert_eq!(config.server.port, DEFAULT_PORT);
                assert!(expected.exists());
            },
        );

        remove_temp_path(&home);
    }

    #[test]
    fn load_from_env_honors_explicit_config_path() {
        let home = unique_temp_dir("home-explicit-path");
        let root = unique_temp_dir("explicit-path");
        let explicit = root.join("nested").join("custom.toml");
        let default = home.join(".config").join("questboard").join("config.toml");

        with_env_vars(
            &[
                ("HOME", Some(home.to_str().expect("home path"))),
                ("USERPROFILE", None),
                (
                    ENV_QUESTBOARD_CONFIG,
                    Some(explicit.to_str().expect("config path")),
                ),
                ("XDG_DATA_HOME", None),
            ],
            || {
                let config = load_from_env().expect("load explicit path config");
                assert!(explicit.exists());
                assert!(!default.exists());
                assert_eq!(config.server.port, DEFAULT_PORT);
            },
        );

        remove_temp_path(&home);
        remove_temp_path(&root);
    }

    #[test]
    fn load_from_path_returns_parse_error_for_invalid_toml() {
        let root = unique_temp_dir("invalid");
        let path = root.join("config.toml");
        write_config_file(&path, "[server]\nbind_addr = [\n");

        let error = load_from_path(&path).expect_err("expected parse failure");
        assert!(error
            .to_string()
            .contains("Failed to parse QUESTBOARD_CONFIG"));

        remove_temp_path(&root);
    }

    #[test]
    fn load_from_path_normalizes_and_persists_supported_bounds() {
        let root = unique_temp_dir("normalization");
        let path = root.join("config.toml");
        write_config_file(
            &path,
            r#"
[server]
bind_addr = "  127.0.0.1  "
port = 0

[database]
path = "/tmp/questboard-test.db"
busy_timeout_ms = 1
"#,
        );

        let config = load_from_path(&path).expect("load and normalize config");

        assert_eq!(config.server.bind_addr, "127.0.0.1");
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.database.busy_timeout_ms, 100);

        let persisted = std::fs::read_to_string(&path).expect("read persisted config");
        let parsed: QuestboardConfig =
            toml::from_str(&persisted).expect("parse persisted normalized config");
        assert_eq!(parsed.server.bind_addr, "127.0.0.1");
        assert_eq!(parsed.database.busy_timeout_ms, 100);

        remove_temp_path(&root);
    }

    #[test]
    fn socket_addr_combines_bind_addr_and_port() {
        let config = QuestboardConfig {
            server: ServerConfigToml {
                bind_addr: "127.0.0.1".to_owned(),
                port: 9123,
            },
            ..QuestboardConfig::default()
        };

        let addr = config.socket_addr().expect("socket addr");
        assert_eq!(addr.to_string(), "127.0.0.1:9123");
    }

    #[test]
    fn socket_addr_rejects_unparseable_bind_addr() {
        let config = QuestboardConfig {
            server: ServerConfigToml {
                bind_addr: "not-an-address".to_owned(),
                port: 9123,
            },
            ..QuestboardConfig::default()
        };

        let error = config.socket_addr().expect_err("invalid address");
        assert!(error.to_string().contains("not-an-address"));
    }
}
