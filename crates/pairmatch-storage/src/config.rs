//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pairmatch_core::templates::CLASSIC_TEMPLATE_ID;

/// The admin gate's username/password pair.
///
/// This is a plain string comparison guarding the settings editor. It is a
/// placeholder, not a security boundary.
///
/// Note: Custom Debug impl masks the password to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    #[serde(default = "default_admin_user")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl AdminCredentials {
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: default_admin_user(),
            password: default_admin_password(),
        }
    }
}

fn default_admin_user() -> String {
    "admin".to_string()
}
fn default_admin_password() -> String {
    "admin".to_string()
}

/// Top-level pairmatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairmatchConfig {
    #[serde(default)]
    pub admin: AdminCredentials,
    /// Settings store file.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Extra template files to load alongside the built-in ones.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    /// Template the settings editor and `create` start from.
    #[serde(default = "default_template")]
    pub default_template: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./.pairmatch/store.json")
}
fn default_template() -> String {
    CLASSIC_TEMPLATE_ID.to_string()
}

impl Default for PairmatchConfig {
    fn default() -> Self {
        Self {
            admin: AdminCredentials::default(),
            store_path: default_store_path(),
            templates_dir: None,
            default_template: default_template(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `pairmatch.toml` in the current directory
/// 2. `~/.config/pairmatch/config.toml`
///
/// Environment variable overrides: `PAIRMATCH_ADMIN_USER`, `PAIRMATCH_ADMIN_PASSWORD`.
pub fn load_config() -> Result<PairmatchConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PairmatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pairmatch.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PairmatchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PairmatchConfig::default(),
    };

    // Apply env var overrides
    if let Ok(user) = std::env::var("PAIRMATCH_ADMIN_USER") {
        config.admin.username = user;
    }
    if let Ok(password) = std::env::var("PAIRMATCH_ADMIN_PASSWORD") {
        config.admin.password = password;
    }

    config.admin.username = resolve_env_vars(&config.admin.username);
    config.admin.password = resolve_env_vars(&config.admin.password);
    if config.admin.password.is_empty() {
        // An unset `${VAR}` must not turn into an empty password.
        config.admin.password = default_admin_password();
    }
    config.store_path = resolve_path(&config.store_path);
    config.templates_dir = config.templates_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pairmatch"))
}
