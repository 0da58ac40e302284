use std::path::{Path, PathBuf};
use std::time::Duration;

use diagnosense_client::transport::ClientConfig;
use diagnosense_core::request::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Environment variable that overrides the configured service URL.
pub const API_URL_ENV: &str = "DIAGNOSENSE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_base_url: String,
    /// Unset means requests wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub updated_at: jiff::Timestamp,
}

impl CliConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: api_base_url.into(),
            request_timeout_secs: None,
            user_agent: None,
            updated_at: jiff::Timestamp::now(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.diagnosense.cli"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`. A missing file is `Ok(None)`.
pub fn load_config(path: &Path) -> eyre::Result<Option<CliConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: CliConfig = serde_json::from_value(migrated)?;
    Ok(Some(config))
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update diagnosense."
        ));
    }

    // v0 → v1: `api_url` became `api_base_url`, and `updated_at` is required.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(url) = obj.remove("api_url") {
            obj.entry("api_base_url").or_insert(url);
        }
        obj.entry("api_base_url")
            .or_insert_with(|| serde_json::Value::String(DEFAULT_API_BASE_URL.to_string()));
        obj.entry("updated_at")
            .or_insert_with(|| serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed api_url)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &CliConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Remove the config file. Returns whether there was one.
pub fn delete_config(path: &Path) -> eyre::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)?;
    tracing::info!(path = %path.display(), "config deleted");
    Ok(true)
}

/// Where the effective service URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSource {
    Flag,
    Env,
    ConfigFile,
    Default,
}

/// Pick the service URL: flag, then environment, then config file, then
/// the built-in default. Blank values are skipped.
pub fn resolve_base_url(
    flag: Option<&str>,
    env: Option<&str>,
    file: Option<&CliConfig>,
) -> (String, UrlSource) {
    let non_blank = |s: &&str| !s.trim().is_empty();

    if let Some(url) = flag.filter(non_blank) {
        return (url.to_string(), UrlSource::Flag);
    }
    if let Some(url) = env.filter(non_blank) {
        return (url.to_string(), UrlSource::Env);
    }
    if let Some(url) = file.map(|c| c.api_base_url.as_str()).filter(non_blank) {
        return (url.to_string(), UrlSource::ConfigFile);
    }
    (DEFAULT_API_BASE_URL.to_string(), UrlSource::Default)
}

/// Build transport settings from the resolved URL and whatever the config
/// file adds. `timeout_secs` from the command line wins over the file.
pub fn client_config(
    flag_url: Option<&str>,
    env_url: Option<&str>,
    file: Option<&CliConfig>,
    timeout_secs: Option<u64>,
) -> ClientConfig {
    let (base_url, source) = resolve_base_url(flag_url, env_url, file);
    tracing::debug!(%base_url, ?source, "resolved service URL");

    let defaults = ClientConfig::default();
    ClientConfig {
        base_url,
        timeout: timeout_secs
            .or_else(|| file.and_then(|c| c.request_timeout_secs))
            .map(Duration::from_secs),
        user_agent: file
            .and_then(|c| c.user_agent.clone())
            .unwrap_or(defaults.user_agent),
    }
}
