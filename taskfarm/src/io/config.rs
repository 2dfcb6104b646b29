//! Configuration stored in `taskfarm.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "taskfarm.toml";

/// Top-level configuration (TOML).
///
/// Meant to be edited by hand. Missing fields fall back to the defaults the
/// service currently expects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FarmConfig {
    pub api: ApiConfig,
    pub tasks: TasksConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint exchanging the mini-app query for an access token.
    pub auth_url: String,
    /// Endpoint returning the current user profile.
    pub user_url: String,
    /// Base for balance, farming, daily reward and game endpoints.
    pub game_base_url: String,
    /// Base for the task catalog and task start/claim endpoints.
    pub tasks_base_url: String,
    pub referral_token: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://user-domain.blum.codes/api/v1/auth/provider/PROVIDER_TELEGRAM_MINI_APP"
                .to_string(),
            user_url: "https://gateway.blum.codes/v1/user/me".to_string(),
            game_base_url: "https://game-domain.blum.codes/api/v1".to_string(),
            tasks_base_url: "https://game-domain.blum.codes/api/v1".to_string(),
            referral_token: "vTHusRz4j0".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TasksConfig {
    /// Pause between an accepted start and the following claim.
    pub claim_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub min_points: u32,
    pub max_points: u32,
    /// Time a round must last before its points can be claimed.
    pub round_wait_secs: u64,
    /// Upper bound on rounds per invocation, regardless of play passes left.
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_points: 200,
            max_points: 240,
            round_wait_secs: 60,
            max_rounds: 1,
        }
    }
}

impl FarmConfig {
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("api.auth_url", &self.api.auth_url),
            ("api.user_url", &self.api.user_url),
            ("api.game_base_url", &self.api.game_base_url),
            ("api.tasks_base_url", &self.api.tasks_base_url),
        ];
        for (name, url) in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("{name} must be an http(s) URL, got '{url}'"));
            }
        }
        if self.api.request_timeout_secs == 0 {
            return Err(anyhow!("api.request_timeout_secs must be > 0"));
        }
        if self.game.min_points > self.game.max_points {
            return Err(anyhow!(
                "game.min_points ({}) must not exceed game.max_points ({})",
                self.game.min_points,
                self.game.max_points
            ));
        }
        if self.game.max_rounds == 0 {
            return Err(anyhow!("game.max_rounds must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `FarmConfig::default()`.
pub fn load_config(path: &Path) -> Result<FarmConfig> {
    if !path.exists() {
        let cfg = FarmConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FarmConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &FarmConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
