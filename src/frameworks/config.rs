use std::{env, path::PathBuf, time::Duration};

// Runtime/server settings (not gameplay tuning; see `domain::tuning`).

pub fn http_port() -> u16 {
    env::var("GAME_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn level_id() -> String {
    env::var("LEVEL_ID").unwrap_or_else(|_| "level1".to_string())
}

pub fn levels_dir() -> PathBuf {
    env::var_os("LEVELS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("levels"))
}

pub fn snapshots_dir() -> PathBuf {
    env::var_os("SNAPSHOTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("snapshots"))
}

// Unset or empty disables the password-guessing NPCs.
pub fn llm_proxy_url() -> Option<String> {
    env::var("LLM_PROXY_URL").ok().filter(|v| !v.trim().is_empty())
}

pub fn team_token() -> String {
    env::var("TEAM_TOKEN").unwrap_or_default()
}

pub fn llm_timeout() -> Duration {
    let millis = env::var("LLM_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(30_000);
    Duration::from_millis(millis)
}

/// Everything the server needs to boot, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub level_id: String,
    pub levels_dir: PathBuf,
    pub snapshots_dir: PathBuf,
    pub llm_proxy_url: Option<String>,
    pub team_token: String,
    pub llm_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: http_port(),
            level_id: level_id(),
            levels_dir: levels_dir(),
            snapshots_dir: snapshots_dir(),
            llm_proxy_url: llm_proxy_url(),
            team_token: team_token(),
            llm_timeout: llm_timeout(),
        }
    }
}
