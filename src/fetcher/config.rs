use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub assets_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(timeout) = lookup("APPNET_TIMEOUT_SECS") {
            // a zero timeout would fail every request
            if let Ok(parsed @ 1..) = timeout.trim().parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        if let Some(dir) = lookup("APPNET_ASSETS_DIR") {
            if !dir.trim().is_empty() {
                cfg.assets_dir = PathBuf::from(dir);
            }
        }
        cfg
    }
}
