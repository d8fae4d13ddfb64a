//! Application settings. Everything has a built-in default; the remote
//! checklist location can be edited in the UI and is kept in localStorage.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::util::{storage_get, storage_set};

const REMOTE_CONFIG_KEY: &str = "psc_remote_config";
const TOKEN_KEY: &str = "psc_remote_token";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base of the contents API, e.g. `https://api.github.com`.
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    /// Path of the checklist blob inside the repository.
    pub path: String,
    pub branch: String,
    pub commit_message: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: String::new(),
            repo: String::new(),
            path: "problemlist/problemlist.json".to_string(),
            branch: "main".to_string(),
            commit_message: "Update problem checklist".to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let missing: Vec<&str> = [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("path", &self.path),
            ("branch", &self.branch),
        ]
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| *k)
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::config(format!("repository fields missing: {}", missing.join(", "))))
        }
    }

    pub fn load_saved() -> Option<Self> {
        let raw = storage_get(REMOTE_CONFIG_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!("ignoring saved remote config: {}", e);
                None
            }
        }
    }

    pub fn save(&self) {
        if let Ok(s) = serde_json::to_string(self) {
            storage_set(REMOTE_CONFIG_KEY, &s);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTab {
    /// Directory name under `problemlists/`.
    pub key: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where `problemlists/` lives, relative to the page or absolute.
    pub data_root: String,
    pub categories: Vec<CategoryTab>,
    pub default_category: String,
    pub remote: RemoteConfig,
    /// How long a status message stays on screen.
    pub status_ttl_ms: u32,
    pub sidebar_default_px: f64,
    pub sidebar_min_px: f64,
    pub sidebar_max_px: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let tab = |key: &str, label: &str| CategoryTab {
            key: key.to_string(),
            label: label.to_string(),
        };
        Self {
            data_root: ".".to_string(),
            categories: vec![
                tab("icpc", "ICPC"),
                tab("olympiad", "Olympiad"),
                tab("codeforces", "Codeforces"),
                tab("atcoder", "AtCoder"),
            ],
            default_category: "icpc".to_string(),
            remote: RemoteConfig::default(),
            status_ttl_ms: 5000,
            sidebar_default_px: 320.0,
            sidebar_min_px: 200.0,
            sidebar_max_px: 720.0,
        }
    }
}

impl AppConfig {
    /// Defaults plus whatever the user saved in this browser.
    pub fn load() -> Self {
        let mut cfg = Self::default();
        if let Some(remote) = RemoteConfig::load_saved() {
            cfg.remote = remote;
        }
        cfg
    }

    pub fn clamp_sidebar(&self, width: f64) -> f64 {
        width.clamp(self.sidebar_min_px, self.sidebar_max_px)
    }
}

pub fn load_token() -> Option<String> {
    storage_get(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn save_token(token: &str) {
    storage_set(TOKEN_KEY, token);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_is_listed() {
        let cfg = AppConfig::default();
        assert!(cfg.categories.iter().any(|c| c.key == cfg.default_category));
        assert!(cfg.sidebar_min_px <= cfg.sidebar_default_px && cfg.sidebar_default_px <= cfg.sidebar_max_px);
    }

    #[test]
    fn test_partial_remote_config_uses_defaults() {
        let cfg: RemoteConfig = serde_json::from_str(r#"{"owner":"me","repo":"lists"}"#).unwrap();
        assert_eq!(cfg.owner, "me");
        assert_eq!(cfg.branch, "main");
        assert_eq!(cfg.api_base, "https://api.github.com");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_names_missing_fields() {
        let err = RemoteConfig::default().validate().unwrap_err();
        assert_eq!(err, CatalogError::config("repository fields missing: owner, repo"));
    }

    #[test]
    fn test_clamp_sidebar() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.clamp_sidebar(10.0), cfg.sidebar_min_px);
        assert_eq!(cfg.clamp_sidebar(5000.0), cfg.sidebar_max_px);
        assert_eq!(cfg.clamp_sidebar(400.0), 400.0);
    }
}
