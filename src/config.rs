//! Game configuration
//!
//! Where the score service lives, who is playing, and where sprites are
//! served from. Defaults are overridden by the page URL in the browser
//! (`?userId=..&server=..&assets=..`) and by environment variables natively.

use serde::{Deserialize, Serialize};

/// Default score service base URL
pub const DEFAULT_SERVER_BASE: &str = "http://localhost:5000/api";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Score service base URL (no trailing slash needed)
    pub server_base: String,
    /// Identifier sent with saved scores; empty when unknown
    pub user_id: String,
    /// Prefix for sprite paths
    pub asset_base: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            server_base: DEFAULT_SERVER_BASE.to_string(),
            user_id: String::new(),
            asset_base: String::new(),
        }
    }
}

impl GameConfig {
    /// Query parameter / env names
    const USER_ID_PARAM: &'static str = "userId";
    const SERVER_PARAM: &'static str = "server";
    const ASSETS_PARAM: &'static str = "assets";

    /// Environment variables (used only natively)
    #[allow(dead_code)]
    const CONFIG_FILE_ENV: &'static str = "FLAPPY_CONFIG";
    #[allow(dead_code)]
    const SERVER_ENV: &'static str = "FLAPPY_SERVER_URL";
    #[allow(dead_code)]
    const USER_ID_ENV: &'static str = "FLAPPY_USER_ID";
    #[allow(dead_code)]
    const ASSETS_ENV: &'static str = "FLAPPY_ASSET_BASE";

    /// Apply one named override. Unknown names are ignored; an empty server
    /// value keeps the current base.
    pub fn apply(&mut self, name: &str, value: &str) {
        match name {
            Self::USER_ID_PARAM => self.user_id = value.to_string(),
            Self::SERVER_PARAM if !value.is_empty() => self.server_base = value.to_string(),
            Self::ASSETS_PARAM => self.asset_base = value.to_string(),
            _ => {}
        }
    }

    /// Defaults overridden by `(name, value)` pairs, later pairs winning
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (name, value) in pairs {
            config.apply(name, value);
        }
        config
    }

    /// Parse a URL query string (`?a=1&b=2` or `a=1&b=2`). Values are used
    /// as-is; the browser build decodes them through `URLSearchParams`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(
            query
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| pair.split_once('=').unwrap_or((pair, ""))),
        )
    }

    /// Parse a JSON config document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut config = Self::default();

        let search = web_sys::window().and_then(|w| w.location().search().ok());
        let params = search.and_then(|s| web_sys::UrlSearchParams::new_with_str(&s).ok());

        if let Some(params) = params {
            for name in [Self::USER_ID_PARAM, Self::SERVER_PARAM, Self::ASSETS_PARAM] {
                if let Some(value) = params.get(name) {
                    config.apply(name, &value);
                }
            }
        }

        log::info!(
            "Config: server={} user={:?}",
            config.server_base,
            config.user_id
        );
        config
    }

    /// Load from an optional JSON file named by `FLAPPY_CONFIG`, then
    /// individual environment variables (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(Self::CONFIG_FILE_ENV) {
            match std::fs::read_to_string(&path) {
                Ok(json) => match Self::from_json(&json) {
                    Ok(loaded) => config = loaded,
                    Err(e) => log::warn!("Ignoring invalid config '{}': {}", path, e),
                },
                Err(e) => log::warn!("Cannot read config '{}': {}", path, e),
            }
        }
        let vars = [
            (Self::SERVER_ENV, Self::SERVER_PARAM),
            (Self::USER_ID_ENV, Self::USER_ID_PARAM),
            (Self::ASSETS_ENV, Self::ASSETS_PARAM),
        ];
        for (var, name) in vars {
            if let Ok(value) = std::env::var(var) {
                config.apply(name, &value);
            }
        }
        log::info!(
            "Config: server={} user={:?}",
            config.server_base,
            config.user_id
        );
        config
    }
}
