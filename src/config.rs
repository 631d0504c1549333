//! Runtime configuration: gameplay tunables plus the optional remote backend
//! coordinates injected by the host page.

use wasm_bindgen::JsValue;

/// Gameplay tunables.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Extra pixels around the mouth rect that still count as a feed.
    pub drop_margin: f64,
    /// Number of glizzies kept in the pile.
    pub pile_size: usize,
    /// localStorage key for the offline counter fallback.
    pub storage_key: &'static str,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            drop_margin: 100.0,
            pile_size: 3,
            storage_key: "hotdogCount",
        }
    }
}

const URL_PLACEHOLDER: &str = "YOUR_SUPABASE_URL";
const KEY_PLACEHOLDER: &str = "YOUR_SUPABASE_ANON_KEY";

/// Remote counter backend (Supabase project URL + anon key). Absent or
/// placeholder configuration means the game runs local-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
}

impl RemoteConfig {
    /// Reads `window.SUPABASE_CONFIG = { url, key }` left by the host page.
    pub fn from_window() -> Option<Self> {
        let win = web_sys::window()?;
        let cfg = js_sys::Reflect::get(&win, &JsValue::from_str("SUPABASE_CONFIG")).ok()?;
        if cfg.is_undefined() || cfg.is_null() {
            return None;
        }
        let url = js_sys::Reflect::get(&cfg, &JsValue::from_str("url"))
            .ok()?
            .as_string()?;
        let key = js_sys::Reflect::get(&cfg, &JsValue::from_str("key"))
            .ok()?
            .as_string()?;
        Self::validate(url, key)
    }

    /// Pure half of the lookup: rejects empty and template-placeholder values.
    pub fn validate(url: String, key: String) -> Option<Self> {
        if url.is_empty() || key.is_empty() || url == URL_PLACEHOLDER || key == KEY_PLACEHOLDER {
            return None;
        }
        Some(Self { url, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_config_means_local_only() {
        assert!(RemoteConfig::validate(URL_PLACEHOLDER.into(), "real-key".into()).is_none());
        assert!(RemoteConfig::validate("https://x.supabase.co".into(), KEY_PLACEHOLDER.into()).is_none());
        assert!(RemoteConfig::validate(String::new(), String::new()).is_none());
    }

    #[test]
    fn real_config_is_accepted() {
        let cfg = RemoteConfig::validate("https://x.supabase.co".into(), "anon".into()).unwrap();
        assert_eq!(cfg.url, "https://x.supabase.co");
        assert_eq!(cfg.key, "anon");
    }
}
