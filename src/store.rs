//! Counter persistence: the remote row first, localStorage as fallback.
//!
//! The remote side is a single Supabase row `{id, count, updated_at}` reached
//! over its REST API. Writes are best-effort and at-most-once: one fetch per
//! feed, no retry, no offline queue. Any failure (or missing configuration)
//! degrades silently to the local value, logged only.

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::config::RemoteConfig;
use crate::{console_error, console_warn};

pub const COUNTER_TABLE: &str = "hotdog_counter";
pub const COUNTER_ROW_ID: u32 = 1;

/// The row also carries `id` and `updated_at`; only `count` is read back.
#[derive(Debug, Deserialize)]
struct CounterRow {
    count: u64,
}

#[derive(Debug, Serialize)]
struct CounterUpdate<'a> {
    count: u64,
    updated_at: &'a str,
}

/// REST client for the shared counter row.
#[derive(Clone, Debug)]
pub struct RemoteCounter {
    cfg: RemoteConfig,
}

impl RemoteCounter {
    pub fn new(cfg: RemoteConfig) -> Self {
        Self { cfg }
    }

    fn row_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?id=eq.{}",
            self.cfg.url.trim_end_matches('/'),
            COUNTER_TABLE,
            COUNTER_ROW_ID
        )
    }

    fn auth_headers(&self) -> Result<Headers, JsValue> {
        let headers = Headers::new()?;
        headers.set("apikey", &self.cfg.key)?;
        headers.set("Authorization", &format!("Bearer {}", self.cfg.key))?;
        Ok(headers)
    }

    /// Reads the current count from the remote row.
    pub async fn load(&self) -> Result<u64, JsValue> {
        let headers = self.auth_headers()?;
        // Single-object representation instead of a one-element array.
        headers.set("Accept", "application/vnd.pgrst.object+json")?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_headers(headers.as_ref());
        let url = format!("{}&select=count", self.row_url());
        let req = Request::new_with_str_and_init(&url, &init)?;
        let text = fetch_text(req).await?;
        let row: CounterRow =
            serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(row.count)
    }

    /// Writes `count` to the remote row, stamping `updated_at`.
    pub async fn store(&self, count: u64) -> Result<(), JsValue> {
        let headers = self.auth_headers()?;
        headers.set("Content-Type", "application/json")?;
        let stamp = String::from(js_sys::Date::new_0().to_iso_string());
        let body = serde_json::to_string(&CounterUpdate {
            count,
            updated_at: &stamp,
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let init = RequestInit::new();
        init.set_method("PATCH");
        init.set_headers(headers.as_ref());
        init.set_body(&JsValue::from_str(&body));
        let req = Request::new_with_str_and_init(&self.row_url(), &init)?;
        fetch_text(req).await?;
        Ok(())
    }
}

async fn fetch_text(req: Request) -> Result<String, JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: Response = JsFuture::from(win.fetch_with_request(&req)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("http status {}", resp.status())));
    }
    let text = JsFuture::from(resp.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

// --- Local fallback (localStorage) -------------------------------------------

/// Parses a stored counter value; anything missing or unreadable counts as 0.
pub fn parse_stored_count(raw: Option<String>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

pub fn load_local(storage_key: &str) -> u64 {
    let raw = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(storage_key).ok().flatten());
    parse_stored_count(raw)
}

pub fn store_local(storage_key: &str, count: u64) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(storage_key, &count.to_string());
    }
}

// --- Orchestration ------------------------------------------------------------

/// Startup read: remote when configured, local otherwise, defaulting to zero.
pub async fn load_count(remote: Option<&RemoteCounter>, storage_key: &str) -> u64 {
    match remote {
        Some(r) => match r.load().await {
            Ok(n) => n,
            Err(err) => {
                console_error(&format!("Error loading counter: {err:?}"));
                load_local(storage_key)
            }
        },
        None => load_local(storage_key),
    }
}

/// Best-effort persistence of a freshly incremented count. At most one remote
/// write is attempted; failure falls back to localStorage. Never blocks the
/// caller.
pub fn persist_count(remote: Option<RemoteCounter>, storage_key: &'static str, count: u64) {
    match remote {
        Some(r) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = r.store(count).await {
                console_warn(&format!(
                    "Error updating counter, keeping local copy: {err:?}"
                ));
                store_local(storage_key, count);
            }
        }),
        None => store_local(storage_key, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_counts_parse_with_zero_default() {
        assert_eq!(parse_stored_count(None), 0);
        assert_eq!(parse_stored_count(Some("".into())), 0);
        assert_eq!(parse_stored_count(Some("garbage".into())), 0);
        assert_eq!(parse_stored_count(Some("42".into())), 42);
        assert_eq!(parse_stored_count(Some(" 7 ".into())), 7);
    }

    #[test]
    fn row_url_targets_the_fixed_row() {
        let r = RemoteCounter::new(RemoteConfig {
            url: "https://x.supabase.co/".into(),
            key: "anon".into(),
        });
        assert_eq!(
            r.row_url(),
            "https://x.supabase.co/rest/v1/hotdog_counter?id=eq.1"
        );
    }
}
