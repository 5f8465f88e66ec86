use chrono_tz::Tz;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::api::EmployeeId;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_EMPLOYEE_ID: EmployeeId = EmployeeId(1);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
    pub default_employee_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub time_zone: Tz,
    pub default_employee_id: EmployeeId,
}

impl ResolvedConfig {
    pub fn from_runtime(cfg: RuntimeConfig) -> Self {
        let time_zone = match cfg.time_zone.as_deref().map(str::parse::<Tz>) {
            Some(Ok(tz)) => tz,
            Some(Err(err)) => {
                warn!("Ignoring invalid time_zone in runtime config: {}", err);
                Tz::UTC
            }
            None => Tz::UTC,
        };
        Self {
            api_base_url: cfg
                .api_base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            time_zone,
            default_employee_id: cfg
                .default_employee_id
                .map(EmployeeId)
                .unwrap_or(DEFAULT_EMPLOYEE_ID),
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self::from_runtime(RuntimeConfig::default())
    }
}

static CONFIG: OnceLock<ResolvedConfig> = OnceLock::new();

fn read_global(name: &str) -> Option<RuntimeConfig> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let read = |lower: &str, upper: &str| {
        js_sys::Reflect::get(&obj, &lower.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(&obj, &upper.into()).ok())
            .filter(|v| !v.is_undefined() && !v.is_null())
    };
    Some(RuntimeConfig {
        api_base_url: read("api_base_url", "API_BASE_URL").and_then(|v| v.as_string()),
        time_zone: read("time_zone", "TIME_ZONE").and_then(|v| v.as_string()),
        default_employee_id: read("default_employee_id", "DEFAULT_EMPLOYEE_ID")
            .and_then(|v| v.as_f64())
            .map(|v| v as i64),
    })
}

// window.__HRMS_ENV (env.js) takes precedence over window.__HRMS_CONFIG.
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    read_global("__HRMS_ENV").or_else(|| read_global("__HRMS_CONFIG"))
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let base = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", base)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn cache(cfg: ResolvedConfig) -> &'static ResolvedConfig {
    let _ = CONFIG.set(cfg);
    CONFIG.get_or_init(ResolvedConfig::default)
}

pub async fn await_config() -> &'static ResolvedConfig {
    if let Some(cached) = CONFIG.get() {
        return cached;
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache(ResolvedConfig::from_runtime(existing));
    }
    let runtime = fetch_runtime_config().await.unwrap_or_default();
    cache(ResolvedConfig::from_runtime(runtime))
}

pub async fn await_api_base_url() -> String {
    await_config().await.api_base_url.clone()
}

/// Falls back to defaults until `init` has resolved the runtime config.
pub fn current() -> ResolvedConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

pub fn current_time_zone() -> Tz {
    current().time_zone
}

/// Resolves the runtime config, then runs `ready`. Anything that reads
/// [`current`] while building the UI must start from here.
pub async fn init_then<F: FnOnce()>(ready: F) {
    init().await;
    ready();
}

pub async fn init() {
    let cfg = await_config().await;
    info!(
        "Runtime config resolved: api_base_url={}, time_zone={}",
        cfg.api_base_url, cfg.time_zone
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_configured() {
        let cfg = ResolvedConfig::from_runtime(RuntimeConfig::default());
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.time_zone, Tz::UTC);
        assert_eq!(cfg.default_employee_id, EmployeeId(1));
    }

    #[test]
    fn runtime_values_override_defaults() {
        let cfg = ResolvedConfig::from_runtime(RuntimeConfig {
            api_base_url: Some("https://hr.example.com/api".into()),
            time_zone: Some("Asia/Dhaka".into()),
            default_employee_id: Some(42),
        });
        assert_eq!(cfg.api_base_url, "https://hr.example.com/api");
        assert_eq!(cfg.time_zone, chrono_tz::Asia::Dhaka);
        assert_eq!(cfg.default_employee_id, EmployeeId(42));
    }

    #[test]
    fn invalid_time_zone_and_blank_url_fall_back() {
        let cfg = ResolvedConfig::from_runtime(RuntimeConfig {
            api_base_url: Some("   ".into()),
            time_zone: Some("Mars/Olympus".into()),
            default_employee_id: None,
        });
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.time_zone, Tz::UTC);
    }

    #[test]
    fn runtime_config_parses_from_json() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{"api_base_url": "http://localhost:9000", "default_employee_id": 3}"#,
        )
        .unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cfg.time_zone, None);
        assert_eq!(cfg.default_employee_id, Some(3));
    }
}
