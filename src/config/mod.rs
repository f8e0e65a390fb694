use log::Level;
use wasm_bindgen::JsValue;

const DEFAULT_METADATA_API_URL: &str = "http://localhost:3000";
const DEFAULT_SDK_GLOBAL: &str = "sdk";

/// Runtime settings injected by the embedding page through `window.ENV`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub metadata_api_url: String,
    pub sdk_global: String,
    pub log_level: Level,
}

impl EnvConfig {
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .map(JsValue::from)
            .filter(|env| !env.is_undefined() && env.is_object());

        match env {
            Some(env) => Self::from_lookup(|key| {
                js_sys::Reflect::get(&env, &key.into())
                    .ok()
                    .and_then(|v| v.as_string())
            }),
            None => Self::default_values(),
        }
    }

    /// Builds the config from a key lookup.
    ///
    /// Both the documented upper-case keys and the legacy lower-case keys are
    /// accepted; upper-case wins when both are set.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |upper: &str, lower: &str| {
            lookup(upper)
                .or_else(|| lookup(lower))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let metadata_api_url = pick("METADATA_API_URL", "metadata_api_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_METADATA_API_URL.to_string());

        let sdk_global =
            pick("SDK_GLOBAL", "sdk_global").unwrap_or_else(|| DEFAULT_SDK_GLOBAL.to_string());

        let log_level = pick("LOG_LEVEL", "log_level")
            .and_then(|v| v.parse::<Level>().ok())
            .unwrap_or(Level::Info);

        Self {
            metadata_api_url,
            sdk_global,
            log_level,
        }
    }

    fn default_values() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_missing() {
        let c = EnvConfig::default_values();
        assert_eq!(c.metadata_api_url, "http://localhost:3000");
        assert_eq!(c.sdk_global, "sdk");
        assert_eq!(c.log_level, Level::Info);
    }

    #[test]
    fn test_upper_case_keys_win_over_legacy() {
        let c = EnvConfig::from_lookup(lookup_from(&[
            ("METADATA_API_URL", "https://meta.example.com/"),
            ("metadata_api_url", "https://legacy.example.com"),
        ]));
        assert_eq!(c.metadata_api_url, "https://meta.example.com");
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let c = EnvConfig::from_lookup(lookup_from(&[
            ("sdk_global", "contentfulSdk"),
            ("log_level", "debug"),
        ]));
        assert_eq!(c.sdk_global, "contentfulSdk");
        assert_eq!(c.log_level, Level::Debug);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let c = EnvConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "loud"),
            ("SDK_GLOBAL", "   "),
        ]));
        assert_eq!(c.log_level, Level::Info);
        assert_eq!(c.sdk_global, "sdk");
    }
}
