//! Access to the host platform's field store.
//!
//! The embedding page exposes the host SDK object as a window global (see
//! `EnvConfig::sdk_global`). Everything here resolves that object lazily on
//! each call, so the handles themselves are plain data and can be captured by
//! reactive closures.

use crate::config::EnvConfig;
use crate::models::EntryField;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Error)]
pub(crate) enum BridgeError {
    #[error("host SDK `{0}` is not available on window")]
    HostUnavailable(String),

    #[error("host SDK is missing `{0}`")]
    MissingProperty(String),

    #[error("host SDK member `{0}` is not callable")]
    NotCallable(String),

    #[error("host call failed: {0}")]
    Js(String),

    #[error("could not serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BridgeError {
    fn js(e: JsValue) -> Self {
        let message = e
            .dyn_ref::<js_sys::Error>()
            .map(|err| String::from(err.message()))
            .or_else(|| e.as_string())
            .unwrap_or_else(|| format!("{e:?}"));
        Self::Js(message)
    }
}

pub(crate) type BridgeResult<T> = Result<T, BridgeError>;

/// Read/write access to the single field a widget edits.
pub(crate) trait FieldBridge: Clone + Send + Sync + 'static {
    /// Current stored value, if any.
    fn load(&self) -> Option<String>;

    /// Writes `value` and resolves to the value the store now holds.
    async fn save(&self, value: String) -> BridgeResult<Option<String>>;
}

/// Write access to sibling fields on the host entry.
pub(crate) trait EntryFieldWriter: Clone + Send + Sync + 'static {
    async fn set_value(&self, field: EntryField, value: serde_json::Value) -> BridgeResult<()>;
}

/* ========================================================== */
/*                     ✨ JS PLUMBING ✨                       */
/* ========================================================== */

fn prop(target: &JsValue, key: &str) -> BridgeResult<JsValue> {
    let v = js_sys::Reflect::get(target, &JsValue::from_str(key)).map_err(BridgeError::js)?;
    if v.is_undefined() || v.is_null() {
        Err(BridgeError::MissingProperty(key.to_string()))
    } else {
        Ok(v)
    }
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> BridgeResult<JsValue> {
    let f = prop(target, method)?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| BridgeError::NotCallable(method.to_string()))?;
    let args: js_sys::Array = args.iter().collect();
    js_sys::Reflect::apply(&f, target, &args).map_err(BridgeError::js)
}

/// Awaits `value` if it is a promise; plain values resolve immediately.
async fn settle(value: JsValue) -> BridgeResult<JsValue> {
    JsFuture::from(js_sys::Promise::resolve(&value))
        .await
        .map_err(BridgeError::js)
}

/// Stored values are strings for the editors, but the host may hand back any
/// JSON value; non-strings are re-serialized so callers always see text.
fn js_to_text(v: &JsValue) -> Option<String> {
    if v.is_undefined() || v.is_null() {
        return None;
    }
    v.as_string()
        .or_else(|| js_sys::JSON::stringify(v).ok().map(String::from))
}

fn json_to_js(value: &serde_json::Value) -> BridgeResult<JsValue> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(BridgeError::js)
}

/// Handle to the host SDK global.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HostSdk {
    global: String,
}

impl HostSdk {
    pub fn from_env() -> Self {
        Self {
            global: EnvConfig::new().sdk_global,
        }
    }

    fn handle(&self) -> BridgeResult<JsValue> {
        web_sys::window()
            .and_then(|w| w.get(&self.global))
            .map(JsValue::from)
            .filter(|v| v.is_object())
            .ok_or_else(|| BridgeError::HostUnavailable(self.global.clone()))
    }

    pub fn is_available(&self) -> bool {
        self.handle().is_ok()
    }

    pub fn app_id(&self) -> Option<String> {
        let sdk = self.handle().ok()?;
        let ids = prop(&sdk, "ids").ok()?;
        prop(&ids, "app").ok()?.as_string()
    }

    pub fn start_auto_resizer(&self) -> BridgeResult<()> {
        let sdk = self.handle()?;
        let window = prop(&sdk, "window")?;
        call(&window, "startAutoResizer", &[])?;
        Ok(())
    }

    pub fn field(&self) -> HostField {
        HostField { sdk: self.clone() }
    }

    pub fn entry(&self) -> HostEntry {
        HostEntry { sdk: self.clone() }
    }
}

/// The field the widget is mounted on (`sdk.field`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HostField {
    sdk: HostSdk,
}

impl HostField {
    fn field(&self) -> BridgeResult<JsValue> {
        prop(&self.sdk.handle()?, "field")
    }
}

impl FieldBridge for HostField {
    fn load(&self) -> Option<String> {
        let field = self.field().ok()?;
        match call(&field, "getValue", &[]) {
            Ok(v) => js_to_text(&v),
            Err(e) => {
                log::error!("failed to read field value: {e}");
                None
            }
        }
    }

    async fn save(&self, value: String) -> BridgeResult<Option<String>> {
        let field = self.field()?;
        let pending = call(&field, "setValue", &[JsValue::from_str(&value)])?;
        let stored = settle(pending).await?;
        Ok(js_to_text(&stored))
    }
}

/// Sibling fields of the host entry (`sdk.entry.fields[name]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HostEntry {
    sdk: HostSdk,
}

impl EntryFieldWriter for HostEntry {
    async fn set_value(&self, field: EntryField, value: serde_json::Value) -> BridgeResult<()> {
        let sdk = self.sdk.handle()?;
        let fields = prop(&prop(&sdk, "entry")?, "fields")?;
        let target = prop(&fields, field.as_ref())?;
        let pending = call(&target, "setValue", &[json_to_js(&value)?])?;
        settle(pending).await?;
        Ok(())
    }
}

/* ========================================================== */
/*                     ✨ TEST DOUBLES ✨                      */
/* ========================================================== */


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_missing_sdk_global_is_reported() {
        let sdk = HostSdk {
            global: "__no_such_sdk__".to_string(),
        };
        assert!(!sdk.is_available());
        assert!(sdk.app_id().is_none());
        assert!(sdk.field().load().is_none());
    }

    #[wasm_bindgen_test]
    async fn test_save_without_sdk_fails() {
        let sdk = HostSdk {
            global: "__no_such_sdk__".to_string(),
        };
        let err = sdk.field().save("[]".to_string()).await.unwrap_err();
        assert!(matches!(err, BridgeError::HostUnavailable(_)));
    }
}
