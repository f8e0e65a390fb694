use super::EditorContent;
use wasm_bindgen::prelude::*;

const EDITOR_GLOBAL: &str = "JSONEditor";

#[wasm_bindgen]
extern "C" {
    /// `vanilla-jsoneditor`'s editor class, loaded by the page as a global.
    #[wasm_bindgen(js_name = JSONEditor)]
    pub(super) type JsonEditorHandle;

    #[wasm_bindgen(constructor, js_class = "JSONEditor", catch)]
    fn new(options: &JsValue) -> Result<JsonEditorHandle, JsValue>;

    #[wasm_bindgen(method, js_class = "JSONEditor", js_name = updateProps)]
    fn update_props(this: &JsonEditorHandle, props: &JsValue);

    #[wasm_bindgen(method, js_class = "JSONEditor")]
    fn destroy(this: &JsonEditorHandle);
}

pub(super) fn editor_available() -> bool {
    web_sys::window()
        .and_then(|w| w.get(EDITOR_GLOBAL))
        .is_some()
}

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn text_content(text: &str) -> Result<js_sys::Object, JsValue> {
    let content = js_sys::Object::new();
    set(&content, "text", &JsValue::from_str(text))?;
    Ok(content)
}

/// Reads an editor content object: `{ json }` wins over `{ text }`.
pub(super) fn read_content(content: &JsValue) -> Option<EditorContent> {
    let json = js_sys::Reflect::get(content, &"json".into()).ok()?;
    if !json.is_undefined() {
        let text = js_sys::JSON::stringify(&json).ok().map(String::from)?;
        return serde_json::from_str(&text).ok().map(EditorContent::Json);
    }
    js_sys::Reflect::get(content, &"text".into())
        .ok()?
        .as_string()
        .map(EditorContent::Text)
}

/// A live editor plus the change listener it calls into.
pub(super) struct MountedEditor {
    handle: JsonEditorHandle,
    _on_change: Closure<dyn FnMut(JsValue)>,
}

impl MountedEditor {
    pub fn mount(
        target: &web_sys::HtmlElement,
        text: &str,
        mut on_change: impl FnMut(EditorContent) + 'static,
    ) -> Result<Self, JsValue> {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |content: JsValue| {
            match read_content(&content) {
                Some(c) => on_change(c),
                None => log::warn!("json editor reported unreadable content"),
            }
        });

        let props = js_sys::Object::new();
        set(&props, "content", &JsValue::from(text_content(text)?))?;
        set(&props, "readOnly", &JsValue::FALSE)?;
        set(&props, "onChange", listener.as_ref())?;

        let options = js_sys::Object::new();
        set(&options, "target", target)?;
        set(&options, "props", &props)?;

        let handle = JsonEditorHandle::new(&options)?;
        Ok(Self {
            handle,
            _on_change: listener,
        })
    }

    pub fn set_text(&self, text: &str) {
        match text_content(text) {
            Ok(content) => {
                let props = js_sys::Object::new();
                if set(&props, "content", &content).is_ok() {
                    self.handle.update_props(&props);
                }
            }
            Err(e) => log::error!("failed to build editor content: {e:?}"),
        }
    }

    pub fn destroy(self) {
        log::debug!("destroy json editor");
        self.handle.destroy();
    }
}
