mod bindings;

use crate::host::FieldBridge;
use bindings::MountedEditor;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thiserror::Error;

const EDITOR_HEIGHT_PX: u32 = 600;

#[derive(Debug, Error)]
pub(crate) enum JsonEditorError {
    #[error("editor text is not valid JSON: {0}")]
    InvalidText(#[from] serde_json::Error),
}

/// What the structured editor reports on change.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum EditorContent {
    Json(Value),
    Text(String),
}

/// Text shown before anything is stored: an empty object.
pub(crate) fn initial_text(stored: Option<String>) -> String {
    stored.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
        serde_json::to_string_pretty(&Value::Object(Default::default()))
            .unwrap_or_else(|_| "{}".to_string())
    })
}

/// Serializes editor content for the store.
///
/// Parsed JSON is used as is; text is parsed first. A `null` document is not
/// worth storing and yields `None`.
pub(crate) fn to_stored(content: EditorContent) -> Result<Option<String>, JsonEditorError> {
    let value = match content {
        EditorContent::Json(v) => v,
        EditorContent::Text(t) => serde_json::from_str(&t)?,
    };
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(&value)?))
}

/// The store's copy only needs to be pushed back when it drifted from what
/// the editor produced.
pub(crate) fn drifted(sent: &str, stored: Option<&str>) -> Option<String> {
    stored.filter(|s| *s != sent).map(str::to_string)
}

#[component]
pub fn JsonEditorField<B: FieldBridge>(bridge: B) -> impl IntoView {
    let text = RwSignal::new(initial_text(bridge.load()));
    let bridge = StoredValue::new(bridge);

    let on_change = Callback::new(move |content: EditorContent| {
        let value = match to_stored(content) {
            Ok(Some(v)) => v,
            Ok(None) => {
                log::debug!("skipping empty json document");
                return;
            }
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };

        let bridge = bridge.get_value();
        spawn_local(async move {
            match bridge.save(value.clone()).await {
                Ok(stored) => {
                    log::info!("Successfully updated value");
                    // The editor already shows what was sent; pushing identical
                    // text back would reset its cursor.
                    if let Some(normalized) = drifted(&value, stored.as_deref()) {
                        text.set(normalized);
                    }
                }
                Err(e) => log::error!("failed to store json: {e}"),
            }
        });
    });

    view! { <JsonEditor text=text on_change=on_change /> }
}

/// Hosts the page's structured JSON editor, or a plain textarea when the
/// editor script is not loaded.
#[component]
fn JsonEditor(
    #[prop(into)] text: Signal<String>,
    on_change: Callback<EditorContent>,
) -> impl IntoView {
    if !bindings::editor_available() {
        log::warn!("JSONEditor not found on page, using plain textarea");
        return view! {
            <textarea
                class="w-full rounded-md border border-input bg-transparent p-3 font-mono text-sm"
                style=format!("height: {EDITOR_HEIGHT_PX}px")
                spellcheck="false"
                prop:value=move || text.get()
                on:input=move |ev| on_change.run(EditorContent::Text(event_target_value(&ev)))
            />
        }
        .into_any();
    }

    let container: NodeRef<html::Div> = NodeRef::new();
    let editor = StoredValue::new_local(None::<MountedEditor>);

    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        let current = text.get();

        if editor.with_value(Option::is_some) {
            editor.with_value(|e| {
                if let Some(e) = e {
                    e.set_text(&current);
                }
            });
            return;
        }

        match MountedEditor::mount(&el, &current, move |c| on_change.run(c)) {
            Ok(mounted) => editor.set_value(Some(mounted)),
            Err(e) => log::error!("failed to create json editor: {e:?}"),
        }
    });

    on_cleanup(move || {
        editor.update_value(|e| {
            if let Some(mounted) = e.take() {
                mounted.destroy();
            }
        });
    });

    view! {
        <div
            class="svelte-jsoneditor-react flex flex-1"
            style=format!("height: {EDITOR_HEIGHT_PX}px")
            node_ref=container
        />
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryField;
    use serde_json::json;

    #[test]
    fn test_initial_text_defaults_to_empty_object() {
        assert_eq!(initial_text(None), "{}");
        assert_eq!(initial_text(Some(String::new())), "{}");
        assert_eq!(initial_text(Some(r#"{"a":1}"#.to_string())), r#"{"a":1}"#);
    }

    #[test]
    fn test_parsed_json_is_preferred() {
        let stored = to_stored(EditorContent::Json(json!({"b": [1, 2]}))).unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"b":[1,2]}"#));
    }

    #[test]
    fn test_text_is_parsed_and_compacted() {
        let stored = to_stored(EditorContent::Text("{\n  \"a\": true\n}".to_string())).unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"a":true}"#));
    }

    #[test]
    fn test_invalid_text_is_an_error() {
        assert!(to_stored(EditorContent::Text("{\"a\":".to_string())).is_err());
    }

    #[test]
    fn test_null_document_is_skipped() {
        assert_eq!(to_stored(EditorContent::Text("null".to_string())).unwrap(), None);
        assert_eq!(to_stored(EditorContent::Json(Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_drift_detection() {
        assert_eq!(drifted("{}", Some("{}")), None);
        assert_eq!(drifted("{}", None), None);
        assert_eq!(drifted(r#"{"a":1}"#, Some(r#"{"a":2}"#)).as_deref(), Some(r#"{"a":2}"#));
    }

    fn pretty(value: &str) -> String {
        let v: Value = serde_json::from_str(value).unwrap();
        serde_json::to_string_pretty(&v).unwrap()
    }

    #[test]
    fn test_store_normalization_is_reported_as_drift() {
        let field = MemoryField::default();
        field.rewrite_with(pretty);

        let sent = to_stored(EditorContent::Text(r#"{"a": 1}"#.to_string()))
            .unwrap()
            .unwrap();
        let stored = pollster::block_on(field.save(sent.clone())).unwrap();

        assert_eq!(
            drifted(&sent, stored.as_deref()).as_deref(),
            Some("{\n  \"a\": 1\n}")
        );
    }

    #[test]
    fn test_unchanged_store_value_is_not_pushed_back() {
        let field = MemoryField::default();
        let sent = to_stored(EditorContent::Json(json!({"a": 1}))).unwrap().unwrap();
        let stored = pollster::block_on(field.save(sent.clone())).unwrap();
        assert_eq!(drifted(&sent, stored.as_deref()), None);
    }
}
