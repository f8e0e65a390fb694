use crate::config::EnvConfig;
use crate::host::HostSdk;
use crate::json_editor::JsonEditorField;
use crate::links::LinksEditor;
use crate::metadata::{MetadataClient, MetadataExtractor};
use crate::util::last_path_segment;
use leptos::prelude::*;
use leptos_router::components::Router;
use leptos_router::hooks::use_location;
use strum::{AsRefStr, EnumString};

/// Window event the embedding page fires once the host SDK global is set.
const SDK_READY_EVENT: &str = "sdk-ready";

/// Which widget a location mounts, chosen by the last path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum MountTarget {
    TextToJsonEditor,
    LinksEditor,
    YoutubeExtractor,
}

impl MountTarget {
    pub fn from_path(path: &str) -> Result<Self, String> {
        let segment = last_path_segment(path);
        segment.parse().map_err(|_| segment.to_string())
    }
}

#[component]
pub fn App() -> impl IntoView {
    let sdk = HostSdk::from_env();
    let sdk_ready = RwSignal::new(sdk.is_available());

    if !sdk_ready.get_untracked() {
        let handle = window_event_listener_untyped(SDK_READY_EVENT, move |_| {
            log::debug!("host sdk ready");
            sdk_ready.set(true);
        });
        on_cleanup(move || handle.remove());
    }

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - `use_location()` requires a <Router> context.
    view! {
        <Router>
            <Show
                when=move || sdk_ready.get()
                fallback=|| view! { <p class="px-4 py-8 text-xs text-muted-foreground">"Connecting to host..."</p> }
            >
                <FieldLocation />
            </Show>
        </Router>
    }
}

#[component]
fn FieldLocation() -> impl IntoView {
    let sdk = HostSdk::from_env();
    if let Err(e) = sdk.start_auto_resizer() {
        log::warn!("auto resizer not started: {e}");
    }

    let location = use_location();
    let target = Memo::new(move |_| MountTarget::from_path(&location.pathname.get()));

    move || {
        let sdk = sdk.clone();
        match target.get() {
            Ok(MountTarget::TextToJsonEditor) => {
                view! { <JsonEditorField bridge=sdk.field() /> }.into_any()
            }
            Ok(MountTarget::LinksEditor) => view! { <LinksEditor bridge=sdk.field() /> }.into_any(),
            Ok(MountTarget::YoutubeExtractor) => {
                let client = MetadataClient::new(EnvConfig::new().metadata_api_url);
                view! { <MetadataExtractor bridge=sdk.field() entry=sdk.entry() client=client /> }
                    .into_any()
            }
            Err(segment) => {
                let app_id = sdk.app_id().unwrap_or_default();
                view! {
                    <p class="px-4 py-8 text-sm">
                        {format!("Did not yet implement (AppId: {app_id}), location: {segment}")}
                    </p>
                }
                .into_any()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_locations() {
        assert_eq!(
            MountTarget::from_path("/field/text-to-json-editor"),
            Ok(MountTarget::TextToJsonEditor)
        );
        assert_eq!(MountTarget::from_path("/links-editor/"), Ok(MountTarget::LinksEditor));
        assert_eq!(
            MountTarget::from_path("/a/b/youtube-extractor"),
            Ok(MountTarget::YoutubeExtractor)
        );
    }

    #[test]
    fn test_unknown_location_reports_segment() {
        assert_eq!(
            MountTarget::from_path("/field/color-picker"),
            Err("color-picker".to_string())
        );
        assert_eq!(MountTarget::from_path("/"), Err(String::new()));
    }

    #[test]
    fn test_mount_target_names() {
        assert_eq!(MountTarget::LinksEditor.as_ref(), "links-editor");
    }
}
