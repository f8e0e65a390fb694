use super::{apply_to_entry, embed_url, extract_video_id, ExtractorPhase, MetadataClient};
use crate::components::ui::{
    Accordion, AccordionItem, Button, ButtonSize, ButtonVariant, Spinner, Table, TableBody,
    TableCell, TableHead, TableHeader, TableRow, TextField,
};
use crate::host::{EntryFieldWriter, FieldBridge};
use crate::models::{EntryField, VideoMetadata};
use crate::rich_text::text_lines;
use icons::Settings;
use leptos::prelude::*;
use leptos::task::spawn_local;

const PLAYER_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Fire-and-forget write of one sibling field.
fn set_entry_field<W: EntryFieldWriter>(
    entry: StoredValue<W>,
    field: EntryField,
    metadata: VideoMetadata,
) {
    let entry = entry.get_value();
    spawn_local(async move {
        match apply_to_entry(&entry, field, &metadata).await {
            Ok(true) => log::info!("set `{field}` on entry"),
            Ok(false) => log::debug!("nothing to set for `{field}`"),
            Err(e) => log::error!("failed to set `{field}`: {e}"),
        }
    });
}

#[component]
pub fn MetadataExtractor<B: FieldBridge, W: EntryFieldWriter>(
    bridge: B,
    entry: W,
    client: MetadataClient,
) -> impl IntoView {
    let link = RwSignal::new(bridge.load().unwrap_or_default());
    let bridge = StoredValue::new(bridge);
    let entry = StoredValue::new(entry);
    let client = StoredValue::new(client);

    let fetching = RwSignal::new(false);
    let metadata: RwSignal<Option<VideoMetadata>> = RwSignal::new(None);
    // Only the latest fetch may write its result.
    let fetch_seq = RwSignal::new(0u64);

    let video_id = Memo::new(move |_| extract_video_id(&link.get()));
    let phase = Memo::new(move |_| {
        ExtractorPhase::derive(&link.get(), fetching.get(), metadata.get().as_ref())
    });

    let on_link_input = Callback::new(move |value: String| {
        let bridge = bridge.get_value();
        spawn_local(async move {
            match bridge.save(value).await {
                Ok(stored) => link.set(stored.unwrap_or_default()),
                Err(e) => log::error!("failed to store link: {e}"),
            }
        });
    });

    let on_fetch = move |_: leptos::ev::MouseEvent| {
        let Some(id) = phase.with_untracked(|p| p.video_id().map(str::to_string)) else {
            return;
        };
        let seq = fetch_seq.get_untracked() + 1;
        fetch_seq.set(seq);
        fetching.set(true);

        let client = client.get_value();
        spawn_local(async move {
            let result = client.fetch(&id).await;
            if fetch_seq.get_untracked() != seq {
                log::debug!("dropping stale metadata for {id}");
                return;
            }
            match result {
                Ok(m) => metadata.set(Some(m)),
                Err(e) => log::error!("{e}"),
            }
            fetching.set(false);
        });
    };

    let busy = move || matches!(phase.get(), ExtractorPhase::Fetching { .. });
    let loaded = move || match phase.get() {
        ExtractorPhase::Loaded { metadata, .. } => Some(metadata),
        _ => None,
    };

    view! {
        <div class="flex flex-col">
            <TextField value=link on_input=on_link_input placeholder="Video link" />
            <Show when=move || video_id.with(Option::is_some)>
                <Accordion>
                    <AccordionItem title="Video preview">
                        <iframe
                            width="100%"
                            height="315"
                            src=move || video_id.get().map(|id| embed_url(&id)).unwrap_or_default()
                            title="Video player"
                            allow=PLAYER_ALLOW
                        />
                    </AccordionItem>
                    <AccordionItem title="Video content">
                        <Table attr:style="border: 1px solid #E7EBEE">
                            <TableHead>
                                <TableRow>
                                    <TableHeader attr:style="width: 180px">"Field"</TableHeader>
                                    <TableHeader>""</TableHeader>
                                    <TableHeader attr:style="text-align: right">
                                        <Button
                                            variant=ButtonVariant::Success
                                            size=ButtonSize::Sm
                                            attr:disabled=busy
                                            on:click=on_fetch
                                        >
                                            "Fetch"
                                            {move || {
                                                if busy() {
                                                    view! { <Spinner /> }.into_any()
                                                } else {
                                                    view! { <Settings /> }.into_any()
                                                }
                                            }}
                                        </Button>
                                    </TableHeader>
                                </TableRow>
                            </TableHead>
                            {move || loaded().map(|m| view! { <MetadataRows metadata=m entry=entry /> })}
                        </Table>
                    </AccordionItem>
                </Accordion>
            </Show>
        </div>
    }
}

#[component]
fn MetadataRows<W: EntryFieldWriter>(metadata: VideoMetadata, entry: StoredValue<W>) -> impl IntoView {
    let metadata = StoredValue::new(metadata);
    let set = move |field: EntryField| move |_: leptos::ev::MouseEvent| {
        set_entry_field(entry, field, metadata.get_value())
    };

    let title = metadata.with_value(|m| m.title.clone());
    let title_shown = title.clone();
    let description_view = metadata
        .with_value(|m| text_lines(&m.description))
        .into_iter()
        .enumerate()
        .map(|(i, line)| view! { {(i > 0).then(|| view! { <br /> })} {line} })
        .collect_view();

    view! {
        <TableBody>
            <TableRow>
                <TableCell>
                    <p>"Friendly Name"</p>
                </TableCell>
                <TableCell>
                    <p>{title_shown}</p>
                </TableCell>
                <TableCell attr:style="text-align: right">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=set(EntryField::FriendlyName)
                    >
                        "Set"
                    </Button>
                </TableCell>
            </TableRow>
            <TableRow>
                <TableCell>
                    <p>"Name"</p>
                </TableCell>
                <TableCell>
                    <p>{title}</p>
                </TableCell>
                <TableCell attr:style="text-align: right">
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=set(EntryField::Name)>
                        "Set"
                    </Button>
                </TableCell>
            </TableRow>
            <TableRow>
                <TableCell>
                    <p>"Description"</p>
                </TableCell>
                <TableCell>
                    <div style="word-break: break-word">
                        <p>{description_view}</p>
                    </div>
                </TableCell>
                <TableCell attr:style="text-align: right">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=set(EntryField::Description)
                    >
                        "Set"
                    </Button>
                </TableCell>
            </TableRow>
        </TableBody>
    }
}
