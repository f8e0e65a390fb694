use super::reorder::DropResult;
use super::{adopt, save_records, LinkEdit, LinkList};
use crate::components::ui::{
    Alert, AlertDescription, AlertTitle, Button, ButtonSize, ButtonVariant, Checkbox,
    NativeSelect, Table, TableBody, TableCell, TableHead, TableHeader, TableRow, TextField,
};
use crate::host::FieldBridge;
use crate::models::{LinkId, LinkRecord, LinkTarget};
use crate::util::now_ms;
use icons::{Check, Eye, GripVertical, Plus, Trash2, X};
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

/// Writes `records` and, once the store answers, replaces the list with the
/// stored value. A failed write leaves the list as it was.
fn commit<B: FieldBridge>(
    bridge: StoredValue<B>,
    list: RwSignal<LinkList>,
    records: Vec<LinkRecord>,
) {
    let bridge = bridge.get_value();
    spawn_local(async move {
        let outcome = save_records(&bridge, &records).await;
        list.update(|current| *current = adopt(current, outcome));
    });
}

#[component]
pub fn LinksEditor<B: FieldBridge>(bridge: B) -> impl IntoView {
    let loaded = LinkList::from_stored(bridge.load().as_deref());
    let bridge = StoredValue::new(bridge);

    let list = match loaded {
        Ok(list) => RwSignal::new(list),
        Err(e) => {
            // Mounting an empty editor here would let the next save overwrite
            // the unreadable value.
            log::error!("{e}");
            return view! {
                <Alert>
                    <AlertTitle>"Stored links could not be read"</AlertTitle>
                    <AlertDescription>{e.to_string()}</AlertDescription>
                </Alert>
            }
            .into_any();
        }
    };

    let dragging: RwSignal<Option<LinkId>> = RwSignal::new(None);

    let on_add = move |_: leptos::ev::MouseEvent| {
        let records = list.with_untracked(|l| l.with_added(l.next_id(now_ms())));
        commit(bridge, list, records);
    };

    let on_edit = Callback::new(move |(id, edit): (LinkId, LinkEdit)| {
        match list.with_untracked(|l| l.with_edit(id, edit)) {
            Some(records) => commit(bridge, list, records),
            None => log::debug!("edit for unknown link {id} ignored"),
        }
    });

    let on_delete = Callback::new(move |id: LinkId| {
        match list.with_untracked(|l| l.without(id)) {
            Some(records) => commit(bridge, list, records),
            None => log::debug!("delete for unknown link {id} ignored"),
        }
    });

    let on_arm = Callback::new(move |id: LinkId| list.update(|l| l.arm_delete(id)));
    let on_cancel = Callback::new(move |_: ()| list.update(|l| l.cancel_delete()));

    let on_drag_end = Callback::new(move |drop: DropResult| {
        match list.with_untracked(|l| l.with_drop(&drop)) {
            Some(records) => commit(bridge, list, records),
            None => log::debug!("drop left order unchanged"),
        }
    });

    view! {
        <Table>
            <TableHead>
                <TableRow>
                    <TableHeader>""</TableHeader>
                    <TableHeader>"Label"</TableHeader>
                    <TableHeader>"URL"</TableHeader>
                    <TableHeader>"target"</TableHeader>
                    <TableHeader>
                        <Eye class="size-4 text-muted-foreground" />
                    </TableHeader>
                    <TableHeader attr:style="width: 105px">""</TableHeader>
                </TableRow>
            </TableHead>
            <TableBody>
                <For
                    each=move || list.with(|l| l.records().iter().map(|r| r.id).collect::<Vec<_>>())
                    key=|id| *id
                    children=move |id| {
                        view! {
                            <LinkRow
                                id=id
                                list=list
                                dragging=dragging
                                on_edit=on_edit
                                on_arm=on_arm
                                on_cancel=on_cancel
                                on_delete=on_delete
                                on_drag_end=on_drag_end
                            />
                        }
                    }
                />
            </TableBody>
            <TableBody>
                <TableRow>
                    <TableCell attr:colspan="6">
                        <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_add>
                            <Plus class="size-5 text-primary" />
                            "Add"
                        </Button>
                    </TableCell>
                </TableRow>
            </TableBody>
        </Table>
    }
    .into_any()
}

#[component]
fn LinkRow(
    id: LinkId,
    list: RwSignal<LinkList>,
    dragging: RwSignal<Option<LinkId>>,
    on_edit: Callback<(LinkId, LinkEdit)>,
    on_arm: Callback<LinkId>,
    on_cancel: Callback<()>,
    on_delete: Callback<LinkId>,
    on_drag_end: Callback<DropResult>,
) -> impl IntoView {
    let record = Memo::new(move |_| list.with(|l| l.get(id).cloned()));
    let armed = move || list.with(|l| l.pending_delete().is_armed_for(id));

    let field = move |read: fn(&LinkRecord) -> String| {
        Signal::derive(move || record.with(|r| r.as_ref().map(read).unwrap_or_default()))
    };
    let label = field(|r| r.label.clone());
    let url = field(|r| r.url.clone());
    let target = field(|r| r.target.to_string());
    let visible = Signal::derive(move || record.with(|r| r.as_ref().is_some_and(|r| r.visible)));

    // Inputs are addressed by name, like the persisted record keys.
    let edit_input = move |name: &'static str| {
        Callback::new(move |value: String| match LinkEdit::from_input(name, &value) {
            Some(edit) => on_edit.run((id, edit)),
            None => log::debug!("ignoring `{name}` value {value:?}"),
        })
    };

    let toggle_visible = edit_input("visible");
    let target_options = LinkTarget::iter().map(|t| t.to_string()).collect::<Vec<_>>();

    view! {
        <tr
            class=move || {
                if dragging.get() == Some(id) {
                    "border-b opacity-50"
                } else {
                    "border-b transition-colors hover:bg-muted/50"
                }
            }
            draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| {
                dragging.set(Some(id));
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &id.to_string());
                    dt.set_effect_allowed("move");
                }
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(dt) = ev.data_transfer() {
                    dt.set_drop_effect("move");
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                let Some(dragged) = dragging.get_untracked() else {
                    return;
                };
                dragging.set(None);
                match list.with_untracked(|l| l.drop_of(dragged, Some(id))) {
                    Some(drop) => on_drag_end.run(drop),
                    None => log::debug!("dragged link {dragged} is gone"),
                }
            }
            on:dragend=move |_: web_sys::DragEvent| {
                // Still set only when the drop landed outside every row.
                if let Some(dragged) = dragging.get_untracked() {
                    dragging.set(None);
                    if let Some(drop) = list.with_untracked(|l| l.drop_of(dragged, None)) {
                        on_drag_end.run(drop);
                    }
                }
            }
        >
            <TableCell>
                <span class="cursor-grab text-muted-foreground" title="Move">
                    <GripVertical class="size-4" />
                </span>
            </TableCell>
            <TableCell>
                <TextField name="label" placeholder="Label" value=label on_input=edit_input("label") />
            </TableCell>
            <TableCell>
                <TextField name="url" placeholder="url" value=url on_input=edit_input("url") />
            </TableCell>
            <TableCell>
                <NativeSelect
                    name="target"
                    value=target
                    options=target_options
                    on_change=edit_input("target")
                />
            </TableCell>
            <TableCell attr:style="vertical-align: middle; text-align: center">
                <Checkbox
                    name="visible"
                    aria_label="Visible"
                    checked=visible
                    on_toggle=Callback::new(move |_: ()| toggle_visible.run(String::new()))
                />
            </TableCell>
            <TableCell attr:style="text-align: right">
                {move || {
                    if armed() {
                        view! {
                            <div class="flex justify-end gap-1">
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    class="text-destructive"
                                    attr:aria-label="Confirm Delete"
                                    on:click=move |_| on_delete.run(id)
                                >
                                    <Check />
                                </Button>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    class="text-success"
                                    attr:aria-label="Cancel Delete"
                                    on:click=move |_| on_cancel.run(())
                                >
                                    <X />
                                </Button>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                class="text-destructive"
                                attr:aria-label="Delete"
                                on:click=move |_| on_arm.run(id)
                            >
                                <Trash2 />
                            </Button>
                        }
                        .into_any()
                    }
                }}
            </TableCell>
        </tr>
    }
}
