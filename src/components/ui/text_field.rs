use leptos::prelude::*;
use tw_merge::tw_merge;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input flex h-8 w-full min-w-0 rounded-md border bg-transparent px-2 py-1 text-sm shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50";

/// Controlled text input: shows `value`, reports every keystroke.
///
/// NOTE: no `bind:value`; the displayed value follows the store's answer, not
/// the local keystroke.
#[component]
pub fn TextField(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        FIELD_CLASS,
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    view! {
        <input
            data-name="TextField"
            type="text"
            class=merged_class
            placeholder=placeholder
            name=name
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Native `<select>` over a fixed list of string options.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into)] value: Signal<String>,
    options: Vec<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "pr-6", class);

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            name=name
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {options
                .into_iter()
                .map(|opt| {
                    let label = opt.clone();
                    view! { <option value=opt>{label}</option> }
                })
                .collect_view()}
        </select>
    }
}
