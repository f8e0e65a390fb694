use icons::Check;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Checkbox(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] aria_label: String,
    #[prop(into)] checked: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "peer inline-flex size-4 shrink-0 items-center justify-center rounded-[4px] border border-input shadow-xs outline-none transition-shadow focus-visible:ring-2 focus-visible:ring-ring/50 aria-checked:bg-primary aria-checked:border-primary aria-checked:text-primary-foreground",
        class
    );

    view! {
        <button
            data-name="Checkbox"
            type="button"
            role="checkbox"
            name=name
            aria-label=aria_label
            aria-checked=move || checked.get().to_string()
            class=merged_class
            on:click=move |_| on_toggle.run(())
        >
            <Show when=move || checked.get()>
                <Check class="size-3.5" />
            </Show>
        </button>
    }
}
