use icons::ChevronDown;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {Accordion, div, "flex flex-col gap-2 mt-3"}
    clx! {AccordionContent, div, "px-1 pb-3"}
}

pub use components::*;

/// Collapsible section backed by `<details>`, expanded on first render.
#[component]
pub fn AccordionItem(
    #[prop(into)] title: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let merged_class = tw_merge!("group rounded-md border", class);

    view! {
        <details data-name="AccordionItem" class=merged_class open=true>
            <summary class="flex cursor-pointer select-none items-center justify-between px-3 py-2 text-sm font-medium">
                {title}
                <ChevronDown class="size-4 transition-transform group-open:rotate-180" />
            </summary>
            <AccordionContent>{children()}</AccordionContent>
        </details>
    }
}
