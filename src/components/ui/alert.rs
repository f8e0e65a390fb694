use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm", "border-destructive/30"}
    clx! {AlertTitle, h4, "mb-1 font-medium tracking-tight leading-none text-destructive"}
    clx! {AlertDescription, p, "text-sm text-destructive [&_p]:leading-relaxed"}
}

pub use components::*;
