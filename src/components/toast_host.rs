//! Toast Host Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Renders queued toasts; a click dismisses one early
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-host">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() on:click=move |_| ctx.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
