//! Info Form Component
//!
//! First wizard step: the URL the QR code points at and the ticket title.
//! The wizard's primary button submits this form through its id.

use leptos::prelude::*;

use crate::models::FormData;
use crate::wizard::validate_info;

/// DOM id the wizard's submit button targets
pub const INFO_FORM_ID: &str = "info-form";

#[component]
pub fn InfoForm(
    form: RwSignal<FormData>,
    /// Called after the input validated and was written into `form`
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let (url, set_url) = signal(form.with_untracked(|f| f.url.clone()));
    let (title, set_title) = signal(form.with_untracked(|f| f.title.clone()));
    let (error, set_error) = signal(None::<&'static str>);

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let url_value = url.get_untracked().trim().to_string();
        let title_value = title.get_untracked().trim().to_string();

        if let Err(e) = validate_info(&url_value, &title_value) {
            tracing::debug!(error = ?e, "info form rejected");
            set_error.set(Some(e.message()));
            return;
        }
        set_error.set(None);

        form.update(|f| {
            // No shortening service yet: the QR encodes the URL itself
            f.shorten_url = url_value.clone();
            f.shorten_url_id = None;
            f.url = url_value;
            f.title = title_value;
        });
        on_submit.run(());
    };

    view! {
        <form id=INFO_FORM_ID class="info-form" on:submit=handle_submit>
            <label class="form-label" for="info-url">"URL"</label>
            <input
                id="info-url"
                type="text"
                class="form-input"
                placeholder="https://"
                prop:value=move || url.get()
                on:input=move |ev| set_url.set(event_target_value(&ev))
            />

            <label class="form-label" for="info-title">"제목"</label>
            <input
                id="info-title"
                type="text"
                class="form-input"
                placeholder="티켓에 들어갈 제목"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />

            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </form>
    }
}
