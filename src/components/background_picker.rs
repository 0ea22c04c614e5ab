//! Background Picker Component
//!
//! Second wizard step: choose a category and up to three tags, then ask the
//! image API for a background.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::category_selector::CategorySelector;
use super::create_wizard::WizardContext;
use super::tag_select_modal::TagSelectModal;
use crate::context::{use_app_context, ToastKind};
use crate::tags::label_for_value;

#[component]
pub fn BackgroundPicker(wizard: WizardContext) -> impl IntoView {
    let ctx = use_app_context();
    let form = wizard.form;
    let (modal_open, set_modal_open) = signal(false);
    let (generating, set_generating) = signal(false);

    let on_category = move |category: String| {
        form.update(|f| f.category = category);
        wizard.persist();
    };

    let on_tags = move |tags: Vec<String>| {
        form.update(|f| f.tags = tags);
        wizard.persist();
        set_modal_open.set(false);
    };

    let generate = move |_| {
        let (category, tags) = form.with_untracked(|f| (f.category.clone(), f.tags.clone()));
        if category.is_empty() {
            ctx.notify(ToastKind::Warning, "카테고리를 선택해주세요.");
            return;
        }

        set_generating.set(true);
        spawn_local(async move {
            match ctx.api().generate_photo_image(&category, &tags).await {
                Ok(image) => {
                    tracing::info!(id = image.id, "background generated");
                    form.try_update(|f| {
                        f.background_image_url = image.image_url;
                        f.background_image_id = Some(image.id);
                    });
                    wizard.persist();
                }
                Err(e) => {
                    tracing::error!(error = %e, "background generation failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
            set_generating.try_set(false);
        });
    };

    let has_background = move || form.with(|f| !f.background_image_url.is_empty());

    view! {
        <div class="background-picker">
            <div class="picker-section">
                <div class="section-title">"카테고리"</div>
                <CategorySelector
                    current=Signal::derive(move || form.with(|f| f.category.clone()))
                    on_change=on_category
                />
            </div>

            <div class="picker-section">
                <div class="section-title">"태그"</div>
                <div class="selected-tags">
                    <For
                        each=move || form.with(|f| f.tags.clone())
                        key=|tag| tag.clone()
                        children=move |tag| view! { <span class="tag-chip">{label_for_value(&tag).to_string()}</span> }
                    />
                    <button type="button" class="tag-select-btn" on:click=move |_| set_modal_open.set(true)>
                        "태그 선택"
                    </button>
                </div>
            </div>

            <button
                type="button"
                class="generate-btn"
                disabled=move || generating.get()
                on:click=generate
            >
                {move || if generating.get() { "생성 중..." } else { "배경 생성" }}
            </button>

            <div class="background-preview">
                <Show
                    when=has_background
                    fallback=|| view! { <div class="preview-empty">"생성된 배경이 여기에 표시됩니다."</div> }
                >
                    <img
                        class="preview-image"
                        alt="background"
                        src=move || form.with(|f| f.background_image_url.clone())
                    />
                </Show>
            </div>

            <Show when=move || modal_open.get()>
                <TagSelectModal
                    selected=form.with_untracked(|f| f.tags.clone())
                    on_select=on_tags
                    on_close=move |_| set_modal_open.set(false)
                />
            </Show>
        </div>
    }
}
