//! Tag Select Modal
//!
//! Pick up to three style tags, grouped by category. Picking past the limit
//! keeps the selection and shows a warning until something is removed.

use leptos::prelude::*;

use crate::tags::{max_tags_warning, TagCategory, TagSelection};

#[component]
pub fn TagSelectModal(
    /// Tags already chosen (labels)
    selected: Vec<String>,
    #[prop(into)] on_select: Callback<Vec<String>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let selection = RwSignal::new(TagSelection::from_selected(&selected));

    let confirm = move |_| {
        let tags = selection.get_untracked().into_tags();
        tracing::debug!(?tags, "tags confirmed");
        on_select.run(tags);
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal tag-select-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <span class="modal-title">"태그 선택"</span>
                    <span class="tag-count">
                        {move || selection.with(|s| s.len())} " / " {crate::tags::MAX_TAGS}
                    </span>
                    <button class="modal-close" on:click=move |_| on_close.run(())>"✕"</button>
                </div>

                <Show when=move || selection.with(|s| s.warning())>
                    <div class="alert warning">{max_tags_warning()}</div>
                </Show>

                {TagCategory::ALL.iter().map(|category| {
                    view! {
                        <div class="tag-list">
                            <div class="tag-list-title">{category.title()}</div>
                            <div class="tag-item-container">
                                {category.tags().iter().map(|def| {
                                    let label = def.label;
                                    view! {
                                        <div
                                            class="tag-item"
                                            class:selected=move || selection.with(|s| s.contains_label(label))
                                            on:click=move |_| selection.update(|s| s.toggle(label))
                                        >
                                            {def.hot.then(|| view! { <span class="hot-mark">"HOT"</span> })}
                                            {label}
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </div>
                    }
                }).collect_view()}

                <div class="btn-container">
                    <button class="primary-btn" on:click=confirm>"선택 완료"</button>
                </div>
            </div>
        </div>
    }
}
