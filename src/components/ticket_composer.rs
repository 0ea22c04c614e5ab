//! Ticket Composer Component
//!
//! Third wizard step: a 280×280 stage with the generated background, the QR
//! code for the target URL and free text labels. The QR image can be moved
//! and, once selected, resized from its corner handles; labels can be moved,
//! selected, recoloured and deleted.

use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, click_allowed, create_drag_signals, make_on_mousedown, offset_for};

use super::create_wizard::WizardContext;
use crate::canvas::render_ticket_png;
use crate::composer::{Corner, StageElement, STAGE_SIZE};
use crate::context::{use_app_context, ToastKind};
use crate::qr::{qr_data_url, QrError};

#[component]
pub fn TicketComposer(
    wizard: WizardContext,
    /// True while the finished ticket is being uploaded
    #[prop(into)] submitting: Signal<bool>,
    /// Receives the flattened PNG
    #[prop(into)] on_submit: Callback<Vec<u8>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let form = wizard.form;
    let composer = wizard.composer;

    let drag = create_drag_signals::<StageElement>();
    bind_global_mouseup(drag, move |element: StageElement, dx, dy| {
        tracing::debug!(?element, dx, dy, "drag ended");
        composer.try_update(|state| state.apply_drag(element, dx as f64, dy as f64));
    });

    let background_ref = NodeRef::<html::Img>::new();
    let qr_ref = NodeRef::<html::Img>::new();

    // Re-encoded whenever the target URL changes
    let qr_image = Memo::new(move |_| {
        let value = form.with(|f| f.shorten_url.clone());
        match qr_data_url(&value) {
            Ok(url) => Some(url),
            Err(QrError::Empty) => None,
            Err(e) => {
                tracing::error!(error = %e, "failed to render QR code");
                None
            }
        }
    });

    let qr_style = move || {
        let dragging = drag.dragging_read.get();
        let (dx, dy) = drag.offset_read.get();
        let qr = composer.with(|s| s.preview_qr(dragging, dx as f64, dy as f64));
        format!(
            "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
            qr.x, qr.y, qr.size, qr.size
        )
    };

    let toggle_qr = move |_| {
        if click_allowed(drag) {
            composer.update(|s| s.toggle_qr_selected());
        }
    };

    let add_text = move |_| {
        let title = form.with_untracked(|f| f.title.clone());
        let id = composer.try_update(|s| s.add_text(&title));
        tracing::debug!(?id, "text added");
    };

    let delete_text = move |_| {
        composer.update(|s| {
            s.delete_selected_text();
        });
    };

    let submit = move |_| {
        let state = composer.get_untracked();
        let background = background_ref.get_untracked();
        let qr = qr_ref.get_untracked();
        match render_ticket_png(background.as_ref(), qr.as_ref(), &state) {
            Ok(bytes) => on_submit.run(bytes),
            Err(e) => {
                tracing::error!(error = ?e, "failed to export ticket image");
                ctx.notify(ToastKind::Error, "티켓 이미지를 만들 수 없습니다.");
            }
        }
    };

    let stage_style = format!("position: relative; width: {0}px; height: {0}px;", STAGE_SIZE);

    view! {
        <div class="ticket-composer">
            <p class="composer-subtitle">"QR의 위치를 선택해주세요."</p>

            <div class="composer-toolbar">
                <button type="button" class="tool-btn" title="title 추가" on:click=add_text>
                    "텍스트 추가"
                </button>
                <button
                    type="button"
                    class="tool-btn"
                    title="텍스트를 클릭하면 삭제버튼이 활성화됩니다."
                    disabled=move || composer.with(|s| s.selected_text.is_none())
                    on:click=delete_text
                >
                    "텍스트 삭제"
                </button>
                <input
                    type="color"
                    class="color-picker"
                    title="텍스트 색상"
                    prop:value=move || composer.with(|s| s.color.clone())
                    on:input=move |ev| {
                        let color = event_target_value(&ev);
                        composer.update(|s| s.change_color(&color));
                    }
                />
            </div>

            <div class="stage" style=stage_style>
                <Show when=move || form.with(|f| !f.background_image_url.is_empty())>
                    <img
                        node_ref=background_ref
                        class="stage-background"
                        crossorigin="anonymous"
                        alt="background"
                        draggable="false"
                        src=move || form.with(|f| f.background_image_url.clone())
                        on:click=toggle_qr
                    />
                </Show>

                <Show when=move || qr_image.with(|q| q.is_some())>
                    <div class="qr-box" class:selected=move || composer.with(|s| s.qr_selected) style=qr_style>
                        <img
                            node_ref=qr_ref
                            class="stage-qr"
                            alt="QR"
                            draggable="false"
                            src=move || qr_image.get().unwrap_or_default()
                            on:mousedown=make_on_mousedown(drag, StageElement::Qr)
                            on:click=toggle_qr
                        />
                        <Show when=move || composer.with(|s| s.qr_selected)>
                            {Corner::ALL.iter().map(|corner| {
                                let corner = *corner;
                                view! {
                                    <div
                                        class=corner.css_class()
                                        on:mousedown=make_on_mousedown(drag, StageElement::Handle(corner))
                                    ></div>
                                }
                            }).collect_view()}
                        </Show>
                    </div>
                </Show>

                <For
                    each=move || composer.with(|s| s.text_nodes.iter().map(|n| n.id).collect::<Vec<_>>())
                    key=|id| *id
                    children=move |id| {
                        let node = move || composer.with(|s| s.text_nodes.iter().find(|n| n.id == id).cloned());
                        let style = move || {
                            let (dx, dy) = offset_for(drag, StageElement::Text(id));
                            node().map(|n| format!(
                                "position: absolute; left: {}px; top: {}px; font-size: {}px; color: {};",
                                n.x + dx as f64, n.y + dy as f64, n.font_size, n.color
                            )).unwrap_or_default()
                        };
                        view! {
                            <span
                                class="stage-text"
                                class:selected=move || composer.with(|s| s.selected_text == Some(id))
                                class:editing=move || node().is_some_and(|n| n.is_editing)
                                style=style
                                on:mousedown=make_on_mousedown(drag, StageElement::Text(id))
                                on:click=move |_| {
                                    if click_allowed(drag) {
                                        composer.update(|s| s.select_text(id));
                                    }
                                }
                                on:dblclick=move |_| composer.update(|s| s.toggle_text_editing(id))
                            >
                                {move || node().map(|n| n.text).unwrap_or_default()}
                            </span>
                        }
                    }
                />
            </div>

            <button
                type="button"
                class="primary-btn submit-btn"
                disabled=move || submitting.get()
                on:click=submit
            >
                {move || if submitting.get() { "생성 중..." } else { "4Q 생성" }}
            </button>
        </div>
    }
}
