//! Ticket Result Component
//!
//! Shows a freshly created ticket with its short link and a download button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, Page};
use crate::download::download_ticket;
use crate::models::TicketInfo;
use crate::session::{clear_form_data, BrowserSession};

/// Short link to show under the ticket, if the server returned one
fn share_link(ticket: &TicketInfo) -> Option<String> {
    let link = ticket.shorten_url.trim();
    (!link.is_empty()).then(|| link.to_string())
}

#[component]
pub fn TicketResult(ticket_id: i64) -> impl IntoView {
    let ctx = use_app_context();
    let (info, set_info) = signal(None::<TicketInfo>);
    let (failed, set_failed) = signal(false);

    Effect::new(move |_| {
        spawn_local(async move {
            match ctx.api().get_ticket_info(ticket_id).await {
                Ok(ticket) => {
                    set_info.try_set(Some(ticket));
                }
                Err(e) => {
                    tracing::error!(ticket_id, error = %e, "failed to load ticket");
                    set_failed.try_set(true);
                }
            }
        });
    });

    let download = move |_| {
        let Some(ticket) = info.get_untracked() else {
            return;
        };
        spawn_local(async move {
            download_ticket(&ctx.api(), Some(&ticket.ticket_url), &ticket.title).await;
        });
    };

    let start_over = move |_| {
        clear_form_data(&BrowserSession);
        ctx.navigate(Page::Create);
    };

    view! {
        <div class="ticket-result">
            <h2 class="page-title">"4Q 생성 완료"</h2>
            <Show
                when=move || info.with(|i| i.is_some())
                fallback=move || view! {
                    <div class="loading">
                        {move || if failed.get() { "티켓 정보를 가져오는데 실패했습니다." } else { "Loading..." }}
                    </div>
                }
            >
                {move || info.get().map(|ticket| {
                    let link = share_link(&ticket);
                    view! {
                        <div class="result-card">
                            <img class="result-image" alt="4Q ticket" src=ticket.ticket_url.clone() />
                            <div class="result-title">{ticket.title.clone()}</div>
                            {link.map(|link| {
                                let href = link.clone();
                                view! { <a class="result-link" href=href target="_blank" rel="noopener">{link}</a> }
                            })}
                        </div>
                    }
                })}
            </Show>

            <div class="result-actions">
                <button class="primary-btn" disabled=move || info.with(|i| i.is_none()) on:click=download>
                    "다운로드"
                </button>
                <button class="secondary-btn" on:click=move |_| ctx.navigate(Page::MyTickets)>"내 4Q"</button>
                <button class="secondary-btn" on:click=start_over>"새로 만들기"</button>
            </div>
        </div>
    }
}
