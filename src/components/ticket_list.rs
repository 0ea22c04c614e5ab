//! Ticket List Component
//!
//! The signed-in user's tickets, each downloadable as a PNG.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, ToastKind};
use crate::download::download_ticket;
use crate::models::Ticket;
use crate::store::{store_has_no_tickets, store_set_tickets, store_set_tickets_loading, store_tickets, store_tickets_loading, use_app_store};

#[component]
pub fn MyTickets() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    Effect::new(move |_| {
        store_set_tickets_loading(&store, true);
        spawn_local(async move {
            match ctx.api().get_my_tickets().await {
                Ok(tickets) => {
                    tracing::debug!(count = tickets.len(), "tickets loaded");
                    store_set_tickets(&store, tickets);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load tickets");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
            store_set_tickets_loading(&store, false);
        });
    });

    let loading = move || store_tickets_loading(&store);
    let empty = move || store_has_no_tickets(&store);

    view! {
        <div class="my-tickets">
            <h2 class="page-title">"내 4Q"</h2>
            <Show when=loading>
                <div class="loading">"Loading..."</div>
            </Show>
            <Show when=empty>
                <div class="empty-state">"아직 생성한 4Q가 없습니다."</div>
            </Show>
            <ul class="ticket-list">
                <For
                    each=move || store_tickets(&store)
                    key=|ticket| ticket.id
                    children=|ticket| view! { <TicketListItem ticket=ticket /> }
                />
            </ul>
        </div>
    }
}

#[component]
fn TicketListItem(ticket: Ticket) -> impl IntoView {
    let ctx = use_app_context();
    let image_url = ticket.ticket_url.clone();
    let title = ticket.title.clone();

    let download = move |_| {
        let image_url = image_url.clone();
        let title = title.clone();
        spawn_local(async move {
            download_ticket(&ctx.api(), image_url.as_deref(), &title).await;
        });
    };

    view! {
        <li class="ticket-item">
            <div class="ticket-left">
                <img
                    class="ticket-thumb"
                    width="150"
                    height="150"
                    alt="my 4q tickets"
                    src=ticket.ticket_url.clone().unwrap_or_default()
                />
                <span class="ticket-title">{ticket.title.clone()}</span>
            </div>
            <div class="ticket-info">
                <span class="category-tag">{ticket.category.clone()}</span>
                <span class="ticket-date">"📅 " {ticket.formatted_date.clone()}</span>
                <a class="ticket-link" href=ticket.shorten_url.clone() target="_blank" rel="noopener">
                    {ticket.shorten_url.clone()}
                </a>
                <button class="download-btn" on:click=download>"다운로드"</button>
            </div>
        </li>
    }
}
