//! 4Q Frontend App
//!
//! Root component: provides the app context and store, restores the signed-in
//! user and switches between pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use rolling_logger::RollingBuffer;

use crate::components::{AccountBar, AccountPage, CreateWizard, MyTickets, TicketResult, ToastHost};
use crate::config::AppConfig;
use crate::context::{AppContext, Page};
use crate::session;
use crate::store::{store_set_user, AppState};

#[component]
pub fn App(config: AppConfig, logs: Option<Arc<RollingBuffer>>) -> impl IntoView {
    let ctx = AppContext::new(config, logs);
    provide_context(ctx);

    let store = Store::new(AppState::default());
    provide_context(store);

    // Restore the user on mount; an expired token gets one refresh attempt
    Effect::new(move |_| {
        spawn_local(async move {
            let api = ctx.api();
            if session::access_token(api.session()).is_none() {
                return;
            }

            let mut user = api.user_info().await;
            if user.is_none() && api.refresh_access_token().await.is_some() {
                user = api.user_info().await;
            }
            tracing::debug!(signed_in = user.is_some(), "session restored");
            store_set_user(&store, user);
        });
    });

    view! {
        <div class="app-layout">
            <AccountBar />

            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Create => view! { <CreateWizard /> }.into_any(),
                    Page::TicketResult(id) => view! { <TicketResult ticket_id=id /> }.into_any(),
                    Page::MyTickets => view! { <MyTickets /> }.into_any(),
                    Page::Account => view! { <AccountPage /> }.into_any(),
                }}
            </main>

            <ToastHost />
        </div>
    }
}
