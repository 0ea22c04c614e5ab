//! Account Bar Component
//!
//! Top navigation with the signed-in user's nickname and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, Page, ToastKind};
use crate::store::{store_sign_out, store_signed_in, store_user, use_app_store};

#[component]
pub fn AccountBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let signed_in = move || store_signed_in(&store);
    let nickname = move || store_user(&store).map(|u| u.nickname).unwrap_or_default();

    let logout = move |_| {
        spawn_local(async move {
            match ctx.api().logout().await {
                Ok(()) => {
                    tracing::info!("signed out");
                    store_sign_out(&store);
                    ctx.notify(ToastKind::Success, "로그아웃 되었습니다.");
                    ctx.navigate(Page::Create);
                }
                Err(e) => {
                    tracing::error!(error = %e, "logout failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
        });
    };

    let nav_class = move |page: Page| {
        move || if ctx.page.get() == page { "nav-btn active" } else { "nav-btn" }
    };

    view! {
        <header class="account-bar">
            <span class="brand" on:click=move |_| ctx.navigate(Page::Create)>"4Q"</span>
            <nav class="nav">
                <button class=nav_class(Page::Create) on:click=move |_| ctx.navigate(Page::Create)>
                    "4Q 만들기"
                </button>
                <Show when=signed_in>
                    <button class=nav_class(Page::MyTickets) on:click=move |_| ctx.navigate(Page::MyTickets)>
                        "내 4Q"
                    </button>
                </Show>
            </nav>
            <div class="account">
                <Show
                    when=signed_in
                    fallback=move || view! {
                        <button class="nav-btn" on:click=move |_| ctx.navigate(Page::Account)>"로그인"</button>
                    }
                >
                    <button class="nickname" on:click=move |_| ctx.navigate(Page::Account)>{nickname}</button>
                    <button class="nav-btn" on:click=logout>"로그아웃"</button>
                </Show>
            </div>
        </header>
    }
}
