//! Account Page Component
//!
//! Login, email-verified signup and nickname editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, Page, ToastKind};
use crate::store::{store_set_user, store_signed_in, store_user, use_app_store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountTab {
    Login,
    Signup,
}

/// Where a signup stands; registering needs a verified email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SignupStage {
    #[default]
    EnterEmail,
    CodeSent,
    Verified,
}

impl SignupStage {
    fn can_register(self, password: &str, nickname: &str) -> bool {
        self == SignupStage::Verified && !password.is_empty() && !nickname.trim().is_empty()
    }
}

#[component]
pub fn AccountPage() -> impl IntoView {
    let store = use_app_store();
    let (tab, set_tab) = signal(AccountTab::Login);

    let tab_class = move |t: AccountTab| move || if tab.get() == t { "tab-btn active" } else { "tab-btn" };

    view! {
        <div class="account-page">
            <Show
                when=move || store_signed_in(&store)
                fallback=move || view! {
                    <div class="account-tabs">
                        <button class=tab_class(AccountTab::Login) on:click=move |_| set_tab.set(AccountTab::Login)>
                            "로그인"
                        </button>
                        <button class=tab_class(AccountTab::Signup) on:click=move |_| set_tab.set(AccountTab::Signup)>
                            "회원가입"
                        </button>
                    </div>
                    {move || match tab.get() {
                        AccountTab::Login => view! { <LoginForm /> }.into_any(),
                        AccountTab::Signup => view! {
                            <SignupForm on_registered=move |_| set_tab.set(AccountTab::Login) />
                        }.into_any(),
                    }}
                }
            >
                <ProfileForm />
            </Show>
            <LogPanel />
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if email.trim().is_empty() || password.is_empty() {
            ctx.notify(ToastKind::Warning, "이메일과 비밀번호를 입력해주세요.");
            return;
        }

        set_busy.set(true);
        spawn_local(async move {
            let api = ctx.api();
            match api.login(email.trim(), &password).await {
                Ok(()) => {
                    store_set_user(&store, api.user_info().await);
                    ctx.notify(ToastKind::Success, "로그인 되었습니다.");
                    ctx.navigate(Page::Create);
                }
                Err(e) => {
                    tracing::error!(error = %e, "login failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
            set_busy.try_set(false);
        });
    };

    view! {
        <form class="account-form" on:submit=submit>
            <input
                type="email"
                class="form-input"
                placeholder="이메일"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                class="form-input"
                placeholder="비밀번호"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="primary-btn" disabled=move || busy.get()>"로그인"</button>
        </form>
    }
}

#[component]
fn SignupForm(#[prop(into)] on_registered: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (code, set_code) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (nickname, set_nickname) = signal(String::new());
    let (stage, set_stage) = signal(SignupStage::default());

    let request_code = move |_| {
        let email = email.get_untracked().trim().to_string();
        if email.is_empty() {
            ctx.notify(ToastKind::Warning, "이메일을 입력해주세요.");
            return;
        }
        spawn_local(async move {
            match ctx.api().request_email_verification(&email).await {
                Ok(message) => {
                    set_stage.try_set(SignupStage::CodeSent);
                    ctx.notify(ToastKind::Success, message);
                }
                Err(e) => {
                    tracing::error!(error = %e, "verification request failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
        });
    };

    let verify_code = move |_| {
        let email = email.get_untracked().trim().to_string();
        let code = code.get_untracked().trim().to_string();
        spawn_local(async move {
            match ctx.api().verify_email_code(&email, &code).await {
                Ok(()) => {
                    set_stage.try_set(SignupStage::Verified);
                    ctx.notify(ToastKind::Success, "이메일 인증이 완료되었습니다.");
                }
                Err(e) => {
                    tracing::error!(error = %e, "email verification failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
        });
    };

    let register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        let nickname = nickname.get_untracked().trim().to_string();
        if !stage.get_untracked().can_register(&password, &nickname) {
            ctx.notify(ToastKind::Warning, "이메일 인증 후 비밀번호와 닉네임을 입력해주세요.");
            return;
        }
        spawn_local(async move {
            match ctx.api().register(&email, &password, &nickname).await {
                Ok(()) => {
                    tracing::info!("registered");
                    ctx.notify(ToastKind::Success, "회원가입이 완료되었습니다.");
                    on_registered.run(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "registration failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
        });
    };

    view! {
        <form class="account-form" on:submit=register>
            <div class="input-row">
                <input
                    type="email"
                    class="form-input"
                    placeholder="이메일"
                    disabled=move || stage.get() == SignupStage::Verified
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <button type="button" class="secondary-btn" on:click=request_code>"인증 요청"</button>
            </div>
            <Show when=move || stage.get() == SignupStage::CodeSent>
                <div class="input-row">
                    <input
                        type="text"
                        class="form-input"
                        placeholder="인증 코드"
                        prop:value=move || code.get()
                        on:input=move |ev| set_code.set(event_target_value(&ev))
                    />
                    <button type="button" class="secondary-btn" on:click=verify_code>"인증 확인"</button>
                </div>
            </Show>
            <input
                type="password"
                class="form-input"
                placeholder="비밀번호"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="form-input"
                placeholder="닉네임"
                prop:value=move || nickname.get()
                on:input=move |ev| set_nickname.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="primary-btn"
                disabled=move || stage.get() != SignupStage::Verified
            >
                "회원가입"
            </button>
        </form>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let current = store_user(&store);
    let (nickname, set_nickname) = signal(current.as_ref().map(|u| u.nickname.clone()).unwrap_or_default());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let nickname = nickname.get_untracked().trim().to_string();
        if nickname.is_empty() {
            ctx.notify(ToastKind::Warning, "닉네임을 입력해주세요.");
            return;
        }
        spawn_local(async move {
            let api = ctx.api();
            match api.update_profile(&nickname).await {
                Ok(message) => {
                    ctx.notify(ToastKind::Success, message);
                    if let Some(user) = api.user_info().await {
                        store_set_user(&store, Some(user));
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "profile update failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
        });
    };

    view! {
        <form class="account-form" on:submit=save>
            <div class="profile-email">{current.map(|u| u.email).unwrap_or_default()}</div>
            <input
                type="text"
                class="form-input"
                placeholder="닉네임"
                prop:value=move || nickname.get()
                on:input=move |ev| set_nickname.set(event_target_value(&ev))
            />
            <button type="submit" class="primary-btn">"프로필 수정"</button>
        </form>
    }
}

/// Recent log lines, fetched each time the panel opens
#[component]
fn LogPanel() -> impl IntoView {
    let ctx = use_app_context();
    let (dump, set_dump) = signal(None::<String>);

    let toggle = move |_| {
        set_dump.update(|d| {
            *d = match d.take() {
                Some(_) => None,
                None => Some(ctx.log_dump()),
            }
        });
    };

    view! {
        <div class="log-panel">
            <button type="button" class="secondary-btn" on:click=toggle>
                {move || if dump.with(|d| d.is_some()) { "진단 로그 닫기" } else { "진단 로그 보기" }}
            </button>
            <Show when=move || dump.with(|d| d.is_some())>
                <pre class="log-dump">{move || dump.get().unwrap_or_default()}</pre>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_requires_verified_email() {
        assert!(!SignupStage::EnterEmail.can_register("pw", "neo"));
        assert!(!SignupStage::CodeSent.can_register("pw", "neo"));
        assert!(!SignupStage::Verified.can_register("", "neo"));
        assert!(!SignupStage::Verified.can_register("pw", "  "));
        assert!(SignupStage::Verified.can_register("pw", "neo"));
    }
}
