//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rolling_logger::RollingBuffer;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::BrowserSession;

/// How long a toast stays on screen
const TOAST_MS: u32 = 3_000;

/// Top-level pages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Creation wizard
    Create,
    /// Freshly created ticket
    TicketResult(i64),
    MyTickets,
    Account,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Warning => "toast warning",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Visible toasts, oldest first - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
    /// Recent log entries, when the logger was installed
    logs: StoredValue<Option<Arc<RollingBuffer>>>,
}

impl AppContext {
    pub fn new(config: AppConfig, logs: Option<Arc<RollingBuffer>>) -> Self {
        let (page, set_page) = signal(Page::Create);
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        Self {
            config: StoredValue::new(config),
            page,
            set_page,
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(1),
            logs: StoredValue::new(logs),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// API client over browser session storage
    pub fn api(&self) -> ApiClient<BrowserSession> {
        ApiClient::new(self.config().api_base_url, BrowserSession)
    }

    pub fn navigate(&self, page: Page) {
        tracing::debug!(?page, "navigate");
        self.set_page.set(page);
    }

    /// Show a toast that dismisses itself
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));

        let message = message.into();
        self.set_toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            ctx.dismiss(id);
        });
    }

    /// Recent log lines for the diagnostics panel
    pub fn log_dump(&self) -> String {
        self.logs
            .with_value(|logs| logs.as_ref().map(|buffer| buffer.dump()))
            .unwrap_or_default()
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_log_dump_reads_shared_buffer() {
        let buffer = Arc::new(RollingBuffer::new(4));
        let ctx = AppContext::new(AppConfig::default(), Some(buffer.clone()));
        assert_eq!(ctx.log_dump(), "");

        let subscriber = tracing_subscriber::registry().with(rolling_logger::RollingLayer::silent(buffer));
        tracing::subscriber::with_default(subscriber, || tracing::error!("ticket creation failed"));
        assert!(ctx.log_dump().contains("ticket creation failed"));
    }

    #[test]
    fn test_log_dump_without_logger() {
        let ctx = AppContext::new(AppConfig::default(), None);
        assert_eq!(ctx.log_dump(), "");
    }
}
