//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Ticket, UserInfo};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, if any
    pub user: Option<UserInfo>,
    /// Tickets of the signed-in user (my 4Q list)
    pub tickets: Vec<Ticket>,
    /// True while the ticket list is being fetched
    pub tickets_loading: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Reactive read of the signed-in user
pub fn store_user(store: &AppStore) -> Option<UserInfo> {
    store.user().get()
}

pub fn store_signed_in(store: &AppStore) -> bool {
    store.user().with(|u| u.is_some())
}

pub fn store_set_user(store: &AppStore, user: Option<UserInfo>) {
    store.user().set(user);
}

/// Forget the user and everything fetched on their behalf
pub fn store_sign_out(store: &AppStore) {
    store.user().set(None);
    store.tickets().write().clear();
}

pub fn store_tickets(store: &AppStore) -> Vec<Ticket> {
    store.tickets().get()
}

pub fn store_set_tickets(store: &AppStore, tickets: Vec<Ticket>) {
    *store.tickets().write() = tickets;
}

/// Loaded and empty; false while a fetch is in flight
pub fn store_has_no_tickets(store: &AppStore) -> bool {
    !store.tickets_loading().get() && store.tickets().with(|t| t.is_empty())
}

pub fn store_tickets_loading(store: &AppStore) -> bool {
    store.tickets_loading().get()
}

pub fn store_set_tickets_loading(store: &AppStore, loading: bool) {
    store.tickets_loading().set(loading);
}
