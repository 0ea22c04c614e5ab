//! 4Q Frontend Entry Point

mod api;
mod app;
mod canvas;
mod components;
mod composer;
mod config;
mod context;
mod download;
mod models;
mod qr;
mod session;
mod store;
mod tags;
mod wizard;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    // Only fails when a subscriber is already installed
    let logs = rolling_logger::init(config.log_level, config.log_capacity).ok();
    tracing::info!(api = %config.api_base_url, "starting 4Q frontend");

    mount_to_body(move || view! { <App config=config logs=logs /> });
}
