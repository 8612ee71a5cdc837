//! AgriLink Desktop Application
//!
//! Role-based desktop client for farmers, field employees and admins.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod desktop_config;
mod state;
mod theme;
mod views;

use std::sync::atomic::AtomicBool;

use dioxus::desktop::{Config, WindowBuilder};

/// Set by the window event handler, consumed by the app's polling loop
pub static WINDOW_FOCUSED: AtomicBool = AtomicBool::new(false);

fn main() {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "agrilink=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting AgriLink...");

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("AgriLink")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 800.0)),
    );

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
