pub mod ai;
pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod locations;
pub mod menu;
pub mod notifications;
pub mod products;
pub mod reports;
pub mod stats;
