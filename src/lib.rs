//! Meme bot: walks a chat user through a two-step form and answers with a
//! memegen.link image URL.

pub mod bot;
pub mod cards;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod domain;
pub mod encoder;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod startup;
pub mod url_builder;
pub mod workflow;

/// AppState holds shared resources for the web server. Read-only after startup.
pub struct AppState {
    pub bot: bot::Bot,
    pub app_version: String,
}
