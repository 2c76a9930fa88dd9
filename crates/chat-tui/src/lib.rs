//! Terminal chat client for the memchat API.

pub mod app;
pub mod client;
pub mod transcript;
pub mod ui;
