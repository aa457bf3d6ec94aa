pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod model;
pub mod present;
pub mod session;
pub mod source;
pub mod store;
pub mod tui;
