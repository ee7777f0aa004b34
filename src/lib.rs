pub mod commands;
pub mod config;
pub mod form;
pub mod path;
pub mod schema;
pub mod store;
pub mod themes;
pub mod tui;
pub mod value;
