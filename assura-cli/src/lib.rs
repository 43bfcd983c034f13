pub mod actions;
pub mod app;
pub mod banner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod desk;
pub mod document;
pub mod error;
pub mod format;
pub mod guard;
pub mod page;
pub mod prompt;
pub mod session;
pub mod ui;
pub mod wallet;
