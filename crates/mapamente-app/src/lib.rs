pub mod commands;
pub mod config;
pub mod render;
pub mod shell;
pub mod state;
