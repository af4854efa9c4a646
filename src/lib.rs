pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod plugins;
pub mod providers;
pub mod state;
pub mod system;

pub use crate::core::error::SwaboxError;
