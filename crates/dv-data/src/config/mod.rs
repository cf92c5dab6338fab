//! Import configuration

pub mod import_config;

pub use import_config::*;
