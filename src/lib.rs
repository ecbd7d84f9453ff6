pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod loaders;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod submit;
pub mod types;
pub mod utils;

// Port traits and their adapters
pub mod app;
pub mod infra;
