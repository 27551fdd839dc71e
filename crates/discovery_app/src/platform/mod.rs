//! Terminal host: wires the stores, gateway and session together and runs a
//! line-oriented command loop on stdin.
mod app;
mod commands;
mod config;
mod logging;
mod render;

pub use app::run_app;
