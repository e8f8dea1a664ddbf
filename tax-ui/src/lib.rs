pub mod app;
pub mod config;
pub mod format;
pub mod interactive;
pub mod logging;
pub mod report;
pub mod state;
