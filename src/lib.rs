pub mod app;
pub mod config;
pub mod encoding;
pub mod extract;
pub mod index;
pub mod logging;
pub mod mirror;
pub mod scan;
pub mod version;
