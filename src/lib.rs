pub mod analyze;
pub mod browser;
pub mod config;
pub mod github;
pub mod logging;
pub mod narrative;
pub mod output;
pub mod scoring;
