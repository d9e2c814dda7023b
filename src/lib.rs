pub mod app;
pub mod config;
pub mod output;
pub mod ranking;
pub mod roster;
pub mod scoring;
pub mod stats;
pub mod store;
