pub mod app;
pub mod config;
pub mod prompt;
pub mod render;
pub mod replay;
pub mod views;
