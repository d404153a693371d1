mod app;
pub mod config;
mod effects;
mod input;
mod render;

pub use app::run_app;
