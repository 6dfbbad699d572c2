mod application;
mod console;
pub mod data;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use console::configure_colors;
pub use runtime_config::RuntimeConfig;
