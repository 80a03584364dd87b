mod main_config;
mod window_config;

pub use main_config::{Config, ClientConfigManager, get_config_manager};
pub use window_config::WindowConfig;
