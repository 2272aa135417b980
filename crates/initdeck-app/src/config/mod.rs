//! Configuration file parsing for initdeck
//!
//! Settings live in `config.toml` under the user's config directory
//! (`~/.config/initdeck/config.toml` on Linux) unless a path is given.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, CONFIG_FILENAME};
pub use types::*;
