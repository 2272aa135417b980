//! initdeck-app - Application state and orchestration for initdeck
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: the [`ServiceSession`] model, the `update` function, background
//! command dispatch, the [`Engine`] that serializes every state change, and
//! configuration loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod session;
pub mod signals;
pub mod state;

// Re-export primary types
pub use config::Settings;
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use session::{CommandOrigin, PendingCommand, ServiceSession};
pub use state::{AppPhase, AppState, MenuItem, UiMode};
