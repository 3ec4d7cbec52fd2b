//! brickled — LED settings state machine and `led_anim` driver sync for handheld devices.

pub mod config;
pub mod error;
pub mod hooks;
pub mod input;
pub mod led;
pub mod models;
pub mod mutator;
pub mod session;
pub mod settings;
pub mod state;
pub mod view;

pub use error::BrickledError;
