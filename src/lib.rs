//! Gamepad polling and logical button mapping for an emulator frontend.
//!
//! [`controller`] samples up to four physical pads per frame, [`mapping`]
//! resolves emulated ports and buttons onto them, [`hotkey`] turns stick,
//! trigger and thumb-button combinations into frontend commands, and
//! [`driver`] ties them into the init/poll/query/free lifecycle.

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod hotkey;
pub mod mapping;

pub use config::DriverConfig;
pub use driver::{init, DriverState, Initializing, InputDriver, Ready};
pub use error::DriverError;
