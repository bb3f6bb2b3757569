//! Controller subsystem for physical gamepad sampling
//!
//! 1. [`snapshot`] - Per-slot pad state and the physical button layout
//! 2. [`sampler`] - Frame-synchronous sampling of all slots
//! 3. [`gilrs_source`] - gilrs-backed [`PadSource`]
//!
//! # Architecture
//!
//! ```text
//! Gamepad ──► PadSource ──► HardwareSampler ──► [ControllerSnapshot; 4]
//!             (backend)     (once per frame)
//! ```

pub mod gilrs_source;
pub mod sampler;
pub mod snapshot;

pub use gilrs_source::GilrsSource;
pub use sampler::{HardwareSampler, PadSource};
pub use snapshot::{ControllerSnapshot, PadButtons, StickPosition, SLOT_COUNT};
