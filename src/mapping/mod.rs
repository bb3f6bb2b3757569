//! Translation of host joypad queries onto sampled physical state.
//!
//! A query names a port, the device kind plugged into it, an index on that
//! device and a logical button. [`port`] resolves the first three to a
//! physical slot, [`button_map`] turns the button into a physical mask.
//! Anything that does not resolve reads as "not pressed".

pub mod button_map;
pub mod port;

pub use button_map::{ButtonMap, LogicalButton};
pub use port::{resolve_raw, resolve_slot, DeviceKind, Port};

use crate::controller::{ControllerSnapshot, SLOT_COUNT};
use tracing::trace;

/// Digital button state for a raw host query against the given snapshots
pub fn query_button(
    map: &ButtonMap,
    snapshots: &[ControllerSnapshot; SLOT_COUNT],
    port: u32,
    device: u32,
    index: u32,
    button_id: u32,
) -> bool {
    let Some(slot) = resolve_raw(port, device, index) else {
        trace!(
            "No slot for port {} device {} index {}",
            port,
            device,
            index
        );
        return false;
    };
    let Some(mask) = map.physical_for_id(button_id) else {
        trace!("Unknown button id {}", button_id);
        return false;
    };
    snapshots[slot].is_pressed(mask)
}
