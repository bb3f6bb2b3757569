//! Logical Port Resolver
//!
//! Maps what the emulated system sees (a port, a device plugged into it, and
//! an index on that device) to one of the physical slots.

use crate::controller::SLOT_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Controller port on the emulated console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    One,
    Two,
}

impl TryFrom<u32> for Port {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Port::One),
            1 => Ok(Port::Two),
            other => Err(other),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::One => write!(f, "Port 1"),
            Port::Two => write!(f, "Port 2"),
        }
    }
}

/// Device class plugged into a port, numbered like the libsnes device ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    None,
    Joypad,
    Mouse,
    Multitap,
    SuperScope,
    Justifier,
    Justifiers,
}

impl DeviceKind {
    /// Only digital joypads, alone or behind a multitap, are served
    pub fn is_joypad_class(self) -> bool {
        matches!(self, DeviceKind::Joypad | DeviceKind::Multitap)
    }
}

impl TryFrom<u32> for DeviceKind {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(DeviceKind::None),
            1 => Ok(DeviceKind::Joypad),
            2 => Ok(DeviceKind::Mouse),
            3 => Ok(DeviceKind::Multitap),
            4 => Ok(DeviceKind::SuperScope),
            5 => Ok(DeviceKind::Justifier),
            6 => Ok(DeviceKind::Justifiers),
            other => Err(other),
        }
    }
}

/// Physical slot for a (port, device, index) triple, `None` for "no input"
///
/// A plain joypad ignores the index. Port two's multitap fans out to slots
/// `1 + index`, bounded by the slot count. A multitap on port one only has
/// the pad in slot 0 behind it: index 0 resolves to slot 0, every other
/// index there is "no input".
pub fn resolve_slot(port: Port, device: DeviceKind, index: u32) -> Option<usize> {
    if !device.is_joypad_class() {
        return None;
    }

    match (port, device) {
        (Port::One, DeviceKind::Joypad) => Some(0),
        (Port::Two, DeviceKind::Joypad) => Some(1),
        (Port::One, DeviceKind::Multitap) => (index == 0).then_some(0),
        (Port::Two, DeviceKind::Multitap) => {
            let slot = usize::try_from(index).ok()?.checked_add(1)?;
            (slot < SLOT_COUNT).then_some(slot)
        }
        _ => None,
    }
}

/// Same as [`resolve_slot`] on raw host ids
pub fn resolve_raw(port: u32, device: u32, index: u32) -> Option<usize> {
    let port = Port::try_from(port).ok()?;
    let device = DeviceKind::try_from(device).ok()?;
    resolve_slot(port, device, index)
}
