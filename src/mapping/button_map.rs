//! Button Translation Table
//!
//! Fixed logical→physical table, built once when the driver starts and
//! never rebound afterwards.

use crate::controller::PadButtons;
use crate::error::DriverError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Abstract joypad button as the emulated system numbers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogicalButton {
    B,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
}

impl LogicalButton {
    pub const ALL: [LogicalButton; 12] = [
        LogicalButton::B,
        LogicalButton::Y,
        LogicalButton::Select,
        LogicalButton::Start,
        LogicalButton::Up,
        LogicalButton::Down,
        LogicalButton::Left,
        LogicalButton::Right,
        LogicalButton::A,
        LogicalButton::X,
        LogicalButton::L,
        LogicalButton::R,
    ];

    /// Host-facing numeric id
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            LogicalButton::B => "b",
            LogicalButton::Y => "y",
            LogicalButton::Select => "select",
            LogicalButton::Start => "start",
            LogicalButton::Up => "up",
            LogicalButton::Down => "down",
            LogicalButton::Left => "left",
            LogicalButton::Right => "right",
            LogicalButton::A => "a",
            LogicalButton::X => "x",
            LogicalButton::L => "l",
            LogicalButton::R => "r",
        }
    }

    pub fn from_name(name: &str) -> Option<LogicalButton> {
        Self::ALL
            .into_iter()
            .find(|button| button.name().eq_ignore_ascii_case(name))
    }
}

impl TryFrom<u32> for LogicalButton {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(id)
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One physical mask per logical button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    table: [PadButtons; 12],
}

impl Default for ButtonMap {
    /// Face buttons follow position rather than label: the emulated A sits
    /// where the pad's B is, and so on.
    fn default() -> Self {
        let mut table = [PadButtons::NONE; 12];
        for button in LogicalButton::ALL {
            table[button as usize] = match button {
                LogicalButton::A => PadButtons::B,
                LogicalButton::B => PadButtons::A,
                LogicalButton::X => PadButtons::Y,
                LogicalButton::Y => PadButtons::X,
                LogicalButton::Left => PadButtons::DPAD_LEFT,
                LogicalButton::Right => PadButtons::DPAD_RIGHT,
                LogicalButton::Up => PadButtons::DPAD_UP,
                LogicalButton::Down => PadButtons::DPAD_DOWN,
                LogicalButton::Start => PadButtons::START,
                LogicalButton::Select => PadButtons::BACK,
                LogicalButton::L => PadButtons::LEFT_SHOULDER,
                LogicalButton::R => PadButtons::RIGHT_SHOULDER,
            };
        }
        Self { table }
    }
}

impl ButtonMap {
    /// Default table with entries replaced by name, e.g. `a = "A"`
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, DriverError> {
        let mut map = Self::default();
        for (logical, physical) in overrides {
            let button = LogicalButton::from_name(logical)
                .ok_or_else(|| DriverError::UnknownButton(logical.clone()))?;
            let mask = PadButtons::from_name(physical)
                .ok_or_else(|| DriverError::UnknownButton(physical.clone()))?;
            debug!("Binding {} to physical {}", button, mask);
            map.table[button as usize] = mask;
        }
        Ok(map)
    }

    pub fn physical(&self, button: LogicalButton) -> PadButtons {
        self.table[button as usize]
    }

    /// Physical mask for a raw id, `None` when the id is not a known button
    pub fn physical_for_id(&self, id: u32) -> Option<PadButtons> {
        LogicalButton::try_from(id).ok().map(|b| self.physical(b))
    }

    /// Reverse lookup: which logical button a physical mask is bound to
    pub fn logical(&self, mask: PadButtons) -> Option<LogicalButton> {
        LogicalButton::ALL
            .into_iter()
            .find(|button| self.physical(*button) == mask)
    }

    pub fn entries(&self) -> impl Iterator<Item = (LogicalButton, PadButtons)> + '_ {
        LogicalButton::ALL.into_iter().map(|b| (b, self.physical(b)))
    }
}
