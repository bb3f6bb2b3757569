//! Per-slot controller state as sampled from the hardware.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Number of physical controller slots sampled every poll
pub const SLOT_COUNT: usize = 4;

/// Digital button bitmask of one physical pad
///
/// Uses the 16-bit XInput layout, one bit per physical button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PadButtons(pub u16);

impl PadButtons {
    pub const NONE: PadButtons = PadButtons(0);
    pub const DPAD_UP: PadButtons = PadButtons(0x0001);
    pub const DPAD_DOWN: PadButtons = PadButtons(0x0002);
    pub const DPAD_LEFT: PadButtons = PadButtons(0x0004);
    pub const DPAD_RIGHT: PadButtons = PadButtons(0x0008);
    pub const START: PadButtons = PadButtons(0x0010);
    pub const BACK: PadButtons = PadButtons(0x0020);
    pub const LEFT_THUMB: PadButtons = PadButtons(0x0040);
    pub const RIGHT_THUMB: PadButtons = PadButtons(0x0080);
    pub const LEFT_SHOULDER: PadButtons = PadButtons(0x0100);
    pub const RIGHT_SHOULDER: PadButtons = PadButtons(0x0200);
    pub const A: PadButtons = PadButtons(0x1000);
    pub const B: PadButtons = PadButtons(0x2000);
    pub const X: PadButtons = PadButtons(0x4000);
    pub const Y: PadButtons = PadButtons(0x8000);

    /// Every named physical button with its display name
    pub const NAMED: [(&'static str, PadButtons); 14] = [
        ("DPadUp", PadButtons::DPAD_UP),
        ("DPadDown", PadButtons::DPAD_DOWN),
        ("DPadLeft", PadButtons::DPAD_LEFT),
        ("DPadRight", PadButtons::DPAD_RIGHT),
        ("Start", PadButtons::START),
        ("Back", PadButtons::BACK),
        ("LeftThumb", PadButtons::LEFT_THUMB),
        ("RightThumb", PadButtons::RIGHT_THUMB),
        ("LeftShoulder", PadButtons::LEFT_SHOULDER),
        ("RightShoulder", PadButtons::RIGHT_SHOULDER),
        ("A", PadButtons::A),
        ("B", PadButtons::B),
        ("X", PadButtons::X),
        ("Y", PadButtons::Y),
    ];

    /// True when any bit of `mask` is set. An empty mask is never contained.
    pub fn contains(self, mask: PadButtons) -> bool {
        self.0 & mask.0 != 0
    }

    pub fn insert(&mut self, mask: PadButtons) {
        self.0 |= mask.0;
    }

    pub fn remove(&mut self, mask: PadButtons) {
        self.0 &= !mask.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Looks up a single physical button by its display name
    pub fn from_name(name: &str) -> Option<PadButtons> {
        Self::NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, b)| *b)
    }

    pub fn name(self) -> Option<&'static str> {
        Self::NAMED.iter().find(|(_, b)| *b == self).map(|(n, _)| *n)
    }
}

impl BitOr for PadButtons {
    type Output = PadButtons;

    fn bitor(self, rhs: PadButtons) -> PadButtons {
        PadButtons(self.0 | rhs.0)
    }
}

impl fmt::Display for PadButtons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{:#06x}", self.0),
        }
    }
}

/// Analog stick position, up and right are positive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickPosition {
    pub x: i16,
    pub y: i16,
}

impl StickPosition {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Full state of one physical slot at the last sample
///
/// The default value is the neutral pad: no buttons, sticks centered,
/// triggers released. A disconnected slot always reads as neutral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub buttons: PadButtons,
    pub left_stick: StickPosition,
    pub right_stick: StickPosition,
    pub left_trigger: u8,
    pub right_trigger: u8,
}

impl ControllerSnapshot {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, mask: PadButtons) -> bool {
        self.buttons.contains(mask)
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }
}

/// Converts a normalized `[-1.0, 1.0]` axis value to the signed stick range
pub fn axis_to_stick(value: f32) -> i16 {
    if value.is_nan() {
        return 0;
    }
    let scaled = (value.clamp(-1.0, 1.0) * i16::MAX as f32).round();
    scaled as i16
}

/// Converts a normalized `[0.0, 1.0]` trigger value to `0..=255`
pub fn trigger_to_byte(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * u8::MAX as f32).round() as u8
}
