//! Meta-commands triggered from the first pad.
//!
//! Hotkeys are single-player: they always look at physical slot 0.

pub mod machine;
pub mod session;

pub use machine::{HotkeyMachine, HotkeyThresholds};
pub use session::{HotkeyTimer, RunMode, SessionContext, SessionFlags};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hotkey {
    FastForwardHold,
    LoadState,
    SaveState,
    StateSlotPlus,
    StateSlotMinus,
    FrameAdvance,
    Rewind,
    Quit,
}

impl Hotkey {
    pub const ALL: [Hotkey; 8] = [
        Hotkey::FastForwardHold,
        Hotkey::LoadState,
        Hotkey::SaveState,
        Hotkey::StateSlotPlus,
        Hotkey::StateSlotMinus,
        Hotkey::FrameAdvance,
        Hotkey::Rewind,
        Hotkey::Quit,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Hotkey {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(id)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hotkey::FastForwardHold => "fast-forward (hold)",
            Hotkey::LoadState => "load state",
            Hotkey::SaveState => "save state",
            Hotkey::StateSlotPlus => "next state slot",
            Hotkey::StateSlotMinus => "previous state slot",
            Hotkey::FrameAdvance => "frame advance",
            Hotkey::Rewind => "rewind",
            Hotkey::Quit => "menu toggle",
        };
        write!(f, "{}", name)
    }
}
