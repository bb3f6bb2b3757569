//! Frontend session state the hotkey checks read and write.
//!
//! The flags belong to the frontend; the input driver only flips them as a
//! side effect of menu and frame-advance hotkeys. Everything lives in one
//! [`SessionContext`] that the host passes to every hotkey check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the frontend main loop is currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunMode {
    #[default]
    Emulation,
    Menu,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Emulation => write!(f, "Emulation"),
            RunMode::Menu => write!(f, "Menu"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub menu_enabled: bool,
    pub in_game_menu_enabled: bool,
    pub frame_advance_enabled: bool,
    pub run_mode: RunMode,
}

/// Cooldown before a cooldown-gated hotkey can fire again
///
/// Stores the poll frame at which it expires, so it needs no per-frame
/// decrement; callers pass the current frame count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotkeyTimer {
    deadline: u64,
}

impl HotkeyTimer {
    pub fn arm(&mut self, now: u64, ticks: u32) {
        self.deadline = now.saturating_add(u64::from(ticks));
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.deadline
    }

    /// Ticks left at frame `now`, zero once expired
    pub fn remaining(&self, now: u64) -> u64 {
        self.deadline.saturating_sub(now)
    }
}

/// One shared cooldown timer and one shared flag set per run session
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub flags: SessionFlags,
    pub timer: HotkeyTimer,
}

impl SessionContext {
    pub fn new(flags: SessionFlags) -> Self {
        Self {
            flags,
            timer: HotkeyTimer::default(),
        }
    }
}
