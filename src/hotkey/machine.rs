//! Hotkey detection over the slot-0 snapshot.
//!
//! Save/load, state-slot, rewind and fast-forward are gated by the right
//! stick and the right trigger. The menu toggle uses both stick buttons and
//! the shared cooldown. All checks besides frame-advance and quit are pure.

use super::session::{RunMode, SessionContext};
use super::Hotkey;
use crate::controller::{ControllerSnapshot, PadButtons};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_STICK_DEADZONE: i16 = 16000;
pub const DEFAULT_TRIGGER_THRESHOLD: u8 = 128;
pub const DEFAULT_MENU_COOLDOWN_TICKS: u32 = 60;

/// Analog thresholds and the menu cooldown, all exclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyThresholds {
    pub stick_deadzone: i16,
    pub trigger_threshold: u8,
    pub menu_cooldown_ticks: u32,
}

impl Default for HotkeyThresholds {
    fn default() -> Self {
        Self {
            stick_deadzone: DEFAULT_STICK_DEADZONE,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            menu_cooldown_ticks: DEFAULT_MENU_COOLDOWN_TICKS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HotkeyMachine {
    thresholds: HotkeyThresholds,
}

impl HotkeyMachine {
    pub fn new(thresholds: HotkeyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HotkeyThresholds {
        &self.thresholds
    }

    fn positive(&self, value: i16) -> bool {
        value > self.thresholds.stick_deadzone
    }

    fn negative(&self, value: i16) -> bool {
        // i32 so a deadzone of i16::MAX still negates cleanly
        i32::from(value) < -i32::from(self.thresholds.stick_deadzone)
    }

    fn trigger_held(&self, pad: &ControllerSnapshot) -> bool {
        pad.right_trigger > self.thresholds.trigger_threshold
    }

    /// Evaluates `hotkey` against `pad` at poll frame `frame`, updating
    /// `session` for the two hotkeys that switch frontend modes
    pub fn evaluate(
        &self,
        hotkey: Hotkey,
        pad: &ControllerSnapshot,
        session: &mut SessionContext,
        frame: u64,
    ) -> bool {
        let stick = pad.right_stick;
        let trigger = self.trigger_held(pad);

        match hotkey {
            Hotkey::FastForwardHold => self.negative(stick.y) && !trigger,
            Hotkey::Rewind => self.positive(stick.y) && !trigger,
            Hotkey::LoadState => self.positive(stick.y) && trigger,
            Hotkey::SaveState => self.negative(stick.y) && trigger,
            Hotkey::StateSlotPlus => self.positive(stick.x) && trigger,
            Hotkey::StateSlotMinus => self.negative(stick.x) && trigger,
            Hotkey::FrameAdvance => self.frame_advance(session),
            Hotkey::Quit => self.menu_toggle(pad, session, frame),
        }
    }

    fn frame_advance(&self, session: &mut SessionContext) -> bool {
        let flags = &mut session.flags;
        if flags.frame_advance_enabled {
            flags.menu_enabled = false;
            flags.in_game_menu_enabled = true;
            flags.run_mode = RunMode::Emulation;
            debug!("Frame advance: stepping one frame in emulation");
        }
        flags.frame_advance_enabled
    }

    /// Both stick buttons with an expired cooldown open the menu and arm the
    /// cooldown. Otherwise emulation keeps running, with the in-game menu
    /// shown while only the right stick button is held.
    fn menu_toggle(
        &self,
        pad: &ControllerSnapshot,
        session: &mut SessionContext,
        frame: u64,
    ) -> bool {
        let left = pad.is_pressed(PadButtons::LEFT_THUMB);
        let right = pad.is_pressed(PadButtons::RIGHT_THUMB);

        let menu = left && right && session.timer.is_expired(frame);
        let in_game_menu = right && !left;
        session.flags.menu_enabled = menu;
        session.flags.in_game_menu_enabled = in_game_menu;

        if menu && !in_game_menu {
            session.flags.run_mode = RunMode::Menu;
            session
                .timer
                .arm(frame, self.thresholds.menu_cooldown_ticks);
            debug!(
                "Menu toggled, cooldown armed for {} ticks",
                self.thresholds.menu_cooldown_ticks
            );
            menu
        } else {
            session.flags.run_mode = RunMode::Emulation;
            if in_game_menu {
                debug!("In-game menu requested");
            }
            in_game_menu
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StickPosition;
    use crate::hotkey::session::SessionFlags;

    fn pad(x: i16, y: i16, trigger: u8) -> ControllerSnapshot {
        ControllerSnapshot {
            right_stick: StickPosition::new(x, y),
            right_trigger: trigger,
            ..Default::default()
        }
    }

    fn thumbs(left: bool, right: bool) -> ControllerSnapshot {
        let mut snapshot = ControllerSnapshot::neutral();
        if left {
            snapshot.buttons.insert(PadButtons::LEFT_THUMB);
        }
        if right {
            snapshot.buttons.insert(PadButtons::RIGHT_THUMB);
        }
        snapshot
    }

    fn check(hotkey: Hotkey, snapshot: &ControllerSnapshot) -> bool {
        let mut session = SessionContext::default();
        HotkeyMachine::default().evaluate(hotkey, snapshot, &mut session, 0)
    }

    #[test]
    fn test_deadzone_is_exclusive() {
        assert!(!check(Hotkey::Rewind, &pad(0, 16000, 0)));
        assert!(check(Hotkey::Rewind, &pad(0, 16001, 0)));
        assert!(!check(Hotkey::FastForwardHold, &pad(0, -16000, 0)));
        assert!(check(Hotkey::FastForwardHold, &pad(0, -16001, 0)));
    }

    #[test]
    fn test_deadzone_is_exclusive_with_trigger_held() {
        assert!(!check(Hotkey::LoadState, &pad(0, 16000, 255)));
        assert!(check(Hotkey::LoadState, &pad(0, 16001, 255)));
        assert!(!check(Hotkey::SaveState, &pad(0, -16000, 255)));
        assert!(check(Hotkey::SaveState, &pad(0, -16001, 255)));
    }

    #[test]
    fn test_horizontal_deadzone_is_exclusive() {
        assert!(!check(Hotkey::StateSlotPlus, &pad(16000, 0, 255)));
        assert!(check(Hotkey::StateSlotPlus, &pad(16001, 0, 255)));
        assert!(!check(Hotkey::StateSlotMinus, &pad(-16000, 0, 255)));
        assert!(check(Hotkey::StateSlotMinus, &pad(-16001, 0, 255)));

        // Vertical hotkeys ignore the horizontal axis
        assert!(!check(Hotkey::LoadState, &pad(30000, 0, 255)));
        assert!(!check(Hotkey::Rewind, &pad(30000, 0, 0)));
    }

    #[test]
    fn test_trigger_threshold_is_exclusive() {
        assert!(!check(Hotkey::LoadState, &pad(0, 20000, 128)));
        assert!(check(Hotkey::LoadState, &pad(0, 20000, 129)));
        assert!(check(Hotkey::Rewind, &pad(0, 20000, 128)));
        assert!(!check(Hotkey::Rewind, &pad(0, 20000, 129)));
    }

    #[test]
    fn test_stick_hotkeys() {
        assert!(check(Hotkey::SaveState, &pad(0, -30000, 255)));
        assert!(!check(Hotkey::SaveState, &pad(0, 30000, 255)));
        assert!(check(Hotkey::StateSlotPlus, &pad(30000, 0, 255)));
        assert!(!check(Hotkey::StateSlotPlus, &pad(30000, 0, 0)));
        assert!(check(Hotkey::StateSlotMinus, &pad(-30000, 0, 200)));
        assert!(!check(Hotkey::StateSlotMinus, &pad(30000, 0, 200)));
    }

    #[test]
    fn test_fast_forward_and_rewind_exclusive() {
        let machine = HotkeyMachine::default();
        let mut session = SessionContext::default();
        let samples = (i16::MIN..=i16::MAX)
            .step_by(97)
            .chain([i16::MIN, i16::MAX, 16000, -16001]);
        for y in samples {
            for trigger in [0, 128, 255] {
                let snapshot = pad(0, y, trigger);
                let ff = machine.evaluate(Hotkey::FastForwardHold, &snapshot, &mut session, 0);
                let rw = machine.evaluate(Hotkey::Rewind, &snapshot, &mut session, 0);
                assert!(!(ff && rw), "y={} trigger={}", y, trigger);
            }
        }
    }

    #[test]
    fn test_pure_hotkeys_leave_session_untouched() {
        let machine = HotkeyMachine::default();
        let mut session = SessionContext::new(SessionFlags {
            menu_enabled: true,
            in_game_menu_enabled: true,
            frame_advance_enabled: false,
            run_mode: RunMode::Menu,
        });
        let before = session.flags.clone();
        let snapshot = pad(-30000, 30000, 255);
        for hotkey in [
            Hotkey::FastForwardHold,
            Hotkey::Rewind,
            Hotkey::LoadState,
            Hotkey::SaveState,
            Hotkey::StateSlotPlus,
            Hotkey::StateSlotMinus,
        ] {
            machine.evaluate(hotkey, &snapshot, &mut session, 0);
        }
        assert_eq!(session.flags, before);
        assert!(session.timer.is_expired(0));
    }

    #[test]
    fn test_frame_advance_disabled_is_noop() {
        let machine = HotkeyMachine::default();
        let flags = SessionFlags {
            menu_enabled: true,
            in_game_menu_enabled: false,
            frame_advance_enabled: false,
            run_mode: RunMode::Menu,
        };
        let mut session = SessionContext::new(flags.clone());
        let neutral = ControllerSnapshot::neutral();
        assert!(!machine.evaluate(Hotkey::FrameAdvance, &neutral, &mut session, 0));
        assert_eq!(session.flags, flags);
    }

    #[test]
    fn test_frame_advance_enabled_forces_emulation() {
        let machine = HotkeyMachine::default();
        let neutral = ControllerSnapshot::neutral();
        for menu_enabled in [false, true] {
            for in_game_menu_enabled in [false, true] {
                for run_mode in [RunMode::Emulation, RunMode::Menu] {
                    let mut session = SessionContext::new(SessionFlags {
                        menu_enabled,
                        in_game_menu_enabled,
                        frame_advance_enabled: true,
                        run_mode,
                    });
                    assert!(machine.evaluate(Hotkey::FrameAdvance, &neutral, &mut session, 0));
                    assert_eq!(session.flags.run_mode, RunMode::Emulation);
                    assert!(session.flags.in_game_menu_enabled);
                    assert!(!session.flags.menu_enabled);
                    assert!(session.flags.frame_advance_enabled);
                }
            }
        }
    }

    #[test]
    fn test_menu_toggle_arms_cooldown() {
        let machine = HotkeyMachine::default();
        let mut session = SessionContext::default();
        let both = thumbs(true, true);
        let cooldown = u64::from(DEFAULT_MENU_COOLDOWN_TICKS);

        assert!(machine.evaluate(Hotkey::Quit, &both, &mut session, 100));
        assert_eq!(session.flags.run_mode, RunMode::Menu);
        assert!(session.flags.menu_enabled);
        assert!(!session.flags.in_game_menu_enabled);
        assert_eq!(session.timer.remaining(100), cooldown);

        assert!(!machine.evaluate(Hotkey::Quit, &both, &mut session, 100));
        assert_eq!(session.flags.run_mode, RunMode::Emulation);

        for frame in 101..100 + cooldown {
            assert!(!machine.evaluate(Hotkey::Quit, &both, &mut session, frame));
        }
        assert!(machine.evaluate(Hotkey::Quit, &both, &mut session, 100 + cooldown));
    }

    #[test]
    fn test_right_thumb_alone_opens_in_game_menu() {
        let machine = HotkeyMachine::default();
        let mut session = SessionContext::new(SessionFlags {
            run_mode: RunMode::Menu,
            ..Default::default()
        });
        assert!(machine.evaluate(Hotkey::Quit, &thumbs(false, true), &mut session, 0));
        assert_eq!(session.flags.run_mode, RunMode::Emulation);
        assert!(session.flags.in_game_menu_enabled);
        assert!(!session.flags.menu_enabled);
        assert!(session.timer.is_expired(0));
    }

    #[test]
    fn test_right_thumb_ignores_cooldown() {
        let machine = HotkeyMachine::default();
        let mut session = SessionContext::default();
        session.timer.arm(0, 10);
        assert!(machine.evaluate(Hotkey::Quit, &thumbs(false, true), &mut session, 1));
        assert!(!machine.evaluate(Hotkey::Quit, &thumbs(true, false), &mut session, 1));
        assert!(!session.flags.in_game_menu_enabled);
        assert_eq!(session.timer.remaining(0), 10);
    }

    #[test]
    fn test_custom_thresholds() {
        let machine = HotkeyMachine::new(HotkeyThresholds {
            stick_deadzone: 100,
            trigger_threshold: 10,
            menu_cooldown_ticks: 5,
        });
        let mut session = SessionContext::default();
        assert!(machine.evaluate(Hotkey::LoadState, &pad(0, 101, 11), &mut session, 0));
        machine.evaluate(Hotkey::Quit, &thumbs(true, true), &mut session, 0);
        assert_eq!(session.timer.remaining(0), 5);
    }
}
