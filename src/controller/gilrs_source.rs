//! gilrs backend for the hardware sampler
//!
//! Connected gamepads are assigned to the four physical slots in the order
//! they show up and keep their slot until they disconnect. gilrs only
//! updates its cached pad state while events are pumped, so every
//! [`PadSource::refresh`] drains the event queue first.

use super::sampler::PadSource;
use super::snapshot::{
    axis_to_stick, trigger_to_byte, ControllerSnapshot, PadButtons, StickPosition, SLOT_COUNT,
};
use crate::error::DriverError;
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

/// Physical button assignment from gilrs' layout-neutral names
const BUTTON_LAYOUT: [(Button, PadButtons); 14] = [
    (Button::DPadUp, PadButtons::DPAD_UP),
    (Button::DPadDown, PadButtons::DPAD_DOWN),
    (Button::DPadLeft, PadButtons::DPAD_LEFT),
    (Button::DPadRight, PadButtons::DPAD_RIGHT),
    (Button::Start, PadButtons::START),
    (Button::Select, PadButtons::BACK),
    (Button::LeftThumb, PadButtons::LEFT_THUMB),
    (Button::RightThumb, PadButtons::RIGHT_THUMB),
    (Button::LeftTrigger, PadButtons::LEFT_SHOULDER),
    (Button::RightTrigger, PadButtons::RIGHT_SHOULDER),
    (Button::South, PadButtons::A),
    (Button::East, PadButtons::B),
    (Button::West, PadButtons::X),
    (Button::North, PadButtons::Y),
];

pub struct GilrsSource {
    gilrs: Gilrs,
    slots: [Option<GamepadId>; SLOT_COUNT],
}

impl GilrsSource {
    pub fn new() -> Result<Self, DriverError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(DriverError::Backend(e.to_string()));
            }
        };

        let mut source = Self {
            gilrs,
            slots: [None; SLOT_COUNT],
        };

        let mut connected: Vec<GamepadId> = source.gilrs.gamepads().map(|(id, _)| id).collect();
        connected.sort_by_key(|id| usize::from(*id));
        if connected.is_empty() {
            warn!("No gamepad connected, slots stay neutral until one appears");
        }
        for id in connected {
            source.assign(id);
        }

        Ok(source)
    }

    /// Gamepad currently bound to `slot`
    pub fn slot_gamepad(&self, slot: usize) -> Option<GamepadId> {
        self.slots.get(slot).copied().flatten()
    }

    fn assign(&mut self, id: GamepadId) {
        if self.slots.contains(&Some(id)) {
            return;
        }
        match self.slots.iter().position(Option::is_none) {
            Some(slot) => {
                self.slots[slot] = Some(id);
                let gamepad = self.gilrs.gamepad(id);
                info!("Gamepad {} ({}) assigned to slot {}", id, gamepad.name(), slot);
            }
            None => warn!("All {} slots taken, ignoring gamepad {}", SLOT_COUNT, id),
        }
    }

    fn release(&mut self, id: GamepadId) {
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if *entry == Some(id) {
                info!("Gamepad {} released from slot {}", id, slot);
                *entry = None;
            }
        }
    }

    fn snapshot_of(gamepad: &Gamepad<'_>) -> ControllerSnapshot {
        let mut buttons = PadButtons::NONE;
        for (button, mask) in BUTTON_LAYOUT {
            if gamepad.is_pressed(button) {
                buttons.insert(mask);
            }
        }

        let trigger = |button: Button| -> u8 {
            gamepad
                .button_data(button)
                .map(|data| trigger_to_byte(data.value()))
                .unwrap_or(0)
        };

        ControllerSnapshot {
            buttons,
            left_stick: StickPosition::new(
                axis_to_stick(gamepad.value(Axis::LeftStickX)),
                axis_to_stick(gamepad.value(Axis::LeftStickY)),
            ),
            right_stick: StickPosition::new(
                axis_to_stick(gamepad.value(Axis::RightStickX)),
                axis_to_stick(gamepad.value(Axis::RightStickY)),
            ),
            left_trigger: trigger(Button::LeftTrigger2),
            right_trigger: trigger(Button::RightTrigger2),
        }
    }
}

impl PadSource for GilrsSource {
    fn refresh(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("Controller connected event detected: {}", id);
                    self.assign(id);
                }
                EventType::Disconnected => {
                    warn!("Controller disconnected event detected: {}", id);
                    self.release(id);
                }
                _ => {}
            }
        }
    }

    fn read_slot(&mut self, slot: usize) -> Option<ControllerSnapshot> {
        let id = self.slot_gamepad(slot)?;
        match self.gilrs.connected_gamepad(id) {
            Some(gamepad) => Some(Self::snapshot_of(&gamepad)),
            None => {
                debug!("Gamepad {} in slot {} not readable", id, slot);
                None
            }
        }
    }

    fn name(&self) -> &str {
        "gilrs"
    }
}
