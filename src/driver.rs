//! Input driver lifecycle as seen by the host frontend
//!
//! The host calls [`InputDriver::poll`] once per frame and may then ask for
//! button and hotkey state any number of times. Button queries only ever
//! read the snapshot taken by the last poll; hotkey checks read slot 0
//! afresh without touching that snapshot.
//!
//! The driver is a statum state machine:
//!
//! ```text
//! InputDriver<Initializing> ──initialize()──► InputDriver<Ready> ──free()──► (consumed)
//! ```
//!
//! Since `free` takes the driver by value, nothing can be queried after it.

use crate::config::DriverConfig;
use crate::controller::{ControllerSnapshot, HardwareSampler, PadSource};
use crate::error::DriverError;
use crate::hotkey::{Hotkey, HotkeyMachine, SessionContext};
use crate::mapping::{self, ButtonMap, DeviceKind, LogicalButton, Port};
use statum::{machine, state};
use tracing::{debug, info, trace};

#[state]
#[derive(Debug, Clone)]
pub enum DriverState {
    Initializing,
    Ready,
}

#[machine]
pub struct InputDriver<S: DriverState> {
    // Physical pad snapshots
    sampler: HardwareSampler,

    // Fixed logical → physical table
    button_map: ButtonMap,

    // Hotkey predicates and thresholds
    hotkeys: HotkeyMachine,

    // Number of completed polls
    frame: u64,
}

impl InputDriver<Initializing> {
    pub fn create(config: &DriverConfig, source: Box<dyn PadSource>) -> Result<Self, DriverError> {
        config.validate()?;
        let button_map = config.button_map()?;
        let hotkeys = HotkeyMachine::new(config.thresholds());
        debug!(
            "Creating input driver on '{}' with thresholds {:?}",
            source.name(),
            hotkeys.thresholds()
        );

        Ok(Self::new(HardwareSampler::new(source), button_map, hotkeys, 0))
    }

    pub fn initialize(self) -> InputDriver<Ready> {
        info!(
            "Input driver ready on '{}' backend",
            self.sampler.source_name()
        );
        for (logical, physical) in self.button_map.entries() {
            debug!("  {} -> {}", logical, physical);
        }
        self.transition()
    }
}

/// Builds and initializes a driver in one step
pub fn init(
    config: &DriverConfig,
    source: Box<dyn PadSource>,
) -> Result<InputDriver<Ready>, DriverError> {
    Ok(InputDriver::create(config, source)?.initialize())
}

impl InputDriver<Ready> {
    /// Samples all physical slots. The only call that advances the frame.
    pub fn poll(&mut self) {
        self.sampler.poll();
        self.frame = self.frame.wrapping_add(1);
        trace!("Frame {} polled", self.frame);
    }

    /// Digital state of `button_id` on the given port/device/index, using
    /// raw host ids. Unresolvable queries read as not pressed.
    pub fn query_button(&self, port: u32, device: u32, index: u32, button_id: u32) -> bool {
        mapping::query_button(
            &self.button_map,
            self.sampler.snapshots(),
            port,
            device,
            index,
            button_id,
        )
    }

    /// Typed variant of [`query_button`](Self::query_button)
    pub fn is_pressed(
        &self,
        port: Port,
        device: DeviceKind,
        index: u32,
        button: LogicalButton,
    ) -> bool {
        mapping::resolve_slot(port, device, index)
            .and_then(|slot| self.sampler.snapshot(slot))
            .is_some_and(|pad| pad.is_pressed(self.button_map.physical(button)))
    }

    /// Checks a hotkey by raw host id, unknown ids are never active
    pub fn check_hotkey(&mut self, session: &mut SessionContext, hotkey_id: u32) -> bool {
        match Hotkey::try_from(hotkey_id) {
            Ok(hotkey) => self.check(session, hotkey),
            Err(id) => {
                trace!("Unknown hotkey id {}", id);
                false
            }
        }
    }

    /// Evaluates `hotkey` against a fresh read of slot 0. Button queries
    /// keep seeing the last poll.
    pub fn check(&mut self, session: &mut SessionContext, hotkey: Hotkey) -> bool {
        let pad = self.sampler.read_fresh(0);
        let active = self.hotkeys.evaluate(hotkey, &pad, session, self.frame);
        if active {
            debug!("Hotkey active: {}", hotkey);
        }
        active
    }

    pub fn snapshot(&self, slot: usize) -> Option<&ControllerSnapshot> {
        self.sampler.snapshot(slot)
    }

    pub fn button_map(&self) -> &ButtonMap {
        &self.button_map
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_connected(&self, slot: usize) -> bool {
        self.sampler.is_connected(slot)
    }

    /// Releases the driver. Nothing is held besides the backend itself.
    pub fn free(self) {
        info!("Input driver freed after {} frames", self.frame);
    }
}
