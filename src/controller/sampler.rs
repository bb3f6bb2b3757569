//! Hardware Sampler - per-frame snapshot of all physical slots
//!
//! The sampler owns the four [`ControllerSnapshot`]s and is the only place
//! they are written. Reads go through a [`PadSource`], which keeps the
//! backend (gilrs, a scripted test pad, ...) out of the mapping code.

use super::snapshot::{ControllerSnapshot, SLOT_COUNT};
use tracing::{debug, trace};

/// Backend that can report the current state of a physical slot
pub trait PadSource {
    /// Pumps pending backend events so that following reads see fresh state
    fn refresh(&mut self) {}

    /// Reads one slot. `None` means disconnected or a failed read.
    fn read_slot(&mut self, slot: usize) -> Option<ControllerSnapshot>;

    /// Short backend name for logging
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Samples up to [`SLOT_COUNT`] physical pads into a fixed snapshot array
pub struct HardwareSampler {
    source: Box<dyn PadSource>,
    snapshots: [ControllerSnapshot; SLOT_COUNT],
    connected: [bool; SLOT_COUNT],
}

impl HardwareSampler {
    pub fn new(source: Box<dyn PadSource>) -> Self {
        debug!("Creating hardware sampler on '{}' backend", source.name());
        Self {
            source,
            snapshots: [ControllerSnapshot::neutral(); SLOT_COUNT],
            connected: [false; SLOT_COUNT],
        }
    }

    /// Replaces every slot with a fresh read
    ///
    /// Each slot is written as a whole. A slot that cannot be read becomes
    /// neutral, never a leftover from a previous frame.
    pub fn poll(&mut self) {
        self.source.refresh();
        for slot in 0..SLOT_COUNT {
            self.sample_slot(slot);
        }
        trace!("Polled {} slots", SLOT_COUNT);
    }

    /// Reads `slot` straight from the backend outside the regular poll
    ///
    /// The result is handed back only. The per-frame snapshots stay as the
    /// last poll left them, so button queries within a frame agree.
    pub fn read_fresh(&mut self, slot: usize) -> ControllerSnapshot {
        if slot >= SLOT_COUNT {
            return ControllerSnapshot::neutral();
        }
        self.source.refresh();
        self.source.read_slot(slot).unwrap_or_default()
    }

    fn sample_slot(&mut self, slot: usize) {
        let read = self.source.read_slot(slot);
        let connected = read.is_some();
        if connected != self.connected[slot] {
            debug!(
                "Slot {} {}",
                slot,
                if connected { "connected" } else { "disconnected" }
            );
            self.connected[slot] = connected;
        }
        self.snapshots[slot] = read.unwrap_or_default();
    }

    /// Snapshot of `slot` from the last poll, `None` past the slot limit
    pub fn snapshot(&self, slot: usize) -> Option<&ControllerSnapshot> {
        self.snapshots.get(slot)
    }

    pub fn snapshots(&self) -> &[ControllerSnapshot; SLOT_COUNT] {
        &self.snapshots
    }

    pub fn is_connected(&self, slot: usize) -> bool {
        self.connected.get(slot).copied().unwrap_or(false)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}
