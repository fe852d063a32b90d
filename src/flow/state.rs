// Core flow data: what a slot holds, the live session state, and the durable
// record. Playback handles never appear here; those live engine-side only.

use serde::{Deserialize, Serialize};

use crate::catalog::SoundType;
use crate::shared::{DEFAULT_SLOT_VOLUME, NUM_SLOTS};

/// One configured layer: which sound, which take, how loud.
///
/// The serialized field name for `sound` is `"type"`, matching the durable
/// store format (`{"type":"river","variation":1,"volume":0.5}`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotSound {
    #[serde(rename = "type")]
    pub sound: SoundType,
    pub variation: u8,
    pub volume: f32,
}

/// A flow is always exactly six slots; empty slots serialize as null.
pub type Slots = [Option<SlotSound>; NUM_SLOTS];

/// Live editing session. Transient; nothing here is persisted directly.
#[derive(Clone, Debug)]
pub struct FlowState {
    pub name: String,
    pub is_playing: bool,
    pub slots: Slots,
    /// Slot the picker is currently filling. Set iff the picker is open.
    pub active_slot: Option<usize>,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            name: String::from("My Flow"),
            is_playing: false,
            slots: [None; NUM_SLOTS],
            active_slot: None,
        }
    }
}

/// Durable record of a saved flow.
///
/// `id` is the save time in unix millis, bumped past older ids so it stays
/// unique even for back-to-back saves (see `persistence::next_flow_id`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedFlow {
    pub id: u64,
    pub name: String,
    pub slots: Slots,
}

/// Pull a stored slot configuration back inside the catalog's invariants.
///
/// Hand-edited or stale store files can carry out-of-range takes or volumes;
/// opening such a flow repairs the copy instead of refusing it. The stored
/// record itself is left untouched.
pub fn sanitize_slots(slots: &Slots) -> Slots {
    let mut out = *slots;
    for slot in out.iter_mut().flatten() {
        let max = slot.sound.variation_count();
        if !(1..=max).contains(&slot.variation) {
            log::warn!(
                "take {} out of range for {}, clamping",
                slot.variation,
                slot.sound.key()
            );
            slot.variation = slot.variation.clamp(1, max);
        }
        if !slot.volume.is_finite() {
            log::warn!("non-finite volume for {}, resetting", slot.sound.key());
            slot.volume = DEFAULT_SLOT_VOLUME;
        } else if !(0.0..=1.0).contains(&slot.volume) {
            log::warn!(
                "volume {} out of range for {}, clamping",
                slot.volume,
                slot.sound.key()
            );
            slot.volume = slot.volume.clamp(0.0, 1.0);
        }
    }
    out
}
