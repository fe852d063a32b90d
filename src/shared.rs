// Shared vocabulary between the tui and the session layer.
//
// The rendering model: the session owns all mixer state, and every frame the
// tui asks it for a DisplayState and draws exactly that. Input goes the other
// way: tui/input.rs resolves key presses into semantic InputEvents, the
// session applies them and hands back the AudioCommands the mutation needs.
// The tui never touches slots, saved flows, or the engine directly.

use crate::catalog::SoundType;
use crate::flow::state::SlotSound;

pub const NUM_SLOTS: usize = 6;
pub const DEFAULT_SLOT_VOLUME: f32 = 0.5;
pub const VOLUME_STEP: f32 = 0.05;

/// Which top-level screen is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Mixer,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // home screen
    NewFlow,
    OpenFlow(usize), // index into the saved list, storage order

    // mixer screen
    SlotPress(usize), // empty slot opens the picker, filled slot cycles the take
    AdjustVolume(usize, f32), // signed nudge, session clamps to [0, 1]
    ClearSlot(usize),
    PlayPress,
    SaveFlow(String), // name collected by the prompt; empty aborts the save
    Back,

    // picker
    SelectSound(SoundType),
    ClosePicker,

    // q or esc on the home screen
    Quit,
}

/// Snapshot the renderer draws from. Rebuilt by the session every frame.
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub screen: Screen,
    pub flow_name: String,
    pub playing: bool,
    pub slots: [Option<SlotSound>; NUM_SLOTS],
    pub picker_open: bool,
    pub saved: Vec<SavedFlowSummary>,
    /// Transient confirmation line, e.g. after a save. Cleared by the next
    /// handled event.
    pub status: Option<String>,
}

/// One row of the home screen's saved-flows list.
#[derive(Clone, Debug)]
pub struct SavedFlowSummary {
    pub name: String,
    /// How many of the six slots are filled.
    pub layers: usize,
}
