// The layer between input and everything else. Owns the live flow, the
// current screen, and the saved list; applies one InputEvent at a time and
// hands back whatever AudioCommands the mutation calls for. Nothing here
// blocks: sounds were decoded at startup, so even slot changes are pure
// state plus a command send.

use std::path::PathBuf;

use crate::audio_api::AudioCommand;
use crate::catalog::SoundType;
use crate::flow::persistence;
use crate::flow::state::{FlowState, SavedFlow, SlotSound, sanitize_slots};
use crate::shared::{
    DEFAULT_SLOT_VOLUME, DisplayState, InputEvent, NUM_SLOTS, SavedFlowSummary, Screen,
};

pub struct Session {
    state: FlowState,
    screen: Screen,
    saved: Vec<SavedFlow>,
    base_dir: PathBuf,
    status: Option<String>,
}

impl Session {
    pub fn new(base_dir: PathBuf) -> Self {
        let saved = persistence::load_flows(&base_dir);
        Self {
            state: FlowState::default(),
            screen: Screen::Home,
            saved,
            base_dir,
            status: None,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<AudioCommand> {
        self.status = None; // confirmations live until the next event
        match event {
            InputEvent::NewFlow => self.new_flow(),
            InputEvent::OpenFlow(index) => self.open_flow(index),
            InputEvent::SlotPress(slot) => self.slot_press(slot),
            InputEvent::AdjustVolume(slot, delta) => self.adjust_volume(slot, delta),
            InputEvent::ClearSlot(slot) => self.clear_slot(slot),
            InputEvent::PlayPress => self.toggle_play(),
            InputEvent::SaveFlow(name) => self.save_flow(&name),
            InputEvent::Back => self.go_home(),
            InputEvent::SelectSound(sound) => self.select_sound(sound),
            InputEvent::ClosePicker => {
                self.state.active_slot = None;
                Vec::new()
            }
            InputEvent::Quit => Vec::new(), // main handles this before us
        }
    }

    /// Snapshot for the renderer. Rebuilt every frame; cheap enough to not
    /// bother caching.
    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            screen: self.screen,
            flow_name: self.state.name.clone(),
            playing: self.state.is_playing,
            slots: self.state.slots,
            picker_open: self.state.active_slot.is_some(),
            saved: self
                .saved
                .iter()
                .map(|f| SavedFlowSummary {
                    name: f.name.clone(),
                    layers: f.slots.iter().flatten().count(),
                })
                .collect(),
            status: self.status.clone(),
        }
    }

    // -- home screen --

    fn new_flow(&mut self) -> Vec<AudioCommand> {
        self.state = FlowState::default();
        self.screen = Screen::Mixer;
        vec![AudioCommand::ClearAll, AudioCommand::SetPlaying(false)]
    }

    fn open_flow(&mut self, index: usize) -> Vec<AudioCommand> {
        let Some(flow) = self.saved.get(index) else {
            log::warn!("open for unknown flow index {index}");
            return Vec::new();
        };
        // copy by value so mixer edits never reach the stored record, and
        // repair anything a hand-edited store let through
        self.state.name = flow.name.clone();
        self.state.slots = sanitize_slots(&flow.slots);
        self.state.active_slot = None;
        // is_playing is left alone: opening a flow neither starts nor stops
        // the master transport
        self.screen = Screen::Mixer;

        let mut cmds = vec![AudioCommand::ClearAll];
        for (slot, sound) in self.state.slots.iter().enumerate() {
            if let Some(s) = sound {
                cmds.push(AudioCommand::LoadSlot {
                    slot,
                    sound: s.sound,
                    variation: s.variation,
                    volume: s.volume,
                });
            }
        }
        cmds
    }

    fn go_home(&mut self) -> Vec<AudioCommand> {
        // playback deliberately keeps running while browsing
        self.saved = persistence::load_flows(&self.base_dir);
        self.state.active_slot = None;
        self.screen = Screen::Home;
        Vec::new()
    }

    // -- mixer screen --

    fn slot_press(&mut self, slot: usize) -> Vec<AudioCommand> {
        if slot >= NUM_SLOTS {
            log::warn!("slot press out of range: {slot}");
            return Vec::new();
        }
        match &mut self.state.slots[slot] {
            None => {
                // empty slot: pick a sound for it
                self.state.active_slot = Some(slot);
                Vec::new()
            }
            Some(s) => {
                // filled slot: cycle to the next take and reload the voice
                s.variation = s.sound.next_variation(s.variation);
                vec![AudioCommand::LoadSlot {
                    slot,
                    sound: s.sound,
                    variation: s.variation,
                    volume: s.volume,
                }]
            }
        }
    }

    fn select_sound(&mut self, sound: SoundType) -> Vec<AudioCommand> {
        let Some(slot) = self.state.active_slot.take() else {
            log::warn!("sound select with no slot waiting for one");
            return Vec::new();
        };
        let s = SlotSound {
            sound,
            variation: 1,
            volume: DEFAULT_SLOT_VOLUME,
        };
        self.state.slots[slot] = Some(s);
        vec![AudioCommand::LoadSlot {
            slot,
            sound: s.sound,
            variation: s.variation,
            volume: s.volume,
        }]
    }

    fn adjust_volume(&mut self, slot: usize, delta: f32) -> Vec<AudioCommand> {
        let Some(s) = self
            .state
            .slots
            .get_mut(slot)
            .and_then(Option::as_mut)
        else {
            log::warn!("volume nudge on empty slot {slot}");
            return Vec::new();
        };
        s.volume = (s.volume + delta).clamp(0.0, 1.0);
        // volume is the one edit that keeps the voice: no reload, position
        // and take stay where they are
        vec![AudioCommand::SetSlotVolume {
            slot,
            volume: s.volume,
        }]
    }

    fn clear_slot(&mut self, slot: usize) -> Vec<AudioCommand> {
        if slot >= NUM_SLOTS || self.state.slots[slot].is_none() {
            log::warn!("clear on empty slot {slot}");
            return Vec::new();
        }
        self.state.slots[slot] = None;
        vec![AudioCommand::ClearSlot { slot }]
    }

    fn toggle_play(&mut self) -> Vec<AudioCommand> {
        self.state.is_playing = !self.state.is_playing;
        vec![AudioCommand::SetPlaying(self.state.is_playing)]
    }

    fn save_flow(&mut self, name: &str) -> Vec<AudioCommand> {
        let name = name.trim();
        if name.is_empty() {
            // cancelled or blank prompt: the whole save is off
            return Vec::new();
        }
        match persistence::append_flow(&self.base_dir, name, &self.state.slots) {
            Ok(flow) => {
                self.state.name = flow.name.clone();
                self.saved.push(flow);
                self.status = Some(String::from("flow saved"));
            }
            Err(err) => {
                log::error!("could not save flow: {err}");
                self.status = Some(String::from("save failed"));
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::VOLUME_STEP;

    fn session() -> (Session, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (Session::new(dir.path().to_path_buf()), dir)
    }

    fn pick(session: &mut Session, slot: usize, sound: SoundType) -> Vec<AudioCommand> {
        session.handle_input(InputEvent::SlotPress(slot));
        session.handle_input(InputEvent::SelectSound(sound))
    }

    #[test]
    fn new_flow_resets_everything() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::River);
        s.handle_input(InputEvent::PlayPress);

        let cmds = s.handle_input(InputEvent::NewFlow);
        assert!(matches!(cmds[0], AudioCommand::ClearAll));
        assert!(matches!(cmds[1], AudioCommand::SetPlaying(false)));

        let ds = s.display_state();
        assert_eq!(ds.screen, Screen::Mixer);
        assert_eq!(ds.flow_name, "My Flow");
        assert!(!ds.playing);
        assert!(ds.slots.iter().all(Option::is_none));
    }

    #[test]
    fn empty_slot_press_opens_the_picker() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);

        let cmds = s.handle_input(InputEvent::SlotPress(2));
        assert!(cmds.is_empty());
        assert!(s.display_state().picker_open);

        s.handle_input(InputEvent::ClosePicker);
        assert!(!s.display_state().picker_open);
    }

    #[test]
    fn picking_a_sound_starts_at_take_one_half_volume() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);

        let cmds = pick(&mut s, 1, SoundType::Fire);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(
            cmds[0],
            AudioCommand::LoadSlot {
                slot: 1,
                sound: SoundType::Fire,
                variation: 1,
                volume,
            } if volume == DEFAULT_SLOT_VOLUME
        ));

        // prior content never leaks into a fresh pick
        s.handle_input(InputEvent::SlotPress(1)); // take 2
        s.handle_input(InputEvent::AdjustVolume(1, 0.3));
        s.handle_input(InputEvent::ClearSlot(1));
        pick(&mut s, 1, SoundType::Wind);
        let slot = s.display_state().slots[1].unwrap();
        assert_eq!(slot.variation, 1);
        assert_eq!(slot.volume, DEFAULT_SLOT_VOLUME);
    }

    #[test]
    fn filled_slot_presses_cycle_and_stay_in_range() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::Rain);

        let mut seen = Vec::new();
        for _ in 0..7 {
            let cmds = s.handle_input(InputEvent::SlotPress(0));
            assert!(matches!(cmds[0], AudioCommand::LoadSlot { .. }));
            let v = s.display_state().slots[0].unwrap().variation;
            assert!((1..=SoundType::Rain.variation_count()).contains(&v));
            seen.push(v);
        }
        // 1 -> 2 -> 3 -> wrap
        assert_eq!(seen, [2, 3, 1, 2, 3, 1, 2]);
    }

    #[test]
    fn volume_nudges_clamp_and_never_reload() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 3, SoundType::Insect);

        for _ in 0..40 {
            let cmds = s.handle_input(InputEvent::AdjustVolume(3, VOLUME_STEP));
            assert_eq!(cmds.len(), 1);
            assert!(matches!(cmds[0], AudioCommand::SetSlotVolume { slot: 3, .. }));
        }
        assert_eq!(s.display_state().slots[3].unwrap().volume, 1.0);

        for _ in 0..40 {
            s.handle_input(InputEvent::AdjustVolume(3, -VOLUME_STEP));
        }
        assert_eq!(s.display_state().slots[3].unwrap().volume, 0.0);
        // the take never moved
        assert_eq!(s.display_state().slots[3].unwrap().variation, 1);
    }

    #[test]
    fn clearing_a_slot_drops_state_and_voice() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 4, SoundType::Birds);

        let cmds = s.handle_input(InputEvent::ClearSlot(4));
        assert!(matches!(cmds[0], AudioCommand::ClearSlot { slot: 4 }));
        assert!(s.display_state().slots[4].is_none());
    }

    #[test]
    fn play_toggles_round_trip() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);

        let cmds = s.handle_input(InputEvent::PlayPress);
        assert!(matches!(cmds[0], AudioCommand::SetPlaying(true)));
        assert!(s.display_state().playing);

        let cmds = s.handle_input(InputEvent::PlayPress);
        assert!(matches!(cmds[0], AudioCommand::SetPlaying(false)));
        assert!(!s.display_state().playing);
    }

    #[test]
    fn empty_names_save_nothing() {
        let (mut s, dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::River);

        s.handle_input(InputEvent::SaveFlow(String::new()));
        s.handle_input(InputEvent::SaveFlow(String::from("   ")));

        assert!(persistence::load_flows(dir.path()).is_empty());
        assert!(s.display_state().status.is_none());
        assert!(s.display_state().saved.is_empty());
    }

    #[test]
    fn save_then_open_round_trips_the_configuration() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::River);
        s.handle_input(InputEvent::SlotPress(0)); // river take 2
        pick(&mut s, 5, SoundType::Fire);
        s.handle_input(InputEvent::AdjustVolume(5, VOLUME_STEP * 4.0));
        let before = s.display_state().slots;

        s.handle_input(InputEvent::SaveFlow(String::from("camp night")));
        assert_eq!(s.display_state().status.as_deref(), Some("flow saved"));
        assert_eq!(s.display_state().flow_name, "camp night");

        s.handle_input(InputEvent::Back);
        let ds = s.display_state();
        assert_eq!(ds.screen, Screen::Home);
        assert_eq!(ds.saved.len(), 1);
        assert_eq!(ds.saved[0].name, "camp night");
        assert_eq!(ds.saved[0].layers, 2);

        let cmds = s.handle_input(InputEvent::OpenFlow(0));
        assert!(matches!(cmds[0], AudioCommand::ClearAll));
        let loads = cmds
            .iter()
            .filter(|c| matches!(c, AudioCommand::LoadSlot { .. }))
            .count();
        assert_eq!(loads, 2);
        assert_eq!(s.display_state().slots, before);
    }

    #[test]
    fn mixer_edits_never_touch_the_stored_record() {
        let (mut s, dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 2, SoundType::Wind);
        s.handle_input(InputEvent::SaveFlow(String::from("baseline")));
        let stored_before = persistence::load_flows(dir.path());

        s.handle_input(InputEvent::Back);
        s.handle_input(InputEvent::OpenFlow(0));
        s.handle_input(InputEvent::SlotPress(2)); // cycle the take
        s.handle_input(InputEvent::AdjustVolume(2, -VOLUME_STEP));
        s.handle_input(InputEvent::ClearSlot(2));

        assert_eq!(persistence::load_flows(dir.path()), stored_before);
    }

    #[test]
    fn opening_a_flow_leaves_the_transport_alone() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::Rain);
        s.handle_input(InputEvent::SaveFlow(String::from("drizzle")));
        s.handle_input(InputEvent::PlayPress); // playing while we browse
        s.handle_input(InputEvent::Back);
        assert!(s.display_state().playing);

        let cmds = s.handle_input(InputEvent::OpenFlow(0));
        assert!(s.display_state().playing);
        assert!(
            cmds.iter()
                .all(|c| !matches!(c, AudioCommand::SetPlaying(_)))
        );
    }

    #[test]
    fn stored_out_of_range_values_open_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join(".flowtty");
        std::fs::create_dir_all(&store).unwrap();
        std::fs::write(
            store.join("flows.json"),
            r#"[{"id": 7, "name": "weird", "slots":
                [{"type": "river", "variation": 9, "volume": 7.0},
                 null, null, null, null, null]}]"#,
        )
        .unwrap();

        let mut s = Session::new(dir.path().to_path_buf());
        s.handle_input(InputEvent::OpenFlow(0));
        let slot = s.display_state().slots[0].unwrap();
        assert_eq!(slot.variation, SoundType::River.variation_count());
        assert_eq!(slot.volume, 1.0);
    }

    #[test]
    fn preconditions_fail_quietly() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);

        assert!(s.handle_input(InputEvent::SelectSound(SoundType::Fire)).is_empty());
        assert!(s.handle_input(InputEvent::AdjustVolume(0, 0.1)).is_empty());
        assert!(s.handle_input(InputEvent::ClearSlot(0)).is_empty());
        assert!(s.handle_input(InputEvent::SlotPress(NUM_SLOTS)).is_empty());
        assert!(s.handle_input(InputEvent::OpenFlow(3)).is_empty());
        assert!(s.display_state().slots.iter().all(Option::is_none));
    }

    #[test]
    fn status_clears_on_the_next_event() {
        let (mut s, _dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::Birds);
        s.handle_input(InputEvent::SaveFlow(String::from("aviary")));
        assert!(s.display_state().status.is_some());

        s.handle_input(InputEvent::PlayPress);
        assert!(s.display_state().status.is_none());
    }

    #[test]
    fn duplicate_names_are_fine() {
        let (mut s, dir) = session();
        s.handle_input(InputEvent::NewFlow);
        pick(&mut s, 0, SoundType::River);
        s.handle_input(InputEvent::SaveFlow(String::from("same")));
        s.handle_input(InputEvent::SaveFlow(String::from("same")));

        let flows = persistence::load_flows(dir.path());
        assert_eq!(flows.len(), 2);
        assert_ne!(flows[0].id, flows[1].id);
    }
}
