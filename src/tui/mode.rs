use crate::shared::{DisplayState, NUM_SLOTS, Screen};

// State local to the tui: cursors and the in-progress name entry. Everything
// the session owns arrives through sync() each frame; the cursors never feed
// back into the session, they only shape which InputEvent a key becomes.
#[derive(Clone, Debug)]
pub struct TuiState {
    // synced from DisplayState each frame
    pub screen: Screen,
    pub picker_open: bool,
    pub playing: bool,
    pub saved_count: usize,
    pub flow_name: String,
    // local cursors
    pub home_cursor: usize,
    pub slot_cursor: usize,
    pub picker_cursor: usize,
    // Some while the save prompt is open; the buffer is the typed name
    pub name_entry: Option<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            picker_open: false,
            playing: false,
            saved_count: 0,
            flow_name: String::new(),
            home_cursor: 0,
            slot_cursor: 0,
            picker_cursor: 0,
            name_entry: None,
        }
    }
}

impl TuiState {
    pub fn sync(&mut self, ds: &DisplayState) {
        self.screen = ds.screen;
        self.playing = ds.playing;
        self.flow_name = ds.flow_name.clone();

        self.saved_count = ds.saved.len();
        // the list can shrink under the cursor (fresh store, reload)
        self.home_cursor = self.home_cursor.min(self.saved_count.saturating_sub(1));
        self.slot_cursor = self.slot_cursor.min(NUM_SLOTS - 1);

        if ds.picker_open && !self.picker_open {
            self.picker_cursor = 0; // fresh picker starts at the top
        }
        self.picker_open = ds.picker_open;
    }
}
