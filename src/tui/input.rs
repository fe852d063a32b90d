use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use super::mode::TuiState;
use crate::catalog::SoundType;
use crate::shared::{InputEvent, NUM_SLOTS, Screen, VOLUME_STEP};

// Poll for one key and resolve it into semantic input events. Resolution is
// by mode precedence: an open name prompt eats every key, then an open
// picker, then the current screen. One press, one handler.
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code, ts));
    }
    Ok(vec![])
}

pub fn handle_key(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    if ts.name_entry.is_some() {
        return handle_name_entry(code, ts);
    }
    if ts.picker_open {
        return handle_picker(code, ts);
    }
    match ts.screen {
        Screen::Home => handle_home(code, ts),
        Screen::Mixer => handle_mixer(code, ts),
    }
}

fn handle_name_entry(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    let Some(entry) = ts.name_entry.as_mut() else {
        return vec![];
    };
    match code {
        KeyCode::Char(c) => {
            entry.push(c);
            vec![]
        }
        KeyCode::Backspace => {
            entry.pop();
            vec![]
        }
        KeyCode::Enter => {
            // the session rejects blank names, so just hand over what we have
            let name = ts.name_entry.take().unwrap_or_default();
            vec![InputEvent::SaveFlow(name)]
        }
        KeyCode::Esc => {
            ts.name_entry = None; // cancelled, nothing saved
            vec![]
        }
        _ => vec![],
    }
}

fn handle_picker(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    let count = SoundType::ALL.len();
    match code {
        // direct pick by number
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            vec![InputEvent::SelectSound(SoundType::ALL[index])]
        }
        KeyCode::Char('j') | KeyCode::Down => {
            ts.picker_cursor = (ts.picker_cursor + 1).min(count - 1);
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            ts.picker_cursor = ts.picker_cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Enter => vec![InputEvent::SelectSound(SoundType::ALL[ts.picker_cursor])],
        KeyCode::Esc => vec![InputEvent::ClosePicker],
        _ => vec![],
    }
}

fn handle_home(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            if ts.saved_count > 0 {
                ts.home_cursor = (ts.home_cursor + 1).min(ts.saved_count - 1);
            }
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            ts.home_cursor = ts.home_cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Enter => {
            if ts.saved_count > 0 {
                vec![InputEvent::OpenFlow(ts.home_cursor)]
            } else {
                vec![]
            }
        }
        KeyCode::Char('n') => vec![InputEvent::NewFlow],
        KeyCode::Char('q') | KeyCode::Esc => vec![InputEvent::Quit],
        _ => vec![],
    }
}

fn handle_mixer(code: KeyCode, ts: &mut TuiState) -> Vec<InputEvent> {
    match code {
        // number keys press the slot directly and pull the cursor along
        KeyCode::Char(c @ '1'..='6') => {
            let slot = c as usize - '1' as usize;
            ts.slot_cursor = slot;
            vec![InputEvent::SlotPress(slot)]
        }
        KeyCode::Enter => vec![InputEvent::SlotPress(ts.slot_cursor)],

        // cursor movement over the 3x2 grid
        KeyCode::Char('h') | KeyCode::Left => {
            ts.slot_cursor = step_cursor(ts.slot_cursor, -1);
            vec![]
        }
        KeyCode::Char('l') | KeyCode::Right => {
            ts.slot_cursor = step_cursor(ts.slot_cursor, 1);
            vec![]
        }
        KeyCode::Char('j') | KeyCode::Down => {
            ts.slot_cursor = step_cursor(ts.slot_cursor, 3);
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            ts.slot_cursor = step_cursor(ts.slot_cursor, -3);
            vec![]
        }

        // volume knob, two key pairs like one would expect from a mixer
        KeyCode::Char('[') | KeyCode::Char('-') => {
            vec![InputEvent::AdjustVolume(ts.slot_cursor, -VOLUME_STEP)]
        }
        KeyCode::Char(']') | KeyCode::Char('=') => {
            vec![InputEvent::AdjustVolume(ts.slot_cursor, VOLUME_STEP)]
        }

        KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
            vec![InputEvent::ClearSlot(ts.slot_cursor)]
        }
        KeyCode::Char(' ') => vec![InputEvent::PlayPress],
        KeyCode::Char('s') => {
            // prompt opens prefilled with the current name
            ts.name_entry = Some(ts.flow_name.clone());
            vec![]
        }
        KeyCode::Esc => vec![InputEvent::Back],
        _ => vec![],
    }
}

fn step_cursor(cursor: usize, delta: isize) -> usize {
    (cursor as isize + delta).rem_euclid(NUM_SLOTS as isize) as usize
}
