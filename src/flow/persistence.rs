// durable store for saved flows; loaded on startup and on every return home,
// appended to on save
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::flow::state::{SavedFlow, Slots};

const FLOWTTY_DIR: &str = ".flowtty";
const FLOWS_FILE: &str = "flows.json";

// <base_dir>/.flowtty/flows.json
pub fn flows_file_path(base_dir: &Path) -> PathBuf {
    base_dir.join(FLOWTTY_DIR).join(FLOWS_FILE)
}

/// Read every saved flow, oldest first (file order is append order).
///
/// A missing file is the normal first-run case and yields an empty list
/// silently; an unreadable or malformed file also yields an empty list but
/// gets logged, so a typo in a hand-edited store doesn't take the app down.
pub fn load_flows(base_dir: &Path) -> Vec<SavedFlow> {
    let path = flows_file_path(base_dir);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            log::warn!("could not read {}: {}", path.display(), err);
            return Vec::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(flows) => flows,
        Err(err) => {
            log::warn!("could not parse {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

/// Append one flow to the store and return the record that was written.
///
/// The store is small (a handful of flows), so this is a plain
/// read-modify-write of the whole file rather than anything incremental.
pub fn append_flow(base_dir: &Path, name: &str, slots: &Slots) -> anyhow::Result<SavedFlow> {
    let mut flows = load_flows(base_dir);
    let flow = SavedFlow {
        id: next_flow_id(now_millis(), &flows),
        name: name.to_string(),
        slots: *slots,
    };
    flows.push(flow.clone());
    save_flows(base_dir, &flows)?;
    Ok(flow)
}

// Overwrite the store with the full list, making .flowtty/ if needed.
fn save_flows(base_dir: &Path, flows: &[SavedFlow]) -> anyhow::Result<()> {
    let path = flows_file_path(base_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(flows)?;
    std::fs::write(&path, json)?;
    Ok(())
}

/// Ids are save timestamps in unix millis, bumped past any id already in the
/// store so two saves inside the same millisecond still come out distinct.
fn next_flow_id(now: u64, flows: &[SavedFlow]) -> u64 {
    let floor = flows.iter().map(|f| f.id + 1).max().unwrap_or(0);
    now.max(floor)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
