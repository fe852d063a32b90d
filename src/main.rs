mod audio;
mod audio_api;
mod catalog;
mod flow;
mod loader;
mod session;
mod shared;
mod tui;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::terminal;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use audio_api::AudioCommand;
use session::Session;
use shared::InputEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let base_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    init_logger(&base_dir);

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope

    // No output device, no sound, but the mixer still works; every send
    // below goes through the Option.
    let audio = match audio::start_audio() {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::error!("audio disabled: {err}");
            None
        }
    };

    // decode the whole catalog once, up front; slot presses stay disk-free
    if let Some(audio) = &audio {
        let sounds = loader::sound_loader::load_all(&base_dir, audio.sample_rate());
        for (sound, variation, buffer) in sounds {
            audio.send(AudioCommand::RegisterSound {
                sound,
                variation,
                buffer,
            });
        }
    }

    let mut session = Session::new(base_dir);

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(16); // ~60fps
    let blink_start = Instant::now();
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let blink_on = (blink_start.elapsed().as_millis() / 250) % 2 == 0;
        let ds = session.display_state();
        tui_state.sync(&ds);

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds, &tui_state, blink_on);
        })?;

        let events = tui::input::poll_input(tick_rate, &mut tui_state)?;
        for event in events {
            if event == InputEvent::Quit {
                return Ok(());
            }
            for cmd in session.handle_input(event) {
                if let Some(audio) = &audio {
                    audio.send(cmd);
                }
            }
        }
    }
}

// Log to a file under the store dir: stderr belongs to the raw-mode tui, so
// writing there would garble the screen. RUST_LOG still controls the filter.
fn init_logger(base_dir: &Path) {
    let log_dir = base_dir.join(".flowtty");
    let file = std::fs::create_dir_all(&log_dir)
        .ok()
        .and_then(|_| std::fs::File::create(log_dir.join("flowtty.log")).ok());

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(file) = file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
