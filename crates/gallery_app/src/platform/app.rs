use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use gallery_core::{update, GalleryState, GalleryViewModel, Msg};
use gallery_engine::EngineHandle;
use gallery_logging::{gallery_info, gallery_warn};

use super::config::{config_path, load_config};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_line, Command, HELP};
use super::ui::render::render;

/// How long the loop waits for input before checking the engine again.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> anyhow::Result<()> {
    let path = config_path();
    let loaded = load_config(&path);
    logging::initialize(loaded.config.log_destination);
    for warning in &loaded.warnings {
        gallery_warn!("{}", warning);
    }
    let config = loaded.config;
    gallery_info!("Starting gallery with config from {:?}", path);

    let engine = EngineHandle::new(config.fetch_settings()).context("starting page engine")?;
    let mut session = GallerySession::new(
        GalleryState::with_page_size(config.page_size),
        EffectRunner::new(engine),
    );

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("gallery-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("starting input reader")?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;
    session.dispatch(Msg::LoadMore);

    let mut input_closed = false;
    loop {
        if let Some(view) = session.pump() {
            write!(stdout, "{}", render(&view))?;
            stdout.flush()?;
        }

        if input_closed {
            // Piped input: let outstanding requests finish before leaving.
            if !session.state().is_loading() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        match line_rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match parse_line(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(stdout, "{HELP}")?,
                Ok(Command::Open(n)) => {
                    if !session.open_card(n) {
                        writeln!(stdout, "no card {n} in the current view")?;
                    }
                }
                Ok(Command::Msg(msg)) => session.dispatch(msg),
                Err(problem) => writeln!(stdout, "{problem}\n{HELP}")?,
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => input_closed = true,
        }
    }

    gallery_info!("Gallery closed with {} items loaded", session.state().items().len());
    Ok(())
}

/// Owns the loader state for one gallery view and connects it to the engine.
struct GallerySession {
    state: GalleryState,
    runner: EffectRunner,
    /// `loading` as of the last returned view. A failed page changes it
    /// without marking the state dirty.
    drawn_loading: bool,
}

impl GallerySession {
    fn new(state: GalleryState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            drawn_loading: false,
        }
    }

    fn state(&self) -> &GalleryState {
        &self.state
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut pending = vec![msg];
        while let Some(msg) = pending.pop() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            pending.extend(self.runner.enqueue(effects));
        }
    }

    /// Resolves a 1-based card number against the visible cards.
    fn open_card(&mut self, n: usize) -> bool {
        let Some(index) = n.checked_sub(1) else {
            return false;
        };
        let public_id = match self.state.visible_items().nth(index) {
            Some(item) => item.public_id.clone(),
            None => return false,
        };
        self.dispatch(Msg::CardSelected { public_id });
        true
    }

    /// Applies finished fetches; returns a fresh view when anything changed
    /// or the loading indicator went stale.
    fn pump(&mut self) -> Option<GalleryViewModel> {
        for msg in self.runner.poll() {
            self.dispatch(msg);
        }
        let changed = self.state.consume_dirty();
        let loading = self.state.is_loading();
        if !changed && loading == self.drawn_loading {
            return None;
        }
        self.drawn_loading = loading;
        Some(self.state.view())
    }
}
