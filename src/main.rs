//! Terminal recall runner (default binary).
//!
//! Mouse clicks stand in for taps; holding the button on the start box opens
//! the difficulty menu. It uses crossterm for input and the framebuffer
//! renderer from the term crate.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tui_recall::feedback::{dispatch, CueSet, TerminalFeedback};
use tui_recall::input::{handle_key_event, should_quit};
use tui_recall::term::{FrameBuffer, TerminalRenderer, Viewport};
use tui_recall::types::TICK_MS;
use tui_recall::{logging, App, RecallConfig, TickClock};

fn main() -> Result<()> {
    let config = RecallConfig::from_env();
    logging::init(&config)?;
    info!(
        seed = config.seed,
        difficulty = config.difficulty.as_str(),
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &RecallConfig) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(config.seed, config.difficulty, Viewport::new(w, h));
    let mut feedback = TerminalFeedback::stdout(config.bell, config.asset_dir.clone().map(CueSet::new));
    let mut fb = FrameBuffer::new(w, h);

    let mut clock = TickClock::new(Instant::now(), Duration::from_millis(TICK_MS as u64));

    loop {
        app.render_into(&mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        if event::poll(clock.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.handle_key_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                Event::Resize(w, h) => {
                    app.resize(Viewport::new(w, h));
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick with wall time so the result screen reports real seconds.
        if let Some(ms) = clock.advance(Instant::now()) {
            app.tick(ms);
        }

        dispatch(&mut feedback, app.take_feedback());
    }
}
