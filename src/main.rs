//! Terminal runner.
//!
//! One loop iteration: draw, wait for input until the next frame is due,
//! then apply this frame's held-key actions, tick the game once and hand the
//! resulting events to the cue sink and the high-score store.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::info;

use gb_tetris::config::{self, AppConfig};
use gb_tetris::core::GameState;
use gb_tetris::cues::CueSink;
use gb_tetris::high_score::{load_or_zero, save_or_warn, HighScoreStore, JsonFileStore};
use gb_tetris::input::{handle_key_event, should_quit, should_toggle_sound, InputHandler};
use gb_tetris::logging;
use gb_tetris::term::{FrameBuffer, GameView, HostStatus, TerminalRenderer, Viewport};
use gb_tetris::types::{GameAction, GameEvent, TICK_MS};

fn main() -> Result<()> {
    // Logger first so config warnings reach the log file.
    logging::init(config::log_path_from_env().as_deref())?;
    let config = AppConfig::from_env();
    info!("starting with seed {}", config.seed);

    let mut store = JsonFileStore::new(&config.high_score_path);
    let high_score = load_or_zero(&mut store);
    let mut game = GameState::new(config.seed).with_high_score(high_score);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game, &mut store, &config);
    // Restore the terminal even if the loop failed.
    let restored = term.exit();

    if game.high_score() > high_score {
        save_or_warn(&mut store, game.high_score());
    }
    info!("exit, best {}", game.high_score());
    result.and(restored)
}

struct Host<'a> {
    game: &'a mut GameState,
    input: InputHandler,
    cues: CueSink,
    store: &'a mut dyn HighScoreStore,
}

impl Host<'_> {
    fn apply(&mut self, action: GameAction) {
        if action == GameAction::Reset {
            self.input.reset();
        }
        self.game.apply_action(action);
    }

    /// Returns `false` when the player asked to quit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.kind {
            KeyEventKind::Press => {
                if should_quit(key) {
                    return false;
                }
                if should_toggle_sound(key) {
                    let on = self.cues.toggle();
                    info!("sound {}", if on { "on" } else { "off" });
                    return true;
                }
                if let Some(action) = self.input.handle_key_press(key.code) {
                    self.apply(action);
                    return true;
                }
                match handle_key_event(key) {
                    // Held keys are owned by the input handler.
                    Some(GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop) | None => {}
                    Some(action) => self.apply(action),
                }
            }
            // DAS/ARR produces repeats itself.
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => self.input.handle_key_release(key.code),
        }
        true
    }

    fn frame(&mut self) -> Result<()> {
        for action in self.input.update(TICK_MS) {
            self.apply(action);
        }
        self.game.tick(TICK_MS);

        let best = self.game.high_score();
        for event in self.game.drain_events() {
            match event {
                GameEvent::HighScore { score } => save_or_warn(self.store, score),
                GameEvent::GameOver { score } => {
                    info!("game over at {}", score);
                    save_or_warn(self.store, best);
                }
                _ => {}
            }
            self.cues.play_events([event])?;
        }
        Ok(())
    }
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    store: &mut dyn HighScoreStore,
    config: &AppConfig,
) -> Result<()> {
    let mut host = Host {
        game,
        input: InputHandler::with_config(config.das_ms, config.arr_ms),
        cues: CueSink::stdout(),
        store,
    };
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let status = HostStatus {
            sound_on: host.cues.enabled(),
        };
        view.render_into(&host.game.snapshot(), status, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if !host.on_key(key) {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            host.frame()?;
        }
    }
}
