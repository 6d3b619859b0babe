//! Terminal driver: polls input, steps the session at a fixed cadence and
//! feeds snapshots to the screen.

use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::term::Screen;
use gridsnake::{Direction, GameConfig, GameEvent, GameSession, Snapshot};

// Input polling cadence; game steps happen every 1/tick_rate seconds.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub struct App {
    session: GameSession,
    screen: Screen,
    step: Duration,
    paused: bool,
}

impl App {
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        let session = GameSession::new(&config)?;
        let screen = Screen::new(session.grid().cells_wide(), session.grid().cells_high())?;
        let step = Duration::from_secs_f64(1.0 / f64::from(config.tick_rate));
        Ok(App { session, screen, step, paused: false })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.screen.setup()?;
        let outcome = self.main_loop();
        // Leave the terminal usable even when the loop errored out.
        let restored = self.screen.restore();
        outcome?;
        restored?;
        Ok(())
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }
        while self.play_round()? {
            self.session.restart();
        }
        Ok(())
    }

    /// Returns false when the player quits from the intro screen.
    fn show_intro(&mut self) -> anyhow::Result<bool> {
        self.screen.overlay(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;
        Ok(!is_ctrl_c(&self.screen.read_key_blocking()?))
    }

    /// One game from the current session state to game over. Returns true
    /// to play again, false to quit.
    fn play_round(&mut self) -> anyhow::Result<bool> {
        self.paused = false;
        let snap = self.session.snapshot();
        self.repaint(&snap)?;
        let mut prev = snap;
        let mut last_step = Instant::now();

        loop {
            sleep(POLL_INTERVAL);

            for key in self.screen.poll_keys()? {
                if is_ctrl_c(&key) {
                    return Ok(false);
                }
                match key.code {
                    KeyCode::Char('w') | KeyCode::Up => self.session.set_heading(Direction::Up),
                    KeyCode::Char('a') | KeyCode::Left => self.session.set_heading(Direction::Left),
                    KeyCode::Char('s') | KeyCode::Down => self.session.set_heading(Direction::Down),
                    KeyCode::Char('d') | KeyCode::Right => {
                        self.session.set_heading(Direction::Right)
                    }
                    KeyCode::Esc => self.toggle_pause(&prev)?,
                    _ => {}
                }
            }

            if self.paused {
                last_step = Instant::now();
                continue;
            }

            let elapsed = last_step.elapsed();
            if elapsed < self.step {
                continue;
            }
            last_step = Instant::now();

            let events = self.session.tick(elapsed.as_secs_f32());
            let snap = self.session.snapshot();
            let mut ended = false;
            for event in events {
                match event {
                    GameEvent::FoodConsumed(cell) => {
                        debug!(?cell, "food consumed");
                        self.screen.bell()?;
                    }
                    GameEvent::GameEnded => ended = true,
                }
            }

            if ended {
                return self.game_over(&snap);
            }

            self.screen.render(Some(&prev), &snap)?;
            prev = snap;
        }
    }

    fn game_over(&mut self, snap: &Snapshot) -> anyhow::Result<bool> {
        self.screen.render(None, snap)?;
        self.screen.draw_dead(snap)?;
        self.screen.overlay(&[
            "Game over!",
            &format!("Score: {}", snap.score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit.",
        ])?;
        Ok(!is_ctrl_c(&self.screen.read_key_blocking()?))
    }

    fn toggle_pause(&mut self, snap: &Snapshot) -> anyhow::Result<()> {
        self.paused = !self.paused;
        if self.paused {
            self.screen
                .overlay(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.repaint(snap)?;
        }
        Ok(())
    }

    // Full redraw: used after overlays, which do not save what they cover.
    fn repaint(&mut self, snap: &Snapshot) -> anyhow::Result<()> {
        self.screen.clear()?;
        self.screen.draw_border()?;
        self.screen.render(None, snap)?;
        Ok(())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
    )
}
