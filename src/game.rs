//! Session lifecycle
//!
//! [`Game`] owns the simulation state and its three collaborators: a
//! presenter for output, a store for the high score, and a scheduler for the
//! frame loop and countdown. Sessions go Idle -> Active on [`Game::start`]
//! and back to Idle when the countdown runs out.

use glam::Vec2;

use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::platform::{ManualScheduler, Scheduler, TaskHandle};
use crate::settings::Settings;
use crate::sim::{
    Alien, Arena, AutoPlayer, GameEvent, GamePhase, GameState, Hit, generate_wave, resolve_click,
    tick,
};
use crate::ui::{Hud, Overlay, Presenter};

pub struct Game<P, S, K>
where
    P: Presenter,
    S: HighScoreStore,
    K: Scheduler,
{
    pub state: GameState,
    settings: Settings,
    high_score: HighScore,
    presenter: P,
    store: S,
    scheduler: K,
    frames: Option<TaskHandle>,
    countdown: Option<TaskHandle>,
}

impl<P, S, K> Game<P, S, K>
where
    P: Presenter,
    S: HighScoreStore,
    K: Scheduler,
{
    /// Load the high score and show the title overlay. No session runs yet.
    pub fn new(
        seed: u64,
        arena: Arena,
        settings: Settings,
        presenter: P,
        store: S,
        scheduler: K,
    ) -> Self {
        let settings = settings.sanitized();
        let high_score = HighScore::load(&store);

        let mut state = GameState::new(seed, arena);
        state.time_left = settings.round_seconds;
        state.hint_limit = settings.hint_limit();

        let mut game = Self {
            state,
            settings,
            high_score,
            presenter,
            store,
            scheduler,
            frames: None,
            countdown: None,
        };
        game.refresh_hud();
        game.presenter
            .show_overlay(&Overlay::title_screen(game.high_score.best()));
        game
    }

    /// Begin a new session, tearing down any session already running
    pub fn start(&mut self) {
        self.cancel_tasks();

        self.state.begin_session(self.settings.round_seconds);
        self.state.hint_limit = self.settings.hint_limit();
        self.presenter.hide_overlay();

        generate_wave(&mut self.state);
        self.refresh_hud();
        self.step();

        self.frames = Some(self.scheduler.start_frames());
        self.countdown = Some(self.scheduler.start_countdown(COUNTDOWN_PERIOD_MS));
        log::info!(
            "Session started ({}s, seed {})",
            self.settings.round_seconds,
            self.state.seed
        );
    }

    /// Frame callback from the scheduler
    pub fn on_frame(&mut self, handle: TaskHandle) {
        if self.frames != Some(handle) {
            return;
        }
        self.step();
    }

    /// Countdown callback from the scheduler
    pub fn on_countdown(&mut self, handle: TaskHandle) {
        if self.countdown != Some(handle) || !self.state.is_active() {
            return;
        }
        self.state.time_left = self.state.time_left.saturating_sub(1);
        self.refresh_hud();
        if self.state.time_left == 0 {
            self.end();
        }
    }

    /// Pointer-down at `point` in canvas coordinates
    pub fn click(&mut self, point: Vec2) -> Vec<Hit> {
        let hits = resolve_click(&mut self.state, point);
        if !hits.is_empty() {
            self.refresh_hud();
        }
        hits
    }

    /// Whether the presenter should highlight `alien`
    pub fn is_highlighted(&self, alien: &Alien) -> bool {
        self.state.hint_visible(alien)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            target_sum: self.state.puzzle.target_sum,
            key: self.state.puzzle.key,
            score: self.state.score,
            time_left: self.state.time_left,
            high_score: self.high_score.best(),
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &K {
        &self.scheduler
    }

    pub fn frame_task(&self) -> Option<TaskHandle> {
        self.frames
    }

    pub fn countdown_task(&self) -> Option<TaskHandle> {
        self.countdown
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Simulate and draw one frame
    fn step(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let before = self.state.events.len();
        tick(&mut self.state);
        self.draw();
        // Penalties and respawns change the HUD
        if self.state.events.len() != before {
            self.refresh_hud();
        }
    }

    fn draw(&mut self) {
        self.presenter.clear_frame();
        for alien in &self.state.aliens {
            let highlighted = self.state.hint_visible(alien);
            self.presenter.draw_alien(alien, highlighted);
        }
    }

    fn end(&mut self) {
        self.state.phase = GamePhase::Idle;
        self.cancel_tasks();

        let score = self.state.score;
        let new_high_score = self.high_score.submit(score, &mut self.store);
        let best = self.high_score.best();
        self.state.events.push(GameEvent::SessionEnded {
            score,
            high_score: best,
            new_high_score,
        });

        self.refresh_hud();
        self.presenter
            .show_overlay(&Overlay::game_over(score, best, new_high_score));
        log::info!(
            "Session over: score {} (best {}{})",
            score,
            best,
            if new_high_score { ", new record" } else { "" }
        );
    }

    fn cancel_tasks(&mut self) {
        if let Some(handle) = self.frames.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn refresh_hud(&mut self) {
        let hud = self.hud();
        self.presenter.refresh_hud(&hud);
    }
}

/// Totals for one headless session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub waves: u32,
    pub correct_hits: u32,
    pub wrong_hits: u32,
    pub solutions_missed: u32,
}

impl<P, S> Game<P, S, ManualScheduler>
where
    P: Presenter,
    S: HighScoreStore,
{
    /// Play one full session with `player` clicking, pumping the countdown
    /// once every `frames_per_second` frames.
    pub fn run_headless(&mut self, player: &mut AutoPlayer, frames_per_second: u32) -> SessionSummary {
        let frames_per_second = frames_per_second.max(1);
        let mut summary = SessionSummary::default();

        self.start();
        let mut frame: u64 = 0;
        while self.state.is_active() {
            if let Some(handle) = self.frames {
                self.on_frame(handle);
            }
            if let Some(point) = player.next_click(&self.state) {
                self.click(point);
            }

            frame += 1;
            if frame % u64::from(frames_per_second) == 0 {
                if let Some(handle) = self.countdown {
                    self.on_countdown(handle);
                }
            }

            for event in self.drain_events() {
                match event {
                    GameEvent::WaveSpawned { .. } => summary.waves += 1,
                    GameEvent::CorrectHit { .. } => summary.correct_hits += 1,
                    GameEvent::WrongHit { .. } => summary.wrong_hits += 1,
                    GameEvent::SolutionMissed { .. } => summary.solutions_missed += 1,
                    GameEvent::SessionEnded {
                        score,
                        high_score,
                        new_high_score,
                    } => {
                        summary.score = score;
                        summary.high_score = high_score;
                        summary.new_high_score = new_high_score;
                    }
                }
            }
        }
        summary
    }
}
