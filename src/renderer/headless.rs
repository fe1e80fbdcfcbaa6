//! Headless presenter: logs overlay and HUD changes, keeps the latest
//! values for inspection.

use crate::sim::Alien;
use crate::ui::{Hud, Overlay, Presenter};

#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    pub frames: u64,
    /// Aliens drawn in the latest frame, with their highlight flag
    pub last_frame: Vec<(Alien, bool)>,
    pub hud: Option<Hud>,
    pub hud_refreshes: u64,
    /// Overlay currently shown, if any
    pub overlay: Option<Overlay>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighted aliens in the latest frame
    pub fn highlighted(&self) -> impl Iterator<Item = &Alien> {
        self.last_frame.iter().filter(|(_, h)| *h).map(|(a, _)| a)
    }
}

impl Presenter for HeadlessPresenter {
    fn clear_frame(&mut self) {
        self.frames += 1;
        self.last_frame.clear();
    }

    fn draw_alien(&mut self, alien: &Alien, highlighted: bool) {
        self.last_frame.push((alien.clone(), highlighted));
    }

    fn show_overlay(&mut self, overlay: &Overlay) {
        log::info!("[{}] {} ({})", overlay.title, overlay.message, overlay.button);
        self.overlay = Some(overlay.clone());
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn refresh_hud(&mut self, hud: &Hud) {
        log::debug!(
            "HUD target={} key={} score={} time={} best={}",
            hud.target_sum,
            hud.key,
            hud.score,
            hud.time_left,
            hud.high_score
        );
        self.hud = Some(*hud);
        self.hud_refreshes += 1;
    }
}
