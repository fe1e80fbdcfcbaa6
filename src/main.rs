//! Alien Bonds entry point
//!
//! Handles platform-specific initialization and wires input to the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use alien_bonds::persistence::LocalStore;
    use alien_bonds::platform::web::{Dispatch, WebScheduler};
    use alien_bonds::platform::{TaskHandle, TaskKind};
    use alien_bonds::renderer::CanvasPresenter;
    use alien_bonds::sim::Arena;
    use alien_bonds::{Game, Settings};

    type WebGame = Game<CanvasPresenter, LocalStore, WebScheduler>;
    type GameCell = Rc<RefCell<Option<WebGame>>>;

    fn drain_and_log(game: &mut WebGame) {
        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Alien Bonds starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let arena = Arena {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        };

        let presenter =
            CanvasPresenter::new(document.clone(), canvas.clone()).expect("no 2d context");
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        // Scheduler callbacks reach the game through a weak handle
        let cell: GameCell = Rc::new(RefCell::new(None));
        let dispatch: Dispatch = {
            let weak = Rc::downgrade(&cell);
            Rc::new(move |kind: TaskKind, handle: TaskHandle| {
                let Some(cell) = weak.upgrade() else { return };
                let mut slot = cell.borrow_mut();
                if let Some(game) = slot.as_mut() {
                    match kind {
                        TaskKind::Frames => game.on_frame(handle),
                        TaskKind::Countdown => game.on_countdown(handle),
                    }
                    drain_and_log(game);
                }
            })
        };
        let scheduler = WebScheduler::new(window.clone(), dispatch);

        *cell.borrow_mut() = Some(Game::new(
            seed,
            arena,
            settings,
            presenter,
            LocalStore::new(),
            scheduler,
        ));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, cell.clone());
        setup_action_button(&document, cell);

        log::info!("Alien Bonds ready!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, cell: GameCell) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let point = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            if let Some(game) = cell.borrow_mut().as_mut() {
                game.click(point);
                drain_and_log(game);
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_action_button(document: &web_sys::Document, cell: GameCell) {
        if let Some(btn) = document.get_element_by_id("actionBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    game.start();
                    drain_and_log(game);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use alien_bonds::persistence::MemoryStore;
    use alien_bonds::platform::ManualScheduler;
    use alien_bonds::renderer::HeadlessPresenter;
    use alien_bonds::sim::{Arena, AutoPlayer};
    use alien_bonds::{Game, Settings};

    /// Simulated display refresh rate for the headless run
    const FRAMES_PER_SECOND: u32 = 60;

    env_logger::init();
    log::info!("Alien Bonds (native) starting...");
    log::info!("Native mode plays a headless demo session - run with `trunk serve` for web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut game = Game::new(
        seed,
        Arena::default(),
        settings,
        HeadlessPresenter::new(),
        MemoryStore::new(),
        ManualScheduler::new(),
    );
    let mut player = AutoPlayer::new(30, 7);
    let summary = game.run_headless(&mut player, FRAMES_PER_SECOND);

    println!(
        "Seed {}: score {} over {} waves ({} correct, {} wrong, {} missed), best {}",
        seed,
        summary.score,
        summary.waves,
        summary.correct_hits,
        summary.wrong_hits,
        summary.solutions_missed,
        summary.high_score
    );
}
