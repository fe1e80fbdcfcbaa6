//! Presenters
//!
//! `canvas` draws to the browser's 2D canvas and DOM; `headless` logs and
//! records, for the native build and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPresenter;
pub use headless::HeadlessPresenter;
