//! Canvas 2D presenter
//!
//! Draws aliens onto the game canvas and writes HUD/overlay text into the
//! page's DOM elements.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::sim::Alien;
use crate::ui::{Hud, Overlay, Presenter, palette};

/// Glow radius around the hinted solution
const HINT_GLOW_BLUR: f64 = 15.0;
const STROKE_WIDTH: f64 = 3.0;
const VALUE_FONT: &str = "bold 22px Arial";
/// Baseline offset that vertically centers the value text
const VALUE_BASELINE_OFFSET: f64 = 8.0;

pub struct CanvasPresenter {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPresenter {
    /// Bind to `canvas`. Returns `None` if it has no 2D context.
    pub fn new(document: Document, canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            document,
            canvas,
            ctx,
        })
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl Presenter for CanvasPresenter {
    fn clear_frame(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_alien(&mut self, alien: &Alien, highlighted: bool) {
        let ctx = &self.ctx;
        let (x, y) = (alien.pos.x as f64, alien.pos.y as f64);
        ctx.save();

        ctx.set_shadow_blur(HINT_GLOW_BLUR);
        ctx.set_shadow_color(if highlighted { palette::HINT } else { "transparent" });

        // Body
        ctx.begin_path();
        let _ = ctx.arc(x, y, alien.radius as f64, 0.0, PI * 2.0);
        ctx.set_fill_style_str(palette::ALIEN_BODY);
        ctx.fill();

        ctx.set_stroke_style_str(if highlighted {
            palette::HINT
        } else {
            palette::ALIEN_STROKE
        });
        ctx.set_line_width(STROKE_WIDTH);
        ctx.stroke();

        // Value
        ctx.set_fill_style_str(palette::ALIEN_TEXT);
        ctx.set_font(VALUE_FONT);
        ctx.set_text_align("center");
        ctx.set_shadow_blur(0.0);
        let _ = ctx.fill_text(&alien.value.to_string(), x, y + VALUE_BASELINE_OFFSET);

        ctx.restore();
    }

    fn show_overlay(&mut self, overlay: &Overlay) {
        self.set_text("overlayTitle", &overlay.title);
        self.set_text("overlayMessage", &overlay.message);
        self.set_text("actionBtn", &overlay.button);
        if let Some(title) = self.element("overlayTitle") {
            let _ = title
                .style()
                .set_property("color", overlay.tone.title_color());
        }
        if let Some(el) = self.element("overlay") {
            let _ = el.style().set_property("display", "flex");
        }
    }

    fn hide_overlay(&mut self) {
        if let Some(el) = self.element("overlay") {
            let _ = el.style().set_property("display", "none");
        }
    }

    fn refresh_hud(&mut self, hud: &Hud) {
        self.set_text("target", &hud.target_sum.to_string());
        self.set_text("key", &hud.key.to_string());
        self.set_text("score", &hud.score.to_string());
        self.set_text("timer", &hud.time_left.to_string());
        self.set_text("highScore", &hud.high_score.to_string());
    }
}
