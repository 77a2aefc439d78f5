//! Canvas 2D drawing for the button overlay effects
//!
//! Each overlay owns a viewport-sized canvas. Frames are drawn with a
//! translucent fill first so earlier frames fade into trails.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::Theme;
use crate::sim::effects::{MATRIX_FONT_PX, MatrixRain, Rainfall, Vortex};

const MATRIX_FADE: &str = "rgba(0, 0, 0, 0.05)";
const MATRIX_GLYPH: &str = "#0F0";
const TRAIL_FADE: &str = "rgba(0, 0, 0, 0.1)";
const VORTEX_DOT_RADIUS: f64 = 2.0;

/// A 2D context bound to one overlay canvas
pub struct OverlayCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl OverlayCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the given CSS size and wipe it
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width.max(1.0) as u32);
        self.canvas.set_height(height.max(1.0) as u32);
        self.clear();
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fade(&self, style: &str) {
        self.ctx.set_fill_style_str(style);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    pub fn draw_matrix(&self, matrix: &MatrixRain) {
        self.fade(MATRIX_FADE);
        self.ctx.set_fill_style_str(MATRIX_GLYPH);
        self.ctx.set_font(&format!("{}px monospace", MATRIX_FONT_PX));

        let mut buf = [0u8; 4];
        for (column, (drop, glyph)) in matrix.drops.iter().zip(&matrix.glyphs).enumerate() {
            let x = column as f64 * MATRIX_FONT_PX as f64;
            let y = *drop as f64 * MATRIX_FONT_PX as f64;
            let _ = self.ctx.fill_text(glyph.encode_utf8(&mut buf), x, y);
        }
    }

    pub fn draw_rain(&self, rain: &Rainfall, theme: Theme) {
        self.fade(TRAIL_FADE);
        self.ctx
            .set_stroke_style_str(if theme.is_dark() { "#4F46E5" } else { "#818CF8" });
        self.ctx.set_line_width(1.0);

        self.ctx.begin_path();
        for drop in &rain.drops {
            self.ctx.move_to(drop.x as f64, drop.y as f64);
            self.ctx
                .line_to(drop.x as f64, (drop.y + drop.length) as f64);
        }
        self.ctx.stroke();
    }

    pub fn draw_vortex(&self, vortex: &Vortex, theme: Theme) {
        self.fade(TRAIL_FADE);
        let lightness = if theme.is_dark() { 60 } else { 50 };

        for p in &vortex.particles {
            let (x, y) = vortex.position(p);
            self.ctx.set_fill_style_str(&format!(
                "hsla({:.0}, 70%, {}%, 0.8)",
                Vortex::hue(p),
                lightness
            ));
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                x as f64,
                y as f64,
                VORTEX_DOT_RADIUS,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
    }
}
