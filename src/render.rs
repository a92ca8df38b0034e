//! Canvas 2D renderer: background video, dim overlay, pads, hint text.

use crate::constants::*;
use crate::PadSession;
use pad_core::{ImageBank, PadSnapshot};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Renderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { canvas, ctx })
    }

    pub fn draw(
        &self,
        session: &PadSession,
        images: &ImageBank<web::HtmlImageElement>,
        video: Option<&web::HtmlVideoElement>,
    ) {
        let vp = session.viewport();
        let (w, h) = (vp.width as f64, vp.height as f64);
        // Draw in CSS pixels regardless of the backing store size
        let sx = self.canvas.width() as f64 / w.max(1.0);
        let sy = self.canvas.height() as f64 / h.max(1.0);
        _ = self.ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0);

        self.ctx.set_fill_style_str("black");
        self.ctx.fill_rect(0.0, 0.0, w, h);
        if let Some(v) = video {
            // HAVE_CURRENT_DATA
            if v.ready_state() >= 2 {
                _ = self
                    .ctx
                    .draw_image_with_html_video_element_and_dw_and_dh(v, 0.0, 0.0, w, h);
            }
        }
        self.ctx
            .set_fill_style_str(&format!("rgba(0, 0, 0, {DIM_OVERLAY_ALPHA:.3})"));
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        if !session.is_started() {
            self.ctx.set_fill_style_str("white");
            self.ctx.set_font(PROMPT_FONT);
            _ = self.ctx.fill_text(PROMPT_TEXT, w / 2.0, h * 0.4);
            return;
        }

        for snap in session.snapshots(images) {
            self.draw_pad(&snap);
        }

        self.ctx.set_fill_style_str("white");
        self.ctx.set_font(HINT_FONT);
        _ = self.ctx.fill_text(HINT_TEXT, w / 2.0, h - HINT_BOTTOM_OFFSET);
    }

    fn draw_pad(&self, pad: &PadSnapshot<'_, web::HtmlImageElement>) {
        let (x, y, w, h) = (pad.x as f64, pad.y as f64, pad.w as f64, pad.h as f64);
        let glow = pad.glow as f64;

        self.ctx.save();
        self.ctx.set_shadow_blur(glow * GLOW_BLUR_SCALE);
        self.ctx
            .set_shadow_color(&format!("rgba(255, 255, 200, {:.3})", glow / 255.0));
        let (ix, iy) = (x + PAD_INSET, y + PAD_INSET);
        let (iw, ih) = (w - 2.0 * PAD_INSET, h - 2.0 * PAD_INSET);
        match pad.image {
            Some(img) => {
                _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, ix, iy, iw, ih);
            }
            None => {
                self.ctx.set_fill_style_str(PLACEHOLDER_FILL);
                self.rounded_rect(ix, iy, iw, ih, PAD_CORNER_RADIUS);
                self.ctx.fill();
            }
        }
        self.ctx.restore();

        if pad.active {
            self.ctx.set_stroke_style_str(ACTIVE_STROKE);
            self.ctx.set_line_width(ACTIVE_LINE_WIDTH);
            self.rounded_rect(
                x + ACTIVE_INSET,
                y + ACTIVE_INSET,
                w - 2.0 * ACTIVE_INSET,
                h - 2.0 * ACTIVE_INSET,
                PAD_CORNER_RADIUS,
            );
            self.ctx.stroke();
        }
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
        let c = &self.ctx;
        c.begin_path();
        c.move_to(x + r, y);
        _ = c.arc_to(x + w, y, x + w, y + h, r);
        _ = c.arc_to(x + w, y + h, x, y + h, r);
        _ = c.arc_to(x, y + h, x, y, r);
        _ = c.arc_to(x, y, x + w, y, r);
        c.close_path();
    }
}
