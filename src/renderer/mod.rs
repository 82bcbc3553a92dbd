//! Canvas 2D renderer
//!
//! Draws the whole frame immediate-mode from the sim state. The background
//! is cleared with a translucent black fill instead of a full clear, which
//! leaves short motion trails behind every moving dot.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{GameState, Hsl};

use std::f64::consts::TAU;

/// Per-frame trail fade strength
const TRAIL_FADE: &str = "rgba(0, 0, 0, 0.1)";

/// Format a color as a CSS `hsl()` string
fn css_hsl(c: Hsl) -> String {
    format!("hsl({}, {}%, {}%)", c.h, c.s, c.l)
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn fill_circle(&self, x: f32, y: f32, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    /// Draw one complete frame
    pub fn render(&self, state: &GameState) {
        // Trail fade instead of a hard clear
        self.ctx.set_fill_style_str(TRAIL_FADE);
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        // Ambient grid, dimmed by per-dot alpha
        self.ctx.set_fill_style_str("white");
        for dot in &state.background {
            self.ctx.set_global_alpha(dot.alpha as f64);
            self.fill_circle(dot.pos.x, dot.pos.y, dot.radius);
        }
        self.ctx.set_global_alpha(1.0);

        // Drifting pickups: a rotating gold diamond with a dark core
        for power_up in &state.power_ups {
            self.ctx.save();
            let _ = self
                .ctx
                .translate(power_up.pos.x as f64, power_up.pos.y as f64);
            let _ = self.ctx.rotate(power_up.radians as f64);
            let r = power_up.radius as f64;
            self.ctx.set_fill_style_str("gold");
            self.ctx.fill_rect(-r * 0.7, -r * 0.7, r * 1.4, r * 1.4);
            self.ctx.set_fill_style_str("black");
            self.ctx.begin_path();
            let _ = self.ctx.arc(0.0, 0.0, r * 0.35, 0.0, TAU);
            self.ctx.fill();
            self.ctx.restore();
        }

        // Player, gold-tinted while the machine gun runs
        if state.player.power_up.is_some() {
            self.ctx.set_fill_style_str(&css_hsl(Hsl::GOLD));
        } else {
            self.ctx.set_fill_style_str("white");
        }
        self.fill_circle(state.player.pos.x, state.player.pos.y, state.player.radius);

        for projectile in &state.projectiles {
            self.ctx.set_fill_style_str(&css_hsl(projectile.color));
            self.fill_circle(projectile.pos.x, projectile.pos.y, projectile.radius);
        }

        for enemy in &state.enemies {
            self.ctx.set_fill_style_str(&css_hsl(enemy.color));
            self.fill_circle(enemy.pos.x, enemy.pos.y, enemy.radius);
        }

        // Explosion debris fades out via global alpha
        for particle in &state.particles {
            self.ctx.set_global_alpha(particle.alpha.max(0.0) as f64);
            self.ctx.set_fill_style_str(&css_hsl(particle.color));
            self.fill_circle(particle.pos.x, particle.pos.y, particle.radius);
        }
        self.ctx.set_global_alpha(1.0);
    }
}
