// Drawing target for the particle field. Alpha is passed with every circle so the
// shared context state is set right before each fill

use crate::color::Color;
use std::f64::consts::PI;
use vecmath::Vector2;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&self);
    fn draw_circle(&self, pos: Vector2<f64>, radius: f64, color: Color, alpha: f64);
}

pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        CanvasSurface { context }
    }

    fn canvas_size(&self) -> (f64, f64) {
        match self.context.canvas() {
            Some(canvas) => (canvas.width() as f64, canvas.height() as f64),
            None => (0.0, 0.0),
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas_size().0
    }

    fn height(&self) -> f64 {
        self.canvas_size().1
    }

    fn clear(&self) {
        let (width, height) = self.canvas_size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_circle(&self, pos: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        // arc only fails on a negative radius, which the pool never keeps
        let _ = self.context.arc(pos[0], pos[1], radius, 0.0, PI * 2.0);
        #[allow(deprecated)]
        self.context.set_fill_style(&color.to_css().into());
        self.context.set_global_alpha(alpha);
        self.context.fill();
    }
}
