mod utils;

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod particle;
pub mod pointer;
pub mod pool;
pub mod renderer;
pub mod surface;

use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlCanvasElement};

pub use color::Color;
pub use config::{FieldConfig, PointerSource};
pub use error::FieldError;
pub use field::{FieldEvent, FrameReport, ParticleField};
pub use renderer::{mount_field, ParticleFieldHandle};
pub use surface::{CanvasSurface, Surface};

// Use `wee_alloc` as the global allocator when the feature is enabled
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger();
}

// Mounts the overlay with the default settings. Returns undefined when the canvas
// has no 2d context
#[wasm_bindgen]
pub fn mount(canvas: &HtmlCanvasElement) -> Result<Option<ParticleFieldHandle>, JsValue> {
    mount_field(canvas, FieldConfig::default()).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn mount_with_config(
    canvas: &HtmlCanvasElement,
    config: &FieldConfig,
) -> Result<Option<ParticleFieldHandle>, JsValue> {
    mount_field(canvas, config.clone()).map_err(JsValue::from)
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
