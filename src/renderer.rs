// Browser side of the particle field: sizes the canvas to the viewport, wires the
// resize and pointer listeners, and drives the requestAnimationFrame loop.
// Every callback goes through the same Rc<RefCell<Shared>>, so the field has one owner

use crate::config::{FieldConfig, PointerSource};
use crate::error::FieldError;
use crate::field::{FieldEvent, ParticleField};
use crate::lifecycle::Lifecycle;
use crate::surface::{CanvasSurface, Surface};
use crate::Timer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, MouseEvent, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

const OVERLAY_STYLE: [(&str, &str); 5] = [
    ("position", "absolute"),
    ("inset", "0"),
    ("z-index", "10"),
    ("pointer-events", "none"),
    ("mix-blend-mode", "screen"),
];

struct Shared {
    field: ParticleField<StdRng>,
    surface: CanvasSurface,
    lifecycle: Lifecycle,
}

#[wasm_bindgen]
pub struct ParticleFieldHandle {
    shared: Rc<RefCell<Shared>>,
    window: Window,
    pointer_target: EventTarget,
    resize_listener: Option<Closure<dyn FnMut()>>,
    pointer_listener: Option<Closure<dyn FnMut(MouseEvent)>>,
    frame_callback: FrameCallback,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
    // Safe to call any number of times. After the first call no frame callback runs
    pub fn teardown(&mut self) {
        let pending = self.shared.borrow_mut().lifecycle.teardown();
        if let Some(id) = pending {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancel_animation_frame failed: {:?}", err);
            }
        }

        if let Some(listener) = self.resize_listener.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            {
                log::warn!("removing resize listener failed: {:?}", err);
            }
        }
        if let Some(listener) = self.pointer_listener.take() {
            if let Err(err) = self
                .pointer_target
                .remove_event_listener_with_callback("mousemove", listener.as_ref().unchecked_ref())
            {
                log::warn!("removing mousemove listener failed: {:?}", err);
            }
            log::debug!("particle field torn down");
        }
        self.frame_callback.borrow_mut().take();
    }

    pub fn is_active(&self) -> bool {
        self.shared.borrow().lifecycle.is_active()
    }

    pub fn particle_count(&self) -> usize {
        self.shared.borrow().field.len()
    }

    // Last pointer position in canvas coordinates
    pub fn pointer_x(&self) -> f64 {
        self.shared.borrow().field.pointer().pos[0]
    }

    pub fn pointer_y(&self) -> f64 {
        self.shared.borrow().field.pointer().pos[1]
    }
}

impl Drop for ParticleFieldHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

// Mounts a particle field on `canvas`. Ok(None) when the canvas has no 2d context,
// in which case nothing is registered and no loop runs
pub fn mount_field(
    canvas: &HtmlCanvasElement,
    config: FieldConfig,
) -> Result<Option<ParticleFieldHandle>, FieldError> {
    config.validate()?;
    let window = web_sys::window().ok_or(FieldError::NoWindow)?;

    let context = match canvas.get_context("2d") {
        Ok(Some(context)) => context.dyn_into::<CanvasRenderingContext2d>().ok(),
        _ => None,
    };
    let context = match context {
        Some(context) => context,
        None => {
            log::debug!("no 2d context on canvas, particle field not mounted");
            return Ok(None);
        }
    };

    let _timer = Timer::new("ParticleField::mount");
    fit_to_viewport(&window, canvas);
    if config.overlay_style {
        apply_overlay_style(canvas)?;
    }

    let surface = CanvasSurface::new(context);
    let pointer_source = config.pointer_source;
    let mut field = ParticleField::new(config, StdRng::from_entropy(), surface.width(), surface.height());
    field.seed();

    let mut lifecycle = Lifecycle::default();
    lifecycle.activate();
    let shared = Rc::new(RefCell::new(Shared {
        field,
        surface,
        lifecycle,
    }));

    let pointer_target: EventTarget = match pointer_source {
        PointerSource::Canvas => canvas.clone().into(),
        PointerSource::Window => window.clone().into(),
    };
    // Built before any listener is registered so an early return still unregisters
    // whatever was added through Drop
    let mut handle = ParticleFieldHandle {
        shared,
        window,
        pointer_target,
        resize_listener: None,
        pointer_listener: None,
        frame_callback: Rc::new(RefCell::new(None)),
    };

    let resize_listener = {
        let shared = handle.shared.clone();
        let window = handle.window.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            let (width, height) = fit_to_viewport(&window, &canvas);
            let mut guard = shared.borrow_mut();
            let state = &mut *guard;
            state
                .field
                .handle(FieldEvent::Resize { width, height }, &state.surface);
        }) as Box<dyn FnMut()>)
    };
    handle
        .window
        .add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())
        .map_err(FieldError::js)?;
    handle.resize_listener = Some(resize_listener);

    let pointer_listener = {
        let shared = handle.shared.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            let mut guard = shared.borrow_mut();
            let state = &mut *guard;
            state.field.handle(
                FieldEvent::PointerMove {
                    x,
                    y,
                    at_ms: js_sys::Date::now(),
                },
                &state.surface,
            );
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    handle
        .pointer_target
        .add_event_listener_with_callback("mousemove", pointer_listener.as_ref().unchecked_ref())
        .map_err(FieldError::js)?;
    handle.pointer_listener = Some(pointer_listener);

    *handle.frame_callback.borrow_mut() = Some(frame_loop(
        handle.shared.clone(),
        handle.window.clone(),
        Rc::downgrade(&handle.frame_callback),
    ));
    request_frame(
        &handle.window,
        &handle.frame_callback,
        &mut handle.shared.borrow_mut().lifecycle,
    )?;

    log::debug!(
        "particle field mounted with {} particles",
        handle.particle_count()
    );
    Ok(Some(handle))
}

fn frame_loop(
    shared: Rc<RefCell<Shared>>,
    window: Window,
    next: Weak<RefCell<Option<Closure<dyn FnMut()>>>>,
) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let mut guard = shared.borrow_mut();
        let state = &mut *guard;
        state.lifecycle.frame_fired();
        if !state.lifecycle.is_active() {
            return;
        }

        state.field.handle(
            FieldEvent::Frame {
                at_ms: js_sys::Date::now(),
            },
            &state.surface,
        );

        if let Some(next) = next.upgrade() {
            if let Err(err) = request_frame(&window, &next, &mut state.lifecycle) {
                log::error!("particle field stopped: {}", err);
            }
        }
    }) as Box<dyn FnMut()>)
}

fn request_frame(
    window: &Window,
    callback: &RefCell<Option<Closure<dyn FnMut()>>>,
    lifecycle: &mut Lifecycle,
) -> Result<(), FieldError> {
    if let Some(callback) = callback.borrow().as_ref() {
        let id = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(FieldError::js)?;
        lifecycle.frame_requested(id);
    }
    Ok(())
}

// Resizes the backing buffer only, what is already drawn is not rescaled
fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
            .max(0.0)
    };
    let width = dimension(window.inner_width());
    let height = dimension(window.inner_height());
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    (canvas.width() as f64, canvas.height() as f64)
}

fn apply_overlay_style(canvas: &HtmlCanvasElement) -> Result<(), FieldError> {
    let style = canvas.style();
    for (property, value) in OVERLAY_STYLE.iter() {
        style.set_property(property, value).map_err(FieldError::js)?;
    }
    Ok(())
}
