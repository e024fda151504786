//! Browser driver for the particle field: creates the canvas, runs the
//! `requestAnimationFrame` loop and keeps the canvas sized to the viewport.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, window};

use super::rng::XorShift;
use super::surface::{CanvasSurface, DrawSurface};
use super::{ParticleField, Variant};
use crate::config::HomepageConfig;
use crate::dom;
use crate::holiday::{self, Season};

/// Owned loop state, shared only between the frame callback and the resize listener.
struct AnimatorState {
    field: ParticleField<XorShift>,
    surface: CanvasSurface,
}

/// Handle to a running particle animation.
#[wasm_bindgen]
pub struct ParticleAnimation {
    cancelled: Rc<Cell<bool>>,
    frames: Rc<Cell<u32>>,
}

#[wasm_bindgen]
impl ParticleAnimation {
    /// Stop at the top of the next frame. The canvas keeps its last image.
    pub fn stop(&self) {
        self.cancelled.set(true);
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled.get()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u32 {
        self.frames.get()
    }
}

/// Variant for a page started in `month` (1-based).
pub fn variant_for(config: &HomepageConfig, month: u32) -> Variant {
    if config.seasonal {
        Variant::for_season(Season::from_month(month))
    } else {
        Variant::Plain
    }
}

/// Start the particle decoration with the default configuration.
#[wasm_bindgen]
pub fn start_particle_field() -> Result<ParticleAnimation, JsValue> {
    start_particles(&dom::document()?, &HomepageConfig::default())
}

/// Create the canvas inside `#particle-container` and start animating it.
pub fn start_particles(doc: &Document, config: &HomepageConfig) -> Result<ParticleAnimation, JsValue> {
    let win = dom::win()?;
    let container = doc
        .get_element_by_id("particle-container")
        .ok_or_else(|| JsValue::from_str("missing #particle-container"))?;

    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    container.append_child(&canvas)?;
    let mut surface = CanvasSurface::new(canvas)?;
    let (width, height) = dom::viewport_size(&win);
    surface.resize(width, height);

    let (month, _) = holiday::today();
    let variant = variant_for(config, month);
    let rng = config.seed.map(XorShift::new).unwrap_or_else(XorShift::from_entropy);
    let field = ParticleField::new(variant, width, rng).with_resize_policy(config.resize_policy);
    log::info!("particle field: {} x {:?} on {}x{}", field.len(), variant, width, height);

    let state = Rc::new(RefCell::new(AnimatorState { field, surface }));
    watch_resize(state.clone())?;

    let handle = ParticleAnimation { cancelled: Rc::new(Cell::new(false)), frames: Rc::new(Cell::new(0)) };
    start_frame_loop(state, handle.cancelled.clone(), handle.frames.clone());
    Ok(handle)
}

fn watch_resize(state: Rc<RefCell<AnimatorState>>) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = window() else { return };
        let (width, height) = dom::viewport_size(&w);
        let s = &mut *state.borrow_mut();
        s.field.resize(&mut s.surface, width, height);
        log::debug!("particle canvas resized to {}x{}", width, height);
    }) as Box<dyn FnMut()>);
    dom::win()?.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(f: &FrameCallback) {
    let Some(w) = window() else { return };
    if let Some(cb) = f.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_frame_loop(state: Rc<RefCell<AnimatorState>>, cancelled: Rc<Cell<bool>>, frames: Rc<Cell<u32>>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if cancelled.get() {
            log::info!("particle animation stopped after {} frames", frames.get());
            return;
        }
        {
            let s = &mut *state.borrow_mut();
            s.field.frame(&mut s.surface);
        }
        frames.set(frames.get().wrapping_add(1));
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
