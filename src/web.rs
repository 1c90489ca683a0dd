//! Browser binding
//!
//! `MeteorShower` is the handle a page holds while the shower is mounted.
//! Mounting acquires the canvas, a `resize` listener and an animation frame;
//! unmounting (or dropping the handle) releases all three.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::engine::{Bounds, Engine};
use crate::error::EngineError;
use crate::renderer::CanvasSurface;
use crate::settings::ShowerSettings;

/// Inline style for a shower canvas created by `mount`
const OVERLAY_STYLE: &str = "position:fixed;top:0;left:0;width:100vw;height:100vh;\
                             z-index:0;pointer-events:none;";

type SharedEngine = Rc<RefCell<Engine<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A host page may already have installed a logger
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

/// A mounted meteor shower
#[wasm_bindgen]
pub struct MeteorShower {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl MeteorShower {
    /// Mount on the canvas with id `canvas_id`, or on a new full-viewport
    /// overlay canvas when no id is given
    ///
    /// `options` may be `undefined`, a particle count, or an options object.
    /// Never throws: without a usable canvas the handle is returned idle and
    /// `isRunning` stays false.
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas_id: Option<String>, options: JsValue) -> MeteorShower {
        let settings = settings_from_js(&options);
        let mounted = Mounted::new(canvas_id.as_deref(), settings)
            .inspect_err(|e| log::warn!("Meteor shower not started: {}", e))
            .ok();
        Self { mounted }
    }

    /// Stop the animation and release the canvas and listeners
    ///
    /// Safe to call any number of times.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.engine.borrow().is_running())
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.mounted
            .as_ref()
            .map_or(0, |m| m.engine.borrow().store().len() as u32)
    }
}

/// Everything acquired by a mount; released on drop
struct Mounted {
    window: Window,
    engine: SharedEngine,
    /// Id of the pending animation frame, if any
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: FrameCallback,
    resize_listener: Closure<dyn FnMut(web_sys::Event)>,
    /// Canvas created by us (removed again on unmount)
    overlay: Option<HtmlCanvasElement>,
}

impl Mounted {
    fn new(canvas_id: Option<&str>, settings: ShowerSettings) -> Result<Self, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let document = window.document().ok_or(EngineError::NoWindow)?;

        let (canvas, overlay) = match canvas_id {
            Some(id) => (find_canvas(&document, id)?, None),
            None => {
                let canvas = create_overlay(&document)?;
                (canvas.clone(), Some(canvas))
            }
        };

        let surface = CanvasSurface::new(canvas).ok();
        let engine: SharedEngine = Rc::new(RefCell::new(Engine::with_entropy(settings)));
        if let Err(e) = engine.borrow_mut().start(surface, viewport(&window)) {
            if let Some(canvas) = overlay {
                canvas.remove();
            }
            return Err(e);
        }

        let resize_listener = {
            let engine = engine.clone();
            let window = window.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                engine.borrow_mut().resize(viewport(&window));
            })
        };
        if window
            .add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for resize; shower keeps its initial size");
        }

        let mounted = Self {
            window,
            engine,
            frame_id: Rc::new(Cell::new(None)),
            frame_callback: Rc::new(RefCell::new(None)),
            resize_listener,
            overlay,
        };
        mounted.schedule_frames();
        Ok(mounted)
    }

    /// Install the self-rescheduling frame callback and request the first frame
    fn schedule_frames(&self) {
        let engine = self.engine.clone();
        let window = self.window.clone();
        let frame_id = self.frame_id.clone();
        let callback = self.frame_callback.clone();

        *self.frame_callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            frame_id.set(None);
            // A frame that fires after stop draws nothing and ends the loop
            if engine.borrow_mut().frame().is_none() {
                return;
            }
            if let Some(cb) = callback.borrow().as_ref() {
                frame_id.set(request_frame(&window, cb));
            }
        }));

        if let Some(cb) = self.frame_callback.borrow().as_ref() {
            self.frame_id.set(request_frame(&self.window, cb));
        }
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.engine.borrow_mut().stop();

        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        let _ = self.window.remove_event_listener_with_callback(
            "resize",
            self.resize_listener.as_ref().unchecked_ref(),
        );
        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();

        if let Some(canvas) = self.overlay.take() {
            canvas.remove();
        }
    }
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

/// Current `innerWidth` x `innerHeight`
fn viewport(window: &Window) -> Bounds {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Bounds::from_viewport(dim(window.inner_width()), dim(window.inner_height()))
}

fn find_canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, EngineError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or(EngineError::NoSurface)
}

fn create_overlay(document: &Document) -> Result<HtmlCanvasElement, EngineError> {
    let body = document.body().ok_or(EngineError::NoWindow)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into().ok())
        .ok_or(EngineError::NoSurface)?;

    let _ = canvas.set_attribute("style", OVERLAY_STYLE);
    let _ = canvas.set_attribute("aria-hidden", "true");
    body.append_child(&canvas)
        .map_err(|_| EngineError::NoSurface)?;
    Ok(canvas)
}

fn settings_from_js(options: &JsValue) -> ShowerSettings {
    if options.is_undefined() || options.is_null() {
        return ShowerSettings::default();
    }
    match js_sys::JSON::stringify(options) {
        Ok(json) => ShowerSettings::from_json_or_default(&String::from(json)),
        Err(_) => {
            log::warn!("Meteor shower options are not JSON-serializable; using defaults");
            ShowerSettings::default()
        }
    }
}
