// Browser wiring: creates the canvas inside the host container, forwards pointer
// and resize events to the field and drives it from requestAnimationFrame

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::error::Error;
use crate::field::{FieldEvent, FrameInput, ParticleField};
use crate::fps::FrameCounter;
use crate::Timer;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Runtime {
    field: ParticleField,
    surface: Option<CanvasSurface>,
    container: HtmlElement,
    scroll_container: Option<Element>,
    fps_display: Option<Element>,
    on_entities: Option<js_sys::Function>,
    frames: FrameCounter,
    frame_id: Option<i32>,
}

impl Runtime {
    fn resize(&mut self, ratio: f64) -> usize {
        let rect = self.container.get_bounding_client_rect();
        let (width, height) = (rect.width(), rect.height());
        if let Some(surface) = self.surface.as_mut() {
            if let Err(err) = surface.resize(width, height, ratio) {
                log::warn!("failed to resize canvas: {:?}", err);
            }
        }
        self.field
            .apply(FieldEvent::Resized { width, height })
            .unwrap_or_default()
    }

    // Returns false when there is nothing to draw on; the loop stops there
    fn render_frame(&mut self, time: f64) -> bool {
        let _timer = if self.field.config().profile {
            Some(Timer::new("ParticleField::frame"))
        } else {
            None
        };

        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return false,
        };

        if let Some(fps) = self.frames.tick(time) {
            if let Some(display) = &self.fps_display {
                display.set_text_content(Some(&fps.to_string()));
            }
        }

        let (scroll_offset, viewport_height) = match &self.scroll_container {
            Some(scroller) => (scroller.scroll_top() as f64, scroller.client_height() as f64),
            None => (0.0, 0.0),
        };

        self.field.frame(
            FrameInput {
                time,
                scroll_offset,
                viewport_height,
            },
            surface,
        );
        true
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Listener, Error> {
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|err| Error::dom("add event listener", err))?;
        Ok(Listener {
            target,
            kind,
            callback,
        })
    }

    fn detach(self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {:?}", self.kind, err);
        }
    }
}

/// A running particle field. Stopping it, or freeing it from JS, cancels the
/// pending animation frame, detaches every listener and removes the canvas.
#[wasm_bindgen]
pub struct FieldHandle {
    window: Window,
    runtime: Rc<RefCell<Runtime>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    listeners: Vec<Listener>,
    stopped: bool,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Foreground plus background particles after the latest (re)initialization.
    #[wasm_bindgen(js_name = entityCount)]
    pub fn entity_count(&self) -> u32 {
        self.runtime.borrow().field.entity_count() as u32
    }

    /// Whether the pointer is inside the window and repelling particles.
    #[wasm_bindgen(js_name = pointerActive)]
    pub fn pointer_active(&self) -> bool {
        self.runtime.borrow().field.mouse().active
    }

    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        let frame_id = self.runtime.borrow_mut().frame_id.take();
        if let Some(id) = frame_id {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel animation frame: {:?}", err);
            }
        }
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.frame.borrow_mut().take();

        if let Some(surface) = &self.runtime.borrow().surface {
            surface.canvas().remove();
        }
        log::info!("particle field stopped");
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Mounts the particle field inside `container`, which the host positions as a
/// fixed, full-viewport layer behind the page.
#[wasm_bindgen]
pub fn mount(
    container: HtmlElement,
    scroll_container: Option<Element>,
    fps_display: Option<Element>,
    on_entities: Option<js_sys::Function>,
    config: JsValue,
) -> Result<FieldHandle, JsValue> {
    let config = read_config(config)?;
    start(None, container, scroll_container, fps_display, on_entities, config)
        .map_err(JsValue::from)
}

/// Like `mount`, but draws on a canvas the host already created. The canvas is
/// moved into `container` and removed again when the field stops.
#[wasm_bindgen(js_name = mountCanvas)]
pub fn mount_canvas(
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    scroll_container: Option<Element>,
    fps_display: Option<Element>,
    on_entities: Option<js_sys::Function>,
    config: JsValue,
) -> Result<FieldHandle, JsValue> {
    let config = read_config(config)?;
    start(
        Some(canvas),
        container,
        scroll_container,
        fps_display,
        on_entities,
        config,
    )
    .map_err(JsValue::from)
}

fn read_config(value: JsValue) -> Result<FieldConfig, Error> {
    let config = if value.is_null() || value.is_undefined() {
        FieldConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<FieldConfig>(value)
            .map_err(|err| Error::ConfigDecode(err.to_string()))?
    };
    config.validate()?;
    Ok(config)
}

fn start(
    canvas: Option<HtmlCanvasElement>,
    container: HtmlElement,
    scroll_container: Option<Element>,
    fps_display: Option<Element>,
    on_entities: Option<js_sys::Function>,
    config: FieldConfig,
) -> Result<FieldHandle, Error> {
    let window = web_sys::window().ok_or(Error::NoWindow)?;
    let document = window.document().ok_or(Error::NoDocument)?;

    let canvas = match canvas {
        Some(canvas) => canvas,
        None => document
            .create_element("canvas")
            .map_err(|err| Error::dom("create canvas", err))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::Dom {
                context: "create canvas",
                message: "element is not a canvas".into(),
            })?,
    };
    canvas
        .set_attribute("aria-hidden", "true")
        .map_err(|err| Error::dom("configure canvas", err))?;
    canvas
        .style()
        .set_property("display", "block")
        .map_err(|err| Error::dom("configure canvas", err))?;
    container
        .append_child(&canvas)
        .map_err(|err| Error::dom("attach canvas", err))?;

    let surface = CanvasSurface::new(canvas.clone());
    if surface.is_none() {
        log::warn!("canvas has no 2d context; particle field will not draw");
        canvas.remove();
    }

    let runtime = Rc::new(RefCell::new(Runtime {
        field: ParticleField::new(config),
        surface,
        container,
        scroll_container,
        fps_display,
        on_entities,
        frames: FrameCounter::new(),
        frame_id: None,
    }));

    // Listeners are pushed onto the handle as they attach, so an early return
    // still detaches whatever was registered
    let mut handle = FieldHandle {
        window: window.clone(),
        runtime: runtime.clone(),
        frame: Rc::new(RefCell::new(None)),
        listeners: Vec::new(),
        stopped: false,
    };

    resize(&runtime, window.device_pixel_ratio());

    let target: EventTarget = window.clone().into();
    handle.listeners.push(Listener::attach(
        target.clone(),
        "mousemove",
        pointer_moved(runtime.clone()),
    )?);
    handle.listeners.push(Listener::attach(
        target.clone(),
        "mouseout",
        pointer_left(runtime.clone()),
    )?);
    handle.listeners.push(Listener::attach(
        target,
        "resize",
        resized(runtime.clone(), window.clone()),
    )?);

    *handle.frame.borrow_mut() = Some(frame_loop(
        runtime.clone(),
        Rc::downgrade(&handle.frame),
        window.clone(),
    ));
    let first = handle.frame.borrow().as_ref().map(|callback| request_frame(&window, callback));
    if let Some(id) = first {
        let id = id.map_err(|err| Error::dom("request animation frame", err))?;
        runtime.borrow_mut().frame_id = Some(id);
    }

    log::info!(
        "particle field mounted with {} entities",
        runtime.borrow().field.entity_count()
    );
    Ok(handle)
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

// Repopulates the field, then reports the count without holding the borrow,
// so the host callback may query the handle
fn resize(runtime: &Rc<RefCell<Runtime>>, ratio: f64) {
    let (count, callback) = {
        let mut runtime = runtime.borrow_mut();
        let count = runtime.resize(ratio);
        (count, runtime.on_entities.clone())
    };
    if let Some(callback) = callback {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_f64(count as f64)) {
            log::warn!("entity count callback failed: {:?}", err);
        }
    }
}

fn pointer_moved(runtime: Rc<RefCell<Runtime>>) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            runtime.borrow_mut().field.apply(FieldEvent::PointerMoved {
                x: event.client_x() as f64,
                y: event.client_y() as f64,
            });
        }
    }) as Box<dyn FnMut(Event)>)
}

// `mouseout` with no related target means the pointer left the window
fn pointer_left(runtime: Rc<RefCell<Runtime>>) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            if event.related_target().is_none() {
                runtime.borrow_mut().field.apply(FieldEvent::PointerLeft);
            }
        }
    }) as Box<dyn FnMut(Event)>)
}

fn resized(runtime: Rc<RefCell<Runtime>>, window: Window) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |_event: Event| {
        resize(&runtime, window.device_pixel_ratio());
    }) as Box<dyn FnMut(Event)>)
}

fn frame_loop(
    runtime: Rc<RefCell<Runtime>>,
    frame: Weak<RefCell<Option<FrameCallback>>>,
    window: Window,
) -> FrameCallback {
    Closure::wrap(Box::new(move |time: f64| {
        let mut runtime = runtime.borrow_mut();
        runtime.frame_id = None;
        if !runtime.render_frame(time) {
            log::debug!("no drawing surface; animation halted");
            return;
        }

        let frame = match frame.upgrade() {
            Some(frame) => frame,
            None => return,
        };
        let frame = frame.borrow();
        if let Some(callback) = frame.as_ref() {
            match request_frame(&window, callback) {
                Ok(id) => runtime.frame_id = Some(id),
                Err(err) => log::warn!("failed to request animation frame: {:?}", err),
            }
        }
    }) as Box<dyn FnMut(f64)>)
}
