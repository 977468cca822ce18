mod canvas;
mod engine;

use std::cell::RefCell;
use std::rc::Rc;

use aviary_core::engine::decode_world;
use aviary_core::views::scene::render_scene;
use aviary_core::{FrameLoop, SceneStyle, ViewportError};
use aviary_protocol::{Palette, Viewport};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::canvas::CanvasSurface;
use crate::engine::JsEngine;

/// Page wiring and scene style. Every field has a default matching the
/// stock `index.html`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct HostConfig {
    canvas_id: String,
    ticks_id: String,
    generations_id: String,
    train_id: String,
    style: SceneStyle,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            canvas_id: "viewport".to_string(),
            ticks_id: "ticks".to_string(),
            generations_id: "generations".to_string(),
            train_id: "train".to_string(),
            style: SceneStyle::default(),
        }
    }
}

struct Labels {
    ticks: Element,
    generations: Element,
}

impl Labels {
    fn show(&self, frames: &FrameLoop<JsEngine>) {
        self.ticks.set_text_content(Some(frames.ticks_label()));
        self.generations
            .set_text_content(Some(frames.generations_label()));
    }
}

struct Host {
    frames: FrameLoop<JsEngine>,
    surface: CanvasSurface,
    labels: Labels,
}

/// Attach the visualization to the page and start the animation-frame loop.
///
/// `engine` is the simulation object (with `step`, `train`, `ticks`,
/// `world`). `config` is optional JSON overriding element ids and style.
/// Fails without starting anything if the canvas or a label is missing.
#[wasm_bindgen]
pub fn mount(engine: JsValue, config: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();

    let config: HostConfig = match config {
        Some(json) => serde_json::from_str(&json).map_err(|e| JsError::new(&e.to_string()))?,
        None => HostConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;

    let host = setup(&window, &document, engine, &config).map_err(|e| {
        web_sys::console::error_1(&format!("aviary: {e}").into());
        JsError::new(&e.to_string())
    })?;
    host.labels.show(&host.frames);
    let host = Rc::new(RefCell::new(host));

    let button = element(&document, &config.train_id).map_err(|e| JsError::new(&e.to_string()))?;
    attach_train(&button, Rc::clone(&host))?;

    start_loop(&window, host)?;
    Ok(())
}

fn setup(
    window: &Window,
    document: &Document,
    engine: JsValue,
    config: &HostConfig,
) -> Result<Host, ViewportError> {
    let surface = CanvasSurface::acquire(window, document, &config.canvas_id, Palette::default())?;
    let labels = Labels {
        ticks: element(document, &config.ticks_id)?,
        generations: element(document, &config.generations_id)?,
    };
    let frames = FrameLoop::new(
        JsEngine::new(engine),
        surface.viewport(),
        config.style.clone(),
    );
    Ok(Host {
        frames,
        surface,
        labels,
    })
}

fn element(document: &Document, id: &str) -> Result<Element, ViewportError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ViewportError::MissingElement(id.to_string()))
}

fn attach_train(button: &Element, host: Rc<RefCell<Host>>) -> Result<(), JsError> {
    let on_click = Closure::<dyn FnMut()>::new(move || {
        let Ok(mut host) = host.try_borrow_mut() else {
            return;
        };
        let host = &mut *host;
        if host.frames.is_halted() {
            return;
        }
        match host.frames.train() {
            Ok(_) => host.labels.show(&host.frames),
            // The loop sees the stored fault on its next frame and stops.
            Err(e) => web_sys::console::error_1(&format!("aviary: {e}; animation stopped").into()),
        }
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|_| JsError::new("could not attach train handler"))?;
    on_click.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Tick once per animation frame and reschedule. An engine fault is
/// reported once and ends the loop.
fn start_loop(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsError> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let reschedule = Rc::clone(&callback);
    let frame_window = window.clone();

    *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let result = match host.try_borrow_mut() {
            Ok(mut host) => {
                let host = &mut *host;
                let was_halted = host.frames.is_halted();
                let result = host.frames.tick(&mut host.surface);
                host.labels.show(&host.frames);
                result.map_err(|e| (e, was_halted))
            }
            Err(_) => {
                web_sys::console::error_1(&"aviary: host state busy; animation stopped".into());
                return;
            }
        };
        match result {
            Ok(_) => {}
            // Already reported by the train handler.
            Err((_, true)) => return,
            Err((e, false)) => {
                web_sys::console::error_1(&format!("aviary: {e}; animation stopped").into());
                return;
            }
        }
        let scheduled = reschedule
            .borrow()
            .as_ref()
            .map(|cb| frame_window.request_animation_frame(cb.as_ref().unchecked_ref()));
        if !matches!(scheduled, Some(Ok(_))) {
            web_sys::console::error_1(&"aviary: requestAnimationFrame failed; animation stopped".into());
        }
    }));

    let first = callback.borrow();
    let cb = first
        .as_ref()
        .ok_or_else(|| JsError::new("frame callback missing"))?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|_| JsError::new("requestAnimationFrame failed"))?;
    Ok(())
}

/// Lay out one frame for a world given as engine JSON, returning the draw
/// commands as JSON. Lets pages render without the built-in loop.
#[wasm_bindgen]
pub fn render_frame(
    world_json: &str,
    width: f64,
    height: f64,
    dpr: f64,
    style_json: Option<String>,
) -> Result<String, JsError> {
    let style = match style_json {
        Some(json) => SceneStyle::from_json(&json).map_err(|e| JsError::new(&e.to_string()))?,
        None => SceneStyle::default(),
    };
    let world = decode_world(world_json).map_err(|e| JsError::new(&e.to_string()))?;
    let viewport = Viewport::new(width, height, dpr);
    let out = render_scene(&world.snapshot, &viewport, &style);
    serde_json::to_string(&out.commands).map_err(|e| JsError::new(&e.to_string()))
}
