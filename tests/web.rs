//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field::canvas::CanvasSurface;
use particle_field::{mount, mount_canvas, FieldConfig};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlCanvasElement, HtmlElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn container(width: u32, height: u32) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    let style = div.style();
    style.set_property("position", "fixed").unwrap();
    style.set_property("width", &format!("{}px", width)).unwrap();
    style.set_property("height", &format!("{}px", height)).unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn span() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let span = document.create_element("span").unwrap();
    document.body().unwrap().append_child(&span).unwrap();
    span
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn mount_populates_from_container_size() {
    let host = container(400, 300);
    let mut handle = mount(host.clone(), None, None, None, JsValue::UNDEFINED).unwrap();
    // floor(120000 * 0.00015) + floor(120000 * 0.00005)
    assert_eq!(handle.entity_count(), 18 + 6);
    assert_eq!(host.child_element_count(), 1);

    handle.stop();
    assert_eq!(host.child_element_count(), 0);
    handle.stop();
    host.remove();
}

#[wasm_bindgen_test]
fn entity_count_is_reported_to_the_host() {
    let host = container(1000, 1000);
    let window = web_sys::window().unwrap();
    let report = js_sys::Function::new_with_args("n", "window.__particleEntities = n;");
    let handle = mount(host.clone(), None, None, Some(report), JsValue::NULL).unwrap();

    let reported = js_sys::Reflect::get(&window, &JsValue::from_str("__particleEntities")).unwrap();
    assert_eq!(reported.as_f64(), Some(200.0));
    assert_eq!(handle.entity_count(), 200);

    drop(handle);
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let host = container(100, 100);
    let config = serde_wasm_bindgen::to_value(&FieldConfig {
        damping: 2.0,
        ..FieldConfig::default()
    })
    .unwrap();
    assert!(mount(host.clone(), None, None, None, config).is_err());
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
fn canvas_backing_store_follows_pixel_ratio() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    let mut surface = CanvasSurface::new(canvas.clone()).unwrap();
    surface.resize(320.0, 200.0, 2.0).unwrap();

    assert_eq!(canvas.width(), 640);
    assert_eq!(canvas.height(), 400);
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "320px");
    assert_eq!(canvas.style().get_property_value("height").unwrap(), "200px");
}

#[wasm_bindgen_test]
async fn frame_rate_is_written_to_the_display() {
    let host = container(200, 200);
    let display = span();
    let handle = mount(host.clone(), None, Some(display.clone()), None, JsValue::UNDEFINED).unwrap();

    sleep(1500).await;
    let text = display.text_content().unwrap_or_default();
    let fps: u32 = text.parse().unwrap();
    assert!(fps > 0);

    drop(handle);
    display.remove();
    host.remove();
}

#[wasm_bindgen_test]
async fn canvas_without_2d_context_halts_quietly() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    // Once another context kind is taken the canvas hands out no 2d context
    let claimed = canvas
        .get_context("webgl")
        .ok()
        .flatten()
        .or_else(|| canvas.get_context("bitmaprenderer").ok().flatten());
    assert!(claimed.is_some());

    let host = container(200, 200);
    let display = span();
    let handle = mount_canvas(
        canvas.clone(),
        host.clone(),
        None,
        Some(display.clone()),
        None,
        JsValue::UNDEFINED,
    )
    .unwrap();
    assert!(!canvas.is_connected());
    assert_eq!(host.child_element_count(), 0);

    sleep(1200).await;
    assert_eq!(display.text_content().unwrap_or_default(), "");

    drop(handle);
    display.remove();
    host.remove();
}

#[wasm_bindgen_test]
fn pointer_leaving_the_window_deactivates_repulsion() {
    let window = web_sys::window().unwrap();
    let host = container(200, 200);
    let handle = mount(host.clone(), None, None, None, JsValue::UNDEFINED).unwrap();
    assert!(!handle.pointer_active());

    let moved = MouseEvent::new("mousemove").unwrap();
    window.dispatch_event(&moved).unwrap();
    assert!(handle.pointer_active());

    // A synthetic mouseout carries no related target
    let left = MouseEvent::new("mouseout").unwrap();
    window.dispatch_event(&left).unwrap();
    assert!(!handle.pointer_active());

    drop(handle);
    host.remove();
}
