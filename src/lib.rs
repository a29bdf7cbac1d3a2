mod utils;

pub mod app;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod fps;
pub mod particle;
pub mod scroll;
pub mod surface;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use app::{mount, mount_canvas, FieldHandle};
pub use config::FieldConfig;
pub use error::Error;
pub use field::{FieldEvent, FrameInput, ParticleField};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger(log::Level::Info);
}

/// The default configuration as a plain JS object, handy as a template for
/// the object passed to `mount`.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&FieldConfig::default())
        .map_err(|err| JsValue::from(Error::ConfigEncode(err.to_string())))
}

#[wasm_bindgen]
pub fn version() -> String {
    format!("particle-field {}", env!("CARGO_PKG_VERSION"))
}

/// Times its own lifetime with `console.time`, for profiling frames.
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
