/// Raw JS bindings to the engine module and its views
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// A view created by the engine's view factory, bound to one canvas.
    pub type EngineView;

    #[wasm_bindgen(method, catch)]
    pub fn draw(
        this: &EngineView,
        draw_index: i32,
        zoom: f32,
        offset_x: f32,
        offset_y: f32,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = updateSize)]
    pub fn update_size(this: &EngineView, device_pixel_ratio: f64);

    #[wasm_bindgen(method, js_name = setShowDirtyRect)]
    pub fn set_show_dirty_rect(this: &EngineView, visible: bool);

    #[wasm_bindgen(method, catch, js_name = registerFonts)]
    pub fn register_fonts(this: &EngineView, primary: &[u8], emoji: &[u8]) -> Result<(), JsValue>;

    /// Resolves once the engine has decoded the image.
    #[wasm_bindgen(method, catch, js_name = setImagePath)]
    pub fn set_image_path(this: &EngineView, name: &str, path: &str) -> Result<JsValue, JsValue>;

    /// Class on the instantiated module that creates views, e.g. `TGFXThreadsView`.
    pub type ViewFactory;

    #[wasm_bindgen(method, catch, js_name = MakeFrom)]
    pub fn make_from(this: &ViewFactory, canvas_selector: &str) -> Result<JsValue, JsValue>;
}

// Relative engine paths resolve against the page, not this snippet.
#[wasm_bindgen(inline_js = "export function import_module(url) { return import(new URL(url, document.baseURI).href); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub fn import_module(url: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Best-effort human readable text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
