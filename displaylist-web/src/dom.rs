/// DOM helpers: element lookup, canvas viewport, localStorage
use displaylist_core::preferences::{MemoryStore, PreferenceStore};
use displaylist_core::{HarnessError, Result, Viewport, ViewportMetrics};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, Storage, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| HarnessError::Host("missing window".to_string()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| HarnessError::Host("missing document".to_string()))
}

/// Typed lookup by id; absent or mistyped elements are `None`.
pub fn find<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    find(document, id).ok_or_else(|| HarnessError::MissingElement(id.to_string()))
}

/// Attach a listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> std::result::Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// The engine canvas sized to fill its container.
pub struct DomViewport {
    canvas: HtmlCanvasElement,
    container: HtmlElement,
}

impl DomViewport {
    pub fn new(document: &Document, canvas_id: &str, container_id: &str) -> Result<Self> {
        Ok(Self {
            canvas: element_by_id(document, canvas_id)?,
            container: element_by_id(document, container_id)?,
        })
    }
}

impl Viewport for DomViewport {
    fn measure(&self) -> Result<ViewportMetrics> {
        let rect = self.container.get_bounding_client_rect();
        Ok(ViewportMetrics::new(
            rect.width(),
            rect.height(),
            window()?.device_pixel_ratio(),
        ))
    }

    fn apply(&mut self, metrics: &ViewportMetrics) -> Result<()> {
        let (width, height) = metrics.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", metrics.css_width))
            .and_then(|_| style.set_property("height", &format!("{}px", metrics.css_height)))
            .map_err(|e| HarnessError::Host(crate::bindings::describe(&e)))
    }
}

/// `localStorage`, or memory when the browser denies it (private mode, sandboxed frames).
pub enum LocalStore {
    Browser(Storage),
    Memory(MemoryStore),
}

impl LocalStore {
    pub fn open() -> Self {
        match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => LocalStore::Browser(storage),
            None => {
                log::warn!("localStorage unavailable, preferences will not persist");
                LocalStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            LocalStore::Browser(storage) => storage.get_item(key).ok().flatten(),
            LocalStore::Memory(memory) => memory.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self {
            LocalStore::Browser(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("could not persist {key}");
                }
            }
            LocalStore::Memory(memory) => memory.set(key, value),
        }
    }
}
