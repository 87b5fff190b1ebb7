//! Displaylist Web - browser harness for the displaylist WASM engine
//!
//! Loads the engine module, wires the page controls to it and drives the
//! animation-frame redraw loop. All decisions live in `displaylist-core`;
//! this crate binds them to the DOM.

mod app;
mod bindings;
mod dom;
mod host;
mod scheduler;
mod ui;
mod view;

use displaylist_core::consts::ids;
use displaylist_core::{browser, load_engine, HarnessConfig, HarnessError, ThreadingMode};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::app::{App, SharedApp};
use crate::host::WebHost;

fn to_js(error: HarnessError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// Page-facing handle. One per page.
#[wasm_bindgen]
pub struct Harness {
    app: SharedApp,
}

#[wasm_bindgen]
impl Harness {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Harness {
        Harness {
            app: App::create(HarnessConfig::default()),
        }
    }

    /// Build with a JSON override of the default configuration.
    pub fn with_config(json: &str) -> Result<Harness, JsValue> {
        let config = HarnessConfig::from_json(json).map_err(to_js)?;
        Ok(Harness {
            app: App::create(config),
        })
    }

    /// Wire language, render options, bounded fields and the zoom widget.
    pub fn init_app(&self) -> Result<(), JsValue> {
        let document = dom::document().map_err(to_js)?;
        ui::init_app(&self.app, &document)
    }

    /// Desktop Chromium check. Shows the warning overlay when it fails.
    pub fn check_browser(&self) -> bool {
        let user_agent = web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default();
        let supported = {
            let mut this = self.app.borrow_mut();
            let supported = browser::check_browser(&user_agent, &mut this.store);
            this.browser_supported = supported;
            supported
        };
        if !supported {
            if let Ok(document) = dom::document() {
                ui::show_browser_warning(&document);
            }
        }
        supported
    }

    /// Load the engine from `engine_dir` (`<dir>.js` / `<dir>.wasm`) in
    /// threading mode `mode` (`"mt"` or anything else for single-threaded),
    /// then start rendering. Rejects with a descriptive error.
    pub fn load_module(&self, engine_dir: Option<String>, mode: Option<String>) -> Promise {
        let app = self.app.clone();
        let mut config = app.borrow().config.clone();
        if let Some(dir) = engine_dir {
            config.engine_dir = dir;
        }
        if let Some(mode) = mode {
            config.threading = ThreadingMode::from_tag(&mode);
        }
        future_to_promise(async move {
            let mut host = WebHost::new();
            let loaded = load_engine(&mut host, &config).await.map_err(to_js)?;
            App::attach(&app, loaded).map_err(to_js)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Check the browser, then load with the configured engine. Unsupported
    /// browsers keep the warning up and nothing is loaded.
    pub fn run(&self) -> Promise {
        if !self.check_browser() {
            log::warn!("browser unsupported, engine not loaded");
            return Promise::resolve(&JsValue::UNDEFINED);
        }
        self.load_module(None, None)
    }

    /// Hook the dirty-rect select to the engine. No-op before a load.
    pub fn bind_event_listeners(&self) -> Result<(), JsValue> {
        if !self.app.borrow().session.has_engine() {
            return Ok(());
        }
        let document = dom::document().map_err(to_js)?;
        let Some(select) = dom::find::<web_sys::HtmlSelectElement>(&document, ids::SHOW_DIRTY_RECT)
        else {
            return Ok(());
        };
        let app = self.app.clone();
        let select_for_cb = select.clone();
        dom::listen(&select, "change", move |_| {
            if let Ok(mut this) = app.try_borrow_mut() {
                this.session
                    .set_show_dirty_rect(select_for_cb.value() == "true");
            }
        })
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    Ok(())
}
