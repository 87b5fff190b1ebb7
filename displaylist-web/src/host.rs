/// Browser implementation of the core module host
use displaylist_core::{EnvironmentProbe, HarnessError, ModuleConfig, ModuleHost, Result};
use gloo_net::http::Request;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::bindings::{describe, import_module, ViewFactory};
use crate::view::JsView;

/// Loads the engine through dynamic `import()` and talks to it via `js-sys`.
#[derive(Default)]
pub struct WebHost;

impl WebHost {
    pub fn new() -> Self {
        Self
    }
}

fn global_flag(name: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name)).ok()
}

fn engine_init(e: JsValue) -> HarnessError {
    HarnessError::EngineInit(describe(&e))
}

/// Module factory options: `locateFile` always, `mainScriptUrlOrBlob` for threaded builds.
fn factory_options(config: &ModuleConfig) -> Result<Object> {
    let options = Object::new();
    let resolver = config.clone();
    let locate_file = Closure::<dyn Fn(String) -> String>::new(move |file: String| {
        resolver.locate_file(&file)
    });
    Reflect::set(&options, &"locateFile".into(), &locate_file.into_js_value())
        .map_err(engine_init)?;
    if let Some(url) = config.main_script_url() {
        Reflect::set(&options, &"mainScriptUrlOrBlob".into(), &JsValue::from_str(&url))
            .map_err(engine_init)?;
    }
    Ok(options)
}

impl ModuleHost for WebHost {
    type Module = JsValue;
    type View = JsView;

    fn environment(&self) -> EnvironmentProbe {
        EnvironmentProbe {
            cross_origin_isolated: global_flag("crossOriginIsolated")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            shared_array_buffer: global_flag("SharedArrayBuffer")
                .map(|v| !v.is_undefined())
                .unwrap_or(false),
        }
    }

    async fn instantiate(&mut self, config: &ModuleConfig) -> Result<JsValue> {
        let script_url = config.script_url();
        let namespace = JsFuture::from(import_module(&script_url).map_err(engine_init)?)
            .await
            .map_err(engine_init)?;

        let factory: Function = Reflect::get(&namespace, &"default".into())
            .map_err(engine_init)?
            .dyn_into()
            .map_err(|_| HarnessError::EngineInit(format!("{script_url} has no default export")))?;

        let options = factory_options(config)?;
        let module = factory.call1(&JsValue::NULL, &options).map_err(engine_init)?;
        JsFuture::from(Promise::resolve(&module))
            .await
            .map_err(engine_init)
    }

    fn make_view(&mut self, module: &JsValue, factory: &str, canvas_selector: &str) -> Result<JsView> {
        let view_factory = Reflect::get(module, &JsValue::from_str(factory)).map_err(engine_init)?;
        if view_factory.is_undefined() || view_factory.is_null() {
            return Err(HarnessError::EngineInit(format!("module has no {factory}")));
        }
        let view = view_factory
            .unchecked_into::<ViewFactory>()
            .make_from(canvas_selector)
            .map_err(engine_init)?;
        if view.is_undefined() || view.is_null() {
            return Err(HarnessError::EngineInit(format!(
                "could not bind a view to {canvas_selector}"
            )));
        }
        Ok(JsView::new(view))
    }

    async fn set_image_path(&mut self, view: &JsView, name: &str, path: &str) -> Result<()> {
        let pending = view.inner().set_image_path(name, path).map_err(engine_init)?;
        JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(|e| HarnessError::AssetFetch {
                path: path.to_string(),
                reason: describe(&e),
            })?;
        Ok(())
    }

    async fn fetch_bytes(&mut self, path: &str) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| HarnessError::AssetFetch {
            path: path.to_string(),
            reason,
        };
        let response = Request::get(path)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        if !response.ok() {
            return Err(fetch_error(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )));
        }
        response.binary().await.map_err(|e| fetch_error(e.to_string()))
    }

    fn register_fonts(&mut self, view: &JsView, primary: &[u8], emoji: &[u8]) -> Result<()> {
        view.inner()
            .register_fonts(primary, emoji)
            .map_err(engine_init)
    }
}
