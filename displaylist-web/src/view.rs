/// Engine view adapter: JS view object behind the core `Engine` trait
use displaylist_core::{DrawRequest, Engine, FrameParams};
use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::bindings::{describe, EngineView};

pub struct JsView {
    view: EngineView,
}

impl JsView {
    pub fn new(view: JsValue) -> Self {
        Self {
            view: view.unchecked_into(),
        }
    }

    pub fn inner(&self) -> &EngineView {
        &self.view
    }
}

/// Promise-like check: any object with a callable `then`.
fn is_thenable(value: &JsValue) -> bool {
    value.is_object()
        && Reflect::get(value, &JsValue::from_str("then"))
            .map(|then| then.is_function())
            .unwrap_or(false)
}

impl Engine for JsView {
    type Pending = Promise;

    fn draw(&mut self, params: &FrameParams) -> DrawRequest<Promise> {
        let result = self.view.draw(
            params.draw_index,
            params.zoom,
            params.offset_x,
            params.offset_y,
        );
        match result {
            Ok(value) if is_thenable(&value) => DrawRequest::Pending(Promise::resolve(&value)),
            Ok(value) => DrawRequest::Done(value.is_truthy()),
            Err(e) => {
                log::error!("draw threw: {}", describe(&e));
                DrawRequest::Done(false)
            }
        }
    }

    fn update_size(&mut self, scale_factor: f64) {
        self.view.update_size(scale_factor);
    }

    fn set_show_dirty_rect(&mut self, visible: bool) {
        self.view.set_show_dirty_rect(visible);
    }
}
