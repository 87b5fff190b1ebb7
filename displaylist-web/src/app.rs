/// Page application state shared by every DOM callback
use std::cell::RefCell;
use std::rc::Rc;

use displaylist_core::{
    HarnessConfig, LanguagePreference, LoadedEngine, Session, TimerHandle, ZoomLevel, ZoomWidget,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::bindings::describe;
use crate::dom::{self, listen, DomViewport, LocalStore};
use crate::scheduler::BrowserScheduler;
use crate::view::JsView;

pub type AppCell = RefCell<App>;
pub type SharedApp = Rc<AppCell>;

/// Everything one page owns. Callbacks borrow it mutably for the length of
/// a single handler; nothing holds a borrow across an await.
pub struct App {
    pub config: HarnessConfig,
    pub session: Session<JsView>,
    pub scheduler: BrowserScheduler,
    pub viewport: Option<DomViewport>,
    pub module: Option<JsValue>,
    pub zoom: ZoomWidget,
    pub language: LanguagePreference,
    pub store: LocalStore,
    pub browser_supported: bool,
    lifecycle_bound: bool,
}

impl App {
    pub fn create(config: HarnessConfig) -> SharedApp {
        Rc::new_cyclic(|weak| {
            RefCell::new(App {
                session: Session::new(&config),
                scheduler: BrowserScheduler::new(weak.clone()),
                config,
                viewport: None,
                module: None,
                zoom: ZoomWidget::new(),
                language: LanguagePreference::Auto,
                store: LocalStore::open(),
                browser_supported: true,
                lifecycle_bound: false,
            })
        })
    }

    /// Bind the loaded engine: size the canvas, start the render loop and
    /// hook resize, visibility and unload.
    pub fn attach(app: &SharedApp, loaded: LoadedEngine<JsValue, JsView>) -> displaylist_core::Result<()> {
        let document = dom::document()?;
        {
            let mut guard = app.borrow_mut();
            let this = &mut *guard;
            let mut viewport =
                DomViewport::new(&document, &this.config.canvas_id, &this.config.container_id)?;
            this.session
                .attach(loaded.view, &mut this.scheduler, &mut viewport)?;
            let zoom = this.zoom.level();
            this.session.set_zoom(zoom);
            this.viewport = Some(viewport);
            this.module = Some(loaded.module);
            if this.lifecycle_bound {
                return Ok(());
            }
            this.lifecycle_bound = true;
        }
        Self::bind_lifecycle(app).map_err(|e| displaylist_core::HarnessError::Host(describe(&e)))
    }

    fn bind_lifecycle(app: &SharedApp) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("missing document"))?;

        {
            let app = app.clone();
            listen(&window, "resize", move |_| {
                let Ok(mut guard) = app.try_borrow_mut() else {
                    return;
                };
                let this = &mut *guard;
                this.session.on_resize(&mut this.scheduler);
            })?;
        }

        {
            let app = app.clone();
            let doc = document.clone();
            listen(&document, "visibilitychange", move |_| {
                let Ok(mut guard) = app.try_borrow_mut() else {
                    return;
                };
                let this = &mut *guard;
                let visible = !doc.hidden();
                if this.session.on_visibility_change(visible, &mut this.scheduler) {
                    log::debug!("render loop resumed");
                }
            })?;
        }

        {
            let app = app.clone();
            listen(&window, "beforeunload", move |_| {
                let Ok(mut guard) = app.try_borrow_mut() else {
                    return;
                };
                let this = &mut *guard;
                this.session.teardown(&mut this.scheduler);
            })?;
        }

        Ok(())
    }

    /// Animation frame callback.
    pub fn on_frame(app: &SharedApp) {
        let pending = {
            let Ok(mut guard) = app.try_borrow_mut() else {
                log::warn!("frame skipped, state busy");
                return;
            };
            let this = &mut *guard;
            this.session.on_frame(&mut this.scheduler)
        };
        let Some(promise) = pending else {
            return;
        };
        let app = Rc::downgrade(app);
        spawn_local(async move {
            let ready = match JsFuture::from(promise).await {
                Ok(value) => value.is_truthy(),
                Err(e) => {
                    log::error!("draw rejected: {}", describe(&e));
                    false
                }
            };
            if let Some(app) = app.upgrade() {
                app.borrow_mut().session.complete_draw(ready);
            }
        });
    }

    /// Resize debounce timer callback.
    pub fn on_resize_timer(app: &SharedApp, handle: TimerHandle) {
        let Ok(mut guard) = app.try_borrow_mut() else {
            log::warn!("resize timer dropped, state busy");
            return;
        };
        let this = &mut *guard;
        this.scheduler.timer_fired(handle);
        let Some(viewport) = this.viewport.as_mut() else {
            return;
        };
        if let Err(e) = this
            .session
            .on_resize_timer(handle, &mut this.scheduler, viewport)
        {
            log::error!("resize failed: {e}");
        }
    }

    /// Zoom changed in the widget: show it and hand it to the next draw.
    pub fn apply_zoom(&mut self, level: ZoomLevel) {
        self.session.set_zoom(level);
        if let Ok(document) = dom::document() {
            crate::ui::show_zoom(&document, level);
        }
    }
}
