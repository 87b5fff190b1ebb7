/// requestAnimationFrame and setTimeout behind the core scheduler traits
use std::collections::HashMap;
use std::rc::Weak;

use displaylist_core::{FrameHandle, FrameScheduler, TimerHandle, TimerScheduler};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;

use crate::app::{App, AppCell};
use crate::bindings::describe;

pub struct BrowserScheduler {
    app: Weak<AppCell>,
    frame_callback: Closure<dyn FnMut(f64)>,
    timers: HashMap<u32, Timeout>,
    next_timer: u32,
}

impl BrowserScheduler {
    pub fn new(app: Weak<AppCell>) -> Self {
        let frame_app = app.clone();
        let frame_callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            if let Some(app) = frame_app.upgrade() {
                App::on_frame(&app);
            }
        });
        Self {
            app,
            frame_callback,
            timers: HashMap::new(),
            next_timer: 0,
        }
    }

    /// Called from inside a timer's own callback: release it without cancelling.
    pub fn timer_fired(&mut self, handle: TimerHandle) {
        if let Some(timeout) = self.timers.remove(&handle.0) {
            timeout.forget();
        }
    }
}

impl FrameScheduler for BrowserScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        match window.request_animation_frame(self.frame_callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {}", describe(&e));
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.cancel_animation_frame(handle.0) {
                log::warn!("cancelAnimationFrame failed: {}", describe(&e));
            }
        }
    }
}

impl TimerScheduler for BrowserScheduler {
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerHandle> {
        self.next_timer = self.next_timer.wrapping_add(1);
        let handle = TimerHandle(self.next_timer);
        let app = self.app.clone();
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(app) = app.upgrade() {
                App::on_resize_timer(&app, handle);
            }
        });
        self.timers.insert(handle.0, timeout);
        Some(handle)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        // dropping a gloo Timeout clears it
        self.timers.remove(&handle.0);
    }
}
