/// Page session: the explicit context every handler operates on
use crate::config::HarnessConfig;
use crate::engine::{Engine, FrameParams};
use crate::error::Result;
use crate::render_loop::{DrawPermit, FrameScheduler, RenderLoop};
use crate::resize::{ResizeDebouncer, ResizeOutcome, ResizeState, TimerHandle, TimerScheduler};
use crate::viewport::Viewport;
use crate::zoom::ZoomLevel;

/// Shared view state for one page lifetime: engine handle, draw
/// arguments, visibility, the render loop and the resize debouncer.
///
/// UI handlers only write draw arguments here; the render loop picks them
/// up on its next tick.
pub struct Session<E: Engine> {
    engine: Option<E>,
    params: FrameParams,
    page_visible: bool,
    render: RenderLoop,
    resize: ResizeDebouncer,
}

impl<E: Engine> Session<E> {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            engine: None,
            params: FrameParams::default(),
            page_visible: true,
            render: RenderLoop::new(),
            resize: ResizeDebouncer::new(config.resize_debounce_ms),
        }
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    pub fn is_page_visible(&self) -> bool {
        self.page_visible
    }

    pub fn is_running(&self) -> bool {
        self.render.is_running()
    }

    pub fn draw_permit(&self) -> DrawPermit {
        self.render.permit()
    }

    pub fn resize_state(&self) -> ResizeState {
        self.resize.state()
    }

    /// Bind a fully prepared engine view: compute the initial size, then
    /// start the render loop. Nothing is started if sizing fails.
    pub fn attach(
        &mut self,
        engine: E,
        scheduler: &mut impl FrameScheduler,
        viewport: &mut impl Viewport,
    ) -> Result<()> {
        self.engine = Some(engine);
        if let Err(e) = self.recompute_size(viewport) {
            self.engine = None;
            return Err(e);
        }
        self.render.start(scheduler);
        log::info!("render loop started");
        Ok(())
    }

    /// Animation-frame callback.
    pub fn on_frame(&mut self, scheduler: &mut impl FrameScheduler) -> Option<E::Pending> {
        self.render
            .tick(self.engine.as_mut(), &self.params, self.page_visible, scheduler)
    }

    /// A deferred draw resolved with `ready`.
    pub fn complete_draw(&mut self, ready: bool) {
        self.render.complete_draw(ready);
    }

    /// Raw window resize notification.
    pub fn on_resize(&mut self, scheduler: &mut impl TimerScheduler) {
        if self.engine.is_none() {
            return;
        }
        if self.resize.notify(scheduler) {
            log::debug!("resize burst started");
        }
    }

    /// The resize timer `handle` fired.
    pub fn on_resize_timer(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut impl TimerScheduler,
        viewport: &mut impl Viewport,
    ) -> Result<ResizeOutcome> {
        if self.engine.is_none() {
            self.resize.cancel(scheduler);
            return Ok(ResizeOutcome::Dropped);
        }
        let outcome = self.resize.fire(handle, self.render.is_busy(), scheduler);
        if outcome == ResizeOutcome::Recompute {
            self.recompute_size(viewport)?;
        }
        Ok(outcome)
    }

    /// Page visibility changed. Returns true if the render loop was restarted.
    pub fn on_visibility_change(
        &mut self,
        visible: bool,
        scheduler: &mut impl FrameScheduler,
    ) -> bool {
        self.page_visible = visible;
        if visible && !self.render.is_running() && self.engine.is_some() {
            return self.render.start(scheduler);
        }
        false
    }

    /// Page unload: cancel the scheduled frame and any resize timer, whatever the state.
    pub fn teardown<S: FrameScheduler + TimerScheduler>(&mut self, scheduler: &mut S) {
        self.render.stop(scheduler);
        self.resize.cancel(scheduler);
    }

    pub fn set_zoom(&mut self, level: ZoomLevel) {
        self.params.zoom = level.factor();
    }

    pub fn set_draw_index(&mut self, index: i32) {
        self.params.draw_index = index;
    }

    pub fn set_offset(&mut self, offset_x: f32, offset_y: f32) {
        self.params.offset_x = offset_x;
        self.params.offset_y = offset_y;
    }

    /// Forward the dirty-rect overlay toggle. Returns false without an engine.
    pub fn set_show_dirty_rect(&mut self, visible: bool) -> bool {
        match self.engine.as_mut() {
            Some(engine) => {
                engine.set_show_dirty_rect(visible);
                true
            }
            None => false,
        }
    }

    fn recompute_size(&mut self, viewport: &mut impl Viewport) -> Result<()> {
        let metrics = viewport.measure()?;
        viewport.apply(&metrics)?;
        let (width, height) = metrics.backing_size();
        log::debug!("updateSize {width}x{height} @{}", metrics.device_pixel_ratio);
        if let Some(engine) = self.engine.as_mut() {
            engine.update_size(metrics.device_pixel_ratio);
        }
        Ok(())
    }
}
