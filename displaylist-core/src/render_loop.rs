/// Animation-frame redraw loop with single-flight draw gating
use crate::engine::{DrawRequest, Engine, FrameParams};

/// Handle of a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// The platform's frame-scheduling primitive.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Draw permission token. Only the render loop transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawPermit {
    #[default]
    Idle,
    Busy,
}

/// Owns the draw permit and the scheduled-frame handle.
///
/// A tick issues a draw only while the permit is `Idle`. Issuing a draw
/// flips it to `Busy`; the draw's result decides what it goes back to.
/// Frames that arrive while `Busy` are skipped without touching anything.
#[derive(Debug, Default)]
pub struct RenderLoop {
    permit: DrawPermit,
    frame: Option<FrameHandle>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permit(&self) -> DrawPermit {
        self.permit
    }

    pub fn is_busy(&self) -> bool {
        self.permit == DrawPermit::Busy
    }

    /// A frame is scheduled, i.e. the chain is alive.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Begin the scheduling chain. A second call while running is a no-op,
    /// so there is never more than one chain. Returns true if a chain was started.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.frame.is_some() {
            return false;
        }
        self.frame = scheduler.request_frame();
        self.frame.is_some()
    }

    /// One animation frame. Returns the pending result when the engine
    /// deferred its answer.
    pub fn tick<E: Engine>(
        &mut self,
        engine: Option<&mut E>,
        params: &FrameParams,
        page_visible: bool,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<E::Pending> {
        // the handle that delivered this tick is spent
        self.frame = None;
        let engine = match engine {
            Some(engine) if page_visible => engine,
            _ => {
                log::debug!("render loop stopped");
                return None;
            }
        };
        let pending = self.draw(engine, params);
        self.frame = scheduler.request_frame();
        pending
    }

    fn draw<E: Engine>(&mut self, engine: &mut E, params: &FrameParams) -> Option<E::Pending> {
        if self.permit == DrawPermit::Busy {
            return None;
        }
        self.permit = DrawPermit::Busy;
        match engine.draw(params) {
            DrawRequest::Done(ready) => {
                self.complete_draw(ready);
                None
            }
            DrawRequest::Pending(pending) => Some(pending),
        }
    }

    /// The in-flight draw resolved. `false` keeps the permit `Busy`.
    pub fn complete_draw(&mut self, ready: bool) {
        if !ready {
            log::warn!("engine declined further draws");
        }
        self.permit = if ready {
            DrawPermit::Idle
        } else {
            DrawPermit::Busy
        };
    }

    /// Cancel the scheduled frame, if any.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Frames {
        next: i32,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for Frames {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            let handle = FrameHandle(self.next);
            self.requested.push(handle);
            Some(handle)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    /// Engine answering with a fixed result, or deferring when `defer` is set.
    struct StubEngine {
        draws: Vec<FrameParams>,
        answer: bool,
        defer: bool,
    }

    impl StubEngine {
        fn immediate(answer: bool) -> Self {
            Self {
                draws: Vec::new(),
                answer,
                defer: false,
            }
        }

        fn deferred() -> Self {
            Self {
                draws: Vec::new(),
                answer: true,
                defer: true,
            }
        }
    }

    impl Engine for StubEngine {
        type Pending = u32;

        fn draw(&mut self, params: &FrameParams) -> DrawRequest<u32> {
            self.draws.push(*params);
            if self.defer {
                DrawRequest::Pending(self.draws.len() as u32)
            } else {
                DrawRequest::Done(self.answer)
            }
        }

        fn update_size(&mut self, _scale_factor: f64) {}

        fn set_show_dirty_rect(&mut self, _visible: bool) {}
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut frames = Frames::default();
        let mut render = RenderLoop::new();
        assert!(render.start(&mut frames));
        assert!(!render.start(&mut frames));
        assert_eq!(frames.requested.len(), 1);
        assert!(render.is_running());
    }

    #[test]
    fn test_immediate_draw_each_frame() {
        let mut frames = Frames::default();
        let mut engine = StubEngine::immediate(true);
        let mut render = RenderLoop::new();
        let params = FrameParams::default();

        render.start(&mut frames);
        for _ in 0..3 {
            assert!(render.tick(Some(&mut engine), &params, true, &mut frames).is_none());
        }
        assert_eq!(engine.draws.len(), 3);
        assert_eq!(render.permit(), DrawPermit::Idle);
        assert_eq!(frames.requested.len(), 4);
    }

    #[test]
    fn test_busy_frames_are_skipped() {
        let mut frames = Frames::default();
        let mut engine = StubEngine::deferred();
        let mut render = RenderLoop::new();
        let params = FrameParams::default();

        assert_eq!(render.tick(Some(&mut engine), &params, true, &mut frames), Some(1));
        assert!(render.is_busy());

        // engine still working: no draw, permit untouched, chain continues
        assert_eq!(render.tick(Some(&mut engine), &params, true, &mut frames), None);
        assert_eq!(render.tick(Some(&mut engine), &params, true, &mut frames), None);
        assert_eq!(engine.draws.len(), 1);
        assert!(render.is_busy());
        assert!(render.is_running());

        render.complete_draw(true);
        assert_eq!(render.tick(Some(&mut engine), &params, true, &mut frames), Some(2));
        assert_eq!(engine.draws.len(), 2);
    }

    #[test]
    fn test_declined_draw_keeps_permit_busy() {
        let mut frames = Frames::default();
        let mut engine = StubEngine::immediate(false);
        let mut render = RenderLoop::new();
        let params = FrameParams::default();

        render.tick(Some(&mut engine), &params, true, &mut frames);
        render.tick(Some(&mut engine), &params, true, &mut frames);
        assert_eq!(engine.draws.len(), 1);
        assert!(render.is_busy());
    }

    #[test]
    fn test_hidden_page_stops_chain() {
        let mut frames = Frames::default();
        let mut engine = StubEngine::immediate(true);
        let mut render = RenderLoop::new();
        let params = FrameParams::default();

        render.start(&mut frames);
        render.tick(Some(&mut engine), &params, false, &mut frames);
        assert!(!render.is_running());
        assert!(engine.draws.is_empty());
        assert_eq!(frames.requested.len(), 1);
    }

    #[test]
    fn test_no_engine_stops_chain() {
        let mut frames = Frames::default();
        let mut render = RenderLoop::new();
        render.start(&mut frames);
        let pending = render.tick::<StubEngine>(None, &FrameParams::default(), true, &mut frames);
        assert!(pending.is_none());
        assert!(!render.is_running());
    }

    #[test]
    fn test_draw_receives_params() {
        let mut frames = Frames::default();
        let mut engine = StubEngine::immediate(true);
        let mut render = RenderLoop::new();
        let params = FrameParams {
            draw_index: 3,
            zoom: 2.5,
            offset_x: 10.0,
            offset_y: -4.0,
        };
        render.tick(Some(&mut engine), &params, true, &mut frames);
        assert_eq!(engine.draws, vec![params]);
    }

    #[test]
    fn test_stop_cancels_scheduled_frame() {
        let mut frames = Frames::default();
        let mut render = RenderLoop::new();
        render.start(&mut frames);
        render.stop(&mut frames);
        assert_eq!(frames.cancelled, vec![FrameHandle(1)]);
        assert!(!render.is_running());

        render.stop(&mut frames);
        assert_eq!(frames.cancelled.len(), 1);
    }
}
