//! The capability surface the harness consumes from the engine view

/// Per-frame draw arguments, read by the render loop on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub draw_index: i32,
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            draw_index: 0,
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Answer to a draw call: either immediate, or a deferred completion the
/// caller must await and report back through `Session::complete_draw`.
///
/// The boolean is the engine's back-pressure signal: `true` means it can
/// take another draw right away.
#[derive(Debug)]
pub enum DrawRequest<P> {
    Done(bool),
    Pending(P),
}

/// An engine view bound to a canvas.
pub trait Engine {
    /// Deferred draw result (a JS promise on the web).
    type Pending;

    fn draw(&mut self, params: &FrameParams) -> DrawRequest<Self::Pending>;

    /// Backing store changed; `scale_factor` is the device pixel ratio.
    fn update_size(&mut self, scale_factor: f64);

    fn set_show_dirty_rect(&mut self, visible: bool);
}
