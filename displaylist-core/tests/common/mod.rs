//! In-memory stand-ins for the browser services.
#![allow(dead_code)]

use std::collections::HashMap;

use displaylist_core::{
    DrawRequest, Engine, EnvironmentProbe, FrameHandle, FrameParams, FrameScheduler, HarnessError,
    ModuleConfig, ModuleHost, Result, TimerHandle, TimerScheduler, Viewport, ViewportMetrics,
};

/// Frame and timer scheduler that only records requests.
#[derive(Default)]
pub struct FakeScheduler {
    next_frame: i32,
    next_timer: u32,
    pub frames_requested: usize,
    pub frames_cancelled: Vec<FrameHandle>,
    pub timers_armed: Vec<(TimerHandle, u32)>,
    pub timers_cleared: Vec<TimerHandle>,
}

impl FakeScheduler {
    pub fn last_frame(&self) -> FrameHandle {
        FrameHandle(self.next_frame)
    }

    /// Handle of the most recently armed timer.
    pub fn last_timer(&self) -> TimerHandle {
        self.timers_armed.last().map(|&(h, _)| h).unwrap()
    }
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_frame += 1;
        self.frames_requested += 1;
        Some(FrameHandle(self.next_frame))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames_cancelled.push(handle);
    }
}

impl TimerScheduler for FakeScheduler {
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerHandle> {
        self.next_timer += 1;
        let handle = TimerHandle(self.next_timer);
        self.timers_armed.push((handle, delay_ms));
        Some(handle)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers_cleared.push(handle);
    }
}

/// Engine view recording every call. Draws defer when `defer` is set.
#[derive(Default)]
pub struct FakeEngine {
    pub defer: bool,
    pub draws: Vec<FrameParams>,
    pub sizes: Vec<f64>,
    pub dirty_rect: Option<bool>,
}

impl FakeEngine {
    pub fn deferred() -> Self {
        Self {
            defer: true,
            ..Self::default()
        }
    }
}

impl Engine for FakeEngine {
    type Pending = usize;

    fn draw(&mut self, params: &FrameParams) -> DrawRequest<usize> {
        self.draws.push(*params);
        if self.defer {
            DrawRequest::Pending(self.draws.len())
        } else {
            DrawRequest::Done(true)
        }
    }

    fn update_size(&mut self, scale_factor: f64) {
        self.sizes.push(scale_factor);
    }

    fn set_show_dirty_rect(&mut self, visible: bool) {
        self.dirty_rect = Some(visible);
    }
}

/// Canvas with a fixed container box.
pub struct FakeViewport {
    pub metrics: ViewportMetrics,
    pub applied: Vec<(u32, u32)>,
    pub missing: bool,
}

impl FakeViewport {
    pub fn new(width: f64, height: f64, ratio: f64) -> Self {
        Self {
            metrics: ViewportMetrics::new(width, height, ratio),
            applied: Vec::new(),
            missing: false,
        }
    }
}

impl Viewport for FakeViewport {
    fn measure(&self) -> Result<ViewportMetrics> {
        if self.missing {
            return Err(HarnessError::MissingElement("container".to_string()));
        }
        Ok(self.metrics)
    }

    fn apply(&mut self, metrics: &ViewportMetrics) -> Result<()> {
        self.applied.push(metrics.backing_size());
        Ok(())
    }
}

/// Module host serving assets from a map and logging every step.
pub struct FakeHost {
    pub probe: EnvironmentProbe,
    pub assets: HashMap<String, Vec<u8>>,
    pub calls: Vec<String>,
    pub fail_instantiate: bool,
}

impl FakeHost {
    pub fn isolated() -> Self {
        let mut assets = HashMap::new();
        assets.insert(
            "/static/resources/font/NotoSansSC-Regular.otf".to_string(),
            vec![1, 2, 3],
        );
        assets.insert(
            "/static/resources/font/NotoColorEmoji.ttf".to_string(),
            vec![9, 9],
        );
        Self {
            probe: EnvironmentProbe {
                cross_origin_isolated: true,
                shared_array_buffer: true,
            },
            assets,
            calls: Vec::new(),
            fail_instantiate: false,
        }
    }
}

impl ModuleHost for FakeHost {
    type Module = ModuleConfig;
    type View = FakeEngine;

    fn environment(&self) -> EnvironmentProbe {
        self.probe
    }

    async fn instantiate(&mut self, config: &ModuleConfig) -> Result<ModuleConfig> {
        self.calls.push(format!("instantiate {}", config.script_url()));
        if self.fail_instantiate {
            return Err(HarnessError::EngineInit("factory threw".to_string()));
        }
        Ok(config.clone())
    }

    fn make_view(
        &mut self,
        _module: &ModuleConfig,
        factory: &str,
        canvas_selector: &str,
    ) -> Result<FakeEngine> {
        self.calls.push(format!("view {factory}.MakeFrom({canvas_selector})"));
        Ok(FakeEngine::default())
    }

    async fn set_image_path(&mut self, _view: &FakeEngine, name: &str, path: &str) -> Result<()> {
        self.calls.push(format!("image {name}={path}"));
        Ok(())
    }

    async fn fetch_bytes(&mut self, path: &str) -> Result<Vec<u8>> {
        self.calls.push(format!("fetch {path}"));
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| HarnessError::AssetFetch {
                path: path.to_string(),
                reason: "404 Not Found".to_string(),
            })
    }

    fn register_fonts(&mut self, _view: &FakeEngine, primary: &[u8], emoji: &[u8]) -> Result<()> {
        self.calls
            .push(format!("fonts {}+{}", primary.len(), emoji.len()));
        Ok(())
    }
}
