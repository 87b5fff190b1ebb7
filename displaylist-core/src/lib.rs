//! Displaylist demo harness core - page state and coordinators
//!
//! Everything the browser harness decides lives here, independent of the
//! DOM: the render loop's draw gating, the resize debouncer, visibility
//! handling, zoom and bounded fields, translations and preferences, and the
//! engine loading sequence. Platform services are traits so the whole flow
//! runs under plain `cargo test`.

pub mod browser;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod preferences;
pub mod render_loop;
pub mod resize;
pub mod session;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types
pub use config::{HarnessConfig, ModuleConfig, ThreadingMode};
pub use engine::{DrawRequest, Engine, FrameParams};
pub use error::{HarnessError, Result};
pub use i18n::{Language, LanguagePreference};
pub use loader::{load_engine, EnvironmentProbe, LoadedEngine, ModuleHost};
pub use render_loop::{DrawPermit, FrameHandle, FrameScheduler, RenderLoop};
pub use resize::{ResizeDebouncer, ResizeOutcome, ResizeState, TimerHandle, TimerScheduler};
pub use session::Session;
pub use viewport::{Viewport, ViewportMetrics};
pub use zoom::{BoundedInput, ZoomAction, ZoomLevel, ZoomWidget};
