/// Engine module loading: environment checks, instantiation, asset registration
use crate::config::{HarnessConfig, ModuleConfig, ThreadingMode};
use crate::engine::Engine;
use crate::error::{HarnessError, Result};

/// Environment signals needed by the multi-threaded engine build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentProbe {
    pub cross_origin_isolated: bool,
    pub shared_array_buffer: bool,
}

impl EnvironmentProbe {
    /// Multi-threaded builds need cross-origin isolation and `SharedArrayBuffer`.
    /// Single-threaded builds need neither.
    pub fn validate(&self, mode: ThreadingMode) -> Result<()> {
        if !mode.is_multi_threaded() {
            return Ok(());
        }
        if !self.cross_origin_isolated {
            return Err(HarnessError::CrossOriginIsolationRequired);
        }
        if !self.shared_array_buffer {
            return Err(HarnessError::SharedMemoryUnavailable);
        }
        Ok(())
    }
}

/// Host services the loader drives. Implemented over `wasm-bindgen` in the
/// web crate and by fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ModuleHost {
    /// The instantiated engine module.
    type Module;
    /// A view bound to a canvas.
    type View: Engine;

    fn environment(&self) -> EnvironmentProbe;

    /// Import the engine script and run its module factory with `config`.
    async fn instantiate(&mut self, config: &ModuleConfig) -> Result<Self::Module>;

    /// Create a view through `factory` on the module, bound to `canvas_selector`.
    fn make_view(
        &mut self,
        module: &Self::Module,
        factory: &str,
        canvas_selector: &str,
    ) -> Result<Self::View>;

    async fn set_image_path(&mut self, view: &Self::View, name: &str, path: &str) -> Result<()>;

    async fn fetch_bytes(&mut self, path: &str) -> Result<Vec<u8>>;

    fn register_fonts(&mut self, view: &Self::View, primary: &[u8], emoji: &[u8]) -> Result<()>;
}

/// A module with a fully prepared view, ready for `Session::attach`.
pub struct LoadedEngine<M, V> {
    pub module: M,
    pub view: V,
}

/// Validate the environment, instantiate the engine, create the view and
/// hand it every image and font. The first failure aborts the load; no
/// render loop exists until the caller attaches the returned view.
pub async fn load_engine<H: ModuleHost>(
    host: &mut H,
    config: &HarnessConfig,
) -> Result<LoadedEngine<H::Module, H::View>> {
    let module_config = config.module_config();
    host.environment().validate(module_config.threading())?;

    log::info!("instantiating engine {}", module_config.script_url());
    let module = host.instantiate(&module_config).await?;
    let view = host.make_view(&module, &config.view_factory, &config.canvas_selector())?;

    for image in &config.images {
        host.set_image_path(&view, &image.name, &image.path).await?;
    }

    let primary = host.fetch_bytes(&config.fonts.primary).await?;
    let emoji = host.fetch_bytes(&config.fonts.emoji).await?;
    host.register_fonts(&view, &primary, &emoji)?;
    log::info!(
        "engine ready: {} images, fonts {}B + {}B",
        config.images.len(),
        primary.len(),
        emoji.len()
    );

    Ok(LoadedEngine { module, view })
}
