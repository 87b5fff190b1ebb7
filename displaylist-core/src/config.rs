/// Harness configuration and engine instantiation settings
use serde::Deserialize;

use crate::consts::{ids, RESIZE_DEBOUNCE_MS};
use crate::error::Result;

/// Threading flavour of the engine build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadingMode {
    #[default]
    MultiThreaded,
    SingleThreaded,
}

impl ThreadingMode {
    /// `"mt"` selects the multi-threaded build; every other tag is single-threaded.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "mt" {
            ThreadingMode::MultiThreaded
        } else {
            ThreadingMode::SingleThreaded
        }
    }

    pub fn is_multi_threaded(self) -> bool {
        self == ThreadingMode::MultiThreaded
    }
}

impl<'de> Deserialize<'de> for ThreadingMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ThreadingMode::from_tag(&tag))
    }
}

/// An image handed to the engine by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageAsset {
    pub name: String,
    pub path: String,
}

impl ImageAsset {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// The two font files registered with the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontAssets {
    pub primary: String,
    pub emoji: String,
}

impl Default for FontAssets {
    fn default() -> Self {
        Self {
            primary: "/static/resources/font/NotoSansSC-Regular.otf".to_string(),
            emoji: "/static/resources/font/NotoColorEmoji.ttf".to_string(),
        }
    }
}

fn default_images() -> Vec<ImageAsset> {
    vec![
        ImageAsset::new("bridge", "/static/resources/assets/bridge.jpg"),
        ImageAsset::new("TGFX", "/static/resources/assets/tgfx.png"),
    ]
}

/// Page-level configuration. Every field has a default so the page can
/// override any subset with a JSON object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub engine_dir: String,
    pub threading: ThreadingMode,
    pub canvas_id: String,
    pub container_id: String,
    /// Name of the view class on the instantiated module.
    pub view_factory: String,
    pub images: Vec<ImageAsset>,
    pub fonts: FontAssets,
    pub resize_debounce_ms: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            engine_dir: "displaylist".to_string(),
            threading: ThreadingMode::MultiThreaded,
            canvas_id: ids::CANVAS.to_string(),
            container_id: ids::CONTAINER.to_string(),
            view_factory: "TGFXThreadsView".to_string(),
            images: default_images(),
            fonts: FontAssets::default(),
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl HarnessConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Same configuration pointed at another engine build.
    pub fn for_engine(mut self, engine_dir: &str, mode_tag: &str) -> Self {
        self.engine_dir = engine_dir.to_string();
        self.threading = ThreadingMode::from_tag(mode_tag);
        self
    }

    /// CSS selector the view factory binds to.
    pub fn canvas_selector(&self) -> String {
        format!("#{}", self.canvas_id)
    }

    pub fn module_config(&self) -> ModuleConfig {
        ModuleConfig {
            engine_dir: self.engine_dir.clone(),
            threading: self.threading,
        }
    }
}

/// Settings handed to the engine's module factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    engine_dir: String,
    threading: ThreadingMode,
}

impl ModuleConfig {
    pub fn threading(&self) -> ThreadingMode {
        self.threading
    }

    /// URL of the engine's JS glue script.
    pub fn script_url(&self) -> String {
        format!("{}.js", self.engine_dir)
    }

    /// `locateFile` resolver: every requested file maps to the engine binary.
    pub fn locate_file(&self, _file: &str) -> String {
        format!("{}.wasm", self.engine_dir)
    }

    /// `mainScriptUrlOrBlob`, needed to spawn workers in multi-threaded mode.
    pub fn main_script_url(&self) -> Option<String> {
        self.threading
            .is_multi_threaded()
            .then(|| self.script_url())
    }
}
