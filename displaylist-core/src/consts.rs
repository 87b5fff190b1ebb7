//! Shared constants: zoom limits, field ranges, storage keys and DOM ids

/// Smallest zoom percentage the widget accepts.
pub const ZOOM_MIN_PERCENT: u32 = 1;
/// Largest zoom percentage the widget accepts.
pub const ZOOM_MAX_PERCENT: u32 = 2000;
/// Step applied by the zoom in / zoom out entries.
pub const ZOOM_STEP_PERCENT: u32 = 10;
/// Zoom restored by "fit view" and used at startup.
pub const ZOOM_FIT_PERCENT: u32 = 100;

/// Delay between the first resize notification of a burst and the
/// size recomputation, also used for busy retries.
pub const RESIZE_DEBOUNCE_MS: u32 = 300;

/// Delay before the unsupported-browser warning slides in.
pub const BROWSER_WARNING_DELAY_MS: u32 = 100;

pub const MAX_TILE_COUNT_RANGE: (i64, i64) = (1, 100);
pub const MAX_UPDATE_PER_FRAME_RANGE: (i64, i64) = (1, 100);
pub const ZOOM_INPUT_RANGE: (i64, i64) = (ZOOM_MIN_PERCENT as i64, ZOOM_MAX_PERCENT as i64);

pub const LANGUAGE_KEY: &str = "preferred_language";
pub const BROWSER_SUPPORT_KEY: &str = "isSupported";

/// Attribute carrying a translation key on translatable elements.
pub const TRANSLATE_ATTRIBUTE: &str = "data-translate";

pub mod ids {
    pub const CANVAS: &str = "displaylist";
    pub const CONTAINER: &str = "container";
    pub const LANGUAGE_SELECT: &str = "languageSelect";
    pub const RENDER_MODE_SELECT: &str = "renderModeSelect";
    pub const TILE_OPTIONS: &str = "tileOptions";
    pub const FILE_SELECT: &str = "fileSelect";
    pub const TILE_SIZE_SELECT: &str = "tileSizeSelect";
    pub const ALLOW_BLUR: &str = "allowBlur";
    pub const SHOW_DIRTY_RECT: &str = "showDirtyRect";
    pub const MAX_TILE_COUNT: &str = "maxTileCount";
    pub const MAX_UPDATE_PER_FRAME: &str = "maxUpdatePerFrame";
    pub const ZOOM_INPUT: &str = "zoomInput";
    pub const ZOOM_VALUE: &str = "zoomValue";
    pub const ZOOM_DROPDOWN: &str = "zoomDropdown";
    pub const ZOOM_DISPLAY: &str = "zoomDisplay";
    pub const ZOOM_WIDGET: &str = "zoomWidget";
    pub const BROWSER_WARNING: &str = "browser-warning";
    pub const MASK_OVERLAY: &str = "mask-overlay";
}
