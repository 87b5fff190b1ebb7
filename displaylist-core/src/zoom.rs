/// Zoom widget state and bounded numeric fields
use crate::consts::{
    MAX_TILE_COUNT_RANGE, MAX_UPDATE_PER_FRAME_RANGE, ZOOM_FIT_PERCENT, ZOOM_INPUT_RANGE,
    ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT, ZOOM_STEP_PERCENT,
};

/// Whole-percent zoom, always within [1, 2000].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZoomLevel(u32);

impl ZoomLevel {
    pub const FIT: ZoomLevel = ZoomLevel(ZOOM_FIT_PERCENT);

    /// Round half up to a whole percent, then clamp. NaN lands on the minimum.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return ZoomLevel(ZOOM_MIN_PERCENT);
        }
        let rounded = (value + 0.5).floor();
        let clamped = rounded.clamp(f64::from(ZOOM_MIN_PERCENT), f64::from(ZOOM_MAX_PERCENT));
        ZoomLevel(clamped as u32)
    }

    pub fn percent(self) -> u32 {
        self.0
    }

    /// Scale factor handed to the engine (100% == 1.0).
    pub fn factor(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Text shown in the zoom display, e.g. `"150%"`.
    pub fn label(self) -> String {
        format!("{}%", self.0)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::FIT
    }
}

/// A zoom menu entry, taken from its `data-zoom` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomAction {
    In,
    Out,
    Fit,
    Absolute(f64),
}

impl ZoomAction {
    /// Parse a `data-zoom` value. Unknown non-numeric values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(ZoomAction::In),
            "out" => Some(ZoomAction::Out),
            "fit" => Some(ZoomAction::Fit),
            other => parse_number(other).map(ZoomAction::Absolute),
        }
    }

    pub fn apply(self, current: ZoomLevel) -> ZoomLevel {
        let step = f64::from(ZOOM_STEP_PERCENT);
        match self {
            ZoomAction::In => ZoomLevel::from_f64(f64::from(current.percent()) + step),
            ZoomAction::Out => ZoomLevel::from_f64(f64::from(current.percent()) - step),
            ZoomAction::Fit => ZoomLevel::FIT,
            ZoomAction::Absolute(value) => ZoomLevel::from_f64(value),
        }
    }
}

/// Whole-string numeric conversion: surrounding whitespace ignored, empty is zero.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// State behind the zoom display, its dropdown and the typed-entry field.
#[derive(Debug, Clone, Default)]
pub struct ZoomWidget {
    level: ZoomLevel,
    dropdown_open: bool,
}

impl ZoomWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn set_zoom(&mut self, value: f64) -> ZoomLevel {
        self.level = ZoomLevel::from_f64(value);
        self.level
    }

    /// Apply a menu entry; picking anything closes the dropdown.
    pub fn select(&mut self, action: Option<ZoomAction>) -> ZoomLevel {
        if let Some(action) = action {
            self.level = action.apply(self.level);
        }
        self.dropdown_open = false;
        self.level
    }

    /// Commit the typed entry (Enter). Non-numeric text clamps to the minimum.
    pub fn commit_input(&mut self, text: &str) -> ZoomLevel {
        let value = parse_number(text).unwrap_or(f64::NAN);
        self.dropdown_open = false;
        self.set_zoom(value)
    }

    /// Click on the display toggles the dropdown; returns the new state.
    pub fn toggle_dropdown(&mut self) -> bool {
        self.dropdown_open = !self.dropdown_open;
        self.dropdown_open
    }

    /// A pointer press somewhere on the page. Presses outside the widget close the dropdown.
    /// Returns true when the press closed it.
    pub fn pointer_down(&mut self, inside_widget: bool) -> bool {
        if inside_widget {
            return false;
        }
        let was_open = self.dropdown_open;
        self.dropdown_open = false;
        was_open
    }
}

/// Integer field with an inclusive range; out-of-range input is clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedInput {
    pub min: i64,
    pub max: i64,
}

impl BoundedInput {
    pub const MAX_TILE_COUNT: BoundedInput = BoundedInput::from_range(MAX_TILE_COUNT_RANGE);
    pub const MAX_UPDATE_PER_FRAME: BoundedInput = BoundedInput::from_range(MAX_UPDATE_PER_FRAME_RANGE);
    pub const ZOOM_INPUT: BoundedInput = BoundedInput::from_range(ZOOM_INPUT_RANGE);

    pub const fn from_range(range: (i64, i64)) -> Self {
        Self {
            min: range.0,
            max: range.1,
        }
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    /// Leading-integer parse of the field text, then clamp; unparseable text becomes `min`.
    pub fn clamp_text(&self, text: &str) -> i64 {
        parse_leading_int(text).map_or(self.min, |v| self.clamp(v))
    }
}

/// Parse the longest `[+-]?digits` prefix after leading whitespace, so
/// `"12px"` is 12 and `"3.9"` is 3. Overlong values saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
