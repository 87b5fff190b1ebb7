//! UI languages, preference resolution and the translation table

/// Languages the page ships strings for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Browser locale to language: anything starting with `zh` is Chinese, the rest English.
    pub fn from_locale(locale: &str) -> Self {
        if locale.starts_with("zh") {
            Language::Chinese
        } else {
            Language::English
        }
    }
}

/// The user's choice in the language select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePreference {
    #[default]
    Auto,
    Fixed(Language),
}

impl LanguagePreference {
    /// Parse the select / storage value (`auto`, `en`, `zh`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(LanguagePreference::Auto),
            "en" => Some(LanguagePreference::Fixed(Language::English)),
            "zh" => Some(LanguagePreference::Fixed(Language::Chinese)),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguagePreference::Auto => "auto",
            LanguagePreference::Fixed(lang) => lang.code(),
        }
    }

    /// Language to display. `Auto` defers to the browser locale at read time.
    pub fn resolve(self, browser_locale: &str) -> Language {
        match self {
            LanguagePreference::Auto => Language::from_locale(browser_locale),
            LanguagePreference::Fixed(lang) => lang,
        }
    }
}

// key, English, Chinese
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("language", "Language", "语言"),
    ("selectFile", "Select File", "选择文件"),
    ("renderMode", "Render Mode", "渲染模式"),
    ("direct", "Direct", "直接渲染"),
    ("partial", "Partial", "部分渲染"),
    ("tile", "Tile", "瓦片渲染"),
    ("tileOptions", "Tile Options", "瓦片选项"),
    ("tileSize", "Tile Size", "瓦片大小"),
    ("maxTiles", "Max Tiles", "最大瓦片数"),
    ("allowBlur", "Allow Blur", "允许模糊"),
    ("allowBlurYes", "Yes", "是"),
    ("allowBlurNo", "No", "否"),
    ("maxUpdates", "Max Updates Per Frame", "每帧最大更新数"),
    ("showDirtyRects", "Show Dirty Rects", "显示脏矩形"),
    ("showDirtyRectYes", "Yes", "是"),
    ("showDirtyRectNo", "No", "否"),
    ("zoomIn", "Zoom In", "放大"),
    ("zoomOut", "Zoom Out", "缩小"),
    ("fitView", "Fit View", "适应视图"),
    ("autoOption", "Auto", "自动"),
    ("chineseOption", "Chinese (CN)", "中文 (简体)"),
    ("englishOption", "English (US)", "English (US)"),
    ("yes", "Yes", "是"),
    ("no", "No", "否"),
    (
        "desktopWarning",
        "This website only supports desktop browsers based on Chromium (like Chrome or Edge). Please switch to one of these browsers to access it.",
        "当前页面仅支持桌面端Chromium内核浏览器(Chrome或Edge),请切换浏览器访问.",
    ),
];

/// Look up `key` for `lang`. Unknown keys return `None` and leave the element untouched.
pub fn translate(lang: Language, key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(_, en, zh)| match lang {
            Language::English => en,
            Language::Chinese => zh,
        })
}

/// Where a translated string goes for a tagged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// Replace the element's own text.
    Own,
    /// Checkbox: write into the label that follows it.
    NextSibling,
    /// `<option>`: replace the display text, keep the value.
    OptionText,
}

/// What kind of tagged element is being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedElement {
    Checkbox { has_next_sibling: bool },
    SelectOption,
    Other,
}

impl TaggedElement {
    pub fn target(self) -> TextTarget {
        match self {
            TaggedElement::Checkbox {
                has_next_sibling: true,
            } => TextTarget::NextSibling,
            TaggedElement::SelectOption => TextTarget::OptionText,
            TaggedElement::Checkbox { .. } | TaggedElement::Other => TextTarget::Own,
        }
    }
}
