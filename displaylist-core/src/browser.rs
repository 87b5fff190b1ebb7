/// Advisory browser support heuristic (desktop Chromium only)
use crate::preferences::{record_browser_support, PreferenceStore};

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Result of inspecting a user agent string. Not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserSupport {
    pub mobile: bool,
    pub chromium: bool,
}

impl BrowserSupport {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let lowered = user_agent.to_ascii_lowercase();
        Self {
            mobile: MOBILE_MARKERS.iter().any(|marker| lowered.contains(marker)),
            chromium: user_agent.contains("Chrome") || user_agent.contains("Edge"),
        }
    }

    pub fn is_desktop(&self) -> bool {
        !self.mobile
    }

    pub fn is_supported(&self) -> bool {
        self.is_desktop() && self.chromium
    }
}

/// Run the check and persist its outcome.
pub fn check_browser(user_agent: &str, store: &mut impl PreferenceStore) -> bool {
    let supported = BrowserSupport::from_user_agent(user_agent).is_supported();
    if !supported {
        log::warn!("unsupported browser, redraw wiring disabled: {user_agent}");
    }
    record_browser_support(store, supported);
    supported
}
