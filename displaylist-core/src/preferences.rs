/// Persisted user preferences
use std::collections::HashMap;

use crate::consts::{BROWSER_SUPPORT_KEY, LANGUAGE_KEY};
use crate::i18n::LanguagePreference;

/// String key-value storage (the browser's `localStorage` on the web).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used when no persistent storage is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Stored language preference; missing or unrecognised values mean `Auto`.
pub fn load_language(store: &impl PreferenceStore) -> LanguagePreference {
    store
        .get(LANGUAGE_KEY)
        .and_then(|value| LanguagePreference::parse(&value))
        .unwrap_or_default()
}

pub fn save_language(store: &mut impl PreferenceStore, preference: LanguagePreference) {
    store.set(LANGUAGE_KEY, preference.as_str());
}

/// Record the last browser-support check as JSON (`true` / `false`).
pub fn record_browser_support(store: &mut impl PreferenceStore, supported: bool) {
    match serde_json::to_string(&supported) {
        Ok(raw) => store.set(BROWSER_SUPPORT_KEY, &raw),
        Err(e) => log::warn!("could not serialize browser support flag: {e}"),
    }
}

pub fn last_browser_support(store: &impl PreferenceStore) -> Option<bool> {
    let raw = store.get(BROWSER_SUPPORT_KEY)?;
    serde_json::from_str(&raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_language_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_language(&store), LanguagePreference::Auto);

        save_language(&mut store, LanguagePreference::Fixed(Language::Chinese));
        assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("zh"));
        assert_eq!(
            load_language(&store),
            LanguagePreference::Fixed(Language::Chinese)
        );
    }

    #[test]
    fn test_garbage_language_falls_back_to_auto() {
        let mut store = MemoryStore::new();
        store.set(LANGUAGE_KEY, "klingon");
        assert_eq!(load_language(&store), LanguagePreference::Auto);
    }

    #[test]
    fn test_browser_support_is_json() {
        let mut store = MemoryStore::new();
        assert_eq!(last_browser_support(&store), None);

        record_browser_support(&mut store, false);
        assert_eq!(store.get(BROWSER_SUPPORT_KEY).as_deref(), Some("false"));
        assert_eq!(last_browser_support(&store), Some(false));

        record_browser_support(&mut store, true);
        assert_eq!(last_browser_support(&store), Some(true));
    }
}
