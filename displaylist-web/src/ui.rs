/// DOM control wiring: language, render options, bounded fields and the zoom widget
use displaylist_core::consts::{ids, BROWSER_WARNING_DELAY_MS, TRANSLATE_ATTRIBUTE};
use displaylist_core::i18n::{translate, Language, TaggedElement, TextTarget};
use displaylist_core::preferences::{load_language, save_language};
use displaylist_core::{BoundedInput, LanguagePreference, ZoomAction, ZoomLevel};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    KeyboardEvent, Node,
};

use crate::app::SharedApp;
use crate::dom::{find, listen};

fn browser_locale() -> String {
    web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_default()
}

/// Wire every page control. Safe to call before the engine is loaded.
pub fn init_app(app: &SharedApp, document: &Document) -> Result<(), JsValue> {
    init_language(app, document)?;
    init_render_options(app, document)?;
    init_bounded_fields(document)?;
    init_zoom(app, document)?;
    Ok(())
}

fn init_language(app: &SharedApp, document: &Document) -> Result<(), JsValue> {
    let preference = {
        let mut this = app.borrow_mut();
        let preference = load_language(&this.store);
        this.language = preference;
        preference
    };
    apply_texts(document, preference.resolve(&browser_locale()));

    let Some(select) = find::<HtmlSelectElement>(document, ids::LANGUAGE_SELECT) else {
        return Ok(());
    };
    select.set_value(preference.as_str());

    let app = app.clone();
    let doc = document.clone();
    let select_for_cb = select.clone();
    listen(&select, "change", move |_| {
        let Some(preference) = LanguagePreference::parse(&select_for_cb.value()) else {
            return;
        };
        if let Ok(mut this) = app.try_borrow_mut() {
            this.language = preference;
            save_language(&mut this.store, preference);
        }
        apply_texts(&doc, preference.resolve(&browser_locale()));
    })
}

/// Replace the text of every `[data-translate]` element with `lang` strings.
pub fn apply_texts(document: &Document, lang: Language) {
    let selector = format!("[{TRANSLATE_ATTRIBUTE}]");
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(text) = element
            .get_attribute(TRANSLATE_ATTRIBUTE)
            .and_then(|key| translate(lang, &key))
        else {
            continue;
        };
        match classify(&element).target() {
            TextTarget::Own => element.set_text_content(Some(text)),
            TextTarget::NextSibling => {
                if let Some(label) = element.next_element_sibling() {
                    label.set_text_content(Some(text));
                }
            }
            TextTarget::OptionText => {
                if let Some(option) = element.dyn_ref::<HtmlOptionElement>() {
                    // an option without a value attribute takes its value from its text
                    let value = option.value();
                    option.set_text(text);
                    if !option.has_attribute("value") {
                        option.set_value(&value);
                    }
                }
            }
        }
    }
}

fn classify(element: &Element) -> TaggedElement {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if input.type_() == "checkbox" {
            return TaggedElement::Checkbox {
                has_next_sibling: element.next_element_sibling().is_some(),
            };
        }
    }
    if element.dyn_ref::<HtmlOptionElement>().is_some() {
        return TaggedElement::SelectOption;
    }
    TaggedElement::Other
}

fn init_render_options(app: &SharedApp, document: &Document) -> Result<(), JsValue> {
    for id in [ids::FILE_SELECT, ids::TILE_SIZE_SELECT, ids::ALLOW_BLUR] {
        let Some(element) = find::<HtmlElement>(document, id) else {
            continue;
        };
        let doc = document.clone();
        listen(&element, "change", move |_| {
            match Event::new("change") {
                Ok(event) => {
                    let _ = doc.dispatch_event(&event);
                }
                Err(_) => log::warn!("could not re-dispatch change"),
            }
        })?;
    }

    if let Some(files) = find::<HtmlSelectElement>(document, ids::FILE_SELECT) {
        let app = app.clone();
        let files_for_cb = files.clone();
        listen(&files, "change", move |_| {
            if let Ok(mut this) = app.try_borrow_mut() {
                this.session.set_draw_index(files_for_cb.selected_index().max(0));
            }
        })?;
    }

    let render_mode = find::<HtmlSelectElement>(document, ids::RENDER_MODE_SELECT);
    let tile_options = find::<Element>(document, ids::TILE_OPTIONS);
    if let (Some(render_mode), Some(tile_options)) = (render_mode, tile_options) {
        let sync = {
            let render_mode = render_mode.clone();
            move || {
                let _ = tile_options
                    .class_list()
                    .toggle_with_force("hidden", render_mode.value() != "tile");
            }
        };
        sync();
        listen(&render_mode, "change", move |_| sync())?;
    }
    Ok(())
}

fn init_bounded_fields(document: &Document) -> Result<(), JsValue> {
    let fields = [
        (ids::MAX_TILE_COUNT, BoundedInput::MAX_TILE_COUNT),
        (ids::MAX_UPDATE_PER_FRAME, BoundedInput::MAX_UPDATE_PER_FRAME),
        (ids::ZOOM_INPUT, BoundedInput::ZOOM_INPUT),
    ];
    for (id, bounds) in fields {
        let Some(input) = find::<HtmlInputElement>(document, id) else {
            continue;
        };
        let input_for_cb = input.clone();
        listen(&input, "change", move |_| {
            let value = bounds.clamp_text(&input_for_cb.value());
            input_for_cb.set_value(&value.to_string());
        })?;
    }
    Ok(())
}

/// Show `level` in the zoom label and the typed-entry field.
pub fn show_zoom(document: &Document, level: ZoomLevel) {
    if let Some(label) = find::<Element>(document, ids::ZOOM_VALUE) {
        label.set_text_content(Some(&level.label()));
    }
    if let Some(input) = find::<HtmlInputElement>(document, ids::ZOOM_INPUT) {
        input.set_value(&level.percent().to_string());
    }
}

fn show_dropdown(document: &Document, open: bool) {
    if let Some(display) = find::<Element>(document, ids::ZOOM_DISPLAY) {
        let _ = display.set_attribute("aria-expanded", if open { "true" } else { "false" });
    }
    if let Some(dropdown) = find::<Element>(document, ids::ZOOM_DROPDOWN) {
        let _ = dropdown.class_list().toggle_with_force("show", open);
    }
}

fn init_zoom(app: &SharedApp, document: &Document) -> Result<(), JsValue> {
    if let Some(display) = find::<Element>(document, ids::ZOOM_DISPLAY) {
        let app = app.clone();
        let doc = document.clone();
        listen(&display, "click", move |_| {
            if let Ok(mut this) = app.try_borrow_mut() {
                let open = this.zoom.toggle_dropdown();
                show_dropdown(&doc, open);
            }
        })?;
    }

    {
        let app = app.clone();
        let doc = document.clone();
        listen(document, "mousedown", move |event: Event| {
            let inside = match find::<Element>(&doc, ids::ZOOM_WIDGET) {
                Some(widget) => {
                    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                    widget.contains(target.as_ref())
                }
                None => return,
            };
            if let Ok(mut this) = app.try_borrow_mut() {
                this.zoom.pointer_down(inside);
            }
            if !inside {
                show_dropdown(&doc, false);
            }
        })?;
    }

    if let Ok(options) = document.query_selector_all(".zoom-option[data-zoom]") {
        for i in 0..options.length() {
            let Some(option) = options.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let app = app.clone();
            let doc = document.clone();
            let option_for_cb = option.clone();
            listen(&option, "click", move |_| {
                let action = option_for_cb
                    .get_attribute("data-zoom")
                    .and_then(|value| ZoomAction::parse(&value));
                if let Ok(mut this) = app.try_borrow_mut() {
                    let level = this.zoom.select(action);
                    this.apply_zoom(level);
                }
                show_dropdown(&doc, false);
            })?;
        }
    }

    if let Some(input) = find::<HtmlInputElement>(document, ids::ZOOM_INPUT) {
        let app = app.clone();
        let doc = document.clone();
        let input_for_cb = input.clone();
        listen(&input, "keydown", move |event: Event| {
            let enter = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Enter");
            if !enter {
                return;
            }
            if let Ok(mut this) = app.try_borrow_mut() {
                let level = this.zoom.commit_input(&input_for_cb.value());
                this.apply_zoom(level);
            }
            show_dropdown(&doc, false);
        })?;
    }

    let mut this = app.borrow_mut();
    let level = this.zoom.set_zoom(f64::from(ZoomLevel::FIT.percent()));
    this.apply_zoom(level);
    Ok(())
}

/// Reveal the unsupported-browser overlay; the warning slides in shortly after.
pub fn show_browser_warning(document: &Document) {
    let warning = find::<Element>(document, ids::BROWSER_WARNING);
    let overlay = find::<Element>(document, ids::MASK_OVERLAY);
    let (Some(warning), Some(overlay)) = (warning, overlay) else {
        return;
    };
    let _ = warning.class_list().remove_1("hidden");
    let _ = overlay.class_list().remove_1("hidden");
    Timeout::new(BROWSER_WARNING_DELAY_MS, move || {
        let _ = warning.class_list().add_1("show");
    })
    .forget();
}
