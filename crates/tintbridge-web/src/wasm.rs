#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the theme bridge.
//!
//! Wraps [`ThemeStore`] with the live document and the host's
//! `window.__themeState__.theme` global. Only compiled on `wasm32` targets.
//!
//! Change events are queued while the store is borrowed and dispatched as
//! microtasks once the call has returned, so listeners may call back into
//! the bridge.

use js_sys::{JSON, Reflect};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Document, HtmlElement};

use tintbridge_style::{TokenSet, predefined_themes};

use crate::config::BridgeConfig;
use crate::dom::DomSink;
use crate::error::{ApplyError, SourceError};
use crate::notify::{ChangeQueue, Subscription, ThemeChange};
use crate::source::ExternalThemeSource;
use crate::store::ThemeStore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            console_error(&format!("tintbridge panic: {info}"));
        }));
    });
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn js_detail(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

/// Reads `window.__themeState__.theme` on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowThemeSource;

impl ExternalThemeSource for WindowThemeSource {
    fn read(&self) -> Result<Option<Value>, SourceError> {
        let global = js_sys::global();
        let state = Reflect::get(&global, &"__themeState__".into())
            .map_err(|err| SourceError::Unavailable(js_detail(&err)))?;
        if is_absent(&state) {
            return Ok(None);
        }
        let theme = Reflect::get(&state, &"theme".into())
            .map_err(|err| SourceError::Unavailable(js_detail(&err)))?;
        if is_absent(&theme) {
            return Ok(None);
        }
        let text: String = JSON::stringify(&theme)
            .map_err(|err| SourceError::Malformed(js_detail(&err)))?
            .into();
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| SourceError::Malformed(err.to_string()))
    }
}

/// Writes to the live document root.
#[derive(Debug, Clone)]
pub struct DocumentSink {
    document: Document,
}

impl DocumentSink {
    pub fn new() -> Result<Self, ApplyError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ApplyError::Sink("no document".into()))?;
        Ok(Self { document })
    }

    fn root(&self) -> Result<HtmlElement, ApplyError> {
        self.document
            .document_element()
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| ApplyError::Sink("no root element".into()))
    }
}

impl DomSink for DocumentSink {
    fn set_variable(&mut self, name: &str, value: &str) -> Result<(), ApplyError> {
        self.root()?
            .style()
            .set_property(name, value)
            .map_err(|err| ApplyError::Sink(js_detail(&err)))
    }

    fn remove_variable(&mut self, name: &str) -> Result<(), ApplyError> {
        self.root()?
            .style()
            .remove_property(name)
            .map(|_| ())
            .map_err(|err| ApplyError::Sink(js_detail(&err)))
    }

    fn set_mode_class(&mut self, class: &str, enabled: bool) -> Result<(), ApplyError> {
        self.root()?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|err| ApplyError::Sink(js_detail(&err)))
    }

    fn install_stylesheet(&mut self, id: &str, css: &str) -> Result<(), ApplyError> {
        if let Some(existing) = self.document.get_element_by_id(id) {
            existing.set_text_content(Some(css));
            return Ok(());
        }
        let style = self
            .document
            .create_element("style")
            .map_err(|err| ApplyError::Sink(js_detail(&err)))?;
        style.set_id(id);
        style.set_text_content(Some(css));
        let head = self
            .document
            .head()
            .ok_or_else(|| ApplyError::Sink("no head element".into()))?;
        head.append_child(&style)
            .map(|_| ())
            .map_err(|err| ApplyError::Sink(js_detail(&err)))
    }
}

fn dispatch_change(document: &Document, event_name: &str, change: &ThemeChange) {
    let detail = match serde_json::to_string(change) {
        Ok(text) => JSON::parse(&text).unwrap_or(JsValue::NULL),
        Err(err) => {
            console_error(&format!("tintbridge: change not serializable: {err}"));
            return;
        }
    };
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(event_name, &init) {
        Ok(event) => {
            if let Err(err) = document.dispatch_event(&event) {
                console_error(&format!("tintbridge: dispatch failed: {}", js_detail(&err)));
            }
        }
        Err(err) => console_error(&format!("tintbridge: event not created: {}", js_detail(&err))),
    }
}

fn schedule_dispatch(document: &Document, event_name: &str, change: ThemeChange) {
    let Some(window) = web_sys::window() else {
        dispatch_change(document, event_name, &change);
        return;
    };
    let document = document.clone();
    let event_name = event_name.to_string();
    let task = Closure::once_into_js(move || dispatch_change(&document, &event_name, &change));
    window.queue_microtask(task.unchecked_ref());
}

/// JS-facing theme store.
#[wasm_bindgen]
pub struct ThemeBridge {
    store: ThemeStore<WindowThemeSource, DocumentSink>,
    document: Document,
    event_name: String,
    pending: ChangeQueue,
    _forward: Subscription,
}

impl ThemeBridge {
    fn flush<T>(&self, result: Result<T, JsValue>) -> Result<T, JsValue> {
        for change in self.pending.drain() {
            schedule_dispatch(&self.document, &self.event_name, change);
        }
        result
    }
}

#[wasm_bindgen]
impl ThemeBridge {
    /// Create a bridge from an optional JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ThemeBridge, JsValue> {
        install_panic_hook();
        let config = match config_json {
            Some(json) => BridgeConfig::from_json_str(&json).map_err(to_js)?,
            None => BridgeConfig::default(),
        };
        let sink = DocumentSink::new().map_err(to_js)?;
        let document = sink.document.clone();
        let event_name = config.change_event.clone();
        let store = ThemeStore::new(WindowThemeSource, sink, config).map_err(to_js)?;
        let pending = ChangeQueue::new();
        let forward = {
            let pending = pending.clone();
            store.subscribe(move |change| pending.push(change))
        };
        Ok(Self {
            store,
            document,
            event_name,
            pending,
            _forward: forward,
        })
    }

    pub fn initialize(&mut self) -> Result<(), JsValue> {
        let result = self.store.initialize().map_err(to_js);
        self.flush(result)
    }

    #[wasm_bindgen(js_name = selectAccent)]
    pub fn select_accent(&mut self, name: &str) -> Result<(), JsValue> {
        let result = self.store.select_accent(name).map_err(to_js);
        self.flush(result)
    }

    /// Apply one of the host's named themes; unknown names fall back.
    #[wasm_bindgen(js_name = applyPredefined)]
    pub fn apply_predefined(&mut self, name: &str) -> Result<(), JsValue> {
        let result = self.store.apply_predefined(name).map_err(to_js);
        self.flush(result)
    }

    #[wasm_bindgen(js_name = toggleDarkMode)]
    pub fn toggle_dark_mode(&mut self) -> Result<(), JsValue> {
        let result = self.store.toggle_dark_mode().map_err(to_js);
        self.flush(result)
    }

    #[wasm_bindgen(js_name = resetToHostDefault)]
    pub fn reset_to_host_default(&mut self) -> Result<(), JsValue> {
        let result = self.store.reset_to_host_default().map_err(to_js);
        self.flush(result)
    }

    /// Adopt a token set given as host-shaped JSON. `isInverted` is required.
    #[wasm_bindgen(js_name = setExplicitTheme)]
    pub fn set_explicit_theme(&mut self, tokens_json: &str) -> Result<(), JsValue> {
        let tokens: TokenSet = serde_json::from_str(tokens_json).map_err(to_js)?;
        let result = self.store.set_explicit_theme(tokens).map_err(to_js);
        self.flush(result)
    }

    #[wasm_bindgen(js_name = applyStyles)]
    pub fn apply_styles(&mut self, id: &str, css: &str) -> Result<String, JsValue> {
        self.store.apply_styles(id, css).map_err(to_js)
    }

    #[wasm_bindgen(js_name = availableAccents)]
    pub fn available_accents(&self) -> Vec<String> {
        self.store.available_accents()
    }

    #[wasm_bindgen(js_name = predefinedThemes)]
    pub fn predefined_themes(&self) -> Vec<String> {
        predefined_themes()
            .iter()
            .map(|theme| theme.name().to_string())
            .collect()
    }

    #[wasm_bindgen(getter, js_name = isDarkMode)]
    pub fn is_dark_mode(&self) -> bool {
        self.store.state().is_dark_mode
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.state()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = presetJson)]
    pub fn preset_json(&self) -> Result<String, JsValue> {
        let preset = self.store.preset().map_err(to_js)?;
        preset.to_json().map_err(to_js)
    }
}
