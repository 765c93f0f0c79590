#![forbid(unsafe_code)]

//! Host theme detection, document application, and state for TintBridge.
//!
//! # Role in TintBridge
//! `tintbridge-web` is the side-effecting half of the bridge. It reads the
//! host's published theme, writes token sets to the document root, and owns
//! the [`ThemeStore`] that every user action funnels through.
//!
//! # Seams
//! The host global and the document are reached only through
//! [`ExternalThemeSource`] and [`DomSink`]. Native builds use
//! [`StaticSource`] and [`MemoryDom`]; on `wasm32` the `ThemeBridge` export
//! wires the store to `window.__themeState__` and the live document.

pub mod apply;
pub mod config;
pub mod detect;
pub mod dom;
pub mod error;
pub mod notify;
pub mod overrides;
pub mod preset;
pub mod source;
pub mod store;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ThemeBridge;

pub use apply::{ThemeApplier, is_valid_variable_name};
pub use config::BridgeConfig;
pub use detect::{
    Detector, REQUIRED_HOST_SLOTS, approximate_accent_family, complete_host_theme,
    match_accent_family, normalize_host_theme,
};
pub use dom::{DomSink, MemoryDom};
pub use error::{ApplyError, ConfigError, SourceError, ThemeError};
pub use notify::{ChangeQueue, Subscription, ThemeChange, ThemeChannel};
pub use overrides::{HOST_OVERRIDES_ID, host_override_css};
pub use preset::ComponentPreset;
pub use source::{ExternalThemeSource, FnSource, StaticSource};
pub use store::{ThemeOrigin, ThemeState, ThemeStore};
