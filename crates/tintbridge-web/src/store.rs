#![forbid(unsafe_code)]

//! Theme state store.
//!
//! # State machine
//!
//! ```text
//! Uninitialized --initialize()--> Initialized --(select_accent | apply_predefined
//!                                                 | toggle_dark_mode
//!                                                 | reset_to_host_default
//!                                                 | set_explicit_theme)--> Initialized
//! ```
//!
//! # Invariants
//!
//! 1. `initialize()` takes effect once; later calls are no-ops.
//! 2. State is committed only after the applier succeeds. A failed
//!    operation leaves [`ThemeState`] exactly as it was.
//! 3. While initialized, `active_tokens` is the set last written to the
//!    document and `is_dark_mode == active_tokens.isInverted`.
//! 4. Every mutation is synchronous; a second call observes the first.
//! 5. Subscribers are notified after the new state is committed.

use serde::Serialize;
use tracing::{debug, info_span, warn};

use tintbridge_style::{
    FALLBACK_PREDEFINED, PaletteError, PaletteTable, Slot, ThemableStyle, TokenSet,
    derive_dark_variant, predefined_theme,
};

use crate::apply::ThemeApplier;
use crate::config::BridgeConfig;
use crate::detect::{Detector, approximate_accent_family};
use crate::dom::DomSink;
use crate::error::ThemeError;
use crate::notify::{Subscription, ThemeChange};
use crate::overrides::{HOST_OVERRIDES_ID, host_override_css};
use crate::preset::ComponentPreset;
use crate::source::ExternalThemeSource;

/// Where the active token set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeOrigin {
    /// Derived from an accent family.
    Derived,
    /// The host's own theme, as detected.
    External,
    /// Dark rendition approximated from a light host theme.
    ExternalDarkVariant,
    /// Supplied through [`ThemeStore::set_explicit_theme`].
    Explicit,
    /// A host-platform predefined theme, named by `selected_accent`.
    Predefined,
}

/// Snapshot of the store's owned state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub selected_accent: String,
    pub is_dark_mode: bool,
    pub active_tokens: Option<TokenSet>,
    pub initialized: bool,
}

/// A resolved theme waiting to be applied.
struct Pending {
    accent: String,
    tokens: TokenSet,
    origin: ThemeOrigin,
    host: Option<TokenSet>,
}

/// Owner of the current theme identity.
pub struct ThemeStore<S, D> {
    detector: Detector<S>,
    applier: ThemeApplier<D>,
    palette: PaletteTable,
    config: BridgeConfig,
    state: ThemeState,
    origin: Option<ThemeOrigin>,
    /// Host snapshot behind an `External`/`ExternalDarkVariant` theme.
    host_theme: Option<TokenSet>,
    styles: Vec<(String, ThemableStyle)>,
}

impl<S, D> std::fmt::Debug for ThemeStore<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.state)
            .field("origin", &self.origin)
            .field("styles", &self.styles.len())
            .finish_non_exhaustive()
    }
}

impl<S: ExternalThemeSource, D: DomSink> ThemeStore<S, D> {
    /// Build an uninitialized store. Fails if a configured family is invalid.
    pub fn new(source: S, sink: D, config: BridgeConfig) -> Result<Self, ThemeError> {
        let palette = config.palette_table()?;
        let state = ThemeState {
            selected_accent: config.default_accent.clone(),
            is_dark_mode: false,
            active_tokens: None,
            initialized: false,
        };
        Ok(Self {
            detector: Detector::new(source),
            applier: ThemeApplier::new(sink, &config),
            palette,
            config,
            state,
            origin: None,
            host_theme: None,
            styles: Vec::new(),
        })
    }

    /// Detect the host theme or derive the default, and apply it.
    pub fn initialize(&mut self) -> Result<(), ThemeError> {
        if self.state.initialized {
            debug!("theme store already initialized");
            return Ok(());
        }
        let _span = info_span!("tintbridge.initialize").entered();

        if self.config.install_host_overrides {
            let css = host_override_css(&self.config);
            if let Err(err) = self.applier.install_stylesheet(HOST_OVERRIDES_ID, &css) {
                warn!(error = %err, "host override stylesheet not installed");
            }
        }

        let pending = self.host_default();
        self.commit(pending)
    }

    /// Switch to accent `name` in the current mode.
    pub fn select_accent(&mut self, name: &str) -> Result<(), ThemeError> {
        self.ensure_initialized()?;
        let _span = info_span!("tintbridge.select_accent", accent = name).entered();
        let pending = self.derived(name, self.state.is_dark_mode);
        self.commit(pending)
    }

    /// Apply the predefined theme `name` in the current mode.
    ///
    /// Unknown names fall back to [`FALLBACK_PREDEFINED`].
    pub fn apply_predefined(&mut self, name: &str) -> Result<(), ThemeError> {
        self.ensure_initialized()?;
        let _span = info_span!("tintbridge.apply_predefined", theme = name).entered();
        let pending = self.predefined(name, self.state.is_dark_mode)?;
        self.commit(pending)
    }

    /// Flip dark mode.
    ///
    /// A host theme is kept as long as the requested mode matches it. A
    /// light host theme switched to dark becomes its dark variant. A
    /// predefined theme is re-applied in the new mode.
    pub fn toggle_dark_mode(&mut self) -> Result<(), ThemeError> {
        self.ensure_initialized()?;
        let dark = !self.state.is_dark_mode;
        let _span = info_span!("tintbridge.toggle_dark_mode", dark).entered();

        let host = match self.origin {
            Some(ThemeOrigin::External | ThemeOrigin::ExternalDarkVariant) => {
                self.host_theme.clone()
            }
            _ => None,
        };
        let accent = self.state.selected_accent.clone();

        let pending = match host {
            Some(host) if host.is_inverted() == dark => Pending {
                accent,
                tokens: host.clone(),
                origin: ThemeOrigin::External,
                host: Some(host),
            },
            Some(host) if dark => Pending {
                accent,
                tokens: derive_dark_variant(&host),
                origin: ThemeOrigin::ExternalDarkVariant,
                host: Some(host),
            },
            _ if self.origin == Some(ThemeOrigin::Predefined) => self.predefined(&accent, dark)?,
            _ => self.derived(&accent, dark),
        };
        self.commit(pending)
    }

    /// Re-detect the host theme, or fall back to the default accent in
    /// light mode.
    pub fn reset_to_host_default(&mut self) -> Result<(), ThemeError> {
        self.ensure_initialized()?;
        let _span = info_span!("tintbridge.reset_to_host_default").entered();
        let pending = self.host_default();
        self.commit(pending)
    }

    /// Adopt a caller-supplied token set after checking it is complete.
    ///
    /// The selected accent is kept.
    pub fn set_explicit_theme(&mut self, tokens: TokenSet) -> Result<(), ThemeError> {
        self.ensure_initialized()?;
        let _span = info_span!("tintbridge.set_explicit_theme").entered();
        if let Err(err) = tokens.validate() {
            warn!(error = %err, "explicit theme rejected");
            return Err(err.into());
        }
        let pending = Pending {
            accent: self.state.selected_accent.clone(),
            tokens,
            origin: ThemeOrigin::Explicit,
            host: None,
        };
        self.commit(pending)
    }

    /// Install `css` under `id`, resolving `[theme:...]` placeholders against
    /// the active theme now and after every later theme change.
    ///
    /// Returns the resolved CSS.
    pub fn apply_styles(&mut self, id: &str, css: &str) -> Result<String, ThemeError> {
        let tokens = self
            .state
            .active_tokens
            .as_ref()
            .ok_or(ThemeError::NotInitialized)?;
        let style = ThemableStyle::parse(css);
        let resolved = style.resolve(tokens);
        self.applier.install_stylesheet(id, &resolved)?;

        match self.styles.iter_mut().find(|(existing, _)| existing == id) {
            Some(entry) => entry.1 = style,
            None => self.styles.push((id.to_string(), style)),
        }
        Ok(resolved)
    }

    pub fn subscribe(&self, callback: impl Fn(&ThemeChange) + 'static) -> Subscription {
        self.applier.subscribe(callback)
    }

    /// Accent family names, in palette order.
    #[must_use]
    pub fn available_accents(&self) -> Vec<String> {
        self.palette.names().map(str::to_string).collect()
    }

    /// Preset for the currently selected accent.
    pub fn preset(&self) -> Result<ComponentPreset, ThemeError> {
        Ok(ComponentPreset::for_accent(
            &self.palette,
            &self.state.selected_accent,
            &self.config,
        )?)
    }

    #[must_use]
    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    #[must_use]
    pub fn origin(&self) -> Option<ThemeOrigin> {
        self.origin
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn palette(&self) -> &PaletteTable {
        &self.palette
    }

    pub fn sink(&self) -> &D {
        self.applier.sink()
    }

    pub fn source(&self) -> &S {
        self.detector.source()
    }

    fn ensure_initialized(&self) -> Result<(), ThemeError> {
        if self.state.initialized {
            Ok(())
        } else {
            warn!("theme store used before initialize()");
            Err(ThemeError::NotInitialized)
        }
    }

    fn predefined(&self, name: &str, dark: bool) -> Result<Pending, ThemeError> {
        let theme = match predefined_theme(name) {
            Some(theme) => theme,
            None => {
                warn!(theme = name, fallback = FALLBACK_PREDEFINED, "unknown predefined theme");
                predefined_theme(FALLBACK_PREDEFINED).ok_or_else(|| PaletteError::UnknownFamily {
                    name: name.to_string(),
                })?
            }
        };
        Ok(Pending {
            accent: theme.name().to_string(),
            tokens: theme.tokens(dark),
            origin: ThemeOrigin::Predefined,
            host: None,
        })
    }

    fn derived(&self, accent: &str, dark: bool) -> Pending {
        Pending {
            accent: accent.to_string(),
            tokens: self.palette.derive(accent, dark),
            origin: ThemeOrigin::Derived,
            host: None,
        }
    }

    fn host_default(&self) -> Pending {
        match self.detector.detect() {
            Some(host) => {
                let primary = host.slot(Slot::ThemePrimary).unwrap_or_default();
                Pending {
                    accent: approximate_accent_family(&self.palette, primary),
                    tokens: host.clone(),
                    origin: ThemeOrigin::External,
                    host: Some(host),
                }
            }
            None => {
                let accent = self.config.default_accent.clone();
                self.derived(&accent, false)
            }
        }
    }

    fn commit(&mut self, pending: Pending) -> Result<(), ThemeError> {
        if let Err(err) = self.applier.write(&pending.tokens) {
            warn!(error = %err, "theme not applied, state unchanged");
            return Err(err.into());
        }

        debug!(
            accent = pending.accent.as_str(),
            origin = ?pending.origin,
            dark = pending.tokens.is_inverted(),
            "theme committed"
        );
        self.state.selected_accent = pending.accent;
        self.state.is_dark_mode = pending.tokens.is_inverted();
        self.state.initialized = true;
        self.origin = Some(pending.origin);
        self.host_theme = pending.host;
        self.refresh_styles(&pending.tokens);
        self.state.active_tokens = Some(pending.tokens.clone());
        self.applier.notify(&pending.tokens);
        Ok(())
    }

    fn refresh_styles(&mut self, tokens: &TokenSet) {
        for (id, style) in &self.styles {
            if let Err(err) = self.applier.install_stylesheet(id, &style.resolve(tokens)) {
                warn!(id = id.as_str(), error = %err, "themable styles not refreshed");
            }
        }
    }
}
