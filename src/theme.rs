//! Light/dark theme selection for pages that embed highlighted code
//!
//!     The page script behind the theme switcher is modelled here as a state machine
//!     over two seams: a [`PreferenceStore`] holding the explicit choice under one key,
//!     and a [`ThemeTarget`] standing in for the document (root element attribute and
//!     class, popup visibility).
//!
//!     Resolution order: the stored choice, else the system preference. A system
//!     preference change only takes effect while nothing is stored; picking a theme in
//!     the popup stores it and from then on wins over the system.
//!
//!     Element ids and the storage key come from [`rdfhl_config::ThemeConfig`]. Popup
//!     buttons carry the theme identifier (`light`, `dark`) as their id.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rdfhl_config::ThemeConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Identifier used in storage, as the root class and as the popup button id.
    pub fn id(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The theme matching a `prefers-color-scheme: dark` signal.
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected light or dark)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.id() == s.trim())
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Persistent key/value storage for the explicit choice.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// The document the theme is applied to.
pub trait ThemeTarget {
    fn set_root_attribute(&mut self, name: &str, value: &str);
    /// Replace the root element's theme class.
    fn set_root_class(&mut self, class: &str);
    fn set_popup_visible(&mut self, visible: bool);
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    PopupOpened,
    PopupClosed,
    Selected(Theme),
    Ignored,
}

pub struct ThemeToggle<S, T> {
    store: S,
    target: T,
    names: ThemeConfig,
    system: Theme,
    active: Theme,
    popup_open: bool,
}

impl<S: PreferenceStore, T: ThemeTarget> ThemeToggle<S, T> {
    /// Resolve the initial theme and apply it to `target`.
    pub fn new(store: S, target: T, names: ThemeConfig, system: Theme) -> Self {
        let mut toggle = ThemeToggle {
            store,
            target,
            names,
            system,
            active: system,
            popup_open: false,
        };
        let theme = toggle.resolve();
        toggle.apply(theme);
        toggle.target.set_popup_visible(false);
        toggle
    }

    /// The explicit choice, if one is stored and readable.
    pub fn stored(&self) -> Option<Theme> {
        let raw = self.store.get(&self.names.storage_key)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(key = %self.names.storage_key, error = %e, "ignoring stored theme");
                None
            }
        }
    }

    /// Stored choice, else the system preference.
    pub fn resolve(&self) -> Theme {
        self.stored().unwrap_or(self.system)
    }

    pub fn apply(&mut self, theme: Theme) {
        self.target
            .set_root_attribute(&self.names.data_attribute, theme.id());
        self.target.set_root_class(theme.id());
        self.active = theme;
        tracing::debug!(theme = %theme, "theme applied");
    }

    /// Persist an explicit choice, apply it and close the popup.
    pub fn select(&mut self, theme: Theme) {
        self.store.set(&self.names.storage_key, theme.id());
        self.apply(theme);
        self.set_popup(false);
    }

    pub fn toggle_popup(&mut self) {
        self.set_popup(!self.popup_open);
    }

    fn set_popup(&mut self, open: bool) {
        self.popup_open = open;
        self.target.set_popup_visible(open);
    }

    /// Dispatch a click on the element with `element_id`.
    ///
    /// The toggle button flips the popup. While the popup is open a theme button selects
    /// that theme, a click on the popup itself does nothing, and any other click closes it.
    pub fn click(&mut self, element_id: &str) -> ClickOutcome {
        if element_id == self.names.toggle_id {
            self.toggle_popup();
            return if self.popup_open {
                ClickOutcome::PopupOpened
            } else {
                ClickOutcome::PopupClosed
            };
        }
        if !self.popup_open || element_id == self.names.popup_id {
            return ClickOutcome::Ignored;
        }
        match element_id.parse::<Theme>() {
            Ok(theme) => {
                self.select(theme);
                ClickOutcome::Selected(theme)
            }
            Err(_) => {
                self.set_popup(false);
                ClickOutcome::PopupClosed
            }
        }
    }

    /// The system preference changed. Applied only while no choice is stored.
    pub fn system_changed(&mut self, system: Theme) {
        self.system = system;
        if self.stored().is_none() {
            self.apply(system);
        }
    }

    pub fn active(&self) -> Theme {
        self.active
    }

    pub fn popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::default();
        store.set(key, value);
        store
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

/// [`ThemeTarget`] that records the document state it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub attributes: HashMap<String, String>,
    pub class: Option<String>,
    pub popup_visible: bool,
}

impl ThemeTarget for DocumentState {
    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_root_class(&mut self, class: &str) {
        self.class = Some(class.to_string());
    }

    fn set_popup_visible(&mut self, visible: bool) {
        self.popup_visible = visible;
    }
}
