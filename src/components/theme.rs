//! Light/dark theme preference and toggle.
//!
//! Reads the stored preference and applies it as a `data-theme` attribute on
//! the `<html>` element plus a moon/sun icon on the toggle control. Toggling
//! reads the attribute currently applied, flips it and writes the result back
//! to storage.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::Deserialize;

use crate::bindings::ThemeBindings;
use crate::dom::Dom;
use crate::storage::PreferenceStore;

pub const STORAGE_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class list shown on the toggle control.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-sun",
            Self::Dark => "fas fa-moon",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ThemeManager {
    bindings: ThemeBindings,
    fallback: Theme,
}

impl ThemeManager {
    /// `fallback` applies when nothing usable is stored.
    #[must_use]
    pub fn new(bindings: ThemeBindings, fallback: Theme) -> Self {
        Self { bindings, fallback }
    }

    #[must_use]
    pub fn bindings(&self) -> ThemeBindings {
        self.bindings
    }

    /// Stored preference, or the fallback when absent or unrecognized.
    pub fn preference(&self, store: &impl PreferenceStore) -> Theme {
        match store.get(STORAGE_KEY) {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                log::debug!("ignoring stored theme {raw:?}");
                self.fallback
            }),
            None => self.fallback,
        }
    }

    /// Reflect `theme` on the document root and the toggle icon.
    pub fn apply(&self, dom: &mut impl Dom, theme: Theme) {
        if let Some(root) = dom.document_element() {
            dom.set_attribute(root, THEME_ATTRIBUTE, theme.as_str());
        }
        dom.set_class_name(self.bindings.icon, theme.icon_class());
    }

    /// Theme currently applied to the document. Anything other than `dark`
    /// reads as light.
    pub fn current(&self, dom: &impl Dom) -> Theme {
        let applied = dom
            .document_element()
            .and_then(|root| dom.attribute(root, THEME_ATTRIBUTE));
        if applied.as_deref() == Some(Theme::Dark.as_str()) { Theme::Dark } else { Theme::Light }
    }

    /// Apply the stored preference. Returns the theme applied.
    pub fn setup(&self, dom: &mut impl Dom, store: &impl PreferenceStore) -> Theme {
        let theme = self.preference(store);
        self.apply(dom, theme);
        theme
    }

    /// Flip the applied theme and persist it. Returns the new theme.
    pub fn toggle(&self, dom: &mut impl Dom, store: &mut impl PreferenceStore) -> Theme {
        let next = self.current(dom).toggled();
        self.apply(dom, next);
        store.set(STORAGE_KEY, next.as_str());
        log::debug!("theme switched to {}", next.as_str());
        next
    }
}
