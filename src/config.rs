//! Page behavior configuration.
//!
//! Every field has a default matching the shipped site, so an empty JSON
//! object (or no config at all) reproduces stock behavior. The browser binding
//! looks for an optional `<script type="application/json" id="page-config">`
//! block and merges it over the defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::components::theme::Theme;

/// Element id of the optional embedded config block.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("observer threshold {0} outside 0.0..=1.0")]
    Threshold(f64),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub default_theme: Theme,
    pub timings: Timings,
    pub selectors: Selectors,
    pub skills_observer: ObserverOptions,
    pub reveal_observer: ObserverOptions,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::Dark,
            timings: Timings::default(),
            selectors: Selectors::default(),
            skills_observer: ObserverOptions { threshold: 0.1, root_margin: "0px".into() },
            reveal_observer: ObserverOptions { threshold: 0.1, root_margin: "0px 0px -50px 0px".into() },
        }
    }
}

impl PageConfig {
    /// Parse a JSON document, filling omitted fields with defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        for threshold in [config.skills_observer.threshold, config.reveal_observer.threshold] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Threshold(threshold));
            }
        }
        Ok(config)
    }
}

/// Fixed delays and durations, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub skills_initial_delay_ms: u32,
    pub skills_after_load_delay_ms: u32,
    pub skill_stagger_ms: u32,
    pub skill_fill_ms: u32,
    pub submission_delay_ms: u32,
    pub toast_enter_delay_ms: u32,
    pub toast_visible_ms: u32,
    pub toast_exit_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            skills_initial_delay_ms: 500,
            skills_after_load_delay_ms: 1_000,
            skill_stagger_ms: 200,
            skill_fill_ms: 1_500,
            submission_delay_ms: 2_000,
            toast_enter_delay_ms: 100,
            toast_visible_ms: 4_000,
            toast_exit_ms: 300,
        }
    }
}

/// CSS selectors the browser binding resolves into `PageBindings`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub theme_toggle: String,
    pub theme_icon: String,
    pub menu_toggle: String,
    pub nav_links: String,
    pub navbar: String,
    pub nav_items: String,
    pub skills_section: String,
    pub skill_bars: String,
    pub contact_form: String,
    pub project_cards: String,
    pub reveal: String,
    pub anchors: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle: ".theme-toggle".into(),
            theme_icon: "i".into(),
            menu_toggle: ".menu-toggle".into(),
            nav_links: ".nav-links".into(),
            navbar: ".navbar".into(),
            nav_items: "a".into(),
            skills_section: "#skills".into(),
            skill_bars: ".skill-progress".into(),
            contact_form: "#contactForm".into(),
            project_cards: ".project-card".into(),
            reveal: ".skill-category, .project-card, .contact-info, .contact-form, .about-content".into(),
            anchors: "a[href^=\"#\"]".into(),
        }
    }
}

/// Options for a viewport-intersection watcher.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self { threshold: 0.1, root_margin: "0px".into() }
    }
}

/// Format a millisecond duration as a CSS seconds value (`1500` -> `1.5s`).
#[must_use]
pub fn css_seconds(ms: u32) -> String {
    format!("{}s", f64::from(ms) / 1_000.0)
}
