//! Theme selection, persistence and palettes.
//!
//! The selected theme name is stored as a plain string in the preference
//! store and mirrored onto a set of document markers (one class per theme
//! plus a `data-theme` attribute). Palettes are fixed per theme.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::config::KeyValueStore;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    Green,
    Yellow,
    Maroon,
}

/// Which half of the picker a theme is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeGroup {
    Background,
    PrimaryColor,
}

impl ThemeName {
    pub const ALL: [ThemeName; 5] = [
        ThemeName::Light,
        ThemeName::Dark,
        ThemeName::Green,
        ThemeName::Yellow,
        ThemeName::Maroon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
            ThemeName::Green => "green",
            ThemeName::Yellow => "yellow",
            ThemeName::Maroon => "maroon",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
            ThemeName::Green => "Green",
            ThemeName::Yellow => "Yellow",
            ThemeName::Maroon => "Maroon",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ThemeName::Light => "Light background",
            ThemeName::Dark => "Dark background",
            ThemeName::Green => "Green primary color",
            ThemeName::Yellow => "Yellow primary color",
            ThemeName::Maroon => "Maroon primary color",
        }
    }

    pub fn group(self) -> ThemeGroup {
        match self {
            ThemeName::Light | ThemeName::Dark => ThemeGroup::Background,
            ThemeName::Green | ThemeName::Yellow | ThemeName::Maroon => ThemeGroup::PrimaryColor,
        }
    }

    /// Next theme in picker order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub accent: Color,      // Active borders, highlights
    pub danger: Color,      // Rejections, non-compliance
    pub success: Color,     // Active/compliant badges
    pub warning: Color,     // Pending badges, confirmations
    pub text: Color,
    pub text_dim: Color,
    pub bg: Color,
    pub bg_selected: Color, // Selected row background
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Table headers
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        let hex = |s: &str| parse_hex_color(s).unwrap_or(Color::Reset);

        match theme {
            ThemeName::Light => Self {
                accent: hex("#2563eb"),
                danger: hex("#dc2626"),
                success: hex("#16a34a"),
                warning: hex("#d97706"),
                text: hex("#1f2937"),
                text_dim: hex("#6b7280"),
                bg: hex("#ffffff"),
                bg_selected: hex("#e5e7eb"),
                inactive: hex("#9ca3af"),
                header: hex("#1d4ed8"),
            },
            ThemeName::Dark => Self {
                accent: hex("#fab387"),
                danger: hex("#f38ba8"),
                success: hex("#a6da95"),
                warning: hex("#f9e2af"),
                text: hex("#cdd6f4"),
                text_dim: hex("#9399b2"),
                bg: hex("#1e1e2e"),
                bg_selected: hex("#45475a"),
                inactive: hex("#585b70"),
                header: hex("#f38ba8"),
            },
            ThemeName::Green => Self {
                accent: hex("#16a34a"),
                header: hex("#15803d"),
                ..Self::for_theme(ThemeName::Light)
            },
            ThemeName::Yellow => Self {
                accent: hex("#ca8a04"),
                header: hex("#a16207"),
                ..Self::for_theme(ThemeName::Light)
            },
            ThemeName::Maroon => Self {
                accent: hex("#9f1239"),
                header: hex("#881337"),
                ..Self::for_theme(ThemeName::Light)
            },
        }
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(s.get(range)?, 16).ok();

    if s.len() == 6 {
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = channel(0..1)? * 17;
        let g = channel(1..2)? * 17;
        let b = channel(2..3)? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

/// Class list and `data-theme` attribute of the document root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemeMarkers {
    classes: BTreeSet<String>,
    data_theme: Option<String>,
}

impl ThemeMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unrelated class; theme application leaves it alone
    #[cfg(test)]
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    /// Remove every theme class and the attribute, then mark `theme`.
    pub fn apply(&mut self, theme: ThemeName) {
        for name in ThemeName::ALL {
            self.classes.remove(name.as_str());
        }
        self.data_theme = None;

        self.classes.insert(theme.as_str().to_string());
        self.data_theme = Some(theme.as_str().to_string());
    }

    /// Theme classes currently present, in picker order
    pub fn active_themes(&self) -> Vec<ThemeName> {
        ThemeName::ALL
            .into_iter()
            .filter(|t| self.classes.contains(t.as_str()))
            .collect()
    }

    #[cfg(test)]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn data_theme(&self) -> Option<&str> {
        self.data_theme.as_deref()
    }
}

/// Owns the preference store and the current theme.
pub struct ThemeStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    theme: ThemeName,
    markers: ThemeMarkers,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("key", &self.key)
            .field("theme", &self.theme)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Read the stored preference once, falling back to `default` when the
    /// key is absent or holds something that is not a theme name.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>, default: ThemeName) -> Self {
        let key = key.into();
        let theme = match store.get(&key) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored theme preference: {}", e);
                default
            }),
            None => default,
        };

        let mut markers = ThemeMarkers::new();
        markers.apply(theme);

        Self { store, key, theme, markers }
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn markers(&self) -> &ThemeMarkers {
        &self.markers
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Raw value currently held in the preference store
    pub fn stored_value(&self) -> Option<String> {
        self.store.get(&self.key)
    }

    /// Persist `theme`, make it current and re-mark the document.
    ///
    /// The in-memory theme changes even when the write fails; the write error
    /// is returned so the caller can report it.
    pub fn set_theme(&mut self, theme: ThemeName) -> crate::error::Result<()> {
        let written = self.store.set(&self.key, theme.as_str());
        if let Err(ref e) = written {
            tracing::warn!("Failed to persist theme preference: {}", e);
        }

        self.theme = theme;
        self.markers.apply(theme);
        tracing::info!("Theme set to {}", theme);

        written
    }
}

/// Theme accessor handed to rendering code.
///
/// Built either inside a provider (wrapping a store) or detached. Reaching for
/// the theme through a detached context is a programming error.
#[derive(Debug, Clone, Copy)]
pub struct ThemeContext<'a> {
    store: Option<&'a ThemeStore>,
}

impl<'a> ThemeContext<'a> {
    pub fn provide(store: &'a ThemeStore) -> Self {
        Self { store: Some(store) }
    }

    #[cfg(test)]
    pub fn detached() -> Self {
        Self { store: None }
    }

    /// # Panics
    /// Panics when the context was not built with [`ThemeContext::provide`].
    pub fn use_theme(&self) -> &'a ThemeStore {
        match self.store {
            Some(store) => store,
            None => panic!("use_theme must be used within a ThemeProvider"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryStore, DEFAULT_THEME_KEY};

    fn seeded(value: Option<&str>) -> Box<dyn KeyValueStore> {
        let mut store = MemoryStore::new();
        if let Some(v) = value {
            store.set(DEFAULT_THEME_KEY, v).unwrap();
        }
        Box::new(store)
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> crate::error::Result<()> {
            Err(Error::ConfigDir)
        }
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let store = ThemeStore::load(seeded(None), DEFAULT_THEME_KEY, ThemeName::Light);
        assert_eq!(store.theme(), ThemeName::Light);
        assert_eq!(store.stored_value(), None);
    }

    #[test]
    fn test_load_reads_stored_value() {
        let store = ThemeStore::load(seeded(Some("maroon")), DEFAULT_THEME_KEY, ThemeName::Light);
        assert_eq!(store.theme(), ThemeName::Maroon);
        assert_eq!(store.markers().active_themes(), vec![ThemeName::Maroon]);
    }

    #[test]
    fn test_load_ignores_unknown_value() {
        let store = ThemeStore::load(seeded(Some("neon")), DEFAULT_THEME_KEY, ThemeName::Dark);
        assert_eq!(store.theme(), ThemeName::Dark);
    }

    #[test]
    fn test_set_then_read_every_theme() {
        let mut store = ThemeStore::load(seeded(None), DEFAULT_THEME_KEY, ThemeName::Light);

        for theme in ThemeName::ALL {
            store.set_theme(theme).unwrap();
            assert_eq!(store.theme(), theme);
            assert_eq!(store.stored_value().as_deref(), Some(theme.as_str()));
            assert_eq!(store.markers().active_themes(), vec![theme]);
            assert_eq!(store.markers().data_theme(), Some(theme.as_str()));
        }
    }

    #[test]
    fn test_set_persists_under_configured_key() {
        let mut store = ThemeStore::load(seeded(None), "custom-key", ThemeName::Light);
        store.set_theme(ThemeName::Green).unwrap();

        assert_eq!(store.storage_key(), "custom-key");
        assert_eq!(store.stored_value().as_deref(), Some("green"));
    }

    #[test]
    fn test_reapplying_same_theme_is_idempotent() {
        let mut store = ThemeStore::load(seeded(None), DEFAULT_THEME_KEY, ThemeName::Light);
        store.set_theme(ThemeName::Yellow).unwrap();
        let before = store.markers().clone();

        store.set_theme(ThemeName::Yellow).unwrap();
        assert_eq!(store.markers(), &before);
    }

    #[test]
    fn test_markers_keep_unrelated_classes() {
        let mut markers = ThemeMarkers::new();
        markers.add_class("antialiased");
        markers.apply(ThemeName::Dark);
        markers.apply(ThemeName::Green);

        assert!(markers.has_class("antialiased"));
        assert!(!markers.has_class("dark"));
        assert_eq!(markers.active_themes(), vec![ThemeName::Green]);
    }

    #[test]
    fn test_failed_write_still_switches_theme() {
        let mut store = ThemeStore::load(Box::new(FailingStore), DEFAULT_THEME_KEY, ThemeName::Light);
        assert!(store.set_theme(ThemeName::Dark).is_err());
        assert_eq!(store.theme(), ThemeName::Dark);
    }

    #[test]
    fn test_theme_name_parsing() {
        assert_eq!("Dark".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert_eq!(" maroon ".parse::<ThemeName>().unwrap(), ThemeName::Maroon);
        assert!(matches!("blue".parse::<ThemeName>(), Err(Error::UnknownTheme(_))));
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(ThemeName::Maroon.next(), ThemeName::Light);
        assert_eq!(ThemeName::Light.next(), ThemeName::Dark);
    }

    #[test]
    fn test_groups() {
        assert_eq!(ThemeName::Dark.group(), ThemeGroup::Background);
        assert_eq!(ThemeName::Yellow.group(), ThemeGroup::PrimaryColor);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffc107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("nope"), None);
        // Byte lengths 6 and 3 that are not six or three characters
        assert_eq!(parse_hex_color("#é1234"), None);
        assert_eq!(parse_hex_color("é1"), None);
    }

    #[test]
    fn test_palettes_differ_by_accent() {
        let green = Palette::for_theme(ThemeName::Green);
        let light = Palette::for_theme(ThemeName::Light);
        assert_ne!(green.accent, light.accent);
        assert_eq!(green.bg, light.bg);
    }

    #[test]
    fn test_context_with_provider() {
        let store = ThemeStore::load(seeded(Some("dark")), DEFAULT_THEME_KEY, ThemeName::Light);
        let ctx = ThemeContext::provide(&store);
        assert_eq!(ctx.use_theme().theme(), ThemeName::Dark);
    }

    #[test]
    #[should_panic(expected = "use_theme must be used within a ThemeProvider")]
    fn test_context_without_provider_panics() {
        let ctx = ThemeContext::detached();
        let _ = ctx.use_theme();
    }
}
