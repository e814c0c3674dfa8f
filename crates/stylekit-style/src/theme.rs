//! Themes: spacing, radius, fonts, font sizes, and colors.
//!
//! A [`ThemeSet`] holds one theme per resolved color scheme. Hosts supply
//! their own through [`ThemeConfig`], either as a single theme used for both
//! schemes or as a map keyed by `light` and `dark`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stylekit_core::ColorScheme;

use crate::error::{Result, ThemeError};

/// Named colors shared by the default themes.
pub const PALETTE: &[(&str, &str)] = &[
    ("light1", "#d6dbdf"),
    ("light2", "#95a5a6"),
    ("neutral", "#566573"),
    ("dark1", "#34495e"),
    ("dark2", "#2e4053"),
    ("white", "#fff"),
    ("black", "#000"),
    ("green", "#0ba95b"),
    ("yellow", "#fcba28"),
    ("red", "#ed203d"),
    ("blue", "#12b5e5"),
    ("purple", "#9d7dce"),
];

fn palette(name: &str) -> String {
    PALETTE
        .iter()
        .find(|(k, _)| *k == name)
        .map_or_else(String::new, |(_, v)| (*v).to_owned())
}

fn table<V: Clone>(entries: &[(&str, V)]) -> BTreeMap<String, V> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

fn default_spacing() -> BTreeMap<String, f64> {
    table(&[
        ("xxs", 2.0),
        ("xs", 4.0),
        ("sm", 8.0),
        ("md", 16.0),
        ("lg", 20.0),
        ("xl", 24.0),
        ("xxl", 32.0),
        ("xxxl", 40.0),
    ])
}

fn default_radius() -> BTreeMap<String, f64> {
    table(&[
        ("none", 0.0),
        ("xs", 4.0),
        ("sm", 8.0),
        ("md", 16.0),
        ("lg", 20.0),
        ("xl", 24.0),
        ("xxl", 32.0),
        ("full", 9999.0),
    ])
}

fn default_fonts() -> BTreeMap<String, String> {
    table(&[
        ("light", "InterTight_300Light"),
        ("regular", "InterTight_400Regular"),
        ("medium", "InterTight_500Medium"),
        ("semibold", "InterTight_600SemiBold"),
        ("bold", "InterTight_700Bold"),
    ])
    .into_iter()
    .map(|(k, v)| (k, v.to_owned()))
    .collect()
}

fn default_font_sizes() -> BTreeMap<String, f64> {
    table(&[
        ("display", 48.0),
        ("h1", 36.0),
        ("h2", 28.0),
        ("h3", 24.0),
        ("h4", 20.0),
        ("h5", 18.0),
        ("h6", 16.0),
        ("p1", 18.0),
        ("p2", 12.0),
        ("p3", 10.0),
        ("body", 18.0),
    ])
}

/// Theme colors. The six semantic slots are required; anything else lands in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub success: String,
    pub warning: String,
    pub danger: String,
    pub info: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ThemeColors {
    /// Look up a semantic slot or an extra color.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "bg" => Some(&self.bg),
            "fg" => Some(&self.fg),
            "success" => Some(&self.success),
            "warning" => Some(&self.warning),
            "danger" => Some(&self.danger),
            "info" => Some(&self.info),
            _ => self.extra.get(name).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default = "default_spacing")]
    pub spacing: BTreeMap<String, f64>,
    #[serde(default = "default_radius")]
    pub radius: BTreeMap<String, f64>,
    #[serde(default = "default_fonts")]
    pub fonts: BTreeMap<String, String>,
    #[serde(default = "default_font_sizes")]
    pub font_sizes: BTreeMap<String, f64>,
    pub colors: ThemeColors,
    /// Host-defined theme sections.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Theme {
    fn with_base(bg: &str, fg: &str) -> Self {
        Self {
            spacing: default_spacing(),
            radius: default_radius(),
            fonts: default_fonts(),
            font_sizes: default_font_sizes(),
            colors: ThemeColors {
                bg: palette(bg),
                fg: palette(fg),
                success: palette("green"),
                warning: palette("yellow"),
                danger: palette("red"),
                info: palette("blue"),
                extra: table(PALETTE)
                    .into_iter()
                    .map(|(k, v)| (k, v.to_owned()))
                    .collect(),
            },
            extra: BTreeMap::new(),
        }
    }

    /// White background, black text.
    #[must_use]
    pub fn default_light() -> Self {
        Self::with_base("white", "black")
    }

    /// Black background, white text.
    #[must_use]
    pub fn default_dark() -> Self {
        Self::with_base("black", "white")
    }

    #[must_use]
    pub fn spacing(&self, name: &str) -> Option<f64> {
        self.spacing.get(name).copied()
    }

    #[must_use]
    pub fn radius(&self, name: &str) -> Option<f64> {
        self.radius.get(name).copied()
    }

    #[must_use]
    pub fn font(&self, name: &str) -> Option<&str> {
        self.fonts.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn font_size(&self, name: &str) -> Option<f64> {
        self.font_sizes.get(name).copied()
    }

    #[must_use]
    pub fn color(&self, name: &str) -> Option<&str> {
        self.colors.get(name)
    }
}

/// One theme per resolved color scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSet {
    pub light: Theme,
    pub dark: Theme,
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            light: Theme::default_light(),
            dark: Theme::default_dark(),
        }
    }
}

impl ThemeSet {
    /// Same theme for both schemes.
    #[must_use]
    pub fn uniform(theme: Theme) -> Self {
        Self {
            light: theme.clone(),
            dark: theme,
        }
    }

    /// Theme for `scheme`; `Unspecified` selects light.
    #[must_use]
    pub fn for_scheme(&self, scheme: ColorScheme) -> &Theme {
        if scheme.is_dark() {
            &self.dark
        } else {
            &self.light
        }
    }
}

/// Host-supplied theme configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeConfig {
    /// Used for both light and dark.
    Single(Theme),
    /// Keyed by scheme name; must contain `light` and `dark`.
    Multi(BTreeMap<String, Theme>),
}

impl ThemeConfig {
    /// Parse JSON. An object with a `colors` key is one theme; any other
    /// object is a map of scheme name to theme.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(object) = value.as_object() else {
            return Err(ThemeError::invalid("theme config must be a JSON object"));
        };
        if object.contains_key("colors") {
            Ok(Self::Single(serde_json::from_value(value)?))
        } else {
            Ok(Self::Multi(serde_json::from_value(value)?))
        }
    }

    /// Resolve into a [`ThemeSet`]. Extra scheme keys are ignored.
    pub fn into_theme_set(self) -> Result<ThemeSet> {
        match self {
            Self::Single(theme) => Ok(ThemeSet::uniform(theme)),
            Self::Multi(mut map) => match (map.remove("light"), map.remove("dark")) {
                (Some(light), Some(dark)) => Ok(ThemeSet { light, dark }),
                _ => Err(ThemeError::invalid(
                    "multiple themes provided, but missing 'light' or 'dark' theme",
                )),
            },
        }
    }
}

impl From<Theme> for ThemeConfig {
    fn from(theme: Theme) -> Self {
        Self::Single(theme)
    }
}
