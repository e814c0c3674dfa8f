//! Screen-relative scaling of numeric style values.
//!
//! Designs are authored against a 375x812 reference screen. Width-like
//! properties scale with the screen width, height-like properties with the
//! screen height, and "aspect" properties (radii, gaps, line heights) with a
//! clamped blend of both. `fontSize` follows the user's font scale.

use ahash::AHashSet;
use stylekit_core::{DeviceInfo, DeviceTraits, ScreenDimensions};

use crate::tree::{StyleTree, StyleValue};

/// Reference geometry and clamp bounds.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaleConfig {
    pub reference_width: f64,
    pub reference_height: f64,
    /// Height/width ratio of the reference screen.
    pub reference_aspect: f64,
    pub min_aspect_scale: f64,
    pub max_aspect_scale: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            reference_width: 375.0,
            reference_height: 812.0,
            reference_aspect: 2.164,
            min_aspect_scale: 0.85,
            max_aspect_scale: 1.15,
        }
    }
}

/// How a style key is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleAxis {
    Width,
    Height,
    Aspect,
    Font,
}

const WIDTH_KEYS: &[&str] = &[
    "width",
    "minWidth",
    "maxWidth",
    "left",
    "right",
    "start",
    "end",
    "marginHorizontal",
    "marginLeft",
    "marginRight",
    "marginStart",
    "marginEnd",
    "paddingHorizontal",
    "paddingLeft",
    "paddingRight",
    "paddingStart",
    "paddingEnd",
    "columnGap",
];

const HEIGHT_KEYS: &[&str] = &[
    "height",
    "minHeight",
    "maxHeight",
    "top",
    "bottom",
    "marginVertical",
    "marginTop",
    "marginBottom",
    "paddingVertical",
    "paddingTop",
    "paddingBottom",
    "rowGap",
];

const ASPECT_KEYS: &[&str] = &[
    "margin",
    "padding",
    "gap",
    "borderRadius",
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomLeftRadius",
    "borderBottomRightRadius",
    "borderWidth",
    "lineHeight",
    "letterSpacing",
    "shadowRadius",
    "textShadowRadius",
];

const BLACKLIST_KEYS: &[&str] = &[
    "flex",
    "flexGrow",
    "flexShrink",
    "flexBasis",
    "opacity",
    "zIndex",
    "aspectRatio",
    "elevation",
    "shadowOpacity",
    "fontWeight",
];

fn key_set(keys: &[&str]) -> AHashSet<String> {
    keys.iter().map(|k| (*k).to_owned()).collect()
}

/// Key classification table. Starts from the built-in sets; callers may add
/// keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleProperties {
    width: AHashSet<String>,
    height: AHashSet<String>,
    aspect: AHashSet<String>,
    blacklist: AHashSet<String>,
}

impl Default for ScaleProperties {
    fn default() -> Self {
        Self {
            width: key_set(WIDTH_KEYS),
            height: key_set(HEIGHT_KEYS),
            aspect: key_set(ASPECT_KEYS),
            blacklist: key_set(BLACKLIST_KEYS),
        }
    }
}

impl ScaleProperties {
    /// A table with no keys at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            width: AHashSet::new(),
            height: AHashSet::new(),
            aspect: AHashSet::new(),
            blacklist: AHashSet::new(),
        }
    }

    /// Classify `key` along `axis`. `Font` only applies to `fontSize` and is
    /// ignored here.
    #[must_use]
    pub fn with_key(mut self, axis: ScaleAxis, key: impl Into<String>) -> Self {
        let key = key.into();
        match axis {
            ScaleAxis::Width => self.width.insert(key),
            ScaleAxis::Height => self.height.insert(key),
            ScaleAxis::Aspect => self.aspect.insert(key),
            ScaleAxis::Font => false,
        };
        self
    }

    /// Never scale `key`.
    #[must_use]
    pub fn with_blacklisted(mut self, key: impl Into<String>) -> Self {
        self.blacklist.insert(key.into());
        self
    }

    pub fn is_blacklisted(&self, key: &str) -> bool {
        self.blacklist.contains(key)
    }

    /// Axis for `key`, or `None` when it is not scaled.
    ///
    /// The blacklist wins; then width, height, aspect, and finally `fontSize`.
    #[must_use]
    pub fn classify(&self, key: &str) -> Option<ScaleAxis> {
        if self.blacklist.contains(key) {
            None
        } else if self.width.contains(key) {
            Some(ScaleAxis::Width)
        } else if self.height.contains(key) {
            Some(ScaleAxis::Height)
        } else if self.aspect.contains(key) {
            Some(ScaleAxis::Aspect)
        } else if key == "fontSize" {
            Some(ScaleAxis::Font)
        } else {
            None
        }
    }
}

/// The device's live font scale, or the system one when it cannot report it.
pub fn live_font_scale<D>(device: &D) -> f64
where
    D: DeviceInfo + ?Sized,
{
    device
        .font_scale()
        .unwrap_or_else(|| device.system_font_scale())
}

/// Scales values for one screen.
#[derive(Debug, Clone)]
pub struct Scaler<'p> {
    screen: ScreenDimensions,
    font_scale: f64,
    config: ScaleConfig,
    properties: &'p ScaleProperties,
}

impl<'p> Scaler<'p> {
    pub fn new(screen: ScreenDimensions, font_scale: f64, properties: &'p ScaleProperties) -> Self {
        Self {
            screen,
            font_scale,
            config: ScaleConfig::default(),
            properties,
        }
    }

    /// Read the screen and font scale from a device. A missing live font
    /// scale falls back to the system-reported one.
    pub fn from_device<D>(device: &D, properties: &'p ScaleProperties) -> Self
    where
        D: DeviceInfo + ?Sized,
    {
        Self::from_traits(&device.device_traits(), live_font_scale(device), properties)
    }

    /// Screen geometry from an already-taken snapshot.
    pub fn from_traits(
        traits: &DeviceTraits,
        font_scale: f64,
        properties: &'p ScaleProperties,
    ) -> Self {
        Self::new(traits.screen_dimensions, font_scale, properties)
    }

    #[must_use]
    pub fn with_config(mut self, config: ScaleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn font_scale(&self) -> f64 {
        self.font_scale
    }

    /// Scale by screen width, or by `width` when given.
    #[must_use]
    pub fn horizontal(&self, size: f64, width: Option<f64>) -> f64 {
        width.unwrap_or(self.screen.width) / self.config.reference_width * size
    }

    /// Scale by screen height, or by `height` when given.
    #[must_use]
    pub fn vertical(&self, size: f64, height: Option<f64>) -> f64 {
        height.unwrap_or(self.screen.height) / self.config.reference_height * size
    }

    /// Scale by the clamped blend of width scale and aspect ratio.
    #[must_use]
    pub fn aspect(&self, size: f64) -> f64 {
        let ScreenDimensions { width, height } = self.screen;
        let width_scale = width / self.config.reference_width;
        let ratio_scale = (height / width) / self.config.reference_aspect;
        let blended = 0.5 * width_scale + 0.5 * ratio_scale;
        // NaN from a zero-width screen falls through clamp unchanged.
        let factor = if blended.is_nan() {
            1.0
        } else {
            blended.clamp(self.config.min_aspect_scale, self.config.max_aspect_scale)
        };
        size * factor
    }

    /// Scale one numeric value. Values `<= 1` and unclassified keys pass
    /// through.
    #[must_use]
    pub fn scale_value(&self, key: &str, value: f64) -> f64 {
        if value <= 1.0 {
            return value;
        }
        match self.properties.classify(key) {
            Some(ScaleAxis::Width) => self.horizontal(value, None),
            Some(ScaleAxis::Height) => self.vertical(value, None),
            Some(ScaleAxis::Aspect) => self.aspect(value),
            Some(ScaleAxis::Font) => value * self.font_scale,
            None => value,
        }
    }

    /// Return a scaled copy of `tree`. Text is untouched; subtrees recurse.
    #[must_use]
    pub fn scale_style(&self, tree: &StyleTree) -> StyleTree {
        tree.map_entries(|key, value| match value {
            StyleValue::Number(n) => StyleValue::Number(self.scale_value(key, *n)),
            StyleValue::Tree(sub) => StyleValue::Tree(self.scale_style(sub)),
            StyleValue::Text(_) => value.clone(),
        })
    }
}
