//! Device traits: color scheme, screen geometry, font scale, and platform.
//!
//! [`DeviceTraits`] is a point-in-time snapshot of everything the style
//! pipeline asks the host about. Hosts implement [`DeviceInfo`] to supply it;
//! [`StaticDevice`] is a fixed implementation for embedders and tests.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// System display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
    /// The OS did not report a preference.
    Unspecified,
}

impl ColorScheme {
    /// Collapse `Unspecified` to `Light`.
    ///
    /// Every color and theme decision runs on the resolved scheme.
    #[must_use]
    pub const fn resolved(self) -> Self {
        match self {
            Self::Dark => Self::Dark,
            Self::Light | Self::Unspecified => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self.resolved(), Self::Dark)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Unspecified => "unspecified",
        }
    }
}

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

impl Platform {
    #[must_use]
    pub const fn is_ios(self) -> bool {
        matches!(self, Self::Ios)
    }
}

/// Screen size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenDimensions {
    pub width: f64,
    pub height: f64,
}

impl ScreenDimensions {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenDimensions {
    /// The 375x812 reference device.
    fn default() -> Self {
        Self::new(375.0, 812.0)
    }
}

/// Safe-area insets in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl ScreenInsets {
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScreenOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Snapshot of every queryable display characteristic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeviceTraits {
    pub platform: Platform,
    pub color_scheme: ColorScheme,
    pub screen_dimensions: ScreenDimensions,
    /// OS content size category token (e.g. `UICTContentSizeCategoryL`).
    pub content_size_category: String,
    pub screen_insets: ScreenInsets,
    pub display_scale: f64,
    pub font_scale: f64,
    pub is_rtl: bool,
    pub screen_orientation: ScreenOrientation,
    pub pixel_ratio: f64,
}

impl Default for DeviceTraits {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            color_scheme: ColorScheme::default(),
            screen_dimensions: ScreenDimensions::default(),
            content_size_category: String::from("UICTContentSizeCategoryL"),
            screen_insets: ScreenInsets::default(),
            display_scale: 3.0,
            font_scale: 1.0,
            is_rtl: false,
            screen_orientation: ScreenOrientation::default(),
            pixel_ratio: 3.0,
        }
    }
}

/// Synchronous queries against the host's device module.
///
/// Only [`DeviceInfo::device_traits`] is required; the individual getters
/// default to reading the snapshot.
pub trait DeviceInfo {
    fn device_traits(&self) -> DeviceTraits;

    fn platform(&self) -> Platform {
        self.device_traits().platform
    }

    fn color_scheme(&self) -> ColorScheme {
        self.device_traits().color_scheme
    }

    fn screen_dimensions(&self) -> ScreenDimensions {
        self.device_traits().screen_dimensions
    }

    fn screen_insets(&self) -> ScreenInsets {
        self.device_traits().screen_insets
    }

    fn display_scale(&self) -> f64 {
        self.device_traits().display_scale
    }

    /// Live accessibility font scale, `None` when the module cannot report it.
    fn font_scale(&self) -> Option<f64> {
        Some(self.device_traits().font_scale)
    }

    /// Font scale reported by the rendering layer's pixel-ratio API.
    fn system_font_scale(&self) -> f64 {
        1.0
    }
}

/// A [`DeviceInfo`] that always answers from a fixed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDevice {
    traits: DeviceTraits,
    live_font_scale: bool,
    system_font_scale: f64,
}

impl StaticDevice {
    pub fn new(traits: DeviceTraits) -> Self {
        Self {
            traits,
            live_font_scale: true,
            system_font_scale: 1.0,
        }
    }

    #[must_use]
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.traits.color_scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.traits.platform = platform;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.traits.screen_dimensions = ScreenDimensions::new(width, height);
        self
    }

    #[must_use]
    pub fn with_insets(mut self, insets: ScreenInsets) -> Self {
        self.traits.screen_insets = insets;
        self
    }

    #[must_use]
    pub fn with_font_scale(mut self, scale: f64) -> Self {
        self.traits.font_scale = scale;
        self.live_font_scale = true;
        self
    }

    /// Report the live font scale as unavailable, forcing the system fallback.
    #[must_use]
    pub fn without_live_font_scale(mut self, system_font_scale: f64) -> Self {
        self.live_font_scale = false;
        self.system_font_scale = system_font_scale;
        self
    }

    pub fn traits(&self) -> &DeviceTraits {
        &self.traits
    }
}

impl Default for StaticDevice {
    fn default() -> Self {
        Self::new(DeviceTraits::default())
    }
}

impl DeviceInfo for StaticDevice {
    fn device_traits(&self) -> DeviceTraits {
        self.traits.clone()
    }

    fn platform(&self) -> Platform {
        self.traits.platform
    }

    fn color_scheme(&self) -> ColorScheme {
        self.traits.color_scheme
    }

    fn screen_dimensions(&self) -> ScreenDimensions {
        self.traits.screen_dimensions
    }

    fn screen_insets(&self) -> ScreenInsets {
        self.traits.screen_insets
    }

    fn font_scale(&self) -> Option<f64> {
        self.live_font_scale.then_some(self.traits.font_scale)
    }

    fn system_font_scale(&self) -> f64 {
        self.system_font_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_resolves_to_light() {
        assert_eq!(ColorScheme::Unspecified.resolved(), ColorScheme::Light);
        assert_eq!(ColorScheme::Light.resolved(), ColorScheme::Light);
        assert_eq!(ColorScheme::Dark.resolved(), ColorScheme::Dark);
        assert!(!ColorScheme::Unspecified.is_dark());
    }

    #[test]
    fn default_dimensions_match_reference_device() {
        let dims = ScreenDimensions::default();
        assert_eq!(dims.width, 375.0);
        assert_eq!(dims.height, 812.0);
    }

    #[test]
    fn static_device_answers_from_snapshot() {
        let device = StaticDevice::default()
            .with_color_scheme(ColorScheme::Dark)
            .with_platform(Platform::Android)
            .with_dimensions(750.0, 1624.0)
            .with_insets(ScreenInsets::new(44.0, 0.0, 34.0, 0.0))
            .with_font_scale(1.5);

        assert_eq!(device.color_scheme(), ColorScheme::Dark);
        assert_eq!(device.platform(), Platform::Android);
        assert_eq!(device.screen_dimensions(), ScreenDimensions::new(750.0, 1624.0));
        assert_eq!(device.screen_insets().top, 44.0);
        assert_eq!(device.font_scale(), Some(1.5));
    }

    #[test]
    fn missing_live_font_scale_reports_none() {
        let device = StaticDevice::default().without_live_font_scale(1.2);
        assert_eq!(device.font_scale(), None);
        assert_eq!(device.system_font_scale(), 1.2);
    }

    #[test]
    fn default_getters_read_the_snapshot() {
        struct Snapshot(DeviceTraits);
        impl DeviceInfo for Snapshot {
            fn device_traits(&self) -> DeviceTraits {
                self.0.clone()
            }
        }

        let traits = DeviceTraits {
            display_scale: 2.0,
            font_scale: 1.3,
            ..DeviceTraits::default()
        };
        let device = Snapshot(traits);
        assert_eq!(device.display_scale(), 2.0);
        assert_eq!(device.font_scale(), Some(1.3));
        assert_eq!(device.system_font_scale(), 1.0);
        assert_eq!(device.platform(), Platform::Ios);
    }
}
