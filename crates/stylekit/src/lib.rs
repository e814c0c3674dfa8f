#![forbid(unsafe_code)]

//! stylekit public facade crate.
//!
//! Re-exports the types an app needs to build accessible, screen-scaled
//! stylesheets, plus a prelude for day-to-day use.
//!
//! ```
//! use std::sync::Arc;
//! use stylekit::prelude::*;
//!
//! let device = StaticDevice::default().with_dimensions(750.0, 1624.0);
//! let settings = AccessibilitySettings::default()
//!     .with(AccessibilityKind::BoldText, Some(true));
//! let styles = StyleSystem::new(Arc::new(device), Arc::new(settings));
//!
//! let sheet = styles.create(StyleSource::themed(|theme, _insets| {
//!     StyleTree::new().with(
//!         "title",
//!         StyleTree::new()
//!             .with("fontWeight", "500")
//!             .with("paddingHorizontal", theme.spacing("md").unwrap_or(16.0)),
//!     )
//! }));
//!
//! assert_eq!(
//!     sheet.get_path(&["title", "paddingHorizontal"]),
//!     Some(&StyleValue::Number(32.0))
//! );
//! assert_eq!(
//!     sheet.get_path(&["title", "fontWeight"]).and_then(StyleValue::as_text),
//!     Some("bold")
//! );
//! ```

// --- Core re-exports -------------------------------------------------------

pub use stylekit_core::{
    AccessibilityInfo, AccessibilityKind, AccessibilitySettings, ColorResolver, ColorScheme,
    CssColorResolver, DeviceInfo, DeviceTraits, Platform, ScreenDimensions, ScreenInsets,
    ScreenOrientation, SettingsHub, StaticDevice, Subscription,
};

#[cfg(feature = "tracing-json")]
pub use stylekit_core::logging::init_json_logging;

// --- Style re-exports ------------------------------------------------------

pub use stylekit_style::{
    ColorInfo, ContrastLevel, GrayscaleConverter, GrayscaleOptions, IdentityRegistry,
    PropertyContext, ScaleConfig, ScaleProperties, Scaler, StyleRegistry, StyleSource,
    StyleSystem, StyleTree, StyleValue, Theme, ThemeColors, ThemeConfig, ThemeError, ThemeSet,
    apply_a11y_overrides, contrast_ratio, contrast_safe_system_color, get_color_context,
    luminance, parse_color, wcag_contrast_ratio,
};

/// Standard result type for stylekit APIs.
pub type Result<T> = std::result::Result<T, ThemeError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AccessibilityKind, AccessibilitySettings, ColorScheme, CssColorResolver, Platform,
        PropertyContext, Result, ScreenInsets, SettingsHub, StaticDevice, StyleSource,
        StyleSystem, StyleTree, StyleValue, Theme, ThemeConfig,
    };

    pub use crate::{core, style};
}

pub use stylekit_core as core;
pub use stylekit_style as style;
