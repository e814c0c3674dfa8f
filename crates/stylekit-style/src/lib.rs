#![forbid(unsafe_code)]

//! Style transforms for stylekit.
//!
//! # Role in stylekit
//! `stylekit-style` turns an authored style tree into the tree the host
//! renders: values scaled to the current screen, then adjusted for the
//! user's accessibility settings. It depends only on the collaborator traits
//! in `stylekit-core`, never on a concrete host.
//!
//! # This crate provides
//! - [`parse_color`], [`luminance`], [`contrast_ratio`] and the WCAG helpers.
//! - [`GrayscaleConverter`] for contrast-aware grayscale conversion.
//! - [`Scaler`] and [`ScaleProperties`] for screen-relative scaling.
//! - [`apply_a11y_overrides`] for bold, opacity, motion, and grayscale rules.
//! - [`Theme`], [`ThemeSet`], [`ThemeConfig`] and the default themes.
//! - [`StyleSystem`], which composes all of the above into `create`.

pub mod a11y;
pub mod color;
pub mod error;
pub mod grayscale;
pub mod properties;
pub mod scale;
pub mod stylesheet;
pub mod theme;
pub mod tree;

pub use a11y::apply_a11y_overrides;
pub use color::{
    ColorInfo, ContrastLevel, WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, WCAG_AAA_LARGE_TEXT,
    WCAG_AAA_NORMAL_TEXT, contrast_ratio, gray_level, luminance, parse_color, parse_packed,
    wcag_contrast_ratio, wcag_luminance,
};
pub use error::{Result, ThemeError};
pub use grayscale::{DEFAULT_FONT_SIZE, GrayscaleConverter, GrayscaleOptions};
pub use properties::{
    GrayRange, PropertyContext, clamp_gray, contrast_safe_system_color, get_color_context,
    gray_range, is_large_text, system_color_luminance,
};
pub use scale::{ScaleAxis, ScaleConfig, ScaleProperties, Scaler, live_font_scale};
pub use stylesheet::{IdentityRegistry, StyleRegistry, StyleSource, StyleSystem};
pub use theme::{PALETTE, Theme, ThemeColors, ThemeConfig, ThemeSet};
pub use tree::{StyleTree, StyleValue};
