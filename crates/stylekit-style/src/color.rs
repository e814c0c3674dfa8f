//! Color parsing and luminance/contrast math.
//!
//! Colors arrive as strings (`#RRGGBB`, `rgba(...)`, named colors, platform
//! tokens) or as packed `0xAARRGGBB` integers produced by the host's color
//! processor. Everything that is not a 6/8 digit hex or an `rgb()`/`rgba()`
//! literal is handed to the [`ColorResolver`].
//!
//! Two luminance models live here. [`luminance`] and [`contrast_ratio`] are
//! the ones the grayscale converter uses for contrast repair; their
//! linearization slightly overshoots (white is about 1.048, not 1.0), which
//! makes repair a little more conservative. [`wcag_luminance`] and
//! [`wcag_contrast_ratio`] follow WCAG 2.x exactly.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use stylekit_core::ColorResolver;

/// Minimum contrast for normal text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum contrast for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum contrast for normal text at level AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum contrast for large text at level AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

/// An sRGB color with optional alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorInfo {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// `None` when the source carried no alpha channel.
    pub a: Option<f64>,
}

impl ColorInfo {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.a = Some(alpha);
        self
    }

    pub const WHITE: Self = Self::gray(255);
    pub const BLACK: Self = Self::gray(0);

    /// Alpha with `None` read as fully opaque.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }

    /// Pack into `0xAARRGGBB`; missing alpha packs as `0xFF`.
    #[must_use]
    pub fn to_argb(&self) -> u32 {
        let a = (self.alpha().clamp(0.0, 1.0) * 255.0).round() as u32;
        (a << 24) | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl fmt::Display for ColorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) if a < 1.0 => write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, a),
            _ => write!(f, "rgb({}, {}, {})", self.r, self.g, self.b),
        }
    }
}

/// Decode a packed `0xAARRGGBB` value.
#[must_use]
pub fn parse_packed(value: u32) -> ColorInfo {
    ColorInfo {
        r: ((value >> 16) & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: (value & 0xFF) as u8,
        a: Some(f64::from((value >> 24) & 0xFF) / 255.0),
    }
}

fn rgb_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^rgba?\((\d+),\s*(\d+),\s*(\d+)(?:,\s*([\d.]+))?\)$").ok())
        .as_ref()
}

fn parse_hex(hex: &str) -> Option<ColorInfo> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let color = ColorInfo::rgb(byte(0)?, byte(2)?, byte(4)?);
    if hex.len() == 8 {
        Some(color.with_alpha(f64::from(byte(6)?) / 255.0))
    } else {
        Some(color)
    }
}

fn parse_functional(input: &str) -> Option<ColorInfo> {
    let caps = rgb_pattern()?.captures(input)?;
    // `\d+` may exceed a byte; saturate like the host does.
    let channel = |i: usize| -> Option<u8> {
        let value: u64 = caps.get(i)?.as_str().parse().ok()?;
        Some(value.min(255) as u8)
    };
    let color = ColorInfo::rgb(channel(1)?, channel(2)?, channel(3)?);
    match caps.get(4) {
        Some(alpha) => Some(color.with_alpha(alpha.as_str().parse().ok()?)),
        None => Some(color),
    }
}

/// Parse a color string.
///
/// Returns `None` when neither the literal forms nor the resolver recognize
/// the input. Never panics.
pub fn parse_color<R>(input: &str, resolver: &R) -> Option<ColorInfo>
where
    R: ColorResolver + ?Sized,
{
    if let Some(hex) = input.strip_prefix('#') {
        if matches!(hex.len(), 6 | 8) {
            return parse_hex(hex);
        }
    }
    if input.starts_with("rgb") {
        return parse_functional(input);
    }
    resolver.resolve(input).map(parse_packed)
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        c + 0.055 / 1.055_f64.powf(2.4)
    }
}

/// Luminance used for contrast repair.
#[must_use]
pub fn luminance(color: &ColorInfo) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

fn ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio under [`luminance`]. Symmetric.
#[must_use]
pub fn contrast_ratio(a: &ColorInfo, b: &ColorInfo) -> f64 {
    ratio(luminance(a), luminance(b))
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance in `[0, 1]`.
#[must_use]
pub fn wcag_luminance(color: &ColorInfo) -> f64 {
    0.2126 * srgb_to_linear(color.r)
        + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG 2.x contrast ratio in `[1, 21]`.
#[must_use]
pub fn wcag_contrast_ratio(a: &ColorInfo, b: &ColorInfo) -> f64 {
    ratio(wcag_luminance(a), wcag_luminance(b))
}

/// Weighted gray level of a color, rounded to the nearest byte.
#[must_use]
pub fn gray_level(color: &ColorInfo) -> u8 {
    let level =
        0.2126 * f64::from(color.r) + 0.7152 * f64::from(color.g) + 0.0722 * f64::from(color.b);
    level.round().clamp(0.0, 255.0) as u8
}

/// WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum ContrastLevel {
    #[default]
    AA,
    AAA,
}

impl ContrastLevel {
    /// Minimum ratio for normal or large text.
    #[must_use]
    pub const fn required_ratio(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (Self::AA, false) => WCAG_AA_NORMAL_TEXT,
            (Self::AA, true) => WCAG_AA_LARGE_TEXT,
            (Self::AAA, false) => WCAG_AAA_NORMAL_TEXT,
            (Self::AAA, true) => WCAG_AAA_LARGE_TEXT,
        }
    }
}
