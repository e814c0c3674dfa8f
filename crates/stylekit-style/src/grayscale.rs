//! Contrast-aware grayscale conversion.
//!
//! A [`GrayscaleConverter`] is created per transform pass. It remembers the
//! most recent background it converted so foreground colors later in the same
//! pass are repaired against the background they will actually sit on.
//!
//! # Algorithm
//!
//! 1. Empty and `transparent` colors pass through.
//! 2. Colors that neither parse nor resolve become a platform system gray
//!    chosen for the role and scheme.
//! 3. Everything else is reduced to a Rec. 709 weighted gray, clamped into the
//!    role's [`GrayRange`](crate::properties::GrayRange), and for foreground
//!    colors stepped one level at a time until it meets the required WCAG
//!    ratio against the tracked background.

use stylekit_core::{ColorResolver, ColorScheme, Platform};

use crate::color::{
    ColorInfo, ContrastLevel, contrast_ratio, gray_level, luminance, parse_color, parse_packed,
};
use crate::properties::{
    PropertyContext, clamp_gray, contrast_safe_system_color, is_large_text,
    system_color_luminance,
};
use crate::theme::Theme;

/// Default font size assumed for contrast checks.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Tunables for [`GrayscaleConverter`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrayscaleOptions {
    pub level: ContrastLevel,
    /// Font size used when the caller gives none.
    pub default_font_size: f64,
}

impl Default for GrayscaleOptions {
    fn default() -> Self {
        Self {
            level: ContrastLevel::AA,
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl GrayscaleOptions {
    #[must_use]
    pub fn level(mut self, level: ContrastLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }
}

/// Converts colors to grays for one transform pass.
pub struct GrayscaleConverter<'a> {
    scheme: ColorScheme,
    platform: Platform,
    resolver: &'a dyn ColorResolver,
    options: GrayscaleOptions,
    background: ColorInfo,
}

impl<'a> GrayscaleConverter<'a> {
    /// Start a pass with the theme's background as the tracked background.
    ///
    /// An unparseable theme background falls back to white (light) or black
    /// (dark).
    pub fn new(
        scheme: ColorScheme,
        theme: &Theme,
        platform: Platform,
        resolver: &'a dyn ColorResolver,
    ) -> Self {
        let scheme = scheme.resolved();
        let background = parse_color(&theme.colors.bg, resolver).unwrap_or(if scheme.is_dark() {
            ColorInfo::BLACK
        } else {
            ColorInfo::WHITE
        });
        Self {
            scheme,
            platform,
            resolver,
            options: GrayscaleOptions::default(),
            background,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: GrayscaleOptions) -> Self {
        self.options = options;
        self
    }

    /// Background foreground colors are currently checked against.
    pub fn background(&self) -> ColorInfo {
        self.background
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Convert a color string.
    pub fn convert(
        &mut self,
        color: &str,
        context: PropertyContext,
        font_size: Option<f64>,
    ) -> String {
        if color.is_empty() || color == "transparent" {
            return color.to_owned();
        }

        let parsed = parse_color(color, self.resolver);
        if parsed.is_none() && self.resolver.resolve(color).is_none() {
            return self.system_fallback(context, font_size);
        }
        match parsed {
            Some(info) => self.convert_info(info, context, font_size),
            None => color.to_owned(),
        }
    }

    /// Convert a packed `0xAARRGGBB` color.
    pub fn convert_packed(
        &mut self,
        color: u32,
        context: PropertyContext,
        font_size: Option<f64>,
    ) -> String {
        self.convert_info(parse_packed(color), context, font_size)
    }

    fn system_fallback(&mut self, context: PropertyContext, font_size: Option<f64>) -> String {
        let token = contrast_safe_system_color(self.platform, self.scheme, context, font_size);
        if context == PropertyContext::Background {
            if let Some(lum) = system_color_luminance(token) {
                self.background = ColorInfo::gray((lum * 255.0).round() as u8);
            }
        }
        tracing::trace!(token, ?context, "unresolvable color, using system gray");
        token.to_owned()
    }

    fn convert_info(
        &mut self,
        info: ColorInfo,
        context: PropertyContext,
        font_size: Option<f64>,
    ) -> String {
        let mut gray = clamp_gray(gray_level(&info), self.scheme, context);

        match context {
            PropertyContext::Foreground => {
                let size = font_size.unwrap_or(self.options.default_font_size);
                let required = self
                    .options
                    .level
                    .required_ratio(is_large_text(size, self.platform));
                gray = self.repair_contrast(gray, required);
            }
            PropertyContext::Background => {
                self.background = ColorInfo::gray(gray);
            }
            PropertyContext::Border | PropertyContext::Shadow | PropertyContext::Tint => {}
        }

        ColorInfo {
            a: info.a,
            ..ColorInfo::gray(gray)
        }
        .to_string()
    }

    /// Step away from the background until `required` is met or the gray
    /// runs out of range. Exhaustion is not an error.
    fn repair_contrast(&self, start: u8, required: f64) -> u8 {
        let step: i32 = if luminance(&self.background) < 0.5 { 1 } else { -1 };
        let mut gray = i32::from(start);
        let mut steps = 0u32;
        while (0..=255).contains(&gray)
            && contrast_ratio(&ColorInfo::gray(gray as u8), &self.background) < required
        {
            gray += step;
            steps += 1;
        }
        if steps > 0 {
            tracing::trace!(start, end = gray, steps, required, "repaired contrast");
        }
        gray.clamp(0, 255) as u8
    }
}

impl std::fmt::Debug for GrayscaleConverter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrayscaleConverter")
            .field("scheme", &self.scheme)
            .field("platform", &self.platform)
            .field("options", &self.options)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{WCAG_AA_NORMAL_TEXT, contrast_ratio};
    use stylekit_core::CssColorResolver;
    use tracing_test::traced_test;

    fn converter(scheme: ColorScheme, platform: Platform) -> GrayscaleConverter<'static> {
        let theme = if scheme.is_dark() {
            Theme::default_dark()
        } else {
            Theme::default_light()
        };
        GrayscaleConverter::new(scheme, &theme, platform, &CssColorResolver)
    }

    fn light() -> GrayscaleConverter<'static> {
        converter(ColorScheme::Light, Platform::Ios)
    }

    #[test]
    fn empty_and_transparent_pass_through() {
        let mut c = light();
        assert_eq!(c.convert("", PropertyContext::Foreground, None), "");
        assert_eq!(
            c.convert("transparent", PropertyContext::Background, None),
            "transparent"
        );
        assert_eq!(c.background(), ColorInfo::WHITE.with_alpha(1.0));
    }

    #[test]
    fn theme_background_seeds_tracking() {
        assert_eq!(light().background().r, 255);
        let dark = converter(ColorScheme::Dark, Platform::Ios);
        assert_eq!(dark.background().r, 0);
    }

    #[test]
    fn unparseable_theme_background_falls_back_by_scheme() {
        let mut theme = Theme::default_light();
        theme.colors.bg = "not-a-color".into();
        let c = GrayscaleConverter::new(ColorScheme::Dark, &theme, Platform::Ios, &CssColorResolver);
        assert_eq!(c.background(), ColorInfo::BLACK);
        let c = GrayscaleConverter::new(
            ColorScheme::Unspecified,
            &theme,
            Platform::Ios,
            &CssColorResolver,
        );
        assert_eq!(c.background(), ColorInfo::WHITE);
    }

    #[test]
    fn white_foreground_on_light_is_clamped_then_darkened() {
        let mut c = light();
        let out = c.convert("#FFFFFF", PropertyContext::Foreground, None);
        assert_eq!(out, "rgb(37, 37, 37)");
        let ratio = contrast_ratio(&ColorInfo::gray(37), &ColorInfo::WHITE);
        assert!(ratio >= WCAG_AA_NORMAL_TEXT);
    }

    #[test]
    fn large_text_keeps_clamped_gray() {
        let mut c = light();
        assert_eq!(
            c.convert("#FFFFFF", PropertyContext::Foreground, Some(18.0)),
            "rgb(51, 51, 51)"
        );
        assert_eq!(
            c.convert("#FFFFFF", PropertyContext::Foreground, Some(14.0)),
            "rgb(51, 51, 51)"
        );
        let mut android = converter(ColorScheme::Light, Platform::Android);
        assert_eq!(
            android.convert("#FFFFFF", PropertyContext::Foreground, Some(14.0)),
            "rgb(37, 37, 37)"
        );
    }

    #[test]
    fn black_foreground_on_dark_lands_in_dark_range() {
        let mut c = converter(ColorScheme::Dark, Platform::Ios);
        assert_eq!(
            c.convert("#000000", PropertyContext::Foreground, None),
            "rgb(200, 200, 200)"
        );
    }

    #[test]
    fn alpha_below_one_is_kept() {
        let mut c = light();
        assert_eq!(
            c.convert("rgba(255, 255, 255, 0.5)", PropertyContext::Foreground, None),
            "rgba(37, 37, 37, 0.5)"
        );
        assert_eq!(
            c.convert("rgba(0, 0, 0, 1)", PropertyContext::Border, None),
            "rgb(200, 200, 200)"
        );
    }

    #[test]
    fn background_updates_tracking_for_later_foregrounds() {
        let mut c = light();
        assert_eq!(
            c.convert("#000000", PropertyContext::Background, None),
            "rgb(240, 240, 240)"
        );
        assert_eq!(c.background(), ColorInfo::gray(240));
        assert_eq!(
            c.convert("#FFFFFF", PropertyContext::Foreground, None),
            "rgb(33, 33, 33)"
        );
    }

    #[test]
    fn unresolvable_colors_become_system_grays() {
        let mut c = converter(ColorScheme::Dark, Platform::Ios);
        assert_eq!(
            c.convert("systemBlue", PropertyContext::Background, None),
            "systemGray"
        );
        assert_eq!(c.background(), ColorInfo::gray(128));
        assert_eq!(
            c.convert("#FFFFFF", PropertyContext::Foreground, None),
            "rgb(10, 10, 10)"
        );
    }

    #[test]
    fn exhausted_repair_returns_range_edge() {
        let mut c = light();
        assert_eq!(
            c.convert("systemBlue", PropertyContext::Background, None),
            "systemGray6"
        );
        assert_eq!(c.background(), ColorInfo::gray(64));
        assert_eq!(
            c.convert("#FFFFFF", PropertyContext::Foreground, None),
            "rgb(255, 255, 255)"
        );
    }

    #[test]
    fn android_background_token_leaves_tracking_alone() {
        let mut c = converter(ColorScheme::Dark, Platform::Android);
        let before = c.background();
        assert_eq!(
            c.convert("?attr/colorSurface", PropertyContext::Background, None),
            "#121212"
        );
        assert_eq!(c.background(), before);
    }

    #[test]
    fn packed_colors_convert() {
        let mut c = light();
        assert_eq!(
            c.convert_packed(0xFFFF_FFFF, PropertyContext::Foreground, None),
            "rgb(37, 37, 37)"
        );
        assert_eq!(
            c.convert_packed(0x0000_0000, PropertyContext::Shadow, None),
            "rgba(0, 0, 0, 0)"
        );
    }

    #[test]
    fn resolver_backed_parse_failure_returns_input() {
        // Resolves, but not through a form the parser accepts.
        let resolver = |s: &str| (s == "rgb(1 2 3)").then_some(0xFF01_0203);
        let theme = Theme::default_light();
        let mut c = GrayscaleConverter::new(ColorScheme::Light, &theme, Platform::Ios, &resolver);
        assert_eq!(
            c.convert("rgb(1 2 3)", PropertyContext::Foreground, None),
            "rgb(1 2 3)"
        );
    }

    #[test]
    fn aaa_requires_more_contrast() {
        let mut c = light().with_options(GrayscaleOptions::default().level(ContrastLevel::AAA));
        let out = c.convert("#FFFFFF", PropertyContext::Foreground, None);
        let gray: u8 = out
            .trim_start_matches("rgb(")
            .split(',')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!(gray < 37);
        assert!(contrast_ratio(&ColorInfo::gray(gray), &ColorInfo::WHITE) >= 7.0);
    }

    #[test]
    #[traced_test]
    fn system_fallback_is_traced() {
        let mut c = light();
        let _ = c.convert("systemBlue", PropertyContext::Foreground, None);
        assert!(logs_contain("unresolvable color, using system gray"));
    }
}
