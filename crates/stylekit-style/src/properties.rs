//! Style-property color roles and the gray ranges each role may use.

use stylekit_core::{ColorScheme, Platform};

/// Role a color plays in a style, which decides its allowed gray range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyContext {
    #[default]
    Foreground,
    Background,
    Border,
    Shadow,
    Tint,
}

const FOREGROUND_KEYS: &[&str] = &[
    "color",
    "textDecorationColor",
    "textShadowColor",
    "caretColor",
    "placeholderTextColor",
];
const BACKGROUND_KEYS: &[&str] = &["backgroundColor", "overlayColor"];
const BORDER_KEYS: &[&str] = &[
    "borderColor",
    "borderStartColor",
    "borderEndColor",
    "borderTopColor",
    "borderBottomColor",
    "borderLeftColor",
    "borderRightColor",
];
const SHADOW_KEYS: &[&str] = &["shadowColor"];
const TINT_KEYS: &[&str] = &["tintColor"];

/// Look up the role of a style property by exact name.
#[must_use]
pub fn get_color_context(property: &str) -> Option<PropertyContext> {
    let tables = [
        (FOREGROUND_KEYS, PropertyContext::Foreground),
        (BACKGROUND_KEYS, PropertyContext::Background),
        (BORDER_KEYS, PropertyContext::Border),
        (SHADOW_KEYS, PropertyContext::Shadow),
        (TINT_KEYS, PropertyContext::Tint),
    ];
    tables
        .into_iter()
        .find(|(keys, _)| keys.contains(&property))
        .map(|(_, context)| context)
}

/// Inclusive gray bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrayRange {
    pub min: u8,
    pub max: u8,
}

impl GrayRange {
    const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(self, gray: u8) -> u8 {
        gray.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, gray: u8) -> bool {
        (self.min..=self.max).contains(&gray)
    }
}

/// Allowed gray range for a color role under a scheme.
///
/// `Unspecified` is treated as light.
#[must_use]
pub const fn gray_range(scheme: ColorScheme, context: PropertyContext) -> GrayRange {
    use PropertyContext as P;
    match (scheme.is_dark(), context) {
        (false, P::Background) => GrayRange::new(240, 255),
        (false, P::Foreground) => GrayRange::new(0, 51),
        (false, P::Border) => GrayRange::new(200, 230),
        (false, P::Shadow) => GrayRange::new(0, 51),
        (false, P::Tint) => GrayRange::new(51, 128),
        (true, P::Background) => GrayRange::new(0, 51),
        (true, P::Foreground) => GrayRange::new(200, 255),
        (true, P::Border) => GrayRange::new(51, 102),
        (true, P::Shadow) => GrayRange::new(0, 51),
        (true, P::Tint) => GrayRange::new(128, 200),
    }
}

/// Clamp a gray level into the role's range.
#[must_use]
pub fn clamp_gray(gray: u8, scheme: ColorScheme, context: PropertyContext) -> u8 {
    gray_range(scheme, context).clamp(gray)
}

/// WCAG large-text rule: 18pt, or 14pt on iOS where bold is implied.
#[must_use]
pub fn is_large_text(font_size: f64, platform: Platform) -> bool {
    font_size >= 18.0 || (font_size >= 14.0 && platform.is_ios())
}

/// A platform gray that keeps contrast in the role's scheme.
///
/// Used when a color cannot be resolved to RGB. Shadow and tint share the
/// foreground entry. Without a font size the text is not considered large.
#[must_use]
pub fn contrast_safe_system_color(
    platform: Platform,
    scheme: ColorScheme,
    context: PropertyContext,
    font_size: Option<f64>,
) -> &'static str {
    let large = font_size.is_some_and(|size| is_large_text(size, platform));
    let dark = scheme.is_dark();
    match (platform, dark, context) {
        (Platform::Ios, false, PropertyContext::Background) => "systemGray6",
        (Platform::Ios, false, PropertyContext::Border) => "systemGray4",
        (Platform::Ios, false, _) if large => "systemGray2",
        (Platform::Ios, false, _) => "systemGray",
        (Platform::Ios, true, PropertyContext::Background) => "systemGray",
        (Platform::Ios, true, PropertyContext::Border) => "systemGray2",
        (Platform::Ios, true, _) if large => "systemGray5",
        (Platform::Ios, true, _) => "systemGray6",
        (Platform::Android, false, PropertyContext::Background) => "#F5F5F5",
        (Platform::Android, false, PropertyContext::Border) => "#DDDDDD",
        (Platform::Android, false, _) if large => "#404040",
        (Platform::Android, false, _) => "#1F1F1F",
        (Platform::Android, true, PropertyContext::Background) => "#121212",
        (Platform::Android, true, PropertyContext::Border) => "#404040",
        (Platform::Android, true, _) if large => "#CCCCCC",
        (Platform::Android, true, _) => "#E1E1E1",
    }
}

/// Nominal luminance of an iOS system gray token.
#[must_use]
pub fn system_color_luminance(token: &str) -> Option<f64> {
    match token {
        "systemGray" => Some(0.5),
        "systemGray2" => Some(0.45),
        "systemGray3" => Some(0.4),
        "systemGray4" => Some(0.35),
        "systemGray5" => Some(0.3),
        "systemGray6" => Some(0.25),
        _ => None,
    }
}
