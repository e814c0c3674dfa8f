//! Accessibility overrides applied to a style tree.
//!
//! | Setting              | Keys                                  | Override                 |
//! |----------------------|---------------------------------------|--------------------------|
//! | bold text            | `fontWeight`                          | `"bold"`                 |
//! | reduce transparency  | `opacity` (numeric)                   | `min(1, v + 0.3)`        |
//! | reduce motion        | contains `duration` or `animation`    | `0`                      |
//! | grayscale            | contains `color` (any case)           | grayscale conversion     |
//!
//! Every rule looks at the entry's original value. When more than one rule
//! matches a key, the one lower in the table decides.

use stylekit_core::{AccessibilityKind, AccessibilitySettings};

use crate::grayscale::GrayscaleConverter;
use crate::properties::{PropertyContext, get_color_context};
use crate::tree::{StyleTree, StyleValue};

/// Return an overridden copy of `tree`.
///
/// `converter` is shared across the whole walk so a background converted
/// early in the tree is the contrast reference for foregrounds after it.
pub fn apply_a11y_overrides(
    tree: &StyleTree,
    settings: &AccessibilitySettings,
    converter: &mut GrayscaleConverter<'_>,
) -> StyleTree {
    let bold = settings.is_enabled(AccessibilityKind::BoldText);
    let reduce_transparency = settings.is_enabled(AccessibilityKind::ReduceTransparency);
    let reduce_motion = settings.is_enabled(AccessibilityKind::ReduceMotion);
    let grayscale = settings.is_enabled(AccessibilityKind::Grayscale);

    tree.map_entries(|key, value| {
        if let StyleValue::Tree(sub) = value {
            return StyleValue::Tree(apply_a11y_overrides(sub, settings, converter));
        }

        let mut out = value.clone();
        if bold && key == "fontWeight" {
            out = StyleValue::from("bold");
        }
        if reduce_transparency && key == "opacity" {
            if let StyleValue::Number(v) = value {
                out = StyleValue::Number((v + 0.3).min(1.0));
            }
        }
        if reduce_motion && (key.contains("duration") || key.contains("animation")) {
            out = StyleValue::Number(0.0);
        }
        if grayscale && key.to_ascii_lowercase().contains("color") {
            out = grayscale_entry(key, value, converter);
        }
        out
    })
}

fn grayscale_entry(
    key: &str,
    value: &StyleValue,
    converter: &mut GrayscaleConverter<'_>,
) -> StyleValue {
    let context = get_color_context(key).unwrap_or(PropertyContext::Foreground);
    let font_size = if key.contains("fontSize") {
        value.as_number()
    } else {
        None
    };
    match value {
        StyleValue::Text(color) => StyleValue::Text(converter.convert(color, context, font_size)),
        StyleValue::Number(n) => match packed_color(*n) {
            Some(packed) => StyleValue::Text(converter.convert_packed(packed, context, font_size)),
            None => value.clone(),
        },
        StyleValue::Tree(_) => value.clone(),
    }
}

/// A number is a packed color only when it is an integral `u32`.
fn packed_color(n: f64) -> Option<u32> {
    (n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)).then_some(n as u32)
}
