//! Property-based invariant tests for scaling and the override pass.
//!
//! 1. Values `<= 1` are never scaled, whatever the key or screen.
//! 2. Horizontal and vertical scaling are linear in the screen size.
//! 3. The aspect factor stays inside its clamp bounds.
//! 4. Scaling and overrides preserve the tree's shape and key order.
//! 5. With every setting off, the override pass is the identity.

use proptest::prelude::*;
use stylekit_core::{
    AccessibilityKind, AccessibilitySettings, ColorScheme, CssColorResolver, Platform,
    ScreenDimensions,
};
use stylekit_style::{
    GrayscaleConverter, ScaleProperties, Scaler, StyleTree, StyleValue, Theme,
    apply_a11y_overrides,
};

// ── Strategies ────────────────────────────────────────────────────────────

fn screen() -> impl Strategy<Value = ScreenDimensions> {
    (200.0f64..2000.0, 200.0f64..3000.0).prop_map(|(w, h)| ScreenDimensions::new(w, h))
}

fn style_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("width".to_owned()),
        Just("height".to_owned()),
        Just("margin".to_owned()),
        Just("fontSize".to_owned()),
        Just("opacity".to_owned()),
        Just("color".to_owned()),
        Just("backgroundColor".to_owned()),
        Just("fontWeight".to_owned()),
        Just("animationDuration".to_owned()),
        "[a-z]{1,8}",
    ]
}

fn leaf() -> impl Strategy<Value = StyleValue> {
    prop_oneof![
        (-50.0f64..500.0).prop_map(StyleValue::Number),
        prop_oneof![
            Just("#FFFFFF".to_owned()),
            Just("rgba(10, 20, 30, 0.5)".to_owned()),
            Just("bold".to_owned()),
            Just("transparent".to_owned()),
        ]
        .prop_map(StyleValue::Text),
    ]
}

fn tree() -> impl Strategy<Value = StyleTree> {
    let flat = prop::collection::vec((style_key(), leaf()), 0..6)
        .prop_map(|entries| entries.into_iter().collect::<StyleTree>());
    flat.prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec((style_key(), inner.prop_map(StyleValue::Tree)), 0..4)
            .prop_map(|entries| entries.into_iter().collect::<StyleTree>())
    })
}

fn same_shape(a: &StyleTree, b: &StyleTree) -> bool {
    a.len() == b.len()
        && a.iter().zip(b.iter()).all(|((ka, va), (kb, vb))| {
            ka == kb
                && match (va, vb) {
                    (StyleValue::Tree(ta), StyleValue::Tree(tb)) => same_shape(ta, tb),
                    (StyleValue::Tree(_), _) | (_, StyleValue::Tree(_)) => false,
                    _ => true,
                }
        })
}

// ═══════════════════════════════════════════════════════════════════════════
// 1–3. Scaler arithmetic
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn small_values_are_identity(
        key in style_key(),
        value in -100.0f64..=1.0,
        screen in screen(),
        font_scale in 0.5f64..3.0,
    ) {
        let props = ScaleProperties::default();
        let scaler = Scaler::new(screen, font_scale, &props);
        prop_assert_eq!(scaler.scale_value(&key, value), value);
    }

    #[test]
    fn horizontal_is_linear_in_width(size in 0.0f64..1000.0, screen in screen()) {
        let props = ScaleProperties::default();
        let scaler = Scaler::new(screen, 1.0, &props);
        let expected = screen.width / 375.0 * size;
        prop_assert!((scaler.horizontal(size, None) - expected).abs() < 1e-9);
        let doubled = scaler.horizontal(size, Some(screen.width * 2.0));
        prop_assert!((doubled - 2.0 * expected).abs() < 1e-6);
    }

    #[test]
    fn vertical_is_linear_in_height(size in 0.0f64..1000.0, screen in screen()) {
        let props = ScaleProperties::default();
        let scaler = Scaler::new(screen, 1.0, &props);
        prop_assert!((scaler.vertical(size, None) - screen.height / 812.0 * size).abs() < 1e-9);
    }

    #[test]
    fn aspect_factor_is_clamped(size in 1.0f64..1000.0, screen in screen()) {
        let props = ScaleProperties::default();
        let factor = Scaler::new(screen, 1.0, &props).aspect(size) / size;
        prop_assert!((0.85 - 1e-12..=1.15 + 1e-12).contains(&factor));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 4–5. Tree passes
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scaling_preserves_shape(input in tree(), screen in screen()) {
        let props = ScaleProperties::default();
        let out = Scaler::new(screen, 1.2, &props).scale_style(&input);
        prop_assert!(same_shape(&input, &out));
    }

    #[test]
    fn overrides_preserve_shape(input in tree(), dark in any::<bool>()) {
        let scheme = if dark { ColorScheme::Dark } else { ColorScheme::Light };
        let settings = AccessibilityKind::ALL
            .iter()
            .fold(AccessibilitySettings::default(), |s, k| s.with(*k, Some(true)));
        let theme = Theme::default_light();
        let mut conv = GrayscaleConverter::new(scheme, &theme, Platform::Ios, &CssColorResolver);
        let out = apply_a11y_overrides(&input, &settings, &mut conv);
        prop_assert!(same_shape(&input, &out));
    }

    #[test]
    fn disabled_settings_are_identity(input in tree()) {
        let theme = Theme::default_light();
        let mut conv =
            GrayscaleConverter::new(ColorScheme::Light, &theme, Platform::Ios, &CssColorResolver);
        let out = apply_a11y_overrides(&input, &AccessibilitySettings::default(), &mut conv);
        prop_assert_eq!(out, input);
    }
}
