#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stylekit_core::{ColorScheme, CssColorResolver, Platform};
use stylekit_style::{GrayscaleConverter, PropertyContext, Theme, gray_range, parse_color};

#[derive(Debug, Arbitrary)]
struct Entry {
    context: u8,
    color: String,
    packed: Option<u32>,
    font_size: Option<u8>,
}

#[derive(Debug, Arbitrary)]
struct Pass {
    dark: bool,
    android: bool,
    entries: Vec<Entry>,
}

const CONTEXTS: [PropertyContext; 5] = [
    PropertyContext::Foreground,
    PropertyContext::Background,
    PropertyContext::Border,
    PropertyContext::Shadow,
    PropertyContext::Tint,
];

fuzz_target!(|pass: Pass| {
    if pass.entries.len() > 64 {
        return;
    }
    let scheme = if pass.dark { ColorScheme::Dark } else { ColorScheme::Light };
    let platform = if pass.android { Platform::Android } else { Platform::Ios };
    let theme = if pass.dark { Theme::default_dark() } else { Theme::default_light() };
    let mut conv = GrayscaleConverter::new(scheme, &theme, platform, &CssColorResolver);

    for entry in &pass.entries {
        let context = CONTEXTS[usize::from(entry.context) % CONTEXTS.len()];
        let font_size = entry.font_size.map(f64::from);
        let out = match entry.packed {
            Some(packed) => conv.convert_packed(packed, context, font_size),
            None => conv.convert(&entry.color, context, font_size),
        };

        // The tracked background is always a gray.
        let bg = conv.background();
        assert!(bg.r == bg.g && bg.g == bg.b, "background not gray: {bg:?}");

        // Converted output is a gray; non-foreground roles stay in range.
        if out.starts_with("rgb") {
            let gray = parse_color(&out, &CssColorResolver).expect("converter output parses");
            assert!(gray.r == gray.g && gray.g == gray.b, "output not gray: {out}");
            if context != PropertyContext::Foreground {
                assert!(gray_range(scheme, context).contains(gray.r), "{out} out of range");
            }
        }
    }
});
