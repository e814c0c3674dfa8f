#![no_main]

use libfuzzer_sys::fuzz_target;
use stylekit_core::CssColorResolver;
use stylekit_style::{contrast_ratio, gray_level, parse_color};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 256 {
        return;
    }

    // parse_color must never panic.
    let Some(info) = parse_color(text, &CssColorResolver) else {
        return;
    };

    assert!(info.alpha() >= 0.0, "negative alpha from {text:?}");

    // Display output must parse back to the same channels.
    let rendered = info.to_string();
    let reparsed = parse_color(&rendered, &CssColorResolver).expect("rendered color parses");
    assert_eq!((reparsed.r, reparsed.g, reparsed.b), (info.r, info.g, info.b));

    let gray = gray_level(&info);
    assert!(gray >= info.r.min(info.g).min(info.b));
    let ratio = contrast_ratio(&info, &reparsed);
    assert!((ratio - 1.0).abs() < 1e-9, "self contrast must be 1, got {ratio}");
});
