#![no_main]

use libfuzzer_sys::fuzz_target;
use stylekit_core::ColorScheme;
use stylekit_style::ThemeConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }

    // Parsing and conversion return errors, never panic.
    let Ok(config) = ThemeConfig::from_json(text) else {
        return;
    };
    if let Ok(themes) = config.into_theme_set() {
        let _ = themes.for_scheme(ColorScheme::Light).colors.bg.len();
        let _ = themes.for_scheme(ColorScheme::Dark).colors.fg.len();
    }
});
