//! Accessibility settings snapshot.
//!
//! Every flag is nullable: `None` means the platform or OS version cannot
//! report it. Consumers treat `None` as disabled and never as an error.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies one accessibility setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccessibilityKind {
    ReduceMotion,
    ReduceTransparency,
    DifferentiateWithoutColor,
    InvertColors,
    ShowButtonShapes,
    BoldText,
    VoiceOver,
    SwitchControl,
    VideoAutoplay,
    ClosedCaptioning,
    PrefersCrossFadeTransitions,
    Grayscale,
    DarkerSystemColors,
    MonoAudio,
    ShakeToUndo,
    SpeakScreen,
    SpeakSelection,
    OnOffSwitchLabels,
}

impl AccessibilityKind {
    pub const ALL: [Self; 18] = [
        Self::ReduceMotion,
        Self::ReduceTransparency,
        Self::DifferentiateWithoutColor,
        Self::InvertColors,
        Self::ShowButtonShapes,
        Self::BoldText,
        Self::VoiceOver,
        Self::SwitchControl,
        Self::VideoAutoplay,
        Self::ClosedCaptioning,
        Self::PrefersCrossFadeTransitions,
        Self::Grayscale,
        Self::DarkerSystemColors,
        Self::MonoAudio,
        Self::ShakeToUndo,
        Self::SpeakScreen,
        Self::SpeakSelection,
        Self::OnOffSwitchLabels,
    ];

    /// Stable name used in logs and host bridges.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReduceMotion => "reduce_motion",
            Self::ReduceTransparency => "reduce_transparency",
            Self::DifferentiateWithoutColor => "differentiate_without_color",
            Self::InvertColors => "invert_colors",
            Self::ShowButtonShapes => "show_button_shapes",
            Self::BoldText => "bold_text",
            Self::VoiceOver => "voice_over",
            Self::SwitchControl => "switch_control",
            Self::VideoAutoplay => "video_autoplay",
            Self::ClosedCaptioning => "closed_captioning",
            Self::PrefersCrossFadeTransitions => "prefers_cross_fade_transitions",
            Self::Grayscale => "grayscale",
            Self::DarkerSystemColors => "darker_system_colors",
            Self::MonoAudio => "mono_audio",
            Self::ShakeToUndo => "shake_to_undo",
            Self::SpeakScreen => "speak_screen",
            Self::SpeakSelection => "speak_selection",
            Self::OnOffSwitchLabels => "on_off_switch_labels",
        }
    }
}

/// Point-in-time accessibility settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AccessibilitySettings {
    pub is_reduce_motion_enabled: Option<bool>,
    pub is_reduce_transparency_enabled: Option<bool>,
    pub is_differentiate_without_color_enabled: Option<bool>,
    pub is_invert_colors_enabled: Option<bool>,
    pub is_show_button_shapes_enabled: Option<bool>,
    pub is_bold_text_enabled: Option<bool>,
    pub is_voice_over_enabled: Option<bool>,
    pub is_switch_control_enabled: Option<bool>,
    pub is_video_autoplay_enabled: Option<bool>,
    pub is_closed_captioning_enabled: Option<bool>,
    pub prefers_cross_fade_transitions: Option<bool>,
    pub is_grayscale_enabled: Option<bool>,
    pub is_darker_system_colors_enabled: Option<bool>,
    pub is_mono_audio_enabled: Option<bool>,
    pub is_shake_to_undo_enabled: Option<bool>,
    pub is_speak_screen_enabled: Option<bool>,
    pub is_speak_selection_enabled: Option<bool>,
    pub is_on_off_switch_labels_enabled: Option<bool>,
}

impl AccessibilitySettings {
    /// All settings unknown.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            is_reduce_motion_enabled: None,
            is_reduce_transparency_enabled: None,
            is_differentiate_without_color_enabled: None,
            is_invert_colors_enabled: None,
            is_show_button_shapes_enabled: None,
            is_bold_text_enabled: None,
            is_voice_over_enabled: None,
            is_switch_control_enabled: None,
            is_video_autoplay_enabled: None,
            is_closed_captioning_enabled: None,
            prefers_cross_fade_transitions: None,
            is_grayscale_enabled: None,
            is_darker_system_colors_enabled: None,
            is_mono_audio_enabled: None,
            is_shake_to_undo_enabled: None,
            is_speak_screen_enabled: None,
            is_speak_selection_enabled: None,
            is_on_off_switch_labels_enabled: None,
        }
    }

    fn slot(&mut self, kind: AccessibilityKind) -> &mut Option<bool> {
        match kind {
            AccessibilityKind::ReduceMotion => &mut self.is_reduce_motion_enabled,
            AccessibilityKind::ReduceTransparency => &mut self.is_reduce_transparency_enabled,
            AccessibilityKind::DifferentiateWithoutColor => {
                &mut self.is_differentiate_without_color_enabled
            }
            AccessibilityKind::InvertColors => &mut self.is_invert_colors_enabled,
            AccessibilityKind::ShowButtonShapes => &mut self.is_show_button_shapes_enabled,
            AccessibilityKind::BoldText => &mut self.is_bold_text_enabled,
            AccessibilityKind::VoiceOver => &mut self.is_voice_over_enabled,
            AccessibilityKind::SwitchControl => &mut self.is_switch_control_enabled,
            AccessibilityKind::VideoAutoplay => &mut self.is_video_autoplay_enabled,
            AccessibilityKind::ClosedCaptioning => &mut self.is_closed_captioning_enabled,
            AccessibilityKind::PrefersCrossFadeTransitions => {
                &mut self.prefers_cross_fade_transitions
            }
            AccessibilityKind::Grayscale => &mut self.is_grayscale_enabled,
            AccessibilityKind::DarkerSystemColors => &mut self.is_darker_system_colors_enabled,
            AccessibilityKind::MonoAudio => &mut self.is_mono_audio_enabled,
            AccessibilityKind::ShakeToUndo => &mut self.is_shake_to_undo_enabled,
            AccessibilityKind::SpeakScreen => &mut self.is_speak_screen_enabled,
            AccessibilityKind::SpeakSelection => &mut self.is_speak_selection_enabled,
            AccessibilityKind::OnOffSwitchLabels => &mut self.is_on_off_switch_labels_enabled,
        }
    }

    /// Raw tri-state value of one setting.
    #[must_use]
    pub fn get(&self, kind: AccessibilityKind) -> Option<bool> {
        let mut copy = *self;
        *copy.slot(kind)
    }

    pub fn set(&mut self, kind: AccessibilityKind, value: Option<bool>) {
        *self.slot(kind) = value;
    }

    #[must_use]
    pub fn with(mut self, kind: AccessibilityKind, value: Option<bool>) -> Self {
        self.set(kind, value);
        self
    }

    /// `true` only when the platform reports the setting as on.
    #[must_use]
    pub fn is_enabled(&self, kind: AccessibilityKind) -> bool {
        self.get(kind).unwrap_or(false)
    }
}

/// Synchronous queries against the host's accessibility module.
pub trait AccessibilityInfo {
    fn all_settings(&self) -> AccessibilitySettings;

    fn setting(&self, kind: AccessibilityKind) -> Option<bool> {
        self.all_settings().get(kind)
    }
}

impl AccessibilityInfo for AccessibilitySettings {
    fn all_settings(&self) -> AccessibilitySettings {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_unknown() {
        let settings = AccessibilitySettings::default();
        assert_eq!(settings, AccessibilitySettings::unknown());
        for kind in AccessibilityKind::ALL {
            assert_eq!(settings.get(kind), None);
            assert!(!settings.is_enabled(kind));
        }
    }

    #[test]
    fn each_kind_maps_to_its_own_field() {
        for kind in AccessibilityKind::ALL {
            let settings = AccessibilitySettings::default().with(kind, Some(true));
            for other in AccessibilityKind::ALL {
                let expected = if other == kind { Some(true) } else { None };
                assert_eq!(settings.get(other), expected, "{} leaked", kind.name());
            }
        }
    }

    #[test]
    fn explicit_false_is_not_enabled() {
        let settings =
            AccessibilitySettings::default().with(AccessibilityKind::Grayscale, Some(false));
        assert_eq!(settings.get(AccessibilityKind::Grayscale), Some(false));
        assert!(!settings.is_enabled(AccessibilityKind::Grayscale));
    }

    #[test]
    fn field_access_matches_kind_access() {
        let settings = AccessibilitySettings {
            is_bold_text_enabled: Some(true),
            ..AccessibilitySettings::default()
        };
        assert!(settings.is_enabled(AccessibilityKind::BoldText));
        assert_eq!(settings.setting(AccessibilityKind::BoldText), Some(true));
    }

    #[test]
    fn kind_names_are_unique() {
        let mut names: Vec<_> = AccessibilityKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AccessibilityKind::ALL.len());
    }
}
