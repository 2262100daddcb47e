//! Navigation state: which onboarding screen is active.

use serde::{Deserialize, Serialize};

/// The onboarding screens.
///
/// Two screens and two edges: LanguageSelection → VoicePreferences via
/// "Continue", VoicePreferences → LanguageSelection via the back arrow.
/// Neither screen is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    LanguageSelection,
    VoicePreferences,
}

impl Screen {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            (LanguageSelection, VoicePreferences) | (VoicePreferences, LanguageSelection)
        )
    }

    /// Title shown in the screen's top bar.
    pub fn title(&self) -> &'static str {
        match self {
            Self::LanguageSelection => "Select Language",
            Self::VoicePreferences => "Voice Preferences",
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::LanguageSelection
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::LanguageSelection => "language_selection",
            Self::VoicePreferences => "voice_preferences",
        };
        write!(f, "{s}")
    }
}

/// A navigation request returned by a screen's terminal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ToVoicePreferences,
    ToLanguageSelection,
}

impl Transition {
    pub fn target(&self) -> Screen {
        match self {
            Self::ToVoicePreferences => Screen::VoicePreferences,
            Self::ToLanguageSelection => Screen::LanguageSelection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use Screen::*;
        assert!(LanguageSelection.can_transition_to(VoicePreferences));
        assert!(VoicePreferences.can_transition_to(LanguageSelection));
    }

    #[test]
    fn self_transitions_are_invalid() {
        use Screen::*;
        assert!(!LanguageSelection.can_transition_to(LanguageSelection));
        assert!(!VoicePreferences.can_transition_to(VoicePreferences));
    }

    #[test]
    fn default_is_language_selection() {
        assert_eq!(Screen::default(), Screen::LanguageSelection);
    }

    #[test]
    fn transition_targets() {
        assert_eq!(
            Transition::ToVoicePreferences.target(),
            Screen::VoicePreferences
        );
        assert_eq!(
            Transition::ToLanguageSelection.target(),
            Screen::LanguageSelection
        );
    }

    #[test]
    fn display_matches_serde() {
        for screen in [Screen::LanguageSelection, Screen::VoicePreferences] {
            let display = format!("{screen}");
            let json = serde_json::to_string(&screen).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {screen:?}"
            );
        }
    }
}
