//! Language selection screen state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

use super::state::Transition;

/// Languages the assistant supports, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Hindi,
    Nepali,
    Marathi,
    Tamil,
    Telugu,
    Malayalam,
}

impl Language {
    /// Every supported language, in the order the screen lists them.
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Hindi,
        Language::Nepali,
        Language::Marathi,
        Language::Tamil,
        Language::Telugu,
        Language::Malayalam,
    ];

    pub fn english_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Nepali => "Nepali",
            Self::Marathi => "Marathi",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
            Self::Malayalam => "Malayalam",
        }
    }

    /// The label shown in the list, in the language's own script.
    pub fn native_label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिन्दी",
            Self::Nepali => "नेपाली",
            Self::Marathi => "मराठी",
            Self::Tamil => "தமிழ்",
            Self::Telugu => "తెలుగు",
            Self::Malayalam => "മലയാളം",
        }
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Nepali => "ne",
            Self::Marathi => "mr",
            Self::Tamil => "ta",
            Self::Telugu => "te",
            Self::Malayalam => "ml",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Nepali => "nepali",
            Self::Marathi => "marathi",
            Self::Tamil => "tamil",
            Self::Telugu => "telugu",
            Self::Malayalam => "malayalam",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Language {
    type Err = OnboardingError;

    /// Accepts the English name (any case), the native label, or the code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.english_name().eq_ignore_ascii_case(needle)
                    || lang.code().eq_ignore_ascii_case(needle)
                    || lang.native_label() == needle
            })
            .ok_or_else(|| OnboardingError::invalid("language", s))
    }
}

/// One row of the single-choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub language: Language,
    pub label: String,
    pub selected: bool,
}

/// State of the mounted Language Selection screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSelectionState {
    selected_language: Language,
}

impl LanguageSelectionState {
    pub const PROMPT: &'static str = "Choose your preferred language";

    pub fn selected_language(&self) -> Language {
        self.selected_language
    }

    pub fn select(&mut self, language: Language) {
        tracing::debug!(%language, "Language selected");
        self.selected_language = language;
    }

    /// Select by a user-supplied label. Rejects anything outside the fixed set.
    pub fn select_label(&mut self, label: &str) -> Result<(), OnboardingError> {
        let language = label.parse()?;
        self.select(language);
        Ok(())
    }

    /// The fixed list with exactly one row marked selected.
    pub fn options(&self) -> Vec<LanguageOption> {
        Language::ALL
            .into_iter()
            .map(|language| LanguageOption {
                language,
                label: language.native_label().to_string(),
                selected: language == self.selected_language,
            })
            .collect()
    }

    /// "Continue" pressed.
    pub fn confirm(&self) -> Transition {
        Transition::ToVoicePreferences
    }
}
