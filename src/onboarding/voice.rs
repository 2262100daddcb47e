//! Voice preferences screen state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

use super::state::Transition;

/// Lower and upper bounds of the speech speed slider.
pub const MIN_SPEECH_SPEED: f32 = 0.0;
pub const MAX_SPEECH_SPEED: f32 = 1.0;
pub const DEFAULT_SPEECH_SPEED: f32 = 0.5;

/// Below this the label reads "Slow".
const SLOW_BELOW: f32 = 0.4;
/// Above this the label reads "Fast".
const FAST_ABOVE: f32 = 0.7;

/// Voice used when reading responses aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGender {
    Male,
    Female,
}

impl Default for VoiceGender {
    fn default() -> Self {
        Self::Male
    }
}

impl std::fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl FromStr for VoiceGender {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(OnboardingError::invalid("voice_gender", s)),
        }
    }
}

/// Text shown next to the speech speed slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedLabel {
    Slow,
    Normal,
    Fast,
}

impl SpeedLabel {
    pub fn for_speed(speed: f32) -> Self {
        if speed < SLOW_BELOW {
            Self::Slow
        } else if speed > FAST_ABOVE {
            Self::Fast
        } else {
            Self::Normal
        }
    }
}

impl std::fmt::Display for SpeedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        };
        write!(f, "{s}")
    }
}

/// State of the mounted Voice Preferences screen.
///
/// Fields are private so `speech_speed` can only be written through the
/// clamping setter. Deserialization goes through the same setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VoicePreferencesRecord")]
pub struct VoicePreferencesState {
    use_microphone: bool,
    read_aloud: bool,
    voice_gender: VoiceGender,
    speech_speed: f32,
}

impl Default for VoicePreferencesState {
    fn default() -> Self {
        Self {
            use_microphone: true,
            read_aloud: true,
            voice_gender: VoiceGender::default(),
            speech_speed: DEFAULT_SPEECH_SPEED,
        }
    }
}

/// Wire shape of `VoicePreferencesState`, before the speed is clamped.
#[derive(Deserialize)]
struct VoicePreferencesRecord {
    use_microphone: bool,
    read_aloud: bool,
    voice_gender: VoiceGender,
    speech_speed: f32,
}

impl From<VoicePreferencesRecord> for VoicePreferencesState {
    fn from(record: VoicePreferencesRecord) -> Self {
        let mut state = Self {
            use_microphone: record.use_microphone,
            read_aloud: record.read_aloud,
            voice_gender: record.voice_gender,
            ..Self::default()
        };
        state.set_speech_speed(record.speech_speed);
        state
    }
}

impl VoicePreferencesState {
    pub const MICROPHONE_LABEL: &'static str = "Use microphone";
    pub const MICROPHONE_DESCRIPTION: &'static str = "Speak to fill out your forms";
    pub const READ_ALOUD_LABEL: &'static str = "Read responses aloud";
    pub const READ_ALOUD_DESCRIPTION: &'static str = "Assistant will speak back to you";

    pub fn use_microphone(&self) -> bool {
        self.use_microphone
    }

    pub fn read_aloud(&self) -> bool {
        self.read_aloud
    }

    pub fn voice_gender(&self) -> VoiceGender {
        self.voice_gender
    }

    pub fn speech_speed(&self) -> f32 {
        self.speech_speed
    }

    pub fn speed_label(&self) -> SpeedLabel {
        SpeedLabel::for_speed(self.speech_speed)
    }

    pub fn toggle_microphone(&mut self, value: bool) {
        tracing::debug!(value, "Use microphone toggled");
        self.use_microphone = value;
    }

    pub fn toggle_read_aloud(&mut self, value: bool) {
        tracing::debug!(value, "Read aloud toggled");
        self.read_aloud = value;
    }

    pub fn set_voice_gender(&mut self, value: VoiceGender) {
        tracing::debug!(%value, "Voice gender set");
        self.voice_gender = value;
    }

    /// Store `value` clamped to `[0.0, 1.0]`. Returns whether the value was
    /// stored; NaN is dropped and the previous speed kept.
    pub fn set_speech_speed(&mut self, value: f32) -> bool {
        if value.is_nan() {
            tracing::warn!("Ignoring NaN speech speed");
            return false;
        }
        // `+ 0.0` turns -0.0 into 0.0
        self.speech_speed = value.clamp(MIN_SPEECH_SPEED, MAX_SPEECH_SPEED) + 0.0;
        tracing::debug!(requested = value, stored = self.speech_speed, "Speech speed set");
        true
    }

    /// Back arrow pressed. Nothing on this screen is kept.
    pub fn back(&self) -> Transition {
        Transition::ToLanguageSelection
    }
}
