//! Render contract: a plain snapshot of the active screen and the
//! listeners that receive it after every change.

use serde::Serialize;

use super::language::{Language, LanguageOption, LanguageSelectionState};
use super::state::Screen;
use super::voice::{SpeedLabel, VoiceGender, VoicePreferencesState};

/// Everything a toolkit needs to draw the active screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    LanguageSelection {
        title: &'static str,
        prompt: &'static str,
        options: Vec<LanguageOption>,
        selected: Language,
    },
    VoicePreferences {
        title: &'static str,
        use_microphone: bool,
        read_aloud: bool,
        voice_gender: VoiceGender,
        speech_speed: f32,
        speed_label: SpeedLabel,
    },
}

impl ScreenView {
    pub fn language_selection(state: &LanguageSelectionState) -> Self {
        Self::LanguageSelection {
            title: Screen::LanguageSelection.title(),
            prompt: LanguageSelectionState::PROMPT,
            options: state.options(),
            selected: state.selected_language(),
        }
    }

    pub fn voice_preferences(state: &VoicePreferencesState) -> Self {
        Self::VoicePreferences {
            title: Screen::VoicePreferences.title(),
            use_microphone: state.use_microphone(),
            read_aloud: state.read_aloud(),
            voice_gender: state.voice_gender(),
            speech_speed: state.speech_speed(),
            speed_label: state.speed_label(),
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            Self::LanguageSelection { .. } => Screen::LanguageSelection,
            Self::VoicePreferences { .. } => Screen::VoicePreferences,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ScreenView)>;

/// Ordered set of render listeners.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ScreenView) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener, in subscription order.
    pub fn notify(&mut self, view: &ScreenView) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(view);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.listeners.len())
            .finish()
    }
}
