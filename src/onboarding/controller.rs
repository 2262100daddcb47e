//! OnboardingFlow, the navigation controller.
//!
//! Owns the mounted screen and its state, routes user actions to it, applies
//! the transitions screens ask for, and tells render listeners about every
//! change. Leaving a screen drops its state; arriving mounts a fresh default.

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::OnboardingError;

use super::hooks::{NoopHooks, OnboardingHooks};
use super::language::{Language, LanguageSelectionState};
use super::state::{Screen, Transition};
use super::view::{ScreenView, SubscriptionId, Subscribers};
use super::voice::{VoiceGender, VoicePreferencesState};

/// A discrete user action on one of the screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Language Selection
    SelectLanguage(Language),
    Confirm,
    // Voice Preferences
    ToggleMicrophone(bool),
    ToggleReadAloud(bool),
    SetVoiceGender(VoiceGender),
    SetSpeechSpeed(f32),
    RequestMicrophonePermission,
    Back,
    Finish,
}

impl Action {
    /// The screen this action belongs to.
    pub fn screen(&self) -> Screen {
        match self {
            Self::SelectLanguage(_) | Self::Confirm => Screen::LanguageSelection,
            _ => Screen::VoicePreferences,
        }
    }
}

/// The mounted screen together with the state it owns.
#[derive(Debug, Clone)]
enum Mounted {
    LanguageSelection(LanguageSelectionState),
    VoicePreferences(VoicePreferencesState),
}

impl Mounted {
    fn fresh(screen: Screen) -> Self {
        match screen {
            Screen::LanguageSelection => Self::LanguageSelection(LanguageSelectionState::default()),
            Screen::VoicePreferences => Self::VoicePreferences(VoicePreferencesState::default()),
        }
    }

    fn screen(&self) -> Screen {
        match self {
            Self::LanguageSelection(_) => Screen::LanguageSelection,
            Self::VoicePreferences(_) => Screen::VoicePreferences,
        }
    }
}

/// Drives the two-screen onboarding flow.
pub struct OnboardingFlow {
    session_id: Uuid,
    mounted: Mounted,
    /// Language that was selected when "Continue" was last pressed. Only the
    /// finish hook reads it; a remounted language screen starts from default.
    confirmed_language: Option<LanguageSelectionState>,
    finished: bool,
    hooks: Box<dyn OnboardingHooks>,
    subscribers: Subscribers,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new(Box::new(NoopHooks))
    }
}

impl OnboardingFlow {
    pub fn new(hooks: Box<dyn OnboardingHooks>) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session = %session_id, "Onboarding flow created");
        Self {
            session_id,
            mounted: Mounted::fresh(Screen::default()),
            confirmed_language: None,
            finished: false,
            hooks,
            subscribers: Subscribers::default(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_screen(&self) -> Screen {
        self.mounted.screen()
    }

    /// State of the Language Selection screen, if it is mounted.
    pub fn language_selection(&self) -> Option<&LanguageSelectionState> {
        match &self.mounted {
            Mounted::LanguageSelection(state) => Some(state),
            Mounted::VoicePreferences(_) => None,
        }
    }

    /// State of the Voice Preferences screen, if it is mounted.
    pub fn voice_preferences(&self) -> Option<&VoicePreferencesState> {
        match &self.mounted {
            Mounted::VoicePreferences(state) => Some(state),
            Mounted::LanguageSelection(_) => None,
        }
    }

    pub fn confirmed_language(&self) -> Option<Language> {
        self.confirmed_language
            .as_ref()
            .map(LanguageSelectionState::selected_language)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Snapshot of the active screen.
    pub fn render(&self) -> ScreenView {
        match &self.mounted {
            Mounted::LanguageSelection(state) => ScreenView::language_selection(state),
            Mounted::VoicePreferences(state) => ScreenView::voice_preferences(state),
        }
    }

    /// Register a render listener. It is called synchronously after every
    /// applied action or transition.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ScreenView) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// LanguageSelection → VoicePreferences. No-op from any other screen.
    pub fn go_to_voice_preferences(&mut self) -> bool {
        self.navigate(Screen::VoicePreferences)
    }

    /// VoicePreferences → LanguageSelection. No-op from any other screen.
    pub fn go_to_language_selection(&mut self) -> bool {
        self.navigate(Screen::LanguageSelection)
    }

    /// Route a user action to the mounted screen.
    ///
    /// Returns `true` if the action was applied and `false` if it was
    /// ignored: it targets a screen that is not mounted, it is a repeated
    /// finish, or it carries a NaN speed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if action.screen() != self.current_screen() {
            debug!(
                session = %self.session_id,
                ?action,
                screen = %self.current_screen(),
                "Ignoring action for unmounted screen"
            );
            return false;
        }

        let applied = match (&mut self.mounted, action) {
            (Mounted::LanguageSelection(state), Action::SelectLanguage(language)) => {
                state.select(language);
                true
            }
            (Mounted::LanguageSelection(state), Action::Confirm) => {
                let transition = state.confirm();
                self.confirmed_language = Some(state.clone());
                return self.apply(transition);
            }
            (Mounted::VoicePreferences(state), Action::ToggleMicrophone(value)) => {
                state.toggle_microphone(value);
                true
            }
            (Mounted::VoicePreferences(state), Action::ToggleReadAloud(value)) => {
                state.toggle_read_aloud(value);
                true
            }
            (Mounted::VoicePreferences(state), Action::SetVoiceGender(value)) => {
                state.set_voice_gender(value);
                true
            }
            (Mounted::VoicePreferences(state), Action::SetSpeechSpeed(value)) => {
                state.set_speech_speed(value)
            }
            (Mounted::VoicePreferences(_), Action::RequestMicrophonePermission) => {
                info!(session = %self.session_id, "Microphone permission requested");
                self.hooks.on_request_microphone_permission();
                // No state changes, so listeners are not notified.
                return true;
            }
            (Mounted::VoicePreferences(state), Action::Back) => {
                let transition = state.back();
                return self.apply(transition);
            }
            (Mounted::VoicePreferences(_), Action::Finish) => return self.finish(),
            (_, action) => {
                debug!(session = %self.session_id, ?action, "Action not handled");
                false
            }
        };

        if applied {
            self.notify();
        }
        applied
    }

    /// Select a language by user-supplied label.
    pub fn select_language_label(&mut self, label: &str) -> Result<bool, OnboardingError> {
        let language: Language = label.parse()?;
        Ok(self.dispatch(Action::SelectLanguage(language)))
    }

    fn apply(&mut self, transition: Transition) -> bool {
        self.navigate(transition.target())
    }

    fn navigate(&mut self, target: Screen) -> bool {
        let from = self.current_screen();
        if !from.can_transition_to(target) {
            debug!(
                session = %self.session_id,
                %from,
                to = %target,
                "Ignoring invalid screen transition"
            );
            return false;
        }

        self.mounted = Mounted::fresh(target);
        info!(session = %self.session_id, %from, to = %target, "Screen transition");
        self.notify();
        true
    }

    fn finish(&mut self) -> bool {
        if self.finished {
            debug!(session = %self.session_id, "Finish already handled");
            return false;
        }
        let Mounted::VoicePreferences(preferences) = &self.mounted else {
            return false;
        };
        let language = self.confirmed_language.clone().unwrap_or_default();

        info!(
            session = %self.session_id,
            language = %language.selected_language(),
            "Onboarding setup finished"
        );
        self.hooks.on_finish_setup(&language, preferences);
        self.finished = true;
        true
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let view = self.render();
        self.subscribers.notify(&view);
    }
}

impl std::fmt::Debug for OnboardingFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingFlow")
            .field("session_id", &self.session_id)
            .field("mounted", &self.mounted)
            .field("confirmed_language", &self.confirmed_language)
            .field("finished", &self.finished)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Calls {
        permission_requests: u32,
        finished: Vec<(Language, VoicePreferencesState)>,
    }

    struct RecordingHooks(Rc<RefCell<Calls>>);

    impl OnboardingHooks for RecordingHooks {
        fn on_request_microphone_permission(&mut self) {
            self.0.borrow_mut().permission_requests += 1;
        }

        fn on_finish_setup(
            &mut self,
            language: &LanguageSelectionState,
            preferences: &VoicePreferencesState,
        ) {
            self.0
                .borrow_mut()
                .finished
                .push((language.selected_language(), preferences.clone()));
        }
    }

    fn recording_flow() -> (OnboardingFlow, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let flow = OnboardingFlow::new(Box::new(RecordingHooks(Rc::clone(&calls))));
        (flow, calls)
    }

    #[test]
    fn starts_on_language_selection() {
        let flow = OnboardingFlow::default();
        assert_eq!(flow.current_screen(), Screen::LanguageSelection);
        assert_eq!(
            flow.language_selection().unwrap().selected_language(),
            Language::English
        );
        assert!(flow.voice_preferences().is_none());
        assert!(!flow.is_finished());
    }

    #[test]
    fn transitions_from_wrong_screen_are_noops() {
        let mut flow = OnboardingFlow::default();
        assert!(!flow.go_to_language_selection());
        assert_eq!(flow.current_screen(), Screen::LanguageSelection);

        assert!(flow.go_to_voice_preferences());
        assert!(!flow.go_to_voice_preferences());
        assert_eq!(flow.current_screen(), Screen::VoicePreferences);
    }

    #[test]
    fn round_trip_remounts_fresh_state() {
        let mut flow = OnboardingFlow::default();
        flow.dispatch(Action::SelectLanguage(Language::Telugu));
        assert!(flow.dispatch(Action::Confirm));

        flow.dispatch(Action::SetSpeechSpeed(0.9));
        flow.dispatch(Action::ToggleReadAloud(false));
        assert!(flow.dispatch(Action::Back));

        assert_eq!(flow.current_screen(), Screen::LanguageSelection);
        assert_eq!(
            flow.language_selection().unwrap().selected_language(),
            Language::English,
            "Selection must not be carried back"
        );

        assert!(flow.go_to_voice_preferences());
        assert_eq!(
            flow.voice_preferences().unwrap(),
            &VoicePreferencesState::default(),
            "Preferences must not survive leaving the screen"
        );
    }

    #[test]
    fn actions_for_unmounted_screen_are_ignored() {
        let mut flow = OnboardingFlow::default();
        assert!(!flow.dispatch(Action::ToggleMicrophone(false)));
        assert!(!flow.dispatch(Action::Back));
        assert!(!flow.dispatch(Action::Finish));
        assert_eq!(flow.current_screen(), Screen::LanguageSelection);

        flow.go_to_voice_preferences();
        assert!(!flow.dispatch(Action::SelectLanguage(Language::Hindi)));
        assert!(!flow.dispatch(Action::Confirm));
        assert_eq!(flow.current_screen(), Screen::VoicePreferences);
    }

    #[test]
    fn select_language_label_validates() {
        let mut flow = OnboardingFlow::default();
        assert!(flow.select_language_label("Nepali").unwrap());
        assert_eq!(
            flow.language_selection().unwrap().selected_language(),
            Language::Nepali
        );

        let err = flow.select_language_label("Esperanto").unwrap_err();
        assert!(matches!(err, OnboardingError::InvalidArgument { .. }));
        assert_eq!(
            flow.language_selection().unwrap().selected_language(),
            Language::Nepali
        );
    }

    #[test]
    fn permission_request_calls_hook_without_state_change() {
        let (mut flow, calls) = recording_flow();
        flow.go_to_voice_preferences();
        let before = flow.voice_preferences().unwrap().clone();

        assert!(flow.dispatch(Action::RequestMicrophonePermission));
        assert_eq!(calls.borrow().permission_requests, 1);
        assert_eq!(flow.voice_preferences().unwrap(), &before);
    }

    #[test]
    fn finish_hands_confirmed_language_and_preferences_once() {
        let (mut flow, calls) = recording_flow();
        flow.dispatch(Action::SelectLanguage(Language::Marathi));
        flow.dispatch(Action::Confirm);
        assert_eq!(flow.confirmed_language(), Some(Language::Marathi));

        flow.dispatch(Action::SetVoiceGender(VoiceGender::Female));
        flow.dispatch(Action::SetSpeechSpeed(0.3));

        assert!(flow.dispatch(Action::Finish));
        assert!(!flow.dispatch(Action::Finish));
        assert!(flow.is_finished());
        assert_eq!(
            flow.current_screen(),
            Screen::VoicePreferences,
            "Finish has no transition target"
        );

        let calls = calls.borrow();
        assert_eq!(calls.finished.len(), 1);
        let (language, prefs) = &calls.finished[0];
        assert_eq!(*language, Language::Marathi);
        assert_eq!(prefs.voice_gender(), VoiceGender::Female);
        assert_eq!(prefs.speech_speed(), 0.3);
    }

    #[test]
    fn listeners_see_every_change() {
        let mut flow = OnboardingFlow::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = flow.subscribe(move |view| sink.borrow_mut().push(view.clone()));

        flow.dispatch(Action::SelectLanguage(Language::Tamil));
        flow.dispatch(Action::Confirm);
        flow.dispatch(Action::SetSpeechSpeed(5.0));
        flow.dispatch(Action::RequestMicrophonePermission);

        {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 3);
            assert!(matches!(
                seen[0],
                ScreenView::LanguageSelection {
                    selected: Language::Tamil,
                    ..
                }
            ));
            assert_eq!(seen[1].screen(), Screen::VoicePreferences);
            assert_eq!(seen[2], flow.render());
        }

        assert!(flow.unsubscribe(id));
        flow.dispatch(Action::Back);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn nan_speed_is_not_applied() {
        let mut flow = OnboardingFlow::default();
        flow.go_to_voice_preferences();
        assert!(!flow.dispatch(Action::SetSpeechSpeed(f32::NAN)));
        assert_eq!(flow.voice_preferences().unwrap().speech_speed(), 0.5);
    }
}
