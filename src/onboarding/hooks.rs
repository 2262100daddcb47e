//! Extension points the host application wires up.

use super::language::LanguageSelectionState;
use super::voice::VoicePreferencesState;

/// Callbacks into the host application.
///
/// Both methods default to no-ops. The core never learns the outcome of
/// either call; a host that obtains a permission decision feeds it back
/// through `OnboardingFlow::dispatch` once the hook has returned.
pub trait OnboardingHooks {
    /// "Allow Microphone Access" pressed.
    fn on_request_microphone_permission(&mut self) {}

    /// "Finish Setup" pressed. Called at most once per flow.
    fn on_finish_setup(
        &mut self,
        _language: &LanguageSelectionState,
        _preferences: &VoicePreferencesState,
    ) {
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl OnboardingHooks for NoopHooks {}
