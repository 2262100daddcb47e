//! Onboarding flow: language selection, then voice preferences.
//!
//! `OnboardingFlow` is the navigation controller. Each screen owns a small
//! state bundle that lives only while the screen is mounted. Hosts draw from
//! `ScreenView` snapshots and plug permission and finish handling in through
//! `OnboardingHooks`.

pub mod controller;
pub mod hooks;
pub mod language;
pub mod state;
pub mod view;
pub mod voice;

pub use controller::{Action, OnboardingFlow};
pub use hooks::{NoopHooks, OnboardingHooks};
pub use language::{Language, LanguageOption, LanguageSelectionState};
pub use state::{Screen, Transition};
pub use view::{ScreenView, SubscriptionId};
pub use voice::{SpeedLabel, VoiceGender, VoicePreferencesState};
