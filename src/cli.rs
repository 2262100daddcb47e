//! Terminal host: line commands, text rendering and the hooks the
//! `form-assist` binary plugs into the onboarding flow.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::OnboardingError;
use crate::onboarding::{
    Action, Language, LanguageSelectionState, OnboardingHooks, ScreenView, VoiceGender,
    VoicePreferencesState,
};

pub const HELP: &str = "\
Commands:
  select <language>     pick a language (name, native label or code)
  continue              go to voice preferences
  mic on|off            use microphone
  read on|off           read responses aloud
  gender male|female    voice gender
  speed <0.0-1.0>       speech speed
  faster | slower       nudge speech speed
  allow-mic             request microphone access
  back                  return to language selection
  finish                finish setup
  show | help | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Flow(Action),
    Faster,
    Slower,
    Show,
    Help,
    Quit,
}

/// Parse a command line. Unknown commands and bad arguments are
/// `InvalidArgument`.
pub fn parse_command(line: &str) -> Result<Command, OnboardingError> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "select" => Command::Flow(Action::SelectLanguage(arg.parse::<Language>()?)),
        "continue" => Command::Flow(Action::Confirm),
        "mic" => Command::Flow(Action::ToggleMicrophone(parse_switch("use_microphone", arg)?)),
        "read" => Command::Flow(Action::ToggleReadAloud(parse_switch("read_aloud", arg)?)),
        "gender" => Command::Flow(Action::SetVoiceGender(arg.parse::<VoiceGender>()?)),
        "speed" => {
            let value = arg
                .parse::<f32>()
                .ok()
                .filter(|v| !v.is_nan())
                .ok_or_else(|| OnboardingError::invalid("speech_speed", arg))?;
            Command::Flow(Action::SetSpeechSpeed(value))
        }
        "faster" => Command::Faster,
        "slower" => Command::Slower,
        "allow-mic" => Command::Flow(Action::RequestMicrophonePermission),
        "back" => Command::Flow(Action::Back),
        "finish" => Command::Flow(Action::Finish),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "/quit" => Command::Quit,
        _ => return Err(OnboardingError::invalid("command", line)),
    };
    Ok(command)
}

fn parse_switch(field: &str, arg: &str) -> Result<bool, OnboardingError> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(OnboardingError::invalid(field, arg)),
    }
}

/// Plain-text rendering of a screen.
pub fn render_text(view: &ScreenView) -> String {
    let mut lines = Vec::new();
    match view {
        ScreenView::LanguageSelection {
            title,
            prompt,
            options,
            ..
        } => {
            lines.push(format!("── {title} ──"));
            lines.push((*prompt).to_string());
            for option in options {
                let mark = if option.selected { "(•)" } else { "( )" };
                lines.push(format!(
                    "  {mark} {} [{}]",
                    option.label,
                    option.language.code()
                ));
            }
            lines.push("  [Continue]".to_string());
        }
        ScreenView::VoicePreferences {
            title,
            use_microphone,
            read_aloud,
            voice_gender,
            speech_speed,
            speed_label,
        } => {
            let switch = |on: &bool| if *on { "on" } else { "off" };
            lines.push(format!("← {title}"));
            lines.push("  [Allow Microphone Access]".to_string());
            lines.push(format!(
                "  {}: {} ({})",
                VoicePreferencesState::MICROPHONE_LABEL,
                switch(use_microphone),
                VoicePreferencesState::MICROPHONE_DESCRIPTION
            ));
            lines.push(format!(
                "  {}: {} ({})",
                VoicePreferencesState::READ_ALOUD_LABEL,
                switch(read_aloud),
                VoicePreferencesState::READ_ALOUD_DESCRIPTION
            ));
            let (male, female) = match voice_gender {
                VoiceGender::Male => ("[Male]", " Female "),
                VoiceGender::Female => (" Male ", "[Female]"),
            };
            lines.push(format!("  Voice Gender: {male} {female}"));
            lines.push(format!(
                "  Speech Speed: {speed_label} ({speech_speed:.2})"
            ));
            lines.push("  [Finish Setup]".to_string());
        }
    }
    lines.join("\n")
}

/// What the host prints once setup is finished.
#[derive(Debug, Clone, Serialize)]
pub struct SetupSummary {
    pub language: Language,
    pub language_label: String,
    pub preferences: VoicePreferencesState,
    pub completed_at: DateTime<Utc>,
}

impl SetupSummary {
    pub fn new(language: &LanguageSelectionState, preferences: &VoicePreferencesState) -> Self {
        let selected = language.selected_language();
        Self {
            language: selected,
            language_label: selected.native_label().to_string(),
            preferences: preferences.clone(),
            completed_at: Utc::now(),
        }
    }
}

/// Hooks for the terminal host. They only record; the REPL acts on what
/// was recorded once `dispatch` returns.
#[derive(Debug, Clone, Default)]
pub struct CliHooks {
    permission_requested: Rc<Cell<bool>>,
    summary: Rc<RefCell<Option<SetupSummary>>>,
}

impl CliHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the pending permission request flag.
    pub fn take_permission_request(&self) -> bool {
        self.permission_requested.replace(false)
    }

    pub fn take_summary(&self) -> Option<SetupSummary> {
        self.summary.borrow_mut().take()
    }
}

impl OnboardingHooks for CliHooks {
    fn on_request_microphone_permission(&mut self) {
        self.permission_requested.set(true);
    }

    fn on_finish_setup(
        &mut self,
        language: &LanguageSelectionState,
        preferences: &VoicePreferencesState,
    ) {
        *self.summary.borrow_mut() = Some(SetupSummary::new(language, preferences));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::OnboardingFlow;

    #[test]
    fn parses_flow_commands() {
        assert_eq!(
            parse_command("select Hindi").unwrap(),
            Command::Flow(Action::SelectLanguage(Language::Hindi))
        );
        assert_eq!(
            parse_command("  SELECT   മലയാളം ").unwrap(),
            Command::Flow(Action::SelectLanguage(Language::Malayalam))
        );
        assert_eq!(parse_command("continue").unwrap(), Command::Flow(Action::Confirm));
        assert_eq!(
            parse_command("mic off").unwrap(),
            Command::Flow(Action::ToggleMicrophone(false))
        );
        assert_eq!(
            parse_command("read on").unwrap(),
            Command::Flow(Action::ToggleReadAloud(true))
        );
        assert_eq!(
            parse_command("gender Female").unwrap(),
            Command::Flow(Action::SetVoiceGender(VoiceGender::Female))
        );
        assert_eq!(
            parse_command("speed 1.7").unwrap(),
            Command::Flow(Action::SetSpeechSpeed(1.7))
        );
        assert_eq!(
            parse_command("allow-mic").unwrap(),
            Command::Flow(Action::RequestMicrophonePermission)
        );
        assert_eq!(parse_command("back").unwrap(), Command::Flow(Action::Back));
        assert_eq!(parse_command("finish").unwrap(), Command::Flow(Action::Finish));
    }

    #[test]
    fn parses_host_commands() {
        assert_eq!(parse_command("faster").unwrap(), Command::Faster);
        assert_eq!(parse_command("slower").unwrap(), Command::Slower);
        assert_eq!(parse_command("show").unwrap(), Command::Show);
        assert_eq!(parse_command("?").unwrap(), Command::Help);
        assert_eq!(parse_command("/quit").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_command("select Klingon").unwrap_err(),
            OnboardingError::invalid("language", "Klingon")
        );
        assert_eq!(
            parse_command("gender robot").unwrap_err(),
            OnboardingError::invalid("voice_gender", "robot")
        );
        assert_eq!(
            parse_command("mic maybe").unwrap_err(),
            OnboardingError::invalid("use_microphone", "maybe")
        );
        assert_eq!(
            parse_command("speed quick").unwrap_err(),
            OnboardingError::invalid("speech_speed", "quick")
        );
        assert_eq!(
            parse_command("speed NaN").unwrap_err(),
            OnboardingError::invalid("speech_speed", "NaN")
        );
        assert_eq!(
            parse_command("dance").unwrap_err(),
            OnboardingError::invalid("command", "dance")
        );
    }

    #[test]
    fn renders_language_screen() {
        let text = render_text(&OnboardingFlow::default().render());
        assert!(text.contains("Select Language"));
        assert!(text.contains("Choose your preferred language"));
        assert!(text.contains("(•) English [en]"));
        assert!(text.contains("( ) हिन्दी [hi]"));
        assert!(text.contains("[Continue]"));
    }

    #[test]
    fn renders_voice_screen() {
        let mut prefs = VoicePreferencesState::default();
        prefs.set_voice_gender(VoiceGender::Female);
        prefs.set_speech_speed(0.2);
        prefs.toggle_read_aloud(false);

        let text = render_text(&ScreenView::voice_preferences(&prefs));
        assert!(text.contains("Voice Preferences"));
        assert!(text.contains("Use microphone: on"));
        assert!(text.contains("Read responses aloud: off"));
        assert!(text.contains("[Female]"));
        assert!(text.contains("Speech Speed: Slow (0.20)"));
    }

    #[test]
    fn hooks_record_until_taken() {
        let hooks = CliHooks::new();
        let mut flow = OnboardingFlow::new(Box::new(hooks.clone()));
        flow.dispatch(Action::SelectLanguage(Language::Tamil));
        flow.dispatch(Action::Confirm);

        flow.dispatch(Action::RequestMicrophonePermission);
        assert!(hooks.take_permission_request());
        assert!(!hooks.take_permission_request());

        assert!(hooks.take_summary().is_none());
        flow.dispatch(Action::Finish);
        let summary = hooks.take_summary().unwrap();
        assert_eq!(summary.language, Language::Tamil);
        assert_eq!(summary.language_label, "தமிழ்");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["language"], "tamil");
        assert_eq!(json["preferences"]["use_microphone"], true);
        assert!(json["completed_at"].is_string());
    }
}
