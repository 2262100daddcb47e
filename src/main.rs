use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use form_assist::cli::{CliHooks, Command, HELP, parse_command, render_text};
use form_assist::config::{HostConfig, PermissionPolicy};
use form_assist::onboarding::{Action, OnboardingFlow};

const SPEED_ELSEWHERE: &str = "Speech speed is set on the Voice Preferences screen.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the setup summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = HostConfig::from_env().context("Failed to read host configuration")?;

    eprintln!("🎙️  Form Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Microphone permission: {:?}", config.mic_permission);
    eprintln!("   Type `help` for commands.\n");

    let hooks = CliHooks::new();
    let mut flow = OnboardingFlow::new(Box::new(hooks.clone()));
    flow.subscribe(|view| eprintln!("\n{}\n", render_text(view)));

    eprintln!("{}\n", render_text(&flow.render()));
    eprint!("> ");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        if line.trim().is_empty() {
            eprint!("> ");
            continue;
        }

        let action = match parse_command(&line) {
            Ok(Command::Flow(action)) => action,
            Ok(Command::Faster) => match nudge_speed(&flow, config.speed_step) {
                Some(action) => action,
                None => {
                    eprintln!("{SPEED_ELSEWHERE}");
                    eprint!("> ");
                    continue;
                }
            },
            Ok(Command::Slower) => match nudge_speed(&flow, -config.speed_step) {
                Some(action) => action,
                None => {
                    eprintln!("{SPEED_ELSEWHERE}");
                    eprint!("> ");
                    continue;
                }
            },
            Ok(Command::Show) => {
                eprintln!("\n{}\n", render_text(&flow.render()));
                eprint!("> ");
                continue;
            }
            Ok(Command::Help) => {
                eprintln!("{HELP}");
                eprint!("> ");
                continue;
            }
            Ok(Command::Quit) => break,
            Err(e) => {
                eprintln!("{e}");
                eprint!("> ");
                continue;
            }
        };

        if !flow.dispatch(action) {
            eprintln!("Nothing to do on the {} screen.", flow.current_screen());
        }

        if hooks.take_permission_request() {
            let granted = config.mic_permission == PermissionPolicy::Granted;
            tracing::info!(granted, "Microphone permission resolved");
            flow.dispatch(Action::ToggleMicrophone(granted));
        }

        if let Some(summary) = hooks.take_summary() {
            let json = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize setup summary")?;
            println!("{json}");
            break;
        }

        eprint!("> ");
    }

    Ok(())
}

/// `faster` / `slower`: move the slider by `delta` from where it is now.
fn nudge_speed(flow: &OnboardingFlow, delta: f32) -> Option<Action> {
    flow.voice_preferences()
        .map(|prefs| Action::SetSpeechSpeed(prefs.speech_speed() + delta))
}
