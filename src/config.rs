//! Terminal host configuration.
//!
//! The onboarding core reads no configuration; these settings only shape how
//! the bundled host answers the hooks and steps the speed slider.

use crate::error::ConfigError;

/// How the terminal host answers a microphone permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPolicy {
    Granted,
    Denied,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::Granted
    }
}

/// Default step for the `faster` / `slower` commands.
pub const DEFAULT_SPEED_STEP: f32 = 0.1;

/// Host configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub mic_permission: PermissionPolicy,
    pub speed_step: f32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mic_permission: PermissionPolicy::default(),
            speed_step: DEFAULT_SPEED_STEP,
        }
    }
}

impl HostConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mic_permission = match lookup("FORM_ASSIST_MIC_PERMISSION")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("granted") => PermissionPolicy::Granted,
            Some("denied") => PermissionPolicy::Denied,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "FORM_ASSIST_MIC_PERMISSION".to_string(),
                    message: format!("expected \"granted\" or \"denied\", got {other:?}"),
                });
            }
        };

        let speed_step = match lookup("FORM_ASSIST_SPEED_STEP") {
            None => DEFAULT_SPEED_STEP,
            Some(raw) => {
                let step: f32 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "FORM_ASSIST_SPEED_STEP".to_string(),
                    message: format!("not a number: {raw:?}"),
                })?;
                if !(step > 0.0 && step <= 1.0) {
                    return Err(ConfigError::InvalidValue {
                        key: "FORM_ASSIST_SPEED_STEP".to_string(),
                        message: format!("must be in (0, 1], got {step}"),
                    });
                }
                step
            }
        };

        Ok(Self {
            mic_permission,
            speed_step,
        })
    }
}
