//! Form Assist: onboarding core for the voice form assistant.

pub mod cli;
pub mod config;
pub mod error;
pub mod onboarding;
