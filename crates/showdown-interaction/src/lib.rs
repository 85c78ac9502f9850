//! showdown-interaction
//!
//! Remote-inference plumbing for Showdown: the OpenRouter chat-completions
//! agent implementing the core's [`MoveSuggester`] capability, plus
//! secret/config file loading.
//!
//! [`MoveSuggester`]: showdown_core::oracle::MoveSuggester

pub mod config;
pub mod openrouter_api_agent;

pub use config::{FileConfig, OpenRouterConfig, SecretConfig, load_file_config, load_secret_config};
pub use openrouter_api_agent::OpenRouterApiAgent;
