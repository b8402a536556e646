//! # solchat core
//!
//! Slash-command engine for the solchat chat input: the command registry and
//! its argument grammar, a total parser that turns `/tx <sig>`-style input
//! into typed commands with a ready-made AI prompt, the help text, and a
//! framework-free completion controller that drives the suggestion dropdown.

pub mod base58;
pub mod completion;
pub mod config;
pub mod error;
pub mod grammar;
pub mod help;
pub mod parser;

// Re-export commonly used types at the crate root.
pub use completion::{
    CompletionController, ControllerState, Effect, InputEvent, InputSnapshot, SuggestionState,
    apply_completion, compute_suggestions, leading_token, transition,
};
pub use config::{ConfigOverrides, SolchatConfig, load_config};
pub use error::{ArgumentError, ConfigError, ParseError, Result, SolchatError};
pub use grammar::{ArgKind, ArgSpec, CommandDescriptor, CommandKind, CommandRegistry};
pub use help::help_message;
pub use parser::{ParsedCommand, parse, parse_detailed};
