//! Suggestion and completion controller for a slash-command text input.
//!
//! The controller is a plain state machine: [`transition`] takes the current
//! [`ControllerState`] and one [`InputEvent`] and returns the next state plus
//! an [`Effect`] the host input must apply. Nothing here renders, blocks, or
//! touches I/O, so any event loop can drive it.
//!
//! Caret positions are counted in characters, not bytes.

use crate::grammar::{CommandDescriptor, CommandRegistry};
use crate::parser::ParsedCommand;

/// Read-only snapshot of the host input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub text: String,
    /// Caret position in characters, `0..=text.chars().count()`.
    pub caret: usize,
}

impl InputSnapshot {
    /// Snapshot with the caret clamped to the text.
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let caret = caret.min(text.chars().count());
        Self { text, caret }
    }

    /// Snapshot with the caret after the last character.
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self { text, caret }
    }
}

/// Substring from the start of `text` up to the first whitespace.
pub fn leading_token(text: &str) -> &str {
    match text.find(char::is_whitespace) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Built-in commands matching a leading token, in registry order.
///
/// Accepts the token with or without its slash, so `"/t"` and `"t"` give the
/// same candidates.
pub fn compute_suggestions(leading_token: &str) -> Vec<&'static CommandDescriptor> {
    let query = leading_token.strip_prefix('/').unwrap_or(leading_token);
    CommandRegistry::builtin().completions(query)
}

/// Replace the leading token of `current_text` with `/trigger ` and return the
/// new text with the caret placed right after the inserted space.
///
/// Whitespace that followed the old token is dropped so the trigger is always
/// followed by exactly one space. Applying the same candidate twice is a no-op.
pub fn apply_completion(current_text: &str, candidate: &CommandDescriptor) -> (String, usize) {
    let token = leading_token(current_text);
    let rest = current_text[token.len()..].trim_start();

    let inserted = format!("/{} ", candidate.trigger);
    let caret = inserted.chars().count();
    (format!("{inserted}{rest}"), caret)
}

/// Whether the suggestion list is showing and what it holds.
///
/// When open, `candidates` is non-empty and `highlighted` indexes into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    is_open: bool,
    query: String,
    candidates: Vec<&'static CommandDescriptor>,
    highlighted: usize,
}

impl SuggestionState {
    fn closed() -> Self {
        Self::default()
    }

    fn open(query: &str, candidates: Vec<&'static CommandDescriptor>, highlighted: usize) -> Self {
        if candidates.is_empty() {
            return Self::closed();
        }
        let highlighted = if highlighted < candidates.len() {
            highlighted
        } else {
            0
        };
        Self {
            is_open: true,
            query: query.to_string(),
            candidates,
            highlighted,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Leading token text after the slash.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[&'static CommandDescriptor] {
        &self.candidates
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&'static CommandDescriptor> {
        if self.is_open {
            self.candidates.get(self.highlighted).copied()
        } else {
            None
        }
    }

    fn step(&self, forward: bool) -> Self {
        let len = self.candidates.len();
        let highlighted = if forward {
            (self.highlighted + 1) % len
        } else {
            (self.highlighted + len - 1) % len
        };
        Self {
            highlighted,
            ..self.clone()
        }
    }
}

/// A discrete event from the host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text changed (keystroke, paste, deletion).
    TextChanged(InputSnapshot),
    /// The caret moved without a text change.
    CaretMoved(usize),
    ArrowUp,
    ArrowDown,
    Tab,
    /// Enter; `modified` is true when Shift/Alt/Ctrl was held.
    Enter { modified: bool },
    Escape,
    /// Pointer selection of the candidate at this index.
    Click(usize),
}

/// What the host must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Replace the input text and move the caret.
    Replace { text: String, caret: usize },
    /// Submit the input. `command` is the parse result of `text`.
    Submit {
        text: String,
        command: Option<ParsedCommand>,
    },
}

/// Cached input plus suggestion state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    input: InputSnapshot,
    suggestions: SuggestionState,
}

impl ControllerState {
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }
}

/// Advance the built-in controller by one event.
pub fn transition(state: &ControllerState, event: InputEvent) -> (ControllerState, Effect) {
    transition_with(&CommandRegistry::builtin(), state, event)
}

/// Advance the controller by one event against `registry`.
pub fn transition_with(
    registry: &CommandRegistry,
    state: &ControllerState,
    event: InputEvent,
) -> (ControllerState, Effect) {
    tracing::trace!(?event, open = state.suggestions.is_open, "completion event");

    let suggestions = &state.suggestions;
    match event {
        InputEvent::TextChanged(input) => {
            let suggestions = refresh(registry, suggestions, &input);
            (ControllerState { input, suggestions }, Effect::None)
        }
        InputEvent::CaretMoved(caret) => {
            let input = InputSnapshot::new(state.input.text.clone(), caret);
            let suggestions = if suggestions.is_open && in_command_region(&input) {
                suggestions.clone()
            } else {
                SuggestionState::closed()
            };
            (ControllerState { input, suggestions }, Effect::None)
        }
        InputEvent::ArrowDown if suggestions.is_open => (highlight_step(state, true), Effect::None),
        InputEvent::ArrowUp if suggestions.is_open => (highlight_step(state, false), Effect::None),
        InputEvent::Tab => accept(state),
        InputEvent::Enter { modified: true } => (state.clone(), Effect::None),
        InputEvent::Enter { modified: false } => {
            let command = registry.parse(&state.input.text);
            if suggestions.is_open && command.is_none() {
                return accept(state);
            }
            let next = ControllerState {
                input: state.input.clone(),
                suggestions: SuggestionState::closed(),
            };
            let effect = Effect::Submit {
                text: state.input.text.clone(),
                command,
            };
            (next, effect)
        }
        InputEvent::Escape => {
            let next = ControllerState {
                input: state.input.clone(),
                suggestions: SuggestionState::closed(),
            };
            (next, Effect::None)
        }
        InputEvent::Click(index) if suggestions.is_open && index < suggestions.candidates.len() => {
            let highlighted = ControllerState {
                input: state.input.clone(),
                suggestions: SuggestionState {
                    highlighted: index,
                    ..suggestions.clone()
                },
            };
            accept(&highlighted)
        }
        InputEvent::ArrowDown | InputEvent::ArrowUp | InputEvent::Click(_) => {
            (state.clone(), Effect::None)
        }
    }
}

fn highlight_step(state: &ControllerState, forward: bool) -> ControllerState {
    ControllerState {
        input: state.input.clone(),
        suggestions: state.suggestions.step(forward),
    }
}

/// Accept the highlighted candidate, if the list is open.
fn accept(state: &ControllerState) -> (ControllerState, Effect) {
    let Some(candidate) = state.suggestions.highlighted() else {
        return (state.clone(), Effect::None);
    };
    let (text, caret) = apply_completion(&state.input.text, candidate);
    tracing::debug!(trigger = candidate.trigger, "completed slash command");
    let next = ControllerState {
        input: InputSnapshot::new(text.clone(), caret),
        suggestions: SuggestionState::closed(),
    };
    (next, Effect::Replace { text, caret })
}

/// Caret sits after the slash and no further than the end of the leading token.
fn in_command_region(input: &InputSnapshot) -> bool {
    let token = leading_token(&input.text);
    token.starts_with('/') && input.caret >= 1 && input.caret <= token.chars().count()
}

fn refresh(
    registry: &CommandRegistry,
    previous: &SuggestionState,
    input: &InputSnapshot,
) -> SuggestionState {
    if !in_command_region(input) {
        return SuggestionState::closed();
    }
    let query = &leading_token(&input.text)[1..];
    let candidates = registry.completions(query);
    let highlighted = if previous.is_open && previous.candidates == candidates {
        previous.highlighted
    } else {
        0
    };
    SuggestionState::open(query, candidates, highlighted)
}

/// Owns a [`ControllerState`] and applies events to it in place.
#[derive(Debug, Clone, Default)]
pub struct CompletionController {
    registry: CommandRegistry,
    state: ControllerState,
}

impl CompletionController {
    /// Controller over the built-in commands.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry,
            state: ControllerState::default(),
        }
    }

    /// Apply one event and return the effect for the host.
    pub fn handle(&mut self, event: InputEvent) -> Effect {
        let (next, effect) = transition_with(&self.registry, &self.state, event);
        self.state = next;
        effect
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.state.input
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.state.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.state.suggestions.is_open
    }

    /// Untyped remainder of the highlighted trigger, for inline hints.
    pub fn ghost_text(&self) -> Option<&'static str> {
        let candidate = self.state.suggestions.highlighted()?;
        let typed = self.state.suggestions.query.as_str();
        candidate
            .trigger
            .strip_prefix(typed)
            .filter(|rest| !rest.is_empty())
    }
}
