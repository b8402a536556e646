//! Interactive chat input with slash command completion.
//!
//! On a terminal this runs crossterm in raw mode and routes every key through
//! the line editor and the completion controller:
//! - `/` opens the suggestion dropdown, typing filters it
//! - Up/Down move the highlight, Tab or a click-equivalent Enter accepts
//! - Enter on a complete command submits it, Esc closes the dropdown
//! - Ctrl-C clears the line, Ctrl-D on an empty line exits
//!
//! When stdin is not a terminal each line is parsed and dispatched as-is.

use std::io::{self, IsTerminal, Write};

use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal;
use futures::StreamExt;
use solchat_core::config::UiConfig;
use solchat_core::{CompletionController, Effect, InputEvent, ParsedCommand, help_message};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dispatch::{ChatRequest, PromptDispatcher};
use crate::keymap::{KeyAction, map_key};
use crate::line_editor::LineEditor;
use crate::render::Renderer;

/// A line the user submitted, with its parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub text: String,
    pub command: Option<ParsedCommand>,
}

/// Whether the session continues after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Host-level handling of a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Help,
    Empty,
    /// Slash input that did not parse; carries the diagnostic.
    Rejected(String),
    Send(ChatRequest),
}

/// Decide what a submitted line means. `/help` and `/quit` are handled by the
/// host and never reach the parser.
pub fn classify(submission: Submission) -> Outcome {
    let trimmed = submission.text.trim();
    match trimmed {
        "" => return Outcome::Empty,
        "/quit" | "/exit" => return Outcome::Quit,
        "/help" | "/?" => return Outcome::Help,
        _ => {}
    }
    match submission.command {
        Some(command) => Outcome::Send(ChatRequest::from_command(command)),
        None if trimmed.starts_with('/') => match solchat_core::parse_detailed(trimmed) {
            Ok(command) => Outcome::Send(ChatRequest::from_command(command)),
            Err(e) => Outcome::Rejected(e.to_string()),
        },
        None => Outcome::Send(ChatRequest::from_message(trimmed)),
    }
}

async fn handle_submission(
    submission: Submission,
    dispatcher: &dyn PromptDispatcher,
) -> anyhow::Result<Flow> {
    match classify(submission) {
        Outcome::Quit => return Ok(Flow::Quit),
        Outcome::Help => print!("{}", help_message()),
        Outcome::Empty => {}
        Outcome::Rejected(reason) => println!("{reason}"),
        Outcome::Send(request) => match dispatcher.dispatch(&request).await {
            Ok(output) => println!("{output}"),
            Err(e) => {
                tracing::warn!(error = %e, "dispatch failed");
                println!("Request failed: {e}");
            }
        },
    }
    Ok(Flow::Continue)
}

/// Run the chat input until the user quits or input ends.
pub async fn run_interactive(ui: &UiConfig, dispatcher: &dyn PromptDispatcher) -> anyhow::Result<()> {
    if !io::stdin().is_terminal() {
        return run_lines(dispatcher).await;
    }

    println!("  Type / for commands, /help for the list, /quit to exit\n");
    let renderer = Renderer::new(ui);
    let mut events = EventStream::new();

    while let Some(submission) = read_submission(&renderer, &mut events).await? {
        if handle_submission(submission, dispatcher).await? == Flow::Quit {
            break;
        }
    }
    println!("Goodbye!");
    Ok(())
}

/// Read stdin line by line without any terminal handling.
async fn run_lines(dispatcher: &dyn PromptDispatcher) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = solchat_core::parse(&line);
        let submission = Submission {
            text: line,
            command,
        };
        if handle_submission(submission, dispatcher).await? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read one submission. Returns `None` on Ctrl-D or when the event stream ends.
async fn read_submission(
    renderer: &Renderer<'_>,
    events: &mut EventStream,
) -> anyhow::Result<Option<Submission>> {
    let _raw = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    let mut editor = LineEditor::new();
    let mut controller = CompletionController::new();
    renderer.draw(&mut stdout, &editor, &controller, terminal_width())?;

    while let Some(event) = events.next().await {
        match event? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(&key) {
                KeyAction::Insert(ch) => {
                    editor.insert(ch);
                    controller.handle(InputEvent::TextChanged(editor.snapshot()));
                }
                KeyAction::Backspace => {
                    if editor.backspace() {
                        controller.handle(InputEvent::TextChanged(editor.snapshot()));
                    }
                }
                KeyAction::Delete => {
                    if editor.delete() {
                        controller.handle(InputEvent::TextChanged(editor.snapshot()));
                    }
                }
                action @ (KeyAction::Left | KeyAction::Right | KeyAction::Home | KeyAction::End) => {
                    let moved = match action {
                        KeyAction::Left => editor.left(),
                        KeyAction::Right => editor.right(),
                        KeyAction::Home => editor.home(),
                        _ => editor.end(),
                    };
                    if moved {
                        controller.handle(InputEvent::CaretMoved(editor.caret()));
                    }
                }
                KeyAction::Controller(input_event) => match controller.handle(input_event) {
                    Effect::None => {}
                    Effect::Replace { text, caret } => editor.set(text, caret),
                    Effect::Submit { text, command } => {
                        renderer.finish(&mut stdout, &editor)?;
                        return Ok(Some(Submission { text, command }));
                    }
                },
                KeyAction::ClearLine => {
                    editor.clear();
                    controller.handle(InputEvent::TextChanged(editor.snapshot()));
                }
                KeyAction::Eof => {
                    if editor.is_empty() {
                        renderer.finish(&mut stdout, &editor)?;
                        return Ok(None);
                    }
                }
                KeyAction::Ignore => {}
            },
            Event::Paste(text) => {
                editor.insert_str(&text);
                controller.handle(InputEvent::TextChanged(editor.snapshot()));
            }
            _ => {}
        }
        renderer.draw(&mut stdout, &editor, &controller, terminal_width())?;
    }

    stdout.flush()?;
    Ok(None)
}

fn terminal_width() -> usize {
    terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
}
