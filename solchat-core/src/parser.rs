//! Slash command parser.
//!
//! `parse` is total: it never panics or errors on user input, it either
//! produces a fully validated [`ParsedCommand`] or `None`. `parse_detailed`
//! runs the same logic but keeps the reason for a rejection.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::grammar::{CommandDescriptor, CommandKind, CommandRegistry};

/// A validated slash command together with the prompt it expands to.
///
/// Deserializing goes through the parser again: arguments are re-validated and
/// the prompt is rebuilt from the template, so a stored `prompt` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", try_from = "CommandFields")]
pub enum ParsedCommand {
    Tps {
        prompt: String,
    },
    Tx {
        signature: String,
        prompt: String,
    },
    Wallet {
        address: String,
        prompt: String,
    },
    Path {
        #[serde(rename = "walletA")]
        wallet_a: String,
        #[serde(rename = "walletB")]
        wallet_b: String,
        prompt: String,
    },
}

impl ParsedCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            ParsedCommand::Tps { .. } => CommandKind::Tps,
            ParsedCommand::Tx { .. } => CommandKind::Tx,
            ParsedCommand::Wallet { .. } => CommandKind::Wallet,
            ParsedCommand::Path { .. } => CommandKind::Path,
        }
    }

    /// The trigger word this command was parsed from.
    pub fn trigger(&self) -> &'static str {
        match self.kind() {
            CommandKind::Tps => "tps",
            CommandKind::Tx => "tx",
            CommandKind::Wallet => "wallet",
            CommandKind::Path => "path",
        }
    }

    /// Natural-language prompt handed to the AI backend.
    pub fn prompt(&self) -> &str {
        match self {
            ParsedCommand::Tps { prompt }
            | ParsedCommand::Tx { prompt, .. }
            | ParsedCommand::Wallet { prompt, .. }
            | ParsedCommand::Path { prompt, .. } => prompt,
        }
    }

    /// Validated arguments in declaration order.
    pub fn args(&self) -> Vec<&str> {
        match self {
            ParsedCommand::Tps { .. } => Vec::new(),
            ParsedCommand::Tx { signature, .. } => vec![signature.as_str()],
            ParsedCommand::Wallet { address, .. } => vec![address.as_str()],
            ParsedCommand::Path {
                wallet_a, wallet_b, ..
            } => vec![wallet_a.as_str(), wallet_b.as_str()],
        }
    }

    /// Canonical invocation, e.g. `/path <a> <b>` with single spaces.
    pub fn canonical(&self) -> String {
        let mut line = format!("/{}", self.trigger());
        for arg in self.args() {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Serialized shape of a command, before validation.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum CommandFields {
    Tps {},
    Tx {
        signature: String,
    },
    Wallet {
        address: String,
    },
    Path {
        #[serde(rename = "walletA")]
        wallet_a: String,
        #[serde(rename = "walletB")]
        wallet_b: String,
    },
}

impl TryFrom<CommandFields> for ParsedCommand {
    type Error = ParseError;

    fn try_from(fields: CommandFields) -> Result<Self, Self::Error> {
        let line = match fields {
            CommandFields::Tps {} => "/tps".to_string(),
            CommandFields::Tx { signature } => format!("/tx {signature}"),
            CommandFields::Wallet { address } => format!("/wallet {address}"),
            CommandFields::Path { wallet_a, wallet_b } => format!("/path {wallet_a} {wallet_b}"),
        };
        parse_detailed(&line)
    }
}

/// Parse `raw` against the built-in registry.
pub fn parse(raw: &str) -> Option<ParsedCommand> {
    CommandRegistry::builtin().parse(raw)
}

/// Parse `raw` against the built-in registry, keeping the rejection reason.
pub fn parse_detailed(raw: &str) -> Result<ParsedCommand, ParseError> {
    CommandRegistry::builtin().parse_detailed(raw)
}

impl CommandRegistry {
    pub fn parse(&self, raw: &str) -> Option<ParsedCommand> {
        self.parse_detailed(raw).ok()
    }

    pub fn parse_detailed(&self, raw: &str) -> Result<ParsedCommand, ParseError> {
        let result = self.resolve(raw);
        match &result {
            Ok(cmd) => tracing::trace!(trigger = cmd.trigger(), "parsed slash command"),
            Err(ParseError::NotACommand) => {}
            Err(e) => tracing::debug!(input = raw, error = %e, "slash command rejected"),
        }
        result
    }

    fn resolve(&self, raw: &str) -> Result<ParsedCommand, ParseError> {
        let line = raw.trim();
        let body = line.strip_prefix('/').ok_or(ParseError::NotACommand)?;

        let (trigger, rest) = split_token(body);
        if trigger.is_empty() {
            return Err(ParseError::EmptyTrigger);
        }

        let descriptor = self
            .lookup(trigger)
            .ok_or_else(|| ParseError::UnknownTrigger {
                trigger: trigger.to_string(),
                suggestion: self.suggest(trigger).map(str::to_string),
            })?;

        let values = bind_args(descriptor, rest)?;
        Ok(build(descriptor, &values))
    }
}

/// Split off the leading non-whitespace run. `s` is not trimmed first.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(end) => s.split_at(end),
        None => (s, ""),
    }
}

/// Consume and validate one value per argument slot of `descriptor`.
pub(crate) fn bind_args<'a>(
    descriptor: &CommandDescriptor,
    mut rest: &'a str,
) -> Result<Vec<&'a str>, ParseError> {
    let mut values = Vec::with_capacity(descriptor.args.len());

    for arg in descriptor.args {
        rest = rest.trim_start();
        let missing = || ParseError::MissingArgument {
            trigger: descriptor.trigger.to_string(),
            name: arg.name.to_string(),
            kind: arg.kind,
        };

        let token = if arg.kind.is_trailing() {
            let text = rest.trim_end();
            rest = "";
            text
        } else {
            let (token, remainder) = split_token(rest);
            rest = remainder;
            token
        };
        if token.is_empty() {
            return Err(missing());
        }

        arg.kind
            .validate(token)
            .map_err(|reason| ParseError::InvalidArgument {
                trigger: descriptor.trigger.to_string(),
                name: arg.name.to_string(),
                kind: arg.kind,
                reason,
            })?;
        values.push(token);
    }

    let (extra, _) = split_token(rest.trim_start());
    if !extra.is_empty() {
        return Err(ParseError::UnexpectedArgument {
            trigger: descriptor.trigger.to_string(),
            token: extra.to_string(),
        });
    }

    Ok(values)
}

fn build(descriptor: &CommandDescriptor, values: &[&str]) -> ParsedCommand {
    let prompt = descriptor.render_prompt(values);
    match (descriptor.kind, values) {
        (CommandKind::Tps, []) => ParsedCommand::Tps { prompt },
        (CommandKind::Tx, [signature]) => ParsedCommand::Tx {
            signature: signature.to_string(),
            prompt,
        },
        (CommandKind::Wallet, [address]) => ParsedCommand::Wallet {
            address: address.to_string(),
            prompt,
        },
        (CommandKind::Path, [wallet_a, wallet_b]) => ParsedCommand::Path {
            wallet_a: wallet_a.to_string(),
            wallet_b: wallet_b.to_string(),
            prompt,
        },
        (kind, _) => unreachable!(
            "/{} declares {} arguments, which does not fit {:?}",
            descriptor.trigger,
            descriptor.args.len(),
            kind
        ),
    }
}
