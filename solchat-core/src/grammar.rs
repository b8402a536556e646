//! Slash command registry for the chat input.
//!
//! Every command is a static [`CommandDescriptor`]: a trigger word, an ordered
//! list of typed arguments and the natural-language prompt template the
//! arguments are substituted into. The table order is the suggestion order.

use std::fmt;

use crate::base58;
use crate::error::ArgumentError;

/// Exact length of a transaction signature token.
pub const SIGNATURE_LEN: usize = 64;
/// Shortest accepted wallet address token.
pub const ADDRESS_MIN_LEN: usize = 32;
/// Longest accepted wallet address token.
pub const ADDRESS_MAX_LEN: usize = 44;

/// Maximum edit distance for "did you mean" suggestions.
const MAX_SUGGEST_DISTANCE: usize = 2;

/// Syntactic category an argument token must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// 64-character base58 token.
    Signature,
    /// Base58 token of 32 to 44 characters.
    Address,
    /// Rest of the line, verbatim.
    FreeText,
}

impl ArgKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArgKind::Signature => "signature",
            ArgKind::Address => "address",
            ArgKind::FreeText => "text",
        }
    }

    /// Usage hint for this kind, e.g. `<signature>`.
    pub fn placeholder(&self) -> &'static str {
        match self {
            ArgKind::Signature => "<signature>",
            ArgKind::Address => "<address>",
            ArgKind::FreeText => "<text>",
        }
    }

    /// What a valid token of this kind looks like.
    pub fn format_hint(&self) -> String {
        match self {
            ArgKind::Signature => format!("{SIGNATURE_LEN} base58 characters"),
            ArgKind::Address => format!("{ADDRESS_MIN_LEN}-{ADDRESS_MAX_LEN} base58 characters"),
            ArgKind::FreeText => "any text up to the end of the line".to_string(),
        }
    }

    /// Whether this argument swallows the remainder of the line.
    pub fn is_trailing(&self) -> bool {
        matches!(self, ArgKind::FreeText)
    }

    /// Check a token against this kind's format rule.
    pub fn validate(&self, token: &str) -> Result<(), ArgumentError> {
        match self {
            ArgKind::Signature => {
                check_length(token, SIGNATURE_LEN, SIGNATURE_LEN)?;
                check_alphabet(token)
            }
            ArgKind::Address => {
                check_length(token, ADDRESS_MIN_LEN, ADDRESS_MAX_LEN)?;
                check_alphabet(token)
            }
            ArgKind::FreeText => {
                if token.trim().is_empty() {
                    Err(ArgumentError::Empty)
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn check_length(token: &str, min: usize, max: usize) -> Result<(), ArgumentError> {
    let actual = token.chars().count();
    if actual == 0 {
        return Err(ArgumentError::Empty);
    }
    if actual < min || actual > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min}-{max}")
        };
        return Err(ArgumentError::WrongLength { expected, actual });
    }
    Ok(())
}

fn check_alphabet(token: &str) -> Result<(), ArgumentError> {
    match base58::first_invalid(token) {
        Some((position, ch)) => Err(ArgumentError::InvalidCharacter { ch, position }),
        None => Ok(()),
    }
}

/// A named, typed argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    /// Placeholder name used in the prompt template, e.g. "signature".
    pub name: &'static str,
    pub kind: ArgKind,
}

/// Which parsed variant a descriptor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Tps,
    Tx,
    Wallet,
    Path,
}

/// Static metadata describing one slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Word typed after the slash, e.g. "tps".
    pub trigger: &'static str,
    pub kind: CommandKind,
    /// Ordered argument slots.
    pub args: &'static [ArgSpec],
    /// Prompt template with `{name}` placeholders for each argument.
    pub template: &'static str,
    /// One-line description shown in help and the suggestion dropdown.
    pub description: &'static str,
}

impl CommandDescriptor {
    /// Usage pattern, e.g. "/path <walletA> <walletB>".
    pub fn usage(&self) -> String {
        let mut usage = format!("/{}", self.trigger);
        for arg in self.args {
            usage.push_str(&format!(" <{}>", arg.name));
        }
        usage
    }

    /// Substitute `values` (in argument order) into the prompt template.
    pub fn render_prompt(&self, values: &[&str]) -> String {
        self.args
            .iter()
            .zip(values)
            .fold(self.template.to_string(), |prompt, (arg, value)| {
                prompt.replace(&format!("{{{}}}", arg.name), value)
            })
    }
}

/// The built-in commands, in suggestion order.
pub static BUILTIN_COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        trigger: "tps",
        kind: CommandKind::Tps,
        args: &[],
        template: "What is the current Solana TPS?",
        description: "Show the current network transactions per second",
    },
    CommandDescriptor {
        trigger: "tx",
        kind: CommandKind::Tx,
        args: &[ArgSpec {
            name: "signature",
            kind: ArgKind::Signature,
        }],
        template: "Explain this transaction: {signature}",
        description: "Explain a transaction by its signature",
    },
    CommandDescriptor {
        trigger: "wallet",
        kind: CommandKind::Wallet,
        args: &[ArgSpec {
            name: "address",
            kind: ArgKind::Address,
        }],
        template: "Summarize this wallet: {address}",
        description: "Summarize a wallet's holdings and activity",
    },
    CommandDescriptor {
        trigger: "path",
        kind: CommandKind::Path,
        args: &[
            ArgSpec {
                name: "walletA",
                kind: ArgKind::Address,
            },
            ArgSpec {
                name: "walletB",
                kind: ArgKind::Address,
            },
        ],
        template: "Find path between wallets {walletA} and {walletB}",
        description: "Trace a transfer path between two wallets",
    },
];

/// Read-only view over an ordered command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandRegistry {
    commands: &'static [CommandDescriptor],
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandRegistry {
    /// Wrap an arbitrary static table.
    ///
    /// Each descriptor's `args` must have the arity of its `kind`
    /// (`Tps` none, `Tx` and `Wallet` one, `Path` two); parsing panics on a
    /// table that breaks this.
    pub const fn new(commands: &'static [CommandDescriptor]) -> Self {
        Self { commands }
    }

    /// The registry of built-in commands.
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_COMMANDS)
    }

    /// All commands in registry order.
    pub fn all(&self) -> &'static [CommandDescriptor] {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Exact, case-sensitive trigger lookup (without the slash).
    pub fn lookup(&self, trigger: &str) -> Option<&'static CommandDescriptor> {
        self.commands.iter().find(|cmd| cmd.trigger == trigger)
    }

    /// Commands whose trigger starts with `query` (case-sensitive), in
    /// registry order. An empty query matches everything.
    pub fn completions(&self, query: &str) -> Vec<&'static CommandDescriptor> {
        self.commands
            .iter()
            .filter(|cmd| cmd.trigger.starts_with(query))
            .collect()
    }

    /// Closest trigger to an unknown word, for "did you mean" hints.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let mut best: Option<(&'static str, usize)> = None;
        for cmd in self.commands {
            let dist = edit_distance(input, cmd.trigger);
            if dist <= MAX_SUGGEST_DISTANCE && best.is_none_or(|(_, d)| dist < d) {
                best = Some((cmd.trigger, dist));
            }
        }
        best.map(|(trigger, _)| trigger)
    }
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev = (0..=b.len()).collect::<Vec<_>>();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_placeholders() {
        assert_eq!(ArgKind::Signature.placeholder(), "<signature>");
        assert_eq!(ArgKind::Address.placeholder(), "<address>");
        assert_eq!(ArgKind::FreeText.placeholder(), "<text>");
    }

    #[test]
    fn test_format_hints() {
        assert_eq!(ArgKind::Signature.format_hint(), "64 base58 characters");
        assert_eq!(ArgKind::Address.format_hint(), "32-44 base58 characters");
    }

    #[test]
    fn test_builtin_order() {
        let triggers: Vec<&str> = CommandRegistry::builtin()
            .all()
            .iter()
            .map(|c| c.trigger)
            .collect();
        assert_eq!(triggers, vec!["tps", "tx", "wallet", "path"]);
    }

    #[test]
    fn test_no_duplicate_triggers() {
        let mut seen = HashSet::new();
        for cmd in BUILTIN_COMMANDS {
            assert!(seen.insert(cmd.trigger), "Duplicate trigger: {}", cmd.trigger);
        }
    }

    #[test]
    fn test_triggers_are_single_words() {
        for cmd in BUILTIN_COMMANDS {
            assert!(!cmd.trigger.is_empty());
            assert!(
                !cmd.trigger.contains(char::is_whitespace) && !cmd.trigger.contains('/'),
                "Bad trigger: {:?}",
                cmd.trigger
            );
        }
    }

    #[test]
    fn test_templates_reference_every_argument() {
        for cmd in BUILTIN_COMMANDS {
            for arg in cmd.args {
                let placeholder = format!("{{{}}}", arg.name);
                assert!(
                    cmd.template.contains(&placeholder),
                    "/{} template is missing {}",
                    cmd.trigger,
                    placeholder
                );
            }
        }
    }

    #[test]
    fn test_free_text_only_in_last_position() {
        for cmd in BUILTIN_COMMANDS {
            if let Some((_, init)) = cmd.args.split_last() {
                assert!(init.iter().all(|a| !a.kind.is_trailing()));
            }
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.lookup("tx").map(|c| c.kind), Some(CommandKind::Tx));
        assert!(registry.lookup("TX").is_none());
        assert!(registry.lookup("/tx").is_none());
    }

    #[test]
    fn test_completions_prefix_t() {
        let registry = CommandRegistry::builtin();
        let triggers: Vec<&str> = registry.completions("t").iter().map(|c| c.trigger).collect();
        assert_eq!(triggers, vec!["tps", "tx"]);
    }

    #[test]
    fn test_completions_empty_query_matches_all() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.completions("").len(), registry.len());
    }

    #[test]
    fn test_completions_no_match() {
        assert!(CommandRegistry::builtin().completions("x").is_empty());
        assert!(CommandRegistry::builtin().completions("Tps").is_empty());
    }

    #[test]
    fn test_usage() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.lookup("tps").unwrap().usage(), "/tps");
        assert_eq!(
            registry.lookup("path").unwrap().usage(),
            "/path <walletA> <walletB>"
        );
    }

    #[test]
    fn test_render_prompt() {
        let path = CommandRegistry::builtin().lookup("path").unwrap();
        assert_eq!(
            path.render_prompt(&["A", "B"]),
            "Find path between wallets A and B"
        );
    }

    #[test]
    fn test_signature_validation() {
        assert!(ArgKind::Signature.validate(&"1".repeat(64)).is_ok());
        assert_eq!(
            ArgKind::Signature.validate("short"),
            Err(ArgumentError::WrongLength {
                expected: "64".into(),
                actual: 5
            })
        );
        let mut bad = "1".repeat(63);
        bad.push('0');
        assert_eq!(
            ArgKind::Signature.validate(&bad),
            Err(ArgumentError::InvalidCharacter {
                ch: '0',
                position: 63
            })
        );
    }

    #[test]
    fn test_address_length_bounds() {
        assert!(ArgKind::Address.validate(&"a".repeat(32)).is_ok());
        assert!(ArgKind::Address.validate(&"a".repeat(44)).is_ok());
        assert!(ArgKind::Address.validate(&"a".repeat(31)).is_err());
        assert!(ArgKind::Address.validate(&"a".repeat(45)).is_err());
        assert_eq!(ArgKind::Address.validate(""), Err(ArgumentError::Empty));
    }

    #[test]
    fn test_free_text_rejects_blank() {
        assert!(ArgKind::FreeText.validate("hello world").is_ok());
        assert_eq!(ArgKind::FreeText.validate("   "), Err(ArgumentError::Empty));
    }

    #[test]
    fn test_suggest_close_match() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.suggest("walet"), Some("wallet"));
        assert_eq!(registry.suggest("pth"), Some("path"));
    }

    #[test]
    fn test_suggest_no_match() {
        assert!(CommandRegistry::builtin().suggest("xyzabc").is_none());
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("wallet", "wallet"), 0);
        assert_eq!(edit_distance("tsp", "tps"), 2);
        assert_eq!(edit_distance("abc", "xyz"), 3);
    }

    #[test]
    fn test_arg_kind_display() {
        assert_eq!(ArgKind::Signature.to_string(), "signature");
        assert_eq!(ArgKind::Address.to_string(), "address");
        assert_eq!(ArgKind::FreeText.to_string(), "text");
    }
}
