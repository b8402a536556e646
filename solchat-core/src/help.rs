//! Help text for the slash commands.

use crate::grammar::{ArgKind, CommandRegistry};

/// Header line every help block starts with.
pub const HELP_HEADER: &str = "Slash commands";

/// Help text for the built-in registry.
pub fn help_message() -> String {
    CommandRegistry::builtin().help_text()
}

impl CommandRegistry {
    /// One line per command in registry order: usage, then description.
    pub fn help_text(&self) -> String {
        let width = self
            .all()
            .iter()
            .map(|cmd| cmd.usage().len())
            .max()
            .unwrap_or(0);

        let mut output = format!("{HELP_HEADER}:\n");
        for cmd in self.all() {
            output.push_str(&format!(
                "  {:<width$}  {}\n",
                cmd.usage(),
                cmd.description
            ));
        }

        let kinds = self.arg_kinds();
        if !kinds.is_empty() {
            output.push_str("\nArguments:\n");
            for kind in kinds {
                output.push_str(&format!(
                    "  {:<width$}  {}\n",
                    kind.placeholder(),
                    kind.format_hint()
                ));
            }
        }

        output.push_str("\nTab or Enter completes the highlighted command, ");
        output.push_str("Up/Down moves the highlight, Esc closes the list.\n");
        output
    }

    /// Distinct argument kinds in first-use order.
    fn arg_kinds(&self) -> Vec<ArgKind> {
        let mut kinds = Vec::new();
        for arg in self.all().iter().flat_map(|cmd| cmd.args) {
            if !kinds.contains(&arg.kind) {
                kinds.push(arg.kind);
            }
        }
        kinds
    }
}
