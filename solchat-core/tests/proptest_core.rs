//! Property-based tests for the parser and completion controller.

use proptest::prelude::*;

use solchat_core::grammar::BUILTIN_COMMANDS;
use solchat_core::{
    CompletionController, InputEvent, InputSnapshot, ParsedCommand, apply_completion, parse,
    parse_detailed,
};

const B58: &str = "[1-9A-HJ-NP-Za-km-z]";

fn address() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("{B58}{{32,44}}")).unwrap()
}

fn signature() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("{B58}{{64}}")).unwrap()
}

fn separator() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t]{1,4}").unwrap()
}

fn event() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        ("/?[a-z]{0,7}( [a-z0-9]{0,5})?", 0usize..16)
            .prop_map(|(text, caret)| InputEvent::TextChanged(InputSnapshot::new(text, caret))),
        (0usize..16).prop_map(InputEvent::CaretMoved),
        Just(InputEvent::ArrowUp),
        Just(InputEvent::ArrowDown),
        Just(InputEvent::Tab),
        any::<bool>().prop_map(|modified| InputEvent::Enter { modified }),
        Just(InputEvent::Escape),
        (0usize..6).prop_map(InputEvent::Click),
    ]
}

// --- Parser totality ---

proptest! {
    #[test]
    fn parse_never_panics(input in ".*") {
        let _ = parse(&input);
    }

    #[test]
    fn parse_matches_detailed(input in "/?[a-z]{0,8}( [1-9A-Za-z]{0,70}){0,3}") {
        prop_assert_eq!(parse(&input), parse_detailed(&input).ok());
    }

    #[test]
    fn non_slash_input_is_never_a_command(input in "[a-zA-Z0-9].*") {
        prop_assert!(parse(&input).is_none());
    }
}

// --- Round trips through the canonical form ---

proptest! {
    #[test]
    fn tx_round_trip(sig in signature(), sep in separator()) {
        let parsed = parse(&format!("/tx{sep}{sig}")).unwrap();
        prop_assert_eq!(parsed.args(), vec![sig.as_str()]);
        prop_assert_eq!(parse(&parsed.canonical()), Some(parsed));
    }

    #[test]
    fn wallet_round_trip(addr in address(), sep in separator()) {
        let parsed = parse(&format!(" /wallet{sep}{addr} ")).unwrap();
        prop_assert_eq!(
            &parsed,
            &ParsedCommand::Wallet {
                address: addr.clone(),
                prompt: format!("Summarize this wallet: {addr}"),
            }
        );
        prop_assert_eq!(parse(&parsed.canonical()), Some(parsed));
    }

    #[test]
    fn path_round_trip(a in address(), b in address(), sep in separator()) {
        let parsed = parse(&format!("/path{sep}{a}{sep}{b}")).unwrap();
        prop_assert_eq!(parsed.args(), vec![a.as_str(), b.as_str()]);
        prop_assert_eq!(parse(&parsed.canonical()), Some(parsed));
    }

    #[test]
    fn short_addresses_are_rejected(addr in proptest::string::string_regex(&format!("{B58}{{1,31}}")).unwrap()) {
        let line = format!("/wallet {addr}");
        prop_assert!(parse(&line).is_none());
    }
}

// --- Completion ---

proptest! {
    #[test]
    fn apply_completion_is_idempotent(text in "/?[a-z]{0,6}( +[a-z]{0,4})?", index in 0usize..4) {
        let candidate = &BUILTIN_COMMANDS[index];
        let (once, caret) = apply_completion(&text, candidate);
        let expected_prefix = format!("/{} ", candidate.trigger);
        prop_assert!(once.starts_with(&expected_prefix));
        prop_assert_eq!(caret, expected_prefix.len());
        prop_assert_eq!(apply_completion(&once, candidate), (once.clone(), caret));
    }

    #[test]
    fn controller_invariants_hold(events in proptest::collection::vec(event(), 1..40)) {
        let mut controller = CompletionController::new();
        for event in events {
            controller.handle(event);
            let suggestions = controller.suggestions();
            if suggestions.is_open() {
                prop_assert!(!suggestions.candidates().is_empty());
                prop_assert!(suggestions.highlighted_index() < suggestions.candidates().len());
            } else {
                prop_assert!(suggestions.highlighted().is_none());
                prop_assert!(suggestions.candidates().is_empty());
            }
            let snapshot = controller.snapshot();
            prop_assert!(snapshot.caret <= snapshot.text.chars().count());
        }
    }
}
