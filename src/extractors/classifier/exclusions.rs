// Forms that look like calls in the quoted tree but are not call sites
//
// Single source of truth: every extractor consults these tables through the
// classifier, never through its own copy.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Control-flow, definition, import and special-syntax keywords
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    // definitions
    "def",
    "defp",
    "defmacro",
    "defmacrop",
    "defguard",
    "defguardp",
    "defdelegate",
    "defmodule",
    "defprotocol",
    "defimpl",
    "defstruct",
    "defexception",
    "defoverridable",
    // control flow
    "if",
    "unless",
    "case",
    "cond",
    "with",
    "for",
    "try",
    "receive",
    "fn",
    // imports
    "import",
    "require",
    "alias",
    "use",
    // quoting
    "quote",
    "unquote",
    "unquote_splicing",
    // special syntax
    "__block__",
    "__aliases__",
    "__MODULE__",
    "__ENV__",
    "__DIR__",
    "__CALLER__",
    "__STACKTRACE__",
    "{}",
    "%{}",
    "%",
    "<<>>",
    "@",
    "&",
    "^",
    ".",
    "->",
    "<-",
    "::",
    "\\\\",
    "when",
];

/// Arithmetic, comparison, boolean, list/string, range and pipe operators
pub const EXCLUDED_OPERATORS: &[&str] = &[
    // arithmetic
    "+", "-", "*", "/", "div", "rem",
    // comparison
    "==", "!=", "===", "!==", "<", ">", "<=", ">=", "=~",
    // boolean
    "and", "or", "not", "&&", "||", "!", "in", "not in",
    // list, string and binary
    "++", "--", "<>", "|", "..", "..//", "//", "**",
    // bitwise
    "&&&", "|||", "^^^", "~~~", "<<<", ">>>",
    // pipe and arrows
    "|>", "<|>", "<~", "~>", "<<~", "~>>", "<~>",
    // match
    "=",
];

static EXCLUDED_KEYWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| EXCLUDED_KEYWORDS.iter().copied().collect());

static EXCLUDED_OPERATOR_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| EXCLUDED_OPERATORS.iter().copied().collect());

pub fn is_excluded_keyword(name: &str) -> bool {
    EXCLUDED_KEYWORD_SET.contains(name)
}

pub fn is_operator(name: &str) -> bool {
    EXCLUDED_OPERATOR_SET.contains(name)
}

/// Names that never denote a call site
pub fn is_excluded(name: &str) -> bool {
    is_excluded_keyword(name) || is_operator(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_and_operators_are_disjoint() {
        for keyword in EXCLUDED_KEYWORDS {
            assert!(!is_operator(keyword), "{} listed twice", keyword);
        }
    }

    #[test]
    fn test_membership() {
        assert!(is_excluded("case"));
        assert!(is_excluded("|>"));
        assert!(is_excluded("__aliases__"));
        assert!(!is_excluded("handle_call"));
        assert!(!is_excluded("raise"));
    }
}
