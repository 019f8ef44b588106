// Walkable positions of non-call forms
//
// Argument lists of control forms are not uniformly shaped, so each form's
// call-bearing positions are listed explicitly. Positions come back in source
// order.

use crate::ast::{Form, Node};
use crate::extractors::classifier::ControlForm;

/// Keyword blocks whose values are plain expressions
const EXPRESSION_BLOCKS: &[&str] = &["do", "else", "after", "into", "uniq", "reduce"];

/// Keyword blocks whose values are `->` clause lists
const CLAUSE_BLOCKS: &[&str] = &["rescue", "catch"];

/// Value of a `->` arm, and its patterns only when they are conditions (`cond`)
fn clause_parts<'a>(clause: &'a Node, with_patterns: bool, out: &mut Vec<&'a Node>) {
    let Some(form) = clause.as_form().filter(|form| form.name() == Some("->")) else {
        out.push(clause);
        return;
    };
    if let Some([patterns, body]) = form.arguments() {
        if with_patterns {
            match patterns.as_list() {
                Some(items) => out.extend(items.iter()),
                None => out.push(patterns),
            }
        }
        out.push(body);
    }
}

/// Bodies of a clause list (or a plain expression standing in for one)
fn clause_bodies<'a>(value: &'a Node, with_patterns: bool, out: &mut Vec<&'a Node>) {
    match value.as_list() {
        Some(clauses) => {
            for clause in clauses {
                clause_parts(clause, with_patterns, out);
            }
        }
        None => clause_parts(value, with_patterns, out),
    }
}

/// `do:`/`else:`/`rescue:`... entries of a trailing keyword block
fn block_positions<'a>(block: &'a Node, out: &mut Vec<&'a Node>) {
    let Some(entries) = block.as_list() else {
        return;
    };
    for (key, value) in entries.iter().filter_map(Node::as_keyword_pair) {
        if CLAUSE_BLOCKS.contains(&key) {
            clause_bodies(value, false, out);
        } else if EXPRESSION_BLOCKS.contains(&key) {
            // `case`-like blocks (`else` of `with`, `do` of `receive`) hold clauses
            if is_clause_list(value) {
                clause_bodies(value, false, out);
            } else {
                out.push(value);
            }
        }
    }
}

fn is_clause_list(node: &Node) -> bool {
    node.as_list().is_some_and(|items| {
        !items.is_empty() && items.iter().all(|item| item.is_form_named("->"))
    })
}

/// Whether a node is a trailing `[do: ...]`-style keyword block
fn is_keyword_block(node: &Node) -> bool {
    node.as_list().is_some_and(|entries| {
        !entries.is_empty() && entries.iter().all(|entry| entry.as_keyword_pair().is_some())
    })
}

/// `pattern <- expr` contributes both sides; anything else is itself
fn generator_positions<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    match node.as_form() {
        Some(form) if form.name() == Some("<-") => out.extend(form.args_or_empty().iter()),
        _ => out.push(node),
    }
}

/// Call-bearing positions of a definition form (`def`, `defp`, ...)
pub(super) fn definition_positions(form: &Form) -> Vec<&Node> {
    let mut out = Vec::new();
    if let Some(block) = form.args_or_empty().get(1) {
        block_positions(block, &mut out);
    }
    out
}

/// Call-bearing positions of a control form
pub(super) fn control_positions(kind: ControlForm, form: &Form) -> Vec<&Node> {
    let args = form.args_or_empty();
    let mut out = Vec::new();

    match kind {
        ControlForm::If | ControlForm::Unless => {
            if let Some(condition) = args.first() {
                out.push(condition);
            }
            if let Some(block) = args.get(1) {
                block_positions(block, &mut out);
            }
        }
        ControlForm::Case => {
            if let Some(subject) = args.first() {
                out.push(subject);
            }
            if let Some(block) = args.get(1) {
                block_positions(block, &mut out);
            }
        }
        ControlForm::Cond => {
            if let Some(clauses) = args.first().and_then(|block| block.keyword_get("do")) {
                clause_bodies(clauses, true, &mut out);
            }
        }
        ControlForm::With | ControlForm::For => {
            let (generators, block) = match args.split_last() {
                Some((last, rest)) if is_keyword_block(last) => (rest, Some(last)),
                _ => (args, None),
            };
            for generator in generators {
                generator_positions(generator, &mut out);
            }
            if let Some(block) = block {
                block_positions(block, &mut out);
            }
        }
        ControlForm::Try | ControlForm::Receive => {
            if let Some(block) = args.first() {
                block_positions(block, &mut out);
            }
        }
        ControlForm::Fn => {
            for clause in args {
                clause_parts(clause, false, &mut out);
            }
        }
        ControlForm::Block | ControlForm::Declaration => out.extend(args.iter()),
        ControlForm::Module => {
            if let Some(block) = args.last() {
                block_positions(block, &mut out);
            }
        }
        ControlForm::Directive | ControlForm::Quote => {}
        ControlForm::Syntax => match form.name() {
            Some("__aliases__") => {}
            // `left :: type`, only the left side is an expression
            Some("::") => out.extend(args.first()),
            _ => out.extend(args.iter()),
        },
    }

    out
}
