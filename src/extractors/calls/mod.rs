//! Call-site extractor
//!
//! Depth-bounded walk collecting call expressions from arbitrarily nested
//! code. The walk runs on an explicit work stack carrying each node's depth, so
//! adversarial nesting cannot exhaust the native stack.
//!
//! - A call expression is emitted, and its arguments are walked on the next ply.
//! - Definitions and control forms are never emitted; only their call-bearing
//!   positions (see `forms.rs`) are walked.
//! - Nodes deeper than `max_depth` are not visited. Calls below the bound are
//!   dropped silently; `extract_calls_with_report` says whether that happened.

mod forms;

use crate::ast::Node;
use crate::extractors::base::{
    CallExtraction, CallKind, CallOptions, ExtractError, FunctionCall, Location,
};
use crate::extractors::classifier::{classify, expect_call, remote_target, NodeKind};
use tracing::{debug, trace};

impl FunctionCall {
    /// Build a local call record from a call expression node
    pub fn try_from_node(node: &Node, options: &CallOptions) -> Result<Self, ExtractError> {
        let form = expect_call(node)?;
        let name = form
            .name()
            .ok_or_else(|| ExtractError::not_a_call(node, "not a local call form"))?;
        let arguments = form.args_or_empty();
        Ok(FunctionCall {
            kind: CallKind::Local,
            name: name.to_string(),
            arity: arguments.len(),
            arguments: arguments.to_vec(),
            location: Location::from_meta(Some(&form.meta), options.include_location),
        })
    }

    /// # Panics
    /// Panics with the `NotACallExpression` message for any other node.
    pub fn from_node(node: &Node, options: &CallOptions) -> Self {
        match Self::try_from_node(node, options) {
            Ok(call) => call,
            Err(err) => panic!("{}", err),
        }
    }

    fn remote_from_node(node: &Node, options: &CallOptions) -> Option<Self> {
        let form = node.as_form()?;
        let (target, function) = remote_target(form)?;
        let module = target.module_name()?;
        let arguments = form.args_or_empty();
        Some(FunctionCall {
            kind: CallKind::Remote { module },
            name: function.to_string(),
            arity: arguments.len(),
            arguments: arguments.to_vec(),
            location: Location::from_meta(Some(&form.meta), options.include_location),
        })
    }
}

/// Walk positions below one node, in source order
fn children<'a>(node: &'a Node, kind: NodeKind) -> Vec<&'a Node> {
    let form = match node {
        Node::List(items) | Node::Tuple(items) => return items.iter().collect(),
        Node::Form(form) => form,
        _ => return Vec::new(),
    };

    match kind {
        NodeKind::Call | NodeKind::Operator => form.args_or_empty().iter().collect(),
        NodeKind::RemoteCall | NodeKind::Unrecognized => {
            let mut out = Vec::new();
            match remote_target(form) {
                Some((target, _)) => out.push(target),
                None => out.push(form.head.as_ref()),
            }
            out.extend(form.args_or_empty());
            out
        }
        NodeKind::Clause => form.args_or_empty().get(1).into_iter().collect(),
        NodeKind::FunctionDef(_) => forms::definition_positions(form),
        NodeKind::ControlForm(control) => forms::control_positions(control, form),
        NodeKind::Callback(_)
        | NodeKind::Spec
        | NodeKind::OptionalCallbacks
        | NodeKind::Behaviour
        | NodeKind::Impl
        | NodeKind::Overridable
        | NodeKind::Doc
        | NodeKind::ModuleDoc
        | NodeKind::Attribute
        | NodeKind::BindingReference => Vec::new(),
    }
}

/// Collect call sites below `input`, reporting whether the depth bound cut the walk
pub fn extract_calls_with_report(input: &Node, options: &CallOptions) -> CallExtraction {
    let mut extraction = CallExtraction::default();
    let mut stack: Vec<(&Node, usize)> = vec![(input, 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth > options.max_depth {
            extraction.truncated = true;
            trace!("Depth bound {} reached, dropping subtree", options.max_depth);
            continue;
        }

        let kind = classify(node);
        match kind {
            NodeKind::Call => match FunctionCall::try_from_node(node, options) {
                Ok(call) => extraction.calls.push(call),
                Err(err) => trace!("Unexpected call shape: {}", err),
            },
            NodeKind::RemoteCall if options.include_remote => {
                if let Some(call) = FunctionCall::remote_from_node(node, options) {
                    extraction.calls.push(call);
                }
            }
            _ => {}
        }

        let next = children(node, kind);
        stack.extend(next.into_iter().rev().map(|child| (child, depth + 1)));
    }

    debug!(
        "Extracted {} call sites (truncated: {})",
        extraction.calls.len(),
        extraction.truncated
    );
    extraction
}

/// Collect call sites below `input` in source order
pub fn extract_calls(input: &Node, options: &CallOptions) -> Vec<FunctionCall> {
    extract_calls_with_report(input, options).calls
}

/// Collect call sites from an ordered sequence of nodes
pub fn extract_calls_from(nodes: &[Node], options: &CallOptions) -> Vec<FunctionCall> {
    nodes
        .iter()
        .flat_map(|node| extract_calls(node, options))
        .collect()
}
