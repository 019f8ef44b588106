//! Behaviour-conformance extractor
//!
//! Collects what a module body claims to implement: `@behaviour` declarations
//! (duplicates kept), defined function identities regardless of visibility,
//! `defoverridable` markers and `@impl` annotations. Queries over the result
//! live in `queries.rs`.

mod overrides;
mod queries;

use crate::ast::{body_forms, Node};
use crate::extractors::base::{
    ConformanceDeclaration, ConformanceSet, ExtractError, ExtractOptions, FunctionId,
    ImplAnnotation, ImplTarget, Location,
};
use crate::extractors::classifier::{
    attribute_parts, classify, default_argument_count, function_head, NodeKind,
};
use std::collections::HashSet;
use tracing::debug;

pub use overrides::override_markers;

impl ConformanceDeclaration {
    /// Build from a `@behaviour Target` annotation
    pub fn try_from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ExtractError> {
        if classify(node) != NodeKind::Behaviour {
            return Err(ExtractError::not_a_behaviour(node));
        }
        let (_, value) = attribute_parts(node).ok_or_else(|| ExtractError::not_a_behaviour(node))?;
        let target = value
            .module_name()
            .ok_or_else(|| ExtractError::not_a_behaviour(node))?;
        Ok(ConformanceDeclaration {
            target,
            location: Location::from_meta(node.meta(), options.include_location),
        })
    }

    /// # Panics
    /// Panics with the `NotABehaviorDeclaration` message for any other node.
    pub fn from_node(node: &Node, options: &ExtractOptions) -> Self {
        match Self::try_from_node(node, options) {
            Ok(declaration) => declaration,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Identities defined by one function definition form, lowest arity first.
///
/// Default arguments (`\\`) define one extra identity per default.
pub fn definition_ids(node: &Node) -> Vec<FunctionId> {
    let Some((name, params)) = function_head(node) else {
        return Vec::new();
    };
    let arity = params.len();
    let lowest = arity - default_argument_count(params);
    (lowest..=arity)
        .map(|arity| FunctionId::new(name, arity))
        .collect()
}

fn impl_target(value: &Node) -> Option<ImplTarget> {
    match value.as_atom() {
        Some("true") => Some(ImplTarget::Enabled),
        Some("false") => Some(ImplTarget::Disabled),
        _ => value.module_name().map(ImplTarget::Module),
    }
}

/// Collect the conformance facts of a module body
pub fn extract_conformance(body: &Node, options: &ExtractOptions) -> ConformanceSet {
    let mut conformance = ConformanceSet::default();
    let mut seen: HashSet<FunctionId> = HashSet::new();
    let mut pending_impl: Option<ImplTarget> = None;

    for form in body_forms(body) {
        match classify(form) {
            NodeKind::Behaviour => match ConformanceDeclaration::try_from_node(form, options) {
                Ok(declaration) => conformance.declarations.push(declaration),
                Err(err) => debug!("Skipping behaviour declaration: {}", err),
            },
            NodeKind::Impl => {
                pending_impl = attribute_parts(form).and_then(|(_, value)| impl_target(value));
            }
            NodeKind::FunctionDef(_) => {
                let ids = definition_ids(form);
                if let (Some(target), Some(primary)) = (pending_impl.take(), ids.last()) {
                    conformance.impls.push(ImplAnnotation {
                        target,
                        function: primary.clone(),
                    });
                }
                for id in ids {
                    if seen.insert(id.clone()) {
                        conformance.functions.push(id);
                    }
                }
            }
            NodeKind::Overridable => conformance.overrides.extend(override_markers(form)),
            _ => {}
        }
    }

    debug!(
        "Extracted {} behaviour declarations, {} functions, {} overrides",
        conformance.declarations.len(),
        conformance.functions.len(),
        conformance.overrides.len()
    );
    conformance
}
