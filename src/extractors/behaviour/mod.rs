//! Behaviour-contract extractor
//!
//! Walks a module body and collects the contracts it declares:
//! - `@callback` / `@macrocallback` signatures, in source order
//! - `@optional_callbacks` markers, applied by name/arity membership
//! - `@doc` bound to the next callback only
//! - `@moduledoc`, captured once
//!
//! Optional markers are gathered over the whole body first, then applied while
//! the records are built, so their position relative to the callbacks does not
//! matter.

pub mod docs;
mod optional;

use crate::ast::{body_forms, Node};
use crate::extractors::base::{
    CallbackKind, CallbackRecord, ContractSet, ExtractError, ExtractOptions, FunctionId,
    Location, SpecKind,
};
use crate::extractors::classifier::{attribute_parts, classify, NodeKind};
use crate::extractors::signatures::decompose;
use docs::{doc_value, DocSlot, DocValue};
use tracing::debug;

pub use optional::{collect_optional, optional_entries};

impl CallbackRecord {
    /// Build from a `@callback` / `@macrocallback` annotation.
    ///
    /// The record starts required and undocumented; the contract walk fills in
    /// both before handing it out.
    pub fn try_from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ExtractError> {
        let (attribute, expr) =
            attribute_parts(node).ok_or_else(|| ExtractError::not_a_signature(node))?;
        let kind = SpecKind::from_attribute(attribute)
            .and_then(SpecKind::callback_kind)
            .ok_or_else(|| ExtractError::not_a_signature(node))?;
        let parts = decompose(expr)?;

        Ok(CallbackRecord {
            name: parts.name.to_string(),
            arity: parts.params.len(),
            kind,
            signature: expr.clone(),
            parameter_types: parts.params.to_vec(),
            return_type: parts.return_type.clone(),
            is_optional: false,
            documentation: None,
            location: Location::from_meta(node.meta(), options.include_location),
        })
    }

    /// # Panics
    /// Panics with the `NotASignature` message when the node is not a callback.
    pub fn from_node(node: &Node, options: &ExtractOptions) -> Self {
        match Self::try_from_node(node, options) {
            Ok(record) => record,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn with_documentation(self, documentation: Option<String>) -> Self {
        Self {
            documentation,
            ..self
        }
    }

    pub fn with_optional(self, is_optional: bool) -> Self {
        Self {
            is_optional,
            ..self
        }
    }

    pub fn id(&self) -> FunctionId {
        FunctionId::new(self.name.clone(), self.arity)
    }
}

impl ContractSet {
    /// Callbacks followed by macro callbacks
    pub fn all_callbacks(&self) -> impl Iterator<Item = &CallbackRecord> {
        self.callbacks.iter().chain(self.macrocallbacks.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty() && self.macrocallbacks.is_empty()
    }

    /// Identities implementers must supply
    pub fn required_callbacks(&self) -> Vec<FunctionId> {
        self.all_callbacks()
            .filter(|record| !record.is_optional)
            .map(CallbackRecord::id)
            .collect()
    }

    pub fn optional_callbacks(&self) -> Vec<FunctionId> {
        self.all_callbacks()
            .filter(|record| record.is_optional)
            .map(CallbackRecord::id)
            .collect()
    }

    pub fn find(&self, name: &str, arity: usize) -> Option<&CallbackRecord> {
        self.all_callbacks()
            .find(|record| record.name == name && record.arity == arity)
    }
}

/// Collect the contracts a module body declares
pub fn extract_contracts(body: &Node, options: &ExtractOptions) -> ContractSet {
    let forms = body_forms(body);
    let optional = collect_optional(forms);

    let mut contracts = ContractSet::default();
    let mut pending_doc = DocSlot::default();
    let mut module_doc_seen = false;

    for form in forms {
        match classify(form) {
            NodeKind::ModuleDoc => {
                if module_doc_seen {
                    continue;
                }
                if let Some((_, value)) = attribute_parts(form) {
                    match doc_value(value) {
                        DocValue::Text(text) => {
                            contracts.documentation = Some(text);
                            module_doc_seen = true;
                        }
                        DocValue::Hidden => module_doc_seen = true,
                        DocValue::Metadata | DocValue::Unsupported => {}
                    }
                }
            }
            NodeKind::Doc => {
                if let Some((_, value)) = attribute_parts(form) {
                    pending_doc.annotate(value);
                }
            }
            NodeKind::Callback(kind) => {
                let documentation = pending_doc.take();
                let record = match CallbackRecord::try_from_node(form, options) {
                    Ok(record) => record,
                    Err(err) => {
                        debug!("Skipping malformed {}: {}", kind, err);
                        continue;
                    }
                };
                let is_optional = optional.contains(&record.id());
                let record = record
                    .with_documentation(documentation)
                    .with_optional(is_optional);
                match kind {
                    CallbackKind::Callback => contracts.callbacks.push(record),
                    CallbackKind::Macrocallback => contracts.macrocallbacks.push(record),
                }
            }
            NodeKind::FunctionDef(_) => {
                // the pending @doc documents this definition
                pending_doc.take();
            }
            _ => {}
        }
    }

    debug!(
        "Extracted {} callbacks and {} macro callbacks ({} optional markers)",
        contracts.callbacks.len(),
        contracts.macrocallbacks.len(),
        optional.len()
    );
    contracts
}

/// Whether the body declares at least one well-formed callback
pub fn defines_behaviour(body: &Node) -> bool {
    body_forms(body).iter().any(|form| {
        matches!(classify(form), NodeKind::Callback(_))
            && attribute_parts(form).is_some_and(|(_, expr)| decompose(expr).is_ok())
    })
}
