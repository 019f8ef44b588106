//! Module facts - aggregate entry points over whole modules
//!
//! Runs every extractor over one module body and bundles the results for the
//! assembly layer. Trees are independent, so batches fan out over rayon's
//! work-stealing pool; each tree is still extracted on a single thread.

use crate::ast::{load_tree, module_body, module_name_of, Node};
use crate::extractors::base::{
    ConformanceSet, ContractSet, FactsOptions, FunctionCall, FunctionSignature,
};
use crate::extractors::behaviour::extract_contracts;
use crate::extractors::calls::extract_calls_with_report;
use crate::extractors::conformance::extract_conformance;
use crate::extractors::signatures::extract_signatures;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything extracted from one module
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModuleFacts {
    /// Declared module name; `None` when a bare body was given
    pub module: Option<String>,
    pub contracts: ContractSet,
    pub conformance: ConformanceSet,
    pub signatures: Vec<FunctionSignature>,
    pub calls: Vec<FunctionCall>,
    /// The call walk hit `max_depth` somewhere in this module
    #[serde(default)]
    pub calls_truncated: bool,
}

impl ModuleFacts {
    /// Whether this module declares callbacks for others to implement
    pub fn is_behaviour(&self) -> bool {
        !self.contracts.is_empty()
    }
}

/// Extract every fact from a `defmodule` form or a bare module body
pub fn extract_module(node: &Node, options: &FactsOptions) -> ModuleFacts {
    let (module, body) = match module_body(node) {
        Some(body) => (module_name_of(node), body),
        None => (None, node),
    };

    let calls = extract_calls_with_report(body, &options.calls);
    let facts = ModuleFacts {
        contracts: extract_contracts(body, &options.extract),
        conformance: extract_conformance(body, &options.extract),
        signatures: extract_signatures(body, &options.extract),
        calls: calls.calls,
        calls_truncated: calls.truncated,
        module,
    };

    tracing::debug!(
        "Extracted facts for {}: {} callbacks, {} functions, {} signatures, {} calls",
        facts.module.as_deref().unwrap_or("<body>"),
        facts.contracts.callbacks.len() + facts.contracts.macrocallbacks.len(),
        facts.conformance.functions.len(),
        facts.signatures.len(),
        facts.calls.len()
    );
    facts
}

/// Extract many independent trees in parallel
///
/// Output order matches input order.
pub fn extract_batch(nodes: &[Node], options: &FactsOptions) -> Vec<ModuleFacts> {
    nodes
        .par_iter()
        .map(|node| extract_module(node, options))
        .collect()
}

/// Load a JSON tree from disk and extract it
pub fn extract_file(path: &Path, options: &FactsOptions) -> anyhow::Result<ModuleFacts> {
    let tree = load_tree(path)?;
    let facts = extract_module(&tree, options);
    tracing::debug!("Extracted facts from file: {}", path.display());
    Ok(facts)
}
