// Record types produced by the extractors
//
// Every record is built once by its extractor and never mutated afterwards.
// Ordered fields keep source order end-to-end.

use crate::ast::{Meta, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Start position of the form a record was built from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    /// Start line number (1-based)
    pub start_line: u32,
    /// Start column number (1-based), when the parser tracked columns
    pub start_column: Option<u32>,
}

impl Location {
    /// Location from form metadata; absent when disabled or when no line was recorded
    pub fn from_meta(meta: Option<&Meta>, include_location: bool) -> Option<Location> {
        if !include_location {
            return None;
        }
        let meta = meta?;
        Some(Location {
            start_line: meta.line?,
            start_column: meta.column,
        })
    }
}

/// Identity of a function within a module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId {
    pub name: String,
    pub arity: usize,
}

impl FunctionId {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

impl From<(&str, usize)> for FunctionId {
    fn from((name, arity): (&str, usize)) -> Self {
        FunctionId::new(name, arity)
    }
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Which annotation declared a contract entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    Callback,
    Macrocallback,
}

impl CallbackKind {
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "callback" => Some(CallbackKind::Callback),
            "macrocallback" => Some(CallbackKind::Macrocallback),
            _ => None,
        }
    }
}

impl std::fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallbackKind::Callback => write!(f, "callback"),
            CallbackKind::Macrocallback => write!(f, "macrocallback"),
        }
    }
}

/// Annotation a signature record came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpecKind {
    Spec,
    Callback,
    Macrocallback,
}

impl SpecKind {
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "spec" => Some(SpecKind::Spec),
            "callback" => Some(SpecKind::Callback),
            "macrocallback" => Some(SpecKind::Macrocallback),
            _ => None,
        }
    }

    pub fn callback_kind(self) -> Option<CallbackKind> {
        match self {
            SpecKind::Spec => None,
            SpecKind::Callback => Some(CallbackKind::Callback),
            SpecKind::Macrocallback => Some(CallbackKind::Macrocallback),
        }
    }
}

impl std::fmt::Display for SpecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecKind::Spec => write!(f, "spec"),
            SpecKind::Callback => write!(f, "callback"),
            SpecKind::Macrocallback => write!(f, "macrocallback"),
        }
    }
}

/// Function or callback type signature, decomposed structurally
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    /// Always the length of `parameter_types`
    pub arity: usize,
    pub spec_kind: SpecKind,
    /// Raw parameter type expressions, in order
    pub parameter_types: Vec<Node>,
    /// Raw return type expression (unions are not flattened here)
    pub return_type: Node,
    /// Type variable name -> constraint expression from a trailing `when`
    pub type_constraints: BTreeMap<String, Node>,
    pub has_type_constraints: bool,
    pub location: Option<Location>,
}

/// One declared callback or macro callback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallbackRecord {
    pub name: String,
    pub arity: usize,
    pub kind: CallbackKind,
    /// The full signature expression, including any `when` clause
    pub signature: Node,
    pub parameter_types: Vec<Node>,
    pub return_type: Node,
    pub is_optional: bool,
    pub documentation: Option<String>,
    pub location: Option<Location>,
}

/// Contracts declared by one module body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContractSet {
    pub documentation: Option<String>,
    pub callbacks: Vec<CallbackRecord>,
    pub macrocallbacks: Vec<CallbackRecord>,
}

/// `@behaviour Target`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConformanceDeclaration {
    /// Dotted module name, or `:atom` for a bare atom module
    pub target: String,
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OverrideSource {
    ExplicitList,
    ModuleReference,
}

/// One entry of a `defoverridable` form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverrideMarker {
    /// Function name, or the referenced module for module references
    pub name: String,
    /// `None` for module references
    pub arity: Option<usize>,
    pub source: OverrideSource,
}

/// Argument of an `@impl` annotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type", content = "module")]
pub enum ImplTarget {
    /// `@impl true`
    Enabled,
    /// `@impl false`
    Disabled,
    /// `@impl SomeBehaviour`
    Module(String),
}

/// `@impl` bound to the function definition that follows it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImplAnnotation {
    pub target: ImplTarget,
    pub function: FunctionId,
}

/// Contracts fulfilled by one module body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConformanceSet {
    pub declarations: Vec<ConformanceDeclaration>,
    /// Defined function identities, first-definition order, no duplicates
    pub functions: Vec<FunctionId>,
    pub overrides: Vec<OverrideMarker>,
    pub impls: Vec<ImplAnnotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CallKind {
    Local,
    Remote { module: String },
}

/// One call site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub kind: CallKind,
    pub name: String,
    /// Always the length of `arguments`
    pub arity: usize,
    /// Raw argument subtrees, in order
    pub arguments: Vec<Node>,
    pub location: Option<Location>,
}

/// Call sites plus whether the depth bound cut anything off
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CallExtraction {
    pub calls: Vec<FunctionCall>,
    pub truncated: bool,
}
