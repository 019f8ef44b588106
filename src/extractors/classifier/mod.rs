//! Node classifier
//!
//! Tags a tree node with one kind out of a closed set. Classification is total:
//! malformed or unexpected input maps to `NodeKind::Unrecognized`, never to a
//! panic. Every other extractor decides what a node *is* through this module.

pub mod exclusions;

use crate::ast::{Args, Form, Node};
use crate::extractors::base::{CallbackKind, ExtractError};

pub use exclusions::{is_excluded, is_excluded_keyword, is_operator};

/// Function definition macros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefKind {
    Def,
    Defp,
    Defmacro,
    Defmacrop,
    Defguard,
    Defguardp,
    Defdelegate,
}

impl DefKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "def" => Some(DefKind::Def),
            "defp" => Some(DefKind::Defp),
            "defmacro" => Some(DefKind::Defmacro),
            "defmacrop" => Some(DefKind::Defmacrop),
            "defguard" => Some(DefKind::Defguard),
            "defguardp" => Some(DefKind::Defguardp),
            "defdelegate" => Some(DefKind::Defdelegate),
            _ => None,
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, DefKind::Defp | DefKind::Defmacrop | DefKind::Defguardp)
    }
}

/// Forms that are not call sites but whose sub-positions may hold calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlForm {
    If,
    Unless,
    Case,
    Cond,
    With,
    For,
    Try,
    Receive,
    Fn,
    Block,
    /// `defmodule`, `defprotocol`, `defimpl`
    Module,
    /// `defstruct`, `defexception`
    Declaration,
    /// `import`, `require`, `alias`, `use`
    Directive,
    /// `quote`, `unquote`, `unquote_splicing`
    Quote,
    /// Data constructors and syntax markers (`{}`, `%{}`, `<<>>`, `&`, `.`, `::`...)
    Syntax,
}

impl ControlForm {
    fn from_name(name: &str) -> Option<Self> {
        let form = match name {
            "if" => ControlForm::If,
            "unless" => ControlForm::Unless,
            "case" => ControlForm::Case,
            "cond" => ControlForm::Cond,
            "with" => ControlForm::With,
            "for" => ControlForm::For,
            "try" => ControlForm::Try,
            "receive" => ControlForm::Receive,
            "fn" => ControlForm::Fn,
            "__block__" => ControlForm::Block,
            "defmodule" | "defprotocol" | "defimpl" => ControlForm::Module,
            "defstruct" | "defexception" => ControlForm::Declaration,
            "import" | "require" | "alias" | "use" => ControlForm::Directive,
            "quote" | "unquote" | "unquote_splicing" => ControlForm::Quote,
            other if is_excluded_keyword(other) => ControlForm::Syntax,
            _ => return None,
        };
        Some(form)
    }
}

/// Closed classification of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `@callback` / `@macrocallback` with a value
    Callback(CallbackKind),
    /// `@spec` with a value
    Spec,
    /// `@optional_callbacks`
    OptionalCallbacks,
    /// `@behaviour`
    Behaviour,
    /// `@impl`
    Impl,
    /// `defoverridable`
    Overridable,
    /// `@doc`
    Doc,
    /// `@moduledoc`
    ModuleDoc,
    /// Any other module attribute, or an attribute read
    Attribute,
    FunctionDef(DefKind),
    ControlForm(ControlForm),
    /// Pattern-dispatch arm `patterns -> body`
    Clause,
    /// Local call site
    Call,
    /// `Module.fun(args)`
    RemoteCall,
    /// Identifier without an argument list
    BindingReference,
    Operator,
    Unrecognized,
}

/// `@name value` decomposed into the attribute name and its single value
pub fn attribute_parts(node: &Node) -> Option<(&str, &Node)> {
    let form = node.as_form()?;
    if form.name() != Some("@") {
        return None;
    }
    let inner = match form.arguments()? {
        [inner] => inner.as_form()?,
        _ => return None,
    };
    match inner.arguments()? {
        [value] => Some((inner.name()?, value)),
        _ => None,
    }
}

/// Classify one node
pub fn classify(node: &Node) -> NodeKind {
    let Some(form) = node.as_form() else {
        return NodeKind::Unrecognized;
    };

    let Some(name) = form.name() else {
        return if remote_target(form).is_some() {
            NodeKind::RemoteCall
        } else {
            NodeKind::Unrecognized
        };
    };

    if name == "@" {
        return classify_attribute(node);
    }

    if let Args::Context(_) = form.args {
        return NodeKind::BindingReference;
    }

    if name == "->" {
        return NodeKind::Clause;
    }
    if name == "defoverridable" {
        return NodeKind::Overridable;
    }
    if let Some(kind) = DefKind::from_name(name) {
        return NodeKind::FunctionDef(kind);
    }
    if let Some(control) = ControlForm::from_name(name) {
        return NodeKind::ControlForm(control);
    }
    if is_operator(name) {
        return NodeKind::Operator;
    }
    NodeKind::Call
}

fn classify_attribute(node: &Node) -> NodeKind {
    let Some((name, _)) = attribute_parts(node) else {
        return NodeKind::Attribute;
    };
    match name {
        "callback" => NodeKind::Callback(CallbackKind::Callback),
        "macrocallback" => NodeKind::Callback(CallbackKind::Macrocallback),
        "spec" => NodeKind::Spec,
        "optional_callbacks" => NodeKind::OptionalCallbacks,
        "behaviour" => NodeKind::Behaviour,
        "impl" => NodeKind::Impl,
        "doc" => NodeKind::Doc,
        "moduledoc" => NodeKind::ModuleDoc,
        _ => NodeKind::Attribute,
    }
}

/// Module and function name of a remote call head `Target.fun`
pub fn remote_target(form: &Form) -> Option<(&Node, &str)> {
    form.arguments()?;
    let dot = form.head.as_form()?;
    if dot.name() != Some(".") {
        return None;
    }
    match dot.arguments()? {
        [target, Node::Atom(function)] => Some((target, function.as_str())),
        _ => None,
    }
}

pub fn is_callback(node: &Node) -> bool {
    matches!(classify(node), NodeKind::Callback(_))
}

pub fn is_optional_callbacks(node: &Node) -> bool {
    classify(node) == NodeKind::OptionalCallbacks
}

pub fn is_behaviour(node: &Node) -> bool {
    classify(node) == NodeKind::Behaviour
}

pub fn is_overridable(node: &Node) -> bool {
    classify(node) == NodeKind::Overridable
}

pub fn is_doc(node: &Node) -> bool {
    classify(node) == NodeKind::Doc
}

pub fn is_moduledoc(node: &Node) -> bool {
    classify(node) == NodeKind::ModuleDoc
}

pub fn is_function_def(node: &Node) -> bool {
    matches!(classify(node), NodeKind::FunctionDef(_))
}

pub fn is_control_form(node: &Node) -> bool {
    matches!(classify(node), NodeKind::ControlForm(_))
}

pub fn is_call(node: &Node) -> bool {
    classify(node) == NodeKind::Call
}

/// Checked form of `is_call`, explaining the rejection
pub fn expect_call(node: &Node) -> Result<&Form, ExtractError> {
    match classify(node) {
        NodeKind::Call => node
            .as_form()
            .ok_or_else(|| ExtractError::not_a_call(node, "not a form")),
        NodeKind::BindingReference => Err(ExtractError::not_a_call(node, "binding reference")),
        NodeKind::Operator => Err(ExtractError::not_a_call(node, "operator")),
        NodeKind::FunctionDef(_)
        | NodeKind::ControlForm(_)
        | NodeKind::Clause
        | NodeKind::Overridable => Err(ExtractError::not_a_call(node, "excluded keyword form")),
        NodeKind::Callback(_)
        | NodeKind::Spec
        | NodeKind::OptionalCallbacks
        | NodeKind::Behaviour
        | NodeKind::Impl
        | NodeKind::Doc
        | NodeKind::ModuleDoc
        | NodeKind::Attribute => Err(ExtractError::not_a_call(node, "module attribute")),
        NodeKind::RemoteCall => Err(ExtractError::not_a_call(node, "remote call")),
        NodeKind::Unrecognized => Err(ExtractError::not_a_call(node, "not a local call form")),
    }
}

/// Name and parameters of a function definition head
///
/// Handles `name(params)`, `name(params) when guard` and the bare `name`
/// (zero parameters).
pub fn function_head(node: &Node) -> Option<(&str, &[Node])> {
    let form = node.as_form()?;
    DefKind::from_name(form.name()?)?;
    let mut head = form.arguments()?.first()?;

    if let Some(guarded) = head.as_form() {
        if guarded.name() == Some("when") {
            head = guarded.arguments()?.first()?;
        }
    }

    // operator names (`div`, `<~>`) are valid definition names
    let head = head.as_form()?;
    Some((head.name()?, head.arguments().unwrap_or(&[])))
}

/// Count of parameters carrying a `\\` default value
pub fn default_argument_count(params: &[Node]) -> usize {
    params
        .iter()
        .filter(|param| param.is_form_named("\\\\"))
        .count()
}
