//! Quoted syntax tree model
//!
//! The upstream parser hands us the quoted form of a module: literals, lists,
//! 2-tuples and `(head, meta, args)` forms. This module holds the read-only
//! representation every extractor borrows, plus the navigation helpers they share.
//!
//! # Layout
//! - `mod.rs` - `Node`, `Form`, `Args`, `Meta` and navigation
//! - `builders.rs` - convenience constructors for building trees in code
//! - `json.rs` - total conversion from/to the parser's JSON wire format
//! - `render.rs` - source-like rendering for display and logging

mod builders;
pub mod json;
mod render;

pub use json::load_tree;
pub use render::render;

/// A node of the quoted tree.
///
/// `Unknown` absorbs anything the parser produced that fits none of the other
/// shapes, so every consumer can stay total without dynamic typing.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(String),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Node>),
    /// Literal tuple (keyword pairs are 2-tuples)
    Tuple(Vec<Node>),
    Form(Form),
    Unknown(serde_json::Value),
}

/// The `(head, meta, args)` 3-tuple
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    /// Atom for local forms, a `.` form for remote and anonymous calls
    pub head: Box<Node>,
    pub meta: Meta,
    pub args: Args,
}

/// Third element of a form
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    /// Ordered argument list (possibly empty)
    List(Vec<Node>),
    /// Context marker of a binding reference: `nil` or a module-scope atom
    Context(Option<String>),
}

/// Source-location metadata attached by the parser, when it was asked to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Meta {
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl Meta {
    pub fn at(line: u32, column: u32) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
        }
    }
}

impl Form {
    /// Head name when the head is an atom
    pub fn name(&self) -> Option<&str> {
        self.head.as_atom()
    }

    /// Argument list; `None` for binding references
    pub fn arguments(&self) -> Option<&[Node]> {
        match &self.args {
            Args::List(args) => Some(args),
            Args::Context(_) => None,
        }
    }

    /// Argument list, empty for binding references
    pub fn args_or_empty(&self) -> &[Node] {
        self.arguments().unwrap_or(&[])
    }

    pub fn is_binding_reference(&self) -> bool {
        self.name().is_some() && matches!(self.args, Args::Context(_))
    }
}

impl Node {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Node::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Node::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Node::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.as_atom() == Some("nil")
    }

    /// Head atom of a form node
    pub fn form_name(&self) -> Option<&str> {
        self.as_form().and_then(Form::name)
    }

    /// Location metadata for form nodes
    pub fn meta(&self) -> Option<&Meta> {
        self.as_form().map(|form| &form.meta)
    }

    /// A form whose head atom is `name` and which carries an argument list
    pub fn is_form_named(&self, name: &str) -> bool {
        self.as_form()
            .is_some_and(|form| form.name() == Some(name) && form.arguments().is_some())
    }

    /// Key/value view of a 2-tuple whose first element is an atom
    pub fn as_keyword_pair(&self) -> Option<(&str, &Node)> {
        match self {
            Node::Tuple(items) if items.len() == 2 => Some((items[0].as_atom()?, &items[1])),
            _ => None,
        }
    }

    /// Value stored under `key` in a keyword list node
    pub fn keyword_get(&self, key: &str) -> Option<&Node> {
        self.as_list()?
            .iter()
            .filter_map(Node::as_keyword_pair)
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Dotted name of an alias form (`Foo.Bar`), or `:atom` for a bare atom module
    pub fn module_name(&self) -> Option<String> {
        match self {
            Node::Atom(name) if name.starts_with("Elixir.") => {
                Some(name.trim_start_matches("Elixir.").to_string())
            }
            Node::Atom(name) => Some(format!(":{}", name)),
            Node::Form(form) if form.name() == Some("__aliases__") => {
                let segments = form
                    .args_or_empty()
                    .iter()
                    .map(|segment| match segment {
                        Node::Atom(name) => Some(name.clone()),
                        Node::Form(inner) if inner.is_binding_reference() => {
                            inner.name().map(str::to_string)
                        }
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                if segments.is_empty() {
                    None
                } else {
                    Some(segments.join("."))
                }
            }
            Node::Form(form)
                if form.name() == Some("__MODULE__") && form.is_binding_reference() =>
            {
                Some("__MODULE__".to_string())
            }
            _ => None,
        }
    }
}

/// Normalize a module body into its ordered top-level forms.
///
/// `nil` and unknown values yield no forms, a `__block__` yields its
/// expressions, a list yields its items and anything else is a single form.
pub fn body_forms(body: &Node) -> &[Node] {
    match body {
        Node::Atom(name) if name == "nil" => &[],
        Node::Unknown(_) => &[],
        Node::List(items) => items,
        Node::Form(form) if form.name() == Some("__block__") => form.args_or_empty(),
        other => std::slice::from_ref(other),
    }
}

/// The `do` body of a `defmodule Name do ... end` form
pub fn module_body(node: &Node) -> Option<&Node> {
    let form = node.as_form()?;
    if form.name() != Some("defmodule") {
        return None;
    }
    form.arguments()?.get(1)?.keyword_get("do")
}

/// Module name declared by a `defmodule` form
pub fn module_name_of(node: &Node) -> Option<String> {
    let form = node.as_form()?;
    if form.name() != Some("defmodule") {
        return None;
    }
    form.arguments()?.first()?.module_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_forms_normalization() {
        assert!(body_forms(&Node::nil()).is_empty());
        assert!(body_forms(&Node::List(vec![])).is_empty());

        let single = Node::call("foo", vec![]);
        assert_eq!(body_forms(&single).len(), 1);

        let block = Node::block(vec![Node::call("a", vec![]), Node::call("b", vec![])]);
        let forms = body_forms(&block);
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].form_name(), Some("a"));
        assert_eq!(forms[1].form_name(), Some("b"));
    }

    #[test]
    fn test_module_name_variants() {
        assert_eq!(
            Node::aliases(&["Foo", "Bar"]).module_name().as_deref(),
            Some("Foo.Bar")
        );
        assert_eq!(
            Node::atom("gen_server").module_name().as_deref(),
            Some(":gen_server")
        );
        assert_eq!(Node::Integer(1).module_name(), None);
    }

    #[test]
    fn test_module_body_and_name() {
        let module = Node::defmodule(&["MyApp", "Worker"], vec![Node::call("foo", vec![])]);
        assert_eq!(module_name_of(&module).as_deref(), Some("MyApp.Worker"));
        let body = module_body(&module).unwrap();
        assert_eq!(body_forms(body).len(), 1);

        assert!(module_body(&Node::call("foo", vec![])).is_none());
    }

    #[test]
    fn test_keyword_get() {
        let kw = Node::keyword(vec![("do", Node::Integer(1)), ("else", Node::Integer(2))]);
        assert_eq!(kw.keyword_get("else"), Some(&Node::Integer(2)));
        assert_eq!(kw.keyword_get("after"), None);
        assert_eq!(Node::Integer(3).keyword_get("do"), None);
    }

    #[test]
    fn test_binding_reference_shape() {
        let var = Node::var("x");
        assert!(var.as_form().unwrap().is_binding_reference());
        let call = Node::call("x", vec![]);
        assert!(!call.as_form().unwrap().is_binding_reference());
    }
}
