// Convenience constructors for quoted trees
//
// Callers that already hold a tree never need these; they exist for code that
// assembles small trees by hand (tests, synthetic contracts, fixtures).

use super::{Args, Form, Meta, Node};

impl Node {
    pub fn nil() -> Node {
        Node::atom("nil")
    }

    pub fn atom(name: &str) -> Node {
        Node::Atom(name.to_string())
    }

    pub fn string(text: &str) -> Node {
        Node::String(text.to_string())
    }

    /// Generic form with an atom head
    pub fn form(name: &str, meta: Meta, args: Vec<Node>) -> Node {
        Node::Form(Form {
            head: Box::new(Node::atom(name)),
            meta,
            args: Args::List(args),
        })
    }

    /// Binding reference (`x`), context `nil`
    pub fn var(name: &str) -> Node {
        Node::Form(Form {
            head: Box::new(Node::atom(name)),
            meta: Meta::default(),
            args: Args::Context(None),
        })
    }

    /// Binding reference carrying a module-scope context marker
    pub fn var_in(name: &str, context: &str) -> Node {
        Node::Form(Form {
            head: Box::new(Node::atom(name)),
            meta: Meta::default(),
            args: Args::Context(Some(context.to_string())),
        })
    }

    /// Local call `name(args...)`
    pub fn call(name: &str, args: Vec<Node>) -> Node {
        Node::form(name, Meta::default(), args)
    }

    /// Local call carrying location metadata
    pub fn call_at(name: &str, args: Vec<Node>, meta: Meta) -> Node {
        Node::form(name, meta, args)
    }

    /// Alias form `Foo.Bar`
    pub fn aliases(segments: &[&str]) -> Node {
        Node::call(
            "__aliases__",
            segments.iter().map(|segment| Node::atom(segment)).collect(),
        )
    }

    /// Remote call `Foo.Bar.fun(args...)`
    pub fn remote(module: &[&str], function: &str, args: Vec<Node>) -> Node {
        let dot = Node::call(".", vec![Node::aliases(module), Node::atom(function)]);
        Node::Form(Form {
            head: Box::new(dot),
            meta: Meta::default(),
            args: Args::List(args),
        })
    }

    /// Literal 2-tuple
    pub fn pair(left: Node, right: Node) -> Node {
        Node::Tuple(vec![left, right])
    }

    /// Keyword list `[key: value, ...]`
    pub fn keyword(entries: Vec<(&str, Node)>) -> Node {
        Node::List(
            entries
                .into_iter()
                .map(|(key, value)| Node::pair(Node::atom(key), value))
                .collect(),
        )
    }

    /// `__block__` of several expressions
    pub fn block(exprs: Vec<Node>) -> Node {
        Node::call("__block__", exprs)
    }

    /// Binary operator form
    pub fn binary(op: &str, left: Node, right: Node) -> Node {
        Node::call(op, vec![left, right])
    }

    /// Pattern-dispatch arm `patterns -> body`
    pub fn clause(patterns: Vec<Node>, body: Node) -> Node {
        Node::call("->", vec![Node::List(patterns), body])
    }

    /// Module attribute `@name value`
    pub fn attribute(name: &str, value: Node) -> Node {
        Node::call("@", vec![Node::call(name, vec![value])])
    }

    /// Signature expression `name(params) :: ret`
    pub fn signature(name: &str, params: Vec<Node>, ret: Node) -> Node {
        Node::binary("::", Node::call(name, params), ret)
    }

    /// `def`-style definition with a single `do` body
    pub fn def(kind: &str, name: &str, params: Vec<Node>, body: Node) -> Node {
        Node::call(
            kind,
            vec![Node::call(name, params), Node::keyword(vec![("do", body)])],
        )
    }

    /// `defmodule Segments do forms end`
    pub fn defmodule(segments: &[&str], forms: Vec<Node>) -> Node {
        Node::call(
            "defmodule",
            vec![
                Node::aliases(segments),
                Node::keyword(vec![("do", Node::block(forms))]),
            ],
        )
    }
}
