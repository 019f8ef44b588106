// JSON wire format of the quoted tree
//
// Encoding produced by the parser collaborator:
//   null / true / false          -> atoms nil / true / false
//   number                       -> integer or float
//   "text"                       -> string
//   [..]                         -> list
//   {"atom": "name"}             -> atom
//   {"tuple": [..]}              -> literal tuple
//   {"form": head, "meta": {..}, "args": [..] | null | {"atom": ctx} | "ctx"}
//                                -> form (head may be a bare string for an atom head)
// Anything else becomes `Node::Unknown`; decoding never fails.

use super::{Args, Form, Meta, Node};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::path::Path;

/// Decode a JSON value into a tree node
pub fn from_json(value: &Value) -> Node {
    match value {
        Value::Null => Node::nil(),
        Value::Bool(flag) => Node::atom(if *flag { "true" } else { "false" }),
        Value::Number(number) => match number.as_i64() {
            Some(int) => Node::Integer(int),
            None => number
                .as_f64()
                .map(Node::Float)
                .unwrap_or_else(|| Node::Unknown(value.clone())),
        },
        Value::String(text) => Node::String(text.clone()),
        Value::Array(items) => Node::List(items.iter().map(from_json).collect()),
        Value::Object(object) => decode_object(object).unwrap_or_else(|| Node::Unknown(value.clone())),
    }
}

fn decode_object(object: &Map<String, Value>) -> Option<Node> {
    if let Some(Value::String(name)) = object.get("atom") {
        if object.len() == 1 {
            return Some(Node::Atom(name.clone()));
        }
    }

    if let Some(Value::Array(items)) = object.get("tuple") {
        if object.len() == 1 {
            return Some(Node::Tuple(items.iter().map(from_json).collect()));
        }
    }

    let head = object.get("form")?;
    let head = match head {
        Value::String(name) => Node::Atom(name.clone()),
        other => from_json(other),
    };
    let meta = object.get("meta").map(decode_meta).unwrap_or_default();
    let args = match object.get("args") {
        None | Some(Value::Null) => Args::Context(None),
        Some(Value::Array(items)) => Args::List(items.iter().map(from_json).collect()),
        Some(Value::String(context)) => Args::Context(Some(context.clone())),
        Some(Value::Object(context)) => match context.get("atom") {
            Some(Value::String(name)) => Args::Context(Some(name.clone())),
            _ => return None,
        },
        Some(_) => return None,
    };

    Some(Node::Form(Form {
        head: Box::new(head),
        meta,
        args,
    }))
}

fn decode_meta(value: &Value) -> Meta {
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    };
    Meta {
        line: field("line"),
        column: field("column"),
    }
}

/// Encode a tree node into its JSON wire format
pub fn to_json(node: &Node) -> Value {
    match node {
        Node::Atom(name) => match name.as_str() {
            "nil" => Value::Null,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => json!({ "atom": name }),
        },
        Node::Integer(value) => json!(value),
        Node::Float(value) => json!(value),
        Node::String(text) => Value::String(text.clone()),
        Node::List(items) => Value::Array(items.iter().map(to_json).collect()),
        Node::Tuple(items) => json!({ "tuple": items.iter().map(to_json).collect::<Vec<_>>() }),
        Node::Form(form) => {
            let head = match form.head.as_ref() {
                Node::Atom(name) => Value::String(name.clone()),
                other => to_json(other),
            };
            let args = match &form.args {
                Args::List(items) => Value::Array(items.iter().map(to_json).collect()),
                Args::Context(None) => Value::Null,
                Args::Context(Some(context)) => json!({ "atom": context }),
            };
            let mut meta = Map::new();
            if let Some(line) = form.meta.line {
                meta.insert("line".to_string(), json!(line));
            }
            if let Some(column) = form.meta.column {
                meta.insert("column".to_string(), json!(column));
            }
            json!({ "form": head, "meta": meta, "args": args })
        }
        Node::Unknown(value) => value.clone(),
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(from_json(&value))
    }
}

/// Read a JSON-encoded tree from disk
pub fn load_tree(path: &Path) -> Result<Node> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tree JSON: {}", path.display()))?;
    Ok(from_json(&value))
}
