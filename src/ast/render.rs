// Source-like rendering of quoted trees
//
// Display only. Classification never looks at rendered text.

use super::{Args, Form, Node};
use crate::extractors::classifier::is_operator;

/// Operators plus the infix syntax markers; `div`/`rem` are written as calls
fn is_infix(name: &str) -> bool {
    (is_operator(name) && !matches!(name, "div" | "rem"))
        || matches!(name, "::" | "when" | "<-" | "\\\\")
}

/// Operators plus the prefix syntax markers (pin, capture)
fn is_prefix(name: &str) -> bool {
    is_operator(name) || matches!(name, "^" | "&")
}

/// Render a node as source-like text
pub fn render(node: &Node) -> String {
    match node {
        Node::Atom(name) => match name.as_str() {
            "nil" | "true" | "false" => name.clone(),
            _ => match name.strip_prefix("Elixir.") {
                Some(module) => module.to_string(),
                None => format!(":{}", name),
            },
        },
        Node::Integer(value) => value.to_string(),
        Node::Float(value) => format!("{:?}", value),
        Node::String(text) => format!("{:?}", text),
        Node::List(items) => render_list(items),
        Node::Tuple(items) => format!("{{{}}}", join(items)),
        Node::Form(form) => render_form(form),
        Node::Unknown(value) => value.to_string(),
    }
}

fn join(items: &[Node]) -> String {
    items.iter().map(render).collect::<Vec<_>>().join(", ")
}

fn render_list(items: &[Node]) -> String {
    let keywords: Option<Vec<String>> = items
        .iter()
        .map(|item| {
            item.as_keyword_pair()
                .map(|(key, value)| format!("{}: {}", key, render(value)))
        })
        .collect();
    match keywords {
        Some(entries) if !entries.is_empty() => format!("[{}]", entries.join(", ")),
        _ => format!("[{}]", join(items)),
    }
}

fn render_form(form: &Form) -> String {
    let Some(name) = form.name() else {
        return render_non_local(form);
    };
    let args = match &form.args {
        Args::Context(_) => return name.to_string(),
        Args::List(args) => args,
    };

    match (name, args.as_slice()) {
        ("__aliases__", _) => Node::Form(form.clone())
            .module_name()
            .unwrap_or_else(|| "__aliases__".to_string()),
        ("__block__", exprs) => exprs.iter().map(render).collect::<Vec<_>>().join("; "),
        ("{}", items) => format!("{{{}}}", join(items)),
        ("%{}", entries) => format!("%{{{}}}", render_map_entries(entries)),
        ("%", [module, map]) => {
            let fields = map
                .as_form()
                .map(|inner| render_map_entries(inner.args_or_empty()))
                .unwrap_or_default();
            format!("%{}{{{}}}", render(module), fields)
        }
        ("<<>>", parts) => format!("<<{}>>", join(parts)),
        ("@", [inner]) => match inner.as_form() {
            Some(attr) => match (attr.name(), attr.arguments()) {
                (Some(attr_name), Some([value])) => format!("@{} {}", attr_name, render(value)),
                (Some(attr_name), _) => format!("@{}", attr_name),
                _ => format!("@{}", render(inner)),
            },
            None => format!("@{}", render(inner)),
        },
        ("->", [patterns, body]) => {
            let lhs = patterns.as_list().map(join).unwrap_or_else(|| render(patterns));
            format!("{} -> {}", lhs, render(body))
        }
        (op, [left, right]) if is_infix(op) => {
            format!("{} {} {}", render(left), op, render(right))
        }
        (op, [operand]) if is_prefix(op) => {
            if op.chars().all(char::is_alphabetic) {
                format!("{} {}", op, render(operand))
            } else {
                format!("{}{}", op, render(operand))
            }
        }
        (_, args) => format!("{}({})", name, join(args)),
    }
}

fn render_map_entries(entries: &[Node]) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            Node::Tuple(pair) if pair.len() == 2 => match pair[0].as_atom() {
                Some(key) => format!("{}: {}", key, render(&pair[1])),
                None => format!("{} => {}", render(&pair[0]), render(&pair[1])),
            },
            other => render(other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Remote calls, anonymous calls and forms with exotic heads
fn render_non_local(form: &Form) -> String {
    let args = join(form.args_or_empty());
    match form.head.as_form() {
        Some(dot) if dot.name() == Some(".") => match dot.args_or_empty() {
            [target, Node::Atom(function)] => {
                let target = target.module_name().unwrap_or_else(|| render(target));
                match form.args {
                    Args::Context(_) => format!("{}.{}", target, function),
                    Args::List(_) => format!("{}.{}({})", target, function, args),
                }
            }
            [fun] => format!("{}.({})", render(fun), args),
            _ => format!("{}({})", render(&form.head), args),
        },
        _ => format!("{}({})", render(&form.head), args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_operators() {
        let custom = Node::binary("<~>", Node::var("left"), Node::var("right"));
        assert_eq!(render(&custom), "left <~> right");

        let default = Node::binary("\\\\", Node::var("opts"), Node::List(vec![]));
        assert_eq!(render(&default), "opts \\\\ []");

        let division = Node::binary("div", Node::var("a"), Node::Integer(2));
        assert_eq!(render(&division), "div(a, 2)");

        let negated = Node::call("not", vec![Node::var("ok")]);
        assert_eq!(render(&negated), "not ok");

        let pinned = Node::call("^", vec![Node::var("key")]);
        assert_eq!(render(&pinned), "^key");
    }

    #[test]
    fn test_render_signature() {
        let sig = Node::signature(
            "init",
            vec![Node::call("term", vec![])],
            Node::binary(
                "|",
                Node::pair(Node::atom("ok"), Node::call("state", vec![])),
                Node::atom("ignore"),
            ),
        );
        assert_eq!(render(&sig), "init(term()) :: {:ok, state()} | :ignore");
    }

    #[test]
    fn test_render_remote_and_aliases() {
        let call = Node::remote(&["Enum"], "map", vec![Node::var("list"), Node::var("fun")]);
        assert_eq!(render(&call), "Enum.map(list, fun)");
        assert_eq!(render(&Node::aliases(&["A", "B"])), "A.B");
    }

    #[test]
    fn test_render_attribute_and_keywords() {
        let attr = Node::attribute(
            "optional_callbacks",
            Node::keyword(vec![("foo", Node::Integer(1))]),
        );
        assert_eq!(render(&attr), "@optional_callbacks [foo: 1]");
    }
}
