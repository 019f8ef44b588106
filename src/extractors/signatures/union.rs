// Union return type flattening
//
// `a | b | c` arrives as a binary `|` chain. The parser may nest it on either
// side, so both operands are expanded and source order is kept.

use crate::ast::Node;

fn union_operands(node: &Node) -> Option<(&Node, &Node)> {
    let form = node.as_form()?;
    if form.name() != Some("|") {
        return None;
    }
    match form.arguments()? {
        [left, right] => Some((left, right)),
        _ => None,
    }
}

/// Alternatives of a union type, leftmost first
///
/// A chain of `n` union markers yields `n + 1` alternatives; anything else
/// yields a single-element sequence holding the node itself.
pub fn flatten_union(node: &Node) -> Vec<&Node> {
    let mut alternatives = Vec::new();
    let mut pending = vec![node];

    while let Some(current) = pending.pop() {
        match union_operands(current) {
            Some((left, right)) => {
                pending.push(right);
                pending.push(left);
            }
            None => alternatives.push(current),
        }
    }

    alternatives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn union(left: Node, right: Node) -> Node {
        Node::binary("|", left, right)
    }

    #[test]
    fn test_left_nested_chain() {
        let chain = union(
            union(union(Node::atom("a"), Node::atom("b")), Node::atom("c")),
            Node::atom("d"),
        );
        let names: Vec<_> = flatten_union(&chain)
            .into_iter()
            .filter_map(Node::as_atom)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_right_nested_chain() {
        let chain = union(Node::atom("a"), union(Node::atom("b"), Node::atom("c")));
        let names: Vec<_> = flatten_union(&chain)
            .into_iter()
            .filter_map(Node::as_atom)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_union() {
        let node = Node::call("term", vec![]);
        assert_eq!(flatten_union(&node), vec![&node]);
    }
}
