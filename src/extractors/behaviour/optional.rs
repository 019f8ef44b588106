// `@optional_callbacks` collection
//
// Gathered over the whole body before any callback record is built, so the
// marker may appear before or after the callbacks it names.

use crate::ast::Node;
use crate::extractors::base::FunctionId;
use crate::extractors::classifier::{attribute_parts, classify, NodeKind};
use std::collections::HashSet;
use tracing::trace;

/// Name/arity pairs listed by one `@optional_callbacks` value
pub fn optional_entries(value: &Node) -> Vec<FunctionId> {
    let Some(items) = value.as_list() else {
        trace!("Ignoring non-list @optional_callbacks value");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Node::as_keyword_pair)
        .filter_map(|(name, arity)| {
            let arity = usize::try_from(arity.as_integer()?).ok()?;
            Some(FunctionId::new(name, arity))
        })
        .collect()
}

/// Every optional name/arity declared anywhere in the body
pub fn collect_optional(forms: &[Node]) -> HashSet<FunctionId> {
    forms
        .iter()
        .filter(|form| classify(form) == NodeKind::OptionalCallbacks)
        .filter_map(attribute_parts)
        .flat_map(|(_, value)| optional_entries(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_skip_malformed_pairs() {
        let value = Node::List(vec![
            Node::pair(Node::atom("foo"), Node::Integer(1)),
            Node::pair(Node::atom("bar"), Node::atom("x")),
            Node::pair(Node::atom("neg"), Node::Integer(-1)),
            Node::Integer(3),
            Node::pair(Node::atom("baz"), Node::Integer(0)),
        ]);
        assert_eq!(
            optional_entries(&value),
            vec![FunctionId::new("foo", 1), FunctionId::new("baz", 0)]
        );
        assert!(optional_entries(&Node::atom("foo")).is_empty());
    }

    #[test]
    fn test_collect_across_several_markers() {
        let forms = vec![
            Node::attribute(
                "optional_callbacks",
                Node::keyword(vec![("a", Node::Integer(1))]),
            ),
            Node::call("foo", vec![]),
            Node::attribute(
                "optional_callbacks",
                Node::keyword(vec![("b", Node::Integer(2))]),
            ),
        ];
        let optional = collect_optional(&forms);
        assert_eq!(optional.len(), 2);
        assert!(optional.contains(&FunctionId::new("a", 1)));
        assert!(optional.contains(&FunctionId::new("b", 2)));
    }
}
