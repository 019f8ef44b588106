//! Signature decomposer
//!
//! Normalizes the two surface shapes of a type signature into one
//! `FunctionSignature`:
//!
//! - `name(params) :: return`
//! - `(name(params) :: return) when [var: constraint, ...]`
//!
//! Decomposition is purely structural. Parameter and return types are kept as
//! raw subtrees; union returns are only flattened on demand.

mod union;

use crate::ast::{body_forms, render, Node};
use crate::extractors::base::{
    ExtractError, ExtractOptions, FunctionId, FunctionSignature, Location, SpecKind,
};
use crate::extractors::classifier::{attribute_parts, classify, NodeKind};
use std::collections::BTreeMap;
use tracing::debug;

pub use union::flatten_union;

/// Borrowed view of a decomposed signature expression
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decomposed<'a> {
    pub name: &'a str,
    pub params: &'a [Node],
    pub return_type: &'a Node,
    pub constraints: Option<&'a [Node]>,
}

/// Split a signature expression into its parts without copying anything
pub(crate) fn decompose(expr: &Node) -> Result<Decomposed<'_>, ExtractError> {
    let (typed, constraints) = match expr.as_form() {
        Some(form) if form.name() == Some("when") => match form.arguments() {
            Some([typed, Node::List(constraints)]) => (typed, Some(constraints.as_slice())),
            _ => return Err(ExtractError::not_a_signature(expr)),
        },
        _ => (expr, None),
    };

    let typed_form = typed
        .as_form()
        .filter(|form| form.name() == Some("::"))
        .ok_or_else(|| ExtractError::not_a_signature(expr))?;
    let (call, return_type) = match typed_form.arguments() {
        Some([call, return_type]) => (call, return_type),
        _ => return Err(ExtractError::not_a_signature(expr)),
    };

    let call = call
        .as_form()
        .ok_or_else(|| ExtractError::not_a_signature(expr))?;
    let name = call.name().ok_or_else(|| ExtractError::not_a_signature(expr))?;

    Ok(Decomposed {
        name,
        params: call.arguments().unwrap_or(&[]),
        return_type,
        constraints,
    })
}

fn constraint_map(constraints: Option<&[Node]>) -> BTreeMap<String, Node> {
    constraints
        .unwrap_or(&[])
        .iter()
        .filter_map(Node::as_keyword_pair)
        .map(|(var, constraint)| (var.to_string(), constraint.clone()))
        .collect()
}

impl FunctionSignature {
    /// Build from a signature expression (the value of `@spec`, `@callback`...)
    pub fn try_from_expr(
        expr: &Node,
        spec_kind: SpecKind,
        location: Option<Location>,
    ) -> Result<Self, ExtractError> {
        let parts = decompose(expr)?;
        let type_constraints = constraint_map(parts.constraints);
        Ok(FunctionSignature {
            name: parts.name.to_string(),
            arity: parts.params.len(),
            spec_kind,
            parameter_types: parts.params.to_vec(),
            return_type: parts.return_type.clone(),
            has_type_constraints: !type_constraints.is_empty(),
            type_constraints,
            location,
        })
    }

    /// Build from an `@spec` / `@callback` / `@macrocallback` annotation node
    pub fn try_from_node(node: &Node, options: &ExtractOptions) -> Result<Self, ExtractError> {
        let (attribute, expr) =
            attribute_parts(node).ok_or_else(|| ExtractError::not_a_signature(node))?;
        let spec_kind =
            SpecKind::from_attribute(attribute).ok_or_else(|| ExtractError::not_a_signature(node))?;
        let location = Location::from_meta(node.meta(), options.include_location);
        Self::try_from_expr(expr, spec_kind, location)
    }

    /// Like `try_from_node`, for callers that validated the shape upstream.
    ///
    /// # Panics
    /// Panics with the `NotASignature` message when the node is not a signature.
    pub fn from_node(node: &Node, options: &ExtractOptions) -> Self {
        match Self::try_from_node(node, options) {
            Ok(signature) => signature,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn id(&self) -> FunctionId {
        FunctionId::new(self.name.clone(), self.arity)
    }

    /// Return type alternatives, leftmost first; a single element for non-unions
    pub fn return_alternatives(&self) -> Vec<&Node> {
        flatten_union(&self.return_type)
    }

    pub fn is_union_return(&self) -> bool {
        self.return_alternatives().len() > 1
    }

    /// Constrained type variable names, sorted
    pub fn type_variables(&self) -> Vec<&str> {
        self.type_constraints.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self
            .parameter_types
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "@{} {}({}) :: {}",
            self.spec_kind,
            self.name,
            params,
            render(&self.return_type)
        )?;
        if self.has_type_constraints {
            let constraints = self
                .type_constraints
                .iter()
                .map(|(var, constraint)| format!("{}: {}", var, render(constraint)))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " when {}", constraints)?;
        }
        Ok(())
    }
}

/// Every `@spec`, `@callback` and `@macrocallback` of a module body, in source order
pub fn extract_signatures(body: &Node, options: &ExtractOptions) -> Vec<FunctionSignature> {
    let mut signatures = Vec::new();

    for form in body_forms(body) {
        if !matches!(classify(form), NodeKind::Spec | NodeKind::Callback(_)) {
            continue;
        }
        match FunctionSignature::try_from_node(form, options) {
            Ok(signature) => signatures.push(signature),
            Err(err) => debug!("Skipping malformed signature: {}", err),
        }
    }

    debug!("Extracted {} signatures", signatures.len());
    signatures
}

/// First signature with the given identity
pub fn find_signature<'a>(
    signatures: &'a [FunctionSignature],
    name: &str,
    arity: usize,
) -> Option<&'a FunctionSignature> {
    signatures
        .iter()
        .find(|signature| signature.name == name && signature.arity == arity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Meta;
    use crate::extractors::base::ErrorKind;

    fn t(name: &str) -> Node {
        Node::call(name, vec![])
    }

    fn spec_attr(attribute: &str, expr: Node) -> Node {
        Node::attribute(attribute, expr)
    }

    #[test]
    fn test_bare_signature() {
        let node = spec_attr(
            "callback",
            Node::signature(
                "handle_call",
                vec![t("term"), t("pid"), t("state")],
                Node::Tuple(vec![Node::atom("reply"), t("term"), t("state")]),
            ),
        );
        let signature = FunctionSignature::try_from_node(&node, &ExtractOptions::default()).unwrap();

        assert_eq!(signature.name, "handle_call");
        assert_eq!(signature.arity, 3);
        assert_eq!(signature.parameter_types.len(), 3);
        assert_eq!(signature.spec_kind, SpecKind::Callback);
        assert!(!signature.has_type_constraints);
        assert!(signature.type_constraints.is_empty());
    }

    #[test]
    fn test_zero_arity_signatures() {
        let with_parens = spec_attr("spec", Node::signature("now", vec![], t("integer")));
        let signature = FunctionSignature::from_node(&with_parens, &ExtractOptions::default());
        assert_eq!(signature.arity, 0);
        assert!(signature.parameter_types.is_empty());

        let without_parens = spec_attr(
            "spec",
            Node::binary("::", Node::var("now"), t("integer")),
        );
        let signature = FunctionSignature::from_node(&without_parens, &ExtractOptions::default());
        assert_eq!(signature.name, "now");
        assert_eq!(signature.arity, 0);
    }

    #[test]
    fn test_signature_with_constraints() {
        let expr = Node::binary(
            "when",
            Node::signature("wrap", vec![Node::var("a")], Node::List(vec![Node::var("a")])),
            Node::keyword(vec![("a", t("term"))]),
        );
        let node = spec_attr("spec", expr);
        let signature = FunctionSignature::from_node(&node, &ExtractOptions::default());

        assert_eq!(signature.name, "wrap");
        assert_eq!(signature.arity, 1);
        assert!(signature.has_type_constraints);
        assert_eq!(signature.type_variables(), vec!["a"]);
        assert_eq!(signature.type_constraints["a"], t("term"));
        assert_eq!(
            signature.to_string(),
            "@spec wrap(a) :: [a] when a: term()"
        );
    }

    #[test]
    fn test_union_flattening_keeps_raw_return_type() {
        let ret = Node::binary(
            "|",
            Node::binary("|", Node::atom("ok"), Node::atom("error")),
            Node::atom("ignore"),
        );
        let node = spec_attr("callback", Node::signature("init", vec![t("term")], ret.clone()));
        let signature = FunctionSignature::from_node(&node, &ExtractOptions::default());

        let alternatives = signature.return_alternatives();
        assert_eq!(alternatives.len(), 3);
        assert_eq!(alternatives[0], &Node::atom("ok"));
        assert_eq!(alternatives[1], &Node::atom("error"));
        assert_eq!(alternatives[2], &Node::atom("ignore"));
        assert!(signature.is_union_return());
        assert_eq!(signature.return_type, ret);
    }

    #[test]
    fn test_non_union_flattens_to_single() {
        let node = spec_attr("spec", Node::signature("f", vec![], t("atom")));
        let signature = FunctionSignature::from_node(&node, &ExtractOptions::default());
        assert_eq!(signature.return_alternatives(), vec![&t("atom")]);
        assert!(!signature.is_union_return());
    }

    #[test]
    fn test_not_a_signature() {
        let options = ExtractOptions::default();
        let cases = [
            Node::attribute("doc", Node::string("x")),
            spec_attr("spec", Node::atom("oops")),
            spec_attr("spec", Node::binary("when", t("f"), Node::atom("x"))),
            Node::call("foo", vec![]),
            Node::Integer(5),
        ];
        for case in &cases {
            let err = FunctionSignature::try_from_node(case, &options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotASignature);
        }
    }

    #[test]
    #[should_panic(expected = "not a signature")]
    fn test_from_node_panics_on_bad_shape() {
        FunctionSignature::from_node(&Node::Integer(1), &ExtractOptions::default());
    }

    #[test]
    fn test_location_follows_options() {
        let node = Node::call_at(
            "@",
            vec![Node::call("spec", vec![Node::signature("f", vec![], t("atom"))])],
            Meta::at(12, 3),
        );
        let with = FunctionSignature::from_node(&node, &ExtractOptions::default());
        assert_eq!(
            with.location,
            Some(Location {
                start_line: 12,
                start_column: Some(3)
            })
        );

        let without = FunctionSignature::from_node(
            &node,
            &ExtractOptions {
                include_location: false,
            },
        );
        assert_eq!(without.location, None);
    }

    #[test]
    fn test_extract_signatures_skips_noise_in_order() {
        let body = Node::block(vec![
            spec_attr("spec", Node::signature("a", vec![], t("atom"))),
            Node::attribute("doc", Node::string("ignored")),
            spec_attr("spec", Node::atom("broken")),
            Node::def("def", "a", vec![], Node::atom("ok")),
            spec_attr("macrocallback", Node::signature("b", vec![t("term")], t("term"))),
        ]);
        let signatures = extract_signatures(&body, &ExtractOptions::default());
        let ids: Vec<String> = signatures.iter().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["a/0", "b/1"]);
        assert_eq!(signatures[1].spec_kind, SpecKind::Macrocallback);

        assert!(find_signature(&signatures, "b", 1).is_some());
        assert!(find_signature(&signatures, "b", 2).is_none());
        assert!(extract_signatures(&Node::nil(), &ExtractOptions::default()).is_empty());
    }
}
