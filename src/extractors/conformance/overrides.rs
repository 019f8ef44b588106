// `defoverridable` normalization
//
// `defoverridable foo: 1, bar: 2` yields one explicit entry per pair;
// `defoverridable SomeBehaviour` yields a single module reference without arity.

use crate::ast::Node;
use crate::extractors::base::{OverrideMarker, OverrideSource};
use tracing::trace;

/// Override markers declared by one `defoverridable` form
pub fn override_markers(form: &Node) -> Vec<OverrideMarker> {
    let Some(value) = form
        .as_form()
        .and_then(|form| form.arguments())
        .and_then(|args| match args {
            [value] => Some(value),
            _ => None,
        })
    else {
        trace!("Ignoring defoverridable without a single argument");
        return Vec::new();
    };

    if let Some(items) = value.as_list() {
        return items
            .iter()
            .filter_map(Node::as_keyword_pair)
            .filter_map(|(name, arity)| {
                let arity = usize::try_from(arity.as_integer()?).ok()?;
                Some(OverrideMarker {
                    name: name.to_string(),
                    arity: Some(arity),
                    source: OverrideSource::ExplicitList,
                })
            })
            .collect();
    }

    match value.module_name() {
        Some(module) => vec![OverrideMarker {
            name: module,
            arity: None,
            source: OverrideSource::ModuleReference,
        }],
        None => Vec::new(),
    }
}
