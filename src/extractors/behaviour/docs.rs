// Documentation annotations
//
// `@doc` fills a single pending slot that the next declaration consumes.
// States: Empty, Pending(text). A hidden doc (`@doc false`) is Pending(None).

use crate::ast::Node;

/// What a `@doc` / `@moduledoc` value means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocValue {
    Text(String),
    /// `false` or `nil`
    Hidden,
    /// Keyword metadata such as `@doc since: "1.2.0"`; leaves pending text alone
    Metadata,
    /// Anything we do not read as documentation
    Unsupported,
}

/// Interpret a documentation annotation value
pub fn doc_value(value: &Node) -> DocValue {
    match value {
        Node::String(text) => DocValue::Text(text.clone()),
        Node::Atom(name) if name == "false" || name == "nil" => DocValue::Hidden,
        Node::List(items) if !items.is_empty() && items.iter().all(|i| i.as_keyword_pair().is_some()) => {
            DocValue::Metadata
        }
        Node::Form(_) => sigil_text(value).map_or(DocValue::Unsupported, DocValue::Text),
        _ => DocValue::Unsupported,
    }
}

/// Literal text of a `~S"""..."""` / `~s"..."` sigil
fn sigil_text(node: &Node) -> Option<String> {
    let form = node.as_form()?;
    if !matches!(form.name()?, "sigil_S" | "sigil_s") {
        return None;
    }
    let binary = form.arguments()?.first()?.as_form()?;
    if binary.name() != Some("<<>>") {
        return None;
    }
    let text: String = binary
        .args_or_empty()
        .iter()
        .filter_map(Node::as_str)
        .collect();
    Some(text)
}

/// Single-slot pending documentation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum DocSlot {
    #[default]
    Empty,
    Pending(Option<String>),
}

impl DocSlot {
    /// Record a `@doc` annotation
    pub fn annotate(&mut self, value: &Node) {
        match doc_value(value) {
            DocValue::Text(text) => *self = DocSlot::Pending(Some(text)),
            DocValue::Hidden => *self = DocSlot::Pending(None),
            DocValue::Metadata | DocValue::Unsupported => {}
        }
    }

    /// Consume the pending text, leaving the slot empty
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DocSlot::Pending(text) => text,
            DocSlot::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_values() {
        assert_eq!(doc_value(&Node::string("Hi")), DocValue::Text("Hi".into()));
        assert_eq!(doc_value(&Node::atom("false")), DocValue::Hidden);
        assert_eq!(doc_value(&Node::nil()), DocValue::Hidden);
        assert_eq!(
            doc_value(&Node::keyword(vec![("since", Node::string("1.0"))])),
            DocValue::Metadata
        );
        assert_eq!(doc_value(&Node::Integer(1)), DocValue::Unsupported);
    }

    #[test]
    fn test_sigil_doc() {
        let sigil = Node::call(
            "sigil_S",
            vec![
                Node::call("<<>>", vec![Node::string("Raw \\n text\n")]),
                Node::List(vec![]),
            ],
        );
        assert_eq!(doc_value(&sigil), DocValue::Text("Raw \\n text\n".into()));
        assert_eq!(
            doc_value(&Node::call("sigil_r", vec![])),
            DocValue::Unsupported
        );
    }

    #[test]
    fn test_slot_is_consumed_once() {
        let mut slot = DocSlot::default();
        assert_eq!(slot.take(), None);

        slot.annotate(&Node::string("D"));
        assert_eq!(slot.take(), Some("D".to_string()));
        assert_eq!(slot.take(), None);

        slot.annotate(&Node::string("first"));
        slot.annotate(&Node::keyword(vec![("since", Node::string("1.0"))]));
        assert_eq!(slot.take(), Some("first".to_string()));

        slot.annotate(&Node::string("shadowed"));
        slot.annotate(&Node::atom("false"));
        assert_eq!(slot, DocSlot::Pending(None));
        assert_eq!(slot.take(), None);
        assert_eq!(slot, DocSlot::Empty);

        slot.annotate(&Node::string("replaced"));
        slot.annotate(&Node::nil());
        assert_eq!(slot, DocSlot::Pending(None));
    }
}
