use crate::Node;

pub fn attr<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    match node {
        Node::Element { attributes, .. } => attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref()),
        _ => None,
    }
}

/// Presence check. Boolean attributes (`readonly`, `disabled`) carry no value.
pub fn has_attr(node: &Node, name: &str) -> bool {
    match node {
        Node::Element { attributes, .. } => {
            attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
        }
        _ => false,
    }
}

/// Sets or replaces an attribute. Returns `true` if the element changed.
pub fn set_attr(node: &mut Node, name: &str, value: Option<&str>) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };

    let value = value.map(str::to_string);
    if let Some((_, v)) = attributes
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
    {
        if *v == value {
            return false;
        }
        *v = value;
        return true;
    }

    attributes.push((name.to_string(), value));
    true
}

/// Removes every occurrence of an attribute. Returns `true` if anything was removed.
pub fn remove_attr(node: &mut Node, name: &str) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };
    let before = attributes.len();
    attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    attributes.len() != before
}

pub fn collect_text(nodes: &[Node], out: &mut String) {
    for n in nodes {
        match n {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } | Node::Document { children, .. } => {
                collect_text(children, out);
            }
            Node::Comment { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{elem, text};

    #[test]
    fn attribute_lookup_is_case_insensitive() {
        let node = elem("input", &[("ReadOnly", None), ("value", Some("x"))], vec![]);
        assert!(has_attr(&node, "readonly"));
        assert_eq!(attr(&node, "readonly"), None);
        assert_eq!(attr(&node, "VALUE"), Some("x"));
    }

    #[test]
    fn set_attr_reports_changes() {
        let mut node = elem("input", &[], vec![]);
        assert!(set_attr(&mut node, "aria-busy", Some("true")));
        assert!(!set_attr(&mut node, "aria-busy", Some("true")));
        assert!(set_attr(&mut node, "ARIA-BUSY", Some("false")));
        assert_eq!(attr(&node, "aria-busy"), Some("false"));
    }

    #[test]
    fn remove_attr_drops_duplicates() {
        let mut node = elem("option", &[("disabled", None), ("disabled", Some(""))], vec![]);
        assert!(remove_attr(&mut node, "disabled"));
        assert!(!has_attr(&node, "disabled"));
        assert!(!remove_attr(&mut node, "disabled"));
    }

    #[test]
    fn text_nodes_are_ignored_by_attribute_helpers() {
        let mut node = text("hello");
        assert!(!set_attr(&mut node, "readonly", None));
        assert!(!has_attr(&node, "readonly"));
    }

    #[test]
    fn collect_text_concatenates_descendants() {
        let node = elem("option", &[], vec![text("Op"), elem("b", &[], vec![text("tion")])]);
        let mut out = String::new();
        collect_text(node.children(), &mut out);
        assert_eq!(out, "Option");
    }
}
