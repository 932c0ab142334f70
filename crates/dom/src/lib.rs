//! # dom
//!
//! A small owned element tree. It carries just enough of the document model
//! for form containers: element names, attributes in source order, text, and
//! stable node ids.

mod attrs;
mod traverse;
mod types;

pub use attrs::{attr, collect_text, has_attr, remove_attr, set_attr};
pub use traverse::{assign_node_ids, find_node_by_id, find_node_by_id_mut};
pub use types::{Id, Node, NodeId};

/// Shorthand constructors for building trees in code and tests.
pub mod build {
    use crate::{Id, Node};

    pub fn doc(children: Vec<Node>) -> Node {
        Node::Document {
            id: Id(0),
            children,
        }
    }

    pub fn elem(name: &str, attributes: &[(&str, Option<&str>)], children: Vec<Node>) -> Node {
        Node::Element {
            id: Id(0),
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
            children,
        }
    }

    pub fn text(text: &str) -> Node {
        Node::Text {
            id: Id(0),
            text: text.to_string(),
        }
    }
}
