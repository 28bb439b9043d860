//! Traversal and cursor APIs for navigating element trees

use crate::element::Element;
use crate::{Error, Result};

/// A cursor for navigating an element tree
pub struct Cursor<'a> {
    /// Current element
    node: &'a Element,

    /// Path to current element (for error reporting)
    path: Vec<String>,
}

/// Visitor over an element tree
pub trait Traversal {
    /// Visit an element
    fn visit(&mut self, node: &Element, path: &[String]);

    /// Called when entering an element with children
    fn enter(&mut self, _node: &Element, _path: &[String]) {}

    /// Called when leaving an element with children
    fn leave(&mut self, _node: &Element, _path: &[String]) {}

    /// Returns true if traversal should continue
    fn should_continue(&self) -> bool {
        true
    }
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the given element
    #[must_use]
    pub fn new(node: &'a Element) -> Self {
        Self {
            node,
            path: vec![node.name.clone()],
        }
    }

    /// Get the current element
    #[must_use]
    pub fn node(&self) -> &'a Element {
        self.node
    }

    /// Get the current path
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Text of the current element, or an error naming the path
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] when the element carries no text.
    pub fn text(&self) -> Result<&'a str> {
        self.node
            .text()
            .ok_or_else(|| Error::node_not_found(format!("{}/text()", self.path.join("/"))))
    }

    /// Navigate to a child element by name
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] when no child has that name.
    pub fn child(&self, name: &str) -> Result<Cursor<'a>> {
        match self.node.find_child(name) {
            Some(child) => {
                let mut new_path = self.path.clone();
                new_path.push(name.to_string());
                Ok(Cursor {
                    node: child,
                    path: new_path,
                })
            }
            None => Err(Error::node_not_found(format!(
                "{}/{}",
                self.path.join("/"),
                name
            ))),
        }
    }

    /// Get all children matching a name
    #[must_use]
    pub fn children(&self, name: &str) -> Vec<Cursor<'a>> {
        self.node
            .children
            .iter()
            .filter(|c| c.name == name)
            .enumerate()
            .map(|(idx, child)| {
                let mut new_path = self.path.clone();
                new_path.push(format!("{name}[{idx}]"));
                Cursor {
                    node: child,
                    path: new_path,
                }
            })
            .collect()
    }

    /// Navigate using a path (e.g., `CstmrCdtTrfInitn/PmtInf[1]/CdtTrfTxInf[0]/Amt`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for malformed index segments and
    /// [`Error::NodeNotFound`] when a segment does not resolve.
    pub fn navigate(&self, path: &str) -> Result<Cursor<'a>> {
        let mut current_node = self.node;
        let mut current_path = self.path.clone();

        for segment in path.split('/') {
            if segment.is_empty() {
                continue;
            }

            if let Some(open_bracket) = segment.find('[') {
                let name = &segment[..open_bracket];
                let close_bracket = segment[open_bracket..]
                    .find(']')
                    .map(|offset| open_bracket + offset)
                    .ok_or_else(|| Error::invalid_path(segment, "unclosed bracket"))?;
                let index: usize = segment[open_bracket + 1..close_bracket]
                    .parse()
                    .map_err(|_| Error::invalid_path(segment, "invalid index"))?;

                current_node = current_node
                    .children
                    .iter()
                    .filter(|c| c.name == name)
                    .nth(index)
                    .ok_or_else(|| {
                        Error::node_not_found(format!("{}/{}", current_path.join("/"), segment))
                    })?;
                current_path.push(format!("{name}[{index}]"));
            } else {
                current_node = current_node.find_child(segment).ok_or_else(|| {
                    Error::node_not_found(format!("{}/{}", current_path.join("/"), segment))
                })?;
                current_path.push(segment.to_string());
            }
        }

        Ok(Cursor {
            node: current_node,
            path: current_path,
        })
    }
}

/// Walk the tree depth-first using a visitor
pub fn walk<T: Traversal>(node: &Element, visitor: &mut T) {
    walk_recursive(node, visitor, &mut vec![]);
}

fn walk_recursive<T: Traversal>(node: &Element, visitor: &mut T, path: &mut Vec<String>) {
    if !visitor.should_continue() {
        return;
    }

    visitor.visit(node, path);

    if !node.children.is_empty() {
        visitor.enter(node, path);
        path.push(node.name.clone());

        for child in &node.children {
            walk_recursive(child, visitor, path);
        }

        path.pop();
        visitor.leave(node, path);
    }
}
