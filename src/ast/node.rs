// Category wrapper and top-level program container

use std::fmt;

use super::decl::Decl;
use super::expr::Expr;
use super::stmt::Stmt;
use super::types::SourceLocation;
use crate::printer::AstPrinter;
use crate::teardown::{self, TeardownStats};

/// The three node categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Expression,
    Statement,
    Declaration,
}

impl NodeCategory {
    pub fn name(&self) -> &'static str {
        match self {
            NodeCategory::Expression => "Expression",
            NodeCategory::Statement => "Statement",
            NodeCategory::Declaration => "Declaration",
        }
    }
}

/// A top-level tree element tagged with its category
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Expression(Expr, SourceLocation),
    Statement(Stmt, SourceLocation),
    Declaration(Decl, SourceLocation),
}

impl Node {
    pub fn expression(expr: Expr, location: SourceLocation) -> Self {
        Node::Expression(expr, location)
    }

    pub fn statement(stmt: Stmt, location: SourceLocation) -> Self {
        Node::Statement(stmt, location)
    }

    pub fn declaration(decl: Decl, location: SourceLocation) -> Self {
        Node::Declaration(decl, location)
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            Node::Expression(..) => NodeCategory::Expression,
            Node::Statement(..) => NodeCategory::Statement,
            Node::Declaration(..) => NodeCategory::Declaration,
        }
    }

    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            Node::Expression(_, loc) => loc,
            Node::Statement(_, loc) => loc,
            Node::Declaration(_, loc) => loc,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::new().render_node(self))
    }
}

/// Top-level program structure.
///
/// Nodes are kept in insertion order, which is the program's declaration and
/// execution order. The container only grows; everything reachable from it is
/// released when it is destroyed or dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    nodes: Vec<Node>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Append a top-level node, taking ownership of its whole subtree
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Render the whole program as indented diagnostic text
    pub fn render(&self) -> String {
        AstPrinter::new().render_program(self)
    }

    /// Tear down the program, releasing every node exactly once.
    ///
    /// Top-level nodes are destroyed in insertion order, each subtree in
    /// post-order. Returns how many nodes of each category were released.
    pub fn destroy(self) -> TeardownStats {
        teardown::destroy_program(self)
    }
}

impl FromIterator<Node> for Program {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Program {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Node> for Program {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
