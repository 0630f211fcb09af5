//! Ownership teardown
//!
//! Releases a tree in post-order: every owned child is destroyed before the
//! node that held it, and the children of one node are destroyed in sequence
//! order (a `for` header goes initializer, condition, increment, then body).
//!
//! # Implementation
//!
//! Teardown never recurses. Each node is first *detached*: its owned children
//! are moved out onto an explicit work stack and the node is left as a shell
//! with empty sequences and heap-free placeholders. Once all of its children
//! are gone the shell itself is dropped. `Drop` for [`Expr`], [`Stmt`] and
//! [`Decl`] runs the same loop, so dropping any subtree (including by simply
//! letting a [`Program`] go out of scope) uses constant call-stack depth no
//! matter how deeply the input program nests.
//!
//! Because both entry points consume their argument, a subtree can only ever
//! be released once.

use std::mem;

use tracing::debug;

use crate::ast::{Decl, Expr, ForInit, Node, NodeCategory, Program, SourceLocation, Stmt};

/// Per-category counts of released nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownStats {
    /// Category wrappers (top-level [`Node`]s)
    pub nodes: usize,
    pub expressions: usize,
    pub statements: usize,
    pub declarations: usize,
}

impl TeardownStats {
    /// Expressions, statements and declarations released, excluding wrappers
    pub fn total(&self) -> usize {
        self.expressions + self.statements + self.declarations
    }

    fn record(&mut self, released: &Released) {
        match released {
            Released::Node(..) => self.nodes += 1,
            Released::Expr(_) => self.expressions += 1,
            Released::Stmt(_) => self.statements += 1,
            Released::Decl(_) => self.declarations += 1,
        }
    }
}

/// A node that has just been released, reported in teardown order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    Node(NodeCategory, SourceLocation),
    Expr(SourceLocation),
    Stmt(SourceLocation),
    Decl(SourceLocation),
}

/// Destroy a whole program: top-level nodes in insertion order, then the
/// program's own storage.
pub fn destroy_program(program: Program) -> TeardownStats {
    destroy_program_with(program, |_| {})
}

/// Like [`destroy_program`], reporting every released node to `on_release`
pub fn destroy_program_with<F>(program: Program, on_release: F) -> TeardownStats
where
    F: FnMut(Released),
{
    let top_level = program.len();
    let roots = program.into_nodes().into_iter().map(Owned::Node).collect();
    let stats = release(roots, on_release);
    debug!(
        top_level,
        expressions = stats.expressions,
        statements = stats.statements,
        declarations = stats.declarations,
        "program torn down"
    );
    stats
}

/// Destroy a single top-level node and everything it owns
pub fn destroy_node(node: Node) -> TeardownStats {
    release(vec![Owned::Node(node)], |_| {})
}

/// A value on the teardown work stack
enum Owned {
    Node(Node),
    Expr(Expr),
    Stmt(Stmt),
    Decl(Decl),
}

impl Owned {
    fn detach_children(&mut self, out: &mut Vec<Owned>) {
        match self {
            Owned::Node(node) => node.detach_payload(out),
            Owned::Expr(expr) => expr.detach_children(out),
            Owned::Stmt(stmt) => stmt.detach_children(out),
            Owned::Decl(decl) => decl.detach_children(out),
        }
    }

    fn released(&self) -> Released {
        match self {
            Owned::Node(node) => Released::Node(node.category(), *node.location()),
            Owned::Expr(expr) => Released::Expr(*expr.location()),
            Owned::Stmt(stmt) => Released::Stmt(*stmt.location()),
            Owned::Decl(decl) => Released::Decl(*decl.location()),
        }
    }
}

struct Frame {
    item: Owned,
    detached: bool,
}

impl Frame {
    fn pending(item: Owned) -> Self {
        Frame {
            item,
            detached: false,
        }
    }
}

/// Post-order release of `roots`, in order, using an explicit work stack
fn release<F>(roots: Vec<Owned>, mut on_release: F) -> TeardownStats
where
    F: FnMut(Released),
{
    let mut stats = TeardownStats::default();
    let mut stack: Vec<Frame> = roots.into_iter().rev().map(Frame::pending).collect();
    let mut children = Vec::new();

    while let Some(mut frame) = stack.pop() {
        if frame.detached {
            let released = frame.item.released();
            stats.record(&released);
            on_release(released);
            // Only a shell is left at this point; dropping it frees the node's own storage
            drop(frame.item);
            continue;
        }

        frame.item.detach_children(&mut children);
        frame.detached = true;
        stack.push(frame);
        stack.extend(children.drain(..).rev().map(Frame::pending));
    }

    stats
}

fn take_boxed(slot: &mut Box<Expr>) -> Owned {
    Owned::Expr(mem::replace(slot.as_mut(), Expr::vacant()))
}

fn take_optional(slot: &mut Option<Box<Expr>>, out: &mut Vec<Owned>) {
    if let Some(expr) = slot.take() {
        out.push(Owned::Expr(*expr));
    }
}

fn take_exprs(slot: &mut Vec<Expr>, out: &mut Vec<Owned>) {
    out.extend(mem::take(slot).into_iter().map(Owned::Expr));
}

fn take_stmts(slot: &mut Vec<Stmt>, out: &mut Vec<Owned>) {
    out.extend(mem::take(slot).into_iter().map(Owned::Stmt));
}

impl Node {
    fn detach_payload(&mut self, out: &mut Vec<Owned>) {
        let payload = match self {
            Node::Expression(expr, _) => Owned::Expr(mem::replace(expr, Expr::vacant())),
            Node::Statement(stmt, _) => Owned::Stmt(mem::replace(stmt, Stmt::vacant())),
            Node::Declaration(decl, _) => Owned::Decl(mem::replace(decl, Decl::vacant())),
        };
        out.push(payload);
    }
}

impl Expr {
    fn detach_children(&mut self, out: &mut Vec<Owned>) {
        match self {
            Expr::LiteralInt(..)
            | Expr::LiteralFloat(..)
            | Expr::LiteralString(..)
            | Expr::Identifier(..) => {}
            Expr::Binary { left, right, .. } => {
                out.push(take_boxed(left));
                out.push(take_boxed(right));
            }
            Expr::Unary { operand, .. } => out.push(take_boxed(operand)),
            Expr::Assignment { value, .. } => out.push(take_boxed(value)),
            Expr::Call { args, .. } => take_exprs(&mut args.args, out),
            Expr::ArgList(list) => take_exprs(&mut list.args, out),
        }
    }
}

impl Stmt {
    fn detach_children(&mut self, out: &mut Vec<Owned>) {
        match self {
            Stmt::VarDecl(decl) => take_optional(&mut decl.initializer, out),
            Stmt::Assign(assign) => out.push(take_boxed(&mut assign.value)),
            Stmt::Return { value, .. } => take_optional(value, out),
            Stmt::Print { args, .. } => take_exprs(&mut args.args, out),
            Stmt::Break(_) | Stmt::Continue(_) => {}
            Stmt::Block { statements, .. } => take_stmts(statements, out),
            Stmt::If(if_stmt) => {
                out.push(take_boxed(&mut if_stmt.condition));
                take_stmts(&mut if_stmt.if_branch, out);
                for mut clause in mem::take(&mut if_stmt.elifs) {
                    out.push(take_boxed(&mut clause.condition));
                    take_stmts(&mut clause.branch, out);
                }
                take_stmts(&mut if_stmt.else_branch, out);
            }
            Stmt::While {
                condition, body, ..
            } => {
                out.push(take_boxed(condition));
                take_stmts(body, out);
            }
            Stmt::For {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                // The header payloads are released in place, as statements of their own
                match mem::take(init) {
                    ForInit::None => {}
                    ForInit::VarDecl(decl) => out.push(Owned::Stmt(Stmt::VarDecl(decl))),
                    ForInit::Assign(assign) => out.push(Owned::Stmt(Stmt::Assign(assign))),
                }
                take_optional(condition, out);
                if let Some(assign) = increment.take() {
                    out.push(Owned::Stmt(Stmt::Assign(assign)));
                }
                take_stmts(body, out);
            }
            Stmt::ExprStmt { expr, .. } => out.push(take_boxed(expr)),
        }
    }
}

impl Decl {
    fn detach_children(&mut self, out: &mut Vec<Owned>) {
        match self {
            Decl::Function { body, .. } => take_stmts(body, out),
            Decl::GlobalVar { initializer, .. } => take_optional(initializer, out),
        }
    }
}

/// Drop hook shared by the recursive node types
fn release_children(mut detach: impl FnMut(&mut Vec<Owned>)) {
    let mut children = Vec::new();
    detach(&mut children);
    if !children.is_empty() {
        release(children, |_| {});
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        release_children(|out| self.detach_children(out));
    }
}

impl Drop for Stmt {
    fn drop(&mut self) {
        release_children(|out| self.detach_children(out));
    }
}

impl Drop for Decl {
    fn drop(&mut self) {
        release_children(|out| self.detach_children(out));
    }
}
