//! Structural audit
//!
//! A read-only scan over a built tree that checks the ownership properties the
//! rest of the crate relies on:
//! - no node is reachable from two parents (every visited node has a unique
//!   identity)
//! - every `if` chain has as many elif conditions as elif branches and branch
//!   sizes
//!
//! The [`AuditReport`] counts nodes the same way teardown does, so a report can
//! be compared against the [`TeardownStats`](crate::teardown::TeardownStats) of
//! destroying the same tree.

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::ast::{
    Assign, Decl, Expr, ForInit, IfStmt, Node, NodeCategory, Program, SourceLocation, Stmt,
    VarDecl,
};

/// Structural defects found by the audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The same node was reached through two different parents
    AliasedChild {
        category: NodeCategory,
        location: SourceLocation,
    },

    /// Elif conditions, branches and branch sizes disagree in length
    ElifMisaligned {
        conditions: usize,
        branches: usize,
        branch_sizes: usize,
        elif_count: usize,
        location: SourceLocation,
    },
}

impl StructureError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            StructureError::AliasedChild { location, .. } => location,
            StructureError::ElifMisaligned { location, .. } => location,
        }
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::AliasedChild { category, location } => {
                write!(
                    f,
                    "{} node at line {}, column {} is owned by more than one parent",
                    category.name(),
                    location.line,
                    location.column
                )
            }
            StructureError::ElifMisaligned {
                conditions,
                branches,
                branch_sizes,
                elif_count,
                location,
            } => {
                write!(
                    f,
                    "If statement at line {}, column {} has {} elif conditions, {} branches \
                     and {} branch sizes (expected {})",
                    location.line, location.column, conditions, branches, branch_sizes, elif_count
                )
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// Node counts and shape of an audited tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Category wrappers (top-level [`Node`]s)
    pub nodes: usize,
    pub expressions: usize,
    pub statements: usize,
    pub declarations: usize,
    /// Length of the longest chain from a top-level wrapper down to a leaf
    pub max_depth: usize,
}

impl AuditReport {
    pub fn total(&self) -> usize {
        self.expressions + self.statements + self.declarations
    }
}

/// Audit every top-level node of a program
pub fn audit_program(program: &Program) -> Result<AuditReport, StructureError> {
    let result = Auditor::default().run(program.iter());
    log_result(&result);
    result
}

/// Audit a single node and its subtree
pub fn audit_node(node: &Node) -> Result<AuditReport, StructureError> {
    let result = Auditor::default().run(std::iter::once(node));
    log_result(&result);
    result
}

fn log_result(result: &Result<AuditReport, StructureError>) {
    match result {
        Ok(report) => debug!(
            nodes = report.nodes,
            expressions = report.expressions,
            statements = report.statements,
            declarations = report.declarations,
            max_depth = report.max_depth,
            "structure audit passed"
        ),
        Err(err) => warn!(error = %err, "structure audit failed"),
    }
}

/// Identity of a visited node: its kind plus its address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity {
    Node(usize),
    Expr(usize),
    Stmt(usize),
    Decl(usize),
    // Initializer/increment payloads owned by a `for` header
    ForHeader(usize),
}

fn address<T>(value: &T) -> usize {
    value as *const T as usize
}

enum Visit<'a> {
    Node(&'a Node),
    Expr(&'a Expr),
    Stmt(&'a Stmt),
    Decl(&'a Decl),
    VarDecl(&'a VarDecl),
    Assign(&'a Assign),
}

#[derive(Default)]
struct Auditor {
    seen: FxHashSet<Identity>,
    report: AuditReport,
}

impl Auditor {
    fn run<'a>(
        mut self,
        roots: impl Iterator<Item = &'a Node>,
    ) -> Result<AuditReport, StructureError> {
        let mut stack: Vec<(Visit<'a>, usize)> =
            roots.map(|node| (Visit::Node(node), 1)).collect();
        stack.reverse();

        while let Some((visit, depth)) = stack.pop() {
            self.report.max_depth = self.report.max_depth.max(depth);
            let child = depth + 1;

            match visit {
                Visit::Node(node) => {
                    self.claim(Identity::Node(address(node)), node.category(), node.location())?;
                    self.report.nodes += 1;
                    let payload = match node {
                        Node::Expression(expr, _) => Visit::Expr(expr),
                        Node::Statement(stmt, _) => Visit::Stmt(stmt),
                        Node::Declaration(decl, _) => Visit::Decl(decl),
                    };
                    stack.push((payload, child));
                }
                Visit::Expr(expr) => {
                    self.claim(
                        Identity::Expr(address(expr)),
                        NodeCategory::Expression,
                        expr.location(),
                    )?;
                    self.report.expressions += 1;
                    push_expr_children(expr, child, &mut stack);
                }
                Visit::Stmt(stmt) => {
                    self.claim(
                        Identity::Stmt(address(stmt)),
                        NodeCategory::Statement,
                        stmt.location(),
                    )?;
                    self.report.statements += 1;
                    if let Stmt::If(if_stmt) = stmt {
                        check_elif_alignment(if_stmt)?;
                    }
                    push_stmt_children(stmt, child, &mut stack);
                }
                Visit::Decl(decl) => {
                    self.claim(
                        Identity::Decl(address(decl)),
                        NodeCategory::Declaration,
                        decl.location(),
                    )?;
                    self.report.declarations += 1;
                    match decl {
                        Decl::Function { body, .. } => push_stmts(body, child, &mut stack),
                        Decl::GlobalVar { initializer, .. } => {
                            if let Some(init) = initializer {
                                stack.push((Visit::Expr(init), child));
                            }
                        }
                    }
                }
                Visit::VarDecl(decl) => {
                    self.claim(
                        Identity::ForHeader(address(decl)),
                        NodeCategory::Statement,
                        &decl.location,
                    )?;
                    self.report.statements += 1;
                    if let Some(init) = &decl.initializer {
                        stack.push((Visit::Expr(init), child));
                    }
                }
                Visit::Assign(assign) => {
                    self.claim(
                        Identity::ForHeader(address(assign)),
                        NodeCategory::Statement,
                        &assign.location,
                    )?;
                    self.report.statements += 1;
                    stack.push((Visit::Expr(&assign.value), child));
                }
            }
        }

        Ok(self.report)
    }

    fn claim(
        &mut self,
        identity: Identity,
        category: NodeCategory,
        location: &SourceLocation,
    ) -> Result<(), StructureError> {
        if self.seen.insert(identity) {
            Ok(())
        } else {
            Err(StructureError::AliasedChild {
                category,
                location: *location,
            })
        }
    }
}

fn check_elif_alignment(if_stmt: &IfStmt) -> Result<(), StructureError> {
    let elif_count = if_stmt.elif_count();
    let conditions = if_stmt.elif_conditions().count();
    let branches = if_stmt.elif_branches().count();
    let branch_sizes = if_stmt.elif_branch_sizes().len();

    if conditions == elif_count && branches == elif_count && branch_sizes == elif_count {
        Ok(())
    } else {
        Err(StructureError::ElifMisaligned {
            conditions,
            branches,
            branch_sizes,
            elif_count,
            location: if_stmt.location,
        })
    }
}

// Children are pushed in reverse so they are visited in source order
fn push_expr_children<'a>(expr: &'a Expr, depth: usize, stack: &mut Vec<(Visit<'a>, usize)>) {
    match expr {
        Expr::LiteralInt(..)
        | Expr::LiteralFloat(..)
        | Expr::LiteralString(..)
        | Expr::Identifier(..) => {}
        Expr::Binary { left, right, .. } => {
            stack.push((Visit::Expr(right), depth));
            stack.push((Visit::Expr(left), depth));
        }
        Expr::Unary { operand, .. } => stack.push((Visit::Expr(operand), depth)),
        Expr::Assignment { value, .. } => stack.push((Visit::Expr(value), depth)),
        Expr::Call { args, .. } => push_exprs(&args.args, depth, stack),
        Expr::ArgList(list) => push_exprs(&list.args, depth, stack),
    }
}

fn push_stmt_children<'a>(stmt: &'a Stmt, depth: usize, stack: &mut Vec<(Visit<'a>, usize)>) {
    match stmt {
        Stmt::VarDecl(decl) => {
            if let Some(init) = &decl.initializer {
                stack.push((Visit::Expr(init), depth));
            }
        }
        Stmt::Assign(assign) => stack.push((Visit::Expr(&assign.value), depth)),
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                stack.push((Visit::Expr(value), depth));
            }
        }
        Stmt::Print { args, .. } => push_exprs(&args.args, depth, stack),
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Block { statements, .. } => push_stmts(statements, depth, stack),
        Stmt::If(if_stmt) => {
            push_stmts(&if_stmt.else_branch, depth, stack);
            for clause in if_stmt.elifs.iter().rev() {
                push_stmts(&clause.branch, depth, stack);
                stack.push((Visit::Expr(&clause.condition), depth));
            }
            push_stmts(&if_stmt.if_branch, depth, stack);
            stack.push((Visit::Expr(&if_stmt.condition), depth));
        }
        Stmt::While {
            condition, body, ..
        } => {
            push_stmts(body, depth, stack);
            stack.push((Visit::Expr(condition), depth));
        }
        Stmt::For {
            init,
            condition,
            increment,
            body,
            ..
        } => {
            push_stmts(body, depth, stack);
            if let Some(increment) = increment {
                stack.push((Visit::Assign(increment), depth));
            }
            if let Some(condition) = condition {
                stack.push((Visit::Expr(condition), depth));
            }
            match init {
                ForInit::None => {}
                ForInit::VarDecl(decl) => stack.push((Visit::VarDecl(decl), depth)),
                ForInit::Assign(assign) => stack.push((Visit::Assign(assign), depth)),
            }
        }
        Stmt::ExprStmt { expr, .. } => stack.push((Visit::Expr(expr), depth)),
    }
}

fn push_exprs<'a>(exprs: &'a [Expr], depth: usize, stack: &mut Vec<(Visit<'a>, usize)>) {
    stack.extend(exprs.iter().rev().map(|expr| (Visit::Expr(expr), depth)));
}

fn push_stmts<'a>(stmts: &'a [Stmt], depth: usize, stack: &mut Vec<(Visit<'a>, usize)>) {
    stack.extend(stmts.iter().rev().map(|stmt| (Visit::Stmt(stmt), depth)));
}
