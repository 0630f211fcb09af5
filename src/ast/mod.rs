//! AST node definitions
//!
//! The tree is split by node category:
//! - [`types`]: source locations, declared data types and operator tokens
//! - [`expr`]: expression variants
//! - [`stmt`]: statement variants and the `for`/`if` payloads
//! - [`decl`]: top-level declarations
//! - [`node`]: the category wrapper [`Node`] and the [`Program`] container
//!
//! # Construction
//!
//! Nodes are built through the associated factory functions
//! (`Expr::binary`, `Stmt::while_stmt`, `Decl::function`, ...). Children are
//! taken by value, so ownership moves into the parent; text is taken as `&str`
//! and copied. The parser builds bottom-up and appends finished top-level nodes
//! to a [`Program`].
//!
//! # Ownership
//!
//! Every child is held through a `Box` or a `Vec` owned by exactly one parent.
//! Dropping any node releases its subtree in post-order using an explicit work
//! stack (see [`crate::teardown`]), so deeply nested input cannot exhaust the
//! call stack. The derived `Clone`, `PartialEq` and `Debug` impls are
//! recursive; their stack use grows with nesting depth.

pub mod decl;
pub mod expr;
pub mod node;
pub mod stmt;
pub mod types;

pub use decl::{Decl, Param};
pub use expr::{ArgList, Expr};
pub use node::{Node, NodeCategory, Program};
pub use stmt::{Assign, ElifClause, ForInit, ForInitKind, IfStmt, Stmt, VarDecl};
pub use types::{DataType, Operator, SourceLocation};
