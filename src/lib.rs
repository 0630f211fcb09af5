//! # Introduction
//!
//! Sapling is the abstract syntax tree core of a small imperative-language
//! front end. It defines the node taxonomy a parser builds, owns the tree
//! while later passes read it, renders it as indented text for diagnostics,
//! and releases it exactly once at the end of compilation.
//!
//! ## Pipeline position
//!
//! ```text
//! Source → Lexer → Parser → [ AST ] → Analysis / Interpretation
//!                              │
//!                              └→ Printer (diagnostics)
//! ```
//!
//! 1. [`ast`]: node categories and variants plus one factory function per
//!    variant. The parser builds bottom-up and appends top-level nodes to an
//!    [`ast::Program`].
//! 2. [`printer`]: pre-order rendering to a list of indented lines.
//! 3. [`teardown`]: post-order release of a tree using an explicit work stack.
//!    Dropping any node goes through the same path.
//! 4. [`audit`]: read-only ownership and alignment checks, with node counts
//!    that match what teardown reports.
//!
//! ## Language subset
//!
//! Types: `int`, `float`, `bool`, `string`, `void`.
//! Expressions: literals, identifiers, binary/unary operators, assignment,
//! calls.
//! Statements: declarations, assignment, `return`, `print`, `break`,
//! `continue`, blocks, `if/elif/else`, `while`, `for`.
//! Declarations: functions and global variables.

pub mod ast;
pub mod audit;
pub mod constants;
pub mod printer;
pub mod teardown;

pub use ast::{Node, NodeCategory, Program};
pub use audit::{audit_program, AuditReport, StructureError};
pub use printer::{AstPrinter, PrintedLine, PrinterOptions};
pub use teardown::{Released, TeardownStats};
