// Constants for the AST printer

/// Spaces emitted per nesting level
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Digits after the decimal point for float literals
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Depth at which top-level program nodes are rendered
/// The program header sits at depth 0
pub const PROGRAM_NODE_DEPTH: usize = 1;
