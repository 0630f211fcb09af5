//! Expression nodes and their factory functions.
//!
//! Every child expression is owned through a `Box` (single child) or a `Vec`
//! (ordered children), so a subtree always has exactly one parent. Text
//! arguments are copied into the node; the caller keeps its own buffer.

use super::types::{Operator, SourceLocation};

/// Ordered, owned list of argument expressions.
///
/// Shared by call expressions and print statements. Order is significant and
/// duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgList {
    pub args: Vec<Expr>,
    pub location: SourceLocation,
}

impl ArgList {
    pub fn new(args: Vec<Expr>, location: SourceLocation) -> Self {
        ArgList { args, location }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.args.iter()
    }
}

/// Expression variants
///
/// `Clone`, `PartialEq` and `Debug` are derived and recurse once per nesting
/// level. Only dropping, printing and auditing run on an explicit stack, so
/// clone or compare very deep trees on a thread with a large enough stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    LiteralInt(i32, SourceLocation),
    LiteralFloat(f64, SourceLocation),
    LiteralString(String, SourceLocation),
    Identifier(String, SourceLocation),
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: Operator,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        value: Box<Expr>,
        location: SourceLocation,
    },
    Call {
        name: String,
        args: ArgList,
        location: SourceLocation,
    },
    ArgList(ArgList),
}

impl Expr {
    pub fn literal_int(value: i32, location: SourceLocation) -> Self {
        Expr::LiteralInt(value, location)
    }

    pub fn literal_float(value: f64, location: SourceLocation) -> Self {
        Expr::LiteralFloat(value, location)
    }

    pub fn literal_string(value: &str, location: SourceLocation) -> Self {
        Expr::LiteralString(value.to_owned(), location)
    }

    pub fn identifier(name: &str, location: SourceLocation) -> Self {
        Expr::Identifier(name.to_owned(), location)
    }

    pub fn binary(left: Expr, op: Operator, right: Expr, location: SourceLocation) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    pub fn unary(op: Operator, operand: Expr, location: SourceLocation) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            location,
        }
    }

    pub fn assignment(name: &str, value: Expr, location: SourceLocation) -> Self {
        Expr::Assignment {
            name: name.to_owned(),
            value: Box::new(value),
            location,
        }
    }

    pub fn call(name: &str, args: ArgList, location: SourceLocation) -> Self {
        Expr::Call {
            name: name.to_owned(),
            args,
            location,
        }
    }

    pub fn arg_list(args: Vec<Expr>, location: SourceLocation) -> Self {
        Expr::ArgList(ArgList::new(args, location))
    }

    /// Get the source location of this expression
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expr::LiteralInt(_, loc) => loc,
            Expr::LiteralFloat(_, loc) => loc,
            Expr::LiteralString(_, loc) => loc,
            Expr::Identifier(_, loc) => loc,
            Expr::Binary { location, .. } => location,
            Expr::Unary { location, .. } => location,
            Expr::Assignment { location, .. } => location,
            Expr::Call { location, .. } => location,
            Expr::ArgList(list) => &list.location,
        }
    }

    /// Heap-free stand-in left behind when a child is detached during teardown
    pub(crate) fn vacant() -> Self {
        Expr::LiteralInt(0, SourceLocation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize, column: usize) -> SourceLocation {
        SourceLocation::new(line, column)
    }

    #[test]
    fn test_text_is_copied() {
        let mut buffer = String::from("counter");
        let expr = Expr::identifier(&buffer, loc(1, 1));
        buffer.clear();
        buffer.push_str("reused");

        match &expr {
            Expr::Identifier(name, _) => assert_eq!(name, "counter"),
            _ => panic!("Expected identifier"),
        }
    }

    #[test]
    fn test_binary_keeps_operands_in_order() {
        let expr = Expr::binary(
            Expr::literal_int(1, loc(1, 1)),
            Operator::Plus,
            Expr::literal_int(2, loc(1, 5)),
            loc(1, 3),
        );

        match &expr {
            Expr::Binary {
                op, left, right, ..
            } => {
                assert_eq!(*op, Operator::Plus);
                assert!(matches!(**left, Expr::LiteralInt(1, _)));
                assert!(matches!(**right, Expr::LiteralInt(2, _)));
            }
            _ => panic!("Expected binary expression"),
        }
        assert_eq!(*expr.location(), loc(1, 3));
    }

    #[test]
    fn test_call_stores_arguments_verbatim() {
        let args = ArgList::new(
            vec![
                Expr::identifier("x", loc(2, 7)),
                Expr::identifier("x", loc(2, 10)),
            ],
            loc(2, 6),
        );
        let expr = Expr::call("max", args, loc(2, 1));

        match &expr {
            Expr::Call { name, args, .. } => {
                assert_eq!(name, "max");
                assert_eq!(args.len(), 2);
                assert!(args
                    .iter()
                    .all(|arg| matches!(arg, Expr::Identifier(n, _) if n == "x")));
            }
            _ => panic!("Expected call expression"),
        }
    }

    #[test]
    fn test_clone_copies_nested_operands() {
        let mut expr = Expr::literal_int(7, loc(1, 1));
        for column in 0..1_000 {
            expr = Expr::unary(Operator::Minus, expr, loc(1, column));
        }
        let copy = expr.clone();
        assert_eq!(copy, expr);

        let (Expr::Unary { operand: a, .. }, Expr::Unary { operand: b, .. }) = (&expr, &copy)
        else {
            panic!("Expected unary expressions");
        };
        assert!(!std::ptr::eq(a.as_ref(), b.as_ref()));
    }

    #[test]
    fn test_clone_of_deep_tree_on_large_stack() {
        let mut expr = Expr::literal_int(0, loc(1, 1));
        for _ in 0..100_000 {
            expr = Expr::unary(Operator::Bang, expr, loc(1, 1));
        }

        let copy = std::thread::Builder::new()
            .stack_size(256 * 1024 * 1024)
            .spawn(move || {
                let copy = expr.clone();
                drop(expr);
                copy
            })
            .unwrap()
            .join()
            .unwrap();
        assert!(matches!(copy, Expr::Unary { op: Operator::Bang, .. }));
    }

    #[test]
    fn test_arg_list_location() {
        let expr = Expr::arg_list(Vec::new(), loc(4, 2));
        assert_eq!(*expr.location(), loc(4, 2));
        assert!(matches!(&expr, Expr::ArgList(list) if list.is_empty()));
    }
}
