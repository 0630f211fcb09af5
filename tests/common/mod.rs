// Shared tree builders for the integration tests
#![allow(dead_code)]

use sapling::ast::*;

pub fn loc(line: usize, column: usize) -> SourceLocation {
    SourceLocation::new(line, column)
}

pub fn int(value: i32, line: usize, column: usize) -> Expr {
    Expr::literal_int(value, loc(line, column))
}

pub fn ident(name: &str, line: usize, column: usize) -> Expr {
    Expr::identifier(name, loc(line, column))
}

/// A program that uses every node variant at least once:
///
/// ```text
/// int limit = 10;
/// int add(int a, int b) { return a + b; }
/// void main() {
///     float ratio = 0.5;
///     int total;
///     total = add(1, 2);
///     print("total", total);
///     if (total > limit) { break; } elif (total == 0) { continue; } else { total = -total; }
///     while (total < limit) { total = total + 1; }
///     for (int i = 0; i < 3; i = i + 1) { { ratio = 2.0; } }
///     for (;;) {}
///     return;
/// }
/// (1, "one")
/// ```
pub fn sample_program() -> Program {
    let mut program = Program::new();

    program.push(Node::declaration(
        Decl::global_var("limit", DataType::Int, Some(int(10, 1, 13)), loc(1, 1)),
        loc(1, 1),
    ));

    program.push(Node::declaration(
        Decl::function(
            "add",
            DataType::Int,
            vec![Param::new("a", DataType::Int), Param::new("b", DataType::Int)],
            vec![Stmt::return_stmt(
                Some(Expr::binary(
                    ident("a", 2, 32),
                    Operator::Plus,
                    ident("b", 2, 36),
                    loc(2, 34),
                )),
                loc(2, 25),
            )],
            loc(2, 1),
        ),
        loc(2, 1),
    ));

    let main_body = vec![
        Stmt::var_decl(
            "ratio",
            DataType::Float,
            Some(Expr::literal_float(0.5, loc(4, 19))),
            loc(4, 5),
        ),
        Stmt::var_decl("total", DataType::Int, None, loc(5, 5)),
        Stmt::assign(
            "total",
            Expr::call(
                "add",
                ArgList::new(vec![int(1, 6, 17), int(2, 6, 20)], loc(6, 16)),
                loc(6, 13),
            ),
            loc(6, 5),
        ),
        Stmt::print(
            ArgList::new(
                vec![Expr::literal_string("total", loc(7, 11)), ident("total", 7, 20)],
                loc(7, 10),
            ),
            loc(7, 5),
        ),
        Stmt::if_stmt(
            Expr::binary(ident("total", 8, 9), Operator::Gt, ident("limit", 8, 17), loc(8, 15)),
            vec![Stmt::break_stmt(loc(8, 26))],
            vec![Expr::binary(ident("total", 8, 41), Operator::EqEq, int(0, 8, 50), loc(8, 47))],
            vec![vec![Stmt::continue_stmt(loc(8, 55))]],
            vec![Stmt::assign(
                "total",
                Expr::unary(Operator::Minus, ident("total", 8, 88), loc(8, 87)),
                loc(8, 79),
            )],
            loc(8, 5),
        ),
        Stmt::while_stmt(
            Expr::binary(ident("total", 9, 12), Operator::Lt, ident("limit", 9, 20), loc(9, 18)),
            vec![Stmt::assign(
                "total",
                Expr::binary(ident("total", 9, 37), Operator::Plus, int(1, 9, 45), loc(9, 43)),
                loc(9, 29),
            )],
            loc(9, 5),
        ),
        Stmt::for_stmt(
            ForInit::VarDecl(VarDecl::new("i", DataType::Int, Some(int(0, 10, 18)), loc(10, 10))),
            Some(Expr::binary(ident("i", 10, 21), Operator::Lt, int(3, 10, 25), loc(10, 23))),
            Some(Assign::new(
                "i",
                Expr::binary(ident("i", 10, 32), Operator::Plus, int(1, 10, 36), loc(10, 34)),
                loc(10, 28),
            )),
            vec![Stmt::block(
                vec![Stmt::expr_stmt(
                    Expr::assignment("ratio", Expr::literal_float(2.0, loc(10, 53)), loc(10, 45)),
                    loc(10, 45),
                )],
                loc(10, 43),
            )],
            loc(10, 5),
        ),
        Stmt::for_stmt(ForInit::None, None, None, Vec::new(), loc(11, 5)),
        Stmt::return_stmt(None, loc(12, 5)),
    ];

    program.push(Node::declaration(
        Decl::function("main", DataType::Void, Vec::new(), main_body, loc(3, 1)),
        loc(3, 1),
    ));

    program.push(Node::expression(
        Expr::arg_list(
            vec![int(1, 14, 2), Expr::literal_string("one", loc(14, 5))],
            loc(14, 1),
        ),
        loc(14, 1),
    ));

    program
}
