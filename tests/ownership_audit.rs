// Structural audit over constructed trees

mod common;

use common::{ident, int, loc, sample_program};
use sapling::ast::*;
use sapling::audit::{audit_node, audit_program};

fn collect_ifs<'a>(stmts: &'a [Stmt], out: &mut Vec<&'a IfStmt>) {
    for stmt in stmts {
        match stmt {
            Stmt::If(if_stmt) => {
                out.push(if_stmt);
                collect_ifs(&if_stmt.if_branch, out);
                for branch in if_stmt.elif_branches() {
                    collect_ifs(branch, out);
                }
                collect_ifs(&if_stmt.else_branch, out);
            }
            Stmt::Block { statements, .. } => collect_ifs(statements, out),
            Stmt::While { body, .. } | Stmt::For { body, .. } => collect_ifs(body, out),
            _ => {}
        }
    }
}

#[test]
fn test_sample_program_passes_audit() {
    let program = sample_program();
    let report = audit_program(&program).expect("sample program should be well formed");

    assert_eq!(report.nodes, 4);
    assert_eq!(report.declarations, 3);

    let stats = program.destroy();
    assert_eq!(report.expressions, stats.expressions);
    assert_eq!(report.statements, stats.statements);
    assert_eq!(report.total(), stats.total());
}

#[test]
fn test_cloned_program_is_independent() {
    let program = sample_program();
    let copy = program.clone();

    let mut both = Program::new();
    both.extend(program.into_nodes());
    both.extend(copy.into_nodes());

    let report = audit_program(&both).expect("clones must not share children");
    assert_eq!(report.nodes, 8);
}

#[test]
fn test_elif_arrays_stay_aligned() {
    let nested = Stmt::if_stmt(
        ident("inner", 3, 9),
        Vec::new(),
        vec![ident("x", 4, 11), ident("y", 5, 11), ident("z", 6, 11)],
        vec![
            vec![Stmt::break_stmt(loc(4, 15))],
            Vec::new(),
            vec![Stmt::continue_stmt(loc(6, 15)), Stmt::break_stmt(loc(6, 25))],
        ],
        Vec::new(),
        loc(3, 5),
    );
    let outer = Stmt::if_chain(
        ident("outer", 1, 5),
        vec![nested],
        vec![ElifClause::new(int(0, 8, 7), Vec::new())],
        vec![Stmt::break_stmt(loc(9, 5))],
        loc(1, 1),
    );
    let body = vec![outer];

    let mut ifs = Vec::new();
    collect_ifs(&body, &mut ifs);
    assert_eq!(ifs.len(), 2);

    for if_stmt in ifs {
        let count = if_stmt.elif_count();
        assert_eq!(if_stmt.elif_conditions().count(), count);
        assert_eq!(if_stmt.elif_branches().count(), count);
        assert_eq!(if_stmt.elif_branch_sizes().len(), count);
    }

    let decl = Decl::function("check", DataType::Void, Vec::new(), body, loc(1, 1));
    let report = audit_node(&Node::declaration(decl, loc(1, 1))).unwrap();
    assert_eq!(report.statements, 6);
}

#[test]
fn test_deep_tree_audit() {
    let mut expr = int(0, 1, 1);
    for _ in 0..100_000 {
        expr = Expr::unary(Operator::Bang, expr, loc(1, 1));
    }
    let report = audit_node(&Node::expression(expr, loc(1, 1))).unwrap();

    assert_eq!(report.expressions, 100_001);
    assert_eq!(report.max_depth, 100_002);
}
