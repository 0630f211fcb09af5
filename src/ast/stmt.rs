//! Statement nodes and their factory functions.
//!
//! `VarDecl` and `Assign` are standalone payload structs because they appear
//! both as statements of their own and inside a `for` header (initializer and
//! increment). The `for` header owns the payload directly, so nothing has to be
//! rebuilt when the loop is printed or torn down.

use super::expr::{ArgList, Expr};
use super::types::{DataType, SourceLocation};

/// Variable declaration payload: `type name [= initializer]`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub var_type: DataType,
    pub initializer: Option<Box<Expr>>,
    pub location: SourceLocation,
}

impl VarDecl {
    pub fn new(
        name: &str,
        var_type: DataType,
        initializer: Option<Expr>,
        location: SourceLocation,
    ) -> Self {
        VarDecl {
            name: name.to_owned(),
            var_type,
            initializer: initializer.map(Box::new),
            location,
        }
    }
}

/// Assignment payload: `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub value: Box<Expr>,
    pub location: SourceLocation,
}

impl Assign {
    pub fn new(name: &str, value: Expr, location: SourceLocation) -> Self {
        Assign {
            name: name.to_owned(),
            value: Box::new(value),
            location,
        }
    }
}

/// One `elif` arm: its condition and the statements it guards
#[derive(Debug, Clone, PartialEq)]
pub struct ElifClause {
    pub condition: Box<Expr>,
    pub branch: Vec<Stmt>,
}

impl ElifClause {
    pub fn new(condition: Expr, branch: Vec<Stmt>) -> Self {
        ElifClause {
            condition: Box::new(condition),
            branch,
        }
    }
}

/// `if` / `elif` / `else` chain.
///
/// Each elif condition is stored next to its branch, so the condition list,
/// the branch list and the branch sizes always line up index by index.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Box<Expr>,
    pub if_branch: Vec<Stmt>,
    pub elifs: Vec<ElifClause>,
    pub else_branch: Vec<Stmt>,
    pub location: SourceLocation,
}

impl IfStmt {
    pub fn elif_count(&self) -> usize {
        self.elifs.len()
    }

    pub fn elif_conditions(&self) -> impl Iterator<Item = &Expr> + '_ {
        self.elifs.iter().map(|clause| clause.condition.as_ref())
    }

    pub fn elif_branches(&self) -> impl Iterator<Item = &[Stmt]> + '_ {
        self.elifs.iter().map(|clause| clause.branch.as_slice())
    }

    pub fn elif_branch_sizes(&self) -> Vec<usize> {
        self.elifs.iter().map(|clause| clause.branch.len()).collect()
    }

    pub fn has_else(&self) -> bool {
        !self.else_branch.is_empty()
    }
}

/// Which initializer a `for` header carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForInitKind {
    None,
    VarDecl,
    Assign,
}

/// Initializer of a `for` header
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ForInit {
    #[default]
    None,
    VarDecl(VarDecl),
    Assign(Assign),
}

impl ForInit {
    /// Build an initializer from a discriminant and candidate payloads.
    ///
    /// Only the payload named by `kind` is kept; the other one (if any) is
    /// released here.
    pub fn select(kind: ForInitKind, var_decl: Option<VarDecl>, assign: Option<Assign>) -> Self {
        match kind {
            ForInitKind::None => ForInit::None,
            ForInitKind::VarDecl => var_decl.map_or(ForInit::None, ForInit::VarDecl),
            ForInitKind::Assign => assign.map_or(ForInit::None, ForInit::Assign),
        }
    }

    pub fn kind(&self) -> ForInitKind {
        match self {
            ForInit::None => ForInitKind::None,
            ForInit::VarDecl(_) => ForInitKind::VarDecl,
            ForInit::Assign(_) => ForInitKind::Assign,
        }
    }
}

/// Statement variants
///
/// The derived `Clone`, `PartialEq` and `Debug` recurse through nested
/// blocks and bodies; see [`Expr`] for the stack depth this needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(Assign),
    Return {
        value: Option<Box<Expr>>,
        location: SourceLocation,
    },
    Print {
        args: ArgList,
        location: SourceLocation,
    },
    Break(SourceLocation),
    Continue(SourceLocation),
    Block {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
    If(IfStmt),
    While {
        condition: Box<Expr>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    For {
        init: ForInit,
        condition: Option<Box<Expr>>,
        increment: Option<Assign>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    ExprStmt {
        expr: Box<Expr>,
        location: SourceLocation,
    },
}

impl Stmt {
    pub fn var_decl(
        name: &str,
        var_type: DataType,
        initializer: Option<Expr>,
        location: SourceLocation,
    ) -> Self {
        Stmt::VarDecl(VarDecl::new(name, var_type, initializer, location))
    }

    pub fn assign(name: &str, value: Expr, location: SourceLocation) -> Self {
        Stmt::Assign(Assign::new(name, value, location))
    }

    pub fn return_stmt(value: Option<Expr>, location: SourceLocation) -> Self {
        Stmt::Return {
            value: value.map(Box::new),
            location,
        }
    }

    pub fn print(args: ArgList, location: SourceLocation) -> Self {
        Stmt::Print { args, location }
    }

    pub fn break_stmt(location: SourceLocation) -> Self {
        Stmt::Break(location)
    }

    pub fn continue_stmt(location: SourceLocation) -> Self {
        Stmt::Continue(location)
    }

    /// Build an `if` chain from index-aligned elif conditions and branches.
    ///
    /// # Panics
    ///
    /// Panics if `elif_conditions` and `elif_branches` differ in length. The
    /// parser is expected to hand over matching arrays.
    pub fn if_stmt(
        condition: Expr,
        if_branch: Vec<Stmt>,
        elif_conditions: Vec<Expr>,
        elif_branches: Vec<Vec<Stmt>>,
        else_branch: Vec<Stmt>,
        location: SourceLocation,
    ) -> Self {
        assert_eq!(
            elif_conditions.len(),
            elif_branches.len(),
            "elif conditions and branches must be index-aligned"
        );
        let elifs = elif_conditions
            .into_iter()
            .zip(elif_branches)
            .map(|(cond, branch)| ElifClause::new(cond, branch))
            .collect();
        Self::if_chain(condition, if_branch, elifs, else_branch, location)
    }

    /// Build an `if` chain from already-paired elif clauses
    pub fn if_chain(
        condition: Expr,
        if_branch: Vec<Stmt>,
        elifs: Vec<ElifClause>,
        else_branch: Vec<Stmt>,
        location: SourceLocation,
    ) -> Self {
        Stmt::If(IfStmt {
            condition: Box::new(condition),
            if_branch,
            elifs,
            else_branch,
            location,
        })
    }

    pub fn while_stmt(condition: Expr, body: Vec<Stmt>, location: SourceLocation) -> Self {
        Stmt::While {
            condition: Box::new(condition),
            body,
            location,
        }
    }

    pub fn for_stmt(
        init: ForInit,
        condition: Option<Expr>,
        increment: Option<Assign>,
        body: Vec<Stmt>,
        location: SourceLocation,
    ) -> Self {
        Stmt::For {
            init,
            condition: condition.map(Box::new),
            increment,
            body,
            location,
        }
    }

    pub fn expr_stmt(expr: Expr, location: SourceLocation) -> Self {
        Stmt::ExprStmt {
            expr: Box::new(expr),
            location,
        }
    }

    pub fn block(statements: Vec<Stmt>, location: SourceLocation) -> Self {
        Stmt::Block {
            statements,
            location,
        }
    }

    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::VarDecl(decl) => &decl.location,
            Stmt::Assign(assign) => &assign.location,
            Stmt::Return { location, .. } => location,
            Stmt::Print { location, .. } => location,
            Stmt::Break(loc) => loc,
            Stmt::Continue(loc) => loc,
            Stmt::Block { location, .. } => location,
            Stmt::If(if_stmt) => &if_stmt.location,
            Stmt::While { location, .. } => location,
            Stmt::For { location, .. } => location,
            Stmt::ExprStmt { location, .. } => location,
        }
    }

    pub(crate) fn vacant() -> Self {
        Stmt::Break(SourceLocation::default())
    }
}

impl From<VarDecl> for Stmt {
    fn from(decl: VarDecl) -> Self {
        Stmt::VarDecl(decl)
    }
}

impl From<Assign> for Stmt {
    fn from(assign: Assign) -> Self {
        Stmt::Assign(assign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize, column: usize) -> SourceLocation {
        SourceLocation::new(line, column)
    }

    fn ident(name: &str) -> Expr {
        Expr::identifier(name, loc(1, 1))
    }

    #[test]
    fn test_if_keeps_elif_arrays_aligned() {
        let stmt = Stmt::if_stmt(
            ident("a"),
            vec![Stmt::break_stmt(loc(2, 5))],
            vec![ident("b"), ident("c")],
            vec![
                vec![Stmt::continue_stmt(loc(4, 5))],
                vec![
                    Stmt::break_stmt(loc(6, 5)),
                    Stmt::continue_stmt(loc(7, 5)),
                ],
            ],
            Vec::new(),
            loc(1, 1),
        );

        match &stmt {
            Stmt::If(if_stmt) => {
                assert_eq!(if_stmt.elif_count(), 2);
                assert_eq!(if_stmt.elif_conditions().count(), 2);
                assert_eq!(if_stmt.elif_branches().count(), 2);
                assert_eq!(if_stmt.elif_branch_sizes(), vec![1, 2]);
                assert!(!if_stmt.has_else());

                let names: Vec<_> = if_stmt
                    .elif_conditions()
                    .map(|cond| match cond {
                        Expr::Identifier(name, _) => name.as_str(),
                        _ => "",
                    })
                    .collect();
                assert_eq!(names, ["b", "c"]);
            }
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    #[should_panic(expected = "index-aligned")]
    fn test_if_rejects_misaligned_elifs() {
        let _ = Stmt::if_stmt(
            ident("a"),
            Vec::new(),
            vec![ident("b")],
            Vec::new(),
            Vec::new(),
            loc(1, 1),
        );
    }

    #[test]
    fn test_for_init_select_keeps_matching_payload() {
        let init = Some(Expr::literal_int(0, loc(1, 13)));
        let decl = VarDecl::new("i", DataType::Int, init, loc(1, 6));
        let assign = Assign::new("j", Expr::literal_int(1, loc(1, 10)), loc(1, 6));

        let init = ForInit::select(ForInitKind::Assign, Some(decl.clone()), Some(assign));
        assert_eq!(init.kind(), ForInitKind::Assign);
        assert!(matches!(&init, ForInit::Assign(a) if a.name == "j"));

        let init = ForInit::select(ForInitKind::VarDecl, Some(decl), None);
        assert!(matches!(&init, ForInit::VarDecl(d) if d.name == "i"));

        let init = ForInit::select(ForInitKind::None, None, None);
        assert_eq!(init.kind(), ForInitKind::None);
    }

    #[test]
    fn test_for_stores_header_verbatim() {
        let stmt = Stmt::for_stmt(
            ForInit::VarDecl(VarDecl::new("i", DataType::Int, None, loc(3, 6))),
            None,
            Some(Assign::new("i", ident("i"), loc(3, 20))),
            Vec::new(),
            loc(3, 1),
        );

        match &stmt {
            Stmt::For {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                assert_eq!(init.kind(), ForInitKind::VarDecl);
                assert!(condition.is_none());
                assert_eq!(increment.as_ref().map(|a| a.name.as_str()), Some("i"));
                assert!(body.is_empty());
            }
            _ => panic!("Expected for statement"),
        }
        assert_eq!(*stmt.location(), loc(3, 1));
    }
}
