//! Diagnostic printer
//!
//! Renders a tree as indented text, one item per line, in pre-order: a node's
//! own line comes before the lines of its children, and children appear in
//! the same order teardown visits them.
//!
//! The printer never writes to a global stream. It produces a list of
//! [`PrintedLine`]s (nesting depth plus text) and leaves it to the caller to
//! join them ([`AstPrinter::render_lines`]) or send them anywhere else.
//!
//! Like teardown, the traversal keeps its pending work on an explicit stack, so
//! printing a pathologically deep program cannot overflow the call stack.

use std::borrow::Cow;

use tracing::trace;

use crate::ast::{Assign, Decl, Expr, ForInit, Node, Program, Stmt, VarDecl};
use crate::constants::{DEFAULT_FLOAT_PRECISION, DEFAULT_INDENT_WIDTH, PROGRAM_NODE_DEPTH};

/// Formatting knobs for the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Digits printed after the decimal point of float literals
    pub float_precision: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            indent_width: DEFAULT_INDENT_WIDTH,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

/// One rendered line: its nesting depth and its text without indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedLine {
    pub depth: usize,
    pub text: String,
}

impl PrintedLine {
    pub fn indented(&self, indent_width: usize) -> String {
        format!("{}{}", " ".repeat(self.depth * indent_width), self.text)
    }
}

/// Pending work for the traversal
enum Item<'a> {
    Node(&'a Node),
    Expr(&'a Expr),
    Stmt(&'a Stmt),
    Decl(&'a Decl),
    VarDecl(&'a VarDecl),
    Assign(&'a Assign),
    Label(Cow<'static, str>),
}

struct Pending<'a> {
    item: Item<'a>,
    depth: usize,
}

impl<'a> Pending<'a> {
    fn new(item: Item<'a>, depth: usize) -> Self {
        Pending { item, depth }
    }
}

/// Pre-order tree printer
#[derive(Debug, Clone, Default)]
pub struct AstPrinter {
    options: PrinterOptions,
}

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter::default()
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        AstPrinter { options }
    }

    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    /// Lines for a whole program: a header followed by every top-level node
    pub fn program_lines(&self, program: &Program) -> Vec<PrintedLine> {
        let roots = program
            .iter()
            .map(|node| Pending::new(Item::Node(node), PROGRAM_NODE_DEPTH))
            .collect();

        let mut lines = vec![PrintedLine {
            depth: 0,
            text: format!("AST with {} nodes:", program.len()),
        }];
        self.walk(roots, &mut lines);
        lines
    }

    pub fn node_lines(&self, node: &Node, depth: usize) -> Vec<PrintedLine> {
        self.lines_for(Item::Node(node), depth)
    }

    pub fn expr_lines(&self, expr: &Expr, depth: usize) -> Vec<PrintedLine> {
        self.lines_for(Item::Expr(expr), depth)
    }

    pub fn stmt_lines(&self, stmt: &Stmt, depth: usize) -> Vec<PrintedLine> {
        self.lines_for(Item::Stmt(stmt), depth)
    }

    pub fn decl_lines(&self, decl: &Decl, depth: usize) -> Vec<PrintedLine> {
        self.lines_for(Item::Decl(decl), depth)
    }

    pub fn render_program(&self, program: &Program) -> String {
        let lines = self.program_lines(program);
        trace!(nodes = program.len(), lines = lines.len(), "rendered program");
        self.render_lines(&lines)
    }

    pub fn render_node(&self, node: &Node) -> String {
        self.render_lines(&self.node_lines(node, 0))
    }

    /// Join lines with indentation, each terminated by a newline
    pub fn render_lines(&self, lines: &[PrintedLine]) -> String {
        let mut out = String::new();
        for line in lines {
            out.push_str(&line.indented(self.options.indent_width));
            out.push('\n');
        }
        out
    }

    fn lines_for(&self, item: Item<'_>, depth: usize) -> Vec<PrintedLine> {
        let mut lines = Vec::new();
        self.walk(vec![Pending::new(item, depth)], &mut lines);
        lines
    }

    fn walk<'a>(&self, roots: Vec<Pending<'a>>, lines: &mut Vec<PrintedLine>) {
        let mut stack: Vec<Pending<'a>> = roots.into_iter().rev().collect();
        let mut children = Vec::new();

        while let Some(Pending { item, depth }) = stack.pop() {
            let text = match item {
                Item::Node(node) => self.visit_node(node, depth, &mut children),
                Item::Expr(expr) => self.visit_expr(expr, depth, &mut children),
                Item::Stmt(stmt) => self.visit_stmt(stmt, depth, &mut children),
                Item::Decl(decl) => self.visit_decl(decl, depth, &mut children),
                Item::VarDecl(decl) => visit_var_decl(decl, depth, &mut children),
                Item::Assign(assign) => visit_assign(assign, depth, &mut children),
                Item::Label(text) => text.into_owned(),
            };
            lines.push(PrintedLine { depth, text });
            stack.extend(children.drain(..).rev());
        }
    }

    fn visit_node<'a>(&self, node: &'a Node, depth: usize, out: &mut Vec<Pending<'a>>) -> String {
        let payload = match node {
            Node::Expression(expr, _) => Item::Expr(expr),
            Node::Statement(stmt, _) => Item::Stmt(stmt),
            Node::Declaration(decl, _) => Item::Decl(decl),
        };
        out.push(Pending::new(payload, depth + 1));
        format!("{} Node:", node.category().name())
    }

    fn visit_expr<'a>(&self, expr: &'a Expr, depth: usize, out: &mut Vec<Pending<'a>>) -> String {
        let child = depth + 1;
        match expr {
            Expr::LiteralInt(value, _) => format!("Literal Int: {}", value),
            Expr::LiteralFloat(value, _) => {
                format!("Literal Float: {:.*}", self.options.float_precision, value)
            }
            Expr::LiteralString(value, _) => format!("Literal String: \"{}\"", value),
            Expr::Identifier(name, _) => format!("Identifier: {}", name),
            Expr::Assignment { name, value, .. } => {
                out.push(Pending::new(Item::Expr(value), child));
                format!("Assignment to {}:", name)
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                out.push(Pending::new(Item::Expr(left), child));
                out.push(Pending::new(Item::Expr(right), child));
                format!("Binary Expression ({}):", op)
            }
            Expr::Unary { op, operand, .. } => {
                out.push(Pending::new(Item::Expr(operand), child));
                format!("Unary Expression ({}):", op)
            }
            Expr::Call { name, args, .. } => {
                push_exprs(&args.args, child, out);
                format!("Function Call: {} with {} args", name, args.len())
            }
            Expr::ArgList(list) => {
                push_exprs(&list.args, child, out);
                format!("Argument List with {} args", list.len())
            }
        }
    }

    fn visit_stmt<'a>(&self, stmt: &'a Stmt, depth: usize, out: &mut Vec<Pending<'a>>) -> String {
        let child = depth + 1;
        let grandchild = depth + 2;
        match stmt {
            Stmt::VarDecl(decl) => visit_var_decl(decl, depth, out),
            Stmt::Assign(assign) => visit_assign(assign, depth, out),
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    out.push(Pending::new(Item::Expr(value), child));
                }
                "Return Statement:".to_string()
            }
            Stmt::Print { args, .. } => {
                push_exprs(&args.args, child, out);
                "Print Statement:".to_string()
            }
            Stmt::Break(_) => "Break Statement".to_string(),
            Stmt::Continue(_) => "Continue Statement".to_string(),
            Stmt::ExprStmt { expr, .. } => {
                out.push(Pending::new(Item::Expr(expr), child));
                "Expression Statement:".to_string()
            }
            Stmt::Block { statements, .. } => {
                push_stmts(statements, child, out);
                "Block Statement:".to_string()
            }
            Stmt::If(if_stmt) => {
                out.push(label("If condition:", child));
                out.push(Pending::new(Item::Expr(&if_stmt.condition), grandchild));
                out.push(label("If branch:", child));
                push_stmts(&if_stmt.if_branch, grandchild, out);
                for (index, clause) in if_stmt.elifs.iter().enumerate() {
                    out.push(label(format!("Elif condition {}:", index), child));
                    out.push(Pending::new(Item::Expr(&clause.condition), grandchild));
                    push_stmts(&clause.branch, grandchild, out);
                }
                if if_stmt.has_else() {
                    out.push(label("Else branch:", child));
                    push_stmts(&if_stmt.else_branch, grandchild, out);
                }
                "If Statement:".to_string()
            }
            Stmt::While {
                condition, body, ..
            } => {
                out.push(Pending::new(Item::Expr(condition), child));
                push_stmts(body, child, out);
                "While Statement:".to_string()
            }
            Stmt::For {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                match init {
                    ForInit::None => out.push(label("Initializer: none", child)),
                    ForInit::VarDecl(decl) => out.push(Pending::new(Item::VarDecl(decl), child)),
                    ForInit::Assign(assign) => out.push(Pending::new(Item::Assign(assign), child)),
                }
                if let Some(condition) = condition {
                    out.push(label("Condition:", child));
                    out.push(Pending::new(Item::Expr(condition), grandchild));
                }
                if let Some(increment) = increment {
                    out.push(label("Increment:", child));
                    out.push(Pending::new(Item::Assign(increment), grandchild));
                }
                out.push(label("Body:", child));
                push_stmts(body, grandchild, out);
                "For Statement:".to_string()
            }
        }
    }

    fn visit_decl<'a>(&self, decl: &'a Decl, depth: usize, out: &mut Vec<Pending<'a>>) -> String {
        match decl {
            Decl::Function {
                name,
                return_type,
                params,
                body,
                ..
            } => {
                out.push(label("Parameters:", depth + 1));
                for param in params {
                    out.push(label(
                        format!("Param: {} (type {})", param.name, param.param_type),
                        depth + 2,
                    ));
                }
                out.push(label("Body:", depth + 1));
                push_stmts(body, depth + 2, out);
                format!("Function Declaration: {} (return type {})", name, return_type)
            }
            Decl::GlobalVar {
                name,
                var_type,
                initializer,
                ..
            } => {
                if let Some(init) = initializer {
                    out.push(Pending::new(Item::Expr(init), depth + 1));
                }
                format!("Global Variable: {} (type {})", name, var_type)
            }
        }
    }
}

fn visit_var_decl<'a>(decl: &'a VarDecl, depth: usize, out: &mut Vec<Pending<'a>>) -> String {
    if let Some(init) = &decl.initializer {
        out.push(Pending::new(Item::Expr(init), depth + 1));
    }
    format!("Variable Declaration: {} (type {})", decl.name, decl.var_type)
}

fn visit_assign<'a>(assign: &'a Assign, depth: usize, out: &mut Vec<Pending<'a>>) -> String {
    out.push(Pending::new(Item::Expr(&assign.value), depth + 1));
    format!("Assignment Statement: {}", assign.name)
}

fn label<'a>(text: impl Into<Cow<'static, str>>, depth: usize) -> Pending<'a> {
    Pending::new(Item::Label(text.into()), depth)
}

fn push_exprs<'a>(exprs: &'a [Expr], depth: usize, out: &mut Vec<Pending<'a>>) {
    out.extend(exprs.iter().map(|expr| Pending::new(Item::Expr(expr), depth)));
}

fn push_stmts<'a>(stmts: &'a [Stmt], depth: usize, out: &mut Vec<Pending<'a>>) {
    out.extend(stmts.iter().map(|stmt| Pending::new(Item::Stmt(stmt), depth)));
}
